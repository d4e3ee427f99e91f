//! Dynamic type tags for values in a call frame.

use mlua::Value;
use std::fmt;

/// The Lua type of a stack slot, as `lua_type` reports it.
///
/// `None` is the type of a position past the top of the frame, which Lua
/// distinguishes from an explicit `nil`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    None,
    Nil,
    Boolean,
    LightUserData,
    Number,
    String,
    Table,
    Function,
    UserData,
    Thread,
}

impl ValueType {
    /// Type of an existing value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Nil => ValueType::Nil,
            Value::Boolean(_) => ValueType::Boolean,
            Value::LightUserData(_) => ValueType::LightUserData,
            Value::Integer(_) | Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Table(_) => ValueType::Table,
            Value::Function(_) => ValueType::Function,
            Value::Thread(_) => ValueType::Thread,
            _ => ValueType::UserData,
        }
    }

    /// Name used in diagnostics, matching `luaL_typename`.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::None => "no value",
            ValueType::Nil => "nil",
            ValueType::Boolean => "boolean",
            ValueType::LightUserData | ValueType::UserData => "userdata",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Table => "table",
            ValueType::Function => "function",
            ValueType::Thread => "thread",
        }
    }

    /// True for both `nil` and "no value".
    pub fn is_none_or_nil(self) -> bool {
        matches!(self, ValueType::None | ValueType::Nil)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
