//! Call frames: the value stack seen by one host function call.
//!
//! A [`Frame`] holds the arguments of a single call from Lua into Rust and
//! addresses them the way the Lua C API does: positive positions count from
//! the bottom starting at 1, negative positions count back from the top.
//! Values fetched from tables are pushed on top and popped again by the
//! accessor that fetched them.

use mlua::{Function, IntoLuaMulti, Lua, MultiValue, Table, Value};

use crate::error::{Error, Result};
use crate::value_type::ValueType;

/// Pseudo-index of the global table (LuaJIT's `LUA_GLOBALSINDEX`).
///
/// Pseudo-indices are never rewritten by [`Frame::normalize_index`].
pub const GLOBALS_INDEX: i32 = -10002;

/// The value stack of one host function call.
pub struct Frame<'lua> {
    lua: &'lua Lua,
    slots: Vec<Value>,
    function: Option<String>,
    method: bool,
}

impl<'lua> Frame<'lua> {
    /// Create a frame holding the arguments of a call.
    pub fn new(lua: &'lua Lua, args: MultiValue) -> Self {
        Self {
            lua,
            slots: args.into_iter().collect(),
            function: None,
            method: false,
        }
    }

    /// Name the function this frame belongs to, for diagnostics.
    pub fn named(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    /// Mark this frame as a method call, so that argument 1 is the receiver.
    pub fn method(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self.method = true;
        self
    }

    pub fn lua(&self) -> &'lua Lua {
        self.lua
    }

    pub fn function_name(&self) -> Option<&str> {
        self.function.as_deref()
    }

    // =========================================================================
    // Stack access
    // =========================================================================

    /// Number of values on the stack.
    pub fn top(&self) -> i32 {
        self.slots.len() as i32
    }

    /// Convert a relative (negative) position into an absolute one.
    ///
    /// Positive positions, `0`, pseudo-indices and negative positions below
    /// the bottom of the frame are returned unchanged.
    pub fn normalize_index(&self, index: i32) -> i32 {
        let top = self.top();
        if index < 0 && index >= -top {
            top + index + 1
        } else {
            index
        }
    }

    fn slot(&self, index: i32) -> Option<Value> {
        let index = self.normalize_index(index);
        if index == GLOBALS_INDEX {
            return Some(Value::Table(self.lua.globals()));
        }
        if index < 1 {
            return None;
        }
        self.slots.get(index as usize - 1).cloned()
    }

    /// Value at a position; positions past the top read as `nil`.
    pub fn get(&self, index: i32) -> Value {
        self.slot(index).unwrap_or(Value::Nil)
    }

    /// Type of the value at a position.
    pub fn type_of(&self, index: i32) -> ValueType {
        self.slot(index)
            .map_or(ValueType::None, |value| ValueType::of(&value))
    }

    pub fn is_none_or_nil(&self, index: i32) -> bool {
        self.type_of(index).is_none_or_nil()
    }

    pub fn push(&mut self, value: Value) {
        self.slots.push(value);
    }

    /// Pop `n` values from the top.
    pub fn pop(&mut self, n: usize) {
        debug_assert!(n <= self.slots.len(), "popping more values than pushed");
        let depth = self.slots.len().saturating_sub(n);
        self.slots.truncate(depth);
    }

    /// Push `t[key]` where `t` is the table at `table`, and return its type.
    ///
    /// Metamethods are honored, as with `lua_getfield`. Nothing is pushed if
    /// the value at `table` cannot be indexed.
    pub fn get_field(&mut self, table: i32, key: &str) -> Result<ValueType> {
        let value = match self.get(table) {
            Value::Table(t) => t.get::<Value>(key)?,
            other => {
                return self.error(format!(
                    "attempt to index a {} value (field '{}')",
                    ValueType::of(&other),
                    key
                ));
            }
        };
        let value_type = ValueType::of(&value);
        tracing::trace!(table, key, %value_type, "resolved field");
        self.slots.push(value);
        Ok(value_type)
    }

    /// Push a table field, run `f` on its position, then restore the stack.
    ///
    /// The stack depth after the call equals the depth before it whether `f`
    /// succeeds or fails.
    pub fn with_field<T>(
        &mut self,
        table: i32,
        key: &str,
        f: impl FnOnce(&mut Self, i32) -> Result<T>,
    ) -> Result<T> {
        let table = self.normalize_index(table);
        debug_assert!(
            table == GLOBALS_INDEX || (1..=self.top()).contains(&table),
            "invalid table position {} for field '{}'",
            table,
            key
        );
        let depth = self.slots.len();
        self.get_field(table, key)?;
        let field = self.top();
        let result = f(self, field);
        self.slots.truncate(depth);
        result
    }

    // =========================================================================
    // Error reporting
    // =========================================================================

    /// Raise `message` as a Lua error.
    ///
    /// Always returns `Err`; the type parameter lets it stand wherever a
    /// value is expected.
    pub fn error<T>(&self, message: impl Into<String>) -> Result<T> {
        let message = message.into();
        tracing::debug!(function = ?self.function, %message, "raising script error");
        Err(Error::Runtime(message))
    }

    /// Raise an error about the argument at `position`.
    pub fn arg_error<T>(&self, position: i32, message: impl Into<String>) -> Result<T> {
        let mut position = self.normalize_index(position);
        let message = message.into();
        tracing::debug!(function = ?self.function, position, %message, "raising argument error");
        if self.method {
            position -= 1;
            if position == 0 {
                return Err(Error::BadSelf {
                    function: self.function.clone().unwrap_or_else(|| "?".to_string()),
                    message,
                });
            }
        }
        Err(Error::BadArgument {
            position,
            function: self.function.clone(),
            message,
        })
    }

    /// Raise `<expected> expected, got <type>` for the argument at `position`.
    pub fn type_error<T>(&self, position: i32, expected: &str) -> Result<T> {
        let found = self.type_of(position);
        self.arg_error(position, format!("{} expected, got {}", expected, found))
    }

    /// Raise a type error about field `key` of the table at `table`.
    pub fn field_error<T>(
        &self,
        table: i32,
        key: &str,
        expected: &str,
        found: ValueType,
    ) -> Result<T> {
        self.bad_field(table, key, format!("{} expected, got {}", expected, found))
    }

    /// Raise `Bad field '<key>' (<message>)` against the table at `table`.
    pub fn bad_field<T>(&self, table: i32, key: &str, message: impl AsRef<str>) -> Result<T> {
        self.arg_error(table, format!("Bad field '{}' ({})", key, message.as_ref()))
    }
}

/// Wrap a host closure as a Lua function.
///
/// Each call hands the closure a [`Frame`] named `name` holding the call's
/// arguments. An `Err` returned by the closure is raised in Lua.
pub fn create_function<R, F>(lua: &Lua, name: &str, func: F) -> mlua::Result<Function>
where
    R: IntoLuaMulti,
    F: Fn(&mut Frame<'_>) -> Result<R> + 'static,
{
    let name = name.to_owned();
    lua.create_function(move |lua, args: MultiValue| {
        let mut frame = Frame::new(lua, args).named(name.as_str());
        Ok(func(&mut frame)?)
    })
}

/// Like [`create_function`], for functions called as `obj:name(...)`.
pub fn create_method<R, F>(lua: &Lua, name: &str, func: F) -> mlua::Result<Function>
where
    R: IntoLuaMulti,
    F: Fn(&mut Frame<'_>) -> Result<R> + 'static,
{
    let name = name.to_owned();
    lua.create_function(move |lua, args: MultiValue| {
        let mut frame = Frame::new(lua, args).method(name.as_str());
        Ok(func(&mut frame)?)
    })
}

/// Register `func` as a field of `table` under its own name.
pub fn register<R, F>(lua: &Lua, table: &Table, name: &str, func: F) -> mlua::Result<()>
where
    R: IntoLuaMulti,
    F: Fn(&mut Frame<'_>) -> Result<R> + 'static,
{
    table.set(name, create_function(lua, name, func)?)
}
