//! Checked access to scalar arguments and table fields.
//!
//! Every kind follows the same contract:
//!
//! - `is_<kind>` never raises and never touches the stack.
//! - `check_<kind>` raises when the value is missing or has the wrong type.
//! - `opt_<kind>` returns the default for `nil`, but still raises on a wrong
//!   type.
//!
//! The `_field` variants read `t[key]` from the table at a given position and
//! report failures against that table's argument position.
//!
//! Conversions follow Lua's own coercions: numeric strings are numbers, and
//! numbers are strings.

use mlua::{Function, Integer, Number, Table, Value};

use crate::error::Result;
use crate::frame::Frame;

impl<'lua> Frame<'lua> {
    // =========================================================================
    // Conversions
    // =========================================================================

    /// Numeric value at `index`, as `lua_tonumber` sees it.
    pub(crate) fn to_number(&self, index: i32) -> Option<Number> {
        match self.get(index) {
            Value::Integer(i) => Some(i as Number),
            Value::Number(n) => Some(n),
            value @ Value::String(_) => self.lua().coerce_number(value).ok().flatten(),
            _ => None,
        }
    }

    /// Integer value at `index`; fractional numbers truncate toward zero.
    pub(crate) fn to_integer(&self, index: i32) -> Option<Integer> {
        match self.get(index) {
            Value::Integer(i) => Some(i),
            _ => self.to_number(index).map(|n| n as Integer),
        }
    }

    /// Integer value at `index`, rejecting numbers with a fractional part.
    pub(crate) fn to_exact_integer(&self, index: i32) -> Option<Integer> {
        match self.get(index) {
            Value::Integer(i) => Some(i),
            _ => self
                .to_number(index)
                .filter(|n| n.fract() == 0.0)
                .map(|n| n as Integer),
        }
    }

    pub(crate) fn to_string_value(&self, index: i32) -> Option<String> {
        match self.get(index) {
            Value::String(s) => Some(String::from(s.to_string_lossy())),
            value @ (Value::Integer(_) | Value::Number(_)) => self
                .lua()
                .coerce_string(value)
                .ok()
                .flatten()
                .map(|s| String::from(s.to_string_lossy())),
            _ => None,
        }
    }

    fn to_boolean(&self, index: i32) -> Option<bool> {
        match self.get(index) {
            Value::Boolean(b) => Some(b),
            _ => None,
        }
    }

    fn to_function(&self, index: i32) -> Option<Function> {
        match self.get(index) {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    fn to_table(&self, index: i32) -> Option<Table> {
        match self.get(index) {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    // =========================================================================
    // Shared check/opt machinery
    // =========================================================================

    pub(crate) fn check_kind<T>(
        &self,
        index: i32,
        kind: &str,
        convert: impl Fn(&Self, i32) -> Option<T>,
    ) -> Result<T> {
        match convert(self, index) {
            Some(value) => Ok(value),
            None => self.type_error(index, kind),
        }
    }

    pub(crate) fn opt_kind<T>(
        &self,
        index: i32,
        kind: &str,
        convert: impl Fn(&Self, i32) -> Option<T>,
        default: T,
    ) -> Result<T> {
        if self.is_none_or_nil(index) {
            return Ok(default);
        }
        self.check_kind(index, kind, convert)
    }

    pub(crate) fn check_field_kind<T>(
        &mut self,
        table: i32,
        key: &str,
        kind: &str,
        convert: impl Fn(&Self, i32) -> Option<T>,
    ) -> Result<T> {
        let table = self.normalize_index(table);
        self.with_field(table, key, |frame, field| match convert(&*frame, field) {
            Some(value) => Ok(value),
            None => frame.field_error(table, key, kind, frame.type_of(field)),
        })
    }

    pub(crate) fn opt_field_kind<T>(
        &mut self,
        table: i32,
        key: &str,
        kind: &str,
        convert: impl Fn(&Self, i32) -> Option<T>,
        default: T,
    ) -> Result<T> {
        let table = self.normalize_index(table);
        self.with_field(table, key, |frame, field| {
            if frame.is_none_or_nil(field) {
                return Ok(default);
            }
            match convert(&*frame, field) {
                Some(value) => Ok(value),
                None => frame.field_error(table, key, kind, frame.type_of(field)),
            }
        })
    }

    // =========================================================================
    // Integer
    // =========================================================================

    /// True if the value converts to an integer, truncating toward zero.
    pub fn is_integer(&self, index: i32) -> bool {
        self.to_integer(index).is_some()
    }

    /// Integer at `index`; numbers and numeric strings are truncated.
    pub fn check_integer(&self, index: i32) -> Result<Integer> {
        self.check_kind(index, "integer", Self::to_integer)
    }

    /// Like [`Frame::check_integer`], with `default` for a missing or `nil` argument.
    pub fn opt_integer(&self, index: i32, default: Integer) -> Result<Integer> {
        self.opt_kind(index, "integer", Self::to_integer, default)
    }

    /// Integer field `key` of the table at `table`.
    pub fn check_integer_field(&mut self, table: i32, key: &str) -> Result<Integer> {
        self.check_field_kind(table, key, "integer", Self::to_integer)
    }

    /// Integer field, or `default` when the field is `nil`.
    pub fn opt_integer_field(&mut self, table: i32, key: &str, default: Integer) -> Result<Integer> {
        self.opt_field_kind(table, key, "integer", Self::to_integer, default)
    }

    // =========================================================================
    // Number
    // =========================================================================

    /// True for numbers and numeric strings.
    pub fn is_number(&self, index: i32) -> bool {
        self.to_number(index).is_some()
    }

    /// Number at `index`.
    pub fn check_number(&self, index: i32) -> Result<Number> {
        self.check_kind(index, "number", Self::to_number)
    }

    /// Number at `index`, or `default` when absent.
    pub fn opt_number(&self, index: i32, default: Number) -> Result<Number> {
        self.opt_kind(index, "number", Self::to_number, default)
    }

    /// Number field `key` of the table at `table`.
    pub fn check_number_field(&mut self, table: i32, key: &str) -> Result<Number> {
        self.check_field_kind(table, key, "number", Self::to_number)
    }

    /// Number field, or `default` when the field is `nil`.
    pub fn opt_number_field(&mut self, table: i32, key: &str, default: Number) -> Result<Number> {
        self.opt_field_kind(table, key, "number", Self::to_number, default)
    }

    // =========================================================================
    // String
    // =========================================================================

    /// True for strings and numbers, which Lua converts to strings.
    pub fn is_string(&self, index: i32) -> bool {
        self.to_string_value(index).is_some()
    }

    /// String at `index`, copied out of the interpreter.
    pub fn check_string(&self, index: i32) -> Result<String> {
        self.check_kind(index, "string", Self::to_string_value)
    }

    /// String at `index`, or a copy of `default` when absent.
    pub fn opt_string(&self, index: i32, default: &str) -> Result<String> {
        self.opt_kind(index, "string", Self::to_string_value, default.to_string())
    }

    /// String field `key` of the table at `table`.
    pub fn check_string_field(&mut self, table: i32, key: &str) -> Result<String> {
        self.check_field_kind(table, key, "string", Self::to_string_value)
    }

    /// String field, or `default` when the field is `nil`.
    pub fn opt_string_field(&mut self, table: i32, key: &str, default: &str) -> Result<String> {
        self.opt_field_kind(
            table,
            key,
            "string",
            Self::to_string_value,
            default.to_string(),
        )
    }

    // =========================================================================
    // Boolean
    // =========================================================================

    /// True only for `true` and `false`; other values are not coerced.
    pub fn is_boolean(&self, index: i32) -> bool {
        self.to_boolean(index).is_some()
    }

    /// Boolean at `index`.
    pub fn check_boolean(&self, index: i32) -> Result<bool> {
        self.check_kind(index, "boolean", Self::to_boolean)
    }

    /// Boolean at `index`, or `default` when absent.
    pub fn opt_boolean(&self, index: i32, default: bool) -> Result<bool> {
        self.opt_kind(index, "boolean", Self::to_boolean, default)
    }

    /// Boolean field `key` of the table at `table`.
    pub fn check_boolean_field(&mut self, table: i32, key: &str) -> Result<bool> {
        self.check_field_kind(table, key, "boolean", Self::to_boolean)
    }

    /// Boolean field, or `default` when the field is `nil`.
    pub fn opt_boolean_field(&mut self, table: i32, key: &str, default: bool) -> Result<bool> {
        self.opt_field_kind(table, key, "boolean", Self::to_boolean, default)
    }

    // =========================================================================
    // Function
    // =========================================================================

    /// True if the value is a function.
    pub fn is_function(&self, index: i32) -> bool {
        self.to_function(index).is_some()
    }

    /// Function at `index`, as a handle that stays valid after the call.
    pub fn check_function(&self, index: i32) -> Result<Function> {
        self.check_kind(index, "function", Self::to_function)
    }

    /// Function at `index`, or `None` when absent.
    pub fn opt_function(&self, index: i32) -> Result<Option<Function>> {
        self.opt_kind(
            index,
            "function",
            |frame, i| frame.to_function(i).map(Some),
            None,
        )
    }

    /// Function field `key` of the table at `table`.
    pub fn check_function_field(&mut self, table: i32, key: &str) -> Result<Function> {
        self.check_field_kind(table, key, "function", Self::to_function)
    }

    /// Function field, or `None` when the field is `nil`.
    pub fn opt_function_field(&mut self, table: i32, key: &str) -> Result<Option<Function>> {
        self.opt_field_kind(
            table,
            key,
            "function",
            |frame, i| frame.to_function(i).map(Some),
            None,
        )
    }

    // =========================================================================
    // Table
    // =========================================================================

    /// True if the value is a table.
    pub fn is_table(&self, index: i32) -> bool {
        self.to_table(index).is_some()
    }

    /// Table at `index`.
    pub fn check_table(&self, index: i32) -> Result<Table> {
        self.check_kind(index, "table", Self::to_table)
    }

    /// Table at `index`, or `None` when absent.
    pub fn opt_table(&self, index: i32) -> Result<Option<Table>> {
        self.opt_kind(index, "table", |frame, i| frame.to_table(i).map(Some), None)
    }

    /// Table field `key` of the table at `table`.
    pub fn check_table_field(&mut self, table: i32, key: &str) -> Result<Table> {
        self.check_field_kind(table, key, "table", Self::to_table)
    }

    /// Table field, or `None` when the field is `nil`.
    pub fn opt_table_field(&mut self, table: i32, key: &str) -> Result<Option<Table>> {
        self.opt_field_kind(
            table,
            key,
            "table",
            |frame, i| frame.to_table(i).map(Some),
            None,
        )
    }
}
