//! Host configuration consulted by the domain accessors.

use mlua::{Lua, LuaSerdeExt, Value};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid layer range: min {min} is greater than max {max}")]
    InvalidLayerRange { min: i32, max: i32 },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("lua error: {0}")]
    Lua(#[from] mlua::Error),
}

/// Inclusive range of layers the engine accepts.
///
/// Stored in the interpreter's app data with [`LayerRange::install`] and read
/// back each time a layer is checked, so that changing the configuration
/// takes effect on the next call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerRange {
    pub min: i32,
    pub max: i32,
}

impl Default for LayerRange {
    fn default() -> Self {
        Self { min: 0, max: 2 }
    }
}

impl LayerRange {
    pub fn new(min: i32, max: i32) -> Result<Self, ConfigError> {
        Self { min, max }.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvalidLayerRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(self)
    }

    /// Parse a range from JSON such as `{"min": -1, "max": 3}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let range: Self = serde_json::from_str(json)?;
        range.validated()
    }

    /// Read a range from a Lua value such as `{ min = -1, max = 3 }`.
    pub fn from_lua(lua: &Lua, value: Value) -> Result<Self, ConfigError> {
        let range: Self = lua.from_value(value)?;
        range.validated()
    }

    pub fn contains(&self, layer: i64) -> bool {
        (i64::from(self.min)..=i64::from(self.max)).contains(&layer)
    }

    /// Make this the range used by layer checks on `lua`.
    pub fn install(self, lua: &Lua) {
        tracing::debug!(min = self.min, max = self.max, "installing layer range");
        lua.set_app_data(self);
    }

    /// The range installed on `lua`, or the default range.
    pub fn current(lua: &Lua) -> Self {
        match lua.app_data_ref::<LayerRange>() {
            Some(range) => *range,
            None => {
                tracing::debug!("no layer range installed, using default");
                Self::default()
            }
        }
    }
}
