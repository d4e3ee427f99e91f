//! Engine value types carried in Lua values: colors and layers.

use mlua::{Integer, Value};

use crate::config::LayerRange;
use crate::error::Result;
use crate::frame::Frame;
use crate::value_type::ValueType;

/// An RGBA color.
///
/// In Lua a color is written as a sequence of 3 or 4 integers in
/// `[0, 255]`, e.g. `{255, 128, 0}` or `{255, 128, 0, 64}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Build a color from its components; alpha defaults to opaque.
    ///
    /// Returns `None` unless there are 3 or 4 components, all in `[0, 255]`.
    pub fn from_components(components: &[Integer]) -> Option<Self> {
        let channel = |c: &Integer| u8::try_from(*c).ok();
        match components {
            [r, g, b] => Some(Self::rgb(channel(r)?, channel(g)?, channel(b)?)),
            [r, g, b, a] => Some(Self::new(
                channel(r)?,
                channel(g)?,
                channel(b)?,
                channel(a)?,
            )),
            _ => None,
        }
    }

    pub fn components(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A validated drawing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Layer(i32);

impl Layer {
    /// Build a layer if `value` lies within `range`.
    pub fn new(value: Integer, range: &LayerRange) -> Option<Self> {
        if !range.contains(value) {
            return None;
        }
        i32::try_from(value).ok().map(Layer)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl From<Layer> for i32 {
    fn from(layer: Layer) -> Self {
        layer.0
    }
}

impl<'lua> Frame<'lua> {
    fn to_color(&self, index: i32) -> Option<Color> {
        let Value::Table(table) = self.get(index) else {
            return None;
        };
        let len = table.raw_len();
        if !(3..=4).contains(&len) {
            return None;
        }
        let components = (1..=len)
            .map(|i| match table.raw_get::<Value>(i).ok()? {
                Value::Integer(n) => Some(n),
                Value::Number(n) if n.fract() == 0.0 => Some(n as Integer),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;
        Color::from_components(&components)
    }

    fn to_layer(&self, index: i32) -> Option<Layer> {
        let value = self.to_exact_integer(index)?;
        Layer::new(value, &LayerRange::current(self.lua()))
    }

    /// Why the value at `index` is not a color.
    fn color_mismatch(&self, index: i32) -> String {
        match self.type_of(index) {
            ValueType::Table => {
                "Invalid color: expected a table of 3 or 4 integers in [0, 255]".to_string()
            }
            found => format!("color expected, got {}", found),
        }
    }

    /// Why the value at `index` is not a layer.
    fn layer_mismatch(&self, index: i32) -> String {
        match self.to_exact_integer(index) {
            Some(value) => {
                let range = LayerRange::current(self.lua());
                format!(
                    "Invalid layer: {} (must be between {} and {})",
                    value, range.min, range.max
                )
            }
            None => format!("layer expected, got {}", self.type_of(index)),
        }
    }

    /// Field accessor for domain values: type and structural failures are
    /// both reported with the domain's own message.
    fn domain_field<T>(
        &mut self,
        table: i32,
        key: &str,
        convert: impl Fn(&Self, i32) -> Option<T>,
        mismatch: impl Fn(&Self, i32) -> String,
        default: Option<T>,
    ) -> Result<T> {
        let table = self.normalize_index(table);
        self.with_field(table, key, |frame, field| {
            if frame.is_none_or_nil(field) {
                if let Some(default) = default {
                    return Ok(default);
                }
            }
            match convert(&*frame, field) {
                Some(value) => Ok(value),
                None => frame.bad_field(table, key, mismatch(&*frame, field)),
            }
        })
    }

    // =========================================================================
    // Color
    // =========================================================================

    pub fn is_color(&self, index: i32) -> bool {
        self.to_color(index).is_some()
    }

    pub fn check_color(&self, index: i32) -> Result<Color> {
        if let Some(color) = self.to_color(index) {
            return Ok(color);
        }
        self.arg_error(index, self.color_mismatch(index))
    }

    pub fn opt_color(&self, index: i32, default: Color) -> Result<Color> {
        if self.is_none_or_nil(index) {
            return Ok(default);
        }
        self.check_color(index)
    }

    pub fn check_color_field(&mut self, table: i32, key: &str) -> Result<Color> {
        self.domain_field(table, key, Self::to_color, Self::color_mismatch, None)
    }

    pub fn opt_color_field(&mut self, table: i32, key: &str, default: Color) -> Result<Color> {
        self.domain_field(table, key, Self::to_color, Self::color_mismatch, Some(default))
    }

    // =========================================================================
    // Layer
    // =========================================================================

    /// True if the value is an integer within the installed [`LayerRange`].
    pub fn is_layer(&self, index: i32) -> bool {
        self.to_layer(index).is_some()
    }

    pub fn check_layer(&self, index: i32) -> Result<Layer> {
        if let Some(layer) = self.to_layer(index) {
            return Ok(layer);
        }
        self.arg_error(index, self.layer_mismatch(index))
    }

    pub fn opt_layer(&self, index: i32, default: Layer) -> Result<Layer> {
        if self.is_none_or_nil(index) {
            return Ok(default);
        }
        self.check_layer(index)
    }

    pub fn check_layer_field(&mut self, table: i32, key: &str) -> Result<Layer> {
        self.domain_field(table, key, Self::to_layer, Self::layer_mismatch, None)
    }

    pub fn opt_layer_field(&mut self, table: i32, key: &str, default: Layer) -> Result<Layer> {
        self.domain_field(table, key, Self::to_layer, Self::layer_mismatch, Some(default))
    }
}
