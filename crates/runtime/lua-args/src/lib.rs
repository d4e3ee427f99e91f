//! Checked extraction of Lua call arguments for Lotus host functions.
//!
//! Host functions receive their arguments as a [`Frame`] and pull typed
//! values out of it with `check_*` (required) and `opt_*` (defaulted)
//! accessors, for positional arguments and for fields of option tables.
//! Validation failures come back as [`Error`] and are raised in Lua with the
//! interpreter's usual `bad argument #N` diagnostics.
//!
//! ```ignore
//! let spawn = create_function(&lua, "spawn", |frame| {
//!     let name = frame.check_string_field(1, "name")?;
//!     let layer = frame.opt_layer_field(1, "layer", Layer::new(0, &LayerRange::default()).unwrap())?;
//!     let color = frame.opt_color_field(1, "color", Color::rgb(255, 255, 255))?;
//!     Ok(spawn_entity(name, layer, color))
//! })?;
//! ```

pub mod config;
pub mod domain;
pub mod enums;
pub mod error;
pub mod frame;
pub mod ident;
mod scalar;
pub mod value_type;

pub use config::{ConfigError, LayerRange};
pub use domain::{Color, Layer};
pub use enums::FromOrdinal;
pub use error::{Error, Result};
pub use frame::{Frame, GLOBALS_INDEX, create_function, create_method, register};
pub use ident::is_valid_identifier;
pub use value_type::ValueType;
