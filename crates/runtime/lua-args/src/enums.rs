//! Mapping Lua strings to host enumerations by name.
//!
//! An enumeration is described by a name table: a slice of names whose
//! positions are the ordinals of the corresponding values. The table ends at
//! the end of the slice or at the first empty name, so tables written with a
//! trailing `""` sentinel work unchanged.
//!
//! ```ignore
//! #[derive(Clone, Copy)]
//! enum Direction { Left, Right }
//!
//! impl FromOrdinal for Direction {
//!     fn from_ordinal(ordinal: usize) -> Option<Self> {
//!         [Direction::Left, Direction::Right].get(ordinal).copied()
//!     }
//! }
//!
//! const DIRECTION_NAMES: &[&str] = &["left", "right"];
//!
//! let direction: Direction = frame.check_enum(1, DIRECTION_NAMES)?;
//! ```

use crate::error::Result;
use crate::frame::Frame;

/// Conversion from the position of a name in a name table.
pub trait FromOrdinal: Sized {
    /// `None` if the ordinal has no corresponding value.
    fn from_ordinal(ordinal: usize) -> Option<Self>;
}

macro_rules! impl_from_ordinal {
    ($($ty:ty),*) => {
        $(
            impl FromOrdinal for $ty {
                fn from_ordinal(ordinal: usize) -> Option<Self> {
                    <$ty>::try_from(ordinal).ok()
                }
            }
        )*
    };
}

impl_from_ordinal!(u8, u16, u32, u64, usize, i8, i16, i32, i64);

/// The names of a name table, up to its sentinel.
fn live_names<'a>(names: &'a [&'a str]) -> impl Iterator<Item = &'a str> + 'a {
    names.iter().copied().take_while(|name| !name.is_empty())
}

fn assert_valid_names(names: &[&str]) {
    assert!(
        names.first().is_some_and(|name| !name.is_empty()),
        "invalid list of names"
    );
}

/// `"a", "b", "c"`, in declaration order.
fn allowed_names(names: &[&str]) -> String {
    live_names(names)
        .map(|name| format!("\"{}\"", name))
        .collect::<Vec<_>>()
        .join(", ")
}

impl<'lua> Frame<'lua> {
    /// Look `name` up in `names`, reporting a miss against `position`.
    fn lookup_name<E: FromOrdinal>(&self, position: i32, name: &str, names: &[&str]) -> Result<E> {
        match live_names(names).position(|candidate| candidate == name) {
            Some(ordinal) => match E::from_ordinal(ordinal) {
                Some(value) => Ok(value),
                None => panic!("name table has no value for ordinal {}", ordinal),
            },
            None => self.arg_error(
                position,
                format!(
                    "Invalid name '{}'. Allowed names are: {}",
                    name,
                    allowed_names(names)
                ),
            ),
        }
    }

    /// Read the string at `index` and return the value it names.
    ///
    /// # Panics
    /// If `names` is empty or starts with the sentinel.
    pub fn check_enum<E: FromOrdinal>(&self, index: i32, names: &[&str]) -> Result<E> {
        assert_valid_names(names);
        let name = self.check_string(index)?;
        self.lookup_name(index, &name, names)
    }

    /// Like [`Frame::check_enum`], but `nil` yields `default`.
    ///
    /// `names` is not consulted when the value is absent.
    pub fn opt_enum<E: FromOrdinal>(&self, index: i32, names: &[&str], default: E) -> Result<E> {
        if self.is_none_or_nil(index) {
            return Ok(default);
        }
        self.check_enum(index, names)
    }

    /// Read field `key` of the table at `table` as a name from `names`.
    ///
    /// A missing field is reported as a string field holding `nil`.
    pub fn check_enum_field<E: FromOrdinal>(
        &mut self,
        table: i32,
        key: &str,
        names: &[&str],
    ) -> Result<E> {
        assert_valid_names(names);
        let table = self.normalize_index(table);
        self.with_field(table, key, |frame, field| {
            match frame.to_string_value(field) {
                Some(name) => frame.lookup_name(table, &name, names),
                None => frame.field_error(table, key, "string", frame.type_of(field)),
            }
        })
    }

    /// Like [`Frame::check_enum_field`], but a `nil` field yields `default`.
    pub fn opt_enum_field<E: FromOrdinal>(
        &mut self,
        table: i32,
        key: &str,
        names: &[&str],
        default: E,
    ) -> Result<E> {
        let table = self.normalize_index(table);
        self.with_field(table, key, |frame, field| {
            if frame.is_none_or_nil(field) {
                return Ok(default);
            }
            assert_valid_names(names);
            match frame.to_string_value(field) {
                Some(name) => frame.lookup_name(table, &name, names),
                None => frame.field_error(table, key, "string", frame.type_of(field)),
            }
        })
    }
}
