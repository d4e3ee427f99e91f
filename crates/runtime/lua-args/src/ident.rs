//! Identifier syntax checks for script-authored names.

/// Whether `name` can be used as an identifier.
///
/// The first character must be an ASCII letter or `_`; the rest may also be
/// ASCII digits.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
