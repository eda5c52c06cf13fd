//! JSON encoding shared by the schema and record stores

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Default indentation width of persisted files
pub const DEFAULT_INDENT: usize = 4;

/// Encodes `value` as indented JSON.
///
/// An indent of 0 still breaks lines, matching the layout of indented
/// output with no leading spaces.
pub fn to_pretty_json<T: Serialize + ?Sized>(
    value: &T,
    indent: usize,
) -> serde_json::Result<Vec<u8>> {
    let indent_str = " ".repeat(indent);
    let formatter = PrettyFormatter::with_indent(indent_str.as_bytes());
    let mut buf = Vec::with_capacity(128);
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_four_space_indent() {
        let bytes = to_pretty_json(&json!({"name": 20}), 4).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "{\n    \"name\": 20\n}");
    }

    #[test]
    fn test_empty_array() {
        let bytes = to_pretty_json(&Vec::<u8>::new(), DEFAULT_INDENT).unwrap();
        assert_eq!(bytes, b"[]");
    }
}
