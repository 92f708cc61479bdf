use serde::Serialize;

use crate::error::{QuirkError, Result};

/// Attribute data types understood by the profiles in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    Bool,
    Uint8,
    Uint16,
    Uint32,
    Enum8,
    Enum16,
    Bitmap8,
    /// Single precision float
    Single,
    CharacterString,
    /// Length prefixed list of character strings
    CharacterStringList,
}

impl AttributeType {
    /// ZCL data type identifier as sent on the wire.
    pub fn data_type_code(self) -> u8 {
        match self {
            AttributeType::Bool => 0x10,
            AttributeType::Bitmap8 => 0x18,
            AttributeType::Uint8 => 0x20,
            AttributeType::Uint16 => 0x21,
            AttributeType::Uint32 => 0x23,
            AttributeType::Enum8 => 0x30,
            AttributeType::Enum16 => 0x31,
            AttributeType::Single => 0x39,
            AttributeType::CharacterString => 0x42,
            AttributeType::CharacterStringList => 0x48,
        }
    }

    /// Types for which a reportable change threshold is meaningful.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            AttributeType::Uint8
                | AttributeType::Uint16
                | AttributeType::Uint32
                | AttributeType::Enum8
                | AttributeType::Enum16
                | AttributeType::Bitmap8
                | AttributeType::Single
        )
    }

    /// True for types that can carry a 16-bit enumeration code.
    pub fn holds_enum_code(self) -> bool {
        matches!(
            self,
            AttributeType::Uint8
                | AttributeType::Uint16
                | AttributeType::Enum8
                | AttributeType::Enum16
        )
    }

    pub fn accepts(self, value: &AttributeValue) -> bool {
        value.attribute_type() == self
    }

    /// Parses a textual value (as typed on a command line) into a value of this type.
    pub fn parse_value(self, input: &str) -> Result<AttributeValue> {
        let invalid = || QuirkError::InvalidValue {
            input: input.to_string(),
            expected: self,
        };
        let trimmed = input.trim();
        let value = match self {
            AttributeType::Bool => match trimmed.to_lowercase().as_str() {
                "true" | "on" | "1" => AttributeValue::Bool(true),
                "false" | "off" | "0" => AttributeValue::Bool(false),
                _ => return Err(invalid()),
            },
            AttributeType::Uint8 => AttributeValue::Uint8(parse_int(trimmed).ok_or_else(invalid)?),
            AttributeType::Uint16 => {
                AttributeValue::Uint16(parse_int(trimmed).ok_or_else(invalid)?)
            }
            AttributeType::Uint32 => {
                AttributeValue::Uint32(parse_int(trimmed).ok_or_else(invalid)?)
            }
            AttributeType::Enum8 => AttributeValue::Enum8(parse_int(trimmed).ok_or_else(invalid)?),
            AttributeType::Enum16 => {
                AttributeValue::Enum16(parse_int(trimmed).ok_or_else(invalid)?)
            }
            AttributeType::Bitmap8 => {
                AttributeValue::Bitmap8(parse_int(trimmed).ok_or_else(invalid)?)
            }
            AttributeType::Single => {
                AttributeValue::Single(trimmed.parse::<f32>().map_err(|_| invalid())?)
            }
            AttributeType::CharacterString => AttributeValue::CharacterString(input.to_string()),
            AttributeType::CharacterStringList => AttributeValue::CharacterStringList(
                input.split(',').map(|s| s.trim().to_string()).collect(),
            ),
        };
        Ok(value)
    }
}

/// Accepts decimal or `0x` prefixed hexadecimal.
fn parse_int<T>(input: &str) -> Option<T>
where
    T: TryFrom<u64>,
{
    let raw = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16).ok()?,
        None => input.parse::<u64>().ok()?,
    };
    T::try_from(raw).ok()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    Bool(bool),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Enum8(u8),
    Enum16(u16),
    Bitmap8(u8),
    Single(f32),
    CharacterString(String),
    CharacterStringList(Vec<String>),
}

impl AttributeValue {
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            AttributeValue::Bool(_) => AttributeType::Bool,
            AttributeValue::Uint8(_) => AttributeType::Uint8,
            AttributeValue::Uint16(_) => AttributeType::Uint16,
            AttributeValue::Uint32(_) => AttributeType::Uint32,
            AttributeValue::Enum8(_) => AttributeType::Enum8,
            AttributeValue::Enum16(_) => AttributeType::Enum16,
            AttributeValue::Bitmap8(_) => AttributeType::Bitmap8,
            AttributeValue::Single(_) => AttributeType::Single,
            AttributeValue::CharacterString(_) => AttributeType::CharacterString,
            AttributeValue::CharacterStringList(_) => AttributeType::CharacterStringList,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Widens any value able to hold an enumeration code.
    pub fn as_enum_code(&self) -> Option<u16> {
        match self {
            AttributeValue::Uint8(v) | AttributeValue::Enum8(v) => Some(u16::from(*v)),
            AttributeValue::Uint16(v) | AttributeValue::Enum16(v) => Some(*v),
            _ => None,
        }
    }

    /// Narrows an enumeration code to the given attribute type.
    pub fn from_enum_code(code: u16, ty: AttributeType) -> Option<Self> {
        match ty {
            AttributeType::Uint8 => u8::try_from(code).ok().map(AttributeValue::Uint8),
            AttributeType::Enum8 => u8::try_from(code).ok().map(AttributeValue::Enum8),
            AttributeType::Uint16 => Some(AttributeValue::Uint16(code)),
            AttributeType::Enum16 => Some(AttributeValue::Enum16(code)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_aliases() {
        for input in ["true", "ON", "1"] {
            assert_eq!(
                AttributeType::Bool.parse_value(input).unwrap(),
                AttributeValue::Bool(true)
            );
        }
        assert_eq!(
            AttributeType::Bool.parse_value("off").unwrap(),
            AttributeValue::Bool(false)
        );
        assert!(AttributeType::Bool.parse_value("maybe").is_err());
    }

    #[test]
    fn test_parse_hex_and_decimal() {
        assert_eq!(
            AttributeType::Uint16.parse_value("0x0004").unwrap(),
            AttributeValue::Uint16(4)
        );
        assert_eq!(
            AttributeType::Uint16.parse_value("5").unwrap(),
            AttributeValue::Uint16(5)
        );
        assert!(AttributeType::Uint8.parse_value("256").is_err());
    }

    #[test]
    fn test_enum_code_width() {
        assert_eq!(
            AttributeValue::from_enum_code(4, AttributeType::Uint16),
            Some(AttributeValue::Uint16(4))
        );
        assert_eq!(AttributeValue::from_enum_code(0x100, AttributeType::Enum8), None);
        assert_eq!(AttributeValue::Enum8(3).as_enum_code(), Some(3));
        assert_eq!(AttributeValue::Bool(true).as_enum_code(), None);
    }

    #[test]
    fn test_accepts_matching_variant_only() {
        assert!(AttributeType::Bool.accepts(&AttributeValue::Bool(false)));
        assert!(!AttributeType::Uint16.accepts(&AttributeValue::Uint8(1)));
        assert_eq!(AttributeType::Enum16.data_type_code(), 0x31);
    }

    #[test]
    fn test_numeric_types() {
        assert!(AttributeType::Uint16.is_numeric());
        assert!(AttributeType::Single.is_numeric());
        assert!(!AttributeType::Bool.is_numeric());
        assert!(!AttributeType::CharacterString.is_numeric());
    }
}
