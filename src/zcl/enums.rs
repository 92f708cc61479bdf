use std::collections::HashSet;

use serde::Serialize;

use crate::error::{QuirkError, Result};

/// A closed, ordered mapping between symbolic labels and 16-bit wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnumValueSet {
    pub name: &'static str,
    pub members: &'static [(&'static str, u16)],
}

impl EnumValueSet {
    pub const fn new(name: &'static str, members: &'static [(&'static str, u16)]) -> Self {
        Self { name, members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        self.members.iter().map(|(label, _)| *label)
    }

    /// Checks that labels and codes are both unique.
    pub fn validate(&self) -> Result<()> {
        let mut codes = HashSet::new();
        let mut labels = HashSet::new();
        for &(label, code) in self.members {
            if !codes.insert(code) {
                return Err(QuirkError::DuplicateEnumCode {
                    set: self.name,
                    code,
                });
            }
            if !labels.insert(label) {
                return Err(QuirkError::DuplicateEnumLabel {
                    set: self.name,
                    label,
                });
            }
        }
        Ok(())
    }

    /// Code to label, for display.
    pub fn label(&self, code: u16) -> Result<&'static str> {
        self.members
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(label, _)| *label)
            .ok_or(QuirkError::UnknownEnumValue {
                set: self.name,
                code,
            })
    }

    /// Label to code, for command issuance.
    pub fn code(&self, label: &str) -> Result<u16> {
        self.members
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, code)| *code)
            .ok_or_else(|| QuirkError::UnknownEnumLabel {
                set: self.name,
                label: label.to_string(),
            })
    }
}

/// Implemented by typed enums generated with [`zcl_enum!`].
pub trait ZclEnum: Copy + Into<u16> + TryFrom<u16, Error = QuirkError> {
    const VALUE_SET: EnumValueSet;

    fn label(self) -> &'static str;
}

/// Creates a typed 16-bit enumeration together with its [`EnumValueSet`].
///
/// Every variant maps to a label and a wire code. Unknown codes are rejected
/// with [`QuirkError::UnknownEnumValue`].
#[macro_export]
macro_rules! zcl_enum {
    ($(#[$outer:meta])* $name:ident, $set_name:literal, $($(#[$inner:meta])* $var:ident => ($label:literal, $val:literal)),+ $(,)*) => (

        $(#[$outer])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(into = "u16", try_from = "u16")]
        pub enum $name {
            $(
                $(#[$inner])*
                $var,
            )*
        }

        impl TryFrom<u16> for $name {
            type Error = $crate::error::QuirkError;

            fn try_from(v: u16) -> ::core::result::Result<Self, Self::Error> {
                match v {
                    $( $val => Ok($name::$var),)*
                    _ => Err($crate::error::QuirkError::UnknownEnumValue {
                        set: $set_name,
                        code: v,
                    }),
                }
            }
        }

        impl From<$name> for u16 {
            fn from(v: $name) -> Self {
                match v {
                    $( $name::$var => $val, )*
                }
            }
        }

        impl $crate::zcl::ZclEnum for $name {
            const VALUE_SET: $crate::zcl::EnumValueSet =
                $crate::zcl::EnumValueSet::new($set_name, &[$( ($label, $val), )*]);

            fn label(self) -> &'static str {
                match self {
                    $( $name::$var => $label, )*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::zcl::ZclEnum::label(*self))
            }
        }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::zcl_enum!(
        Color, "Color",
        Red => ("Red", 0x0000),
        Green => ("Green", 0x0001),
        DeepBlue => ("Deep_Blue", 0x0010),
    );

    #[test]
    fn test_typed_enum_round_trip() {
        assert_eq!(Color::try_from(0x0010u16).unwrap(), Color::DeepBlue);
        assert_eq!(u16::from(Color::Green), 1);
        assert_eq!(Color::DeepBlue.label(), "Deep_Blue");
        assert_eq!(Color::Red.to_string(), "Red");
        assert_eq!(
            Color::try_from(7u16),
            Err(QuirkError::UnknownEnumValue {
                set: "Color",
                code: 7
            })
        );
    }

    #[test]
    fn test_value_set_lookups() {
        let set = Color::VALUE_SET;
        assert!(set.validate().is_ok());
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        assert!(EnumValueSet::new("Empty", &[]).is_empty());
        assert_eq!(set.label(0x0001).unwrap(), "Green");
        assert_eq!(set.code("Deep_Blue").unwrap(), 0x0010);
        assert!(matches!(
            set.code("Purple"),
            Err(QuirkError::UnknownEnumLabel { .. })
        ));
        assert!(set.label(0x0002).is_err());
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let codes = EnumValueSet::new("Dup", &[("A", 1), ("B", 1)]);
        assert_eq!(
            codes.validate(),
            Err(QuirkError::DuplicateEnumCode { set: "Dup", code: 1 })
        );
        let labels = EnumValueSet::new("Dup", &[("A", 1), ("A", 2)]);
        assert_eq!(
            labels.validate(),
            Err(QuirkError::DuplicateEnumLabel {
                set: "Dup",
                label: "A"
            })
        );
    }

    #[test]
    fn test_serde_uses_wire_code() {
        assert_eq!(serde_json::to_string(&Color::DeepBlue).unwrap(), "16");
        assert_eq!(serde_json::from_str::<Color>("1").unwrap(), Color::Green);
        assert!(serde_json::from_str::<Color>("2").is_err());
    }
}
