use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Serialize, Serializer};

use crate::error::QuirkError;

bitflags! {
    /// Access rights of an attribute, written in the compact form `r`, `r*w`, `rwp`.
    ///
    /// A `*` marks the following write flag as optional for the device; such an
    /// attribute still accepts writes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessMode: u8 {
        const READ = 0x01;
        const WRITE = 0x02;
        const WRITE_OPTIONAL = 0x04;
        const REPORT = 0x08;
    }
}

impl AccessMode {
    pub const R: Self = Self::READ;
    pub const RW: Self = Self::READ.union(Self::WRITE);
    pub const R_OPT_W: Self = Self::RW.union(Self::WRITE_OPTIONAL);
    pub const RWP: Self = Self::RW.union(Self::REPORT);

    pub fn is_readable(self) -> bool {
        self.contains(Self::READ)
    }

    pub fn is_writable(self) -> bool {
        self.contains(Self::WRITE)
    }

    pub fn is_reportable(self) -> bool {
        self.contains(Self::REPORT)
    }
}

impl FromStr for AccessMode {
    type Err = QuirkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || QuirkError::InvalidAccessMode(s.to_string());
        let mut mode = AccessMode::empty();
        let mut optional = false;
        for c in s.chars() {
            let flag = match c {
                'r' => AccessMode::READ,
                'w' => AccessMode::WRITE,
                'p' => AccessMode::REPORT,
                '*' => {
                    if optional {
                        return Err(invalid());
                    }
                    optional = true;
                    continue;
                }
                _ => return Err(invalid()),
            };
            if mode.contains(flag) || (optional && flag != AccessMode::WRITE) {
                return Err(invalid());
            }
            if optional {
                mode |= AccessMode::WRITE_OPTIONAL;
                optional = false;
            }
            mode |= flag;
        }
        if mode.is_empty() || optional {
            return Err(invalid());
        }
        Ok(mode)
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_readable() {
            f.write_str("r")?;
        }
        if self.contains(AccessMode::WRITE_OPTIONAL) {
            f.write_str("*")?;
        }
        if self.is_writable() {
            f.write_str("w")?;
        }
        if self.is_reportable() {
            f.write_str("p")?;
        }
        Ok(())
    }
}

impl Serialize for AccessMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
