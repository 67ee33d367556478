//! 16-byte globally unique identifiers (accounts, age instances, products).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// A 16-byte GUID rendered in the usual 8-4-4-4-12 hex form.
///
/// Serialized as that string so it reads naturally in config files.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Guid([u8; 16]);

impl Guid {
    pub const NULL: Self = Self([0u8; 16]);

    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn is_null(&self) -> bool {
        self.0 == [0u8; 16]
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guid({self})")
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if matches!(i, 4 | 6 | 8 | 10) {
                write!(f, "-")?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl FromStr for Guid {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex: String = s.chars().filter(|c| *c != '-').collect();
        if hex.len() != 32 || !hex.is_ascii() {
            return Err(TypesError::InvalidGuid(s.to_string()));
        }
        let mut bytes = [0u8; 16];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|_| TypesError::InvalidGuid(s.to_string()))?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for Guid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Guid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_dashed_hex() {
        let mut bytes = [0u8; 16];
        bytes[0] = 0xea;
        bytes[15] = 0x01;
        let guid = Guid::new(bytes);
        assert_eq!(guid.to_string(), "ea000000-0000-0000-0000-000000000001");
    }

    #[test]
    fn parses_dashed_and_plain_forms() {
        let a: Guid = "ea489821-6c35-4bd0-9dae-bb17c585e680".parse().unwrap();
        let b: Guid = "ea4898216c354bd09daebb17c585e680".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "ea489821-6c35-4bd0-9dae-bb17c585e680");
    }

    #[test]
    fn rejects_bad_input() {
        assert!("not-a-guid".parse::<Guid>().is_err());
        assert!("zz489821-6c35-4bd0-9dae-bb17c585e680".parse::<Guid>().is_err());
    }

    #[test]
    fn null_guid() {
        assert!(Guid::NULL.is_null());
        assert!(Guid::default().is_null());
    }
}
