//! Undashed player UUID validation.
//!
//! Both services identify players by a 32-character lowercase hexadecimal
//! UUID without hyphens. Requests carrying anything else are rejected locally.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Length of an undashed UUID.
pub const UNDASHED_UUID_LEN: usize = 32;

/// Returns true iff `input` is exactly 32 lowercase hexadecimal characters.
#[must_use]
pub fn is_undashed_uuid(input: &str) -> bool {
    input.len() == UNDASHED_UUID_LEN
        && input
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// A validated undashed player UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerUuid(String);

impl PlayerUuid {
    /// Parses an undashed UUID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUuid`] if the string is not 32 lowercase hex characters.
    pub fn parse(input: &str) -> Result<Self> {
        if is_undashed_uuid(input) {
            Ok(Self(input.to_string()))
        } else {
            Err(Error::InvalidUuid(input.to_string()))
        }
    }

    /// Returns the UUID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Uuid> for PlayerUuid {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.simple().to_string())
    }
}

impl TryFrom<String> for PlayerUuid {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        if is_undashed_uuid(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidUuid(value))
        }
    }
}

impl From<PlayerUuid> for String {
    fn from(uuid: PlayerUuid) -> Self {
        uuid.0
    }
}

impl FromStr for PlayerUuid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PlayerUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PlayerUuid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_UUID: &str = "b9aa26ec20b447a59a4ad10cc08a46fe";

    #[test]
    fn test_accepts_undashed_lowercase() {
        assert!(is_undashed_uuid(VALID_UUID));
        assert!(is_undashed_uuid("00000000000000000000000000000000"));
    }

    #[test]
    fn test_rejects_malformed() {
        for input in [
            "",
            "not-a-valid-uuid",
            "b9aa26ec-20b4-47a5-9a4a-d10cc08a46fe",
            "B9AA26EC20B447A59A4AD10CC08A46FE",
            "b9aa26ec20b447a59a4ad10cc08a46f",
            "b9aa26ec20b447a59a4ad10cc08a46fe0",
            "g9aa26ec20b447a59a4ad10cc08a46fe",
            " b9aa26ec20b447a59a4ad10cc08a46f",
        ] {
            assert!(!is_undashed_uuid(input), "accepted {input:?}");
        }
    }

    #[test]
    fn test_rejects_multibyte_of_right_length() {
        // 16 two-byte characters make 32 bytes.
        assert!(!is_undashed_uuid(&"é".repeat(16)));
    }

    #[test]
    fn test_parse() {
        let uuid = PlayerUuid::parse(VALID_UUID).unwrap();
        assert_eq!(uuid.as_str(), VALID_UUID);
        assert_eq!(uuid.to_string(), VALID_UUID);

        let err = PlayerUuid::parse("nope").unwrap_err();
        assert!(matches!(err, Error::InvalidUuid(_)));
    }

    #[test]
    fn test_from_dashed_uuid() {
        let uuid = Uuid::parse_str("B9AA26EC-20B4-47A5-9A4A-D10CC08A46FE").unwrap();
        let player: PlayerUuid = uuid.into();
        assert_eq!(player.as_str(), VALID_UUID);
    }

    #[test]
    fn test_from_random_uuid_is_valid() {
        let player = PlayerUuid::from(Uuid::new_v4());
        assert!(is_undashed_uuid(player.as_str()));
    }

    #[test]
    fn test_serde() {
        let quoted = format!("\"{VALID_UUID}\"");
        let uuid: PlayerUuid = serde_json::from_str(&quoted).unwrap();
        assert_eq!(serde_json::to_string(&uuid).unwrap(), quoted);

        let invalid = serde_json::from_str::<PlayerUuid>("\"not-a-valid-uuid\"");
        assert!(invalid.is_err());
    }
}
