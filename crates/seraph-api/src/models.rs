//! Seraph response envelopes and payload models.
//!
//! Seraph puts the payload keys (`key`, `data`, `player`) next to the
//! envelope fields at the top level of the body:
//!
//! ```json
//! {"success": true, "code": 200, "msTime": 1690000000000, "key": {"valid": true}}
//! ```

use seraph_core::envelope::{success_flag, DefaultEnvelope, ErrorExtra, FailureBody};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of a Seraph call: the remote body or a synthesized failure.
#[derive(Debug, Clone, PartialEq)]
pub enum SeraphResponse<T> {
    /// `success: true` body
    Success(SeraphSuccess<T>),
    /// `success: false` body
    Failure(ErrorResponse),
}

/// Successful Seraph body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeraphSuccess<T> {
    /// Status code reported by Seraph
    pub code: u16,
    /// Server time in milliseconds
    #[serde(rename = "msTime", default, skip_serializing_if = "Option::is_none")]
    pub ms_time: Option<i64>,
    /// Endpoint-specific payload
    #[serde(flatten)]
    pub payload: T,
}

/// Failed Seraph body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Status code
    pub code: u16,
    /// Server or library time in milliseconds
    #[serde(
        rename = "msTime",
        alias = "timestamp",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ms_time: Option<i64>,
    /// Top-level cause
    #[serde(default)]
    pub cause: String,
    /// Detail entries
    #[serde(default)]
    pub extra: Vec<ErrorExtra>,
    /// Documentation URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    /// Key status, sent when a key check fails (e.g. a security alert)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<KeyDetails>,
}

impl ErrorResponse {
    /// True if the library gave up waiting for the response.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.cause.starts_with("I have timed out.")
    }
}

impl From<FailureBody> for ErrorResponse {
    fn from(body: FailureBody) -> Self {
        Self {
            code: body.code,
            ms_time: Some(body.timestamp),
            cause: body.cause,
            extra: body.extra,
            documentation: Some(body.documentation),
            key: None,
        }
    }
}

impl<T> From<FailureBody> for SeraphResponse<T> {
    fn from(body: FailureBody) -> Self {
        Self::Failure(body.into())
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for SeraphResponse<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match success_flag(&value) {
            Some(true) => serde_json::from_value(value)
                .map(Self::Success)
                .map_err(de::Error::custom),
            Some(false) => serde_json::from_value(value)
                .map(Self::Failure)
                .map_err(de::Error::custom),
            None => Err(de::Error::custom("missing boolean `success` flag")),
        }
    }
}

impl<T> DefaultEnvelope for SeraphResponse<T> {
    fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    fn code(&self) -> u16 {
        match self {
            Self::Success(success) => success.code,
            Self::Failure(failure) => failure.code,
        }
    }

    fn timestamp_ms(&self) -> Option<i64> {
        match self {
            Self::Success(success) => success.ms_time,
            Self::Failure(failure) => failure.ms_time,
        }
    }
}

impl<T> SeraphResponse<T> {
    /// The success body, if any.
    #[must_use]
    pub const fn success(&self) -> Option<&SeraphSuccess<T>> {
        match self {
            Self::Success(success) => Some(success),
            Self::Failure(_) => None,
        }
    }

    /// The failure body, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }

    /// The payload of a successful body.
    #[must_use]
    pub const fn payload(&self) -> Option<&T> {
        match self {
            Self::Success(success) => Some(&success.payload),
            Self::Failure(_) => None,
        }
    }

    /// Convert into a standard [`Result`](std::result::Result).
    ///
    /// # Errors
    ///
    /// Returns the failure body when `success` was false.
    pub fn into_result(self) -> std::result::Result<SeraphSuccess<T>, ErrorResponse> {
        match self {
            Self::Success(success) => Ok(success),
            Self::Failure(failure) => Err(failure),
        }
    }
}

/// Key status returned by `GET /key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDetails {
    /// The key itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Whether the key is usable
    pub valid: bool,
    /// Key status code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Whether the key has developer access
    #[serde(rename = "isDev", default, skip_serializing_if = "Option::is_none")]
    pub is_dev: Option<bool>,
    /// Why the key was rejected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Payload of `GET /key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyInfo {
    /// Key status
    pub key: KeyDetails,
}

/// Payload of `GET /blacklist`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlacklistInfo {
    /// Blacklist record
    pub data: Blacklist,
}

/// Reputation record for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blacklist {
    /// Undashed player UUID
    pub uuid: String,
    /// Last known username
    pub username: String,
    /// Blacklist tag
    pub blacklist: BlacklistTag,
    /// Safelist tag
    pub safelist: SafelistTag,
    /// Custom tag text
    #[serde(rename = "customTag", default)]
    pub custom_tag: Option<String>,
    /// Bot detection
    pub bot: BotTag,
    /// Encounter statistics
    pub statistics: Statistics,
    /// Migrated from another list
    pub migrated: Tag,
    /// Annoy list tag
    pub annoylist: Tag,
}

/// Blacklist status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistTag {
    /// Whether the player is blacklisted
    pub tagged: bool,
    /// When the tag was added (ms)
    pub timestamp: i64,
    /// Reason text
    pub reason: String,
    /// Report category
    pub report_type: String,
}

/// Safelist status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafelistTag {
    /// Whether the player is safelisted
    pub tagged: bool,
    /// Times the player was killed
    #[serde(rename = "timesKilled")]
    pub times_killed: u64,
    /// Personal safelist entry
    pub personal: bool,
    /// Safelist security level
    pub security_level: i64,
}

/// Bot detection flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotTag {
    /// Tagged as a bot
    pub tagged: bool,
    /// Unidentified bot
    pub unidentified: bool,
    /// Flagged by the `kay` detector
    pub kay: bool,
}

/// Encounter statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of encounters
    pub encounters: u64,
    /// Computed threat level
    pub threat_level: f64,
}

/// Simple boolean tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Whether the tag applies
    pub tagged: bool,
}

/// Payload of `GET /lunar/{uuid}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LunarInfo {
    /// Lunar Client player record
    pub player: LunarPlayer,
}

/// Lunar Client player record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarPlayer {
    /// Player UUID
    pub uuid: String,
    /// Currently online in Lunar Client
    pub online: bool,
    /// Status text
    pub status: String,
    /// Cosmetics
    pub cosmetics: LunarCosmetics,
    /// Lunar+ subscription
    pub lunar_plus: LunarPlus,
    /// Rank flags
    pub rank: LunarRank,
    /// Undocumented flags
    pub unknown: LunarUnknown,
}

/// Owned and cached cosmetics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarCosmetics {
    /// Number of cosmetics
    pub count: u64,
    /// Currently equipped
    pub active_cosmetics: Vec<LunarCosmetic>,
    /// Cached on the client
    pub cached_cosmetics: Vec<LunarCosmetic>,
}

/// A single Lunar Client cosmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunarCosmetic {
    /// Cosmetic id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Preview URL
    pub url: String,
}

/// Lunar+ subscription details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarPlus {
    /// Has Lunar+
    pub premium: bool,
    /// Cloth cloak enabled
    pub cloth_cloak: bool,
    /// Lunar+ colour as an integer RGB
    pub plus_colour: i64,
}

/// Lunar rank flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarRank {
    /// Undocumented flag B
    pub unknown_boolean_b: bool,
    /// Undocumented flag C
    pub unknown_boolean_c: bool,
}

/// Undocumented Lunar flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarUnknown {
    /// Undocumented flag A
    pub unknown_boolean_a: bool,
    /// Undocumented flag B
    pub unknown_boolean_b: bool,
    /// Undocumented flag C
    pub unknown_boolean_c: bool,
}

/// Payload of `GET /playerfinder`.
///
/// The shape of `data` is not fixed by Seraph, so it is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerFinder {
    /// Player finder results
    #[serde(default)]
    pub data: Value,
}
