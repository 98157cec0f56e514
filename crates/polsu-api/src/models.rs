//! Polsu response envelopes and payload models.
//!
//! Polsu wraps payloads in `data` and omits `code` from the body; the client
//! fills `code` in from the HTTP status before decoding.

use seraph_core::envelope::{success_flag, DefaultEnvelope, ErrorExtra, FailureBody};
use seraph_core::{Error, Result};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Result of a Polsu call: the remote body or a synthesized failure.
#[derive(Debug, Clone, PartialEq)]
pub enum PolsuResponse<T> {
    /// `success: true` body
    Success(PolsuSuccess<T>),
    /// `success: false` body
    Failure(ErrorResponse),
}

/// Successful Polsu body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolsuSuccess<T> {
    /// HTTP status of the response
    pub code: u16,
    /// Endpoint payload
    pub data: T,
}

/// Failed Polsu body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status of the response
    pub code: u16,
    /// Top-level cause
    #[serde(default)]
    pub cause: String,
    /// Detail entries, present on library-synthesized failures
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<ErrorExtra>,
    /// Documentation URL, present on library-synthesized failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    /// Creation time in milliseconds, present on library-synthesized failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
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
            cause: body.cause,
            extra: body.extra,
            documentation: Some(body.documentation),
            timestamp: Some(body.timestamp),
        }
    }
}

impl<T> From<FailureBody> for PolsuResponse<T> {
    fn from(body: FailureBody) -> Self {
        Self::Failure(body.into())
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for PolsuResponse<T> {
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

impl<T> DefaultEnvelope for PolsuResponse<T> {
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
            Self::Success(_) => None,
            Self::Failure(failure) => failure.timestamp,
        }
    }
}

impl<T> PolsuResponse<T> {
    /// The payload of a successful body.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(success) => Some(&success.data),
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

    /// Convert into a standard [`Result`](std::result::Result).
    ///
    /// # Errors
    ///
    /// Returns the failure body when `success` was false.
    pub fn into_result(self) -> std::result::Result<PolsuSuccess<T>, ErrorResponse> {
        match self {
            Self::Success(success) => Ok(success),
            Self::Failure(failure) => Err(failure),
        }
    }
}

/// Availability of the Polsu services (`GET /services/status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// Public API is up
    pub api: bool,
    /// Discord bot is up
    pub polsu: bool,
    /// Croustillant bot is up
    pub croustillant: bool,
    /// Launch time in seconds
    pub launch: i64,
}

/// Usage statistics (`GET /services/stats`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStats {
    /// Discord bot statistics
    pub polsu: BotStats,
    /// Public API statistics
    pub api: ApiStats,
}

/// Discord bot statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotStats {
    /// Discord servers
    pub servers: u64,
    /// Discord channels
    pub channels: u64,
    /// Discord users
    pub users: u64,
    /// Polsu accounts
    pub accounts: u64,
    /// Commands run
    pub commands: u64,
    /// Linked Minecraft accounts
    pub linked: u64,
    /// Tracked players
    pub players: u64,
    /// Tracked sessions
    pub sessions: u64,
}

/// Public API statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStats {
    /// API accounts
    pub accounts: u64,
    /// Available endpoints
    pub endpoints: u64,
}

/// Information about the configured key (`GET /api/key`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    /// The key
    pub key: String,
    /// Owner's Discord account
    pub discord: DiscordAccount,
    /// Requests made with this key
    pub total_requests: u64,
}

/// Discord account reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordAccount {
    /// Discord snowflake
    pub id: String,
}

/// A Polsu account (`GET /polsu/account`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInformation {
    /// Account badges
    pub badges: Badges,
    /// Account activity
    pub account: AccountActivity,
    /// Linked Minecraft account
    pub minecraft: LinkedMinecraft,
}

/// Account badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Badges {
    /// Blacklisted from Polsu
    pub blacklisted: bool,
    /// Premium subscriber
    pub premium: bool,
    /// Designer
    pub designer: bool,
    /// VIP
    pub vip: bool,
    /// Staff
    pub staff: bool,
    /// Developer
    pub developer: bool,
    /// Owner
    pub owner: bool,
}

/// Account activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountActivity {
    /// Creation time
    pub created: i64,
    /// Commands run
    pub commands: u64,
}

/// Minecraft account linked to a Polsu account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedMinecraft {
    /// Undashed player UUID
    pub uuid: String,
    /// Lookups of this player
    pub queries: u64,
    /// Linked since
    pub since: i64,
}

/// Details of one Bedwars map (`GET /polsu/bedwars/map`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedwarsMap {
    /// Map name
    pub name: String,
    /// Game mode
    pub mode: String,
    /// Playstyle
    pub playstyle: String,
    /// Generator speed
    pub gen: String,
    /// Description
    pub description: String,
    /// When the map was added
    pub added: i64,
    /// Builders
    pub builders: String,
    /// Recently added
    pub new: bool,
    /// Festival the map belongs to
    pub festival: String,
    /// Map this is a reskin of
    pub reskin_of: String,
    /// Minimum build height
    pub min_build: i64,
    /// Maximum build height
    pub max_build: i64,
    /// Build radius
    pub build_radius: i64,
    /// Preview image URL
    pub preview: String,
    /// Currently in rotation
    pub in_rotation: bool,
}

/// Map list (`GET /polsu/bedwars/maps`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BedwarsMaps {
    /// Map names
    pub maps: Vec<String>,
}

/// A tracked Bedwars session (`GET /polsu/bedwars/sessions`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Player UUID
    pub uuid: String,
    /// Session number
    pub session: u64,
    /// Start time
    pub started: i64,
    /// Stars gained
    pub stars: f64,
    /// Experience gained
    pub experience: f64,
    /// Games played per mode
    pub games: SessionGames,
    /// Resources collected
    pub resources: SessionResources,
    /// Items purchased
    pub purchased: SessionPurchases,
    /// Combat statistics
    pub stats: SessionStats,
    /// Last check of the player
    pub last_checked: LastChecked,
    /// Player identity
    pub player: SessionPlayer,
    /// Session was just created
    pub new: bool,
}

/// Games per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionGames {
    /// All games
    pub total: u64,
    /// Solo games
    pub solos: u64,
    /// Doubles games
    pub doubles: u64,
    /// 3v3v3v3 games
    pub threes: u64,
    /// 4v4v4v4 games
    pub fours: u64,
    /// 4v4 games
    pub fvf: u64,
}

/// Resources collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResources {
    /// Iron
    pub iron: u64,
    /// Gold
    pub gold: u64,
    /// Emeralds
    pub emeralds: u64,
    /// Diamonds
    pub diamonds: u64,
}

/// Items purchased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPurchases {
    /// Permanent items
    pub permanent: u64,
    /// Consumable items
    pub nonpermanent: u64,
}

/// Combat statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Wins
    pub wins: u64,
    /// Losses
    pub losses: u64,
    /// Kills
    pub kills: u64,
    /// Deaths
    pub deaths: u64,
    /// Final kills
    pub fkills: u64,
    /// Final deaths
    pub fdeaths: u64,
    /// Beds broken
    pub bbroken: u64,
    /// Beds lost
    pub blost: u64,
}

/// Last check of a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LastChecked {
    /// Check time
    pub timestamp: i64,
    /// Experience at check time
    pub xp: f64,
}

/// Player identity in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPlayer {
    /// Player UUID
    pub uuid: String,
    /// Current username
    pub username: String,
    /// Last username change
    #[serde(default)]
    pub last_changed: Option<i64>,
}

/// Dream mode rotation history (`GET /polsu/bedwars/dream`), keyed by year
/// then by upper-case month name as sent by Polsu.
pub type BedwarsDreams = BTreeMap<String, BTreeMap<String, Vec<DreamRotation>>>;

/// One dream mode rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DreamRotation {
    /// Rotation date
    pub date: i64,
    /// Dream mode
    pub mode: String,
}

/// Status of an upstream Minecraft API (`GET /polsu/minecraft/api`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinecraftApi {
    /// Checked URL
    pub url: String,
    /// Ping samples
    pub ping: Vec<f64>,
    /// Sample times
    pub time: Vec<i64>,
}

/// Status of a Minecraft server (`GET /polsu/minecraft/server`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinecraftServer {
    /// Server address
    pub ip: String,
    /// Ping samples
    pub ping: Vec<f64>,
    /// Player count samples
    pub players: Vec<u64>,
    /// Sample times
    pub time: Vec<i64>,
}

/// Upstream APIs whose status Polsu monitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinecraftApiService {
    /// Hypixel public API
    Hypixel,
    /// Mojang API
    Mojang,
    /// Polsu's own API
    Polsu,
}

impl MinecraftApiService {
    /// Returns the name sent in the `name` query parameter.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Hypixel => "hypixel",
            Self::Mojang => "mojang",
            Self::Polsu => "polsu",
        }
    }
}

impl FromStr for MinecraftApiService {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hypixel" => Ok(Self::Hypixel),
            "mojang" => Ok(Self::Mojang),
            "polsu" => Ok(Self::Polsu),
            _ => Err(Error::InvalidRequest(format!("Unknown Minecraft API: {s}"))),
        }
    }
}

impl fmt::Display for MinecraftApiService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
