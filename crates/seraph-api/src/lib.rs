//! Seraph API client and data models.
//!
//! Provides typed response envelopes and an asynchronous client for the
//! Seraph player reputation API (key checks, blacklist, Lunar Client data
//! and the player finder).

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{SeraphClient, SeraphClientBuilder};
pub use models::{
    ApiKeyInfo, Blacklist, BlacklistInfo, ErrorResponse, KeyDetails, LunarCosmetic, LunarInfo,
    LunarPlayer, PlayerFinder, SeraphResponse, SeraphSuccess,
};

/// Convenient result alias that reuses the shared error type.
pub type Result<T> = seraph_core::Result<T>;
