//! Polsu API client and data models.
//!
//! Provides typed response envelopes and an asynchronous client for the
//! Polsu Minecraft statistics API: service health, key and account
//! information, Bedwars maps, sessions and dreams, and Minecraft API and
//! server status.

#![deny(missing_docs)]

pub mod client;
pub mod maps;
pub mod models;

pub use client::{PolsuClient, PolsuClientBuilder};
pub use maps::{BedwarsMapName, KNOWN_BEDWARS_MAPS};
pub use models::{
    AccountInformation, ApiKey, BedwarsDreams, BedwarsMap, BedwarsMaps, ErrorResponse, MinecraftApi,
    MinecraftApiService, MinecraftServer, PolsuResponse, PolsuSuccess, ServiceStats, ServiceStatus,
    Session,
};

/// Convenient result alias that reuses the shared error type.
pub type Result<T> = seraph_core::Result<T>;
