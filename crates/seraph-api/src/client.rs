//! Asynchronous Seraph client implementation.

use crate::models::{ApiKeyInfo, BlacklistInfo, LunarInfo, PlayerFinder, SeraphResponse};
use crate::Result;
use seraph_core::client::{ServiceClientBuilder, Transport};
use seraph_core::envelope::{self, INVALID_UUID_MESSAGE};
use seraph_core::uuid::is_undashed_uuid;
use seraph_core::{ClientOptions, RemoteService};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

const SERVICE: RemoteService = RemoteService::Seraph;

/// Builder for [`SeraphClient`].
#[derive(Debug, Clone)]
pub struct SeraphClientBuilder {
    inner: ServiceClientBuilder,
}

impl SeraphClientBuilder {
    /// Create a builder from client options.
    pub fn new(options: ClientOptions) -> Result<Self> {
        Ok(Self {
            inner: ServiceClientBuilder::new(SERVICE, options)?,
        })
    }

    /// Override the base URL (defaults to `https://api.seraph.si/`).
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Result<Self> {
        self.inner = self.inner.with_base_url(base_url)?;
        Ok(self)
    }

    /// Build the client.
    pub fn build(self) -> Result<SeraphClient> {
        let inner = self.inner.build()?;
        Ok(SeraphClient::with_transport(Arc::new(inner)))
    }
}

/// Asynchronous Seraph client.
///
/// Every endpoint method resolves to a [`SeraphResponse`]; failures are
/// reported through the envelope rather than as errors.
#[derive(Clone)]
pub struct SeraphClient {
    transport: Arc<dyn Transport>,
}

impl SeraphClient {
    /// Construct a client for the production API.
    pub fn new(options: ClientOptions) -> Result<Self> {
        SeraphClientBuilder::new(options)?.build()
    }

    /// Construct a client over an existing transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Check whether the configured API key is valid.
    pub async fn is_key_valid(&self) -> SeraphResponse<ApiKeyInfo> {
        self.fetch("key", vec![]).await
    }

    /// Fetch the blacklist record of a player by undashed UUID.
    pub async fn get_player_blacklist(&self, uuid: &str) -> SeraphResponse<BlacklistInfo> {
        if !is_undashed_uuid(uuid) {
            return invalid_uuid(uuid);
        }
        let query = vec![("uuid", uuid.to_string())];
        self.fetch("blacklist", query).await
    }

    /// Fetch Lunar Client data of a player by undashed UUID.
    ///
    /// This endpoint does not require a valid key.
    pub async fn get_player_lunar(&self, uuid: &str) -> SeraphResponse<LunarInfo> {
        if !is_undashed_uuid(uuid) {
            return invalid_uuid(uuid);
        }
        let path = format!("lunar/{uuid}");
        self.fetch(&path, vec![]).await
    }

    /// Fetch player finder results.
    pub async fn get_player_finder(&self) -> SeraphResponse<PlayerFinder> {
        self.fetch("playerfinder", vec![]).await
    }

    async fn fetch<T>(&self, path: &str, query: Vec<(&'static str, String)>) -> SeraphResponse<T>
    where
        T: DeserializeOwned,
    {
        envelope::resolve(SERVICE, self.transport.get(path, query).await)
    }
}

fn invalid_uuid<T>(uuid: &str) -> SeraphResponse<T> {
    debug!(uuid, "rejecting malformed player UUID");
    envelope::invalid_request(SERVICE, INVALID_UUID_MESSAGE, vec![]).into()
}
