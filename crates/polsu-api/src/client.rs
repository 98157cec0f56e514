//! Asynchronous Polsu client implementation.

use crate::maps::BedwarsMapName;
use crate::models::{
    AccountInformation, ApiKey, BedwarsDreams, BedwarsMap, BedwarsMaps, MinecraftApi,
    MinecraftApiService, MinecraftServer, PolsuResponse, ServiceStats, ServiceStatus, Session,
};
use crate::Result;
use seraph_core::client::{ServiceClientBuilder, Transport};
use seraph_core::envelope::{self, INVALID_UUID_MESSAGE};
use seraph_core::uuid::is_undashed_uuid;
use seraph_core::{ClientOptions, RemoteService};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

const SERVICE: RemoteService = RemoteService::Polsu;

/// Builder for [`PolsuClient`].
#[derive(Debug, Clone)]
pub struct PolsuClientBuilder {
    inner: ServiceClientBuilder,
}

impl PolsuClientBuilder {
    /// Create a builder from client options.
    pub fn new(options: ClientOptions) -> Result<Self> {
        Ok(Self {
            inner: ServiceClientBuilder::new(SERVICE, options)?,
        })
    }

    /// Override the base URL (defaults to `https://api.polsu.xyz/`).
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Result<Self> {
        self.inner = self.inner.with_base_url(base_url)?;
        Ok(self)
    }

    /// Build the client.
    pub fn build(self) -> Result<PolsuClient> {
        let inner = self.inner.build()?;
        Ok(PolsuClient::with_transport(Arc::new(inner)))
    }
}

/// Asynchronous Polsu client.
///
/// Polsu bodies carry no `code`; every response gets the HTTP status
/// written into [`PolsuResponse`]'s `code`.
#[derive(Clone)]
pub struct PolsuClient {
    transport: Arc<dyn Transport>,
}

impl PolsuClient {
    /// Construct a client for the production API.
    pub fn new(options: ClientOptions) -> Result<Self> {
        PolsuClientBuilder::new(options)?.build()
    }

    /// Construct a client over an existing transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Availability of the Polsu services.
    pub async fn get_service_status(&self) -> PolsuResponse<ServiceStatus> {
        self.fetch("services/status", vec![]).await
    }

    /// Usage statistics of the Polsu services.
    pub async fn get_service_stats(&self) -> PolsuResponse<ServiceStats> {
        self.fetch("services/stats", vec![]).await
    }

    /// Information about the configured API key.
    pub async fn get_key_information(&self) -> PolsuResponse<ApiKey> {
        self.fetch("api/key", vec![]).await
    }

    /// Polsu account linked to a Discord user id (snowflake).
    pub async fn get_account_information(
        &self,
        discord_id: &str,
    ) -> PolsuResponse<AccountInformation> {
        self.fetch("polsu/account", vec![("id", discord_id.to_string())])
            .await
    }

    /// Details of one Bedwars map.
    pub async fn get_bedwars_map(&self, map: BedwarsMapName) -> PolsuResponse<BedwarsMap> {
        self.fetch("polsu/bedwars/map", vec![("map", map.to_string())])
            .await
    }

    /// Names of every Bedwars map.
    pub async fn get_bedwars_maps(&self) -> PolsuResponse<BedwarsMaps> {
        self.fetch("polsu/bedwars/maps", vec![]).await
    }

    /// Current Bedwars session of a player by undashed UUID.
    pub async fn get_bedwars_session(&self, uuid: &str) -> PolsuResponse<Session> {
        if !is_undashed_uuid(uuid) {
            debug!(uuid, "rejecting malformed player UUID");
            return envelope::invalid_request(SERVICE, INVALID_UUID_MESSAGE, vec![]).into();
        }
        self.fetch("polsu/bedwars/sessions", vec![("uuid", uuid.to_string())])
            .await
    }

    /// Dream mode rotation history.
    pub async fn get_bedwars_dreams(&self) -> PolsuResponse<BedwarsDreams> {
        self.fetch("polsu/bedwars/dream", vec![]).await
    }

    /// Status of an upstream Minecraft API.
    pub async fn get_minecraft_api_status(
        &self,
        service: MinecraftApiService,
    ) -> PolsuResponse<MinecraftApi> {
        self.fetch("polsu/minecraft/api", vec![("name", service.to_string())])
            .await
    }

    /// Status of a Minecraft server by address.
    pub async fn get_minecraft_server_status(&self, ip: &str) -> PolsuResponse<MinecraftServer> {
        self.fetch("polsu/minecraft/server", vec![("ip", ip.to_string())])
            .await
    }

    async fn fetch<T>(&self, path: &str, query: Vec<(&'static str, String)>) -> PolsuResponse<T>
    where
        T: DeserializeOwned,
    {
        envelope::resolve(SERVICE, self.transport.get(path, query).await)
    }
}
