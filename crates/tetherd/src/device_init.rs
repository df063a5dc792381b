//! Device init resolution: first-launch server identity and branding.
//!
//! On first launch the agent may not yet know which server manages it. The
//! identity comes from one of two places: the conductor (an explicitly
//! supplied host and organization) or a short relay code embedded in the
//! executable's own file name, exchanged at a well-known discovery endpoint.
//! Either way the resolved identity is persisted and the organization's
//! branding is fetched and cached for the rest of the process lifetime.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::warn;

use tether_common::agent_config::{AgentConfig, ConfigStore};
use tether_common::branding::BrandingInfo;
use tether_common::constants::{DEVICE_INIT_URL, RELAY_CODE_LENGTH};

use crate::conductor::Conductor;

/// Failure kinds absorbed by [`DeviceInitService::resolve_init`].
#[derive(Debug, Error)]
enum ResolveError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("branding endpoint returned {0}")]
    BrandingStatus(reqwest::StatusCode),

    #[error("could not inspect executable path: {0}")]
    ExecutablePath(#[from] std::io::Error),

    #[error("executable path has no file name")]
    ExecutableName,

    #[error("config store: {0}")]
    ConfigStore(anyhow::Error),
}

type ResolveResult<T> = Result<T, ResolveError>;

/// Server identity returned by the discovery endpoint for a relay code.
///
/// Field names are matched case-insensitively for the common spellings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DeviceInitParams {
    #[serde(default, alias = "host")]
    host: String,

    #[serde(default, alias = "organizationId", alias = "organization_id")]
    organization_id: String,
}

/// Resolves the agent's managing server and organization branding.
///
/// Resolution runs at most once per process: after a successful fetch the
/// branding is cached and later calls return immediately. Failures are
/// logged and swallowed; the agent simply runs unbranded.
pub struct DeviceInitService {
    conductor: Arc<Conductor>,
    config_store: ConfigStore,
    client: reqwest::Client,
    device_init_url: String,
    branding: Mutex<Option<BrandingInfo>>,
}

impl DeviceInitService {
    /// Create a service using the well-known discovery endpoint
    pub fn new(conductor: Arc<Conductor>, config_store: ConfigStore) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tether-agent/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            conductor,
            config_store,
            client,
            device_init_url: DEVICE_INIT_URL.to_string(),
            branding: Mutex::new(None),
        }
    }

    /// Point discovery at a different endpoint (self-hosted servers, tests)
    pub fn with_device_init_url(mut self, url: impl Into<String>) -> Self {
        self.device_init_url = url.into();
        self
    }

    /// Currently cached branding, if any has been resolved or injected
    pub async fn branding_info(&self) -> Option<BrandingInfo> {
        self.branding.lock().await.clone()
    }

    /// Overwrite the cached branding.
    ///
    /// `None` is ignored, so an already-injected value is never cleared by a
    /// caller that has nothing better to offer.
    pub async fn set_branding_info(&self, branding: Option<BrandingInfo>) {
        if let Some(branding) = branding {
            *self.branding.lock().await = Some(branding);
        }
    }

    /// Resolve the managing server and fetch organization branding.
    ///
    /// No-op once branding is cached. Never returns an error: every failure
    /// kind is logged at WARN and the agent continues without branding.
    pub async fn resolve_init(&self) {
        if self.branding.lock().await.is_some() {
            return;
        }

        if let Err(error) = self.try_resolve().await {
            warn!(%error, "Failed to resolve init params.");
        }
    }

    async fn try_resolve(&self) -> ResolveResult<()> {
        let mut config = self
            .config_store
            .load()
            .map_err(ResolveError::ConfigStore)?;

        if self.conductor.has_server_identity() {
            return self.resolve_direct(&mut config).await;
        }

        let file_stem = executable_stem()?;
        self.resolve_from_relay_code(&mut config, &file_stem).await
    }

    /// Direct-host path: the conductor already knows the server.
    async fn resolve_direct(&self, config: &mut AgentConfig) -> ResolveResult<()> {
        config.host = self.conductor.host.clone();
        // TODO: confirm whether organization_id should persist the
        // conductor's organization id instead; existing deployments have the
        // host value on disk here, and the branding lookup below already uses
        // the real organization id.
        config.organization_id = self.conductor.host.clone();
        self.config_store
            .save(config)
            .map_err(ResolveError::ConfigStore)?;

        let branding = self
            .fetch_branding(&self.conductor.host, &self.conductor.organization_id)
            .await?;
        *self.branding.lock().await = branding;
        Ok(())
    }

    /// Relay-code path: scan the executable name for bracketed codes and
    /// exchange them at the discovery endpoint.
    ///
    /// Candidates are tried in scan order; a non-success status moves on to
    /// the next window, and the first successful exchange wins. A name with
    /// no usable candidate completes without resolving anything.
    async fn resolve_from_relay_code(
        &self,
        config: &mut AgentConfig,
        file_stem: &str,
    ) -> ResolveResult<()> {
        for relay_code in relay_code_candidates(file_stem) {
            let url = format!("{}/{}", self.device_init_url, relay_code);
            let response = self.client.get(&url).send().await?;
            if !response.status().is_success() {
                continue;
            }

            let params: DeviceInitParams = response.json().await?;
            config.host = params.host;
            config.organization_id = params.organization_id;
            self.config_store
                .save(config)
                .map_err(ResolveError::ConfigStore)?;

            let branding = self
                .fetch_branding(&config.host, &config.organization_id)
                .await?;
            *self.branding.lock().await = branding;
            return Ok(());
        }

        Ok(())
    }

    /// GET `{host}/api/branding/{organization_id}`.
    ///
    /// A literal `null` body parses as an empty result; storing that leaves
    /// the cache unset, so a later call may try again.
    async fn fetch_branding(
        &self,
        host: &str,
        organization_id: &str,
    ) -> ResolveResult<Option<BrandingInfo>> {
        let url = format!(
            "{}/api/branding/{}",
            host.trim_end_matches('/'),
            organization_id
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ResolveError::BrandingStatus(response.status()));
        }

        Ok(response.json().await?)
    }
}

/// File stem of the running executable (no directory, no extension).
fn executable_stem() -> ResolveResult<String> {
    let exe = std::env::current_exe()?;
    let stem = exe
        .file_stem()
        .ok_or(ResolveError::ExecutableName)?
        .to_string_lossy()
        .into_owned();
    Ok(stem)
}

/// Relay codes embedded in `name`, in scan order.
///
/// A candidate is any full window of `RELAY_CODE_LENGTH + 2` characters that
/// starts with `[` and ends with `]`; the code is the text between them.
/// Bracket presence is checked first so ordinary names skip the scan.
fn relay_code_candidates(name: &str) -> Vec<String> {
    if !(name.contains('[') && name.contains(']')) {
        return Vec::new();
    }

    let chars: Vec<char> = name.chars().collect();
    let window = RELAY_CODE_LENGTH + 2;
    if chars.len() < window {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    for i in 0..=chars.len() - window {
        let section = &chars[i..i + window];
        if section[0] == '[' && section[window - 1] == ']' {
            candidates.push(section[1..window - 1].iter().collect());
        }
    }
    candidates
}
