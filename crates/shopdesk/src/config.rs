//! CLI configuration, a thin wrapper around `shopdesk_config`.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--api-url, --insecure, --timeout, ...).

use std::sync::Arc;

use shopdesk_api::{ClientConfig, CoreApi, SessionStore};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use shopdesk_config::{
    Config, Defaults, FileSessionStore, Profile, config_path, load_config_or_default,
    save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

/// The stored profile with CLI flag overrides applied.
///
/// A missing profile is fine as long as `--api-url` (or its env var) is set.
pub fn effective_profile(global: &GlobalOpts, config: &Config) -> Result<Profile, CliError> {
    let name = active_profile_name(global, config);
    let mut profile = config.profiles.get(&name).cloned().unwrap_or_default();

    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }
    if let Some(ref url) = global.domain_url {
        profile.domain_url = Some(url.clone());
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    if profile.api_url.is_empty() {
        return Err(CliError::NoConfig {
            path: config_path().display().to_string(),
        });
    }
    Ok(profile)
}

/// Translate config + flags into a `ClientConfig`.
pub fn resolve_client_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<ClientConfig, CliError> {
    let profile = effective_profile(global, config)?;
    Ok(shopdesk_config::profile_to_client_config(
        &profile,
        &config.defaults,
    )?)
}

/// Build the API client with the profile's on-disk session.
pub fn connect(global: &GlobalOpts, config: &Config) -> Result<CoreApi, CliError> {
    let client_config = resolve_client_config(global, config)?;
    let profile_name = active_profile_name(global, config);
    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::for_profile(&profile_name)?);
    tracing::debug!(profile = %profile_name, api_url = %client_config.api_url, "connecting");
    Ok(CoreApi::new(client_config, store)?)
}
