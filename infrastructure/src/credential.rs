//! API key discovery.
//!
//! Looked up in order: config `api_key`, the environment variable named by
//! `api_key_env`, `VITE_API_KEY`, then a key baked in at build time via
//! `API_KEY`. Blank values count as absent.

use crate::config::FileProviderConfig;
use std::fmt;

/// Secondary variable honored for keys exported for the web build.
pub const FALLBACK_ENV_VAR: &str = "VITE_API_KEY";

const BUILD_TIME_KEY: Option<&str> = option_env!("API_KEY");

/// Where the key was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    ConfigFile,
    Env(String),
    BuildTime,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::ConfigFile => write!(f, "config file"),
            CredentialSource::Env(name) => write!(f, "${}", name),
            CredentialSource::BuildTime => write!(f, "build-time API_KEY"),
        }
    }
}

/// A resolved API key. `Debug` never prints the secret.
#[derive(Clone)]
pub struct ApiKey {
    value: String,
    source: CredentialSource,
}

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.value
    }

    pub fn source(&self) -> &CredentialSource {
        &self.source
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("value", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Resolve the key from config, the process environment and the build.
pub fn resolve_api_key(provider: &FileProviderConfig) -> Option<ApiKey> {
    resolve_with(provider, |name| std::env::var(name).ok(), BUILD_TIME_KEY)
}

fn resolve_with(
    provider: &FileProviderConfig,
    env: impl Fn(&str) -> Option<String>,
    build_time: Option<&str>,
) -> Option<ApiKey> {
    let found = |value: Option<String>, source: CredentialSource| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(|value| ApiKey { value, source })
    };

    found(provider.api_key.clone(), CredentialSource::ConfigFile)
        .or_else(|| {
            let name = provider.api_key_env.trim();
            (!name.is_empty())
                .then(|| found(env(name), CredentialSource::Env(name.to_string())))
                .flatten()
        })
        .or_else(|| {
            found(
                env(FALLBACK_ENV_VAR),
                CredentialSource::Env(FALLBACK_ENV_VAR.to_string()),
            )
        })
        .or_else(|| found(build_time.map(str::to_string), CredentialSource::BuildTime))
}
