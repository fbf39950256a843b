//! Server Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::net::SocketAddr;

/// Server configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080")
    pub bind_address: SocketAddr,

    /// Supabase project URL (e.g., `https://xyz.supabase.co`)
    pub supabase_url: String,

    /// Public anon key, sent with requests made on behalf of the caller
    pub supabase_anon_key: String,

    /// Service-role key for privileged operations
    pub supabase_service_role_key: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Supabase settings fall back to empty strings. An unconfigured project
    /// makes every remote call fail instead of refusing to start.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:8080".into())
                .parse()
                .context("BIND_ADDRESS must be a socket address")?,
            supabase_url: env::var("SUPABASE_URL").unwrap_or_default(),
            supabase_anon_key: env::var("SUPABASE_ANON_KEY").unwrap_or_default(),
            supabase_service_role_key: env::var("SUPABASE_SERVICE_ROLE_KEY").unwrap_or_default(),
        })
    }

    /// Create a default configuration for testing.
    ///
    /// Point `supabase_url` at a stub backend before use.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8080)),
            supabase_url: String::new(),
            supabase_anon_key: "test-anon-key".into(),
            supabase_service_role_key: "test-service-role-key".into(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("supabase_url", &self.supabase_url)
            .field("supabase_anon_key", &"<redacted>")
            .field("supabase_service_role_key", &"<redacted>")
            .finish()
    }
}
