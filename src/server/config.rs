// src/server/config.rs
//! Configuration file parsing for the Galley server
//!
//! Supports TOML configuration files with the following sections:
//! - [server] - Bind address, request logging, CORS origins
//! - [limits] - Request size limits

use crate::server::ServerConfig;
use anyhow::{Context, Result};
use axum::http::HeaderValue;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize)]
pub struct GalleyConfig {
    /// Server settings
    #[serde(default)]
    pub server: ServerSection,

    /// Request limits
    #[serde(default)]
    pub limits: LimitsSection,
}

/// Server configuration section
#[derive(Debug, Deserialize)]
pub struct ServerSection {
    /// Bind address
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Log each request and response
    #[serde(default = "default_true")]
    pub request_log: bool,

    /// Allowed CORS origins (empty = any)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            request_log: true,
            cors_origins: Vec::new(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_true() -> bool {
    true
}

/// Request limits section
#[derive(Debug, Deserialize)]
pub struct LimitsSection {
    /// Maximum request body size (e.g., "64KB", "1MB")
    #[serde(default = "default_max_body")]
    pub max_body: String,
}

impl Default for LimitsSection {
    fn default() -> Self {
        Self {
            max_body: default_max_body(),
        }
    }
}

fn default_max_body() -> String {
    "64KB".to_string()
}

impl GalleyConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: GalleyConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.server
            .bind
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid server.bind address: {}", self.server.bind))?;

        for origin in &self.server.cors_origins {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid server.cors_origins entry: {:?}", origin))?;
        }

        if parse_size(&self.limits.max_body)? == 0 {
            anyhow::bail!("limits.max_body must be greater than zero");
        }

        Ok(())
    }

    /// Convert to the internal ServerConfig structure
    pub fn to_server_config(&self) -> Result<ServerConfig> {
        let bind_addr = self
            .server
            .bind
            .parse()
            .with_context(|| format!("Invalid server.bind address: {}", self.server.bind))?;
        let max_body_bytes = usize::try_from(parse_size(&self.limits.max_body)?)
            .context("limits.max_body does not fit in memory")?;

        Ok(ServerConfig {
            bind_addr,
            request_log: self.server.request_log,
            cors_allowed_origins: self.server.cors_origins.clone(),
            max_body_bytes,
        })
    }
}

/// Parse a human-readable size string (e.g., "64KB", "1MB", "512")
pub fn parse_size(s: &str) -> Result<u64> {
    let s = s.trim().to_uppercase();

    let (num_str, multiplier) = if let Some(num) = s.strip_suffix("GB") {
        (num, 1024u64 * 1024 * 1024)
    } else if let Some(num) = s.strip_suffix("MB") {
        (num, 1024u64 * 1024)
    } else if let Some(num) = s.strip_suffix("KB") {
        (num, 1024u64)
    } else if let Some(num) = s.strip_suffix('B') {
        (num, 1u64)
    } else {
        // Assume bytes
        (s.as_str(), 1u64)
    };

    let num: f64 = num_str
        .trim()
        .parse()
        .with_context(|| format!("Invalid size number: {}", num_str))?;
    if !num.is_finite() || num < 0.0 {
        anyhow::bail!("Invalid size: {}", s);
    }

    Ok((num * multiplier as f64) as u64)
}
