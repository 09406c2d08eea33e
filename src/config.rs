//! Configuration handling for the TUI

use crate::api::DEFAULT_API_HOST;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the API host
pub const API_HOST_ENV: &str = "DASHBOARD_API_HOST";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Base URL of the dashboard API
    pub api_host: Option<String>,
    /// Bearer token for authenticated requests
    pub auth_token: Option<String>,
    /// Team new projects are created in
    pub team_id: Option<i64>,
    /// Per-request timeout
    pub request_timeout_secs: Option<u64>,
}

impl DashboardConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "dashboard", "dashboard-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: DashboardConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// API host: environment, then config file, then the default
    pub fn api_host(&self) -> String {
        Self::resolve_api_host(std::env::var(API_HOST_ENV).ok(), self.api_host.as_deref())
    }

    fn resolve_api_host(env: Option<String>, configured: Option<&str>) -> String {
        env.filter(|h| !h.trim().is_empty())
            .or_else(|| configured.map(str::to_string))
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Persist the active team so the next start opens in it
    pub fn remember_team(&mut self, team_id: i64) -> Result<()> {
        if self.team_id == Some(team_id) {
            return Ok(());
        }
        self.team_id = Some(team_id);
        self.save()
    }
}
