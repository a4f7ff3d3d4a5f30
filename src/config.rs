// Copyright 2026 DeviceLink Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Configuration.
//!
//! Loaded from `config.toml` under the platform config directory; a
//! default file is written on first run. All defaults reproduce the
//! stock wearable behavior exactly.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service connection settings.
    pub link: LinkConfig,

    /// Motion telemetry settings.
    pub telemetry: TelemetryConfig,

    /// UI surface settings.
    pub ui: UiConfig,

    /// Loopback demo host settings.
    pub loopback: LoopbackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Application name a Consumer must present to be accepted.
    /// Matched exactly, case-sensitive.
    pub consumer_app_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Motion events per transmission window.
    pub send_every: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Toast popup auto-dismiss delay in milliseconds.
    pub toast_dismiss_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopbackConfig {
    /// Application name the demo Consumer presents.
    pub app_name: String,

    /// Synthetic motion event rate in Hz.
    pub motion_rate_hz: u32,

    /// Greeting the demo Consumer sends to exercise the echo path.
    pub greeting: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            link: LinkConfig {
                consumer_app_name: "HelloAccessoryConsumer".to_string(),
            },
            telemetry: TelemetryConfig { send_every: 3 },
            ui: UiConfig {
                toast_dismiss_ms: 3_000,
            },
            loopback: LoopbackConfig {
                app_name: "HelloAccessoryConsumer".to_string(),
                motion_rate_hz: 10,
                greeting: "Hello Accessory!".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from the platform config directory, writing
    /// the defaults there on first run.
    pub fn load() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("devicelink");

        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("creating {}", config_dir.display()))?;

        let config_path = config_dir.join("config.toml");
        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            let config = Self::default();
            config.write_to(&config_path)?;
            Ok(config)
        }
    }

    /// Read configuration from a specific file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Write configuration to a specific file.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))
    }
}
