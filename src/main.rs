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

//! DeviceLink Provider demo binary.
//!
//! Wires the agent to the in-process loopback host: the host announces
//! the agent registry, requests a connection as the Consumer, sends a
//! greeting through the echo path, and feeds synthetic motion events.

use anyhow::Result;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use devicelink_provider::accessory::LoopbackHost;
use devicelink_provider::config::Config;
use devicelink_provider::events::{AgentAction, DeviceLinkAgent, LinkEvent};
use devicelink_provider::ui::DisplayState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("devicelink_provider=info".parse().unwrap()),
        )
        .init();

    info!(
        "Starting DeviceLink Provider v{}...",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = Config::load()?;
    info!("Configuration loaded");

    // Observable UI surface
    let display = DisplayState::new(Duration::from_millis(config.ui.toast_dismiss_ms));

    // Agent and its event queue
    let (action_tx, mut action_rx) = tokio::sync::mpsc::unbounded_channel::<AgentAction>();
    let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel::<LinkEvent>();
    let mut agent = DeviceLinkAgent::new(&config, display.clone(), action_tx);

    // Event pump: one task, events processed to completion in order
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if let Err(e) = agent.process_event(event).await {
                error!("Error processing link event: {}", e);
            }
        }
    });

    // Loopback host plays the Consumer
    let host = LoopbackHost::new(config.loopback.clone(), event_tx);
    host.announce_agents()?;
    host.request_connection()?;
    host.send_text(&config.loopback.greeting)?;
    let motion_feed = host.spawn_motion_feed();

    info!("Ready. Loopback session running.");

    loop {
        tokio::select! {
            Some(action) = action_rx.recv() => {
                match action {
                    AgentAction::Quit => {
                        info!("Quit requested");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    motion_feed.abort();
    info!("DeviceLink Provider stopped");
    Ok(())
}
