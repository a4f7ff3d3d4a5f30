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

//! In-process loopback host.
//!
//! The real accessory framework exists only on the wearable platform, so
//! this host plays the Consumer against in-memory queues: it announces
//! the agent registry, requests a connection under a configurable app
//! name, records every frame the provider sends, and feeds a synthetic
//! motion stream. The demo binary and the integration tests both drive
//! the agent through it.

use anyhow::{anyhow, Result};
use chrono::Utc;
use parking_lot::Mutex;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::port::{AccessoryPort, AgentDescriptor, AgentRole, ChannelId, PeerInfo, ServiceChannel};
use crate::config::LoopbackConfig;
use crate::events::LinkEvent;
use crate::telemetry::{MotionReading, RotationRate};

/// Channel id the loopback connection registers.
pub const LOOPBACK_CHANNEL: ChannelId = 104;

/// Outcome of one connection request, as the host saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestDecision {
    Accepted,
    Rejected,
}

/// Port handle backing the provider's accept/reject primitives.
///
/// Accepting delivers a [`LoopbackChannel`] back through the event queue,
/// the way the platform delivers `onconnect` after an accept.
pub struct LoopbackPort {
    event_tx: mpsc::UnboundedSender<LinkEvent>,
    decisions: Arc<Mutex<Vec<(String, RequestDecision)>>>,
    sent: Arc<Mutex<Vec<(ChannelId, String)>>>,
}

impl AccessoryPort for LoopbackPort {
    fn accept_request(&self, peer: &PeerInfo) -> Result<()> {
        self.decisions
            .lock()
            .push((peer.app_name.clone(), RequestDecision::Accepted));

        let channel = LoopbackChannel {
            ids: vec![LOOPBACK_CHANNEL],
            sent: self.sent.clone(),
        };
        self.event_tx
            .send(LinkEvent::Connected(Box::new(channel)))
            .map_err(|_| anyhow!("event queue closed"))
    }

    fn reject_request(&self, peer: &PeerInfo) -> Result<()> {
        self.decisions
            .lock()
            .push((peer.app_name.clone(), RequestDecision::Rejected));
        debug!("loopback: rejected connection request from {}", peer.name);
        Ok(())
    }
}

/// Channel whose sends land in the host's record instead of a radio.
pub struct LoopbackChannel {
    ids: Vec<ChannelId>,
    sent: Arc<Mutex<Vec<(ChannelId, String)>>>,
}

impl ServiceChannel for LoopbackChannel {
    fn channel_ids(&self) -> Vec<ChannelId> {
        self.ids.clone()
    }

    fn send(&self, channel: ChannelId, data: &str) -> Result<()> {
        debug!("loopback: channel {} <- {}", channel, data);
        self.sent.lock().push((channel, data.to_string()));
        Ok(())
    }
}

/// The Consumer side of the loopback pair.
pub struct LoopbackHost {
    config: LoopbackConfig,
    event_tx: mpsc::UnboundedSender<LinkEvent>,
    decisions: Arc<Mutex<Vec<(String, RequestDecision)>>>,
    sent: Arc<Mutex<Vec<(ChannelId, String)>>>,
}

impl LoopbackHost {
    pub fn new(config: LoopbackConfig, event_tx: mpsc::UnboundedSender<LinkEvent>) -> Self {
        Self {
            config,
            event_tx,
            decisions: Arc::new(Mutex::new(Vec::new())),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn emit(&self, event: LinkEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .map_err(|_| anyhow!("event queue closed"))
    }

    /// Announce the agent registry, as discovery would report it.
    ///
    /// The registry carries a Consumer entry ahead of the Provider entry,
    /// so first-match-wins selection is actually exercised.
    pub fn announce_agents(&self) -> Result<()> {
        let agents = vec![
            AgentDescriptor {
                role: AgentRole::Consumer,
                name: "LOOPBACK-PHONE".to_string(),
                app_name: self.config.app_name.clone(),
            },
            AgentDescriptor {
                role: AgentRole::Provider,
                name: "LOOPBACK-WATCH".to_string(),
                app_name: env!("CARGO_PKG_NAME").to_string(),
            },
        ];
        let port = LoopbackPort {
            event_tx: self.event_tx.clone(),
            decisions: self.decisions.clone(),
            sent: self.sent.clone(),
        };
        info!("loopback: announcing {} agents", agents.len());
        self.emit(LinkEvent::AgentsFound {
            agents,
            port: Box::new(port),
        })
    }

    /// Ask the provider for a service connection.
    pub fn request_connection(&self) -> Result<()> {
        self.emit(LinkEvent::ConnectionRequest(PeerInfo {
            app_name: self.config.app_name.clone(),
            name: "LOOPBACK-PHONE".to_string(),
        }))
    }

    /// Deliver a text payload to the provider, exercising the echo path.
    pub fn send_text(&self, text: &str) -> Result<()> {
        self.emit(LinkEvent::DataReceived {
            channel_id: LOOPBACK_CHANNEL,
            data: text.to_string(),
        })
    }

    /// Report the connection as lost with a human-readable reason.
    pub fn drop_connection(&self, reason: &str) -> Result<()> {
        self.emit(LinkEvent::ConnectionLost(reason.to_string()))
    }

    /// Feed synthetic motion events (sine drift plus jitter) until the
    /// event queue closes.
    pub fn spawn_motion_feed(&self) -> tokio::task::JoinHandle<()> {
        let event_tx = self.event_tx.clone();
        let period = Duration::from_millis(1_000 / u64::from(self.config.motion_rate_hz.max(1)));

        tokio::spawn(async move {
            let mut phase = 0.0_f64;

            loop {
                phase += 0.1;
                // ThreadRng is not Send; keep it out of the await below.
                let reading = {
                    let mut rng = rand::thread_rng();
                    let mut jitter = move || rng.gen_range(-0.05..0.05);
                    MotionReading::new(
                        [
                            phase.sin() + jitter(),
                            phase.cos() + jitter(),
                            -9.81 + jitter(),
                        ],
                        RotationRate {
                            alpha: (phase * 2.0).sin() * 30.0 + jitter(),
                            beta: (phase * 2.0).cos() * 30.0 + jitter(),
                        },
                        Utc::now().timestamp_millis() as u64,
                    )
                };

                if event_tx.send(LinkEvent::Motion(reading)).is_err() {
                    break;
                }
                tokio::time::sleep(period).await;
            }
        })
    }

    /// Every frame the provider has sent so far, in send order.
    pub fn sent_frames(&self) -> Vec<(ChannelId, String)> {
        self.sent.lock().clone()
    }

    /// Accept/reject outcomes recorded by the port.
    pub fn decisions(&self) -> Vec<(String, RequestDecision)> {
        self.decisions.lock().clone()
    }
}
