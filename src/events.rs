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

//! Link event processing.
//!
//! Every platform callback arrives here as a [`LinkEvent`]; one task
//! consumes the queue and calls the agent's handlers in arrival order,
//! so handlers never interleave and need no locking.

use anyhow::Result;
use chrono::Local;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::accessory::{
    echo_reply, telemetry_frames, AccessoryPort, AgentDescriptor, AgentRole, ChannelId, PeerInfo,
    ServiceChannel,
};
use crate::config::Config;
use crate::state::LinkState;
use crate::telemetry::{MotionReading, MotionSample, SampleMeter};
use crate::ui::{BackAction, DisplayState, PageStack};

/// Events delivered by the hosting platform.
pub enum LinkEvent {
    /// Discovery finished; the registry and the port to act on it.
    AgentsFound {
        agents: Vec<AgentDescriptor>,
        port: Box<dyn AccessoryPort>,
    },
    /// Discovery failed. Terminal for the session.
    AgentLookupFailed { name: String, message: String },
    /// A peer asks for a service connection.
    ConnectionRequest(PeerInfo),
    /// An accepted request produced a data channel.
    Connected(Box<dyn ServiceChannel>),
    /// The framework reported a connection error.
    ConnectionError(i32),
    /// The channel was torn down.
    ConnectionLost(String),
    /// The peer sent a payload on an established channel.
    DataReceived { channel_id: ChannelId, data: String },
    /// A device-motion sensor reading.
    Motion(MotionReading),
    /// Hardware back-key press.
    BackKey,
}

/// Actions the agent asks the host loop to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentAction {
    Quit,
}

/// The provider agent: owns the whole connection lifecycle.
///
/// Exclusively owned by the event task; all former process-wide state
/// (peer handle, channel, sample counter) lives in these fields.
pub struct DeviceLinkAgent {
    consumer_app_name: String,
    port: Option<Box<dyn AccessoryPort>>,
    peer: Option<AgentDescriptor>,
    channel: Option<Box<dyn ServiceChannel>>,
    state: LinkState,
    meter: SampleMeter,
    pages: PageStack,
    display: Arc<DisplayState>,
    action_tx: mpsc::UnboundedSender<AgentAction>,
}

impl DeviceLinkAgent {
    pub fn new(
        config: &Config,
        display: Arc<DisplayState>,
        action_tx: mpsc::UnboundedSender<AgentAction>,
    ) -> Self {
        Self {
            consumer_app_name: config.link.consumer_app_name.clone(),
            port: None,
            peer: None,
            channel: None,
            state: LinkState::Idle,
            meter: SampleMeter::new(config.telemetry.send_every),
            pages: PageStack::new(),
            display,
            action_tx,
        }
    }

    /// Process one platform event to completion.
    pub async fn process_event(&mut self, event: LinkEvent) -> Result<()> {
        match event {
            LinkEvent::AgentsFound { agents, port } => self.on_agents_found(agents, port),
            LinkEvent::AgentLookupFailed { name, message } => {
                self.on_agent_lookup_failed(&name, &message)
            }
            LinkEvent::ConnectionRequest(peer) => self.on_connection_request(&peer),
            LinkEvent::Connected(channel) => self.on_connect(channel),
            LinkEvent::ConnectionError(code) => self.on_connection_error(code),
            LinkEvent::ConnectionLost(reason) => self.on_connection_lost(&reason),
            LinkEvent::DataReceived { channel_id, data } => {
                self.on_data_received(channel_id, &data)
            }
            LinkEvent::Motion(reading) => self.on_motion(&reading),
            LinkEvent::BackKey => self.on_back_key()?,
        }
        Ok(())
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Navigate to a page, as the frontend would on a tap.
    pub fn push_page(&mut self, page_id: impl Into<String>) {
        self.pages.push(page_id);
    }

    fn toast(&self, message: impl Into<String>) {
        self.display.toast.show(message);
    }

    /// First descriptor with the Provider role wins; the rest of the
    /// registry is ignored.
    fn on_agents_found(&mut self, agents: Vec<AgentDescriptor>, port: Box<dyn AccessoryPort>) {
        let Some(provider) = agents.into_iter().find(|a| a.role == AgentRole::Provider) else {
            warn!("agent registry holds no provider entry");
            self.toast("No service provider agent found.");
            return;
        };

        info!("service provider found: {}", provider.name);
        self.toast(format!("Service Provider found! Name: {}", provider.name));
        self.peer = Some(provider);
        self.port = Some(port);
        self.state = LinkState::AwaitingRequest;
    }

    fn on_agent_lookup_failed(&mut self, name: &str, message: &str) {
        warn!("agent lookup failed: {}: {}", name, message);
        self.toast(format!("Agent request failed: {}: {}", name, message));
    }

    /// Accept iff the peer presents the configured consumer application
    /// name, exact and case-sensitive. No version check, no capability
    /// negotiation.
    fn on_connection_request(&mut self, peer: &PeerInfo) {
        self.toast(format!("Connection requested by {}", peer.name));

        let Some(port) = self.port.as_ref() else {
            warn!("connection request from {} before discovery; ignored", peer.name);
            self.toast("Connection request before discovery; ignored.");
            return;
        };

        if peer.app_name == self.consumer_app_name {
            match port.accept_request(peer) {
                Ok(()) => {
                    info!("accepted connection request from {}", peer.name);
                    self.state = LinkState::Accepted;
                    self.toast("Service connection request accepted.");
                }
                Err(e) => {
                    warn!("accept failed for {}: {}", peer.name, e);
                    self.toast(format!("Accept failed: {}", e));
                }
            }
        } else {
            info!(
                "rejected connection request from {} (app {})",
                peer.name, peer.app_name
            );
            if let Err(e) = port.reject_request(peer) {
                warn!("reject failed for {}: {}", peer.name, e);
            }
            self.toast("Service connection request rejected.");
        }
    }

    /// A later connect replaces any previous channel; it never merges.
    fn on_connect(&mut self, channel: Box<dyn ServiceChannel>) {
        info!("service connection established");
        self.channel = Some(channel);
        self.state = LinkState::Connected;
        self.toast("Service connection established");
    }

    fn on_connection_error(&mut self, code: i32) {
        warn!("connection error {}", code);
        self.channel = None;
        self.state = LinkState::Errored;
        self.toast(format!("Connection error: {}", code));
    }

    /// No automatic reconnect; the framework may request again later.
    fn on_connection_lost(&mut self, reason: &str) {
        info!("connection lost: {}", reason);
        self.channel = None;
        self.state = LinkState::Disconnected;
        self.toast(reason);
    }

    /// Echo the payload back with a timestamp appended, on the first
    /// registered channel id.
    fn on_data_received(&mut self, channel_id: ChannelId, data: &str) {
        debug!("data on channel {}: {}", channel_id, data);

        let first_id = self
            .channel
            .as_ref()
            .and_then(|c| c.channel_ids().into_iter().next());
        let Some((channel, id)) = self.channel.as_ref().zip(first_id) else {
            warn!("received data but no channel id is registered");
            self.toast("Something goes wrong...NO CHANNEL ID!");
            return;
        };

        let reply = echo_reply(data, &Local::now().to_rfc2822());
        match channel.send(id, &reply) {
            Ok(()) => self.toast(format!("Send message: {}", reply)),
            Err(e) => {
                warn!("echo send failed: {}", e);
                self.toast(format!("Send failed: {}", e));
            }
        }
    }

    /// Labels update on every event; every `send_every`-th event also
    /// transmits the four tagged frames.
    fn on_motion(&mut self, reading: &MotionReading) {
        let sample = MotionSample::from_reading(reading);
        self.display.readout.update(&sample);

        if !self.meter.tick() {
            return;
        }

        let first_id = self
            .channel
            .as_ref()
            .and_then(|c| c.channel_ids().into_iter().next());
        let Some((channel, id)) = self.channel.as_ref().zip(first_id) else {
            debug!("transmission due but no channel is active");
            self.toast("No active channel; motion frames dropped.");
            return;
        };

        for frame in telemetry_frames(&sample) {
            if let Err(e) = channel.send(id, &frame) {
                warn!("telemetry send failed: {}", e);
                self.toast(format!("Send failed: {}", e));
                break;
            }
        }
    }

    fn on_back_key(&mut self) -> Result<()> {
        match self.pages.back() {
            BackAction::Exit => {
                info!("back key on main page; requesting exit");
                self.action_tx.send(AgentAction::Quit)?;
            }
            BackAction::Navigated => {
                debug!("back key: navigated to {}", self.pages.active());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessory::{LoopbackHost, RequestDecision};
    use crate::config::Config;
    use std::time::Duration;

    struct Harness {
        agent: DeviceLinkAgent,
        host: LoopbackHost,
        event_rx: mpsc::UnboundedReceiver<LinkEvent>,
        action_rx: mpsc::UnboundedReceiver<AgentAction>,
        display: Arc<DisplayState>,
    }

    impl Harness {
        fn new(consumer_app_name: &str) -> Self {
            let mut config = Config::default();
            config.loopback.app_name = consumer_app_name.to_string();

            let display = DisplayState::new(Duration::from_millis(config.ui.toast_dismiss_ms));
            let (action_tx, action_rx) = mpsc::unbounded_channel();
            let (event_tx, event_rx) = mpsc::unbounded_channel();

            Self {
                agent: DeviceLinkAgent::new(&config, display.clone(), action_tx),
                host: LoopbackHost::new(config.loopback, event_tx),
                event_rx,
                action_rx,
                display,
            }
        }

        /// Run queued events to exhaustion, including events produced
        /// by the handlers themselves.
        async fn drain(&mut self) {
            while let Ok(event) = self.event_rx.try_recv() {
                self.agent.process_event(event).await.unwrap();
            }
        }

        async fn connect(&mut self) {
            self.host.announce_agents().unwrap();
            self.host.request_connection().unwrap();
            self.drain().await;
        }

        fn motion(&self) -> LinkEvent {
            LinkEvent::Motion(MotionReading::new(
                [1.0, 2.0, 3.0],
                crate::telemetry::RotationRate::default(),
                500,
            ))
        }
    }

    #[tokio::test]
    async fn test_provider_selected_from_mixed_registry() {
        let mut h = Harness::new("HelloAccessoryConsumer");
        h.host.announce_agents().unwrap();
        h.drain().await;

        // The Consumer entry comes first in the registry; the Provider
        // entry behind it must win.
        assert_eq!(h.agent.state(), LinkState::AwaitingRequest);
        assert_eq!(h.agent.peer.as_ref().unwrap().name, "LOOPBACK-WATCH");
    }

    #[tokio::test]
    async fn test_matching_consumer_accepted_once() {
        let mut h = Harness::new("HelloAccessoryConsumer");
        h.connect().await;

        assert_eq!(h.agent.state(), LinkState::Connected);
        assert!(h.agent.channel.is_some());
        assert_eq!(
            h.host.decisions(),
            vec![(
                "HelloAccessoryConsumer".to_string(),
                RequestDecision::Accepted
            )]
        );
    }

    #[tokio::test]
    async fn test_mismatched_consumer_rejected() {
        let mut h = Harness::new("helloaccessoryconsumer");
        h.connect().await;

        assert_eq!(h.agent.state(), LinkState::AwaitingRequest);
        assert!(h.agent.channel.is_none());
        assert_eq!(
            h.host.decisions(),
            vec![(
                "helloaccessoryconsumer".to_string(),
                RequestDecision::Rejected
            )]
        );
        assert_eq!(
            h.display.toast.visible().as_deref(),
            Some("Service connection request rejected.")
        );
    }

    #[tokio::test]
    async fn test_echo_appends_timestamp() {
        let mut h = Harness::new("HelloAccessoryConsumer");
        h.connect().await;

        h.host.send_text("Ping").unwrap();
        h.drain().await;

        let sent = h.host.sent_frames();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].1.starts_with("Ping :: "));
        assert!(sent[0].1.len() > "Ping :: ".len());
    }

    #[tokio::test]
    async fn test_third_motion_event_sends_four_frames() {
        let mut h = Harness::new("HelloAccessoryConsumer");
        h.connect().await;

        for _ in 0..2 {
            h.agent.process_event(h.motion()).await.unwrap();
        }
        assert!(h.host.sent_frames().is_empty());

        h.agent.process_event(h.motion()).await.unwrap();
        let sent = h.host.sent_frames();
        assert_eq!(sent.len(), 4);
        assert_eq!(sent[0].1, "x1");
        assert_eq!(sent[1].1, "y-2");
        assert_eq!(sent[2].1, "z-3");
        assert_eq!(sent[3].1, "t500");
    }

    #[tokio::test]
    async fn test_motion_without_channel_updates_labels_only() {
        let mut h = Harness::new("HelloAccessoryConsumer");

        for _ in 0..3 {
            h.agent.process_event(h.motion()).await.unwrap();
        }

        assert!(h.host.sent_frames().is_empty());
        assert_eq!(h.display.readout.labels().xaccel, "X : 1.0000");
        assert_eq!(
            h.display.toast.visible().as_deref(),
            Some("No active channel; motion frames dropped.")
        );
    }

    #[tokio::test]
    async fn test_connection_lost_drops_channel() {
        let mut h = Harness::new("HelloAccessoryConsumer");
        h.connect().await;

        h.host.drop_connection("Peer disconnected").unwrap();
        h.drain().await;

        assert_eq!(h.agent.state(), LinkState::Disconnected);
        assert!(h.agent.channel.is_none());
        assert_eq!(
            h.display.toast.visible().as_deref(),
            Some("Peer disconnected")
        );
    }

    #[tokio::test]
    async fn test_lookup_failure_is_terminal() {
        let mut h = Harness::new("HelloAccessoryConsumer");
        h.agent
            .process_event(LinkEvent::AgentLookupFailed {
                name: "NotFoundError".to_string(),
                message: "no agents registered".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(h.agent.state(), LinkState::Idle);
        assert_eq!(
            h.display.toast.visible().as_deref(),
            Some("Agent request failed: NotFoundError: no agents registered")
        );
    }

    #[tokio::test]
    async fn test_back_key_exits_on_main_only() {
        let mut h = Harness::new("HelloAccessoryConsumer");

        h.agent.push_page("detail");
        h.agent.process_event(LinkEvent::BackKey).await.unwrap();
        assert!(h.action_rx.try_recv().is_err());

        h.agent.process_event(LinkEvent::BackKey).await.unwrap();
        assert_eq!(h.action_rx.try_recv().unwrap(), AgentAction::Quit);
    }
}
