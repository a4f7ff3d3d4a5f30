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

//! Traits and descriptors for the platform accessory framework.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Logical channel identifier within an established connection.
pub type ChannelId = u32;

/// Role of an accessory-service agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentRole {
    #[serde(rename = "PROVIDER")]
    Provider,
    #[serde(rename = "CONSUMER")]
    Consumer,
}

impl AgentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Provider => "PROVIDER",
            AgentRole::Consumer => "CONSUMER",
        }
    }
}

/// Descriptor of one agent in the accessory-service registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentDescriptor {
    pub role: AgentRole,
    pub name: String,
    pub app_name: String,
}

/// Descriptor of a remote peer asking for a service connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerInfo {
    /// Application identifier presented by the peer.
    pub app_name: String,
    /// Human-readable peer name.
    pub name: String,
}

/// Accept/reject primitives exposed by the matched service agent.
pub trait AccessoryPort: Send {
    fn accept_request(&self, peer: &PeerInfo) -> Result<()>;
    fn reject_request(&self, peer: &PeerInfo) -> Result<()>;
}

/// An established bidirectional data channel.
///
/// Sends are fire-and-forget into the platform transport; this layer
/// adds no acknowledgement or delivery guarantee.
pub trait ServiceChannel: Send {
    /// Registered channel ids, in registration order.
    fn channel_ids(&self) -> Vec<ChannelId>;

    /// Send a string payload on one channel.
    fn send(&self, channel: ChannelId, data: &str) -> Result<()>;
}
