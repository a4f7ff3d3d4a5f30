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

//! Connection lifecycle state.

/// Where the agent stands in the service-connection lifecycle.
///
/// The accessory framework owns reconnection and handshake; this machine
/// only tracks what the framework has reported so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// No service agent yet; discovery pending or failed.
    Idle,
    /// Agent found, listener attached, no consumer seen yet.
    AwaitingRequest,
    /// A connection request was accepted; channel not delivered yet.
    Accepted,
    /// A data channel is live.
    Connected,
    /// The channel was lost; the framework may request again later.
    Disconnected,
    /// The framework reported a connection error.
    Errored,
}

impl LinkState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkState::Idle => "Idle",
            LinkState::AwaitingRequest => "Awaiting request",
            LinkState::Accepted => "Accepted",
            LinkState::Connected => "Connected",
            LinkState::Disconnected => "Disconnected",
            LinkState::Errored => "Error",
        }
    }

    /// True once a channel has been delivered and not yet torn down.
    pub fn is_connected(&self) -> bool {
        matches!(self, LinkState::Connected)
    }
}
