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

//! Accessory-service seam.
//!
//! The pairing transport itself (handshake, reconnection, channel
//! management) is owned by the platform framework; this module only
//! defines the traits the agent talks through, the string wire frames,
//! and an in-process loopback host for demos and tests.

mod frames;
mod loopback;
mod port;

pub use frames::{echo_reply, telemetry_frames, Frame};
pub use loopback::{LoopbackChannel, LoopbackHost, LoopbackPort, RequestDecision, LOOPBACK_CHANNEL};
pub use port::{AccessoryPort, AgentDescriptor, AgentRole, ChannelId, PeerInfo, ServiceChannel};
