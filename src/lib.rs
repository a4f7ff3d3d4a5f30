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

//! Wearable-side Provider agent for the DeviceLink accessory service.
//!
//! Pairs with a companion Consumer application, streams motion sensor
//! samples to it as tagged string frames, echoes received payloads, and
//! surfaces every lifecycle event as a toast.

pub mod accessory;
pub mod config;
pub mod events;
pub mod state;
pub mod telemetry;
pub mod ui;
