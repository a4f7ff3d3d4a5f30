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

//! Motion sensor samples and transmit gating.

/// Rotation rate around the alpha and beta axes, in deg/s.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationRate {
    pub alpha: f64,
    pub beta: f64,
}

/// Raw device-motion event as delivered by the platform sensor service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionReading {
    /// Linear acceleration [x, y, z] in m/s², device frame.
    pub acceleration: [f64; 3],

    /// Rotation rate at the time of the reading.
    pub rotation_rate: RotationRate,

    /// Event timestamp in Unix milliseconds.
    pub timestamp_ms: u64,
}

impl MotionReading {
    pub fn new(acceleration: [f64; 3], rotation_rate: RotationRate, timestamp_ms: u64) -> Self {
        Self {
            acceleration,
            rotation_rate,
            timestamp_ms,
        }
    }
}

/// One processed motion sample.
///
/// The y and z accelerations are negated relative to the raw reading so
/// that positive values follow the strap-out orientation of the device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub ax: f64,
    pub ay: f64,
    pub az: f64,
    pub rot_alpha: f64,
    pub rot_beta: f64,
    pub timestamp_ms: u64,
}

impl MotionSample {
    /// Derive a sample from a raw platform reading.
    pub fn from_reading(reading: &MotionReading) -> Self {
        Self {
            ax: reading.acceleration[0],
            ay: -reading.acceleration[1],
            az: -reading.acceleration[2],
            rot_alpha: reading.rotation_rate.alpha,
            rot_beta: reading.rotation_rate.beta,
            timestamp_ms: reading.timestamp_ms,
        }
    }
}

/// Counts motion events and signals when a transmission is due.
///
/// The counter runs 0..`send_every` and wraps; `tick` returns true on the
/// event that completes a window (every third event with the default
/// configuration).
#[derive(Debug)]
pub struct SampleMeter {
    count: u32,
    send_every: u32,
}

impl SampleMeter {
    pub fn new(send_every: u32) -> Self {
        Self {
            count: 0,
            send_every,
        }
    }

    /// Record one motion event. Returns true when a transmission is due.
    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count == self.send_every {
            self.count = 0;
            return true;
        }
        false
    }

    /// Events seen since the last transmission.
    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Median of a set of values. The input must be non-empty.
///
/// Not called by the live telemetry path; kept for sample smoothing
/// experiments on recorded axis traces.
pub fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let half = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[half]
    } else {
        (sorted[half - 1] + sorted[half]) / 2.0
    }
}
