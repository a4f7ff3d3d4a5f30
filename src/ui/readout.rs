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

//! Live motion readout labels.

use parking_lot::RwLock;

use crate::telemetry::MotionSample;

/// Snapshot of the five readout label texts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadoutLabels {
    pub xaccel: String,
    pub yaccel: String,
    pub zaccel: String,
    pub rotx: String,
    pub roty: String,
}

/// Observable label surface, updated on every motion event.
#[derive(Debug, Default)]
pub struct MotionReadout {
    labels: RwLock<ReadoutLabels>,
}

impl MotionReadout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a sample into the five labels, 4-decimal fixed point.
    pub fn update(&self, sample: &MotionSample) {
        *self.labels.write() = ReadoutLabels {
            xaccel: format!("X : {:.4}", sample.ax),
            yaccel: format!("Y : {:.4}", sample.ay),
            zaccel: format!("Z : {:.4}", sample.az),
            rotx: format!("rotx : {:.4}", sample.rot_alpha),
            roty: format!("roty : {:.4}", sample.rot_beta),
        };
    }

    pub fn labels(&self) -> ReadoutLabels {
        self.labels.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{MotionReading, RotationRate};

    #[test]
    fn test_labels_render_four_decimals() {
        let readout = MotionReadout::new();
        let sample = MotionSample::from_reading(&MotionReading::new(
            [0.123456, 2.0, -9.81],
            RotationRate {
                alpha: 15.5,
                beta: -3.25,
            },
            0,
        ));

        readout.update(&sample);
        let labels = readout.labels();

        assert_eq!(labels.xaccel, "X : 0.1235");
        assert_eq!(labels.yaccel, "Y : -2.0000");
        assert_eq!(labels.zaccel, "Z : 9.8100");
        assert_eq!(labels.rotx, "rotx : 15.5000");
        assert_eq!(labels.roty, "roty : -3.2500");
    }
}
