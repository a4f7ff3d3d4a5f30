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

//! String wire frames exchanged with the Consumer.
//!
//! Frames are plain strings with a one-character type prefix. There is
//! no versioning, no binary framing, no checksum.

use anyhow::{anyhow, Result};

use crate::telemetry::MotionSample;

/// A parsed wire frame, as the Consumer side sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    /// `x<float>` acceleration frame.
    X(f64),
    /// `y<float>` acceleration frame.
    Y(f64),
    /// `z<float>` acceleration frame.
    Z(f64),
    /// `t<integer-millis>` timestamp frame.
    Timestamp(u64),
}

impl Frame {
    /// Parse one frame from its wire form.
    pub fn parse(raw: &str) -> Result<Self> {
        let (prefix, body) = raw
            .split_at_checked(1)
            .ok_or_else(|| anyhow!("empty frame"))?;

        match prefix {
            "x" => Ok(Frame::X(body.parse()?)),
            "y" => Ok(Frame::Y(body.parse()?)),
            "z" => Ok(Frame::Z(body.parse()?)),
            "t" => Ok(Frame::Timestamp(body.parse()?)),
            other => Err(anyhow!("unknown frame prefix '{}'", other)),
        }
    }

    /// The one-character wire prefix of this frame.
    pub fn prefix(&self) -> char {
        match self {
            Frame::X(_) => 'x',
            Frame::Y(_) => 'y',
            Frame::Z(_) => 'z',
            Frame::Timestamp(_) => 't',
        }
    }
}

/// The four telemetry frames for one sample, in send order.
pub fn telemetry_frames(sample: &MotionSample) -> [String; 4] {
    [
        format!("x{}", sample.ax),
        format!("y{}", sample.ay),
        format!("z{}", sample.az),
        format!("t{}", sample.timestamp_ms),
    ]
}

/// Echo reply for a received payload: the original text with a
/// timestamp appended after a literal `" :: "` separator.
pub fn echo_reply(data: &str, stamp: &str) -> String {
    format!("{} :: {}", data, stamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{MotionReading, MotionSample, RotationRate};

    #[test]
    fn test_telemetry_frame_order_and_prefixes() {
        let sample = MotionSample::from_reading(&MotionReading::new(
            [0.5, 1.0, -2.0],
            RotationRate::default(),
            42,
        ));
        let frames = telemetry_frames(&sample);

        assert_eq!(frames[0], "x0.5");
        assert_eq!(frames[1], "y-1");
        assert_eq!(frames[2], "z2");
        assert_eq!(frames[3], "t42");
    }

    #[test]
    fn test_frame_round_trip() {
        assert_eq!(Frame::parse("x1.25").unwrap(), Frame::X(1.25));
        assert_eq!(Frame::parse("y-0.5").unwrap(), Frame::Y(-0.5));
        assert_eq!(Frame::parse("t1000").unwrap(), Frame::Timestamp(1000));
        assert_eq!(Frame::parse("z3").unwrap().prefix(), 'z');
    }

    #[test]
    fn test_frame_rejects_garbage() {
        assert!(Frame::parse("").is_err());
        assert!(Frame::parse("q1.0").is_err());
        assert!(Frame::parse("tnot-a-number").is_err());
    }

    #[test]
    fn test_echo_reply_separator() {
        assert_eq!(echo_reply("Hello", "12:00"), "Hello :: 12:00");
        assert_eq!(echo_reply("", "t"), " :: t");
    }
}
