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

//! Observable UI surface.
//!
//! Layout and styling are out of scope; the surface is the state a
//! frontend (or a test) would render: five readout labels and a toast
//! popup, plus the back-key page history.

mod pages;
mod readout;
mod toast;

pub use pages::{BackAction, PageStack, MAIN_PAGE};
pub use readout::{MotionReadout, ReadoutLabels};
pub use toast::ToastBoard;

use std::sync::Arc;
use std::time::Duration;

/// Shared handle to everything a frontend observes.
#[derive(Debug)]
pub struct DisplayState {
    pub toast: Arc<ToastBoard>,
    pub readout: MotionReadout,
}

impl DisplayState {
    pub fn new(toast_dismiss: Duration) -> Arc<Self> {
        Arc::new(Self {
            toast: ToastBoard::new(toast_dismiss),
            readout: MotionReadout::new(),
        })
    }
}
