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

//! Transient toast popup.

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Observable popup state with timed auto-dismiss.
///
/// Every `show` schedules one dismissal; a firing dismissal closes
/// whichever popup is visible at that moment, regardless of which call
/// scheduled it. This mirrors the fixed-delay popup behavior of the
/// wearable UI.
#[derive(Debug)]
pub struct ToastBoard {
    content: Arc<RwLock<Option<String>>>,
    dismiss_after: Duration,
}

impl ToastBoard {
    pub fn new(dismiss_after: Duration) -> Arc<Self> {
        Arc::new(Self {
            content: Arc::new(RwLock::new(None)),
            dismiss_after,
        })
    }

    /// Show a popup and schedule its dismissal.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self, message: impl Into<String>) {
        let message = message.into();
        info!("toast: {}", message);
        *self.content.write() = Some(message);

        let content = Arc::clone(&self.content);
        let after = self.dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            *content.write() = None;
        });
    }

    /// Close the popup, whatever it currently shows.
    pub fn dismiss(&self) {
        *self.content.write() = None;
    }

    /// Content of the visible popup, if any.
    pub fn visible(&self) -> Option<String> {
        self.content.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_toast_auto_dismisses_after_delay() {
        let board = ToastBoard::new(Duration::from_millis(3_000));
        board.show("hello");
        assert_eq!(board.visible().as_deref(), Some("hello"));

        tokio::time::sleep(Duration::from_millis(2_999)).await;
        assert_eq!(board.visible().as_deref(), Some("hello"));

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(board.visible(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_earlier_dismissal_closes_later_popup() {
        let board = ToastBoard::new(Duration::from_millis(3_000));
        board.show("first");

        tokio::time::sleep(Duration::from_millis(1_000)).await;
        board.show("second");

        // The timer from "first" fires at t=3000 and closes "second".
        tokio::time::sleep(Duration::from_millis(2_001)).await;
        assert_eq!(board.visible(), None);
    }
}
