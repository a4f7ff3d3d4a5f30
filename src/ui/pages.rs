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

//! Page history for back-key handling.

/// Id of the fixed bottom page.
pub const MAIN_PAGE: &str = "main";

/// What a back-key press resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    /// Back on the main page: the application should exit.
    Exit,
    /// Popped one page from the history.
    Navigated,
}

/// Navigation history with `"main"` always at the bottom.
#[derive(Debug)]
pub struct PageStack {
    stack: Vec<String>,
}

impl Default for PageStack {
    fn default() -> Self {
        Self {
            stack: vec![MAIN_PAGE.to_string()],
        }
    }
}

impl PageStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the active (topmost) page.
    pub fn active(&self) -> &str {
        self.stack.last().map(String::as_str).unwrap_or(MAIN_PAGE)
    }

    pub fn push(&mut self, page_id: impl Into<String>) {
        self.stack.push(page_id.into());
    }

    /// Resolve a hardware back-key press.
    pub fn back(&mut self) -> BackAction {
        if self.stack.len() > 1 {
            self.stack.pop();
            BackAction::Navigated
        } else {
            BackAction::Exit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_on_main_requests_exit() {
        let mut pages = PageStack::new();
        assert_eq!(pages.active(), "main");
        assert_eq!(pages.back(), BackAction::Exit);
        // Main stays at the bottom no matter how often back is pressed.
        assert_eq!(pages.back(), BackAction::Exit);
        assert_eq!(pages.active(), "main");
    }

    #[test]
    fn test_back_pops_pushed_page() {
        let mut pages = PageStack::new();
        pages.push("detail");
        assert_eq!(pages.active(), "detail");

        assert_eq!(pages.back(), BackAction::Navigated);
        assert_eq!(pages.active(), "main");
        assert_eq!(pages.back(), BackAction::Exit);
    }
}
