// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::ComposerAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Character(char),
    Other,
}

/// A key press forwarded by the host. `modifier` is Ctrl, or Cmd on macOS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
    pub modifier: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            shift: false,
            modifier: false,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_modifier(mut self) -> Self {
        self.modifier = true;
        self
    }

    /// The toolbar action bound to this key combination, if any.
    pub(crate) fn shortcut(&self) -> Option<ComposerAction> {
        let Key::Character(c) = self.key else {
            return None;
        };
        if !self.modifier {
            return None;
        }
        match (self.shift, c.to_ascii_lowercase()) {
            (false, 'b') => Some(ComposerAction::Bold),
            (false, 'i') => Some(ComposerAction::Italic),
            (true, 'x') => Some(ComposerAction::StrikeThrough),
            (true, 'u') => Some(ComposerAction::Link),
            _ => None,
        }
    }
}
