// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::{ComposerModel, ComposerUpdate, Key, KeyEvent, MessageSender};

impl ComposerModel {
    /// Handle a key press the host could not deal with itself. Returns
    /// `None` if the key means nothing to the composer, in which case the
    /// host should let it through.
    pub fn handle_key<S>(
        &mut self,
        event: KeyEvent,
        sender: &mut S,
    ) -> Option<ComposerUpdate>
    where
        S: MessageSender + ?Sized,
    {
        match event.key {
            Key::Enter if event.shift => Some(self.new_line()),
            Key::Enter if !event.modifier => Some(self.submit(sender)),
            Key::Enter => None,
            _ => event.shortcut().map(|action| self.toggle(action)),
        }
    }
}
