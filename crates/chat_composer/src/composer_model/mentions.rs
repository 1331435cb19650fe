// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use tracing::debug;

use crate::{ComposerModel, ComposerUpdate, MentionCandidate};

impl ComposerModel {
    /// Replace the selection with `@Name ` as plain text. The mention never
    /// joins a link it is typed next to.
    pub fn insert_mention(&mut self, candidate: &MentionCandidate) -> ComposerUpdate {
        if candidate.display_name.trim().is_empty() {
            debug!(id = %candidate.id, "Ignoring mention without a name");
            return ComposerUpdate::keep();
        }
        self.replace_text(&candidate.mention_text())
    }
}
