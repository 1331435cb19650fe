// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::collections::HashMap;

use strum::IntoEnumIterator;

use crate::{ActionState, ComposerAction, ComposerModel, LinkAction};

impl ComposerModel {
    /// How each toolbar button should be drawn right now.
    pub fn action_states(&self) -> HashMap<ComposerAction, ActionState> {
        if !self.can_edit() {
            return ComposerAction::iter()
                .map(|action| (action, ActionState::Disabled))
                .collect();
        }
        let format_state = self.format_state();
        ComposerAction::iter()
            .map(|action| {
                let state = match action {
                    ComposerAction::Link => match self.link_action() {
                        LinkAction::Create => ActionState::Enabled,
                        LinkAction::Remove => ActionState::Reversed,
                        LinkAction::Disabled => ActionState::Disabled,
                    },
                    _ if format_state.is_active(action) => ActionState::Reversed,
                    _ => ActionState::Enabled,
                };
                (action, state)
            })
            .collect()
    }
}
