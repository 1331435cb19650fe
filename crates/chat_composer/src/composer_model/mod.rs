// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

mod attachment;
mod base;
mod format_inline;
mod keyboard;
mod links;
mod mentions;
mod menu_state;
mod replace_html;
mod selection;
mod send;
mod status;
mod text_ops;

pub use base::ComposerModel;
pub use links::LinkFlowState;
pub use selection::{MarkerHandle, SelectionError, SelectionRange};
pub use status::{AttachmentState, ComposerStatus, ContentState};
