// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerId(pub(crate) u32);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A zero-width anchor that gives a formatting command somewhere to act
/// when the caret is collapsed. Markers have no text, are never serialized
/// and are removed as soon as they have been used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerNode {
    id: MarkerId,
}

impl MarkerNode {
    pub fn new(id: MarkerId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> MarkerId {
        self.id
    }

    pub fn text_len(&self) -> usize {
        0
    }
}
