// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

/// A `<br />`. Occupies one code unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineBreakNode;

impl LineBreakNode {
    pub fn text_len(&self) -> usize {
        1
    }
}
