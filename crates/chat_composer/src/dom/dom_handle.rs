// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::fmt;

/// The path from the document root to a node, as child indices.
///
/// Handles are only valid until the next structural edit: every edit
/// rebuilds the tree, so callers must look nodes up again afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DomHandle {
    path: Vec<usize>,
}

impl DomHandle {
    pub fn root() -> Self {
        Self { path: Vec::new() }
    }

    pub fn from_raw(path: Vec<usize>) -> Self {
        Self { path }
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    pub fn raw(&self) -> &[usize] {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn child_handle(&self, index: usize) -> Self {
        let mut path = self.path.clone();
        path.push(index);
        Self { path }
    }

    /// The handle of this node's parent. The root is its own parent.
    pub fn parent_handle(&self) -> Self {
        let mut path = self.path.clone();
        path.pop();
        Self { path }
    }

    /// The index of this node among its siblings. Zero for the root.
    pub fn index_in_parent(&self) -> usize {
        self.path.last().copied().unwrap_or(0)
    }
}

impl fmt::Display for DomHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> =
            self.path.iter().map(|index| index.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}
