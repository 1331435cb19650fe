// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The document tree edited by the composer.
//!
//! A [`Dom`] is a small tree of inline nodes rooted at a generic document
//! container. Every edit goes through the flat run projection in [`runs`] and
//! the tree is rebuilt in canonical form afterwards, so wrappers never end up
//! empty or duplicated.

pub mod dom_creation_error;
pub mod dom_handle;
pub mod dom_struct;
pub mod nodes;
pub mod parser;
pub mod runs;
pub mod to_html;
pub mod to_raw_text;
pub mod to_tree;
pub mod unicode_string;

pub use dom_creation_error::HtmlParseError;
pub use dom_handle::DomHandle;
pub use dom_struct::Dom;
pub use nodes::{
    ContainerNode, ContainerNodeKind, DomNode, LineBreakNode, LinkTarget,
    MarkerId, MarkerNode, TextNode,
};
pub use runs::{AttributeSet, InlineRun, InlineRunKind};
