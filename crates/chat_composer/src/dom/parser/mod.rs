// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Parsing HTML into a [`crate::Dom`].
//!
//! html5ever drives a [`TreeSink`](html5ever::tree_builder::TreeSink) that
//! builds a [`PaDom`], an arena of nodes addressed by index. The arena is then
//! walked and flattened into runs, which gives the canonical tree.

mod padom;
mod padom_creation_error;
mod padom_creator;
mod padom_handle;
mod padom_node;
mod panode_container;
mod panode_text;
mod parse;

pub(crate) use padom::PaDom;
pub(crate) use padom_creation_error::PaDomCreationError;
pub(crate) use padom_creator::PaDomCreator;
pub(crate) use padom_handle::PaDomHandle;
pub(crate) use padom_node::PaDomNode;
pub(crate) use panode_container::PaNodeContainer;
pub(crate) use panode_text::PaNodeText;
pub use parse::parse;

use html5ever::{LocalName, Namespace, QualName};

pub(crate) fn paqual_name(name: &str) -> QualName {
    QualName::new(
        None,
        Namespace::from("http://www.w3.org/1999/xhtml"),
        LocalName::from(name),
    )
}
