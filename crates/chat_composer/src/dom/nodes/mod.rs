// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

pub mod container_node;
pub mod dom_node;
pub mod line_break_node;
pub mod marker_node;
pub mod text_node;

pub use container_node::{ContainerNode, ContainerNodeKind, LinkTarget};
pub use dom_node::DomNode;
pub use line_break_node::LineBreakNode;
pub use marker_node::{MarkerId, MarkerNode};
pub use text_node::TextNode;
