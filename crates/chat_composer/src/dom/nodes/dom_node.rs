// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::nodes::{
    ContainerNode, LineBreakNode, LinkTarget, MarkerId, MarkerNode, TextNode,
};
use crate::InlineFormatType;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomNode {
    Container(ContainerNode),
    Text(TextNode),
    LineBreak(LineBreakNode),
    Marker(MarkerNode),
}

impl DomNode {
    pub fn new_text(data: impl Into<String>) -> Self {
        Self::Text(TextNode::from(data))
    }

    pub fn new_line_break() -> Self {
        Self::LineBreak(LineBreakNode)
    }

    pub fn new_marker(id: MarkerId) -> Self {
        Self::Marker(MarkerNode::new(id))
    }

    pub fn new_formatting(
        format: InlineFormatType,
        children: Vec<DomNode>,
    ) -> Self {
        Self::Container(ContainerNode::new_formatting(format, children))
    }

    pub fn new_link(target: LinkTarget, children: Vec<DomNode>) -> Self {
        Self::Container(ContainerNode::new_link(target, children))
    }

    pub fn text_len(&self) -> usize {
        match self {
            Self::Container(container) => container.text_len(),
            Self::Text(text) => text.text_len(),
            Self::LineBreak(line_break) => line_break.text_len(),
            Self::Marker(marker) => marker.text_len(),
        }
    }

    pub fn as_container(&self) -> Option<&ContainerNode> {
        match self {
            Self::Container(container) => Some(container),
            _ => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut ContainerNode> {
        match self {
            Self::Container(container) => Some(container),
            _ => None,
        }
    }

    pub fn is_marker(&self, id: MarkerId) -> bool {
        matches!(self, Self::Marker(marker) if marker.id() == id)
    }
}
