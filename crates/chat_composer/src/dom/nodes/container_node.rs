// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::nodes::DomNode;
use crate::InlineFormatType;

/// Where a link points, plus any extra anchor attributes (`target`, `rel`)
/// in the order they are written out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkTarget {
    pub url: String,
    pub attributes: Vec<(String, String)>,
}

impl LinkTarget {
    pub fn new(url: impl Into<String>, attributes: Vec<(String, String)>) -> Self {
        Self {
            url: url.into(),
            attributes,
        }
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContainerNodeKind {
    /// The document root.
    Generic,
    Formatting(InlineFormatType),
    Link(LinkTarget),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerNode {
    kind: ContainerNodeKind,
    children: Vec<DomNode>,
}

impl ContainerNode {
    pub fn new(kind: ContainerNodeKind, children: Vec<DomNode>) -> Self {
        Self { kind, children }
    }

    pub fn new_generic(children: Vec<DomNode>) -> Self {
        Self::new(ContainerNodeKind::Generic, children)
    }

    pub fn new_formatting(
        format: InlineFormatType,
        children: Vec<DomNode>,
    ) -> Self {
        Self::new(ContainerNodeKind::Formatting(format), children)
    }

    pub fn new_link(target: LinkTarget, children: Vec<DomNode>) -> Self {
        Self::new(ContainerNodeKind::Link(target), children)
    }

    pub fn kind(&self) -> &ContainerNodeKind {
        &self.kind
    }

    pub fn children(&self) -> &[DomNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<DomNode> {
        &mut self.children
    }

    pub fn take_children(self) -> Vec<DomNode> {
        self.children
    }

    pub fn append_child(&mut self, child: DomNode) {
        self.children.push(child);
    }

    pub fn remove_child(&mut self, index: usize) -> Option<DomNode> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    pub fn is_link(&self) -> bool {
        matches!(self.kind, ContainerNodeKind::Link(_))
    }

    pub fn text_len(&self) -> usize {
        self.children.iter().map(DomNode::text_len).sum()
    }

    /// Whether anything inside this container would show up when rendered.
    /// Markers and empty text do not count.
    pub fn has_visible_content(&self) -> bool {
        self.children.iter().any(|child| match child {
            DomNode::Container(container) => container.has_visible_content(),
            DomNode::Text(text) => !text.data().is_empty(),
            DomNode::LineBreak(_) => true,
            DomNode::Marker(_) => false,
        })
    }

    /// Merge the children either side of `index` if they are two text nodes
    /// or two containers of the same kind. Used to close the gap left when a
    /// node between them is removed.
    pub fn join_children_at(&mut self, index: usize) {
        if index == 0 || index >= self.children.len() {
            return;
        }
        let mergeable = match (&self.children[index - 1], &self.children[index])
        {
            (DomNode::Text(_), DomNode::Text(_)) => true,
            (DomNode::Container(left), DomNode::Container(right)) => {
                left.kind == right.kind
            }
            _ => false,
        };
        if !mergeable {
            return;
        }
        let right = self.children.remove(index);
        match (&mut self.children[index - 1], right) {
            (DomNode::Text(left), DomNode::Text(right)) => {
                left.push_str(right.data());
            }
            (DomNode::Container(left), DomNode::Container(right)) => {
                let join = left.children.len();
                left.children.extend(right.take_children());
                left.join_children_at(join);
            }
            _ => {}
        }
    }
}
