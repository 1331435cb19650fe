// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use html5ever::tree_builder::ElementFlags;
use html5ever::{Attribute, QualName};

use super::{paqual_name, PaDomHandle, PaDomNode, PaNodeContainer, PaNodeText};

/// An arena of parsed nodes. Nodes detached during parsing stay in the arena
/// but are unreachable from the document.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PaDom {
    pub(crate) nodes: Vec<PaDomNode>,
    pub(crate) document_handle: PaDomHandle,
}

impl PaDom {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![PaDomNode::Document(PaNodeContainer {
                name: paqual_name(""),
                attrs: Vec::new(),
                children: Vec::new(),
            })],
            document_handle: PaDomHandle(0),
        }
    }

    pub(crate) fn document_handle(&self) -> &PaDomHandle {
        &self.document_handle
    }

    pub(crate) fn get_document(&self) -> &PaDomNode {
        self.get_node(&self.document_handle)
    }

    pub(crate) fn get_node(&self, handle: &PaDomHandle) -> &PaDomNode {
        &self.nodes[handle.0]
    }

    pub(crate) fn get_mut_node(&mut self, handle: &PaDomHandle) -> &mut PaDomNode {
        &mut self.nodes[handle.0]
    }

    pub(crate) fn add_node(&mut self, node: PaDomNode) -> PaDomHandle {
        self.nodes.push(node);
        PaDomHandle(self.nodes.len() - 1)
    }

    pub(crate) fn add_text(&mut self, content: &str) -> PaDomHandle {
        self.add_node(PaDomNode::Text(PaNodeText {
            content: content.to_owned(),
        }))
    }

    pub(crate) fn create_element(
        &mut self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> PaDomHandle {
        self.add_node(PaDomNode::Container(PaNodeContainer {
            name,
            attrs: attrs
                .into_iter()
                .map(|attr| {
                    (
                        attr.name.local.as_ref().to_owned(),
                        attr.value.as_ref().to_owned(),
                    )
                })
                .collect(),
            children: Vec::new(),
        }))
    }

    /// The node whose children include `child`, if it is attached anywhere.
    pub(crate) fn parent_of(&self, child: &PaDomHandle) -> Option<PaDomHandle> {
        self.nodes
            .iter()
            .position(|node| node.children().contains(child))
            .map(PaDomHandle)
    }

    pub(crate) fn detach(&mut self, child: &PaDomHandle) {
        if let Some(parent) = self.parent_of(child) {
            if let Some(children) = self.get_mut_node(&parent).children_mut() {
                children.retain(|handle| handle != child);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_padom_holds_only_the_document() {
        let dom = PaDom::new();
        assert_eq!(dom.nodes.len(), 1);
        assert!(matches!(dom.get_document(), PaDomNode::Document(_)));
    }

    #[test]
    fn detaching_removes_the_child_from_its_parent() {
        let mut dom = PaDom::new();
        let text = dom.add_text("x");
        let document = dom.document_handle().clone();
        if let Some(children) = dom.get_mut_node(&document).children_mut() {
            children.push(text.clone());
        }
        assert_eq!(dom.parent_of(&text), Some(document));
        dom.detach(&text);
        assert_eq!(dom.parent_of(&text), None);
        assert!(dom.get_document().children().is_empty());
    }
}
