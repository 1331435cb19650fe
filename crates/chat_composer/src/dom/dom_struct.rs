// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::nodes::{ContainerNode, DomNode, MarkerId};
use crate::dom::DomHandle;

/// The rich text document being composed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dom {
    document: ContainerNode,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Dom {
    pub fn new(top_level_items: Vec<DomNode>) -> Self {
        Self {
            document: ContainerNode::new_generic(top_level_items),
        }
    }

    pub fn document(&self) -> &ContainerNode {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut ContainerNode {
        &mut self.document
    }

    pub fn children(&self) -> &[DomNode] {
        self.document.children()
    }

    /// Length of the whole document in UTF-16 code units.
    pub fn text_len(&self) -> usize {
        self.document.text_len()
    }

    /// Look up a non-root node.
    pub fn lookup_node(&self, handle: &DomHandle) -> Option<&DomNode> {
        let (last, parents) = handle.raw().split_last()?;
        let mut container = &self.document;
        for index in parents {
            container = container.children().get(*index)?.as_container()?;
        }
        container.children().get(*last)
    }

    /// Look up the container at `handle`; the root handle gives the document.
    pub fn lookup_container(&self, handle: &DomHandle) -> Option<&ContainerNode> {
        let mut container = &self.document;
        for index in handle.raw() {
            container = container.children().get(*index)?.as_container()?;
        }
        Some(container)
    }

    fn lookup_container_mut(
        &mut self,
        handle: &DomHandle,
    ) -> Option<&mut ContainerNode> {
        let mut container = &mut self.document;
        for index in handle.raw() {
            container =
                container.children_mut().get_mut(*index)?.as_container_mut()?;
        }
        Some(container)
    }

    pub fn find_marker(&self, id: MarkerId) -> Option<DomHandle> {
        fn find_in(
            container: &ContainerNode,
            handle: DomHandle,
            id: MarkerId,
        ) -> Option<DomHandle> {
            for (index, child) in container.children().iter().enumerate() {
                let child_handle = handle.child_handle(index);
                if child.is_marker(id) {
                    return Some(child_handle);
                }
                if let DomNode::Container(child) = child {
                    if let Some(found) = find_in(child, child_handle, id) {
                        return Some(found);
                    }
                }
            }
            None
        }
        find_in(&self.document, DomHandle::root(), id)
    }

    pub fn has_markers(&self) -> bool {
        fn any_marker(container: &ContainerNode) -> bool {
            container.children().iter().any(|child| match child {
                DomNode::Marker(_) => true,
                DomNode::Container(child) => any_marker(child),
                _ => false,
            })
        }
        any_marker(&self.document)
    }

    /// Remove the marker with `id`, dropping any wrapper the removal leaves
    /// empty and re-joining the nodes the marker used to separate. Returns
    /// false if there is no such marker.
    pub fn remove_marker(&mut self, id: MarkerId) -> bool {
        match self.find_marker(id) {
            Some(handle) => {
                self.remove_node(&handle);
                true
            }
            None => false,
        }
    }

    fn remove_node(&mut self, handle: &DomHandle) {
        if handle.is_root() {
            return;
        }
        let parent_handle = handle.parent_handle();
        let index = handle.index_in_parent();
        let Some(parent) = self.lookup_container_mut(&parent_handle) else {
            return;
        };
        parent.remove_child(index);
        parent.join_children_at(index);
        if parent.children().is_empty() {
            self.remove_node(&parent_handle);
        }
    }

    /// Panic unless the tree is in the canonical form that every edit
    /// produces.
    pub fn explicitly_assert_invariants(&self) {
        let canonical = Dom::from_runs(self.to_runs());
        assert_eq!(
            self, &canonical,
            "Dom is not in canonical form:\n{self:?}\nexpected:\n{canonical:?}"
        );
    }

    #[cfg(feature = "assert-invariants")]
    pub fn assert_invariants(&self) {
        self.explicitly_assert_invariants();
    }

    #[cfg(not(feature = "assert-invariants"))]
    pub fn assert_invariants(&self) {}
}
