// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::nodes::{ContainerNode, ContainerNodeKind, DomNode};
use crate::dom::Dom;

/// A debug rendering of the tree, one node per line.
pub trait ToTree {
    fn to_tree(&self) -> String;
}

impl ToTree for Dom {
    fn to_tree(&self) -> String {
        let mut out = String::new();
        fmt_container(self.document(), "", &mut out);
        out
    }
}

fn fmt_container(container: &ContainerNode, indent: &str, out: &mut String) {
    let name = match container.kind() {
        ContainerNodeKind::Generic => String::new(),
        ContainerNodeKind::Formatting(format) => format.tag().to_owned(),
        ContainerNodeKind::Link(target) => format!("a \"{}\"", target.url),
    };
    out.push_str(&name);
    out.push('\n');
    let child_indent = format!("{indent}  ");
    for child in container.children() {
        out.push_str(indent);
        out.push_str("└>");
        match child {
            DomNode::Container(child) => {
                fmt_container(child, &child_indent, out)
            }
            DomNode::Text(text) => {
                out.push_str(&format!("\"{}\"\n", text.data()))
            }
            DomNode::LineBreak(_) => out.push_str("br\n"),
            DomNode::Marker(marker) => {
                out.push_str(&format!("marker {}\n", marker.id()))
            }
        }
    }
}
