// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::nodes::{ContainerNode, DomNode};
use crate::dom::Dom;

/// Plain text with formatting stripped and line breaks as `\n`.
pub trait ToRawText {
    fn to_raw_text(&self) -> String;
}

impl ToRawText for Dom {
    fn to_raw_text(&self) -> String {
        self.document().to_raw_text()
    }
}

impl ToRawText for ContainerNode {
    fn to_raw_text(&self) -> String {
        self.children().iter().map(ToRawText::to_raw_text).collect()
    }
}

impl ToRawText for DomNode {
    fn to_raw_text(&self) -> String {
        match self {
            DomNode::Container(container) => container.to_raw_text(),
            DomNode::Text(text) => text.data().to_owned(),
            DomNode::LineBreak(_) => "\n".to_owned(),
            DomNode::Marker(_) => String::new(),
        }
    }
}
