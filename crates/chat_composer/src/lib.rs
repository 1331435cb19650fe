// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Model code for the rich text message composer of a chat client.
//!
//! A host UI forwards discrete input events (text input, selection changes,
//! toolbar clicks, key presses, file picks) to a [`ComposerModel`]. The model
//! owns the document tree ([`Dom`]), the selection, the live
//! [`FormatState`], the link-insertion flow and the staged attachment, and
//! answers every call with a [`ComposerUpdate`] describing what changed.

mod attachment;
mod composer_action;
mod composer_model;
mod composer_update;
mod config;
pub mod dom;
mod format_state;
mod inline_format_type;
mod key_event;
mod link_action;
mod location;
mod mention;
mod outbound;

pub use crate::attachment::decode_preview;
pub use crate::attachment::Attachment;
pub use crate::attachment::PendingAttachment;
pub use crate::attachment::PreviewError;
pub use crate::attachment::PreviewRequest;
pub use crate::attachment::PreviewTicket;
pub use crate::composer_action::ActionState;
pub use crate::composer_action::ComposerAction;
pub use crate::composer_model::AttachmentState;
pub use crate::composer_model::ComposerModel;
pub use crate::composer_model::ComposerStatus;
pub use crate::composer_model::ContentState;
pub use crate::composer_model::LinkFlowState;
pub use crate::composer_model::MarkerHandle;
pub use crate::composer_model::SelectionError;
pub use crate::composer_model::SelectionRange;
pub use crate::composer_update::ComposerUpdate;
pub use crate::composer_update::LinkActionUpdate;
pub use crate::composer_update::MenuState;
pub use crate::composer_update::MenuStateUpdate;
pub use crate::composer_update::ReplaceAll;
pub use crate::composer_update::Selection;
pub use crate::composer_update::TextUpdate;
pub use crate::config::ComposerConfig;
pub use crate::dom::parser::parse;
pub use crate::dom::to_html::ToHtml;
pub use crate::dom::to_raw_text::ToRawText;
pub use crate::dom::to_tree::ToTree;
pub use crate::dom::Dom;
pub use crate::dom::DomHandle;
pub use crate::dom::DomNode;
pub use crate::dom::HtmlParseError;
pub use crate::format_state::FormatState;
pub use crate::inline_format_type::InlineFormatType;
pub use crate::key_event::Key;
pub use crate::key_event::KeyEvent;
pub use crate::link_action::normalize_link_url;
pub use crate::link_action::LinkAction;
pub use crate::link_action::LinkError;
pub use crate::location::Location;
pub use crate::mention::filter_mention_candidates;
pub use crate::mention::MentionCandidate;
pub use crate::outbound::MessageSender;
pub use crate::outbound::OutboundMessage;
