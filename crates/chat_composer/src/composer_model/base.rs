// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use tracing::debug;

use crate::dom::parser::parse;
use crate::dom::runs::{self, AttributeSet, InlineRun};
use crate::dom::{Dom, MarkerId};
use crate::{
    ComposerConfig, ComposerUpdate, FormatState, HtmlParseError,
    LinkFlowState, Location, MenuState, MenuStateUpdate, PendingAttachment,
    PreviewTicket, ToHtml, ToRawText, ToTree,
};

/// The document and the selection within it. `start` is the anchor and
/// `end` the focus, so `end` may come first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ComposerState {
    pub(crate) dom: Dom,
    pub(crate) start: Location,
    pub(crate) end: Location,
}

/// The message composer of one open chat.
pub struct ComposerModel {
    pub(crate) state: ComposerState,
    pub(crate) config: ComposerConfig,

    /// Bumped by every edit to the document's content or formatting.
    /// Marker bookkeeping does not count.
    pub(crate) revision: u64,

    /// Whether the editable surface is on screen and receiving selection
    /// changes.
    pub(crate) mounted: bool,
    pub(crate) focused: bool,

    /// The marker carrying formats toggled at a collapsed caret.
    pub(crate) active_marker: Option<MarkerId>,
    next_marker_id: u32,

    pub(crate) link_flow: LinkFlowState,

    pub(crate) attachment: Option<PendingAttachment>,
    /// The preview we are still waiting for, if any.
    pub(crate) preview_ticket: Option<PreviewTicket>,
    next_preview_ticket: u64,
}

impl Default for ComposerModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposerModel {
    pub fn new() -> Self {
        Self::with_config(ComposerConfig::default())
    }

    pub fn with_config(config: ComposerConfig) -> Self {
        Self {
            state: ComposerState::default(),
            config,
            revision: 0,
            mounted: true,
            focused: true,
            active_marker: None,
            next_marker_id: 0,
            link_flow: LinkFlowState::Idle,
            attachment: None,
            preview_ticket: None,
            next_preview_ticket: 0,
        }
    }

    /// A composer holding `html`, with the selection from `start` to `end`.
    pub fn from_html(
        html: &str,
        start: usize,
        end: usize,
    ) -> Result<Self, HtmlParseError> {
        let mut model = Self::new();
        model.state.dom = parse(html)?;
        model.state.start = Location::from(start);
        model.state.end = Location::from(end);
        Ok(model)
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn set_disabled(&mut self, disabled: bool) -> ComposerUpdate {
        self.config.disabled = disabled;
        ComposerUpdate::update_menu_state(self.compute_menu_state())
    }

    /// The placeholder label, while there is nothing typed to hide it.
    pub fn placeholder(&self) -> Option<&str> {
        if self.is_empty() {
            self.config.placeholder_label.as_deref()
        } else {
            None
        }
    }

    pub fn get_content_as_html(&self) -> String {
        self.state.dom.to_html()
    }

    pub fn get_content_as_plain_text(&self) -> String {
        self.state.dom.to_raw_text()
    }

    pub fn dom(&self) -> &Dom {
        &self.state.dom
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn to_tree(&self) -> String {
        self.state.dom.to_tree()
    }

    /// Whether the document has nothing but whitespace and line breaks.
    pub fn is_empty(&self) -> bool {
        self.state.dom.to_raw_text().trim().is_empty()
    }

    /// The selection as (anchor, focus).
    pub fn get_selection(&self) -> (Location, Location) {
        (self.state.start, self.state.end)
    }

    /// The selection ordered and clamped to the document.
    pub(crate) fn safe_selection(&self) -> (usize, usize) {
        let len = self.state.dom.text_len();
        let start = usize::from(self.state.start).min(len);
        let end = usize::from(self.state.end).min(len);
        if start <= end {
            (start, end)
        } else {
            (end, start)
        }
    }

    pub(crate) fn has_selection(&self) -> bool {
        let (start, end) = self.safe_selection();
        start != end
    }

    pub(crate) fn set_caret(&mut self, position: usize) {
        self.state.start = Location::from(position);
        self.state.end = self.state.start;
    }

    /// Whether edits and formatting commands are accepted right now.
    pub fn can_edit(&self) -> bool {
        self.mounted
            && self.focused
            && !self.config.disabled
            && self.link_flow == LinkFlowState::Idle
    }

    /// The formats active at the caret or across the selection.
    pub fn format_state(&self) -> FormatState {
        let runs = self.state.dom.to_runs();
        let (start, end) = self.safe_selection();
        let mut state = if start == end {
            self.format_state_at_caret(&runs, start)
        } else {
            FormatState::common_to(runs::attributes_in_range(&runs, start, end))
        };
        if matches!(self.link_flow, LinkFlowState::ModalOpen(_)) {
            state.link = true;
        }
        state
    }

    fn format_state_at_caret(&self, runs: &[InlineRun], pos: usize) -> FormatState {
        if let Some((_, attributes)) = self.live_marker(runs) {
            return FormatState::from(attributes);
        }
        let Some(index) = runs::run_index_before(runs, pos) else {
            return FormatState::default();
        };
        let mut state = FormatState::from(&runs[index].attributes);
        // The caret is only inside a link if typing here would extend it
        state.link = pos > 0
            && runs::link_extent(runs, index).is_some_and(|(_, end)| end > pos);
        state
    }

    /// The active marker, if it still sits at a collapsed caret.
    pub(crate) fn live_marker<'a>(
        &self,
        runs: &'a [InlineRun],
    ) -> Option<(MarkerId, &'a AttributeSet)> {
        let id = self.active_marker?;
        let (start, end) = self.safe_selection();
        let (index, offset) = runs::find_marker(runs, id)?;
        (start == end && offset == start).then(|| (id, &runs[index].attributes))
    }

    /// Drop the active marker unless the caret is still on it.
    pub(crate) fn purge_stale_markers(&mut self) {
        let runs = self.state.dom.to_runs();
        if self.active_marker.is_some() && self.live_marker(&runs).is_none() {
            self.purge_markers();
        }
    }

    pub(crate) fn purge_markers(&mut self) {
        if let Some(id) = self.active_marker.take() {
            debug!(marker = %id, "Removing formatting marker");
            self.state.dom.remove_marker(id);
            self.state.dom.assert_invariants();
        }
    }

    pub(crate) fn next_marker_id(&mut self) -> MarkerId {
        let id = MarkerId(self.next_marker_id);
        self.next_marker_id = self.next_marker_id.wrapping_add(1);
        id
    }

    pub(crate) fn next_preview_ticket(&mut self) -> PreviewTicket {
        self.next_preview_ticket += 1;
        PreviewTicket::new(self.next_preview_ticket)
    }

    /// Apply `edit` to the run projection of the document and rebuild the
    /// tree from the result.
    pub(crate) fn edit_runs<R>(
        &mut self,
        edit: impl FnOnce(&mut Vec<InlineRun>) -> R,
    ) -> R {
        let result = self.edit_markers(edit);
        self.revision += 1;
        result
    }

    /// Like [`Self::edit_runs`], for edits that only add, remove or restyle
    /// markers and so leave the visible content alone.
    pub(crate) fn edit_markers<R>(
        &mut self,
        edit: impl FnOnce(&mut Vec<InlineRun>) -> R,
    ) -> R {
        let mut runs = self.state.dom.to_runs();
        let result = edit(&mut runs);
        self.state.dom = Dom::from_runs(runs);
        self.state.dom.assert_invariants();
        result
    }

    /// Swap in a whole new document with the caret at its end.
    pub(crate) fn replace_dom(&mut self, dom: Dom) {
        self.active_marker = None;
        self.state.dom = dom;
        let len = self.state.dom.text_len();
        self.set_caret(len);
        self.revision += 1;
    }

    pub(crate) fn compute_menu_state(&self) -> MenuState {
        MenuState::Update(MenuStateUpdate {
            format_state: self.format_state(),
            action_states: self.action_states(),
            send_enabled: self.send_enabled(),
            placeholder: self.placeholder().map(str::to_owned),
        })
    }

    pub(crate) fn create_update_replace_all(&self) -> ComposerUpdate {
        ComposerUpdate::replace_all(
            self.get_content_as_html(),
            self.state.start,
            self.state.end,
            self.compute_menu_state(),
        )
    }

    pub(crate) fn create_update_selection(&self) -> ComposerUpdate {
        ComposerUpdate::update_selection(
            self.state.start,
            self.state.end,
            self.compute_menu_state(),
        )
    }

    pub(crate) fn create_update_menu_state(&self) -> ComposerUpdate {
        ComposerUpdate::update_menu_state(self.compute_menu_state())
    }
}
