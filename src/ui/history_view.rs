//! History panel rendering.
//!
//! [`history_html`] turns computed history blocks into the markup injected
//! into the page's history container. [`HistoryPanel`] tracks whether that
//! container is shown.

use crate::managers::history_manager::{HistoryBlock, HistoryManagerTrait, RenderedHistory};

/// Markup shown when no diagnoses have been stored.
pub const EMPTY_HISTORY_HTML: &str = "<p>No previous diagnoses found.</p>";

/// Write-only sink for rendered history markup (the page's history container).
pub trait HistoryView {
    fn show(&mut self, markup: &str);
}

/// A view that keeps the last markup written to it.
#[derive(Debug, Default, Clone)]
pub struct BufferedView {
    pub markup: String,
    pub writes: usize,
}

impl HistoryView for BufferedView {
    fn show(&mut self, markup: &str) {
        self.markup = markup.to_string();
        self.writes += 1;
    }
}

fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn block_html(block: &HistoryBlock) -> String {
    // recommendation carries service-provided links, so it goes in as markup
    format!(
        "<div class=\"history-entry\">\
         <p><strong>Date:</strong> {}</p>\
         <img src=\"{}\" width=\"150\" />\
         <p><strong>Disease:</strong> {}</p>\
         <p><strong>Confidence:</strong> {}</p>\
         <p><strong>Recommendation:</strong> {}</p>\
         <hr>\
         </div>",
        html_escape(&block.date),
        html_escape(&block.image),
        html_escape(&block.disease),
        html_escape(&block.confidence),
        block.recommendation,
    )
}

/// Renders the history as page markup, one `history-entry` div per block.
pub fn history_html(rendered: &RenderedHistory) -> String {
    match rendered {
        RenderedHistory::Empty => EMPTY_HISTORY_HTML.to_string(),
        RenderedHistory::Entries(blocks) => blocks.iter().map(block_html).collect(),
    }
}

/// Renders the current history and writes it into `view`.
pub fn refresh<H: HistoryManagerTrait, V: HistoryView>(history: &H, view: &mut V) {
    view.show(&history_html(&history.render()));
}

/// Visible/hidden state of the history container. Starts hidden.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HistoryPanel {
    visible: bool,
}

impl HistoryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Flips visibility. When becoming visible the latest persisted history
    /// is rendered into `view` first. Returns the new state.
    pub fn toggle_visibility<H: HistoryManagerTrait, V: HistoryView>(
        &mut self,
        history: &H,
        view: &mut V,
    ) -> bool {
        if !self.visible {
            refresh(history, view);
        }
        self.visible = !self.visible;
        tracing::debug!(visible = self.visible, "History panel toggled");
        self.visible
    }
}
