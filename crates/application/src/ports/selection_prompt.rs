//! Selection prompt port
//!
//! Presents a list of choices to the user and waits for exactly one
//! selection or a cancellation.

use async_trait::async_trait;

/// Which group of a [`PickRequest`] an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickItemKind {
    /// Always shown, independent of typed input.
    Fixed,
    /// Echo of the text the user typed.
    Input,
    /// One of the candidates supplied with the request; subject to filtering.
    Candidate,
}

/// One selectable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItem {
    /// Group this item belongs to.
    pub kind: PickItemKind,
    /// Main text shown for the item. May be empty when `description` says it all.
    pub label: String,
    /// Secondary text.
    pub description: Option<String>,
    /// Heading shown above this item when it starts a group.
    pub group_label: Option<String>,
    /// Whether a separator is drawn above this item.
    pub show_border: bool,
    /// Value produced when this item is selected.
    pub value: String,
}

impl PickItem {
    /// Creates an item whose label is also its value.
    #[must_use]
    pub fn new(kind: PickItemKind, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            kind,
            label: value.clone(),
            description: None,
            group_label: None,
            show_border: false,
            value,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Starts a group with a heading and optional separator.
    #[must_use]
    pub fn with_group(mut self, group_label: impl Into<String>, show_border: bool) -> Self {
        self.group_label = Some(group_label.into());
        self.show_border = show_border;
        self
    }

    /// Text used for display and filtering: the label, or the description if the label is empty.
    #[must_use]
    pub fn display_text(&self) -> &str {
        if self.label.is_empty() {
            self.description.as_deref().unwrap_or_default()
        } else {
            &self.label
        }
    }
}

/// Rule for echoing typed input back as a selectable item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEcho {
    /// Heading shown above the echo item.
    pub group_label: String,
}

/// A request to present choices.
///
/// The request carries the fixed items, the echo rule, and the candidates;
/// the prompt asks [`PickRequest::items_for`] for the list matching the
/// current input every time the input changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickRequest {
    /// Hint shown in the empty input field.
    pub placeholder: String,
    /// Items shown first, regardless of input.
    pub fixed: Vec<PickItem>,
    /// When set, non-blank input is offered as an item after the fixed ones.
    pub input_echo: Option<InputEcho>,
    /// Candidate items, in the order they should be listed.
    pub candidates: Vec<PickItem>,
    /// Whether the prompt should fuzzy-filter candidates by label.
    pub fuzzy_match_label: bool,
}

impl PickRequest {
    /// Creates an empty request with the given placeholder.
    #[must_use]
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            fixed: Vec::new(),
            input_echo: None,
            candidates: Vec::new(),
            fuzzy_match_label: false,
        }
    }

    /// Returns the full item list for the given typed input.
    ///
    /// Order: fixed items, the input echo (only when the trimmed input is
    /// not empty), then candidates. No filtering is applied here.
    #[must_use]
    pub fn items_for(&self, input: &str) -> Vec<PickItem> {
        let mut items = self.fixed.clone();

        let input = input.trim();
        if let Some(echo) = &self.input_echo
            && !input.is_empty()
        {
            items.push(
                PickItem::new(PickItemKind::Input, input).with_group(&echo.group_label, false),
            );
        }

        items.extend(self.candidates.iter().cloned());
        items
    }
}

/// Terminal outcome of a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// The user selected an item; carries its value.
    Selected(String),
    /// The prompt was dismissed or superseded without a selection.
    Cancelled,
}

/// Errors raised by a prompt implementation itself.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// The prompt could not talk to the user.
    #[error("Prompt I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No interactive user is available.
    #[error("No interactive prompt available")]
    Unavailable,
}

/// Port for interactive single-choice prompts.
#[async_trait]
pub trait SelectionPrompt: Send + Sync {
    /// Presents the request and waits for one selection or a cancellation.
    ///
    /// # Errors
    /// Returns an error if the prompt cannot be shown at all.
    async fn pick(&self, request: PickRequest) -> Result<PickOutcome, PromptError>;
}
