//! Line-oriented terminal selection prompt
//!
//! Renders the choice list, then reads one line at a time:
//! - a listed number selects that item;
//! - an empty line or end of input cancels;
//! - any other text becomes the typed input and the list is re-rendered.

use async_trait::async_trait;
use stencil_application::ports::{
    PickItem, PickItemKind, PickOutcome, PickRequest, PromptError, SelectionPrompt,
};
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stderr, Stdin,
};
use tokio::sync::Mutex;
use tracing::debug;

/// Returns true if every character of `pattern` appears in `text`, in order.
///
/// Comparison ignores case.
#[must_use]
pub fn fuzzy_matches(pattern: &str, text: &str) -> bool {
    let mut haystack = text.chars().flat_map(char::to_lowercase);
    pattern
        .chars()
        .flat_map(char::to_lowercase)
        .all(|needle| haystack.any(|c| c == needle))
}

/// The items to show for `input`: candidates are filtered by the typed text,
/// fixed items and the input echo are always kept.
#[must_use]
pub fn visible_items(request: &PickRequest, input: &str) -> Vec<PickItem> {
    let pattern = input.trim();
    let pattern_lower = pattern.to_lowercase();
    request
        .items_for(input)
        .into_iter()
        .filter(|item| {
            item.kind != PickItemKind::Candidate
                || pattern.is_empty()
                || if request.fuzzy_match_label {
                    fuzzy_matches(pattern, item.display_text())
                } else {
                    item.display_text().to_lowercase().contains(&pattern_lower)
                }
        })
        .collect()
}

struct Terminal<R, W> {
    reader: R,
    writer: W,
}

/// [`SelectionPrompt`] over any line reader and writer.
///
/// Prompts are serialized: a second `pick` waits until the first one
/// finished.
pub struct TerminalSelectionPrompt<R, W> {
    terminal: Mutex<Terminal<R, W>>,
}

impl TerminalSelectionPrompt<BufReader<Stdin>, Stderr> {
    /// Prompt reading stdin and drawing on stderr.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stderr())
    }
}

impl<R, W> TerminalSelectionPrompt<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Creates a prompt over the given reader and writer.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            terminal: Mutex::new(Terminal { reader, writer }),
        }
    }

    /// Returns the reader and writer.
    pub fn into_inner(self) -> (R, W) {
        let terminal = self.terminal.into_inner();
        (terminal.reader, terminal.writer)
    }

    async fn render(
        writer: &mut W,
        request: &PickRequest,
        input: &str,
        items: &[PickItem],
    ) -> std::io::Result<()> {
        let mut out = String::new();
        if input.trim().is_empty() {
            out.push_str(&format!("{}\n", request.placeholder));
        } else {
            out.push_str(&format!("> {input}\n"));
        }

        for (index, item) in items.iter().enumerate() {
            if let Some(group) = &item.group_label {
                if item.show_border {
                    out.push_str("  ----\n");
                }
                out.push_str(&format!("  {group}\n"));
            }
            let line = match (&item.description, item.label.is_empty()) {
                (Some(description), false) => format!("{}  {description}", item.label),
                _ => item.display_text().to_string(),
            };
            out.push_str(&format!("  {:>2}) {line}\n", index + 1));
        }
        out.push_str("Number to select, text to filter, empty line to cancel: ");

        writer.write_all(out.as_bytes()).await?;
        writer.flush().await
    }
}

#[async_trait]
impl<R, W> SelectionPrompt for TerminalSelectionPrompt<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn pick(&self, request: PickRequest) -> Result<PickOutcome, PromptError> {
        let mut terminal = self.terminal.lock().await;
        let Terminal { reader, writer } = &mut *terminal;

        let mut input = String::new();
        loop {
            let items = visible_items(&request, &input);
            Self::render(writer, &request, &input, &items).await?;

            let mut line = String::new();
            if reader.read_line(&mut line).await? == 0 {
                debug!("prompt input closed");
                return Ok(PickOutcome::Cancelled);
            }
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() {
                return Ok(PickOutcome::Cancelled);
            }

            let chosen = line
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|number| number.checked_sub(1))
                .and_then(|index| items.get(index));
            if let Some(item) = chosen {
                return Ok(PickOutcome::Selected(item.value.clone()));
            }

            line.clone_into(&mut input);
        }
    }
}
