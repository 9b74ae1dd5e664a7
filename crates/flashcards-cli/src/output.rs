//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use flashcards_core::{Card, CardView, DeckView, Face};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a full card (both sides)
    pub fn print_card(&self, card: &Card) {
        match self.format {
            OutputFormat::Human => {
                println!("ID: {}", card.id);
                println!();
                println!("── Question ──");
                println!("{}", card.question);
                println!();
                println!("── Answer ──");
                if card.answer.is_empty() {
                    println!("(no answer)");
                } else {
                    println!("{}", card.answer);
                }
            }
            OutputFormat::Json => {
                println!("{}", to_json(card));
            }
            OutputFormat::Quiet => {
                println!("{}", card.id);
            }
        }
    }

    /// Print the side of a card that is facing up
    pub fn print_face(&self, view: &CardView) {
        match self.format {
            OutputFormat::Human => {
                let label = match view.face {
                    Face::Question => "Question",
                    Face::Answer => "Answer",
                };
                println!("── {} ({}) ──", label, view.id);
                let text = view.visible_text();
                if text.is_empty() {
                    println!("(empty)");
                } else {
                    println!("{}", text);
                }
                if view.face == Face::Question {
                    println!();
                    println!("Run `flashcards flip {}` to reveal the answer.", view.id);
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "id": view.id,
                        "face": view.face,
                        "text": view.visible_text(),
                    })
                );
            }
            OutputFormat::Quiet => {
                println!("{}", view.visible_text());
            }
        }
    }

    /// Print the deck, or the empty-state message when there are no cards
    pub fn print_deck(&self, deck: &DeckView) {
        match self.format {
            OutputFormat::Human => {
                if deck.is_empty() {
                    println!("No flashcards yet. Add one with `flashcards add`.");
                    return;
                }
                for card in &deck.cards {
                    let marker = if card.is_flipped() { "A" } else { "Q" };
                    println!(
                        "{} | {} | {}",
                        card.id,
                        marker,
                        truncate_line(card.visible_text(), 60)
                    );
                }
                println!("\n{} card(s)", deck.len());
            }
            OutputFormat::Json => {
                println!("{}", to_json(&deck.cards));
            }
            OutputFormat::Quiet => {
                for card in &deck.cards {
                    println!("{}", card.id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Pretty JSON for values whose serialization cannot fail
fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Truncate to first line and max length
pub fn truncate_line(s: &str, max_len: usize) -> String {
    let trimmed = s.trim_start();
    let first_line = trimmed.lines().next().unwrap_or("");
    let more_lines = trimmed.lines().nth(1).is_some();
    let line = truncate(first_line, max_len);
    if more_lines && !line.ends_with("...") {
        format!("{} …", line)
    } else {
        line
    }
}
