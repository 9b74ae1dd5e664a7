//! Interactive editing support
//!
//! Opens $EDITOR for writing multi-line questions and answers.

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::process::Command;

/// Line separating the question from the answer in the editor template
const ANSWER_MARKER: &str = "==== ANSWER (below this line) ====";

/// Instruction lines written at the top of the template
///
/// Only these exact lines are removed again; anything else the user types,
/// including comment-like text, belongs to the card.
const TEMPLATE_HEADER: [&str; 2] = [
    "#### Write the question below and the answer under the ANSWER line.",
    "#### These two lines are removed. Save an empty question to cancel.",
];

/// Open content in the user's preferred editor
///
/// Uses $EDITOR, $VISUAL, or falls back to common editors.
pub fn edit_text(initial_content: &str) -> Result<String> {
    let editor = find_editor()?;

    let temp_dir = env::temp_dir();
    let temp_path = temp_dir.join(format!("flashcards_edit_{}.md", std::process::id()));

    fs::write(&temp_path, initial_content)
        .with_context(|| format!("Failed to create temp file: {:?}", temp_path))?;

    let status = Command::new(&editor)
        .arg(&temp_path)
        .status()
        .with_context(|| format!("Failed to run editor: {}", editor))?;

    if !status.success() {
        let _ = fs::remove_file(&temp_path);
        bail!(
            "Editor '{}' exited with non-zero status. Check that your editor is configured correctly.",
            editor
        );
    }

    let content = fs::read_to_string(&temp_path)
        .with_context(|| format!("Failed to read edited file: {:?}", temp_path))?;

    let _ = fs::remove_file(&temp_path);

    Ok(content)
}

/// Build the editor template for a card
pub fn card_template(question: &str, answer: &str) -> String {
    format!(
        "{header}\n{question}\n{marker}\n{answer}\n",
        header = TEMPLATE_HEADER.join("\n"),
        question = question,
        marker = ANSWER_MARKER,
        answer = answer,
    )
}

/// Split edited template content into question and answer
///
/// The template's own header lines are dropped when still present.
/// Everything before the first marker line is the question; everything
/// after it is the answer. Without a marker the answer is empty. All other
/// lines are kept as written.
pub fn parse_card_template(content: &str) -> (String, String) {
    let mut lines = content.lines().peekable();
    for header in TEMPLATE_HEADER {
        if lines.peek().map(|l| l.trim_end()) == Some(header) {
            lines.next();
        }
    }

    let mut question = Vec::new();
    let mut answer = Vec::new();
    let mut in_answer = false;

    for line in lines {
        if !in_answer && line.trim_end() == ANSWER_MARKER {
            in_answer = true;
            continue;
        }
        if in_answer {
            answer.push(line);
        } else {
            question.push(line);
        }
    }

    (question.join("\n"), answer.join("\n"))
}

/// Find the user's preferred editor
fn find_editor() -> Result<String> {
    if let Ok(editor) = env::var("EDITOR") {
        if !editor.is_empty() {
            return Ok(editor);
        }
    }

    if let Ok(visual) = env::var("VISUAL") {
        if !visual.is_empty() {
            return Ok(visual);
        }
    }

    let common_editors = ["nano", "vim", "vi", "emacs", "code", "notepad"];

    for editor in common_editors {
        if command_exists(editor) {
            return Ok(editor.to_string());
        }
    }

    bail!(
        "No editor found. Set $EDITOR environment variable.\n\
         Example: export EDITOR=nano"
    )
}

/// Check if a command exists in PATH
fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Prompt for confirmation
///
/// Returns true if user confirms, false otherwise.
/// In non-interactive mode (no TTY), returns false.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}
