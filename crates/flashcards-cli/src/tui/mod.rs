//! Flashcards TUI
//!
//! Terminal user interface for studying and editing cards.
//!
//! ## Layout
//!
//! - Left: card list, each marked with the face currently up
//! - Right: the selected card, showing only its visible face
//!
//! ## Keys
//!
//! - j/k or ↑/↓: Move selection, g/G: first/last
//! - space or Enter: Flip card, r: Reveal answer
//! - a: Add card, e: Edit card (both through $EDITOR)
//! - d: Delete card, c: Delete all cards (both confirmed with y)
//! - x: Export to file, i: Import from a path typed at the prompt
//! - ?: Help, q: Quit

mod app;
mod ui;

use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::{debug, error};

use flashcards_core::{CardError, Config, FileStore, Repository};

use app::{App, EditorTask};

use crate::editor;
use crate::logging;

type FileRepository = Repository<FileStore>;

/// Run the TUI application
pub fn run(config: &Config) -> Result<()> {
    logging::init_tui_logging(config);

    let repo = Repository::open_with_config(config);
    let export_dir = std::env::current_dir().unwrap_or_else(|_| config.data_dir.clone());
    let mut app = App::new(&repo, export_dir)?;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_app(&mut terminal, &mut app, &repo);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    repo: &FileRepository,
) -> Result<()> {
    loop {
        app.check_status_timeout();
        terminal.draw(|frame| ui::draw(frame, app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Only handle key press events (not release)
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // If error modal is showing, any key dismisses it
        if app.has_error() {
            app.clear_error();
            continue;
        }

        // If help is showing, any key dismisses it
        if app.show_help {
            app.show_help = false;
            continue;
        }

        if app.pending_confirm.is_some() {
            let accepted = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'));
            if let Err(e) = app.confirm(repo, accepted) {
                report_error(app, "Action failed", &e);
            }
            continue;
        }

        if app.is_importing() {
            handle_import_prompt(app, repo, key.code);
            continue;
        }

        if let Some(task) = handle_normal_mode(app, repo, key.code, key.modifiers) {
            run_editor(terminal, app, repo, task)?;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle key events in normal mode
///
/// Returns an editor task when the key asks for one.
fn handle_normal_mode(
    app: &mut App,
    repo: &FileRepository,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> Option<EditorTask> {
    match code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('g') | KeyCode::Home => app.move_to_first(),
        KeyCode::Char('G') | KeyCode::End => app.move_to_last(),

        KeyCode::Char(' ') | KeyCode::Enter => app.flip_current(),
        KeyCode::Char('r') => app.reveal_current(),

        KeyCode::Char('a') => return Some(EditorTask::Add),
        KeyCode::Char('e') => match app.edit_task() {
            Some(task) => return Some(task),
            None => app.set_status("No card selected"),
        },

        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('c') => app.request_clear(),

        KeyCode::Char('x') => {
            if let Err(e) = app.export(repo) {
                report_error(app, "Export failed", &e);
            }
        }

        KeyCode::Char('i') => app.start_import(),

        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }

    None
}

/// Handle key events while the import path is being typed
fn handle_import_prompt(app: &mut App, repo: &FileRepository, code: KeyCode) {
    match code {
        KeyCode::Enter => {
            if let Err(e) = app.submit_import(repo) {
                report_error(app, "Import failed", &e);
            }
        }
        KeyCode::Esc => app.cancel_import(),
        KeyCode::Backspace => app.import_backspace(),
        KeyCode::Char(c) => app.import_push(c),
        _ => {}
    }
}

/// Leave the TUI, open $EDITOR on the card, and apply the result
fn run_editor<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    repo: &FileRepository,
    task: EditorTask,
) -> Result<()> {
    let template = match &task {
        EditorTask::Add => editor::card_template("", ""),
        EditorTask::Edit {
            question, answer, ..
        } => editor::card_template(question, answer),
    };

    // Exit TUI temporarily for editor
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(cursor::Show)?;

    let edited = editor::edit_text(&template);

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    terminal.clear()?;

    let content = match edited {
        Ok(content) => content,
        Err(e) => {
            app.set_error(format!("Editor failed: {}", e));
            return Ok(());
        }
    };

    let (question, answer) = editor::parse_card_template(&content);
    if question.trim().is_empty() && task == EditorTask::Add {
        app.set_status("Add cancelled (empty question)");
        return Ok(());
    }

    debug!("Applying editor result for {:?}", task);
    if let Err(e) = app.apply_edit(repo, &task, &question, &answer) {
        report_error(app, "Save failed", &e);
    }
    Ok(())
}

/// Show a failed action to the user
///
/// Input mistakes go to the status bar. Anything else opens the error modal,
/// with a hint when the storage error is recoverable.
fn report_error(app: &mut App, context: &str, error: &anyhow::Error) {
    match error.downcast_ref::<CardError>() {
        Some(e) if e.is_user_error() => app.set_status(e.to_string()),
        Some(CardError::Storage(storage)) if storage.is_recoverable() => {
            let hint = storage.recovery_suggestion().unwrap_or_default();
            app.set_error(format!("{}: {}\n\n{}", context, storage, hint));
        }
        Some(CardError::Storage(storage)) => {
            error!("{}: {:?}", context, storage);
            app.set_error(format!("{}: {}", context, storage));
        }
        _ => app.set_error(format!("{}: {:#}", context, error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashcards_core::{FileOp, MemoryStore, StorageError, Store};
    use std::io;
    use std::path::PathBuf;

    fn app() -> App {
        let repo = Repository::new(Store::new(MemoryStore::new(), "cards"));
        App::new(&repo, ".").unwrap()
    }

    #[test]
    fn test_user_errors_go_to_status_bar() {
        let mut app = app();
        report_error(&mut app, "Save failed", &CardError::EmptyQuestion.into());

        assert!(!app.has_error());
        assert_eq!(app.status_message.as_deref(), Some("Please type a question"));
    }

    #[test]
    fn test_storage_errors_open_modal_with_hint() {
        let mut app = app();
        let error = CardError::Storage(StorageError::InvalidKey("a/b".into()));
        report_error(&mut app, "Save failed", &error.into());

        let message = app.error_message.unwrap();
        assert!(message.starts_with("Save failed"));
        assert!(message.contains("storage_key"));
    }

    #[test]
    fn test_unrecoverable_storage_errors_open_modal_without_hint() {
        let mut app = app();
        let storage = StorageError::io(
            FileOp::Read,
            io::Error::new(io::ErrorKind::InvalidData, "bad bytes"),
            PathBuf::from("/data/cards.json"),
        );
        assert!(!storage.is_recoverable());
        report_error(&mut app, "Load failed", &CardError::Storage(storage).into());

        let message = app.error_message.unwrap();
        assert!(message.starts_with("Load failed: Could not read"));
        assert!(!message.contains("\n\n"));
    }

    #[test]
    fn test_import_file_errors_open_modal() {
        let mut app = app();
        let repo = Repository::new(Store::new(MemoryStore::new(), "cards"));
        app.import_input = Some("/definitely/not/here.json".to_string());

        let err = app.submit_import(&repo).unwrap_err();
        report_error(&mut app, "Import failed", &err);

        let message = app.error_message.unwrap();
        assert!(message.starts_with("Import failed: Failed to read /definitely/not/here.json"));
    }

    #[test]
    fn test_other_errors_open_modal() {
        let mut app = app();
        report_error(&mut app, "Export failed", &anyhow::anyhow!("disk gone"));

        assert_eq!(
            app.error_message.as_deref(),
            Some("Export failed: disk gone")
        );
    }
}
