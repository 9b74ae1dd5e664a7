//! Application state and logic

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;

use flashcards_core::{
    project, CardId, CardView, DeckView, Face, FlipState, KeyValueStore, Repository,
    EXPORT_FILE_NAME,
};

/// How long a status message stays visible
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Destructive action waiting for a `y` keypress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingConfirm {
    /// Delete the card with this id
    Delete(CardId),
    /// Delete every card
    ClearAll,
}

/// Card the editor should open with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorTask {
    /// A new, empty card
    Add,
    /// An existing card, prefilled
    Edit {
        id: CardId,
        question: String,
        answer: String,
    },
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current projection of the collection
    pub deck: DeckView,
    /// Which cards are showing their answer
    pub flips: FlipState,
    /// Currently selected card index
    pub index: usize,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// When the status message was set (for auto-dismiss)
    pub status_message_time: Option<Instant>,
    /// Error shown in a modal until a key is pressed
    pub error_message: Option<String>,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Destructive action awaiting confirmation
    pub pending_confirm: Option<PendingConfirm>,
    /// Where `x` writes the export
    pub export_dir: PathBuf,
    /// Path being typed for `i`, while the import prompt is open
    pub import_input: Option<String>,
}

impl App {
    /// Create a new app with data from the repository
    pub fn new<S: KeyValueStore>(
        repo: &Repository<S>,
        export_dir: impl Into<PathBuf>,
    ) -> anyhow::Result<Self> {
        let mut app = Self {
            should_quit: false,
            deck: DeckView::default(),
            flips: FlipState::new(),
            index: 0,
            status_message: None,
            status_message_time: None,
            error_message: None,
            show_help: false,
            pending_confirm: None,
            export_dir: export_dir.into(),
            import_input: None,
        };
        app.refresh(repo)?;
        Ok(app)
    }

    /// Rebuild the deck from the repository, keeping the selection in bounds
    pub fn refresh<S: KeyValueStore>(&mut self, repo: &Repository<S>) -> anyhow::Result<()> {
        let cards = repo.list()?;
        self.deck = project(&cards, &mut self.flips);
        self.clamp_index();
        Ok(())
    }

    fn clamp_index(&mut self) {
        if self.deck.is_empty() {
            self.index = 0;
        } else if self.index >= self.deck.len() {
            self.index = self.deck.len() - 1;
        }
    }

    /// Set a status message (will auto-dismiss after 3 seconds)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Check and clear expired status message
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() >= STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Get currently selected card
    pub fn current_card(&self) -> Option<&CardView> {
        self.deck.get(self.index)
    }

    /// Move selection up
    pub fn move_up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Move selection down
    pub fn move_down(&mut self) {
        if self.index + 1 < self.deck.len() {
            self.index += 1;
        }
    }

    /// Jump to first card
    pub fn move_to_first(&mut self) {
        self.index = 0;
    }

    /// Jump to last card
    pub fn move_to_last(&mut self) {
        self.index = self.deck.len().saturating_sub(1);
    }

    /// Turn the selected card over
    pub fn flip_current(&mut self) {
        if let Some(id) = self.current_card().map(|c| c.id) {
            self.flips.toggle(id);
            self.reproject();
        }
    }

    /// Show the selected card's answer
    pub fn reveal_current(&mut self) {
        if let Some(id) = self.current_card().map(|c| c.id) {
            self.flips.reveal(id);
            self.reproject();
        }
    }

    /// Rebuild face state without touching storage
    fn reproject(&mut self) {
        for card in &mut self.deck.cards {
            card.face = if self.flips.is_flipped(card.id) {
                Face::Answer
            } else {
                Face::Question
            };
        }
    }

    /// Editor task for the selected card, if any
    pub fn edit_task(&self) -> Option<EditorTask> {
        self.current_card().map(|card| EditorTask::Edit {
            id: card.id,
            question: card.question.clone(),
            answer: card.answer.clone(),
        })
    }

    /// Apply text returned from the editor
    pub fn apply_edit<S: KeyValueStore>(
        &mut self,
        repo: &Repository<S>,
        task: &EditorTask,
        question: &str,
        answer: &str,
    ) -> anyhow::Result<()> {
        match task {
            EditorTask::Add => {
                let card = repo.add(question, answer)?;
                self.refresh(repo)?;
                self.index = self.deck.position(card.id).unwrap_or(0);
                self.set_status("Card added");
            }
            EditorTask::Edit { id, .. } => {
                repo.update(*id, question, answer)?;
                self.refresh(repo)?;
                self.set_status("Card updated");
            }
        }
        Ok(())
    }

    /// Ask before deleting the selected card
    pub fn request_delete(&mut self) {
        match self.current_card() {
            Some(card) => {
                self.pending_confirm = Some(PendingConfirm::Delete(card.id));
            }
            None => self.set_status("No card selected"),
        }
    }

    /// Ask before deleting everything
    pub fn request_clear(&mut self) {
        self.pending_confirm = Some(PendingConfirm::ClearAll);
    }

    /// Answer the pending confirmation
    pub fn confirm<S: KeyValueStore>(
        &mut self,
        repo: &Repository<S>,
        accepted: bool,
    ) -> anyhow::Result<()> {
        let Some(pending) = self.pending_confirm.take() else {
            return Ok(());
        };
        if !accepted {
            self.set_status("Cancelled");
            return Ok(());
        }

        match pending {
            PendingConfirm::Delete(id) => {
                repo.remove(id)?;
                self.set_status("Card deleted");
            }
            PendingConfirm::ClearAll => {
                repo.clear()?;
                self.flips.reset();
                self.index = 0;
                self.set_status("All cards deleted");
            }
        }
        self.refresh(repo)
    }

    /// Write the export document next to the data
    pub fn export<S: KeyValueStore>(&mut self, repo: &Repository<S>) -> anyhow::Result<PathBuf> {
        let path = export_path(&self.export_dir);
        let document = repo.export_all()?;
        std::fs::write(&path, document)?;
        self.set_status(format!("Exported to {}", path.display()));
        Ok(path)
    }

    /// Open the import prompt, prefilled with the default export file
    pub fn start_import(&mut self) {
        let default = export_path(&self.export_dir);
        self.import_input = Some(default.display().to_string());
    }

    pub fn is_importing(&self) -> bool {
        self.import_input.is_some()
    }

    pub fn import_push(&mut self, c: char) {
        if let Some(input) = &mut self.import_input {
            input.push(c);
        }
    }

    pub fn import_backspace(&mut self) {
        if let Some(input) = &mut self.import_input {
            input.pop();
        }
    }

    pub fn cancel_import(&mut self) {
        self.import_input = None;
        self.set_status("Import cancelled");
    }

    /// Import the file named in the prompt, replacing every card
    ///
    /// The prompt closes whether or not the import succeeds.
    pub fn submit_import<S: KeyValueStore>(
        &mut self,
        repo: &Repository<S>,
    ) -> anyhow::Result<()> {
        let Some(input) = self.import_input.take() else {
            return Ok(());
        };
        let path = input.trim();
        if path.is_empty() {
            self.set_status("Import cancelled (no path)");
            return Ok(());
        }
        self.import_from(repo, Path::new(path))
    }

    /// Replace the collection with the document at `path`
    pub fn import_from<S: KeyValueStore>(
        &mut self,
        repo: &Repository<S>,
        path: &Path,
    ) -> anyhow::Result<()> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let report = repo.import_bytes(&bytes)?;
        self.flips.reset();
        self.index = 0;
        self.refresh(repo)?;
        self.set_status(format!(
            "Imported {} card(s) from {}",
            report.imported,
            path.display()
        ));
        Ok(())
    }
}

fn export_path(dir: &Path) -> PathBuf {
    dir.join(EXPORT_FILE_NAME)
}
