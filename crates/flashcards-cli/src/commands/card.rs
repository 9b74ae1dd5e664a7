//! Card command handlers

use anyhow::{bail, Context, Result};

use flashcards_core::{project, CardId, FlipState, KeyValueStore, Repository};

use crate::editor::{card_template, confirm, edit_text, parse_card_template};
use crate::output::Output;

/// List all cards, question side up
pub fn list<S: KeyValueStore>(repo: &Repository<S>, output: &Output) -> Result<()> {
    let cards = repo.list().context("Failed to load cards")?;
    let deck = project(&cards, &mut FlipState::new());
    output.print_deck(&deck);
    Ok(())
}

/// Show both sides of a card
pub fn show<S: KeyValueStore>(repo: &Repository<S>, id: String, output: &Output) -> Result<()> {
    let card_id = resolve_id(repo, &id)?;
    let card = repo.get(card_id)?;
    output.print_card(&card);
    Ok(())
}

/// Show one side of a card; `flip` turns it to the answer
pub fn face<S: KeyValueStore>(
    repo: &Repository<S>,
    id: String,
    flip: bool,
    output: &Output,
) -> Result<()> {
    let card_id = resolve_id(repo, &id)?;
    let card = repo.get(card_id)?;

    let mut flips = FlipState::new();
    if flip {
        flips.reveal(card.id);
    }
    let deck = project(std::slice::from_ref(&card), &mut flips);
    if let Some(view) = deck.get(0) {
        output.print_face(view);
    }
    Ok(())
}

/// Create a new card
///
/// Opens the editor when no question is given on the command line.
pub fn add<S: KeyValueStore>(
    repo: &Repository<S>,
    question: Option<String>,
    answer: Option<String>,
    output: &Output,
) -> Result<()> {
    let (question, answer) = match question {
        Some(q) => (q, answer.unwrap_or_default()),
        None => {
            let initial = card_template("", answer.as_deref().unwrap_or(""));
            let edited = edit_text(&initial).context("Failed to edit card")?;
            parse_card_template(&edited)
        }
    };

    let card = repo.add(&question, &answer)?;

    output.success(&format!("Created card: {}", card.id));
    output.print_card(&card);
    Ok(())
}

/// Edit a card's question and answer
///
/// Fields not given on the command line keep their current value. With no
/// fields given, the editor opens prefilled with the card.
pub fn edit<S: KeyValueStore>(
    repo: &Repository<S>,
    id: String,
    question: Option<String>,
    answer: Option<String>,
    output: &Output,
) -> Result<()> {
    let card_id = resolve_id(repo, &id)?;
    let card = repo.get(card_id)?;

    let (question, answer) = if question.is_none() && answer.is_none() {
        let edited = edit_text(&card_template(&card.question, &card.answer))
            .context("Failed to edit card")?;
        parse_card_template(&edited)
    } else {
        (
            question.unwrap_or(card.question),
            answer.unwrap_or(card.answer),
        )
    };

    let updated = repo.update(card_id, &question, &answer)?;

    output.success(&format!("Updated card: {}", updated.id));
    Ok(())
}

/// Delete a card
pub fn delete<S: KeyValueStore>(
    repo: &Repository<S>,
    id: String,
    yes: bool,
    output: &Output,
) -> Result<()> {
    let card_id = resolve_id(repo, &id)?;
    let card = repo.get(card_id)?;

    if output.should_prompt() && !yes {
        println!(
            "Delete card: {} - {}",
            card.id,
            crate::output::truncate_line(&card.question, 50)
        );
        if !confirm("Delete this card?")? {
            output.message("Cancelled.");
            return Ok(());
        }
    }

    let removed = repo.remove(card_id).context("Failed to delete card")?;

    if removed > 1 {
        output.success(&format!("Deleted {} cards with id {}", removed, card_id));
    } else {
        output.success(&format!("Deleted card: {}", card_id));
    }
    Ok(())
}

/// Delete every card; the starter cards come back on next load
pub fn clear<S: KeyValueStore>(repo: &Repository<S>, yes: bool, output: &Output) -> Result<()> {
    if output.should_prompt() && !yes && !confirm("Delete all flashcards?")? {
        output.message("Cancelled.");
        return Ok(());
    }

    repo.clear().context("Failed to clear cards")?;
    output.success("Deleted all flashcards");
    Ok(())
}

/// Resolve a card ID (full id or unique trailing digits)
///
/// Ids are timestamps and share their leading digits, so the unambiguous
/// part is at the end.
pub fn resolve_id<S: KeyValueStore>(repo: &Repository<S>, id: &str) -> Result<CardId> {
    let id = id.trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit() || c == '-') {
        bail!("Invalid card ID: '{}'", id);
    }

    let cards = repo.list().context("Failed to load cards")?;

    // Exact match first
    if let Ok(exact) = id.parse::<CardId>() {
        if cards.iter().any(|c| c.id == exact) {
            return Ok(exact);
        }
    }

    let mut matches: Vec<CardId> = cards
        .iter()
        .map(|c| c.id)
        .filter(|card_id| card_id.to_string().ends_with(id))
        .collect();
    matches.sort_unstable();
    matches.dedup();

    match matches.len() {
        0 => bail!("No card found matching: {}", id),
        1 => Ok(matches[0]),
        _ => {
            eprintln!("Multiple cards match '{}':", id);
            for card in cards.iter().filter(|c| matches.contains(&c.id)) {
                eprintln!(
                    "  {} - {}",
                    card.id,
                    crate::output::truncate_line(&card.question, 50)
                );
            }
            bail!("Ambiguous ID. Please provide more digits.");
        }
    }
}
