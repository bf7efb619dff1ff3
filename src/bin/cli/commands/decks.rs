use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use uuid::Uuid;

use cardbox_lib::models::CardDeck;
use cardbox_lib::views::{card_counts, filter_decks};

use crate::app::App;

pub async fn run_list(app: &App, search: Option<&str>, tag_names: &[String]) -> Result<()> {
    let tag_filter = app.resolve_tags(tag_names).await?;
    let decks = app.storage.list_decks().await;
    let cards = app.storage.list_cards().await;
    let tags = app.storage.list_tags().await;

    let counts = card_counts(&cards);
    let tag_names_by_id: HashMap<Uuid, &str> =
        tags.iter().map(|t| (t.id, t.name.as_str())).collect();

    let matched = filter_decks(&decks, search.unwrap_or(""), &tag_filter);
    if matched.is_empty() {
        println!("No decks found.");
        return Ok(());
    }

    let name_width = matched.iter().map(|d| d.name.len()).max().unwrap_or(4).max(4);
    println!("{:<width$} Cards  Tags", "Name", width = name_width + 1);

    for deck in &matched {
        let count = counts.get(&deck.id).copied().unwrap_or(0);
        let badges = deck
            .tag_ids
            .as_deref()
            .unwrap_or(&[])
            .iter()
            // A tag id with no live tag is a dangling reference; skip it
            .filter_map(|id| tag_names_by_id.get(id))
            .map(|name| format!("#{}", name))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{:<width$} {:<6} {}", deck.name, count, badges, width = name_width + 1);
        if let Some(description) = &deck.description {
            println!("{:width$}   {}", "", description, width = name_width);
        }
    }

    println!("\n{} decks", matched.len());
    Ok(())
}

pub async fn run_new(
    app: &App,
    name: String,
    description: Option<String>,
    tag_names: &[String],
) -> Result<()> {
    let tag_ids = app.resolve_tags(tag_names).await?;
    let deck = CardDeck::new(name)
        .with_description(description)
        .with_tags(tag_ids);
    let deck_name = deck.name.clone();

    if !app.storage.save_deck(deck).await? {
        bail!("Deck name must not be empty");
    }
    println!("Created deck '{}'", deck_name);
    Ok(())
}

pub async fn run_edit(
    app: &App,
    deck_name: &str,
    name: Option<String>,
    description: Option<String>,
    tag_names: Option<&[String]>,
) -> Result<()> {
    let mut deck = app.find_deck(deck_name).await?;

    if let Some(new_name) = name {
        deck.name = new_name;
    }
    if let Some(new_description) = description {
        deck.description = if new_description.is_empty() {
            None
        } else {
            Some(new_description)
        };
    }
    if let Some(names) = tag_names {
        let tag_ids = app.resolve_tags(names).await?;
        deck.tag_ids = if tag_ids.is_empty() { None } else { Some(tag_ids) };
    }

    let name = deck.name.clone();
    if !app.storage.save_deck(deck).await? {
        bail!("Deck name must not be empty");
    }
    println!("Updated deck '{}'", name);
    Ok(())
}

pub async fn run_rm(app: &App, deck_name: &str, yes: bool) -> Result<()> {
    let deck = app.find_deck(deck_name).await?;
    let card_count = app.storage.cards_in_deck(deck.id).await.len();

    if !yes {
        print!(
            "Delete deck '{}'? This will also delete {} card{} in this deck. [y/N] ",
            deck.name,
            card_count,
            if card_count == 1 { "" } else { "s" }
        );
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    app.storage.delete_deck(deck.id).await?;
    println!(
        "Deleted deck '{}' and {} card{}",
        deck.name,
        card_count,
        if card_count == 1 { "" } else { "s" }
    );
    Ok(())
}
