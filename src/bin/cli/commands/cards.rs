use anyhow::{bail, Result};
use uuid::Uuid;

use cardbox_lib::models::Card;

use crate::app::App;

pub async fn run_list(app: &App, deck_name: &str) -> Result<()> {
    let deck = app.find_deck(deck_name).await?;
    let cards = app.storage.cards_in_deck(deck.id).await;

    if cards.is_empty() {
        println!("Deck '{}' has no cards.", deck.name);
        return Ok(());
    }

    for card in &cards {
        println!("{}", card.id);
        println!("  Q: {}", card.front);
        println!("  A: {}", card.back);
    }
    println!(
        "\n{} card{} in '{}'",
        cards.len(),
        if cards.len() == 1 { "" } else { "s" },
        deck.name
    );
    Ok(())
}

pub async fn run_new(app: &App, deck_name: &str, front: String, back: String) -> Result<()> {
    let deck = app.find_deck(deck_name).await?;
    let card = Card::new(deck.id, front, back);

    if !app.storage.save_card(card).await? {
        bail!("Card front and back must not be empty");
    }
    println!("Added card to '{}'", deck.name);
    Ok(())
}

pub async fn run_rm(app: &App, id: Uuid) -> Result<()> {
    if !app.storage.list_cards().await.iter().any(|c| c.id == id) {
        bail!("Card {} not found", id);
    }
    app.storage.delete_card(id).await?;
    println!("Deleted card {}", id);
    Ok(())
}
