use std::io::{self, BufRead, Write};

use anyhow::Result;
use rand::thread_rng;

use cardbox_lib::session::Session;

use crate::app::App;

pub async fn run(app: &App, deck_name: &str) -> Result<()> {
    let deck = app.find_deck(deck_name).await?;
    let cards = app.storage.cards_in_deck(deck.id).await;

    let mut session = Session::new();
    session.toggle_deck(deck.id);
    if !session.start_practice(cards, &mut thread_rng()) {
        println!("Nothing to practice: deck '{}' has no cards.", deck.name);
        return Ok(());
    }
    let Some(practice) = session.practice_mut() else {
        return Ok(());
    };

    println!("Practicing '{}': {} cards, shuffled.", deck.name, practice.len());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let card = practice.current();
        let (side, text) = if practice.showing_back() {
            ("Answer", &card.back)
        } else {
            ("Question", &card.front)
        };
        println!();
        println!("[{}/{}] {}: {}", practice.cursor() + 1, practice.len(), side, text);
        print!("(enter = flip, n = next, p = previous, q = quit) > ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        match line?.trim() {
            "" | "f" => practice.flip(),
            "n" => {
                if !practice.next() {
                    println!("Already at the last card.");
                }
            }
            "p" => {
                if !practice.previous() {
                    println!("Already at the first card.");
                }
            }
            "q" => break,
            other => println!("Unknown command '{}'", other),
        }
    }

    println!("Practice over.");
    Ok(())
}
