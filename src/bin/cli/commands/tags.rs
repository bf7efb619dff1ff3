use anyhow::{bail, Result};

use cardbox_lib::models::TagColor;

use crate::app::App;

pub async fn run_list(app: &App) -> Result<()> {
    let tags = app.storage.list_tags().await;
    if tags.is_empty() {
        println!("No tags found.");
        return Ok(());
    }

    let decks = app.storage.list_decks().await;
    let name_width = tags.iter().map(|t| t.name.len()).max().unwrap_or(3).max(3);

    println!("{:<width$} Color   Decks", "Tag", width = name_width + 1);
    for tag in &tags {
        let deck_count = decks
            .iter()
            .filter(|deck| deck.tag_ids.as_deref().unwrap_or(&[]).contains(&tag.id))
            .count();
        println!(
            "#{:<width$} {:<7} {}",
            tag.name,
            tag.color.name(),
            deck_count,
            width = name_width
        );
    }

    println!("\n{} tags total", tags.len());
    Ok(())
}

pub async fn run_new(app: &App, name: &str, color: TagColor) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Tag name must not be empty");
    }

    match app.storage.create_tag(name, color).await? {
        Some(tag) => {
            println!("Created tag #{} ({})", tag.name, tag.color.name());
            Ok(())
        }
        None => bail!("Tag '{}' already exists", name.trim().to_lowercase()),
    }
}

pub async fn run_rm(app: &App, name: &str) -> Result<()> {
    let tag = app.find_tag(name).await?;
    app.storage.delete_tag(tag.id).await?;
    println!("Deleted tag #{}", tag.name);
    Ok(())
}
