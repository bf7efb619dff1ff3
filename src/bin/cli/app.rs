use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use uuid::Uuid;

use cardbox_lib::models::{CardDeck, Tag};
use cardbox_lib::storage::CardStorage;
use cardbox_lib::store::FileStore;

/// Shared application state for CLI commands
pub struct App {
    pub storage: CardStorage<FileStore>,
}

impl App {
    /// Initialize from the default (or overridden) data directory
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let dir = match data_dir {
            Some(dir) => dir,
            None => FileStore::default_data_dir().context("Failed to get data directory")?,
        };
        let store = FileStore::new(dir).context("Failed to open data directory")?;

        Ok(Self {
            storage: CardStorage::new(store),
        })
    }

    /// Find a deck by name (case-insensitive prefix match)
    pub async fn find_deck(&self, name: &str) -> Result<CardDeck> {
        let name_lower = name.to_lowercase();
        let mut matches: Vec<CardDeck> = self
            .storage
            .list_decks()
            .await
            .into_iter()
            .filter(|deck| deck.name.to_lowercase().starts_with(&name_lower))
            .collect();

        match matches.len() {
            0 => bail!("Deck '{}' not found", name),
            1 => Ok(matches.remove(0)),
            n => bail!("Deck name '{}' is ambiguous ({} matches)", name, n),
        }
    }

    /// Find a tag by its exact (case-insensitive) name
    pub async fn find_tag(&self, name: &str) -> Result<Tag> {
        let name = name.trim().to_lowercase();
        self.storage
            .list_tags()
            .await
            .into_iter()
            .find(|tag| tag.name == name)
            .with_context(|| format!("Tag '{}' not found", name))
    }

    /// Map tag names to ids, failing on the first unknown name
    pub async fn resolve_tags(&self, names: &[String]) -> Result<Vec<Uuid>> {
        let mut ids = Vec::new();
        for name in names {
            ids.push(self.find_tag(name).await?.id);
        }
        Ok(ids)
    }
}
