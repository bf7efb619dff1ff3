//! Storage operations for cards, decks and tags
//!
//! Each entity type lives in the key-value store as one JSON array:
//! ```text
//! cards  # Array of Card
//! decks  # Array of CardDeck
//! tags   # Array of Tag
//! ```
//! Every mutation is a whole-collection read-modify-write. Cascades
//! touch two collections with independent writes and are not atomic; a
//! failure between the writes can leave dangling references, which
//! readers treat as absent rather than as errors.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Card, CardDeck, Tag, TagColor};
use crate::store::{KeyValueStore, Result};

const CARDS_KEY: &str = "cards";
const DECKS_KEY: &str = "decks";
const TAGS_KEY: &str = "tags";

/// Repository over the three entity collections
pub struct CardStorage<S> {
    store: S,
}

impl<S: KeyValueStore> CardStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read a whole collection. A missing key, an unreadable backend or
    /// a corrupt value all degrade to an empty list; the failure is
    /// logged and never surfaced to the caller.
    async fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let value = match self.store.get(key).await {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Failed to read '{}' collection: {}", key, err);
                return Vec::new();
            }
        };

        match value {
            None => Vec::new(),
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                log::warn!("Discarding corrupt '{}' collection: {}", key, err);
                Vec::new()
            }),
        }
    }

    async fn write_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let json = serde_json::to_string(items)?;
        self.store.set(key, json).await
    }

    // ==================== Card Operations ====================

    /// List all cards across all decks
    pub async fn list_cards(&self) -> Vec<Card> {
        self.read_collection(CARDS_KEY).await
    }

    /// Insert or update a card.
    ///
    /// A front or back that is empty after trimming rejects the save as
    /// a no-op: `Ok(false)` comes back and storage is untouched. An
    /// existing id is replaced in place keeping its stored `created_at`;
    /// a new card gets both timestamps stamped fresh, whatever the
    /// caller supplied.
    pub async fn save_card(&self, card: Card) -> Result<bool> {
        if card.front.trim().is_empty() || card.back.trim().is_empty() {
            return Ok(false);
        }

        let now = Utc::now();
        let mut cards = self.list_cards().await;
        match cards.iter_mut().find(|c| c.id == card.id) {
            Some(existing) => {
                let created_at = existing.created_at;
                *existing = Card {
                    created_at,
                    updated_at: now,
                    ..card
                };
            }
            None => cards.push(Card {
                created_at: now,
                updated_at: now,
                ..card
            }),
        }

        self.write_collection(CARDS_KEY, &cards).await?;
        Ok(true)
    }

    /// Delete a single card
    pub async fn delete_card(&self, id: Uuid) -> Result<()> {
        let cards: Vec<Card> = self
            .list_cards()
            .await
            .into_iter()
            .filter(|c| c.id != id)
            .collect();
        self.write_collection(CARDS_KEY, &cards).await
    }

    /// Cards belonging to one deck; a derived read with no side effects
    pub async fn cards_in_deck(&self, deck_id: Uuid) -> Vec<Card> {
        self.list_cards()
            .await
            .into_iter()
            .filter(|c| c.deck_id == deck_id)
            .collect()
    }

    // ==================== Deck Operations ====================

    /// List all decks
    pub async fn list_decks(&self) -> Vec<CardDeck> {
        self.read_collection(DECKS_KEY).await
    }

    /// Insert or update a deck.
    ///
    /// A name that is empty after trimming rejects the save as a no-op
    /// (`Ok(false)`, nothing written). An empty tag list is normalized
    /// to absent before the write, so persisted decks never carry an
    /// empty `tagIds`.
    pub async fn save_deck(&self, mut deck: CardDeck) -> Result<bool> {
        if deck.name.trim().is_empty() {
            return Ok(false);
        }
        if deck.tag_ids.as_ref().is_some_and(|tags| tags.is_empty()) {
            deck.tag_ids = None;
        }

        let now = Utc::now();
        let mut decks = self.list_decks().await;
        match decks.iter_mut().find(|d| d.id == deck.id) {
            Some(existing) => {
                let created_at = existing.created_at;
                *existing = CardDeck {
                    created_at,
                    updated_at: now,
                    ..deck
                };
            }
            None => decks.push(CardDeck {
                created_at: now,
                updated_at: now,
                ..deck
            }),
        }

        self.write_collection(DECKS_KEY, &decks).await?;
        Ok(true)
    }

    /// Delete a deck and every card that belongs to it.
    ///
    /// The deck record goes first, then the card sweep; a failure
    /// between the two writes leaves orphaned cards behind, which
    /// readers treat as absent.
    pub async fn delete_deck(&self, id: Uuid) -> Result<()> {
        let decks: Vec<CardDeck> = self
            .list_decks()
            .await
            .into_iter()
            .filter(|d| d.id != id)
            .collect();
        self.write_collection(DECKS_KEY, &decks).await?;

        let cards: Vec<Card> = self
            .list_cards()
            .await
            .into_iter()
            .filter(|c| c.deck_id != id)
            .collect();
        self.write_collection(CARDS_KEY, &cards).await
    }

    // ==================== Tag Operations ====================

    /// List all tags
    pub async fn list_tags(&self) -> Vec<Tag> {
        self.read_collection(TAGS_KEY).await
    }

    /// Insert or update a tag.
    ///
    /// The name is normalized (trimmed, lower-cased) before the write;
    /// an empty normalized name rejects the save as a no-op. Uniqueness
    /// is a create-time rule enforced by [`create_tag`](Self::create_tag),
    /// not here.
    pub async fn save_tag(&self, mut tag: Tag) -> Result<bool> {
        tag.name = tag.name.trim().to_lowercase();
        if tag.name.is_empty() {
            return Ok(false);
        }

        let mut tags = self.list_tags().await;
        match tags.iter_mut().find(|t| t.id == tag.id) {
            Some(existing) => {
                let created_at = existing.created_at;
                *existing = Tag { created_at, ..tag };
            }
            None => tags.push(Tag {
                created_at: Utc::now(),
                ..tag
            }),
        }

        self.write_collection(TAGS_KEY, &tags).await?;
        Ok(true)
    }

    /// Create a tag.
    ///
    /// The name is stored trimmed and lower-cased. An empty name, or a
    /// name that matches an existing tag case-insensitively, rejects
    /// creation: `Ok(None)` comes back and nothing is written.
    pub async fn create_tag(&self, name: &str, color: TagColor) -> Result<Option<Tag>> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return Ok(None);
        }

        if self
            .list_tags()
            .await
            .iter()
            .any(|t| t.name.to_lowercase() == name)
        {
            return Ok(None);
        }

        let tag = Tag::new(name, color);
        self.save_tag(tag.clone()).await?;
        Ok(Some(tag))
    }

    /// Delete a tag and remove it from every deck that references it.
    ///
    /// A deck whose tag list becomes empty ends up with no list at all.
    /// Like the deck cascade this is two independent writes, and the
    /// deck rewrite only happens when a reference was actually removed.
    pub async fn delete_tag(&self, id: Uuid) -> Result<()> {
        let tags: Vec<Tag> = self
            .list_tags()
            .await
            .into_iter()
            .filter(|t| t.id != id)
            .collect();
        self.write_collection(TAGS_KEY, &tags).await?;

        let mut decks = self.list_decks().await;
        let mut changed = false;
        for deck in &mut decks {
            if let Some(tag_ids) = &mut deck.tag_ids {
                let before = tag_ids.len();
                tag_ids.retain(|tag_id| *tag_id != id);
                if tag_ids.len() != before {
                    changed = true;
                    if tag_ids.is_empty() {
                        deck.tag_ids = None;
                    }
                }
            }
        }

        if changed {
            self.write_collection(DECKS_KEY, &decks).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::views::card_counts;

    fn storage() -> CardStorage<MemoryStore> {
        CardStorage::new(MemoryStore::new())
    }

    fn card(deck_id: Uuid, front: &str, back: &str) -> Card {
        Card::new(deck_id, front.to_string(), back.to_string())
    }

    #[tokio::test]
    async fn test_list_cards_empty_store() {
        assert!(storage().list_cards().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_collection_degrades_to_empty() {
        let store = MemoryStore::new();
        store.set("cards", "not json at all".to_string()).await.unwrap();
        let storage = CardStorage::new(store);
        assert!(storage.list_cards().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_card_appends() {
        let storage = storage();
        let deck_id = Uuid::new_v4();
        assert!(storage.save_card(card(deck_id, "hola", "hello")).await.unwrap());

        let cards = storage.list_cards().await;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front, "hola");
        assert_eq!(cards[0].deck_id, deck_id);
    }

    #[tokio::test]
    async fn test_save_card_update_preserves_identity() {
        let storage = storage();
        let original = card(Uuid::new_v4(), "q", "a");
        storage.save_card(original.clone()).await.unwrap();
        let stored = storage.list_cards().await.remove(0);

        let mut edited = stored.clone();
        edited.front = "q2".to_string();
        storage.save_card(edited).await.unwrap();

        let cards = storage.list_cards().await;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, stored.id);
        assert_eq!(cards[0].front, "q2");
        assert_eq!(cards[0].created_at, stored.created_at);
        assert!(cards[0].updated_at >= stored.updated_at);
    }

    #[tokio::test]
    async fn test_save_card_rejects_blank_text() {
        let storage = storage();
        assert!(!storage.save_card(card(Uuid::new_v4(), "  ", "back")).await.unwrap());
        assert!(!storage.save_card(card(Uuid::new_v4(), "front", "")).await.unwrap());
        assert!(storage.list_cards().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_card() {
        let storage = storage();
        let deck_id = Uuid::new_v4();
        storage.save_card(card(deck_id, "a", "b")).await.unwrap();
        let id = storage.list_cards().await[0].id;

        storage.delete_card(id).await.unwrap();
        assert!(storage.list_cards().await.is_empty());
    }

    #[tokio::test]
    async fn test_cards_in_deck_filters_by_owner() {
        let storage = storage();
        let spanish = Uuid::new_v4();
        let french = Uuid::new_v4();
        storage.save_card(card(spanish, "hola", "hello")).await.unwrap();
        storage.save_card(card(french, "bonjour", "hello")).await.unwrap();

        let cards = storage.cards_in_deck(spanish).await;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front, "hola");
    }

    #[tokio::test]
    async fn test_save_deck_rejects_blank_name() {
        let storage = storage();
        assert!(!storage.save_deck(CardDeck::new("   ".to_string())).await.unwrap());
        assert!(storage.list_decks().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_deck_normalizes_empty_tag_list() {
        let storage = storage();
        let mut deck = CardDeck::new("Spanish".to_string());
        deck.tag_ids = Some(Vec::new());
        storage.save_deck(deck).await.unwrap();

        assert_eq!(storage.list_decks().await[0].tag_ids, None);
    }

    #[tokio::test]
    async fn test_delete_deck_cascades_to_cards() {
        let storage = storage();
        let deck = CardDeck::new("Spanish".to_string());
        let deck_id = deck.id;
        storage.save_deck(deck).await.unwrap();
        storage.save_card(card(deck_id, "hola", "hello")).await.unwrap();
        storage.save_card(card(deck_id, "adios", "bye")).await.unwrap();

        let keep = CardDeck::new("French".to_string());
        let keep_id = keep.id;
        storage.save_deck(keep).await.unwrap();
        storage.save_card(card(keep_id, "bonjour", "hello")).await.unwrap();

        storage.delete_deck(deck_id).await.unwrap();

        let decks = storage.list_decks().await;
        assert_eq!(decks.len(), 1);
        assert_eq!(decks[0].id, keep_id);

        let cards = storage.list_cards().await;
        assert_eq!(cards.len(), 1);
        assert!(cards.iter().all(|c| c.deck_id == keep_id));
    }

    #[tokio::test]
    async fn test_create_then_count_then_delete_deck() {
        let storage = storage();
        let deck = CardDeck::new("Spanish".to_string());
        let deck_id = deck.id;
        storage.save_deck(deck).await.unwrap();
        storage.save_card(card(deck_id, "hola", "hello")).await.unwrap();

        let cards = storage.list_cards().await;
        assert_eq!(cards.len(), 1);
        assert_eq!(card_counts(&cards).get(&deck_id), Some(&1));

        storage.delete_deck(deck_id).await.unwrap();
        assert!(storage.list_cards().await.is_empty());
        assert!(storage.list_decks().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_tag_trims_and_lowercases() {
        let storage = storage();
        let tag = storage
            .create_tag("  Vocabulary  ", TagColor::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(tag.name, "vocabulary");
    }

    #[tokio::test]
    async fn test_create_tag_rejects_blank_name() {
        let storage = storage();
        assert!(storage.create_tag("   ", TagColor::default()).await.unwrap().is_none());
        assert!(storage.list_tags().await.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_tag_rejected_case_insensitively() {
        let storage = storage();
        storage.create_tag("easy", TagColor::Mint).await.unwrap();
        storage.create_tag("hard", TagColor::Coral).await.unwrap();

        assert!(storage.create_tag("EASY", TagColor::Sky).await.unwrap().is_none());
        assert_eq!(storage.list_tags().await.len(), 2);
    }

    #[tokio::test]
    async fn test_save_tag_update_keeps_created_at() {
        let storage = storage();
        storage.create_tag("easy", TagColor::Mint).await.unwrap();
        let stored = storage.list_tags().await.remove(0);

        let mut edited = stored.clone();
        edited.color = TagColor::Coral;
        assert!(storage.save_tag(edited).await.unwrap());

        let tags = storage.list_tags().await;
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].id, stored.id);
        assert_eq!(tags[0].color, TagColor::Coral);
        assert_eq!(tags[0].created_at, stored.created_at);
    }

    #[tokio::test]
    async fn test_save_tag_normalizes_name() {
        let storage = storage();
        let tag = Tag::new("  MiXeD ".to_string(), TagColor::default());
        assert!(storage.save_tag(tag).await.unwrap());
        assert_eq!(storage.list_tags().await[0].name, "mixed");
    }

    #[tokio::test]
    async fn test_delete_tag_scrubs_deck_references() {
        let storage = storage();
        let grammar = storage.create_tag("grammar", TagColor::default()).await.unwrap().unwrap();
        let vocab = storage.create_tag("vocab", TagColor::Mint).await.unwrap().unwrap();

        let only_grammar = CardDeck::new("Verbs".to_string()).with_tags(vec![grammar.id]);
        let both = CardDeck::new("Mixed".to_string()).with_tags(vec![grammar.id, vocab.id]);
        let only_grammar_id = only_grammar.id;
        let both_id = both.id;
        storage.save_deck(only_grammar).await.unwrap();
        storage.save_deck(both).await.unwrap();

        storage.delete_tag(grammar.id).await.unwrap();

        let tags = storage.list_tags().await;
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].id, vocab.id);

        let decks = storage.list_decks().await;
        let verbs = decks.iter().find(|d| d.id == only_grammar_id).unwrap();
        let mixed = decks.iter().find(|d| d.id == both_id).unwrap();
        // Emptied list becomes absent, partial list keeps the remainder
        assert_eq!(verbs.tag_ids, None);
        assert_eq!(mixed.tag_ids, Some(vec![vocab.id]));
    }
}
