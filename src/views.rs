//! Derived views over the entity collections
//!
//! Pure functions recomputed from whole-collection snapshots; nothing
//! here touches storage or mutates the collections it reads. Dangling
//! references (a card whose deck is gone, a deck tag that no longer
//! exists) simply fail to match; a lookup miss is never an error.

use std::collections::HashMap;

use rand::Rng;
use uuid::Uuid;

use crate::models::{Card, CardDeck};

/// Per-deck card counts, built in a single pass.
///
/// Decks without cards have no entry; consumers read a missing entry
/// as zero.
pub fn card_counts(cards: &[Card]) -> HashMap<Uuid, usize> {
    let mut counts = HashMap::new();
    for card in cards {
        *counts.entry(card.deck_id).or_insert(0) += 1;
    }
    counts
}

/// Cards belonging to the selected deck; empty when nothing is selected
pub fn cards_for_selection(cards: &[Card], selected: Option<Uuid>) -> Vec<&Card> {
    match selected {
        Some(deck_id) => cards.iter().filter(|c| c.deck_id == deck_id).collect(),
        None => Vec::new(),
    }
}

/// Filter decks by a free-text query and a set of required tags.
///
/// The query matches the deck name or description as a case-insensitive
/// substring after trimming; a blank query matches every deck. The tag
/// filter requires the deck to carry every selected tag (AND, not OR),
/// so untagged decks never match a non-empty filter. The two predicates
/// are themselves combined with AND.
pub fn filter_decks<'a>(
    decks: &'a [CardDeck],
    query: &str,
    selected_tags: &[Uuid],
) -> Vec<&'a CardDeck> {
    let query = query.trim().to_lowercase();

    decks
        .iter()
        .filter(|deck| {
            query.is_empty()
                || deck.name.to_lowercase().contains(&query)
                || deck
                    .description
                    .as_ref()
                    .is_some_and(|description| description.to_lowercase().contains(&query))
        })
        .filter(|deck| {
            selected_tags.is_empty()
                || match &deck.tag_ids {
                    Some(tag_ids) if !tag_ids.is_empty() => {
                        selected_tags.iter().all(|tag| tag_ids.contains(tag))
                    }
                    _ => false,
                }
        })
        .collect()
}

/// Fisher-Yates shuffle: walk `i` from the end down to 1 and swap with
/// a uniformly chosen `j` in `[0, i]`, making every permutation equally
/// likely.
pub fn shuffle_cards(cards: &mut [Card], rng: &mut impl Rng) {
    for i in (1..cards.len()).rev() {
        let j = rng.gen_range(0..=i);
        cards.swap(i, j);
    }
}
