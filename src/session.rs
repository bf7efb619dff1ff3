//! Selection and practice-session state
//!
//! One `Session` per running UI. It tracks which deck is selected and
//! which view is active, and owns the reconciliation rules that keep
//! both from pointing at data that no longer exists.

use rand::Rng;
use uuid::Uuid;

use crate::models::{Card, CardDeck};
use crate::views::shuffle_cards;

/// Which screen the session is on
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Deck browser, with or without a selected deck
    Decks,
    /// Creating (`None`) or editing (`Some`) a card
    CardForm { editing: Option<Uuid> },
    /// Creating or editing a deck
    DeckForm { editing: Option<Uuid> },
    /// Running a practice session
    Practice(PracticeSession),
}

/// Selection plus active view
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    selected_deck: Option<Uuid>,
    view: View,
}

impl Session {
    pub fn new() -> Self {
        Self {
            selected_deck: None,
            view: View::Decks,
        }
    }

    pub fn selected_deck(&self) -> Option<Uuid> {
        self.selected_deck
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Select a deck, or clear the selection when the already-selected
    /// deck is picked again.
    pub fn toggle_deck(&mut self, deck_id: Uuid) {
        if self.selected_deck == Some(deck_id) {
            self.selected_deck = None;
        } else {
            self.selected_deck = Some(deck_id);
        }
    }

    pub fn open_card_form(&mut self, editing: Option<Uuid>) {
        self.view = View::CardForm { editing };
    }

    pub fn open_deck_form(&mut self, editing: Option<Uuid>) {
        self.view = View::DeckForm { editing };
    }

    /// Leave any form or practice view and return to the deck browser
    pub fn close_view(&mut self) {
        self.view = View::Decks;
    }

    /// Enter practice over the given cards, shuffling them once for the
    /// lifetime of the session.
    ///
    /// An empty card list is a blocking condition: the session is left
    /// unchanged and `false` comes back so the caller can tell the user
    /// there is nothing to practice. A session is never entered empty.
    pub fn start_practice(&mut self, cards: Vec<Card>, rng: &mut impl Rng) -> bool {
        match PracticeSession::new(cards, rng) {
            Some(practice) => {
                self.view = View::Practice(practice);
                true
            }
            None => false,
        }
    }

    pub fn practice(&self) -> Option<&PracticeSession> {
        match &self.view {
            View::Practice(practice) => Some(practice),
            _ => None,
        }
    }

    pub fn practice_mut(&mut self) -> Option<&mut PracticeSession> {
        match &mut self.view {
            View::Practice(practice) => Some(practice),
            _ => None,
        }
    }

    /// Drop any state that refers to a deck that no longer exists.
    ///
    /// Runs synchronously after a mutation that can remove the selected
    /// deck, the delete-deck cascade in particular. The selection is
    /// cleared and any deck-dependent view (practice, card form) exits
    /// back to the browser.
    pub fn reconcile(&mut self, decks: &[CardDeck]) {
        let Some(selected) = self.selected_deck else {
            return;
        };
        if decks.iter().any(|d| d.id == selected) {
            return;
        }

        self.selected_deck = None;
        if matches!(self.view, View::Practice(_) | View::CardForm { .. }) {
            self.view = View::Decks;
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// A shuffled run over one deck's cards
///
/// The ordering is fixed when the session starts; only the cursor and
/// the visible face change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeSession {
    cards: Vec<Card>,
    cursor: usize,
    show_back: bool,
}

impl PracticeSession {
    /// Shuffle the cards and start at the first one, question side up.
    /// Returns `None` for an empty card list.
    pub fn new(mut cards: Vec<Card>, rng: &mut impl Rng) -> Option<Self> {
        if cards.is_empty() {
            return None;
        }
        shuffle_cards(&mut cards, rng);
        Some(Self {
            cards,
            cursor: 0,
            show_back: false,
        })
    }

    pub fn current(&self) -> &Card {
        &self.cards[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn showing_back(&self) -> bool {
        self.show_back
    }

    /// Flip between the question and answer side of the current card
    pub fn flip(&mut self) {
        self.show_back = !self.show_back;
    }

    /// Advance to the next card. Moving turns the card back to the
    /// question side; at the last card this is a no-op and the face is
    /// left alone.
    pub fn next(&mut self) -> bool {
        if self.cursor + 1 < self.cards.len() {
            self.cursor += 1;
            self.show_back = false;
            true
        } else {
            false
        }
    }

    /// Step back to the previous card; a no-op at the first card
    pub fn previous(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.show_back = false;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn cards(n: usize) -> Vec<Card> {
        let deck_id = Uuid::new_v4();
        (0..n)
            .map(|i| Card::new(deck_id, format!("q{}", i), format!("a{}", i)))
            .collect()
    }

    #[test]
    fn test_toggle_twice_clears_selection() {
        let mut session = Session::new();
        let deck_id = Uuid::new_v4();

        session.toggle_deck(deck_id);
        assert_eq!(session.selected_deck(), Some(deck_id));
        session.toggle_deck(deck_id);
        assert_eq!(session.selected_deck(), None);
    }

    #[test]
    fn test_toggle_other_deck_switches() {
        let mut session = Session::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        session.toggle_deck(first);
        session.toggle_deck(second);
        assert_eq!(session.selected_deck(), Some(second));
    }

    #[test]
    fn test_empty_deck_blocks_practice() {
        let mut session = Session::new();
        assert!(!session.start_practice(Vec::new(), &mut rng()));
        assert_eq!(*session.view(), View::Decks);
    }

    #[test]
    fn test_practice_session_is_a_permutation() {
        let input = cards(5);
        let mut ids: Vec<Uuid> = input.iter().map(|c| c.id).collect();
        let session = PracticeSession::new(input, &mut rng()).unwrap();

        assert_eq!(session.len(), 5);
        let mut shuffled: Vec<Uuid> = session.cards().iter().map(|c| c.id).collect();
        ids.sort();
        shuffled.sort();
        assert_eq!(ids, shuffled);
    }

    #[test]
    fn test_cursor_clamps_at_both_ends() {
        let mut session = PracticeSession::new(cards(5), &mut rng()).unwrap();

        assert!(!session.previous());
        assert_eq!(session.cursor(), 0);

        for _ in 0..4 {
            assert!(session.next());
        }
        assert_eq!(session.cursor(), 4);
        assert!(!session.next());
        assert_eq!(session.cursor(), 4);
    }

    #[test]
    fn test_moving_resets_to_question_side() {
        let mut session = PracticeSession::new(cards(3), &mut rng()).unwrap();

        session.flip();
        assert!(session.showing_back());
        session.next();
        assert!(!session.showing_back());

        session.flip();
        session.previous();
        assert!(!session.showing_back());
    }

    #[test]
    fn test_boundary_noop_leaves_face_alone() {
        let mut session = PracticeSession::new(cards(1), &mut rng()).unwrap();
        session.flip();
        session.next();
        assert!(session.showing_back());
    }

    #[test]
    fn test_reconcile_clears_vanished_selection() {
        let mut session = Session::new();
        let deck = CardDeck::new("Spanish".to_string());
        session.toggle_deck(deck.id);
        session.start_practice(cards(2), &mut rng());

        session.reconcile(&[]);
        assert_eq!(session.selected_deck(), None);
        assert_eq!(*session.view(), View::Decks);
    }

    #[test]
    fn test_reconcile_keeps_live_selection() {
        let mut session = Session::new();
        let deck = CardDeck::new("Spanish".to_string());
        session.toggle_deck(deck.id);

        session.reconcile(std::slice::from_ref(&deck));
        assert_eq!(session.selected_deck(), Some(deck.id));
    }
}
