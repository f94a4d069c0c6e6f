use std::fmt;

use super::entities::Card;

/// The set of cards a player has tentatively chosen before submitting an
/// action, in selection order. Used by the crib-building and pegging
/// phases.
///
/// Invariants: never contains the hidden sentinel, never contains two
/// structurally equal cards.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    cards: Vec<Card>,
}

/// Equality is set-wise: deselecting a card and selecting it again moves
/// it to the back of the wire order but yields an equal selection.
/// Relies on the no-duplicates invariant.
impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.cards.len() == other.cards.len()
            && self.cards.iter().all(|card| other.cards.contains(card))
    }
}

impl Eq for Selection {}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the card if structurally present, else add it. Hidden cards
    /// are never admitted; toggling one is a no-op. Returns whether the
    /// card is selected afterwards.
    pub fn toggle(&mut self, card: Card) -> bool {
        if card.is_hidden() {
            return false;
        }
        match self.cards.iter().position(|c| *c == card) {
            Some(index) => {
                self.cards.remove(index);
                false
            }
            None => {
                self.cards.push(card);
                true
            }
        }
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Selected cards in the order they were chosen. Submission order on
    /// the wire follows this order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr: Vec<String> = self.cards.iter().map(|c| c.name()).collect();
        write!(f, "{}", repr.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::Suit;

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = Selection::new();
        let card = Card::Known(5, Suit::Heart);
        assert!(selection.toggle(card));
        assert!(selection.contains(&card));
        assert!(!selection.toggle(card));
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut selection = Selection::new();
        selection.toggle(Card::Known(9, Suit::Diamond));
        let before = selection.clone();
        let card = Card::Known(2, Suit::Spade);
        selection.toggle(card);
        selection.toggle(card);
        assert_eq!(selection, before);
    }

    #[test]
    fn toggle_is_its_own_inverse_mid_selection() {
        let queen = Card::Known(12, Suit::Club);
        let ace = Card::Known(1, Suit::Spade);
        let mut selection = Selection::new();
        selection.toggle(queen);
        selection.toggle(ace);
        let before = selection.clone();

        // Deselecting and reselecting moves the card to the back of the
        // wire order, but the selection holds the same cards.
        selection.toggle(queen);
        selection.toggle(queen);
        assert_eq!(selection, before);
        assert_eq!(selection.cards(), &[ace, queen]);
    }

    #[test]
    fn toggle_never_admits_hidden() {
        let mut selection = Selection::new();
        assert!(!selection.toggle(Card::Hidden));
        assert!(selection.is_empty());
    }

    #[test]
    fn no_structural_duplicates() {
        let mut selection = Selection::new();
        let card = Card::Known(13, Suit::Club);
        selection.toggle(card);
        selection.toggle(card);
        selection.toggle(card);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn preserves_selection_order() {
        let mut selection = Selection::new();
        let first = Card::Known(5, Suit::Club);
        let second = Card::Known(1, Suit::Spade);
        selection.toggle(first);
        selection.toggle(second);
        assert_eq!(selection.cards(), &[first, second]);
    }

    #[test]
    fn clear_empties_selection() {
        let mut selection = Selection::new();
        selection.toggle(Card::Known(3, Suit::Heart));
        selection.toggle(Card::Known(4, Suit::Heart));
        selection.clear();
        assert!(selection.is_empty());
    }
}
