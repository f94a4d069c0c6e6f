/// Property-based tests for the card wire encoding using proptest
///
/// These tests verify that encoding is bijective over the whole deck and
/// that decoding rejects everything outside the protocol's ranges.
use cribbage::{Card, Selection, Suit, WireCard};
use proptest::prelude::*;

// Strategy to generate a known card (values 1-13, suit by wire index)
fn card_strategy() -> impl Strategy<Value = Card> {
    (1u8..=13, 0u8..=3)
        .prop_map(|(value, suit_idx)| Card::Known(value, Suit::WIRE_ORDER[suit_idx as usize]))
}

proptest! {
    #[test]
    fn wire_encoding_round_trips(card in card_strategy()) {
        let wire = card.to_wire().unwrap();
        prop_assert_eq!(Card::from_wire(wire), Ok(card));
    }

    #[test]
    fn json_encoding_round_trips(card in card_strategy()) {
        let encoded = serde_json::to_string(&card).unwrap();
        let decoded: Card = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded, card);
    }

    #[test]
    fn canonical_name_round_trips(card in card_strategy()) {
        prop_assert_eq!(card.name().parse::<Card>(), Ok(card));
    }

    #[test]
    fn decode_rejects_out_of_range_suit(s in 4u8..=u8::MAX, v in 1u8..=13) {
        let wire = WireCard { s, v };
        prop_assert!(Card::from_wire(wire).is_err());
    }

    #[test]
    fn decode_rejects_out_of_range_value(s in 0u8..=3, v in 14u8..=u8::MAX) {
        let wire = WireCard { s, v };
        prop_assert!(Card::from_wire(wire).is_err());
    }

    #[test]
    fn toggle_is_self_inverse(
        seed in prop::collection::vec(card_strategy(), 0..6),
        card in card_strategy(),
    ) {
        let mut selection = Selection::new();
        for c in seed {
            selection.toggle(c);
        }
        let before = selection.clone();
        selection.toggle(card);
        selection.toggle(card);
        prop_assert_eq!(selection, before);
    }
}
