use std::collections::BTreeSet;

use super::Card;

/// An ordered sequence of cards. A hand is an immutable value: adding a card
/// produces a new hand and never touches the original, so tables holding a
/// hand can be copied and replayed freely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand { cards: Vec::new() }
    }

    /// Returns a new hand holding this hand's cards plus the given card.
    pub fn add_card(&self, card: Card) -> Hand {
        let mut cards = self.cards.clone();
        cards.push(card);
        Hand { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn number_of_cards(&self) -> usize {
        self.cards.len()
    }

    /// Every total this hand can add up to, one entry per distinct sum over
    /// the per-card value sets (an ace contributes both 1 and 11). Totals
    /// above 21 are kept in the set. The empty hand totals `{0}`.
    pub fn card_totals(&self) -> BTreeSet<u16> {
        let mut totals = BTreeSet::new();
        totals.insert(0);
        for card in &self.cards {
            let mut next = BTreeSet::new();
            for total in &totals {
                for value in card.rank.values() {
                    next.insert(total + value);
                }
            }
            totals = next;
        }
        totals
    }

    /// A hand is busted once no total stays at or under 21.
    pub fn is_busted(&self) -> bool {
        self.card_totals().iter().all(|&total| total > 21)
    }

    /// Exactly two cards adding up to 21.
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.card_totals().contains(&21)
    }

    /// More than one viable total remains, i.e. an ace is still ambiguous.
    pub fn is_soft(&self) -> bool {
        self.card_totals()
            .iter()
            .filter(|&&total| total <= 21)
            .count()
            > 1
    }

    /// The best total at or under 21, or `None` for a busted hand. Callers
    /// are expected to check `is_busted` first.
    pub fn largest_playable_total(&self) -> Option<u16> {
        self.card_totals()
            .into_iter()
            .filter(|&total| total <= 21)
            .max()
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Hand {
        Hand { cards }
    }
}
