use super::{Card, Rank, Suit};

use strum::IntoEnumIterator;

use rand::seq::SliceRandom;
use rand::Rng;

/// The card source for a round: a shoe built from a whole number of 52-card
/// decks, dealt front to back. Exhausted after a bounded number of draws.
#[derive(Debug, Clone)]
pub struct Shoe {
    number_of_decks: u8,
    cards: Vec<Card>,
    current_index: usize,
}

impl Shoe {
    /// Creates a new shoe with ordered cards.
    pub fn new(number_of_decks: u8) -> Shoe {
        let mut cards = Vec::with_capacity(number_of_decks as usize * 52);
        for _ in 0..number_of_decks {
            for suit in Suit::iter() {
                for rank in Rank::iter() {
                    cards.push(Card { rank, suit });
                }
            }
        }
        Shoe {
            number_of_decks,
            cards,
            current_index: 0,
        }
    }

    /// Returns the dealt cards back into the shoe and shuffles. The caller
    /// supplies the generator, so a seeded rng gives a reproducible order.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.current_index = 0;
    }

    /// Returns the dealt cards back into the shoe and shuffles, making sure
    /// cards of the given ranks sit at the frontmost positions in the given
    /// order. Panics if the shoe cannot supply them. Meant for arranging
    /// deterministic deals in tests.
    pub fn shuffle_with_firsts<R: Rng>(&mut self, firsts: &[Rank], rng: &mut R) {
        let mut pool = std::mem::take(&mut self.cards);
        let mut arranged = Vec::with_capacity(pool.len());
        for rank in firsts {
            let position = pool
                .iter()
                .position(|card| card.rank == *rank)
                .expect("The given first cards are invalid");
            arranged.push(pool.remove(position));
        }
        pool.shuffle(rng);
        arranged.extend(pool);
        self.cards = arranged;
        self.current_index = 0;
    }

    /// Deals a card if the shoe is not empty. Returns None if empty.
    pub fn deal_card(&mut self) -> Option<Card> {
        self.current_index += 1;
        if self.current_index > self.cards.len() {
            None
        } else {
            Some(self.cards[self.current_index - 1])
        }
    }

    pub fn remaining_cards(&self) -> usize {
        self.cards.len() - self.current_index.min(self.cards.len())
    }

    pub fn number_of_decks(&self) -> u8 {
        self.number_of_decks
    }
}
