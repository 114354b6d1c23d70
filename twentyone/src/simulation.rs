pub mod hand;
pub mod outcome;
pub mod shoe;
pub mod table;

use rand::rngs::StdRng;
use rand::SeedableRng;
use strum_macros::EnumIter;

use crate::statistics::SimulationResult;
use crate::strategy::Strategy;
use crate::{Action, SimulationError};

use self::shoe::Shoe;
use self::table::{BettingBox, Player, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Suit {
    Spade,
    Heart,
    Club,
    Diamond,
}

/// A card rank. The numeric value set is what matters at the table: an ace
/// counts as 1 or 11, the face cards all count 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub fn values(&self) -> &'static [u16] {
        match self {
            Rank::Ace => &[1, 11],
            Rank::Two => &[2],
            Rank::Three => &[3],
            Rank::Four => &[4],
            Rank::Five => &[5],
            Rank::Six => &[6],
            Rank::Seven => &[7],
            Rank::Eight => &[8],
            Rank::Nine => &[9],
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => &[10],
        }
    }
}

/// Represents a card in the real world with a rank and a suit. Ordering is
/// by rank then suit identity; a card has no intrinsic numeric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let suit = match self.suit {
            Suit::Spade => 'S',
            Suit::Heart => 'H',
            Suit::Club => 'C',
            Suit::Diamond => 'D',
        };
        let rank = match self.rank {
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        };
        write!(f, "{}{}", suit, rank)
    }
}

const PLAYER_NAME: &str = "player one";

/// Drives whole rounds of the table state machine under one decision policy
/// and folds the payouts into result distributions. Every round starts from
/// a freshly shuffled shoe, so no state leaks between rounds.
pub struct Simulation<S: Strategy> {
    strategy: S,
    number_of_decks: u8,
    stake: u32,
    rng: StdRng,
}

impl<S: Strategy> Simulation<S> {
    pub fn new(strategy: S, number_of_decks: u8, stake: u32) -> Self {
        Simulation {
            strategy,
            number_of_decks,
            stake,
            rng: StdRng::from_entropy(),
        }
    }

    /// Like `new`, but every shuffle flows from the given seed, making the
    /// whole run reproducible.
    pub fn with_seed(strategy: S, number_of_decks: u8, stake: u32, seed: u64) -> Self {
        Simulation {
            strategy,
            number_of_decks,
            stake,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Plays one round on a fresh shuffled shoe and returns the round's net
    /// payout across all boxes (the simulated player owns every box).
    pub fn play_round(&mut self) -> Result<i64, SimulationError> {
        let mut shoe = Shoe::new(self.number_of_decks);
        shoe.shuffle(&mut self.rng);
        self.play_shoe(shoe)
    }

    /// Plays one round against the given shoe, exactly as dealt. The policy
    /// is never consulted for a box already showing blackjack or a bust;
    /// Hit keeps the box live, Stand and DoubleDown resolve it, Split
    /// replaces it with two live boxes and stays on the first of them.
    pub fn play_shoe(&mut self, shoe: Shoe) -> Result<i64, SimulationError> {
        let betting_boxes = vec![BettingBox::new(Player::new(PLAYER_NAME), self.stake)];
        let mut table = Table::new(betting_boxes, shoe).initial_draw()?;

        while table.player_phase_in_progress() {
            let live = table.current_betting_box();
            if live.hand().is_blackjack() || live.hand().is_busted() {
                table = table.advance_turn();
                continue;
            }

            match self.strategy.choose_action(&table) {
                Action::Hit => table = table.hit()?,
                Action::Stand => table = table.stand()?.advance_turn(),
                Action::DoubleDown => table = table.double_down()?.advance_turn(),
                Action::Split => table = table.split()?,
            }
        }

        let table = table.dealer_play()?;
        let payout = table
            .settle()?
            .iter()
            .map(|outcome| outcome.payout)
            .sum();
        log::trace!("round settled with net payout {}", payout);
        Ok(payout)
    }

    /// Plays `rounds` rounds, each round's net payout becoming one outcome
    /// in the returned distribution.
    pub fn play_batch(&mut self, rounds: u64) -> Result<SimulationResult, SimulationError> {
        let mut result = SimulationResult::new();
        for _ in 0..rounds {
            result.record(self.play_round()?);
        }
        Ok(result)
    }

    /// Plays `batches` batches of `rounds_per_batch` rounds; each batch's
    /// total winnings becomes one outcome in the returned distribution.
    pub fn play_batches(
        &mut self,
        batches: u64,
        rounds_per_batch: u64,
    ) -> Result<SimulationResult, SimulationError> {
        let mut result = SimulationResult::new();
        for batch_index in 0..batches {
            let batch = self.play_batch(rounds_per_batch)?;
            let winnings = batch.total_winnings();
            log::debug!("batch {} finished with total winnings {}", batch_index, winnings);
            result.record(winnings);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy;

    fn stacked_shoe(firsts: &[Rank]) -> Shoe {
        let mut shoe = Shoe::new(2);
        shoe.shuffle_with_firsts(firsts, &mut StdRng::seed_from_u64(0));
        shoe
    }

    #[test]
    fn standing_nineteen_beats_a_dealer_seventeen() {
        // Player T9, dealer upcard 7 and hole card T: 19 over 17.
        let shoe = stacked_shoe(&[Rank::Ten, Rank::Seven, Rank::Nine, Rank::Ten]);
        let mut simulation = Simulation::with_seed(strategy::always_stand, 2, 10, 0);
        assert_eq!(simulation.play_shoe(shoe).unwrap(), 10);
    }

    #[test]
    fn hitting_into_a_bust_costs_the_stake() {
        // Player T9 hits into a five: 24, busted before the dealer moves.
        let shoe = stacked_shoe(&[
            Rank::Ten,
            Rank::Seven,
            Rank::Nine,
            Rank::Five,
            Rank::Ten,
        ]);
        let mut simulation = Simulation::with_seed(strategy::always_hit, 2, 10, 0);
        assert_eq!(simulation.play_shoe(shoe).unwrap(), -10);
    }

    #[test]
    fn doubling_down_doubles_the_swing() {
        // Player 65 doubles into a ten for 21; dealer lands on 20.
        let shoe = stacked_shoe(&[
            Rank::Six,
            Rank::Five,
            Rank::Five,
            Rank::Ten,
            Rank::Ten,
            Rank::Five,
            Rank::Ten,
        ]);
        let mut simulation = Simulation::with_seed(strategy::always_double_down, 2, 10, 0);
        assert_eq!(simulation.play_shoe(shoe).unwrap(), 20);
    }

    #[test]
    fn a_dealt_blackjack_never_consults_the_policy() {
        // Player AK is skipped straight to the dealer, who lands on 20.
        let shoe = stacked_shoe(&[Rank::Ace, Rank::Ten, Rank::King, Rank::Ten]);
        let mut panicking_policy = |_table: &Table| -> Action {
            panic!("the policy must not be asked about a blackjack box")
        };
        let mut simulation = Simulation::with_seed(&mut panicking_policy, 2, 10, 0);
        assert_eq!(simulation.play_shoe(shoe).unwrap(), 10);
    }

    #[test]
    fn splitting_plays_both_boxes_to_the_end() {
        // Player 66 splits; the boxes become 6T (stand 16) and 65 (stand
        // 11); dealer holds 7T = 17, so both boxes lose.
        let shoe = stacked_shoe(&[
            Rank::Six,
            Rank::Seven,
            Rank::Six,
            Rank::Ten,
            Rank::Five,
            Rank::Ten,
        ]);
        let mut simulation = Simulation::with_seed(strategy::split_when_possible, 2, 10, 0);
        assert_eq!(simulation.play_shoe(shoe).unwrap(), -20);
    }

    #[test]
    fn batches_fold_one_outcome_per_round() {
        let mut simulation = Simulation::with_seed(strategy::always_stand, 6, 10, 42);
        let result = simulation.play_batch(200).unwrap();
        assert_eq!(result.total_games(), 200);
        // Flat staking: every single-box round nets a multiple of the stake.
        let (low, high) = result.range().unwrap();
        assert!(low >= -10 && high <= 10);
    }

    #[test]
    fn multi_round_batches_record_batch_totals() {
        let mut simulation = Simulation::with_seed(strategy::always_stand, 6, 10, 42);
        let result = simulation.play_batches(20, 10).unwrap();
        assert_eq!(result.total_games(), 20);
        let (low, high) = result.range().unwrap();
        assert!(low >= -100 && high <= 100);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut first = Simulation::with_seed(strategy::always_hit, 6, 10, 7);
        let mut second = Simulation::with_seed(strategy::always_hit, 6, 10, 7);
        assert_eq!(
            first.play_batch(100).unwrap(),
            second.play_batch(100).unwrap()
        );
    }
}
