//! Policies that decide the live betting box's next action.
//!
//! A policy is any `FnMut(&Table) -> Action`; the [`Strategy`] trait exists
//! so simulations can also carry stateful deciders (such as the random
//! policy, which owns its RNG). Policies see the whole table but only ever
//! act on `table.current_betting_box()`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::simulation::table::{BettingBox, Table};
use crate::simulation::Rank;
use crate::Action;

/// Chooses the next action for the live betting box. Implemented for every
/// closure of the right shape, so plain functions below are strategies too.
pub trait Strategy {
    fn choose_action(&mut self, table: &Table) -> Action;
}

impl<F: FnMut(&Table) -> Action> Strategy for F {
    fn choose_action(&mut self, table: &Table) -> Action {
        self(table)
    }
}

/// Boxed strategies dispatch dynamically, so a caller can pick one of
/// several strategies at runtime and hand it to a `Simulation`.
impl Strategy for Box<dyn Strategy + Send> {
    fn choose_action(&mut self, table: &Table) -> Action {
        (**self).choose_action(table)
    }
}

pub fn always_stand(_table: &Table) -> Action {
    Action::Stand
}

pub fn always_hit(_table: &Table) -> Action {
    Action::Hit
}

pub fn always_double_down(_table: &Table) -> Action {
    Action::DoubleDown
}

/// Hits while the smallest reading of the hand is below seventeen.
pub fn hit_under_seventeen(table: &Table) -> Action {
    let totals = table.current_betting_box().hand().card_totals();
    match totals.first() {
        Some(&smallest) if smallest < 17 => Action::Hit,
        _ => Action::Stand,
    }
}

/// Doubles down on a two-card eleven, stands on everything else.
pub fn double_down_on_eleven(table: &Table) -> Action {
    let hand = table.current_betting_box().hand();
    if hand.number_of_cards() == 2 && hand.card_totals().into_iter().eq([11u16]) {
        Action::DoubleDown
    } else {
        Action::Stand
    }
}

pub fn split_when_possible(table: &Table) -> Action {
    if table.current_betting_box().can_split() {
        Action::Split
    } else {
        Action::Stand
    }
}

/// Picks uniformly among the legal actions for the live box. Returns a
/// fresh closure so each simulation owns its own generator.
pub fn random_policy() -> impl FnMut(&Table) -> Action + Send {
    random_policy_with_rng(StdRng::from_entropy())
}

pub fn random_policy_with_rng<R: Rng + Send>(mut rng: R) -> impl FnMut(&Table) -> Action + Send {
    move |table: &Table| {
        let betting_box = table.current_betting_box();
        let mut choices = vec![Action::Hit, Action::Stand];
        if betting_box.can_double_down() {
            choices.push(Action::DoubleDown);
        }
        if betting_box.can_split() {
            choices.push(Action::Split);
        }
        choices[rng.gen_range(0..choices.len())]
    }
}

/// The standard basic-strategy chart for a dealer who stands on soft 17,
/// split into the pair, hard and soft tables. The dealer is read as the
/// highest total their visible card can make, so an ace upcard counts 11.
pub fn basic(table: &Table) -> Action {
    let betting_box = table.current_betting_box();
    let hand = betting_box.hand();
    let player = match hand.largest_playable_total() {
        Some(total) => total,
        // A busted hand has no decision left to make.
        None => return Action::Stand,
    };
    let dealer = table
        .dealer()
        .hand()
        .card_totals()
        .last()
        .copied()
        .unwrap_or(0);

    if betting_box.can_split() {
        basic_pair(player, dealer, betting_box)
    } else if !hand.is_soft() {
        basic_hard(player, dealer, betting_box)
    } else {
        basic_soft(player, dealer, betting_box)
    }
}

fn basic_pair(player: u16, dealer: u16, betting_box: &BettingBox) -> Action {
    // A pair of aces reads as 12 but splits unconditionally.
    if betting_box.hand().cards()[0].rank == Rank::Ace {
        return Action::Split;
    }
    match player {
        4 | 6 => {
            if (4..=7).contains(&dealer) {
                Action::Split
            } else {
                Action::Hit
            }
        }
        8 => Action::Hit,
        10 => {
            if dealer < 10 && betting_box.can_double_down() {
                Action::DoubleDown
            } else {
                Action::Hit
            }
        }
        12 => {
            if dealer == 2 || dealer >= 7 {
                Action::Hit
            } else {
                Action::Split
            }
        }
        14 => {
            if dealer <= 7 {
                Action::Split
            } else {
                Action::Hit
            }
        }
        16 => Action::Split,
        18 => {
            if matches!(dealer, 7 | 10 | 11) {
                Action::Stand
            } else {
                Action::Split
            }
        }
        _ => Action::Stand,
    }
}

fn basic_hard(player: u16, dealer: u16, betting_box: &BettingBox) -> Action {
    match player {
        0..=8 => Action::Hit,
        9 => {
            if (3..=6).contains(&dealer) && betting_box.can_double_down() {
                Action::DoubleDown
            } else {
                Action::Hit
            }
        }
        10 => {
            if dealer <= 9 && betting_box.can_double_down() {
                Action::DoubleDown
            } else {
                Action::Hit
            }
        }
        11 => {
            if dealer <= 10 && betting_box.can_double_down() {
                Action::DoubleDown
            } else {
                Action::Hit
            }
        }
        12 => {
            if (4..=6).contains(&dealer) {
                Action::Stand
            } else {
                Action::Hit
            }
        }
        13..=16 => {
            if dealer <= 6 {
                Action::Stand
            } else {
                Action::Hit
            }
        }
        _ => Action::Stand,
    }
}

fn basic_soft(player: u16, dealer: u16, betting_box: &BettingBox) -> Action {
    match player {
        0..=14 => {
            if (5..=6).contains(&dealer) && betting_box.can_double_down() {
                Action::DoubleDown
            } else {
                Action::Hit
            }
        }
        15 | 16 => {
            if (4..=6).contains(&dealer) && betting_box.can_double_down() {
                Action::DoubleDown
            } else {
                Action::Hit
            }
        }
        17 => {
            if (3..=6).contains(&dealer) && betting_box.can_double_down() {
                Action::DoubleDown
            } else {
                Action::Hit
            }
        }
        18 => {
            if (3..=6).contains(&dealer) && betting_box.can_double_down() {
                Action::DoubleDown
            } else if dealer <= 8 {
                Action::Stand
            } else {
                Action::Hit
            }
        }
        _ => Action::Stand,
    }
}
