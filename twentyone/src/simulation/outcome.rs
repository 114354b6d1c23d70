use super::hand::Hand;
use super::table::{BettingBox, Dealer, Player};
use crate::HandResult;

/// The settled verdict for one betting box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxOutcome {
    pub player: Player,
    pub result: HandResult,
    pub payout: i64,
}

pub fn resolve(betting_box: &BettingBox, dealer: &Dealer) -> BoxOutcome {
    let result = hand_result(betting_box.hand(), dealer.hand());
    BoxOutcome {
        player: betting_box.player().clone(),
        result,
        payout: payout(betting_box.stake(), result),
    }
}

/// Compares a finished hand against the dealer's finished hand. Blackjacks
/// beat ordinary 21s, busts lose before the dealer's hand is even looked at,
/// and everything else comes down to the best playable totals.
pub fn hand_result(hand: &Hand, dealer_hand: &Hand) -> HandResult {
    if hand.is_blackjack() && dealer_hand.is_blackjack() {
        return HandResult::Tie;
    }
    if hand.is_blackjack() {
        return HandResult::Win;
    }
    if dealer_hand.is_blackjack() {
        return HandResult::Loss;
    }

    match (
        hand.largest_playable_total(),
        dealer_hand.largest_playable_total(),
    ) {
        (None, _) => HandResult::Loss,
        (_, None) => HandResult::Win,
        (Some(ours), Some(theirs)) => match ours.cmp(&theirs) {
            std::cmp::Ordering::Greater => HandResult::Win,
            std::cmp::Ordering::Less => HandResult::Loss,
            std::cmp::Ordering::Equal => HandResult::Tie,
        },
    }
}

/// Flat 1:1 payout: a win returns the stake, a tie returns nothing, a loss
/// costs the stake. Blackjack pays even money here, not 3:2.
pub fn payout(stake: u32, result: HandResult) -> i64 {
    match result {
        HandResult::Win => stake as i64,
        HandResult::Tie => 0,
        HandResult::Loss => -(stake as i64),
    }
}
