use twentyone_macros::allowed_phase;

use super::hand::Hand;
use super::outcome::{self, BoxOutcome};
use super::shoe::Shoe;
use super::Card;
use crate::SimulationError;

/// A seat owner. Several betting boxes may belong to the same player.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Player {
    name: String,
}

impl Player {
    pub fn new<S: Into<String>>(name: S) -> Player {
        Player { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One player position at the table: a hand, its owner, the stake riding on
/// it and whether the box came out of a split. A split box holds exactly two
/// cards until hit, may not split again and may not double down.
#[derive(Debug, Clone)]
pub struct BettingBox {
    hand: Hand,
    player: Player,
    stake: u32,
    split: bool,
}

impl BettingBox {
    pub fn new(player: Player, stake: u32) -> BettingBox {
        BettingBox {
            hand: Hand::new(),
            player,
            stake,
            split: false,
        }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn stake(&self) -> u32 {
        self.stake
    }

    pub fn is_split(&self) -> bool {
        self.split
    }

    /// Doubling down is only open on the first two cards of a non-split box.
    pub fn can_double_down(&self) -> bool {
        self.hand.number_of_cards() == 2 && !self.split
    }

    /// Splitting needs two cards of the same value set (rank identity up to
    /// blackjack value, suits do not matter) in a box not already split.
    pub fn can_split(&self) -> bool {
        if self.split || self.hand.number_of_cards() != 2 {
            return false;
        }
        let cards = self.hand.cards();
        cards[0].rank.values() == cards[1].rank.values()
    }
}

/// The dealer owns the shoe and plays its own hand last.
#[derive(Debug, Clone)]
pub struct Dealer {
    hand: Hand,
    shoe: Shoe,
}

impl Dealer {
    pub fn new(shoe: Shoe) -> Dealer {
        Dealer {
            hand: Hand::new(),
            shoe,
        }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// The dealer's face-up card, once the initial deal has happened.
    pub fn upcard(&self) -> Option<&Card> {
        self.hand.cards().first()
    }
}

/// Where in the round the table currently is. The phase only ever moves
/// forward: Dealing, PlayerTurns, DealerTurn, Settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Dealing,
    PlayerTurns,
    DealerTurn,
    Settled,
}

/// The whole round state: the betting boxes in table order, the dealer and
/// the cursor of the live box. Every transition consumes the table and
/// returns a new one; nothing is ever mutated in place from the caller's
/// point of view.
#[derive(Debug, Clone)]
pub struct Table {
    betting_boxes: Vec<BettingBox>,
    dealer: Dealer,
    player_turn: usize,
    phase: RoundPhase,
}

impl Table {
    pub fn new(betting_boxes: Vec<BettingBox>, shoe: Shoe) -> Table {
        Table {
            betting_boxes,
            dealer: Dealer::new(shoe),
            player_turn: 0,
            phase: RoundPhase::Dealing,
        }
    }

    pub fn betting_boxes(&self) -> &[BettingBox] {
        &self.betting_boxes
    }

    pub fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    pub fn player_turn(&self) -> usize {
        self.player_turn
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// The box the cursor points at. Only meaningful during player turns.
    pub fn current_betting_box(&self) -> &BettingBox {
        &self.betting_boxes[self.player_turn]
    }

    pub fn player_phase_in_progress(&self) -> bool {
        self.phase == RoundPhase::PlayerTurns
    }

    fn draw_card(&mut self) -> Result<Card, SimulationError> {
        self.dealer
            .shoe
            .deal_card()
            .ok_or(SimulationError::DeckExhausted)
    }

    /// Deals the opening cards hole-card style: one card to each box in
    /// table order, one to the dealer (the upcard), then a second card to
    /// each box. The dealer's hole card is drawn later, as the first draw of
    /// the dealer's turn.
    #[allowed_phase(Dealing)]
    pub fn initial_draw(mut self) -> Result<Table, SimulationError> {
        for i in 0..self.betting_boxes.len() {
            let card = self.draw_card()?;
            self.betting_boxes[i].hand = self.betting_boxes[i].hand.add_card(card);
        }
        let card = self.draw_card()?;
        self.dealer.hand = self.dealer.hand.add_card(card);
        for i in 0..self.betting_boxes.len() {
            let card = self.draw_card()?;
            self.betting_boxes[i].hand = self.betting_boxes[i].hand.add_card(card);
        }
        self.phase = RoundPhase::PlayerTurns;
        Ok(self)
    }

    /// Draws one card to the live box. The box stays live afterwards; the
    /// driver notices a bust on its next look at the table.
    #[allowed_phase(PlayerTurns)]
    pub fn hit(mut self) -> Result<Table, SimulationError> {
        if self.current_betting_box().hand.is_busted() {
            return Err(SimulationError::StateViolation(String::from(
                "cannot hit a busted hand",
            )));
        }
        let card = self.draw_card()?;
        let live = &mut self.betting_boxes[self.player_turn];
        live.hand = live.hand.add_card(card);
        Ok(self)
    }

    /// No card moves on a stand; the caller advances the turn. Standing a
    /// busted hand is a driver bug and is rejected.
    #[allowed_phase(PlayerTurns)]
    pub fn stand(self) -> Result<Table, SimulationError> {
        if self.current_betting_box().hand.is_busted() {
            return Err(SimulationError::StateViolation(String::from(
                "cannot stand a busted hand",
            )));
        }
        Ok(self)
    }

    /// Doubles the stake and draws exactly one card. The box is resolved
    /// afterwards whatever the outcome; the caller advances the turn.
    #[allowed_phase(PlayerTurns)]
    pub fn double_down(mut self) -> Result<Table, SimulationError> {
        if !self.current_betting_box().can_double_down() {
            let reason = if self.current_betting_box().is_split() {
                "a split box may not double down"
            } else {
                "can only double down on the first two cards"
            };
            return Err(SimulationError::StateViolation(String::from(reason)));
        }
        let card = self.draw_card()?;
        let live = &mut self.betting_boxes[self.player_turn];
        live.stake *= 2;
        live.hand = live.hand.add_card(card);
        Ok(self)
    }

    /// Replaces the live box with two split-flagged boxes in its slot, each
    /// keeping one of the original cards plus one fresh draw at the same
    /// stake. The cursor does not move: both new boxes still get played.
    #[allowed_phase(PlayerTurns)]
    pub fn split(mut self) -> Result<Table, SimulationError> {
        if !self.current_betting_box().can_split() {
            return Err(SimulationError::StateViolation(String::from(
                "can only split a fresh pair of equal-valued cards",
            )));
        }
        let original = self.betting_boxes.remove(self.player_turn);
        let cards = original.hand.cards();
        let (first, second) = (cards[0], cards[1]);

        let mut left = BettingBox {
            hand: Hand::new().add_card(first),
            player: original.player.clone(),
            stake: original.stake,
            split: true,
        };
        let mut right = BettingBox {
            hand: Hand::new().add_card(second),
            player: original.player,
            stake: original.stake,
            split: true,
        };
        left.hand = left.hand.add_card(self.draw_card()?);
        right.hand = right.hand.add_card(self.draw_card()?);

        self.betting_boxes.insert(self.player_turn, right);
        self.betting_boxes.insert(self.player_turn, left);
        Ok(self)
    }

    /// Moves the cursor to the next box. Once the cursor passes the last
    /// box the player phase is over and the dealer's turn begins.
    pub fn advance_turn(mut self) -> Table {
        self.player_turn += 1;
        if self.player_turn >= self.betting_boxes.len() {
            self.phase = RoundPhase::DealerTurn;
        }
        self
    }

    /// The dealer draws the hole card, then keeps hitting while the best
    /// playable total is under 17. Drawing stops on any total in [17, 21]
    /// or when the hand busts.
    #[allowed_phase(DealerTurn)]
    pub fn dealer_play(mut self) -> Result<Table, SimulationError> {
        let hole_card = self.draw_card()?;
        self.dealer.hand = self.dealer.hand.add_card(hole_card);
        while let Some(total) = self.dealer.hand.largest_playable_total() {
            if total >= 17 {
                break;
            }
            let card = self.draw_card()?;
            self.dealer.hand = self.dealer.hand.add_card(card);
        }
        self.phase = RoundPhase::Settled;
        Ok(self)
    }

    /// Resolves every box independently against the one dealer hand.
    #[allowed_phase(Settled)]
    pub fn settle(&self) -> Result<Vec<BoxOutcome>, SimulationError> {
        Ok(self
            .betting_boxes
            .iter()
            .map(|betting_box| outcome::resolve(betting_box, &self.dealer))
            .collect())
    }
}
