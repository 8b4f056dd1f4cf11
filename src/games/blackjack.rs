//! Blackjack: shoe, hand evaluation, and the multi-step hand itself.
//!
//! Unlike the other games, a blackjack hand spans several interactions,
//! so resolution is split across [`BlackjackHand::deal`] and
//! [`BlackjackHand::play`]. Each hand owns its shoe exclusively; cards
//! are drawn from the top and never reshuffled mid-hand. Session
//! bookkeeping (ids, owners, timeouts) lives in
//! [`crate::games::sessions`].

use crate::config::BlackjackConfig;
use crate::games::types::{GameKind, HandConclusion, Outcome, Settlement, SettlementDetail};
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

const SUITS: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
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

const RANKS: [Rank; 13] = [
    Rank::Ace,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
];

impl Rank {
    /// Base counting value: face cards are 10, the ace starts at 11 and
    /// is softened during hand evaluation.
    fn base_value(&self) -> u8 {
        match self {
            Rank::Ace => 11,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self.suit {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
        };
        write!(f, "{}{}", self.rank, suit)
    }
}

/// Hand total with the standard soft/hard adjustment: aces count 11,
/// then drop to 1 one at a time while the total exceeds 21.
pub fn hand_total(cards: &[Card]) -> u8 {
    let mut total: u32 = cards.iter().map(|c| c.rank.base_value() as u32).sum();
    let mut aces = cards.iter().filter(|c| c.rank == Rank::Ace).count();
    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }
    total as u8
}

/// True when an ace is still counted as 11 in the current total.
pub fn is_soft(cards: &[Card]) -> bool {
    let mut total: u32 = cards.iter().map(|c| c.rank.base_value() as u32).sum();
    let mut aces = cards.iter().filter(|c| c.rank == Rank::Ace).count();
    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }
    aces > 0
}

/// A multi-deck shoe. Drawn cards are removed and never return.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
}

impl Shoe {
    /// Build `decks` decks and Fisher-Yates shuffle them with the
    /// injected source.
    pub fn shuffled(decks: u8, rng: &mut dyn RandomSource) -> Self {
        let mut cards = Vec::with_capacity(decks as usize * 52);
        for _ in 0..decks {
            for suit in SUITS {
                for rank in RANKS {
                    cards.push(Card { rank, suit });
                }
            }
        }
        for i in (1..cards.len()).rev() {
            let j = rng.next_below(i as u64 + 1) as usize;
            cards.swap(i, j);
        }
        Self { cards }
    }

    /// A shoe with a known card order; `cards[0]` is drawn first.
    /// Test scaffolding for forcing exact deals.
    #[cfg(test)]
    pub(crate) fn stacked(mut cards: Vec<Card>) -> Self {
        cards.reverse();
        Self { cards }
    }

    fn draw(&mut self) -> Card {
        // A single deck outlasts the longest possible hand, and decks
        // is validated > 0.
        self.cards.pop().expect("shoe holds enough cards for one hand")
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

/// Table difficulty. Easy pays wins at 3:2 and the presentation layer
/// shows running totals; hard pays 2:1 and hides them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Easy,
    Hard,
}

impl Mode {
    /// Profit on a winning hand, truncated toward zero.
    fn win_profit(&self, bet: u64) -> i64 {
        match self {
            Mode::Easy => (bet * 3 / 2) as i64,
            Mode::Hard => (bet * 2) as i64,
        }
    }
}

/// Player decision while the hand is live.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Hit,
    Stand,
}

/// What the player (or the presentation layer) may see mid-hand: the
/// full player hand plus the dealer's upcard. The hole card stays
/// hidden until resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableView {
    pub player: Vec<Card>,
    pub player_total: u8,
    pub player_soft: bool,
    pub dealer_upcard: Card,
}

/// Result of dealing a fresh hand.
pub enum Deal {
    /// A natural ended the hand before any player action.
    Settled(Settlement),
    InPlay(BlackjackHand),
}

/// Result of one player action.
pub enum HandProgress {
    Continue(BlackjackHand),
    Settled(Settlement),
}

/// One live blackjack hand: its shoe, both hands, and the table rules
/// it was dealt under.
#[derive(Debug, Clone)]
pub struct BlackjackHand {
    bet: u64,
    mode: Mode,
    shoe: Shoe,
    player: Vec<Card>,
    dealer: Vec<Card>,
    dealer_stand: u8,
    xp_per_win: u64,
}

impl BlackjackHand {
    /// Shuffle a shoe, deal two cards each, and check naturals. A
    /// dealer natural beats anything, including a player natural.
    pub fn deal(
        bet: u64,
        mode: Mode,
        config: &BlackjackConfig,
        xp_per_win: u64,
        rng: &mut dyn RandomSource,
    ) -> Deal {
        let shoe = Shoe::shuffled(config.decks, rng);
        Self::deal_from_shoe(bet, mode, shoe, config.dealer_stand, xp_per_win)
    }

    pub(crate) fn deal_from_shoe(
        bet: u64,
        mode: Mode,
        mut shoe: Shoe,
        dealer_stand: u8,
        xp_per_win: u64,
    ) -> Deal {
        let player = vec![shoe.draw(), shoe.draw()];
        let dealer = vec![shoe.draw(), shoe.draw()];
        let hand = Self {
            bet,
            mode,
            shoe,
            player,
            dealer,
            dealer_stand,
            xp_per_win,
        };

        if hand_total(&hand.dealer) == 21 {
            Deal::Settled(hand.settle(HandConclusion::DealerNatural))
        } else if hand_total(&hand.player) == 21 {
            Deal::Settled(hand.settle(HandConclusion::PlayerNatural))
        } else {
            Deal::InPlay(hand)
        }
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn view(&self) -> TableView {
        TableView {
            player: self.player.clone(),
            player_total: hand_total(&self.player),
            player_soft: is_soft(&self.player),
            dealer_upcard: self.dealer[0],
        }
    }

    /// Apply one player action. Hitting to 21 forces the stand; busting
    /// resolves immediately; standing hands the shoe to the dealer.
    pub fn play(mut self, action: Action) -> HandProgress {
        match action {
            Action::Hit => {
                let card = self.shoe.draw();
                self.player.push(card);
                match hand_total(&self.player) {
                    t if t > 21 => HandProgress::Settled(self.settle(HandConclusion::PlayerBust)),
                    21 => HandProgress::Settled(self.dealer_turn()),
                    _ => HandProgress::Continue(self),
                }
            }
            Action::Stand => HandProgress::Settled(self.dealer_turn()),
        }
    }

    /// Forfeit the hand: the wager is lost as if the player had busted.
    /// Used when a session times out.
    pub fn forfeit(self) -> Settlement {
        self.settle(HandConclusion::Forfeited)
    }

    /// Dealer draws to the stand threshold (soft totals count), then
    /// the hands are compared. Deterministic given the shoe.
    fn dealer_turn(mut self) -> Settlement {
        while hand_total(&self.dealer) < self.dealer_stand {
            let card = self.shoe.draw();
            self.dealer.push(card);
        }

        let player_total = hand_total(&self.player);
        let dealer_total = hand_total(&self.dealer);
        let conclusion = if dealer_total > 21 {
            HandConclusion::DealerBust
        } else if player_total > dealer_total {
            HandConclusion::PlayerHigher
        } else if player_total == dealer_total {
            HandConclusion::Push
        } else {
            HandConclusion::DealerHigher
        };
        self.settle(conclusion)
    }

    fn settle(self, conclusion: HandConclusion) -> Settlement {
        let (outcome, cash_delta) = match conclusion {
            HandConclusion::PlayerNatural
            | HandConclusion::DealerBust
            | HandConclusion::PlayerHigher => (Outcome::Win, self.mode.win_profit(self.bet)),
            HandConclusion::Push => (Outcome::Push, 0),
            HandConclusion::DealerNatural
            | HandConclusion::PlayerBust
            | HandConclusion::DealerHigher
            | HandConclusion::Forfeited => (Outcome::Loss, -(self.bet as i64)),
        };

        Settlement::from_result(
            GameKind::Blackjack,
            self.bet,
            outcome,
            cash_delta,
            self.xp_per_win,
            SettlementDetail::Blackjack {
                player_total: hand_total(&self.player),
                dealer_total: hand_total(&self.dealer),
                player: self.player,
                dealer: self.dealer,
                conclusion,
            },
        )
    }
}
