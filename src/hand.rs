//! Hands, their calibrated totals and their status.

use core::fmt;

use alloc::vec::Vec;

use crate::card::Card;

/// Highest total that does not bust.
pub const BLACKJACK: u8 = 21;

/// Sums the cards with aces as 11, then softens aces one at a time while the
/// total busts. Returns the total and the number of aces still counted as 11.
fn calibrate(cards: &[Card]) -> (u8, u8) {
    let mut value: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        value = value.saturating_add(card.value());
    }

    while value > BLACKJACK && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    (value, aces)
}

/// Hand status.
///
/// `Live` hands still take actions. The rest are terminal for the turn loop;
/// `Win`, `Lost`, `Push` and `Neutral` are only assigned by settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandStatus {
    /// Hand is still in play.
    Live,
    /// Two cards totalling 21.
    BlackJack,
    /// Total over 21.
    Bust,
    /// Player stood.
    Stand,
    /// Player doubled down.
    Double,
    /// Player surrendered half the bet.
    Surrender,
    /// Hand won.
    Win,
    /// Hand lost.
    Lost,
    /// Hand tied the dealer.
    Push,
    /// Dealer marker: at least one player hand beat or tied the dealer.
    Neutral,
}

impl HandStatus {
    /// Label shown on the table. [`HandStatus::Neutral`] renders as `-`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Live => "Live",
            Self::BlackJack => "BlackJack",
            Self::Bust => "Bust",
            Self::Stand => "Stand",
            Self::Double => "Double",
            Self::Surrender => "Surrender",
            Self::Win => "Win",
            Self::Lost => "Lost",
            Self::Push => "Push",
            Self::Neutral => "-",
        }
    }
}

impl fmt::Display for HandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A calibrated hand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandTotal {
    /// No ace is counted as 11 (or the hand is bust).
    Hard(u8),
    /// At least one ace is still counted as 11; the low reading is `value - 10`.
    Soft(u8),
}

impl HandTotal {
    /// The calibrated value.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Hard(value) | Self::Soft(value) => value,
        }
    }
}

impl fmt::Display for HandTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Hard(value) => write!(f, "{value}"),
            Self::Soft(value) => write!(f, "{}/{value}", value - 10),
        }
    }
}

/// An ordered set of cards with a bet riding on it.
///
/// The total and status are recomputed on every change to the cards, so
/// they always agree with [`Hand::cards`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
    bet: usize,
    staked: usize,
    value: u8,
    soft_aces: u8,
    status: HandStatus,
}

impl Hand {
    /// Creates a new empty, live hand with the given bet.
    #[must_use]
    pub const fn new(bet: usize) -> Self {
        Self {
            cards: Vec::new(),
            bet,
            staked: bet,
            value: 0,
            soft_aces: 0,
            status: HandStatus::Live,
        }
    }

    /// Adds a card to the hand and recalibrates.
    ///
    /// Two cards totalling 21 become [`HandStatus::BlackJack`]; a total over
    /// 21 becomes [`HandStatus::Bust`] and forfeits the bet.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        self.recalibrate();

        if self.cards.len() == 2 && self.value == BLACKJACK {
            self.status = HandStatus::BlackJack;
        } else if self.value > BLACKJACK {
            self.status = HandStatus::Bust;
            self.bet = 0;
        }
    }

    /// Removes and returns the second card of a two-card hand (for splitting).
    ///
    /// The total is recalibrated; the status is left as it was.
    pub fn take_split_card(&mut self) -> Option<Card> {
        if self.cards.len() != 2 {
            return None;
        }
        let card = self.cards.pop();
        self.recalibrate();
        card
    }

    fn recalibrate(&mut self) {
        (self.value, self.soft_aces) = calibrate(&self.cards);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Takes every card out of the hand, leaving it empty.
    pub fn take_cards(&mut self) -> Vec<Card> {
        let cards = core::mem::take(&mut self.cards);
        self.recalibrate();
        cards
    }

    /// Returns the current status of the hand.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Sets the hand status.
    pub const fn set_status(&mut self, status: HandStatus) {
        self.status = status;
    }

    /// Returns whether the hand still takes actions.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self.status, HandStatus::Live)
    }

    /// Returns the bet riding on this hand.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Doubles the bet and marks the hand as doubled.
    pub const fn double_bet(&mut self) {
        self.staked += self.bet;
        self.bet *= 2;
        self.status = HandStatus::Double;
    }

    /// Total amount debited for this hand, including a double.
    #[must_use]
    pub const fn staked(&self) -> usize {
        self.staked
    }

    /// Gives up half the bet (rounded down) and marks the hand surrendered.
    pub const fn surrender(&mut self) {
        self.bet /= 2;
        self.status = HandStatus::Surrender;
    }

    /// Replaces the bet with a settled amount.
    pub(crate) const fn settle_bet(&mut self, bet: usize) {
        self.bet = bet;
    }

    /// The calibrated value: aces count as 11 unless that would bust.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Number of aces still counted as 11.
    #[must_use]
    pub const fn soft_aces(&self) -> u8 {
        self.soft_aces
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub const fn is_soft(&self) -> bool {
        self.soft_aces > 0 && self.value <= BLACKJACK
    }

    /// Returns the soft or hard total.
    ///
    /// Its `Display` form is the approximate value shown at the table, e.g.
    /// `7/17` for `[A, 6]`.
    #[must_use]
    pub const fn total(&self) -> HandTotal {
        if self.is_soft() {
            HandTotal::Soft(self.value)
        } else {
            HandTotal::Hard(self.value)
        }
    }

    /// Returns whether the hand is two cards of equal blackjack value.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        matches!(self.cards.as_slice(), [a, b] if a.value() == b.value())
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
