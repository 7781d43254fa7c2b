//! Players and the dealer.

use alloc::string::String;
use alloc::vec::Vec;

use crate::actions::{Action, legal_actions};
use crate::card::Card;
use crate::error::{ActionError, BetError};
use crate::hand::{Hand, HandTotal};

/// A seated player: a balance and the hands played this round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: u8,
    name: String,
    balance: usize,
    hands: Vec<Hand>,
}

impl Player {
    /// Creates a player with no hands.
    #[must_use]
    pub fn new(id: u8, name: impl Into<String>, balance: usize) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
            hands: Vec::new(),
        }
    }

    /// Stable player id.
    #[must_use]
    pub const fn id(&self) -> u8 {
        self.id
    }

    /// Player name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Balance not currently riding on a hand.
    #[must_use]
    pub const fn balance(&self) -> usize {
        self.balance
    }

    /// Hands in creation order. Hand `i` is labelled `Hand {i + 1}`.
    #[must_use]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Returns the hand at `index`.
    #[must_use]
    pub fn hand(&self, index: usize) -> Option<&Hand> {
        self.hands.get(index)
    }

    pub(crate) fn hand_mut(&mut self, index: usize) -> Option<&mut Hand> {
        self.hands.get_mut(index)
    }

    pub(crate) fn hands_mut(&mut self) -> &mut [Hand] {
        &mut self.hands
    }

    /// Returns whether the player can cover `amount` (which must be positive).
    #[must_use]
    pub const fn has_balance(&self, amount: usize) -> bool {
        amount > 0 && amount <= self.balance
    }

    /// Opens a new empty hand, debiting `bet` from the balance.
    ///
    /// # Errors
    ///
    /// Returns [`BetError::InsufficientBalance`] if the balance cannot cover
    /// the bet; nothing changes in that case.
    pub fn add_hand(&mut self, bet: usize) -> Result<(), BetError> {
        if !self.has_balance(bet) {
            return Err(BetError::InsufficientBalance);
        }
        self.balance -= bet;
        self.hands.push(Hand::new(bet));
        Ok(())
    }

    /// Doubles down on hand `index`: debits the bet again, doubles it and
    /// adds `card`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::IllegalAction`] when doubling is not legal for
    /// the hand, or [`ActionError::InsufficientBalance`] when the balance
    /// cannot cover the extra bet, without changing anything.
    pub fn double_down(
        &mut self,
        index: usize,
        card: Card,
        max_hands: usize,
    ) -> Result<(), ActionError> {
        self.check_action(index, Action::Double, max_hands)?;
        let hand = self.hands.get_mut(index).ok_or(ActionError::HandNotFound)?;
        self.balance -= hand.bet();
        hand.double_bet();
        hand.add_card(card);
        Ok(())
    }

    /// Splits hand `index` and returns the player as it is afterwards.
    ///
    /// The second card moves into a new hand appended after the others, with
    /// the same bet debited again. `fresh[0]` then goes to the original hand
    /// and `fresh[1]` to the new one. `self` is not modified.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::IllegalAction`] when the hand is not a pair or
    /// the player already holds `max_hands` hands, and
    /// [`ActionError::InsufficientBalance`] when the balance cannot cover
    /// another bet.
    pub fn split(
        &self,
        index: usize,
        fresh: [Card; 2],
        max_hands: usize,
    ) -> Result<Self, ActionError> {
        self.check_action(index, Action::Split, max_hands)?;

        let mut next = self.clone();
        let hand = next.hands.get_mut(index).ok_or(ActionError::HandNotFound)?;
        let bet = hand.bet();
        let moved = hand
            .take_split_card()
            .ok_or(ActionError::IllegalAction(Action::Split))?;
        hand.add_card(fresh[0]);

        let mut sibling = Hand::new(bet);
        sibling.add_card(moved);
        sibling.add_card(fresh[1]);

        next.balance -= bet;
        next.hands.push(sibling);
        Ok(next)
    }

    /// Checks that `action` is legal for hand `index`.
    pub(crate) fn check_action(
        &self,
        index: usize,
        action: Action,
        max_hands: usize,
    ) -> Result<(), ActionError> {
        let hand = self.hands.get(index).ok_or(ActionError::HandNotFound)?;
        if !hand.is_live() {
            return Err(ActionError::HandNotLive);
        }
        let count = self.hands.len();
        if legal_actions(hand, count, self.balance, max_hands).contains(action) {
            Ok(())
        } else if legal_actions(hand, count, usize::MAX, max_hands).contains(action) {
            Err(ActionError::InsufficientBalance)
        } else {
            Err(ActionError::IllegalAction(action))
        }
    }

    /// Credits `amount` to the balance.
    pub const fn credit(&mut self, amount: usize) {
        self.balance += amount;
    }

    /// Removes every hand, returning them.
    pub fn take_hands(&mut self) -> Vec<Hand> {
        core::mem::take(&mut self.hands)
    }
}

/// The dealer: one hand, no balance, and a hole card hidden until the
/// dealer plays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dealer {
    hand: Hand,
    hole_revealed: bool,
}

impl Dealer {
    /// Creates a dealer with an empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hand: Hand::new(0),
            hole_revealed: false,
        }
    }

    /// The dealer's hand.
    #[must_use]
    pub const fn hand(&self) -> &Hand {
        &self.hand
    }

    pub(crate) const fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    /// Returns the visible card (first card).
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.hand.cards().first()
    }

    /// Returns whether the hole card is revealed.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Reveals the hole card.
    pub const fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    /// Total a player can see: the up card alone while the hole card is
    /// hidden (an ace reads `1/11`), the full total afterwards.
    #[must_use]
    pub fn visible_total(&self) -> HandTotal {
        if self.hole_revealed {
            return self.hand.total();
        }
        match self.up_card() {
            Some(card) if card.is_ace() => HandTotal::Soft(card.value()),
            Some(card) => HandTotal::Hard(card.value()),
            None => HandTotal::Hard(0),
        }
    }

    /// Starts a new hand, returning the old cards.
    pub fn reset(&mut self) -> Vec<Card> {
        self.hole_revealed = false;
        core::mem::replace(&mut self.hand, Hand::new(0)).take_cards()
    }
}

impl Default for Dealer {
    fn default() -> Self {
        Self::new()
    }
}
