//! Player actions and the legal-action resolver.

use core::fmt;

use crate::hand::Hand;

/// A decision a player can make on a live hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Draw one card.
    Hit,
    /// Keep the hand as it is.
    Stand,
    /// Double the bet, draw exactly one card and stop.
    Double,
    /// Split a pair into two hands.
    Split,
    /// Give up half the bet and stop.
    Surrender,
}

impl Action {
    /// All actions, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Hit,
        Self::Stand,
        Self::Double,
        Self::Split,
        Self::Surrender,
    ];

    /// Single-letter code used at the table (`H`, `S`, `D`, `L`, `R`).
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Hit => 'H',
            Self::Stand => 'S',
            Self::Double => 'D',
            Self::Split => 'L',
            Self::Surrender => 'R',
        }
    }

    /// Parses a table code, case-insensitively.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'H' => Some(Self::Hit),
            'S' => Some(Self::Stand),
            'D' => Some(Self::Double),
            'L' => Some(Self::Split),
            'R' => Some(Self::Surrender),
            _ => None,
        }
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hit => "hit",
            Self::Stand => "stand",
            Self::Double => "double",
            Self::Split => "split",
            Self::Surrender => "surrender",
        })
    }
}

/// A set of actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ActionSet(u8);

impl ActionSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Returns a copy of the set with `action` added.
    #[must_use]
    pub const fn with(self, action: Action) -> Self {
        Self(self.0 | action.bit())
    }

    /// Returns whether `action` is in the set.
    #[must_use]
    pub const fn contains(self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the actions in menu order.
    pub fn iter(self) -> impl Iterator<Item = Action> {
        Action::ALL.into_iter().filter(move |&a| self.contains(a))
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

/// Computes the legal actions for `hand`, given how many hands its owner
/// holds, the owner's balance and the table's hand limit.
///
/// Only live hands have legal actions. Hit and stand are always allowed;
/// double and surrender need an unsplit two-card hand; split needs a pair,
/// room for another hand and the balance to cover its bet.
#[must_use]
pub fn legal_actions(hand: &Hand, hand_count: usize, balance: usize, max_hands: usize) -> ActionSet {
    if !hand.is_live() {
        return ActionSet::EMPTY;
    }

    let mut set = ActionSet::EMPTY.with(Action::Hit).with(Action::Stand);
    let initial = hand.len() == 2;
    let covered = hand.bet() > 0 && hand.bet() <= balance;

    if initial && hand_count == 1 && covered {
        set = set.with(Action::Double);
    }
    if hand.is_pair() && hand_count < max_hands && covered {
        set = set.with(Action::Split);
    }
    if initial && hand_count == 1 {
        set = set.with(Action::Surrender);
    }

    set
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::card::{Card, Rank, Suit};
    use crate::hand::HandStatus;

    fn hand_of(bet: usize, ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new(bet);
        for &rank in ranks {
            hand.add_card(Card::new(rank, Suit::Diamond));
        }
        hand
    }

    #[test]
    fn fresh_pair_allows_everything() {
        let hand = hand_of(20, &[Rank::Eight, Rank::Eight]);
        let legal = legal_actions(&hand, 1, 100, 4);
        assert_eq!(legal.iter().collect::<Vec<_>>(), Action::ALL.to_vec());
    }

    #[test]
    fn unequal_cards_never_split() {
        let hand = hand_of(20, &[Rank::Eight, Rank::Nine]);
        let legal = legal_actions(&hand, 1, 1000, 4);
        assert!(!legal.contains(Action::Split));
        assert!(legal.contains(Action::Double));
    }

    #[test]
    fn split_hands_only_hit_stand_or_resplit() {
        let hand = hand_of(20, &[Rank::Eight, Rank::Eight]);
        let legal = legal_actions(&hand, 2, 100, 4);
        assert!(legal.contains(Action::Split));
        assert!(!legal.contains(Action::Double));
        assert!(!legal.contains(Action::Surrender));

        assert!(!legal_actions(&hand, 4, 100, 4).contains(Action::Split));
    }

    #[test]
    fn short_balance_blocks_double_and_split_but_not_surrender() {
        let hand = hand_of(20, &[Rank::Eight, Rank::Eight]);
        let legal = legal_actions(&hand, 1, 19, 4);
        assert_eq!(
            legal,
            [Action::Hit, Action::Stand, Action::Surrender]
                .into_iter()
                .collect()
        );
    }

    #[test]
    fn three_card_hand_only_hits_or_stands() {
        let hand = hand_of(20, &[Rank::Two, Rank::Three, Rank::Four]);
        let legal = legal_actions(&hand, 1, 100, 4);
        assert_eq!(legal, ActionSet::EMPTY.with(Action::Hit).with(Action::Stand));
    }

    #[test]
    fn finished_hands_have_no_actions() {
        let mut hand = hand_of(20, &[Rank::Ten, Rank::Six]);
        hand.set_status(HandStatus::Stand);
        assert!(legal_actions(&hand, 1, 100, 4).is_empty());
    }

    #[test]
    fn codes_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::from_code(action.code()), Some(action));
        }
        assert_eq!(Action::from_code('l'), Some(Action::Split));
        assert_eq!(Action::from_code('x'), None);
    }
}
