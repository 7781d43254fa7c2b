//! Round result types for showdown.

use alloc::string::String;
use alloc::vec::Vec;

use crate::hand::HandStatus;

/// Result for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandResult {
    /// The hand index (for split hands); the label is `index + 1`.
    pub hand_index: usize,
    /// Final status of the hand.
    pub status: HandStatus,
    /// Amount staked on the hand, including any double.
    pub staked: usize,
    /// Final bet, credited back to the player when the round is cleared.
    pub payout: usize,
    /// The hand's final value.
    pub value: u8,
}

/// Result for a single player after showdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerResult {
    /// The player ID.
    pub player_id: u8,
    /// The player name.
    pub name: String,
    /// Results for each hand (multiple if split).
    pub hands: Vec<HandResult>,
    /// Total payout for all hands.
    pub total_payout: usize,
    /// Net result (positive = profit, negative = loss).
    pub net: isize,
}

/// Result of the entire round after showdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    /// Round number, starting at 1.
    pub round: u32,
    /// Results for each player, in seating order.
    pub players: Vec<PlayerResult>,
    /// The dealer's final hand value.
    pub dealer_value: u8,
    /// The dealer's final status.
    pub dealer_status: HandStatus,
}

impl RoundResult {
    /// Returns the result for `player_id`.
    #[must_use]
    pub fn player(&self, player_id: u8) -> Option<&PlayerResult> {
        self.players.iter().find(|p| p.player_id == player_id)
    }
}
