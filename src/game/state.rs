//! Game state types.

/// Game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Between rounds.
    WaitingForBets,
    /// Accepting one bet from every player.
    Betting,
    /// Waiting for player actions.
    PlayerTurn,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Dealer has played; the round can be settled.
    Showdown,
    /// Round is settled and can be cleared.
    RoundOver,
    /// No players are left at the table.
    GameOver,
}

/// Represents the current turn position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnPosition {
    /// Index into the seating order.
    pub player_index: usize,
    /// Index into the player's hands (for splits).
    pub hand_index: usize,
}
