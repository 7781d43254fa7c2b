//! Error types for table operations.

use thiserror::Error;

use crate::actions::Action;

/// Errors raised while validating the table configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Deck count outside the supported range.
    #[error("deck count must be between 1 and {max}, got {got}")]
    DeckCount {
        /// Requested deck count.
        got: u8,
        /// Largest supported deck count.
        max: u8,
    },
    /// Player count outside the supported range.
    #[error("player count must be between 1 and {max}, got {got}")]
    PlayerCount {
        /// Requested player count.
        got: usize,
        /// Largest supported player count.
        max: usize,
    },
    /// A player name is empty.
    #[error("player name is empty")]
    EmptyName,
    /// A player name exceeds the length limit.
    #[error("player name is longer than {max} characters")]
    NameTooLong {
        /// Maximum name length.
        max: usize,
    },
    /// Two players share a name.
    #[error("player names must be distinct")]
    DuplicateName,
    /// Bet limits are inconsistent.
    #[error("invalid bet limits")]
    BetLimits,
}

/// Errors raised by the shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SupplyError {
    /// Both the draw pile and the discard pile are empty.
    #[error("shoe has no cards left to draw, even after recycling the discard pile")]
    Empty,
}

/// Errors that can occur during betting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Invalid game state for betting.
    #[error("invalid game state for betting")]
    InvalidState,
    /// Player not found.
    #[error("player not found")]
    PlayerNotFound,
    /// Player already placed a bet this round.
    #[error("player already placed a bet this round")]
    AlreadyBet,
    /// Bet amount outside the table limits.
    #[error("bet must be between {min} and {max}")]
    OutOfRange {
        /// Minimum bet.
        min: usize,
        /// Maximum bet for this player.
        max: usize,
    },
    /// Bet amount is not a multiple of the table step.
    #[error("bet must be a multiple of {0}")]
    NotMultiple(usize),
    /// Insufficient balance.
    #[error("insufficient balance")]
    InsufficientBalance,
}

/// Errors that can occur during dealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// Invalid game state for dealing.
    #[error("invalid game state for dealing")]
    InvalidState,
    /// Some players have not placed a bet.
    #[error("not every player has placed a bet")]
    MissingBets,
    /// The shoe could not supply a card.
    #[error(transparent)]
    Supply(#[from] SupplyError),
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid game state for this action.
    #[error("invalid game state for this action")]
    InvalidState,
    /// Not this hand's turn.
    #[error("not this hand's turn")]
    NotYourTurn,
    /// Player not found.
    #[error("player not found")]
    PlayerNotFound,
    /// Hand not found.
    #[error("hand not found")]
    HandNotFound,
    /// Hand is no longer live.
    #[error("hand is not live")]
    HandNotLive,
    /// Action is not in the legal set for this hand.
    #[error("{0} is not a legal action for this hand")]
    IllegalAction(Action),
    /// Insufficient balance for this action.
    #[error("insufficient balance for this action")]
    InsufficientBalance,
    /// The shoe could not supply a card.
    #[error(transparent)]
    Supply(#[from] SupplyError),
}

/// Errors that can occur while the dealer plays and the round settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShowdownError {
    /// Invalid game state for this step.
    #[error("invalid game state for showdown")]
    InvalidState,
    /// The shoe could not supply a card.
    #[error(transparent)]
    Supply(#[from] SupplyError),
}

/// Errors returned by the round driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// The cancel token was set at a decision point.
    #[error("round cancelled")]
    Cancelled,
    /// No players are left at the table.
    #[error("no players left at the table")]
    NoPlayers,
    /// A bet was rejected.
    #[error(transparent)]
    Bet(#[from] BetError),
    /// Dealing failed.
    #[error(transparent)]
    Deal(#[from] DealError),
    /// An action was rejected.
    #[error(transparent)]
    Action(#[from] ActionError),
    /// The dealer turn or settlement failed.
    #[error(transparent)]
    Showdown(#[from] ShowdownError),
}
