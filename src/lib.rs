//! A multi-player blackjack table engine with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that runs rounds against one automated
//! dealer: betting, the initial deal, player actions (hit, stand, double,
//! split, surrender), the dealer's fixed policy and settlement. Presentation
//! stays outside the crate behind the [`Table`] trait.
//!
//! # Example
//!
//! ```
//! use blackjack_table::{Game, GameOptions, GameState};
//!
//! let mut game = Game::new(GameOptions::default(), &["ann"], 42).unwrap();
//! game.start_round().unwrap();
//! game.bet(0, 20).unwrap();
//! game.deal().unwrap();
//! assert!(matches!(game.state(), GameState::PlayerTurn | GameState::DealerTurn));
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod actions;
pub mod card;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod player;
pub mod result;
pub mod shoe;

// Re-export main types
pub use actions::{Action, ActionSet, legal_actions};
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use error::{
    ActionError, BetError, ConfigError, DealError, RoundError, ShowdownError, SupplyError,
};
pub use game::{
    CancelToken, Game, GameState, Snapshot, Table, TableEvent, TurnPosition, blackjack_payout,
    settle,
};
pub use hand::{Hand, HandStatus, HandTotal};
pub use options::{BetLimits, GameOptions, MAX_DECKS, MAX_SEATS};
pub use player::{Dealer, Player};
pub use result::{HandResult, PlayerResult, RoundResult};
pub use shoe::Shoe;
