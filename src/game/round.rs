//! Round driver: runs the engine against a presentation collaborator.
//!
//! The collaborator implements [`Table`]. It is asked for every bet and
//! every action, and receives a [`Snapshot`] after each change to the
//! table. Requests are synchronous; the [`CancelToken`] is checked on both
//! sides of every request.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::actions::{Action, ActionSet};
use crate::error::RoundError;
use crate::options::BetLimits;
use crate::player::{Dealer, Player};
use crate::result::RoundResult;

use super::{Game, GameState, TurnPosition};

/// Presentation side of the table: supplies decisions and renders snapshots.
///
/// Implementations are responsible for re-prompting until a decision is
/// valid. A bet outside the given [`BetLimits`] or an action outside the
/// given [`ActionSet`] aborts the round with the corresponding error.
pub trait Table {
    /// Asks `player` for this round's bet.
    fn request_bet(&mut self, player: &Player, limits: BetLimits) -> usize;

    /// Asks `player` what to do with hand `hand_index`.
    fn request_action(&mut self, player: &Player, hand_index: usize, legal: ActionSet) -> Action;

    /// Receives a read-only view of the table after a change.
    fn notify(&mut self, snapshot: &Snapshot);
}

/// What changed at the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// A new round started.
    RoundStarted,
    /// A player placed a bet.
    BetPlaced {
        /// Player id.
        player_id: u8,
        /// Bet amount.
        amount: usize,
    },
    /// Initial cards were dealt.
    Dealt,
    /// A player acted on a hand.
    Acted {
        /// Player id.
        player_id: u8,
        /// Hand index.
        hand_index: usize,
        /// The action taken.
        action: Action,
    },
    /// The dealer played out their hand.
    DealerPlayed {
        /// Number of cards the dealer drew.
        drawn: usize,
    },
    /// The round was settled.
    Settled,
    /// A player left the table for lack of funds.
    Eliminated {
        /// Player id.
        player_id: u8,
        /// Player name.
        name: String,
    },
}

/// An owned, read-only copy of the table state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// The change that produced this snapshot.
    pub event: TableEvent,
    /// Round number.
    pub round: u32,
    /// Decks in the shoe.
    pub decks: u8,
    /// Cards left in the draw pile.
    pub shoe_remaining: usize,
    /// Cards waiting in the discard pile.
    pub shoe_discarded: usize,
    /// Game state.
    pub state: GameState,
    /// Hand currently acting, if any.
    pub turn: Option<TurnPosition>,
    /// The dealer; the hole card stays hidden until it is revealed.
    pub dealer: Dealer,
    /// Players in seating order.
    pub players: Vec<Player>,
}

/// Shared flag used to abort play at the next decision point.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), RoundError> {
        if self.is_cancelled() {
            log::debug!("cancelled at a decision point");
            Err(RoundError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Game {
    /// Captures the current table state.
    #[must_use]
    pub fn snapshot(&self, event: TableEvent) -> Snapshot {
        Snapshot {
            event,
            round: self.round,
            decks: self.shoe.decks(),
            shoe_remaining: self.shoe.remaining(),
            shoe_discarded: self.shoe.discarded(),
            state: self.state,
            turn: self.current_turn(),
            dealer: self.dealer.clone(),
            players: self.players.clone(),
        }
    }

    /// Plays one full round against `table`, up to and including settlement.
    ///
    /// Call [`Game::clear_round`] afterwards to pay out and collect the cards,
    /// or use [`Game::play_session`].
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::Cancelled`] if `cancel` is set at a decision
    /// point, [`RoundError::NoPlayers`] if the table is empty, and the
    /// engine's error if the table supplies a bet or action that breaks the
    /// rules.
    ///
    /// Every error ends the session. The game stays in the phase where the
    /// round stopped (for example [`GameState::Betting`] or
    /// [`GameState::PlayerTurn`]), so a later call fails with an
    /// `InvalidState` error; drop the `Game` instead.
    pub fn play_round<T: Table>(
        &mut self,
        table: &mut T,
        cancel: &CancelToken,
    ) -> Result<RoundResult, RoundError> {
        if self.state == GameState::GameOver || self.players.is_empty() {
            return Err(RoundError::NoPlayers);
        }

        self.start_round()?;
        table.notify(&self.snapshot(TableEvent::RoundStarted));

        for index in 0..self.players.len() {
            let player = &self.players[index];
            let limits = self.options.bet_limits(player.balance());
            cancel.check()?;
            let amount = table.request_bet(player, limits);
            cancel.check()?;

            let player_id = player.id();
            self.bet(player_id, amount)?;
            table.notify(&self.snapshot(TableEvent::BetPlaced { player_id, amount }));
        }

        self.deal()?;
        table.notify(&self.snapshot(TableEvent::Dealt));

        while let Some(turn) = self.current_turn() {
            let player = &self.players[turn.player_index];
            let player_id = player.id();
            let legal = self.legal_actions(player_id, turn.hand_index)?;
            cancel.check()?;
            let action = table.request_action(player, turn.hand_index, legal);
            cancel.check()?;

            self.act(player_id, turn.hand_index, action)?;
            table.notify(&self.snapshot(TableEvent::Acted {
                player_id,
                hand_index: turn.hand_index,
                action,
            }));
        }

        let drawn = self.dealer_play()?.len();
        table.notify(&self.snapshot(TableEvent::DealerPlayed { drawn }));

        let result = self.showdown()?;
        table.notify(&self.snapshot(TableEvent::Settled));
        Ok(result)
    }

    /// Plays rounds until every player has left the table.
    ///
    /// Returns the number of rounds played.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Game::play_round`] or
    /// [`Game::clear_round`].
    pub fn play_session<T: Table>(
        &mut self,
        table: &mut T,
        cancel: &CancelToken,
    ) -> Result<u32, RoundError> {
        let mut rounds = 0;
        while self.state != GameState::GameOver {
            self.play_round(table, cancel)?;
            rounds += 1;

            for player in self.clear_round()? {
                table.notify(&self.snapshot(TableEvent::Eliminated {
                    player_id: player.id(),
                    name: player.name().into(),
                }));
            }
        }
        Ok(rounds)
    }
}
