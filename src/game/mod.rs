//! Game engine and state management.

use alloc::string::String;
use alloc::vec::Vec;

use crate::card::Card;
use crate::error::{ConfigError, ShowdownError, SupplyError};
use crate::options::{GameOptions, MAX_SEATS};
use crate::player::{Dealer, Player};
use crate::shoe::Shoe;

mod actions;
mod bet;
mod dealer;
pub mod round;
pub mod state;

pub use dealer::{blackjack_payout, settle};
pub use round::{CancelToken, Snapshot, Table, TableEvent};
pub use state::{GameState, TurnPosition};

/// A blackjack table that manages players, betting, and round flow.
///
/// The game owns the shoe, the players and the dealer. A round runs through
/// [`Game::start_round`], one [`Game::bet`] per player, [`Game::deal`], the
/// player actions, [`Game::dealer_play`], [`Game::showdown`] and finally
/// [`Game::clear_round`]. [`Game::play_round`] drives the same steps against
/// a [`Table`].
#[derive(Debug, Clone)]
pub struct Game {
    options: GameOptions,
    shoe: Shoe,
    state: GameState,
    players: Vec<Player>,
    dealer: Dealer,
    turn: TurnPosition,
    round: u32,
}

impl Game {
    /// Creates a table seating `names` in order, shuffling the shoe with
    /// `seed`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the options or names are invalid. No
    /// state is created in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use blackjack_table::{Game, GameOptions, GameState};
    ///
    /// let game = Game::new(GameOptions::default().with_decks(2), &["ann", "bob"], 42).unwrap();
    /// assert_eq!(game.state(), GameState::WaitingForBets);
    /// assert_eq!(game.players().len(), 2);
    /// ```
    pub fn new<S: AsRef<str>>(
        options: GameOptions,
        names: &[S],
        seed: u64,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        options.validate_names(names)?;
        let shoe = Shoe::new(options.decks, seed)?;

        let players = names
            .iter()
            .enumerate()
            .map(|(id, name)| {
                let id = u8::try_from(id).map_err(|_| ConfigError::PlayerCount {
                    got: names.len(),
                    max: MAX_SEATS,
                })?;
                Ok(Player::new(id, String::from(name.as_ref()), options.starting_balance))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        log::debug!(
            "table opened with {} deck(s) and {} player(s)",
            options.decks,
            names.len()
        );

        Ok(Self {
            options,
            shoe,
            state: GameState::WaitingForBets,
            players,
            dealer: Dealer::new(),
            turn: TurnPosition {
                player_index: 0,
                hand_index: 0,
            },
            round: 0,
        })
    }

    /// Table options.
    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// The shoe.
    #[must_use]
    pub const fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Mutable access to the shoe, e.g. to [`Shoe::stack`] it.
    pub const fn shoe_mut(&mut self) -> &mut Shoe {
        &mut self.shoe
    }

    /// Returns the current game state.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Number of rounds started so far.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Players in seating order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns the player with `player_id`.
    #[must_use]
    pub fn player(&self, player_id: u8) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == player_id)
    }

    fn player_index(&self, player_id: u8) -> Option<usize> {
        self.players.iter().position(|p| p.id() == player_id)
    }

    /// The dealer.
    #[must_use]
    pub const fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    /// Returns the current turn position while players are acting.
    #[must_use]
    pub const fn current_turn(&self) -> Option<TurnPosition> {
        match self.state {
            GameState::PlayerTurn => Some(self.turn),
            _ => None,
        }
    }

    /// Returns the player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.current_turn()
            .and_then(|turn| self.players.get(turn.player_index))
    }

    /// Number of cards currently held by the dealer and all players.
    #[must_use]
    pub fn cards_in_play(&self) -> usize {
        self.dealer.hand().len()
            + self
                .players
                .iter()
                .flat_map(Player::hands)
                .map(crate::hand::Hand::len)
                .sum::<usize>()
    }

    /// Draws a card from the shoe.
    fn draw(&mut self) -> Result<Card, SupplyError> {
        self.shoe.draw_card()
    }

    /// Moves the turn to the first live hand at or after `from`, in seating
    /// order and then hand-creation order. Hands created by a split are
    /// appended, so they are reached after the hand that created them.
    ///
    /// Returns `false` when no live hand is left.
    fn seek_live_hand(&mut self, from: TurnPosition) -> bool {
        let mut position = from;
        while let Some(player) = self.players.get(position.player_index) {
            if let Some(offset) = player.hands()[position.hand_index.min(player.hands().len())..]
                .iter()
                .position(crate::hand::Hand::is_live)
            {
                self.turn = TurnPosition {
                    player_index: position.player_index,
                    hand_index: position.hand_index + offset,
                };
                return true;
            }
            position = TurnPosition {
                player_index: position.player_index + 1,
                hand_index: 0,
            };
        }

        self.turn = TurnPosition {
            player_index: self.players.len(),
            hand_index: 0,
        };
        false
    }

    /// Ends the round: credits every hand's final bet, returns all cards to
    /// the shoe, removes players who can no longer cover the minimum bet and
    /// rotates the seating order by one.
    ///
    /// Returns the removed players.
    ///
    /// # Errors
    ///
    /// Returns an error if the round has not been settled by
    /// [`Game::showdown`].
    pub fn clear_round(&mut self) -> Result<Vec<Player>, ShowdownError> {
        if self.state != GameState::RoundOver {
            return Err(ShowdownError::InvalidState);
        }

        self.shoe.return_cards(self.dealer.reset());
        for player in &mut self.players {
            for mut hand in player.take_hands() {
                player.credit(hand.bet());
                self.shoe.return_cards(hand.take_cards());
            }
        }

        let min_bet = self.options.min_bet;
        let (kept, removed): (Vec<Player>, Vec<Player>) = core::mem::take(&mut self.players)
            .into_iter()
            .partition(|p| p.has_balance(min_bet));
        self.players = kept;
        for player in &removed {
            log::debug!(
                "{} leaves the table with a balance of {}",
                player.name(),
                player.balance()
            );
        }

        if self.players.len() > 1 {
            self.players.rotate_left(1);
        }

        self.turn = TurnPosition {
            player_index: 0,
            hand_index: 0,
        };
        self.state = if self.players.is_empty() {
            GameState::GameOver
        } else {
            GameState::WaitingForBets
        };

        Ok(removed)
    }
}
