use crate::error::{BetError, DealError};

use super::{Game, GameState, TurnPosition};

impl Game {
    /// Starts a new round and opens betting.
    ///
    /// # Errors
    ///
    /// Returns [`BetError::InvalidState`] unless the table is waiting for the
    /// next round.
    pub fn start_round(&mut self) -> Result<(), BetError> {
        if self.state != GameState::WaitingForBets {
            return Err(BetError::InvalidState);
        }

        self.round += 1;
        self.state = GameState::Betting;
        log::debug!(
            "round {} starts with {} player(s)",
            self.round,
            self.players.len()
        );
        Ok(())
    }

    /// Places the round's bet for the specified player, opening their hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in betting state, the player
    /// cannot be found or already bet, or the amount fails
    /// [`BetLimits::check`](crate::BetLimits::check) for the player's
    /// balance. A bet above the balance is therefore
    /// [`BetError::OutOfRange`].
    pub fn bet(&mut self, player_id: u8, amount: usize) -> Result<(), BetError> {
        if self.state != GameState::Betting {
            return Err(BetError::InvalidState);
        }

        let options = &self.options;
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id() == player_id)
            .ok_or(BetError::PlayerNotFound)?;

        if !player.hands().is_empty() {
            return Err(BetError::AlreadyBet);
        }
        options.bet_limits(player.balance()).check(amount)?;

        player.add_hand(amount)?;
        log::debug!("{} bets {amount}", player.name());
        Ok(())
    }

    /// Returns whether every player has placed a bet.
    #[must_use]
    pub fn all_bets_placed(&self) -> bool {
        self.players.iter().all(|p| p.hands().len() == 1)
    }

    /// Deals two cards to the dealer and to every player, one at a time,
    /// dealer first.
    ///
    /// Play then moves to the first live hand; if every hand is already
    /// finished (e.g. all blackjacks) it goes straight to the dealer.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in betting state, some player has
    /// not bet, or the shoe runs out of cards.
    pub fn deal(&mut self) -> Result<(), DealError> {
        if self.state != GameState::Betting {
            return Err(DealError::InvalidState);
        }
        if !self.all_bets_placed() {
            return Err(DealError::MissingBets);
        }

        for _ in 0..2 {
            let card = self.draw()?;
            self.dealer.hand_mut().add_card(card);

            for index in 0..self.players.len() {
                let card = self.draw()?;
                if let Some(hand) = self.players[index].hand_mut(0) {
                    hand.add_card(card);
                }
            }
        }

        log::debug!(
            "dealt round {}, dealer shows {}",
            self.round,
            self.dealer.visible_total()
        );

        self.state = if self.seek_live_hand(TurnPosition {
            player_index: 0,
            hand_index: 0,
        }) {
            GameState::PlayerTurn
        } else {
            GameState::DealerTurn
        };

        Ok(())
    }
}
