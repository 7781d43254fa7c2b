use crate::actions::{Action, ActionSet, legal_actions};
use crate::error::ActionError;
use crate::hand::HandStatus;

use super::{Game, GameState, TurnPosition};

impl Game {
    fn ensure_player_turn(&self, player_id: u8, hand_index: usize) -> Result<usize, ActionError> {
        if self.state != GameState::PlayerTurn {
            return Err(ActionError::InvalidState);
        }

        let player_index = self
            .player_index(player_id)
            .ok_or(ActionError::PlayerNotFound)?;
        let hand = self.players[player_index]
            .hand(hand_index)
            .ok_or(ActionError::HandNotFound)?;

        if self.turn.player_index != player_index || self.turn.hand_index != hand_index {
            return Err(ActionError::NotYourTurn);
        }
        if !hand.is_live() {
            return Err(ActionError::HandNotLive);
        }

        Ok(player_index)
    }

    /// Returns the actions the specified hand may take right now.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turn state, the player
    /// or hand cannot be found, or it is not that hand's turn.
    pub fn legal_actions(&self, player_id: u8, hand_index: usize) -> Result<ActionSet, ActionError> {
        let player_index = self.ensure_player_turn(player_id, hand_index)?;
        let player = &self.players[player_index];
        let hand = player.hand(hand_index).ok_or(ActionError::HandNotFound)?;

        Ok(legal_actions(
            hand,
            player.hands().len(),
            player.balance(),
            self.options.max_hands,
        ))
    }

    /// Applies `action` to the specified hand.
    ///
    /// When the hand stops being live the turn moves to the next live hand,
    /// and once none remain the dealer plays next.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::IllegalAction`] when `action` is not in
    /// [`Game::legal_actions`], or [`ActionError::InsufficientBalance`] when
    /// only the balance stands in the way of a double or split, plus the
    /// errors [`Game::legal_actions`] returns. Nothing changes when an error
    /// is returned.
    pub fn act(&mut self, player_id: u8, hand_index: usize, action: Action) -> Result<(), ActionError> {
        let player_index = self.ensure_player_turn(player_id, hand_index)?;
        let max_hands = self.options.max_hands;
        self.players[player_index].check_action(hand_index, action, max_hands)?;

        match action {
            Action::Hit => {
                let card = self.draw()?;
                let hand = self.players[player_index]
                    .hand_mut(hand_index)
                    .ok_or(ActionError::HandNotFound)?;
                hand.add_card(card);
            }
            Action::Stand => {
                let hand = self.players[player_index]
                    .hand_mut(hand_index)
                    .ok_or(ActionError::HandNotFound)?;
                hand.set_status(HandStatus::Stand);
            }
            Action::Double => {
                let card = self.draw()?;
                if let Err(err) = self.players[player_index].double_down(hand_index, card, max_hands) {
                    self.shoe.return_cards([card]);
                    return Err(err);
                }
            }
            Action::Split => {
                let first = self.draw()?;
                let second = match self.draw() {
                    Ok(card) => card,
                    Err(err) => {
                        self.shoe.return_cards([first]);
                        return Err(err.into());
                    }
                };
                match self.players[player_index].split(hand_index, [first, second], max_hands) {
                    Ok(next) => self.players[player_index] = next,
                    Err(err) => {
                        self.shoe.return_cards([first, second]);
                        return Err(err);
                    }
                }
            }
            Action::Surrender => {
                let hand = self.players[player_index]
                    .hand_mut(hand_index)
                    .ok_or(ActionError::HandNotFound)?;
                hand.surrender();
            }
        }

        let player = &self.players[player_index];
        if let Some(hand) = player.hand(hand_index) {
            log::debug!(
                "{} hand {}: {action} -> {} ({}), bet {}",
                player.name(),
                hand_index + 1,
                hand.total(),
                hand.status(),
                hand.bet()
            );
        }

        self.advance_after_action();
        Ok(())
    }

    fn advance_after_action(&mut self) {
        let turn = self.turn;
        let still_live = self.players[turn.player_index]
            .hand(turn.hand_index)
            .is_some_and(crate::hand::Hand::is_live);
        if still_live {
            return;
        }

        let next = TurnPosition {
            player_index: turn.player_index,
            hand_index: turn.hand_index + 1,
        };
        if !self.seek_live_hand(next) {
            log::debug!("all hands finished, dealer to play");
            self.state = GameState::DealerTurn;
        }
    }

    /// Player action: Hit (draw a card).
    ///
    /// # Errors
    ///
    /// See [`Game::act`].
    pub fn hit(&mut self, player_id: u8, hand_index: usize) -> Result<(), ActionError> {
        self.act(player_id, hand_index, Action::Hit)
    }

    /// Player action: Stand (keep current hand).
    ///
    /// # Errors
    ///
    /// See [`Game::act`].
    pub fn stand(&mut self, player_id: u8, hand_index: usize) -> Result<(), ActionError> {
        self.act(player_id, hand_index, Action::Stand)
    }

    /// Player action: Double down (double bet, receive one card, then stop).
    ///
    /// # Errors
    ///
    /// See [`Game::act`].
    pub fn double_down(&mut self, player_id: u8, hand_index: usize) -> Result<(), ActionError> {
        self.act(player_id, hand_index, Action::Double)
    }

    /// Player action: Split (split a pair into two hands).
    ///
    /// # Errors
    ///
    /// See [`Game::act`].
    pub fn split(&mut self, player_id: u8, hand_index: usize) -> Result<(), ActionError> {
        self.act(player_id, hand_index, Action::Split)
    }

    /// Player action: Surrender (forfeit half the bet).
    ///
    /// # Errors
    ///
    /// See [`Game::act`].
    pub fn surrender(&mut self, player_id: u8, hand_index: usize) -> Result<(), ActionError> {
        self.act(player_id, hand_index, Action::Surrender)
    }
}
