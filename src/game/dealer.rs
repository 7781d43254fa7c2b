use core::cmp::Ordering;

use alloc::vec::Vec;

use crate::card::Card;
use crate::error::ShowdownError;
use crate::hand::{BLACKJACK, Hand, HandStatus};
use crate::result::{HandResult, PlayerResult, RoundResult};

use super::{Game, GameState};

/// The dealer keeps drawing while below this total (and below the best
/// player hand).
const DEALER_STANDS_AT: u8 = 18;

/// Amount returned for a winning blackjack: the bet plus 3:2, i.e. `bet * 2.5`
/// rounded half to even.
#[must_use]
pub const fn blackjack_payout(bet: usize) -> usize {
    let scaled = bet * 5;
    let half = scaled / 2;
    if scaled % 2 == 1 && half % 2 == 1 {
        half + 1
    } else {
        half
    }
}

fn pay_win(hand: &mut Hand) {
    if hand.status() == HandStatus::BlackJack {
        hand.settle_bet(blackjack_payout(hand.bet()));
    } else {
        hand.settle_bet(hand.bet() * 2);
        hand.set_status(HandStatus::Win);
    }
}

fn pay_loss(hand: &mut Hand) {
    hand.settle_bet(0);
    hand.set_status(HandStatus::Lost);
}

/// Settles player hands against the dealer's final hand, rewriting each
/// hand's bet to the amount it returns and its status to the outcome.
///
/// Busted and surrendered hands are left untouched. A winning blackjack keeps
/// its [`HandStatus::BlackJack`] label and is paid 3:2; any other winner
/// becomes [`HandStatus::Win`] and is paid 1:1. When the dealer did not bust,
/// the dealer ends as [`HandStatus::Neutral`] if any hand beat or tied it,
/// and [`HandStatus::Win`] otherwise.
pub fn settle<'a, I>(dealer: &mut Hand, hands: I)
where
    I: IntoIterator<Item = &'a mut Hand>,
{
    let dealer_value = dealer.value();
    let in_play = hands
        .into_iter()
        .filter(|hand| hand.value() <= BLACKJACK && hand.status() != HandStatus::Surrender);

    if dealer_value > BLACKJACK {
        in_play.for_each(pay_win);
        return;
    }

    let dealer_blackjack = dealer.status() == HandStatus::BlackJack;
    let mut beaten = false;

    for hand in in_play {
        let blackjack = hand.status() == HandStatus::BlackJack;
        match hand.value().cmp(&dealer_value) {
            Ordering::Greater => {
                pay_win(hand);
                beaten = true;
            }
            Ordering::Equal => match (blackjack, dealer_blackjack) {
                (true, false) => {
                    pay_win(hand);
                    beaten = true;
                }
                (false, true) => pay_loss(hand),
                (true, true) | (false, false) => {
                    hand.set_status(HandStatus::Push);
                    beaten = true;
                }
            },
            Ordering::Less => pay_loss(hand),
        }
    }

    dealer.set_status(if beaten {
        HandStatus::Neutral
    } else {
        HandStatus::Win
    });
}

impl Game {
    /// Dealer plays their hand.
    ///
    /// The dealer reveals the hole card. If every player hand is over 21 the
    /// dealer wins without drawing. Otherwise the dealer draws while below
    /// 18 and below the best player total that is still in play, then stands.
    ///
    /// Returns the cards drawn by the dealer.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in dealer turn state or the shoe is
    /// empty while the dealer must draw.
    pub fn dealer_play(&mut self) -> Result<Vec<Card>, ShowdownError> {
        if self.state != GameState::DealerTurn {
            return Err(ShowdownError::InvalidState);
        }

        self.dealer.reveal_hole();
        let mut drawn_cards = Vec::new();

        let player_max = self
            .players
            .iter()
            .flat_map(|p| p.hands())
            .map(Hand::value)
            .filter(|&value| value <= BLACKJACK)
            .max();

        if let Some(player_max) = player_max {
            while self.dealer.hand().value() < DEALER_STANDS_AT
                && self.dealer.hand().value() < player_max
            {
                let card = self.draw()?;
                self.dealer.hand_mut().add_card(card);
                drawn_cards.push(card);
            }
            if self.dealer.hand().is_live() {
                self.dealer.hand_mut().set_status(HandStatus::Stand);
            }
        } else {
            self.dealer.hand_mut().set_status(HandStatus::Win);
        }

        log::debug!(
            "dealer drew {} card(s), ends on {} ({})",
            drawn_cards.len(),
            self.dealer.hand().total(),
            self.dealer.hand().status()
        );

        self.state = GameState::Showdown;
        Ok(drawn_cards)
    }

    /// Settles the round and reports the outcome of every hand.
    ///
    /// Hand bets are rewritten to the amount each hand returns; balances are
    /// credited by [`Game::clear_round`].
    ///
    /// # Errors
    ///
    /// Returns an error if the dealer has not played yet.
    pub fn showdown(&mut self) -> Result<RoundResult, ShowdownError> {
        if self.state != GameState::Showdown {
            return Err(ShowdownError::InvalidState);
        }

        let dealer = self.dealer.hand_mut();
        settle(
            dealer,
            self.players
                .iter_mut()
                .flat_map(|p| p.hands_mut().iter_mut()),
        );

        let players = self
            .players
            .iter()
            .map(|player| {
                let hands: Vec<HandResult> = player
                    .hands()
                    .iter()
                    .enumerate()
                    .map(|(hand_index, hand)| {
                        log::debug!(
                            "{} hand {}: {} ({}), returns {}",
                            player.name(),
                            hand_index + 1,
                            hand.total(),
                            hand.status(),
                            hand.bet()
                        );
                        HandResult {
                            hand_index,
                            status: hand.status(),
                            staked: hand.staked(),
                            payout: hand.bet(),
                            value: hand.value(),
                        }
                    })
                    .collect();
                let total_payout: usize = hands.iter().map(|h| h.payout).sum();
                let total_staked: usize = hands.iter().map(|h| h.staked).sum();
                #[expect(clippy::cast_possible_wrap, reason = "payout values fit in isize")]
                let net = total_payout as isize - total_staked as isize;

                PlayerResult {
                    player_id: player.id(),
                    name: player.name().into(),
                    hands,
                    total_payout,
                    net,
                }
            })
            .collect();

        self.state = GameState::RoundOver;

        Ok(RoundResult {
            round: self.round,
            players,
            dealer_value: self.dealer.hand().value(),
            dealer_status: self.dealer.hand().status(),
        })
    }
}
