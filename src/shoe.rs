//! The shoe: a shuffled draw pile plus a discard pile that is recycled once
//! the draw pile runs dry.

use alloc::vec::Vec;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::{ConfigError, SupplyError};
use crate::options::MAX_DECKS;

/// Card supply shared by every hand at the table.
///
/// Every card of the `decks * 52` set is, at all times, either in the draw
/// pile, in the discard pile, or held by a hand.
#[derive(Debug, Clone)]
pub struct Shoe {
    draw: Vec<Card>,
    discard: Vec<Card>,
    decks: u8,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Builds `decks` full decks and shuffles them into the draw pile.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DeckCount`] if `decks` is zero or above the
    /// supported maximum.
    pub fn new(decks: u8, seed: u64) -> Result<Self, ConfigError> {
        if decks == 0 || decks > MAX_DECKS {
            return Err(ConfigError::DeckCount {
                got: decks,
                max: MAX_DECKS,
            });
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut draw = Vec::with_capacity(decks as usize * DECK_SIZE);
        for _ in 0..decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    draw.push(Card::new(rank, suit));
                }
            }
        }
        draw.shuffle(&mut rng);

        Ok(Self {
            draw,
            discard: Vec::new(),
            decks,
            rng,
        })
    }

    /// Draws the top card, recycling the discard pile when the draw pile is
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns [`SupplyError::Empty`] when both piles are empty, which only
    /// happens if cards were lost outside the draw/return protocol.
    pub fn draw_card(&mut self) -> Result<Card, SupplyError> {
        if self.draw.is_empty() {
            if self.discard.is_empty() {
                return Err(SupplyError::Empty);
            }
            log::warn!(
                "draw pile exhausted, reshuffling {} discarded cards",
                self.discard.len()
            );
            core::mem::swap(&mut self.draw, &mut self.discard);
            self.draw.shuffle(&mut self.rng);
        }

        let card = self.draw.pop().ok_or(SupplyError::Empty)?;
        log::trace!("drew {card}, {} left", self.draw.len());
        Ok(card)
    }

    /// Puts cards onto the discard pile.
    pub fn return_cards<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        self.discard.extend(cards);
    }

    /// Reorders the shoe so that `draws` are the next cards drawn, in order.
    ///
    /// The requested cards are taken from the draw and discard piles; every
    /// other card stays in the draw pile underneath them and the discard
    /// pile ends up empty. Intended for deterministic play and tests.
    ///
    /// # Errors
    ///
    /// Returns [`SupplyError::Empty`] if a requested card is not available in
    /// either pile. The shoe is left untouched in that case.
    pub fn stack(&mut self, draws: &[Card]) -> Result<(), SupplyError> {
        let mut pool: Vec<Card> = self.draw.iter().chain(&self.discard).copied().collect();
        for card in draws {
            let pos = pool
                .iter()
                .position(|c| c == card)
                .ok_or(SupplyError::Empty)?;
            pool.swap_remove(pos);
        }

        pool.extend(draws.iter().rev().copied());
        self.draw = pool;
        self.discard.clear();
        Ok(())
    }

    /// Number of decks the shoe was built from.
    #[must_use]
    pub const fn decks(&self) -> u8 {
        self.decks
    }

    /// Cards remaining in the draw pile.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.draw.len()
    }

    /// Cards waiting in the discard pile.
    #[must_use]
    pub fn discarded(&self) -> usize {
        self.discard.len()
    }

    /// Total number of cards the shoe accounts for (`decks * 52`).
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.decks as usize * DECK_SIZE
    }
}
