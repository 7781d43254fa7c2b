//! Table configuration options.

use crate::error::{BetError, ConfigError};

/// Largest number of decks a shoe may hold.
pub const MAX_DECKS: u8 = 8;

/// Largest number of seats a table may have: one per `u8` player id.
pub const MAX_SEATS: usize = 256;

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use blackjack_table::GameOptions;
///
/// let options = GameOptions::default()
///     .with_decks(6)
///     .with_starting_balance(500);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOptions {
    /// Number of decks in the shoe (1 to [`MAX_DECKS`]).
    pub decks: u8,
    /// Balance each player starts with.
    pub starting_balance: usize,
    /// Smallest bet accepted; players below it are removed at round end.
    pub min_bet: usize,
    /// Largest bet accepted.
    pub max_bet: usize,
    /// Bets must be a multiple of this step.
    pub bet_multiple: usize,
    /// Most hands one player may hold after splitting.
    pub max_hands: usize,
    /// Most players at the table.
    pub max_players: usize,
    /// Longest player name, in characters.
    pub max_name_len: usize,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            decks: 1,
            starting_balance: 1000,
            min_bet: 10,
            max_bet: 1000,
            bet_multiple: 2,
            max_hands: 4,
            max_players: 7,
            max_name_len: 8,
        }
    }
}

impl GameOptions {
    /// Sets the number of decks.
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the starting balance.
    ///
    /// # Example
    ///
    /// ```
    /// use blackjack_table::GameOptions;
    ///
    /// let options = GameOptions::default().with_starting_balance(250);
    /// assert_eq!(options.starting_balance, 250);
    /// ```
    #[must_use]
    pub const fn with_starting_balance(mut self, balance: usize) -> Self {
        self.starting_balance = balance;
        self
    }

    /// Sets the minimum and maximum bet.
    #[must_use]
    pub const fn with_bet_range(mut self, min: usize, max: usize) -> Self {
        self.min_bet = min;
        self.max_bet = max;
        self
    }

    /// Sets the bet step.
    #[must_use]
    pub const fn with_bet_multiple(mut self, multiple: usize) -> Self {
        self.bet_multiple = multiple;
        self
    }

    /// Sets the maximum number of hands per player.
    #[must_use]
    pub const fn with_max_hands(mut self, hands: usize) -> Self {
        self.max_hands = hands;
        self
    }

    /// Checks the options for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DeckCount`] for a deck count outside
    /// `1..=MAX_DECKS`, [`ConfigError::PlayerCount`] for a seat limit outside
    /// `1..=MAX_SEATS`, or [`ConfigError::BetLimits`] for an empty bet range,
    /// a zero bet step or a zero hand limit.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.decks == 0 || self.decks > MAX_DECKS {
            return Err(ConfigError::DeckCount {
                got: self.decks,
                max: MAX_DECKS,
            });
        }
        if self.max_players == 0 || self.max_players > MAX_SEATS {
            return Err(ConfigError::PlayerCount {
                got: self.max_players,
                max: MAX_SEATS,
            });
        }
        if self.min_bet == 0
            || self.min_bet > self.max_bet
            || self.bet_multiple == 0
            || self.max_hands == 0
        {
            return Err(ConfigError::BetLimits);
        }
        Ok(())
    }

    /// Checks a list of player names against the table limits.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found: player count, empty or
    /// overlong names, or duplicates.
    pub fn validate_names<S: AsRef<str>>(&self, names: &[S]) -> Result<(), ConfigError> {
        if names.is_empty() || names.len() > self.max_players {
            return Err(ConfigError::PlayerCount {
                got: names.len(),
                max: self.max_players,
            });
        }

        for (index, name) in names.iter().enumerate() {
            let name = name.as_ref();
            if name.is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if name.chars().count() > self.max_name_len {
                return Err(ConfigError::NameTooLong {
                    max: self.max_name_len,
                });
            }
            if names[..index].iter().any(|other| other.as_ref() == name) {
                return Err(ConfigError::DuplicateName);
            }
        }

        Ok(())
    }

    /// Bet limits for a player holding `balance`.
    #[must_use]
    pub fn bet_limits(&self, balance: usize) -> BetLimits {
        BetLimits {
            min: self.min_bet,
            max: self.max_bet.min(balance),
            multiple: self.bet_multiple,
        }
    }
}

/// The bets a particular player may place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetLimits {
    /// Smallest accepted bet.
    pub min: usize,
    /// Largest accepted bet (table maximum capped by balance).
    pub max: usize,
    /// Required step.
    pub multiple: usize,
}

impl BetLimits {
    /// Checks `amount` against the limits.
    ///
    /// # Errors
    ///
    /// Returns [`BetError::OutOfRange`] outside `min..=max`, then
    /// [`BetError::NotMultiple`] when the amount is off the bet step.
    pub const fn check(&self, amount: usize) -> Result<(), BetError> {
        if amount < self.min || amount > self.max {
            return Err(BetError::OutOfRange {
                min: self.min,
                max: self.max,
            });
        }
        if amount % self.multiple != 0 {
            return Err(BetError::NotMultiple(self.multiple));
        }
        Ok(())
    }

    /// Returns whether `amount` is an acceptable bet.
    #[must_use]
    pub const fn allows(&self, amount: usize) -> bool {
        self.check(amount).is_ok()
    }
}
