//! CLI blackjack example.
//!
//! Usage: `cargo run --example cli_blackjack -- [decks] [name...]`

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use blackjack_table::{
    Action, ActionSet, BetLimits, CancelToken, Card, Dealer, Game, GameOptions, Hand, Player,
    RoundError, Snapshot, Suit, Table, TableEvent,
};

/// Exit code used when the player quits or interrupts mid-game.
const EXIT_CANCELLED: u8 = 130;

struct Terminal {
    cancel: CancelToken,
}

impl Terminal {
    /// Reads one trimmed line. `None` means the input is closed or the user
    /// typed `q`, and cancels the game.
    fn prompt(&self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().lock().read_line(&mut input) {
            Ok(0) | Err(_) => {
                self.cancel.cancel();
                return None;
            }
            Ok(_) => {}
        }

        let input = input.trim().to_lowercase();
        if input == "q" || input == "quit" {
            self.cancel.cancel();
            return None;
        }
        Some(input)
    }
}

impl Table for Terminal {
    fn request_bet(&mut self, player: &Player, limits: BetLimits) -> usize {
        loop {
            let Some(input) = self.prompt(&format!(
                "{}, bet ({}-{}, multiples of {}): ",
                player.name(),
                limits.min,
                limits.max,
                limits.multiple
            )) else {
                return limits.min;
            };
            match input.parse::<usize>() {
                Ok(amount) if limits.allows(amount) => return amount,
                Ok(_) => println!("That bet is not allowed."),
                Err(_) => println!("Please enter a number."),
            }
        }
    }

    fn request_action(&mut self, player: &Player, hand_index: usize, legal: ActionSet) -> Action {
        let menu = legal
            .iter()
            .map(|action| format!("[{}]{action}", action.code()))
            .collect::<Vec<_>>()
            .join(" ");
        loop {
            let Some(input) = self.prompt(&format!(
                "{} hand {}: {menu}: ",
                player.name(),
                hand_index + 1
            )) else {
                return Action::Stand;
            };
            match input.chars().next().and_then(Action::from_code) {
                Some(action) if legal.contains(action) && input.len() == 1 => return action,
                _ => println!("Choose one of: {menu}"),
            }
        }
    }

    fn notify(&mut self, snapshot: &Snapshot) {
        match &snapshot.event {
            TableEvent::RoundStarted => {
                println!(
                    "\n=== Round {} === (shoe: {} cards, {} discarded)",
                    snapshot.round, snapshot.shoe_remaining, snapshot.shoe_discarded
                );
            }
            TableEvent::BetPlaced { .. } => {}
            TableEvent::Dealt | TableEvent::Acted { .. } | TableEvent::DealerPlayed { .. } => {
                print_table(snapshot);
            }
            TableEvent::Settled => {
                println!("--- Results ---");
                print_table(snapshot);
            }
            TableEvent::Eliminated { name, .. } => {
                println!("{name} is out of money and leaves the table.");
            }
        }
    }
}

fn print_table(snapshot: &Snapshot) {
    println!("\nDealer: {}", format_dealer(&snapshot.dealer));
    for (index, player) in snapshot.players.iter().enumerate() {
        println!("{} (balance {})", player.name(), player.balance());
        for (hand_index, hand) in player.hands().iter().enumerate() {
            let active = snapshot
                .turn
                .is_some_and(|t| t.player_index == index && t.hand_index == hand_index);
            println!(
                "{} Hand {}: {} | {} | bet {} | {}",
                if active { "*" } else { " " },
                hand_index + 1,
                format_hand(hand),
                hand.total(),
                hand.bet(),
                hand.status()
            );
        }
    }
    println!();
}

fn format_dealer(dealer: &Dealer) -> String {
    let hand = dealer.hand();
    if hand.is_empty() {
        return "(no cards)".to_string();
    }
    if dealer.is_hole_revealed() {
        return format!("{} | {} | {}", format_hand(hand), hand.total(), hand.status());
    }
    let up = dealer.up_card().map(format_card).unwrap_or_default();
    format!("{up} ?? | {}", dealer.visible_total())
}

fn format_hand(hand: &Hand) -> String {
    hand.cards()
        .iter()
        .map(format_card)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_card(card: &Card) -> String {
    let (suit, color_code) = match card.suit {
        Suit::Heart => ("H", "31"),
        Suit::Diamond => ("D", "31"),
        Suit::Clover => ("C", "32"),
        Suit::Spade => ("S", "34"),
    };
    format!("\u{1b}[{color_code}m{}{suit}\u{1b}[0m", card.rank.label())
}

fn main() -> ExitCode {
    println!("Blackjack CLI example (type 'q' to quit)");

    let mut args = std::env::args().skip(1);
    let decks = args.next().and_then(|d| d.parse().ok()).unwrap_or(1);
    let mut names: Vec<String> = args.collect();
    if names.is_empty() {
        names.push("you".to_string());
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let mut game = match Game::new(GameOptions::default().with_decks(decks), &names, seed) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("Cannot open the table: {err}");
            return ExitCode::FAILURE;
        }
    };

    let cancel = CancelToken::new();
    let interrupt = cancel.clone();
    // A blocked stdin read cannot observe the token, so leave from here.
    if let Err(err) = ctrlc::set_handler(move || {
        interrupt.cancel();
        println!("\nGoodbye.");
        std::process::exit(i32::from(EXIT_CANCELLED));
    }) {
        eprintln!("Cannot install the Ctrl+C handler: {err}");
    }

    let mut terminal = Terminal {
        cancel: cancel.clone(),
    };

    match game.play_session(&mut terminal, &cancel) {
        Ok(rounds) => {
            println!("Everyone is out of money after {rounds} round(s). Game over.");
            ExitCode::SUCCESS
        }
        Err(RoundError::Cancelled) => {
            println!("\nGoodbye.");
            ExitCode::from(EXIT_CANCELLED)
        }
        Err(err) => {
            eprintln!("Game error: {err}");
            ExitCode::FAILURE
        }
    }
}
