//! Round driver integration tests.

use std::collections::VecDeque;

use blackjack_table::{
    Action, ActionError, ActionSet, BetError, BetLimits, CancelToken, Card, DECK_SIZE, Game,
    GameOptions, GameState, HandStatus, Player, Rank, RoundError, Snapshot, Suit, Table,
    TableEvent,
};

const fn card(rank: Rank) -> Card {
    Card::new(rank, Suit::Diamond)
}

/// Plays back fixed bets and actions, recording every snapshot.
#[derive(Default)]
struct Scripted {
    bets: VecDeque<usize>,
    actions: VecDeque<Action>,
    offered: Vec<ActionSet>,
    snapshots: Vec<Snapshot>,
    cancel_after_bets: Option<CancelToken>,
}

impl Scripted {
    fn new(bets: &[usize], actions: &[Action]) -> Self {
        Self {
            bets: bets.iter().copied().collect(),
            actions: actions.iter().copied().collect(),
            ..Self::default()
        }
    }

    fn events(&self) -> Vec<TableEvent> {
        self.snapshots.iter().map(|s| s.event.clone()).collect()
    }
}

impl Table for Scripted {
    fn request_bet(&mut self, _player: &Player, limits: BetLimits) -> usize {
        let amount = self.bets.pop_front().unwrap_or(limits.min);
        if self.bets.is_empty() {
            if let Some(token) = &self.cancel_after_bets {
                token.cancel();
            }
        }
        amount
    }

    fn request_action(&mut self, _player: &Player, _hand_index: usize, legal: ActionSet) -> Action {
        self.offered.push(legal);
        self.actions.pop_front().unwrap_or(Action::Stand)
    }

    fn notify(&mut self, snapshot: &Snapshot) {
        self.snapshots.push(snapshot.clone());
    }
}

/// Hits whatever it holds and always bets its whole balance.
struct AllIn {
    snapshots: usize,
}

impl Table for AllIn {
    fn request_bet(&mut self, player: &Player, limits: BetLimits) -> usize {
        let amount = player.balance().min(limits.max);
        amount - amount % limits.multiple
    }

    fn request_action(&mut self, _player: &Player, _hand_index: usize, _legal: ActionSet) -> Action {
        Action::Hit
    }

    fn notify(&mut self, snapshot: &Snapshot) {
        self.snapshots += 1;
        let held = snapshot.dealer.hand().len()
            + snapshot
                .players
                .iter()
                .flat_map(Player::hands)
                .map(|h| h.len())
                .sum::<usize>();
        assert_eq!(
            snapshot.shoe_remaining + snapshot.shoe_discarded + held,
            usize::from(snapshot.decks) * DECK_SIZE
        );
    }
}

fn stacked(names: &[&str], draws: &[Card]) -> Game {
    let mut game = Game::new(GameOptions::default().with_decks(2), names, 11).unwrap();
    game.shoe_mut().stack(draws).unwrap();
    game
}

#[test]
fn play_round_reports_each_step() {
    let mut game = stacked(
        &["ann", "bob"],
        &[
            card(Rank::Ten),   // dealer up
            card(Rank::Five),  // ann
            card(Rank::Ace),   // bob
            card(Rank::Seven), // dealer hole
            card(Rank::Six),   // ann
            card(Rank::King),  // bob
            card(Rank::Eight), // ann hit
            card(Rank::Three), // dealer draw
        ],
    );
    let mut table = Scripted::new(&[20, 30], &[Action::Hit, Action::Stand]);

    let result = game.play_round(&mut table, &CancelToken::new()).unwrap();

    assert_eq!(
        table.events(),
        [
            TableEvent::RoundStarted,
            TableEvent::BetPlaced {
                player_id: 0,
                amount: 20
            },
            TableEvent::BetPlaced {
                player_id: 1,
                amount: 30
            },
            TableEvent::Dealt,
            TableEvent::Acted {
                player_id: 0,
                hand_index: 0,
                action: Action::Hit
            },
            TableEvent::Acted {
                player_id: 0,
                hand_index: 0,
                action: Action::Stand
            },
            TableEvent::DealerPlayed { drawn: 1 },
            TableEvent::Settled,
        ]
    );

    // bob's blackjack never asks for an action
    assert_eq!(table.offered.len(), 2);
    assert!(table.offered[0].contains(Action::Double));
    assert!(!table.offered[1].contains(Action::Double));

    assert_eq!(result.round, 1);
    assert_eq!(result.dealer_value, 20);
    assert_eq!(result.player(0).unwrap().hands[0].status, HandStatus::Lost);
    assert_eq!(
        result.player(1).unwrap().hands[0].status,
        HandStatus::BlackJack
    );
    assert_eq!(result.player(1).unwrap().total_payout, 75);
    assert_eq!(game.state(), GameState::RoundOver);
}

#[test]
fn hole_card_stays_hidden_until_the_dealer_plays() {
    let mut game = stacked(
        &["ann"],
        &[
            card(Rank::Ace),   // dealer up
            card(Rank::Ten),   // ann
            card(Rank::Six),   // dealer hole
            card(Rank::Nine),  // ann
            card(Rank::Two),   // dealer draw
        ],
    );
    let mut table = Scripted::new(&[20], &[Action::Stand]);
    game.play_round(&mut table, &CancelToken::new()).unwrap();

    for snapshot in &table.snapshots {
        let revealed = matches!(
            snapshot.event,
            TableEvent::DealerPlayed { .. } | TableEvent::Settled
        );
        assert_eq!(snapshot.dealer.is_hole_revealed(), revealed);
        if snapshot.event == TableEvent::Dealt {
            assert_eq!(snapshot.dealer.visible_total().to_string(), "1/11");
            assert_eq!(snapshot.turn.unwrap().player_index, 0);
        }
    }
}

#[test]
fn illegal_action_aborts_the_round() {
    let mut game = stacked(
        &["ann"],
        &[
            card(Rank::Ten),   // dealer up
            card(Rank::Five),  // ann
            card(Rank::Seven), // dealer hole
            card(Rank::Six),   // ann
        ],
    );
    let mut table = Scripted::new(&[20], &[Action::Split]);

    let err = game
        .play_round(&mut table, &CancelToken::new())
        .unwrap_err();
    assert_eq!(err, RoundError::Action(ActionError::IllegalAction(Action::Split)));
    assert_eq!(game.state(), GameState::PlayerTurn);
    assert_eq!(game.player(0).unwrap().hands()[0].len(), 2);
}

#[test]
fn bad_bet_aborts_the_round() {
    let mut game = stacked(&["ann"], &[]);
    let mut table = Scripted::new(&[15], &[]);

    let err = game
        .play_round(&mut table, &CancelToken::new())
        .unwrap_err();
    assert_eq!(err, RoundError::Bet(BetError::NotMultiple(2)));
    assert_eq!(game.state(), GameState::Betting);
    assert_eq!(game.player(0).unwrap().balance(), 1000);

    // the aborted round cannot be resumed
    let mut retry = Scripted::new(&[20], &[]);
    assert_eq!(
        game.play_round(&mut retry, &CancelToken::new()).unwrap_err(),
        RoundError::Bet(BetError::InvalidState)
    );
}

#[test]
fn cancellation_stops_at_the_next_request() {
    let token = CancelToken::new();
    token.cancel();
    let mut game = stacked(&["ann"], &[]);
    let mut table = Scripted::new(&[20], &[]);

    assert_eq!(
        game.play_round(&mut table, &token).unwrap_err(),
        RoundError::Cancelled
    );
    assert_eq!(table.events(), [TableEvent::RoundStarted]);
    assert!(game.player(0).unwrap().hands().is_empty());
}

#[test]
fn cancellation_during_a_request_discards_the_answer() {
    let token = CancelToken::new();
    let mut game = stacked(&["ann", "bob"], &[]);
    let mut table = Scripted::new(&[20], &[]);
    table.cancel_after_bets = Some(token.clone());

    assert_eq!(
        game.play_round(&mut table, &token).unwrap_err(),
        RoundError::Cancelled
    );
    assert!(token.is_cancelled());
    assert!(game.player(0).unwrap().hands().is_empty());
    assert!(!table
        .events()
        .iter()
        .any(|event| matches!(event, TableEvent::BetPlaced { .. })));
}

#[test]
fn session_runs_until_everyone_is_broke() {
    let mut game = Game::new(
        GameOptions::default().with_starting_balance(200),
        &["ann", "bob", "cy"],
        2024,
    )
    .unwrap();
    let mut table = AllIn { snapshots: 0 };

    let rounds = game.play_session(&mut table, &CancelToken::new()).unwrap();

    assert!(rounds >= 1);
    assert_eq!(game.round(), rounds);
    assert_eq!(game.state(), GameState::GameOver);
    assert!(game.players().is_empty());
    assert_eq!(game.cards_in_play(), 0);
    assert_eq!(
        game.shoe().remaining() + game.shoe().discarded(),
        game.shoe().capacity()
    );
    assert!(table.snapshots > 0);
    assert_eq!(
        game.play_round(&mut table, &CancelToken::new()).unwrap_err(),
        RoundError::NoPlayers
    );
}

#[test]
fn session_reports_eliminations_and_rotates_seats() {
    let mut game = stacked(
        &["ann", "bob"],
        &[
            card(Rank::Ten),   // dealer up
            card(Rank::Ten),   // ann
            card(Rank::Jack),  // bob
            card(Rank::Nine),  // dealer hole
            card(Rank::Five),  // ann
            card(Rank::Queen), // bob
            card(Rank::King),  // ann hit
        ],
    );

    let mut table = Scripted::new(&[1000, 20], &[Action::Hit, Action::Stand]);
    let result = game.play_round(&mut table, &CancelToken::new()).unwrap();
    assert_eq!(result.player(0).unwrap().net, -1000);
    assert_eq!(result.player(1).unwrap().hands[0].status, HandStatus::Win);

    let removed = game.clear_round().unwrap();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].name(), "ann");
    assert_eq!(game.players().len(), 1);
    assert_eq!(game.players()[0].balance(), 1020);
    assert_eq!(game.state(), GameState::WaitingForBets);
}
