//! End-to-end game scenarios: a player sorts through the channel
//! driver, the sensor board reports over HTTP, and the player's session
//! reacts to the relayed event.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use ecoescape_core::config::{ChannelConfig, PuzzleConfig};
use ecoescape_core::{NoOpObserver, PuzzleSession};
use ecoescape_relay::{AppState, PuzzleConnection, Subscription, build_router};
use ecoescape_types::{ClientMessage, ServerMessage, SortOutcome, Stage, WasteCategory};
use tower::ServiceExt;

const DELIVERY_WAIT: Duration = Duration::from_millis(200);

struct Player {
    subscription: Subscription,
    connection: PuzzleConnection,
}

impl Player {
    async fn join(state: &AppState) -> Self {
        let subscription = state.registry.subscribe().await;
        let session = PuzzleSession::from_config(&state.puzzle).unwrap();
        let connection =
            PuzzleConnection::new(subscription.id(), session, Box::new(NoOpObserver));
        Self {
            subscription,
            connection,
        }
    }

    fn sort(&mut self, item: WasteCategory, bin: WasteCategory) -> Vec<ServerMessage> {
        self.connection
            .handle_client_message(ClientMessage::Sort { item, bin })
    }

    /// Wait for one relayed event and feed it to the session.
    async fn pump_one(&mut self) -> Vec<ServerMessage> {
        let signal = tokio::time::timeout(DELIVERY_WAIT, self.subscription.recv())
            .await
            .unwrap()
            .unwrap();
        self.connection.handle_energy(&signal)
    }

    fn stage(&self) -> Stage {
        self.connection.session().stage()
    }

    fn score(&self) -> u32 {
        self.connection.session().correct_sort_count()
    }
}

fn make_state() -> Arc<AppState> {
    Arc::new(AppState::new(
        PuzzleConfig { total_items: 5 },
        &ChannelConfig {
            subscriber_buffer: 8,
        },
    ))
}

async fn device_reports(state: &Arc<AppState>, status: &str) {
    let uri = format!("/update?status={status}");
    let response = build_router(Arc::clone(state))
        .oneshot(Request::get(&uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn five_correct_sorts_then_energy_completes_the_puzzle() {
    let state = make_state();
    let mut player = Player::join(&state).await;

    for category in WasteCategory::ALL {
        let out = player.sort(category, category);
        assert_eq!(out.first(), Some(&ServerMessage::Sorted(SortOutcome::Correct)));
    }
    assert_eq!(player.stage(), Stage::AwaitingEnergy);

    device_reports(&state, "ok").await;
    let out = player.pump_one().await;

    assert_eq!(
        out,
        vec![
            ServerMessage::Energy(String::from("ok")),
            ServerMessage::Stage(Stage::Complete),
            ServerMessage::Finished,
        ]
    );
    assert_eq!(player.score(), 5);
    assert_eq!(player.stage(), Stage::Complete);
}

#[tokio::test]
async fn wrong_bin_in_the_middle_delays_stage_two() {
    let state = make_state();
    let mut player = Player::join(&state).await;

    let [first, rest @ ..] = WasteCategory::ALL;
    for category in rest {
        player.sort(category, category);
    }
    assert_eq!(player.score(), 4);

    let out = player.sort(first, WasteCategory::Glass);
    assert_eq!(out, vec![ServerMessage::Sorted(SortOutcome::Incorrect)]);
    assert_eq!(player.stage(), Stage::Sorting);
    assert_eq!(player.score(), 4);

    let out = player.sort(first, first);
    assert_eq!(
        out,
        vec![
            ServerMessage::Sorted(SortOutcome::Correct),
            ServerMessage::Stage(Stage::AwaitingEnergy),
        ]
    );
    assert_eq!(player.score(), 5);
}

#[tokio::test]
async fn energy_before_sorting_is_done_is_forwarded_but_ignored() {
    let state = make_state();
    let mut player = Player::join(&state).await;
    player.sort(WasteCategory::Paper, WasteCategory::Paper);

    device_reports(&state, "ok").await;
    let out = player.pump_one().await;

    assert_eq!(out, vec![ServerMessage::Energy(String::from("ok"))]);
    assert_eq!(player.stage(), Stage::Sorting);
    assert_eq!(player.score(), 1);
}

#[tokio::test]
async fn every_connected_player_gets_exactly_one_event() {
    let state = make_state();
    let mut players = Vec::new();
    for _ in 0..3 {
        players.push(Player::join(&state).await);
    }

    device_reports(&state, "ok").await;

    for player in &mut players {
        assert!(player.subscription.try_recv().is_some());
        assert!(player.subscription.try_recv().is_none());
    }
}

#[tokio::test]
async fn report_before_anyone_joins_is_lost() {
    let state = make_state();
    device_reports(&state, "ok").await;

    let mut player = Player::join(&state).await;
    for category in WasteCategory::ALL {
        player.sort(category, category);
    }

    let waited = tokio::time::timeout(DELIVERY_WAIT, player.subscription.recv()).await;
    assert!(waited.is_err(), "missed events are not replayed");
    assert_eq!(player.stage(), Stage::AwaitingEnergy);
}

#[tokio::test]
async fn reconnecting_player_starts_over() {
    let state = make_state();
    let mut player = Player::join(&state).await;
    player.sort(WasteCategory::Metal, WasteCategory::Metal);
    let old_id = player.subscription.id();
    drop(player);
    state.registry.unsubscribe(old_id).await;

    let player = Player::join(&state).await;
    assert_ne!(player.subscription.id(), old_id);
    assert_eq!(player.score(), 0);
    assert_eq!(player.stage(), Stage::Sorting);
    assert_eq!(state.registry.len().await, 1);
}
