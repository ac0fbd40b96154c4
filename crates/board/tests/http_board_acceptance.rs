use std::{sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use board::{ActivityBoard, BoardOptions, EventOutcome, MessageKind, SubmissionOutcome, UiEvent};
use client_core::{HttpActivityClient, DEFAULT_REQUEST_TIMEOUT};
use serde::{Deserialize, Serialize};
use shared::{
    domain::{ActivityDetails, ActivitySet},
    protocol::MutationResponse,
};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Deserialize)]
struct ParticipantQuery {
    email: String,
}

/// Rejection body, `{"detail": "..."}`.
#[derive(Serialize)]
struct ErrorDetail {
    detail: String,
}

impl ErrorDetail {
    fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[derive(Clone)]
struct ServerState {
    activities: Arc<Mutex<ActivitySet>>,
    activity_fetches: Arc<Mutex<u32>>,
}

type Rejection = (StatusCode, Json<ErrorDetail>);

async fn list_activities(State(state): State<ServerState>) -> Json<ActivitySet> {
    *state.activity_fetches.lock().await += 1;
    Json(state.activities.lock().await.clone())
}

async fn signup(
    State(state): State<ServerState>,
    Path(activity): Path<String>,
    Query(query): Query<ParticipantQuery>,
) -> Result<Json<MutationResponse>, Rejection> {
    let mut activities = state.activities.lock().await;
    let details = activities.0.get_mut(&activity).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorDetail::new("Activity not found")),
        )
    })?;
    if details.participants.contains(&query.email) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorDetail::new("Already registered")),
        ));
    }
    details.participants.push(query.email);
    Ok(Json(MutationResponse::message("Signed up!")))
}

async fn unregister(
    State(state): State<ServerState>,
    Path(activity): Path<String>,
    Query(query): Query<ParticipantQuery>,
) -> Result<Json<MutationResponse>, Rejection> {
    let mut activities = state.activities.lock().await;
    let details = activities.0.get_mut(&activity).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorDetail::new("Activity not found")),
        )
    })?;
    let before = details.participants.len();
    details.participants.retain(|p| *p != query.email);
    if details.participants.len() == before {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorDetail::new("Participant not found")),
        ));
    }
    Ok(Json(MutationResponse::message(format!(
        "Removed {} from {activity}",
        query.email
    ))))
}

async fn spawn_activities_server() -> anyhow::Result<(String, ServerState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let mut activities = ActivitySet::new();
    activities.insert(
        "Chess Club",
        ActivityDetails {
            description: "Learn strategies and compete in chess tournaments".into(),
            schedule: "Fridays, 3:30 PM - 5:00 PM".into(),
            max_participants: 10,
            participants: vec!["a@x.com".into()],
        },
    );
    let state = ServerState {
        activities: Arc::new(Mutex::new(activities)),
        activity_fetches: Arc::new(Mutex::new(0)),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/activities", get(list_activities))
        .route("/activities/:activity/signup", post(signup))
        .route("/activities/:activity/participants", delete(unregister))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

async fn board_for(server_url: &str) -> ActivityBoard {
    let client = HttpActivityClient::new(server_url, DEFAULT_REQUEST_TIMEOUT).expect("client");
    let board = ActivityBoard::new(Arc::new(client), BoardOptions::default());
    assert_eq!(
        board.dispatch(UiEvent::PageLoaded).await,
        EventOutcome::Loaded(Ok(1))
    );
    board
}

#[tokio::test]
async fn chess_club_renders_with_tagged_delete_control() {
    let (server_url, _state) = spawn_activities_server().await.expect("server");
    let board = board_for(&server_url).await;

    let html = board.snapshot().await.to_html();
    assert!(html.contains("9 spots left"));
    assert!(html.contains(
        "<button class=\"delete-btn\" data-activity=\"Chess Club\" data-email=\"a@x.com\""
    ));
}

#[tokio::test]
async fn signup_round_trip_refetches_once() {
    let (server_url, state) = spawn_activities_server().await.expect("server");
    let board = board_for(&server_url).await;

    board
        .dispatch(UiEvent::EmailInput("b@x.com".into()))
        .await;
    board
        .dispatch(UiEvent::ActivitySelected("Chess Club".into()))
        .await;
    let outcome = board.dispatch(UiEvent::SignupSubmitted).await;
    assert_eq!(
        outcome,
        EventOutcome::Submission(SubmissionOutcome::Succeeded {
            message: "Signed up!".into()
        })
    );

    let document = board.snapshot().await;
    assert_eq!(document.message.kind(), Some(MessageKind::Success));
    assert_eq!(
        document.message.hide_after(),
        Some(Duration::from_millis(5000))
    );
    assert!(document.form.email.is_empty());
    assert!(document.delete_control_path("Chess Club", "b@x.com").is_some());
    assert_eq!(*state.activity_fetches.lock().await, 2);
}

#[tokio::test]
async fn duplicate_signup_shows_server_detail() {
    let (server_url, state) = spawn_activities_server().await.expect("server");
    let board = board_for(&server_url).await;

    board
        .dispatch(UiEvent::EmailInput("a@x.com".into()))
        .await;
    board
        .dispatch(UiEvent::ActivitySelected("Chess Club".into()))
        .await;
    board.dispatch(UiEvent::SignupSubmitted).await;

    let document = board.snapshot().await;
    assert_eq!(document.message.text(), "Already registered");
    assert_eq!(document.message.kind(), Some(MessageKind::Error));
    assert_eq!(document.form.email, "a@x.com");
    assert_eq!(document.form.activity, "Chess Club");
    assert_eq!(*state.activity_fetches.lock().await, 1);
}

#[tokio::test]
async fn unregister_click_then_stale_click() {
    let (server_url, state) = spawn_activities_server().await.expect("server");
    let board = board_for(&server_url).await;
    let target = board
        .snapshot()
        .await
        .delete_control_path("Chess Club", "a@x.com")
        .expect("control");

    let outcome = board.dispatch(UiEvent::ListClicked { target }).await;
    assert_eq!(
        outcome,
        EventOutcome::Submission(SubmissionOutcome::Succeeded {
            message: "Removed a@x.com from Chess Club".into()
        })
    );
    assert_eq!(*state.activity_fetches.lock().await, 2);
    assert!(board.snapshot().await.delete_controls().is_empty());

    // The control is gone from the render, but an activation still goes to the server.
    board.activate_unregister("Chess Club", "a@x.com").await;
    let document = board.snapshot().await;
    assert_eq!(document.message.text(), "Participant not found");
    assert_eq!(
        document.message.hide_after(),
        Some(Duration::from_millis(4000))
    );
    assert_eq!(*state.activity_fetches.lock().await, 2);
}
