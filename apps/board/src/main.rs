use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{bail, Context, Result};
use board::{ActivityBoard, EventOutcome, SubmissionOutcome, UiEvent};
use clap::{Parser, Subcommand};
use client_core::HttpActivityClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "board", about = "Activity signup board client")]
struct Cli {
    /// Overrides the server url from config and environment.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long, default_value = "board.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the rendered board.
    Show,
    /// Sign a participant up for an activity.
    Signup {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
    /// Remove a participant from an activity.
    Unregister {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(&cli.config);
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }
    info!(server_url = %settings.server_url, "starting activity board");

    let client = HttpActivityClient::new(&settings.server_url, settings.request_timeout())
        .with_context(|| format!("cannot use server url '{}'", settings.server_url))?;
    let board = ActivityBoard::new(Arc::new(client), settings.board_options());

    let loaded = board.dispatch(UiEvent::PageLoaded).await;
    let mut ok = matches!(loaded, EventOutcome::Loaded(Ok(_)));

    match cli.command.unwrap_or(Command::Show) {
        Command::Show => {}
        Command::Signup { activity, email } => {
            board.dispatch(UiEvent::EmailInput(email)).await;
            if board
                .dispatch(UiEvent::ActivitySelected(activity.clone()))
                .await
                == EventOutcome::Ignored
            {
                bail!("activity '{activity}' is not on the board");
            }
            ok = report(board.dispatch(UiEvent::SignupSubmitted).await);
        }
        Command::Unregister { activity, email } => {
            let target = board
                .snapshot()
                .await
                .delete_control_path(&activity, &email);
            let outcome = match target {
                Some(target) => board.dispatch(UiEvent::ListClicked { target }).await,
                None => {
                    info!(%activity, %email, "participant not on the board; sending anyway");
                    EventOutcome::Submission(board.activate_unregister(&activity, &email).await)
                }
            };
            ok = report(outcome);
        }
    }

    println!("{}", board.snapshot().await.to_html());
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn report(outcome: EventOutcome) -> bool {
    match outcome {
        EventOutcome::Submission(SubmissionOutcome::Succeeded { message }) => {
            eprintln!("{message}");
            true
        }
        EventOutcome::Submission(SubmissionOutcome::Failed(failure)) => {
            eprintln!("{}", failure.message);
            false
        }
        EventOutcome::Submission(SubmissionOutcome::Blocked { field }) => {
            eprintln!("please fill out the {field} field");
            false
        }
        other => {
            eprintln!("nothing happened: {other:?}");
            false
        }
    }
}
