//! Roombook demo binary
//!
//! Wires the real REST client to the feature stores and walks through the
//! session → guard flow against a live backend. Point it at one with
//! `ROOMBOOK_BACKEND_URL` (default `http://localhost:8080`); without a
//! backend it demonstrates the transport-failure path instead of crashing.

use roombook_api::RestClient;
use roombook_client::config::ClientConfig;
use roombook_client::guard::{HISTORY_PATH, HOME_PATH, LOGIN_PATH, decide};
use roombook_client::rooms::{RoomsAction, RoomsEnvironment, RoomsReducer, RoomsState};
use roombook_client::session::{SessionEnvironment, mount};
use roombook_client::util::format_date;
use roombook_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "roombook_client={0},roombook_runtime={0},roombook_api={0}",
                    config.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Roombook client demo ===\n");
    println!("Backend: {}", config.backend.base_url);

    let api = Arc::new(RestClient::new(config.backend.base_url.clone())?);

    // Mount the session store; this triggers its one identity fetch.
    let (session_store, mut resolve_handle) =
        mount(SessionEnvironment::new(api.clone())).await?;

    // While the fetch is in flight, every route waits.
    let snapshot = session_store.state(Clone::clone).await;
    println!(
        "\nWhile resolving, {HISTORY_PATH} -> {:?}",
        decide(HISTORY_PATH, &snapshot)
    );

    resolve_handle
        .wait_with_timeout(Duration::from_secs(10))
        .await?;

    let session = session_store.state(Clone::clone).await;
    match &session.identity {
        Some(profile) => println!("\nSigned in as {} ({:?})", profile.name, profile.role),
        None => println!("\nNo session (anonymous visitor)"),
    }
    if let Some(notice) = &session.last_notice {
        println!("Notice: {}", notice.message);
    }

    // The guard's verdict for the interesting routes.
    for path in [HOME_PATH, LOGIN_PATH, HISTORY_PATH] {
        println!("decide({path:?}) -> {:?}", decide(path, &session));
    }

    // If we are signed in, also load the available rooms.
    if session.is_authenticated() {
        let rooms_store = Store::new(
            RoomsState::new(),
            RoomsReducer::new(),
            RoomsEnvironment::new(api),
        );

        let mut handle = rooms_store.send(RoomsAction::Load).await?;
        handle.wait_with_timeout(Duration::from_secs(10)).await?;

        let rooms = rooms_store.state(|s| s.rooms.clone()).await;
        println!("\nAvailable rooms: {}", rooms.len());
        for room in &rooms {
            println!("  {} ({} open slots)", room.name, room.time_slots.len());
            for slot in &room.time_slots {
                println!(
                    "    {} - {}",
                    format_date(slot.start_date),
                    format_date(slot.end_date)
                );
            }
        }
        if let Some(notice) = rooms_store.state(|s| s.last_notice.clone()).await {
            println!("Notice: {}", notice.message);
        }
    }

    Ok(())
}
