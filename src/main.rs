#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod client_communication;
mod flight_control;
mod logger;
mod pose;
mod session;
mod smoothing;
mod world;

use crate::client_communication::ClientEndpoint;
use crate::session::{FlightSession, SessionRegistry};
use chrono::TimeDelta;
use std::{env, sync::Arc};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() {
    let bind_addr_var = env::var("SKYBOUND_BIND_ADDR");
    let bind_addr = bind_addr_var.as_ref().map_or(DEFAULT_BIND_ADDR, |v| v.as_str());
    let min_frame_interval = min_frame_interval();

    let registry = Arc::new(SessionRegistry::new(min_frame_interval));
    let cancel = CancellationToken::new();

    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl-C, shutting down"),
            Err(e) => error!("Failed to listen for Ctrl-C: {e}"),
        }
        cancel_clone.cancel();
    });

    let listener = TcpListener::bind(bind_addr)
        .await
        .unwrap_or_else(|e| fatal!("Failed to bind client endpoint to {bind_addr}: {e}"));
    info!(
        "Starting skybound with a minimum frame interval of {} ms",
        min_frame_interval.num_milliseconds()
    );

    if let Err(e) = ClientEndpoint::new(Arc::clone(&registry), cancel).run(listener).await {
        error!("Client endpoint failed: {e:?}");
    }
    info!("Shut down with {} sessions still open", registry.len().await);
}

fn min_frame_interval() -> TimeDelta {
    match env::var("SKYBOUND_MIN_FRAME_INTERVAL_MS").map(|v| v.parse::<i64>()) {
        Ok(Ok(ms)) if ms >= 0 => TimeDelta::milliseconds(ms),
        Ok(_) => {
            warn!("Ignoring invalid SKYBOUND_MIN_FRAME_INTERVAL_MS, using the default");
            FlightSession::DEFAULT_MIN_FRAME_INTERVAL
        }
        Err(_) => FlightSession::DEFAULT_MIN_FRAME_INTERVAL,
    }
}
