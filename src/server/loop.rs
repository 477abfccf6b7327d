// Accept loop module
// Runs until a shutdown signal fires; one spawned task per connection

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::handle_connection;
use crate::config::Config;
use crate::logger;

/// Accept connections until shutdown is signalled.
///
/// A failed accept is logged and the loop keeps going; connections already
/// being served are not tracked or drained on shutdown.
#[allow(clippy::ignored_unit_patterns)]
pub async fn run(listener: TcpListener, config: Arc<Config>, shutdown: Arc<Notify>) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, _peer_addr)) => {
                        handle_connection(stream, Arc::clone(&config));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = shutdown.notified() => {
                logger::log_shutdown();
                return;
            }
        }
    }
}
