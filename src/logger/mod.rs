//! Logger module
//!
//! Console output for the listener:
//! - the per-request block (see `format`)
//! - startup banner and lifecycle lines
//! - error and warning lines
//! - optional file targets for both streams

mod format;
pub mod writer;

pub use format::{BodyContent, RequestRecord};

use crate::config::Config;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    if writer::is_initialized() {
        writer::get().write_access(message);
    } else {
        println!("{message}");
    }
}

/// Write to error log
fn write_error(message: &str) {
    if writer::is_initialized() {
        writer::get().write_error(message);
    } else {
        eprintln!("{message}");
    }
}

/// Startup banner, printed after binding and before the accept loop.
pub fn log_server_start(config: &Config) {
    write_info(&format!(
        "Starting webhook listener on http://{}:{}",
        config.display_host(),
        config.server.port
    ));
    write_info("Press Ctrl+C to stop");
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
}

/// Emit one request block
pub fn log_request(record: &RequestRecord) {
    write_info(&record.format());
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_shutdown() {
    write_info("\n[SIGNAL] Listener stopped");
}
