//! HTTP protocol layer module
//!
//! Response builders shared by the handler and the server plumbing.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_405_response, build_413_response, build_ack_response, build_options_response,
};
