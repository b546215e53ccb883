//! Cryptomotor server: HTTP surface, configuration and observability glue
//! around the core quote engine.

pub mod access_log;
pub mod api;
pub mod config;
pub mod error;
pub mod main_lib;
pub mod metrics;

pub use main_lib::{build_state, build_state_with_spot_source, init_tracing, AppState};
