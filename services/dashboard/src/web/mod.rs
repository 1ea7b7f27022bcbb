pub mod actions;
pub mod analyzer_task;
pub mod auth;
pub mod middleware;
pub mod protocol;
pub mod rest;
pub mod session_provider;
pub mod state;
pub mod ws_handler;

// Re-export the pieces the binaries wire together.
pub use analyzer_task::{PipelineRunner, PipelineTimings};
pub use middleware::require_auth;
pub use rest::app_router;
pub use session_provider::SessionProvider;
pub use ws_handler::analyzer_ws_handler;
