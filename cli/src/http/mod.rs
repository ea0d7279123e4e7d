//! HTTP surface: admin settings page, settings update and the save-event API.

pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;

pub use models::*;
pub use server::*;
pub use state::*;
