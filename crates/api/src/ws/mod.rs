//! WebSocket stream of studio snapshots.
//!
//! Each connection receives the current snapshot on connect and then every
//! snapshot the [`StudioService`](crate::studio::StudioService) publishes.

mod handler;

pub use handler::ws_handler;
