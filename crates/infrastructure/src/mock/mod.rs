//! Collection mock servers.
//!
//! Each running server answers the enabled mock responses of one collection.
//! Servers are keyed by collection id and shut down through a oneshot channel.

mod server;

pub use server::{AxumMockServer, router};
