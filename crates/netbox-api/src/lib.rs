// netbox-api: Async Rust client for the NetBox REST API

pub mod client;
pub mod error;
pub mod transport;

pub use client::NetboxClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
