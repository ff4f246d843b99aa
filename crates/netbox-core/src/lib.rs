//! Object-type registry and dispatch layer between tool callers and NetBox.
//!
//! - **[`ObjectType`]**: the closed vocabulary of resource kinds (`devices`,
//!   `ip-addresses`, ...) and the REST collection each maps to, grouped by
//!   [`Domain`]. Unknown names fail with the sorted list of valid ones.
//!
//! - **[`Gateway`]**: one async method per operation: list, get, create,
//!   update, bulk create, change-log query, plus the composite device /
//!   interface / IP-assignment creators. Inputs are validated before any
//!   request is sent; NetBox's answers are returned as-is.
//!
//! - **[`CoreError`]**: local validation failures and remote failures,
//!   with NetBox's status and body preserved verbatim.

pub mod composite;
pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod registry;
pub mod status;

// ── Primary re-exports ──────────────────────────────────────────────
pub use composite::{IpAssignment, NewDevice, NewInterface};
pub use config::{GatewayConfig, TlsVerification};
pub use error::CoreError;
pub use gateway::{CHANGE_LOG_PATH, Gateway};
pub use model::{FilterSet, ObjectId, ObjectPayload};
pub use registry::{Domain, ObjectType};
pub use status::Status;
