//! iotauth core library: action validation and state addressing.
//!
//! Implements the `iot_auth` transaction family:
//! - SHA-512 derived state addresses (namespace prefix + device digest +
//!   purpose digest)
//! - `store_key` / `verify_key` / `store_data` validation, with the data
//!   write gated by a fresh key verification
//! - State mutation through a pluggable key-value store
//!
//! Payloads arrive as UTF-8 JSON bytes; every failure is a typed
//! [`ApplyError`] raised before any state is touched for that action.

pub mod errors;
pub mod handler;
pub mod traits;
pub mod types;

pub use errors::ApplyError;
pub use handler::{AuthHandler, InMemoryStateStore};
pub use traits::StateStore;
pub use types::{
    make_address, Action, ActionPayload, FamilyConfig, Purpose, FAMILY_NAME, FAMILY_VERSION,
};

/// Library version string.
pub fn version() -> &'static str { "iotauth-core 0.1.0" }
