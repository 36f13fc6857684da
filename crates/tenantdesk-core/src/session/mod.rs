//! Session domain module.
//!
//! - `model`: the in-memory session and tenant context
//! - `keys`: storage key names per deployment profile
//! - `store`: the session store mirroring memory to durable storage

mod keys;
mod model;
mod store;

pub use keys::SessionKeys;
pub use model::{Session, TenantContext, parse_expiration, parse_expiration_in};
pub use store::{RestoreOutcome, SessionStore};
