//! User domain module.
//!
//! - `model`: login accounts listed per agent
//! - `form`: the registration body

mod form;
mod model;

pub use form::{DEFAULT_AGENT_ID, RegisterUserForm};
pub use model::{User, UserSortField};
