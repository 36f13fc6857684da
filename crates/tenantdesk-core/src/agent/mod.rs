//! Agent domain module.

mod form;
mod model;

pub use form::AgentForm;
pub use model::{Agent, AgentSortField};
