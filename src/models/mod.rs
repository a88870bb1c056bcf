//! Data models for the FamilyTree client.
//!
//! These models match the backend wire format exactly (camelCase keys, MongoDB
//! style `_id` identifiers) for seamless interoperability.

mod node;
mod tree;
mod user;

pub use node::*;
pub use tree::*;
pub use user::*;
