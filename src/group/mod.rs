//! Group Module
//!
//! Cache-aside groups, their loader contract, and the registry that names
//! them.

mod cache_group;
mod getter;
mod registry;

pub use cache_group::Group;
pub use getter::{Getter, GetterFn};
pub use registry::GroupRegistry;
