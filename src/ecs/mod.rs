pub mod components;
pub mod store;

pub use components::{Component, ComponentKind};
pub use store::Store;
