pub mod resolver;
pub mod stack;

pub use resolver::{resolve, ResolvedView, ViewProps};
pub use stack::NavigationStack;
