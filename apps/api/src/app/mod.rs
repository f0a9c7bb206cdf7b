pub mod context;
pub mod documents;
pub mod features;
pub mod session;

pub use context::AppContext;
pub use session::AppSession;
