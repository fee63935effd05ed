//! Per-user session state

#[allow(clippy::module_inception)]
mod session;
mod registry;

pub use registry::{SessionRegistry, SessionRegistryConfig};
pub use session::Session;
