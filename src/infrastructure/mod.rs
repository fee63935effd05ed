//! Infrastructure layer - artifact formats, sessions and services

pub mod artifacts;
pub mod logging;
pub mod services;
pub mod session;
