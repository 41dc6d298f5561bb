//! Request handlers.

pub mod detect;
pub mod health;
pub mod info;

pub use detect::*;
pub use health::*;
pub use info::*;
