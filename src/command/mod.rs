//! # Command module
//!
//! The commands are controllers. They use services to check the user input
//! and adapters to reach the outside world.

mod account_mosaic_restriction;
mod announce;

pub use account_mosaic_restriction::*;
pub use announce::*;
