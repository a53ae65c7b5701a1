//! Service module
//!
//! Services can be considered as the business logic of the application. They are
//! used by the commands to perform operations on the data. They are responsible
//! for checking the values given by the user and the profiles before anything
//! gets signed.

mod options_resolver;
mod profile_manager;
mod restriction_service;

pub use options_resolver::*;
pub use profile_manager::*;
pub use restriction_service::*;
