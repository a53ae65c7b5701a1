//! The adapter module holds the implementation of tools required by the services.
//! The different adapters perform operations that involve IOs like reading the
//! profile file, talking to a node or asking the user. (more generally, the
//! outside world)

mod announcer;
mod profile_storage;
mod prompt;

pub use announcer::*;
pub use profile_storage::*;
pub use prompt::*;
