mod account;
mod mosaic;
mod network;
mod profile;
mod restriction;
mod transaction;

pub use account::*;
pub use mosaic::*;
pub use network::*;
pub use profile::*;
pub use restriction::*;
pub use transaction::*;
