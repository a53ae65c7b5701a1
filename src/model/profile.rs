use serde::Deserialize;

use super::{Account, NetworkType};

/// Epoch adjustment of the public networks, in seconds since the UNIX epoch.
pub const DEFAULT_EPOCH_ADJUSTMENT: u64 = 1_615_853_185;

/// A profile as stored in the profile file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    /// Hexadecimal private key of the account.
    pub private_key: String,

    pub network_type: NetworkType,

    /// REST gateway of the node to announce transactions to.
    pub url: String,

    /// Hexadecimal generation hash of the network.
    pub network_generation_hash: String,

    /// Network epoch, in seconds since the UNIX epoch.
    #[serde(default = "default_epoch_adjustment")]
    pub epoch_adjustment: u64,
}

fn default_epoch_adjustment() -> u64 {
    DEFAULT_EPOCH_ADJUSTMENT
}

/// A wallet profile ready to sign and announce transactions.
#[derive(Debug, Clone)]
pub struct Profile {
    pub name: String,
    pub account: Account,
    pub url: String,
    pub network_type: NetworkType,
    pub network_generation_hash: [u8; 32],
    pub epoch_adjustment: u64,
}
