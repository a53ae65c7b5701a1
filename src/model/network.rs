use std::{
    fmt,
    str::FromStr,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use serde::Deserialize;
use thiserror::Error;

/// The error type for network type parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkTypeError {
    /// The network identifier is not known.
    #[error("Unknown network type '{0}'.")]
    UnknownNetworkType(String),
}

/// The fee must be an unsigned integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Max fee '{0}' is not a valid unsigned integer.")]
pub struct MaxFeeError(pub String);

/// Network the transaction is meant for. The value is the network byte
/// written in every transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "NetworkTypeRepr")]
pub enum NetworkType {
    MainNet = 0x68,
    TestNet = 0x98,
    Mijin = 0x60,
    MijinTest = 0x90,
}

/// Profiles may hold the network type either as its number or its name.
#[derive(Deserialize)]
#[serde(untagged)]
enum NetworkTypeRepr {
    Number(u8),
    Name(String),
}

impl TryFrom<NetworkTypeRepr> for NetworkType {
    type Error = NetworkTypeError;

    fn try_from(value: NetworkTypeRepr) -> Result<Self, Self::Error> {
        match value {
            NetworkTypeRepr::Number(number) => Self::try_from(number),
            NetworkTypeRepr::Name(name) => name.parse(),
        }
    }
}

impl NetworkType {
    pub fn value(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for NetworkType {
    type Error = NetworkTypeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x68 => Ok(Self::MainNet),
            0x98 => Ok(Self::TestNet),
            0x60 => Ok(Self::Mijin),
            0x90 => Ok(Self::MijinTest),
            _ => Err(NetworkTypeError::UnknownNetworkType(value.to_string())),
        }
    }
}

impl FromStr for NetworkType {
    type Err = NetworkTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_uppercase().replace('-', "_").as_str() {
            "MAIN_NET" | "MAINNET" => Ok(Self::MainNet),
            "TEST_NET" | "TESTNET" => Ok(Self::TestNet),
            "MIJIN" => Ok(Self::Mijin),
            "MIJIN_TEST" => Ok(Self::MijinTest),
            other => match other.parse::<u8>() {
                Ok(number) => Self::try_from(number),
                Err(_) => Err(NetworkTypeError::UnknownNetworkType(value.to_string())),
            },
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MainNet => "MAIN_NET",
            Self::TestNet => "TEST_NET",
            Self::Mijin => "MIJIN",
            Self::MijinTest => "MIJIN_TEST",
        };
        write!(f, "{name}")
    }
}

/// Maximum fee the signer accepts to pay, in absolute units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaxFee(u64);

impl MaxFee {
    pub fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub fn amount(&self) -> u64 {
        self.0
    }
}

impl FromStr for MaxFee {
    type Err = MaxFeeError;

    /// ```
    /// use nem2_cli::model::MaxFee;
    ///
    /// assert_eq!("2000000".parse::<MaxFee>().unwrap().amount(), 2_000_000);
    /// // no fee given means no fee
    /// assert_eq!("".parse::<MaxFee>().unwrap(), MaxFee::default());
    /// assert!("-1".parse::<MaxFee>().is_err());
    /// assert!("0.5".parse::<MaxFee>().is_err());
    /// ```
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Ok(Self::default());
        }
        if !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(MaxFeeError(value.to_string()));
        }
        value
            .parse::<u64>()
            .map(Self)
            .map_err(|_| MaxFeeError(value.to_string()))
    }
}

/// Time after which the network drops an unconfirmed transaction.
///
/// It is stored as milliseconds elapsed since the network epoch, which starts
/// `epoch_adjustment` seconds after the UNIX epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(u64);

impl Deadline {
    /// Lifetime given to transactions created by the CLI.
    pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(2 * 60 * 60);

    /// Deadline two hours from now.
    pub fn create(epoch_adjustment: u64) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();

        Self::from_unix_time(now + Self::DEFAULT_LIFETIME, epoch_adjustment)
    }

    /// Deadline at the given time since the UNIX epoch.
    ///
    /// ```
    /// use std::time::Duration;
    /// use nem2_cli::model::Deadline;
    ///
    /// let deadline = Deadline::from_unix_time(Duration::from_secs(1_615_853_195), 1_615_853_185);
    /// assert_eq!(deadline.value(), 10_000);
    ///
    /// // times before the network epoch saturate at zero
    /// let deadline = Deadline::from_unix_time(Duration::from_secs(10), 1_615_853_185);
    /// assert_eq!(deadline.value(), 0);
    /// ```
    pub fn from_unix_time(time: Duration, epoch_adjustment: u64) -> Self {
        let millis = u64::try_from(time.as_millis()).unwrap_or(u64::MAX);

        Self(millis.saturating_sub(epoch_adjustment.saturating_mul(1000)))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}
