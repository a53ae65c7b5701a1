use std::{fmt, str::FromStr};

use thiserror::Error;

/// Bit flagging a namespace identifier. Mosaic identifiers never carry it.
const NAMESPACE_FLAG: u64 = 1 << 63;

/// The error type for mosaic identifier parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MosaicIdError {
    /// The identifier must be exactly 16 hexadecimal digits.
    #[error("Mosaic id '{0}' must be 16 hexadecimal characters long.")]
    InvalidLength(String),

    /// The identifier contains non hexadecimal characters.
    #[error("Mosaic id '{0}' is not a valid hexadecimal value.")]
    InvalidHex(String),

    /// The identifier has the namespace bit set.
    #[error("'{0}' is a namespace id, not a mosaic id.")]
    NamespaceId(String),
}

/// Identifier of a mosaic, the network native asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MosaicId(u64);

impl MosaicId {
    /// Creates a mosaic identifier from its numeric value.
    ///
    /// ```
    /// use nem2_cli::model::{MosaicId, MosaicIdError};
    ///
    /// let id = MosaicId::new(0x6BED913FA20223F8).unwrap();
    /// assert_eq!(id.to_string(), "6BED913FA20223F8");
    ///
    /// // namespace identifiers have the highest bit set
    /// let error = MosaicId::new(0x85BBEA6CC462B244).unwrap_err();
    /// assert!(matches!(error, MosaicIdError::NamespaceId(_)));
    /// ```
    pub fn new(id: u64) -> Result<Self, MosaicIdError> {
        if id & NAMESPACE_FLAG != 0 {
            return Err(MosaicIdError::NamespaceId(format!("{id:016X}")));
        }

        Ok(Self(id))
    }

    /// Numeric value of the identifier.
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl FromStr for MosaicId {
    type Err = MosaicIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.len() != 16 {
            return Err(MosaicIdError::InvalidLength(value.to_string()));
        }
        if !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(MosaicIdError::InvalidHex(value.to_string()));
        }
        let id = u64::from_str_radix(value, 16)
            .map_err(|_| MosaicIdError::InvalidHex(value.to_string()))?;

        Self::new(id)
    }
}

impl fmt::Display for MosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016X}", self.0)
    }
}
