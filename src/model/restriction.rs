use std::{fmt, str::FromStr};

use thiserror::Error;

use super::MosaicId;

/// The error type for restriction option parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestrictionError {
    /// Restriction type is neither `allow` nor `block`.
    #[error("Unknown restriction type '{0}', expected one of: allow, block.")]
    UnknownType(String),

    /// Restriction direction is neither `incoming` nor `outgoing`.
    #[error("Unknown restriction direction '{0}', expected one of: incoming, outgoing.")]
    UnknownDirection(String),

    /// The restriction target cannot be restricted in that direction.
    #[error("{target} restrictions cannot be applied to {direction} transactions.")]
    UnsupportedDirection {
        /// What the restriction applies to.
        target: RestrictionTarget,

        /// The requested direction.
        direction: RestrictionDirection,
    },
}

/// The error type for modification action parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModificationActionError {
    /// The action must be a binary value.
    #[error("Modification action '{0}' is invalid, expected 1 (Add) or 0 (Remove).")]
    NotBinary(String),
}

/// Whether matching transactions are allowed or blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictionType {
    /// Only matching transactions are accepted.
    Allow,

    /// Matching transactions are rejected.
    Block,
}

impl FromStr for RestrictionType {
    type Err = RestrictionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "block" => Ok(Self::Block),
            _ => Err(RestrictionError::UnknownType(value.to_string())),
        }
    }
}

impl fmt::Display for RestrictionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Block => write!(f, "block"),
        }
    }
}

/// Direction of the transactions a restriction applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictionDirection {
    Incoming,
    Outgoing,
}

impl FromStr for RestrictionDirection {
    type Err = RestrictionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "incoming" => Ok(Self::Incoming),
            "outgoing" => Ok(Self::Outgoing),
            _ => Err(RestrictionError::UnknownDirection(value.to_string())),
        }
    }
}

impl fmt::Display for RestrictionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incoming => write!(f, "incoming"),
            Self::Outgoing => write!(f, "outgoing"),
        }
    }
}

/// What an account restriction is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictionTarget {
    Address,
    Mosaic,
    TransactionType,
}

impl RestrictionTarget {
    fn flag(&self) -> u16 {
        match self {
            Self::Address => 0x0001,
            Self::Mosaic => 0x0002,
            Self::TransactionType => 0x0004,
        }
    }
}

impl fmt::Display for RestrictionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => write!(f, "Address"),
            Self::Mosaic => write!(f, "Mosaic"),
            Self::TransactionType => write!(f, "Transaction type"),
        }
    }
}

/// Add or remove a value from the account restrictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModificationAction {
    /// Encoded as `0`.
    Remove,

    /// Encoded as `1`.
    Add,
}

impl TryFrom<u8> for ModificationAction {
    type Error = ModificationActionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Remove),
            1 => Ok(Self::Add),
            _ => Err(ModificationActionError::NotBinary(value.to_string())),
        }
    }
}

impl FromStr for ModificationAction {
    type Err = ModificationActionError;

    /// ```
    /// use nem2_cli::model::{ModificationAction, ModificationActionError};
    ///
    /// assert_eq!("1".parse::<ModificationAction>().unwrap(), ModificationAction::Add);
    /// assert_eq!("0".parse::<ModificationAction>().unwrap(), ModificationAction::Remove);
    ///
    /// let error = "2".parse::<ModificationAction>().unwrap_err();
    /// assert_eq!(error, ModificationActionError::NotBinary("2".to_string()));
    /// ```
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .trim()
            .parse::<u8>()
            .map_err(|_| ModificationActionError::NotBinary(value.to_string()))
            .and_then(|action| {
                Self::try_from(action)
                    .map_err(|_| ModificationActionError::NotBinary(value.to_string()))
            })
    }
}

/// Flags of an account restriction as they are sent on the wire.
///
/// The lowest bits give the [RestrictionTarget], `0x4000` marks outgoing
/// restrictions and `0x8000` marks blocking ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountRestrictionFlags(u16);

impl AccountRestrictionFlags {
    const OUTGOING: u16 = 0x4000;
    const BLOCK: u16 = 0x8000;

    /// Allow incoming transactions containing the given mosaics.
    pub const ALLOW_MOSAIC: Self = Self(0x0002);

    /// Block incoming transactions containing the given mosaics.
    pub const BLOCK_MOSAIC: Self = Self(0x8002);

    /// Composes the flags for the given target, type and direction.
    ///
    /// ```
    /// use nem2_cli::model::{
    ///     AccountRestrictionFlags, RestrictionDirection, RestrictionTarget, RestrictionType,
    /// };
    ///
    /// let flags = AccountRestrictionFlags::new(
    ///     RestrictionTarget::Address,
    ///     RestrictionType::Block,
    ///     RestrictionDirection::Outgoing,
    /// );
    /// assert_eq!(flags.value(), 0xC001);
    /// ```
    pub fn new(
        target: RestrictionTarget,
        restriction_type: RestrictionType,
        direction: RestrictionDirection,
    ) -> Self {
        let mut flags = target.flag();

        if direction == RestrictionDirection::Outgoing {
            flags |= Self::OUTGOING;
        }
        if restriction_type == RestrictionType::Block {
            flags |= Self::BLOCK;
        }

        Self(flags)
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    pub fn is_block(&self) -> bool {
        self.0 & Self::BLOCK != 0
    }

    pub fn is_outgoing(&self) -> bool {
        self.0 & Self::OUTGOING != 0
    }
}

/// A single mosaic restriction change requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicRestrictionModification {
    pub action: ModificationAction,
    pub mosaic_id: MosaicId,
}

impl MosaicRestrictionModification {
    /// Creates a modification for the given mosaic.
    pub fn for_mosaic(action: ModificationAction, mosaic_id: MosaicId) -> Self {
        Self { action, mosaic_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_restriction_type() {
        assert_eq!("allow".parse::<RestrictionType>().unwrap(), RestrictionType::Allow);
        assert_eq!("BLOCK".parse::<RestrictionType>().unwrap(), RestrictionType::Block);
        assert_eq!(" Allow ".parse::<RestrictionType>().unwrap(), RestrictionType::Allow);
    }

    #[test]
    fn reject_unknown_restriction_type() {
        let error = "deny".parse::<RestrictionType>().unwrap_err();

        assert_eq!(error, RestrictionError::UnknownType("deny".to_string()));
        assert_eq!(
            error.to_string(),
            "Unknown restriction type 'deny', expected one of: allow, block."
        );
    }

    #[test]
    fn parse_restriction_direction() {
        assert_eq!(
            "incoming".parse::<RestrictionDirection>().unwrap(),
            RestrictionDirection::Incoming
        );
        assert_eq!(
            "Outgoing".parse::<RestrictionDirection>().unwrap(),
            RestrictionDirection::Outgoing
        );
    }

    #[test]
    fn reject_unknown_restriction_direction() {
        let error = "sideways".parse::<RestrictionDirection>().unwrap_err();

        assert_eq!(error, RestrictionError::UnknownDirection("sideways".to_string()));
    }

    #[test]
    fn reject_non_binary_action() {
        for value in ["2", "-1", "yes", "", "1.0", "256"] {
            let error = value.parse::<ModificationAction>().unwrap_err();

            assert_eq!(error, ModificationActionError::NotBinary(value.to_string()));
        }
        assert!(ModificationAction::try_from(3u8).is_err());
    }

    #[test]
    fn compose_flags() {
        let flags = AccountRestrictionFlags::new(
            RestrictionTarget::Mosaic,
            RestrictionType::Allow,
            RestrictionDirection::Incoming,
        );
        assert_eq!(flags, AccountRestrictionFlags::ALLOW_MOSAIC);
        assert!(!flags.is_block());

        let flags = AccountRestrictionFlags::new(
            RestrictionTarget::Mosaic,
            RestrictionType::Block,
            RestrictionDirection::Incoming,
        );
        assert_eq!(flags, AccountRestrictionFlags::BLOCK_MOSAIC);
        assert!(flags.is_block());
        assert!(!flags.is_outgoing());

        let flags = AccountRestrictionFlags::new(
            RestrictionTarget::TransactionType,
            RestrictionType::Allow,
            RestrictionDirection::Outgoing,
        );
        assert_eq!(flags.value(), 0x4004);
        assert!(flags.is_outgoing());
    }
}
