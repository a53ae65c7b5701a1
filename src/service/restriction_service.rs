use anyhow::anyhow;

use crate::model::{
    AccountRestrictionFlags, RestrictionDirection, RestrictionError, RestrictionTarget,
    RestrictionType,
};
use crate::Result;

/// Maps the user restriction choices to the flags understood by the network.
#[derive(Debug, Default, Clone, Copy)]
pub struct RestrictionService;

impl RestrictionService {
    pub fn new() -> Self {
        Self
    }

    /// Flags of an account restriction on the given target.
    ///
    /// Mosaic restrictions only exist for incoming transactions, asking for an
    /// outgoing one is an error.
    pub fn account_restriction_flags(
        &self,
        target: RestrictionTarget,
        restriction_type: RestrictionType,
        direction: RestrictionDirection,
    ) -> Result<AccountRestrictionFlags> {
        if target == RestrictionTarget::Mosaic && direction == RestrictionDirection::Outgoing {
            return Err(anyhow!(RestrictionError::UnsupportedDirection { target, direction }));
        }

        Ok(AccountRestrictionFlags::new(target, restriction_type, direction))
    }

    /// Flags of an account mosaic restriction.
    ///
    /// ```
    /// use nem2_cli::model::{AccountRestrictionFlags, RestrictionDirection, RestrictionError, RestrictionType};
    /// use nem2_cli::service::RestrictionService;
    ///
    /// let service = RestrictionService::new();
    /// let flags = service
    ///     .account_mosaic_restriction_flags(RestrictionType::Block, RestrictionDirection::Incoming)
    ///     .unwrap();
    /// assert_eq!(flags, AccountRestrictionFlags::BLOCK_MOSAIC);
    ///
    /// let error = service
    ///     .account_mosaic_restriction_flags(RestrictionType::Allow, RestrictionDirection::Outgoing)
    ///     .unwrap_err();
    /// assert!(matches!(
    ///     error.downcast_ref::<RestrictionError>(),
    ///     Some(RestrictionError::UnsupportedDirection { .. })
    /// ));
    /// ```
    pub fn account_mosaic_restriction_flags(
        &self,
        restriction_type: RestrictionType,
        direction: RestrictionDirection,
    ) -> Result<AccountRestrictionFlags> {
        self.account_restriction_flags(RestrictionTarget::Mosaic, restriction_type, direction)
    }
}
