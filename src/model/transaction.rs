//! Account mosaic restriction transaction and its binary layout.

use sha3::{Digest, Sha3_256};
use thiserror::Error;

use super::{
    Account, AccountRestrictionFlags, Deadline, MaxFee, ModificationAction, MosaicId,
    MosaicRestrictionModification, NetworkType,
};

/// Size of the common transaction header.
const HEADER_SIZE: usize = 128;

/// Offset of the data covered by the signature.
const SIGNED_DATA_OFFSET: usize = 108;

const SIGNATURE_OFFSET: usize = 8;
const SIGNER_OFFSET: usize = 72;

/// The error type for transaction creation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// A restriction transaction must change at least one value.
    #[error("A restriction transaction needs at least one modification.")]
    NoModification,

    /// Each list is prefixed with a one byte count.
    #[error("Too many {0} in a single transaction (255 max).")]
    TooManyModifications(&'static str),
}

/// Entity types the CLI knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    AccountMosaicRestriction = 0x4250,
}

impl TransactionType {
    pub fn value(&self) -> u16 {
        *self as u16
    }
}

/// Allow or block incoming transactions carrying a set of mosaics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountMosaicRestrictionTransaction {
    pub network_type: NetworkType,
    pub deadline: Deadline,
    pub max_fee: MaxFee,
    pub restriction_flags: AccountRestrictionFlags,
    pub additions: Vec<MosaicId>,
    pub deletions: Vec<MosaicId>,
}

impl AccountMosaicRestrictionTransaction {
    pub const VERSION: u8 = 1;

    /// Builds the transaction out of the requested modifications. Added
    /// mosaics and removed mosaics end up in separate lists.
    pub fn create(
        deadline: Deadline,
        restriction_flags: AccountRestrictionFlags,
        modifications: &[MosaicRestrictionModification],
        network_type: NetworkType,
        max_fee: MaxFee,
    ) -> Result<Self, TransactionError> {
        if modifications.is_empty() {
            return Err(TransactionError::NoModification);
        }
        let (additions, deletions): (
            Vec<&MosaicRestrictionModification>,
            Vec<&MosaicRestrictionModification>,
        ) = modifications
            .iter()
            .partition(|modification| modification.action == ModificationAction::Add);

        if additions.len() > u8::MAX as usize {
            return Err(TransactionError::TooManyModifications("additions"));
        }
        if deletions.len() > u8::MAX as usize {
            return Err(TransactionError::TooManyModifications("deletions"));
        }

        Ok(Self {
            network_type,
            deadline,
            max_fee,
            restriction_flags,
            additions: additions.iter().map(|m| m.mosaic_id).collect(),
            deletions: deletions.iter().map(|m| m.mosaic_id).collect(),
        })
    }

    pub fn transaction_type(&self) -> TransactionType {
        TransactionType::AccountMosaicRestriction
    }

    /// Total size of the serialized transaction.
    pub fn size(&self) -> usize {
        HEADER_SIZE + 8 + 8 * (self.additions.len() + self.deletions.len())
    }

    /// Serializes the transaction with the given signer and signature.
    fn serialize(&self, signer: &[u8; 32], signature: &[u8; 64]) -> Vec<u8> {
        let size = self.size();
        let mut bytes = Vec::with_capacity(size);

        bytes.extend_from_slice(&(size as u32).to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(signature);
        bytes.extend_from_slice(signer);
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.push(Self::VERSION);
        bytes.push(self.network_type.value());
        bytes.extend_from_slice(&self.transaction_type().value().to_le_bytes());
        bytes.extend_from_slice(&self.max_fee.amount().to_le_bytes());
        bytes.extend_from_slice(&self.deadline.value().to_le_bytes());

        bytes.extend_from_slice(&self.restriction_flags.value().to_le_bytes());
        // counts are bounded at creation
        bytes.push(self.additions.len() as u8);
        bytes.push(self.deletions.len() as u8);
        bytes.extend_from_slice(&0u32.to_le_bytes());
        for mosaic_id in self.additions.iter().chain(self.deletions.iter()) {
            bytes.extend_from_slice(&mosaic_id.id().to_le_bytes());
        }

        bytes
    }

    /// Signs the transaction for the network identified by the generation
    /// hash.
    ///
    /// ```
    /// use nem2_cli::model::{
    ///     Account, AccountMosaicRestrictionTransaction, AccountRestrictionFlags, Deadline,
    ///     MaxFee, ModificationAction, MosaicRestrictionModification, NetworkType,
    /// };
    ///
    /// let account = Account::from_private_key(
    ///     "575DBB3062267EFF57C970A336EBBC8FBCFE12C5BD3ED7BC11EB0481D7704CED",
    /// )
    /// .unwrap();
    /// let modification = MosaicRestrictionModification::for_mosaic(
    ///     ModificationAction::Add,
    ///     "6BED913FA20223F8".parse().unwrap(),
    /// );
    /// let transaction = AccountMosaicRestrictionTransaction::create(
    ///     Deadline::create(1_615_853_185),
    ///     AccountRestrictionFlags::ALLOW_MOSAIC,
    ///     &[modification],
    ///     NetworkType::TestNet,
    ///     MaxFee::new(1_000),
    /// )
    /// .unwrap();
    /// let signed = transaction.sign_with(&account, &[0x57; 32]);
    ///
    /// assert_eq!(signed.payload.len(), 144 * 2);
    /// assert_eq!(signed.hash.len(), 64);
    /// assert_eq!(signed.signer, account.public_account().public_key());
    /// ```
    pub fn sign_with(&self, account: &Account, generation_hash: &[u8; 32]) -> SignedTransaction {
        let signer = account.public_account().public_key_bytes();
        let unsigned = self.serialize(&signer, &[0; 64]);
        let signature = account.sign_data(&signing_bytes(&unsigned, generation_hash));
        let payload = self.serialize(&signer, &signature);
        let hash = transaction_hash(&payload, generation_hash);

        SignedTransaction {
            payload: hex::encode_upper(&payload),
            hash: hex::encode_upper(hash),
            signer: hex::encode_upper(signer),
            transaction_type: self.transaction_type(),
            network_type: self.network_type,
        }
    }
}

/// The data covered by a transaction signature.
pub fn signing_bytes(payload: &[u8], generation_hash: &[u8; 32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(32 + payload.len() - SIGNED_DATA_OFFSET);
    bytes.extend_from_slice(generation_hash);
    bytes.extend_from_slice(&payload[SIGNED_DATA_OFFSET..]);

    bytes
}

/// Entity hash of a signed payload. Only the first half of the signature
/// takes part in the hash.
pub fn transaction_hash(payload: &[u8], generation_hash: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(&payload[SIGNATURE_OFFSET..SIGNATURE_OFFSET + 32]);
    hasher.update(&payload[SIGNER_OFFSET..SIGNER_OFFSET + 32]);
    hasher.update(generation_hash);
    hasher.update(&payload[SIGNED_DATA_OFFSET..]);

    hasher.finalize().into()
}

/// A transaction ready to be announced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    /// Serialized transaction, upper case hexadecimal.
    pub payload: String,

    /// Transaction hash, upper case hexadecimal.
    pub hash: String,

    /// Public key of the signer, upper case hexadecimal.
    pub signer: String,

    pub transaction_type: TransactionType,
    pub network_type: NetworkType,
}
