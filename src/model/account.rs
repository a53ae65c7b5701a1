use std::fmt;

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use thiserror::Error;

/// The error type for account key handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Keys are 32 bytes encoded as 64 hexadecimal characters.
    #[error("Private key must be 64 hexadecimal characters.")]
    InvalidPrivateKey,

    /// The public key is not a valid curve point.
    #[error("Public key '{0}' is not valid.")]
    InvalidPublicKey(String),
}

/// Public part of an account, used to check signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicAccount {
    public_key: VerifyingKey,
}

impl PublicAccount {
    /// Creates a public account from its hexadecimal public key.
    pub fn from_public_key(public_key: &str) -> Result<Self, AccountError> {
        let invalid = || AccountError::InvalidPublicKey(public_key.to_string());
        let bytes: [u8; 32] = hex::decode(public_key.trim())
            .map_err(|_| invalid())?
            .try_into()
            .map_err(|_| invalid())?;
        let public_key = VerifyingKey::from_bytes(&bytes).map_err(|_| invalid())?;

        Ok(Self { public_key })
    }

    /// Raw public key bytes.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.public_key.to_bytes()
    }

    /// Public key as upper case hexadecimal.
    pub fn public_key(&self) -> String {
        hex::encode_upper(self.public_key.as_bytes())
    }

    /// Checks the signature of the given data.
    pub fn verify(&self, data: &[u8], signature: &[u8; 64]) -> bool {
        self.public_key
            .verify(data, &Signature::from_bytes(signature))
            .is_ok()
    }
}

impl fmt::Display for PublicAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.public_key())
    }
}

/// An account able to sign transactions.
///
/// The private key never leaves this structure and is not printed by
/// its `Debug` implementation.
#[derive(Clone)]
pub struct Account {
    signing_key: SigningKey,
}

impl Account {
    /// Creates an account from its hexadecimal private key.
    ///
    /// ```
    /// use nem2_cli::model::{Account, AccountError};
    ///
    /// let account = Account::from_private_key(
    ///     "575DBB3062267EFF57C970A336EBBC8FBCFE12C5BD3ED7BC11EB0481D7704CED",
    /// )
    /// .unwrap();
    /// assert_eq!(account.public_account().public_key().len(), 64);
    ///
    /// let error = Account::from_private_key("1234").unwrap_err();
    /// assert_eq!(error, AccountError::InvalidPrivateKey);
    /// ```
    pub fn from_private_key(private_key: &str) -> Result<Self, AccountError> {
        let bytes: [u8; 32] = hex::decode(private_key.trim())
            .map_err(|_| AccountError::InvalidPrivateKey)?
            .try_into()
            .map_err(|_| AccountError::InvalidPrivateKey)?;

        Ok(Self {
            signing_key: SigningKey::from_bytes(&bytes),
        })
    }

    /// The public account matching this key pair.
    pub fn public_account(&self) -> PublicAccount {
        PublicAccount {
            public_key: self.signing_key.verifying_key(),
        }
    }

    /// Signs the given data.
    pub fn sign_data(&self, data: &[u8]) -> [u8; 64] {
        self.signing_key.sign(data).to_bytes()
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("public_key", &self.public_account().public_key())
            .finish()
    }
}
