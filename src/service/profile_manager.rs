use anyhow::{anyhow, Context};
use log::debug;

use crate::adapter::ProfileStorage;
use crate::model::{Account, Profile, ProfileRecord};
use crate::Result;

/// Name of the profile used when none is given.
pub const DEFAULT_PROFILE: &str = "default";

/// Profile related errors.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// No profile with that name is stored.
    #[error("Profile '{name}' not found, available profiles: [{}].", .available.join(", "))]
    UnknownProfile {
        name: String,
        available: Vec<String>,
    },

    /// A stored field cannot be used.
    #[error("Profile '{name}' has an invalid {field}.")]
    InvalidField { name: String, field: &'static str },
}

/// The [ProfileManager] turns stored profile records into profiles able to
/// sign transactions.
pub struct ProfileManager {
    storage: Box<dyn ProfileStorage>,
}

impl ProfileManager {
    pub fn new(storage: impl ProfileStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    /// Load and check the profile with the given name.
    ///
    /// ```
    /// use nem2_cli::adapter::InMemoryProfileStorage;
    /// use nem2_cli::model::{NetworkType, ProfileRecord};
    /// use nem2_cli::service::{ProfileError, ProfileManager};
    ///
    /// let mut storage = InMemoryProfileStorage::default();
    /// storage.insert("default", ProfileRecord {
    ///     private_key: "575DBB3062267EFF57C970A336EBBC8FBCFE12C5BD3ED7BC11EB0481D7704CED".to_string(),
    ///     network_type: NetworkType::TestNet,
    ///     url: "http://localhost:3000".to_string(),
    ///     network_generation_hash: "57F7DA205008026C776CB6AED843393F04CD458E0AA2D9F1D5F31A402072B2D6".to_string(),
    ///     epoch_adjustment: 1_615_853_185,
    /// });
    /// let manager = ProfileManager::new(storage);
    ///
    /// let profile = manager.get_profile("default").unwrap();
    /// assert_eq!(profile.network_type, NetworkType::TestNet);
    ///
    /// let error = manager.get_profile("other").unwrap_err();
    /// assert!(matches!(
    ///     error.downcast_ref::<ProfileError>(),
    ///     Some(ProfileError::UnknownProfile { name, .. }) if name == "other"
    /// ));
    /// ```
    pub fn get_profile(&self, name: &str) -> Result<Profile> {
        debug!("Loading profile '{}'.", name);

        let record = match self.storage.get_profile(name)? {
            Some(record) => record,
            None => {
                return Err(anyhow!(ProfileError::UnknownProfile {
                    name: name.to_string(),
                    available: self.storage.profile_names()?,
                }))
            }
        };

        Self::check(name, record).with_context(|| format!("Cannot load profile '{}'.", name))
    }

    fn check(name: &str, record: ProfileRecord) -> Result<Profile> {
        let invalid = |field: &'static str| {
            anyhow!(ProfileError::InvalidField {
                name: name.to_string(),
                field,
            })
        };
        let account = Account::from_private_key(&record.private_key)
            .map_err(|_| invalid("private key"))?;
        let network_generation_hash: [u8; 32] = hex::decode(record.network_generation_hash.trim())
            .ok()
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(|| invalid("network generation hash"))?;
        if reqwest::Url::parse(&record.url).is_err() {
            return Err(invalid("url"));
        }

        Ok(Profile {
            name: name.to_string(),
            account,
            url: record.url,
            network_type: record.network_type,
            network_generation_hash,
            epoch_adjustment: record.epoch_adjustment,
        })
    }
}
