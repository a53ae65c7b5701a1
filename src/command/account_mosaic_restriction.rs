//! Allow or block incoming transactions containing a given set of mosaics.

use std::io::Write;

use clap::Args;
use log::{debug, info};

use crate::adapter::{Prompter, TransactionAnnouncer};
use crate::model::{
    AccountMosaicRestrictionTransaction, Deadline, ModificationAction, MosaicId,
    MosaicRestrictionModification, RestrictionDirection, RestrictionType, SignedTransaction,
};
use crate::service::{OptionsResolver, ProfileManager, RestrictionService, DEFAULT_PROFILE};
use crate::Result;

use super::{announce_transaction, AnnounceTransactionsOptions};

/// Command line options of the account mosaic restriction command.
#[derive(Debug, Clone, Default, Args)]
pub struct CommandOptions {
    /// Restriction type (allow, block).
    #[arg(short = 't', long)]
    pub restriction_type: Option<RestrictionType>,

    /// Restriction direction (incoming, outgoing).
    #[arg(short = 'd', long)]
    pub restriction_direction: Option<RestrictionDirection>,

    /// Modification action. (1: Add, 0: Remove).
    #[arg(short = 'a', long)]
    pub modification_action: Option<ModificationAction>,

    /// Mosaic to allow / block.
    #[arg(short = 'v', long)]
    pub value: Option<MosaicId>,

    #[command(flatten)]
    pub announce: AnnounceTransactionsOptions,
}

/// Builds, signs and announces an account mosaic restriction transaction.
pub struct AccountMosaicRestrictionCommand {
    profile_manager: ProfileManager,
    announcer: Box<dyn TransactionAnnouncer>,
    restriction_service: RestrictionService,
}

impl AccountMosaicRestrictionCommand {
    pub fn new(
        profile_manager: ProfileManager,
        announcer: impl TransactionAnnouncer + 'static,
    ) -> Self {
        Self {
            profile_manager,
            announcer: Box::new(announcer),
            restriction_service: RestrictionService::new(),
        }
    }

    /// Run the command.
    /// Missing options are asked through the prompter: type, action,
    /// direction, mosaic and then fee. Every value is checked before the
    /// profile is loaded.
    pub fn execute(
        &self,
        options: CommandOptions,
        prompter: impl Prompter,
        output: &mut dyn Write,
    ) -> Result<SignedTransaction> {
        let mut resolver = OptionsResolver::new(prompter);

        let restriction_type = resolver.resolve(
            options.restriction_type,
            "Introduce the restriction type (allow, block):",
        )?;
        let modification_action = resolver.resolve(
            options.modification_action,
            "Introduce the modification action (1: Add, 0: Remove): ",
        )?;
        let restriction_direction = resolver.resolve(
            options.restriction_direction,
            "Introduce the restriction direction (incoming, outgoing): ",
        )?;
        let mosaic_id = resolver.resolve(options.value, "Introduce the mosaic identifier: ")?;
        let max_fee = resolver.resolve_or_default(
            options.announce.max_fee,
            "Introduce the maximum fee you want to spend to announce the transaction: ",
        )?;
        debug!(
            "Resolved options: type={} direction={} action={:?} mosaic={} max_fee={}",
            restriction_type,
            restriction_direction,
            modification_action,
            mosaic_id,
            max_fee.amount()
        );

        let restriction_flags = self
            .restriction_service
            .account_mosaic_restriction_flags(restriction_type, restriction_direction)?;

        let profile_name = options.announce.profile.as_deref().unwrap_or(DEFAULT_PROFILE);
        let profile = self.profile_manager.get_profile(profile_name)?;
        debug!(
            "Using profile '{}' on {} with account {}.",
            profile.name,
            profile.network_type,
            profile.account.public_account()
        );

        let modification = MosaicRestrictionModification::for_mosaic(modification_action, mosaic_id);
        let transaction = AccountMosaicRestrictionTransaction::create(
            Deadline::create(profile.epoch_adjustment),
            restriction_flags,
            &[modification],
            profile.network_type,
            max_fee,
        )?;

        let signed_transaction =
            transaction.sign_with(&profile.account, &profile.network_generation_hash);
        info!(
            "Signed transaction {} with profile '{}'.",
            signed_transaction.hash, profile.name
        );

        announce_transaction(
            self.announcer.as_ref(),
            &signed_transaction,
            &profile.url,
            output,
        )?;

        Ok(signed_transaction)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, io::Write as _, net::TcpListener, rc::Rc};

    use anyhow::anyhow;
    use tempfile::NamedTempFile;

    use crate::adapter::{
        AnnounceResponse, HttpTransactionAnnouncer, InMemoryProfileStorage,
        JsonFileProfileStorage, ScriptedPrompter,
    };
    use crate::model::{
        AccountRestrictionFlags, MaxFee, ModificationActionError, MosaicIdError, NetworkType,
        ProfileRecord, PublicAccount, RestrictionError, TransactionType,
    };
    use crate::service::ProfileError;

    use super::*;

    const PRIVATE_KEY: &str = "575DBB3062267EFF57C970A336EBBC8FBCFE12C5BD3ED7BC11EB0481D7704CED";
    const GENERATION_HASH: &str = "57F7DA205008026C776CB6AED843393F04CD458E0AA2D9F1D5F31A402072B2D6";

    /// Keeps the announced transactions instead of sending them.
    #[derive(Clone, Default)]
    struct RecordingAnnouncer {
        announced: Rc<RefCell<Vec<(String, SignedTransaction)>>>,
    }

    impl TransactionAnnouncer for RecordingAnnouncer {
        fn announce(&self, url: &str, transaction: &SignedTransaction) -> Result<AnnounceResponse> {
            self.announced
                .borrow_mut()
                .push((url.to_string(), transaction.clone()));

            Ok(AnnounceResponse {
                message: "pushed".to_string(),
            })
        }
    }

    struct FailingAnnouncer;

    impl TransactionAnnouncer for FailingAnnouncer {
        fn announce(&self, _url: &str, _transaction: &SignedTransaction) -> Result<AnnounceResponse> {
            Err(anyhow!("connection refused"))
        }
    }

    fn record() -> ProfileRecord {
        ProfileRecord {
            private_key: PRIVATE_KEY.to_string(),
            network_type: NetworkType::TestNet,
            url: "http://localhost:3000".to_string(),
            network_generation_hash: GENERATION_HASH.to_string(),
            epoch_adjustment: 1_615_853_185,
        }
    }

    fn command(announcer: impl TransactionAnnouncer + 'static) -> AccountMosaicRestrictionCommand {
        let mut storage = InMemoryProfileStorage::default();
        storage.insert("default", record());
        storage.insert(
            "mijin",
            ProfileRecord {
                network_type: NetworkType::MijinTest,
                url: "http://mijin:3000".to_string(),
                ..record()
            },
        );

        AccountMosaicRestrictionCommand::new(ProfileManager::new(storage), announcer)
    }

    fn full_options() -> CommandOptions {
        CommandOptions {
            restriction_type: Some(RestrictionType::Block),
            restriction_direction: Some(RestrictionDirection::Incoming),
            modification_action: Some(ModificationAction::Add),
            value: Some("6BED913FA20223F8".parse().unwrap()),
            announce: AnnounceTransactionsOptions {
                profile: None,
                max_fee: Some(MaxFee::new(20_000)),
            },
        }
    }

    fn payload(signed: &SignedTransaction) -> Vec<u8> {
        hex::decode(&signed.payload).unwrap()
    }

    #[test]
    fn test_all_flags_given() {
        let announcer = RecordingAnnouncer::default();
        let mut prompter = ScriptedPrompter::default();
        let mut output = Vec::new();
        let signed = command(announcer.clone())
            .execute(full_options(), &mut prompter, &mut output)
            .unwrap();

        assert!(prompter.questions().is_empty());
        assert_eq!(signed.transaction_type, TransactionType::AccountMosaicRestriction);
        assert_eq!(signed.network_type, NetworkType::TestNet);

        let payload = payload(&signed);
        assert_eq!(&payload[112..120], &20_000u64.to_le_bytes());
        assert_eq!(&payload[128..130], &AccountRestrictionFlags::BLOCK_MOSAIC.value().to_le_bytes());
        assert_eq!((payload[130], payload[131]), (1, 0));

        let announced = announcer.announced.borrow();
        assert_eq!(announced.len(), 1);
        assert_eq!(announced[0].0, "http://localhost:3000");
        assert_eq!(announced[0].1, signed);

        let output = String::from_utf8(output).unwrap();
        assert_eq!(
            output,
            format!(
                "Transaction announced correctly\nHash:    {}\nSigner:  {}\n",
                signed.hash, signed.signer
            )
        );
    }

    #[test]
    fn test_missing_options_are_prompted_in_order() {
        let announcer = RecordingAnnouncer::default();
        let mut prompter =
            ScriptedPrompter::new(["allow", "0", "incoming", "6BED913FA20223F8", ""]);
        let signed = command(announcer.clone())
            .execute(CommandOptions::default(), &mut prompter, &mut Vec::new())
            .unwrap();

        assert_eq!(
            prompter.questions(),
            [
                "Introduce the restriction type (allow, block):",
                "Introduce the modification action (1: Add, 0: Remove): ",
                "Introduce the restriction direction (incoming, outgoing): ",
                "Introduce the mosaic identifier: ",
                "Introduce the maximum fee you want to spend to announce the transaction: ",
            ]
        );

        let payload = payload(&signed);
        // empty fee answer means no fee
        assert_eq!(&payload[112..120], &[0; 8]);
        assert_eq!(&payload[128..130], &AccountRestrictionFlags::ALLOW_MOSAIC.value().to_le_bytes());
        // removal goes to the deletions
        assert_eq!((payload[130], payload[131]), (0, 1));
        assert_eq!(announcer.announced.borrow().len(), 1);
    }

    #[test]
    fn test_only_missing_options_are_prompted() {
        let mut prompter = ScriptedPrompter::new(["1"]);
        let options = CommandOptions {
            modification_action: None,
            ..full_options()
        };
        command(RecordingAnnouncer::default())
            .execute(options, &mut prompter, &mut Vec::new())
            .unwrap();

        assert_eq!(
            prompter.questions(),
            ["Introduce the modification action (1: Add, 0: Remove): "]
        );
    }

    #[test]
    fn test_non_binary_action_is_rejected() {
        let announcer = RecordingAnnouncer::default();
        let mut prompter = ScriptedPrompter::new(["block", "2"]);
        let error = command(announcer.clone())
            .execute(CommandOptions::default(), &mut prompter, &mut Vec::new())
            .unwrap_err();

        assert_eq!(
            error.downcast_ref::<ModificationActionError>(),
            Some(&ModificationActionError::NotBinary("2".to_string()))
        );
        // the command stops at the first invalid answer
        assert_eq!(prompter.questions().len(), 2);
        assert!(announcer.announced.borrow().is_empty());
    }

    #[test]
    fn test_unknown_restriction_type_is_rejected() {
        let mut prompter = ScriptedPrompter::new(["forbid"]);
        let error = command(RecordingAnnouncer::default())
            .execute(CommandOptions::default(), &mut prompter, &mut Vec::new())
            .unwrap_err();

        assert_eq!(
            error.downcast_ref::<RestrictionError>(),
            Some(&RestrictionError::UnknownType("forbid".to_string()))
        );
    }

    #[test]
    fn test_unknown_direction_is_rejected() {
        let options = CommandOptions {
            restriction_direction: None,
            ..full_options()
        };
        let error = command(RecordingAnnouncer::default())
            .execute(options, ScriptedPrompter::new(["both"]), &mut Vec::new())
            .unwrap_err();

        assert_eq!(
            error.downcast_ref::<RestrictionError>(),
            Some(&RestrictionError::UnknownDirection("both".to_string()))
        );
    }

    #[test]
    fn test_outgoing_direction_is_rejected() {
        let announcer = RecordingAnnouncer::default();
        let options = CommandOptions {
            restriction_direction: Some(RestrictionDirection::Outgoing),
            ..full_options()
        };
        let error = command(announcer.clone())
            .execute(options, ScriptedPrompter::default(), &mut Vec::new())
            .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<RestrictionError>(),
            Some(RestrictionError::UnsupportedDirection { .. })
        ));
        assert!(announcer.announced.borrow().is_empty());
    }

    #[test]
    fn test_invalid_mosaic_is_rejected() {
        let options = CommandOptions {
            value: None,
            ..full_options()
        };
        let error = command(RecordingAnnouncer::default())
            .execute(options, ScriptedPrompter::new(["xyz"]), &mut Vec::new())
            .unwrap_err();

        assert_eq!(
            error.downcast_ref::<MosaicIdError>(),
            Some(&MosaicIdError::InvalidLength("xyz".to_string()))
        );
    }

    #[test]
    fn test_named_profile() {
        let announcer = RecordingAnnouncer::default();
        let mut options = full_options();
        options.announce.profile = Some("mijin".to_string());
        let signed = command(announcer.clone())
            .execute(options, ScriptedPrompter::default(), &mut Vec::new())
            .unwrap();

        assert_eq!(signed.network_type, NetworkType::MijinTest);
        assert_eq!(announcer.announced.borrow()[0].0, "http://mijin:3000");
    }

    #[test]
    fn test_unknown_profile() {
        let mut options = full_options();
        options.announce.profile = Some("carol".to_string());
        let error = command(RecordingAnnouncer::default())
            .execute(options, ScriptedPrompter::default(), &mut Vec::new())
            .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<ProfileError>(),
            Some(ProfileError::UnknownProfile { name, .. }) if name == "carol"
        ));
    }

    #[test]
    fn test_announce_failure_is_reported() {
        let mut output = Vec::new();
        let error = command(FailingAnnouncer)
            .execute(full_options(), ScriptedPrompter::default(), &mut output)
            .unwrap_err();

        assert!(error.to_string().ends_with("was not announced."));
        assert_eq!(error.root_cause().to_string(), "connection refused");
        assert!(output.is_empty());
    }

    #[test]
    fn test_signature_matches_profile_account() {
        let signed = command(RecordingAnnouncer::default())
            .execute(full_options(), ScriptedPrompter::default(), &mut Vec::new())
            .unwrap();
        let payload = payload(&signed);
        let signature: [u8; 64] = payload[8..72].try_into().unwrap();
        let generation_hash: [u8; 32] = hex::decode(GENERATION_HASH).unwrap().try_into().unwrap();
        let signer = PublicAccount::from_public_key(&signed.signer).unwrap();

        assert!(signer.verify(
            &crate::model::signing_bytes(&payload, &generation_hash),
            &signature
        ));
    }

    #[test]
    fn test_profile_file_and_node() {
        if TcpListener::bind("127.0.0.1:0").is_err() {
            return;
        }
        let mut server = mockito::Server::new();
        let mock = server
            .mock("PUT", "/transactions")
            .with_status(202)
            .with_body(r#"{"message":"packet 9 was pushed to the network via /transactions"}"#)
            .create();
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"default": {{"privateKey": "{}", "networkType": 152, "url": "{}", "networkGenerationHash": "{}"}}}}"#,
            PRIVATE_KEY,
            server.url(),
            GENERATION_HASH
        )
        .unwrap();

        let command = AccountMosaicRestrictionCommand::new(
            ProfileManager::new(JsonFileProfileStorage::new(file.path())),
            HttpTransactionAnnouncer::new().unwrap(),
        );
        let mut output = Vec::new();
        let signed = command
            .execute(full_options(), ScriptedPrompter::default(), &mut output)
            .unwrap();

        mock.assert();
        assert!(String::from_utf8(output)
            .unwrap()
            .contains(&format!("Hash:    {}", signed.hash)));
    }
}
