use std::{error::Error, str::FromStr};

use log::debug;

use crate::adapter::Prompter;
use crate::Result;

/// The [OptionsResolver] fills the options missing from the command line by
/// asking the user. Answers go through the same parsing as the command line
/// flags so invalid values are refused the same way.
pub struct OptionsResolver<P> {
    prompter: P,
}

impl<P: Prompter> OptionsResolver<P> {
    pub fn new(prompter: P) -> Self {
        Self { prompter }
    }

    /// Return the given value or ask for it.
    ///
    /// ```
    /// use nem2_cli::adapter::ScriptedPrompter;
    /// use nem2_cli::model::RestrictionType;
    /// use nem2_cli::service::OptionsResolver;
    ///
    /// let mut resolver = OptionsResolver::new(ScriptedPrompter::new(["block", "nope"]));
    ///
    /// // given values are kept and nothing is asked
    /// let value = resolver.resolve(Some(RestrictionType::Allow), "Type: ").unwrap();
    /// assert_eq!(value, RestrictionType::Allow);
    ///
    /// // missing values are asked
    /// let value: RestrictionType = resolver.resolve(None, "Type: ").unwrap();
    /// assert_eq!(value, RestrictionType::Block);
    ///
    /// // invalid answers are refused
    /// assert!(resolver.resolve::<RestrictionType>(None, "Type: ").is_err());
    /// ```
    pub fn resolve<T>(&mut self, value: Option<T>, question: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Error + Send + Sync + 'static,
    {
        match value {
            Some(value) => Ok(value),
            None => {
                let answer = self.ask(question)?;
                Self::parse(&answer)
            }
        }
    }

    /// Same as [OptionsResolver::resolve] but an empty answer gives the
    /// default value.
    pub fn resolve_or_default<T>(&mut self, value: Option<T>, question: &str) -> Result<T>
    where
        T: FromStr + Default,
        T::Err: Error + Send + Sync + 'static,
    {
        match value {
            Some(value) => Ok(value),
            None => {
                let answer = self.ask(question)?;
                if answer.is_empty() {
                    return Ok(T::default());
                }
                Self::parse(&answer)
            }
        }
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        let answer = self.prompter.ask(question)?;
        debug!("Answer to '{}': '{}'.", question.trim(), answer);

        Ok(answer.trim().to_string())
    }

    /// The typed parse error is kept so callers can downcast to it.
    fn parse<T>(answer: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Error + Send + Sync + 'static,
    {
        answer.parse().map_err(anyhow::Error::new)
    }

    /// Give back the prompter.
    pub fn into_inner(self) -> P {
        self.prompter
    }
}
