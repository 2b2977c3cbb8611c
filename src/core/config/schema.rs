//! core::config::schema
//!
//! Settings schema types.
//!
//! # Validation
//!
//! Values are validated after parsing: every iteration budget must be at
//! least one, and the dynamic budget may not exceed the static one.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Engine settings.
///
/// # Example
///
/// ```toml
/// seed = 42
///
/// [verification]
/// static_iterations = 256
/// dynamic_iterations = 1
/// legible_iterations = 32
///
/// [forall]
/// attempts = 4096
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Fixed seed for the sampling generator (OS entropy when unset)
    pub seed: Option<u64>,

    /// Function-contract verification budgets
    pub verification: VerificationSettings,

    /// Property tester defaults
    pub forall: ForallSettings,
}

impl Settings {
    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.verification.validate()?;
        self.forall.validate()
    }
}

/// How many synthetic calls a function contract makes when verified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct VerificationSettings {
    /// Calls made while the static-time window is open
    pub static_iterations: usize,

    /// Calls made after the window has closed
    pub dynamic_iterations: usize,

    /// Leading calls that use compact sampling
    pub legible_iterations: usize,
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            static_iterations: 256,
            dynamic_iterations: 1,
            legible_iterations: 32,
        }
    }
}

impl VerificationSettings {
    /// Validate the verification budgets.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.static_iterations == 0 || self.dynamic_iterations == 0 {
            return Err(ConfigError::InvalidValue(
                "verification iterations must be at least 1".to_string(),
            ));
        }
        if self.dynamic_iterations > self.static_iterations {
            return Err(ConfigError::InvalidValue(format!(
                "dynamic_iterations ({}) cannot exceed static_iterations ({})",
                self.dynamic_iterations, self.static_iterations
            )));
        }
        Ok(())
    }
}

/// Property tester defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ForallSettings {
    /// Default number of sampled tuples per `forall`
    pub attempts: usize,
}

impl Default for ForallSettings {
    fn default() -> Self {
        Self { attempts: 4096 }
    }
}

impl ForallSettings {
    /// Validate the attempt budget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "forall attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_budgets() {
        let settings = Settings::default();
        assert_eq!(settings.seed, None);
        assert_eq!(settings.verification.static_iterations, 256);
        assert_eq!(settings.verification.dynamic_iterations, 1);
        assert_eq!(settings.verification.legible_iterations, 32);
        assert_eq!(settings.forall.attempts, 4096);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn parse_partial_settings() {
        let toml = r#"
            seed = 9

            [forall]
            attempts = 10
        "#;
        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.forall.attempts, 10);
        assert_eq!(settings.verification, VerificationSettings::default());
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: Result<Settings, _> = toml::from_str("sead = 1");
        assert!(result.is_err());
    }

    #[test]
    fn zero_budgets_rejected() {
        let mut settings = Settings::default();
        settings.forall.attempts = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.verification.static_iterations = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn dynamic_budget_bounded_by_static() {
        let mut settings = Settings::default();
        settings.verification.dynamic_iterations = 512;
        assert!(settings.validate().is_err());
    }
}
