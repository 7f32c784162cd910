//! Engine configuration.
//!
//! Services take an [`EngineConfig`] at construction time. Every field has a
//! default, so a partial JSON document only needs to name what it
//! overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound for [`ValidationLimits::max_comment_length`].
pub const COMMENT_LENGTH_CEILING: usize = 1000;

/// Errors raised while loading an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is malformed or names an unknown field.
    #[error("invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The minimum project title length exceeds the maximum.
    #[error("project title bounds are inverted: min {min} > max {max}")]
    ProjectTitleBounds {
        /// Configured minimum.
        min: usize,
        /// Configured maximum.
        max: usize,
    },

    /// The comment limit exceeds [`COMMENT_LENGTH_CEILING`].
    #[error("max_comment_length {configured} exceeds {ceiling}")]
    CommentLimitTooHigh {
        /// Configured limit.
        configured: usize,
        /// Highest accepted limit.
        ceiling: usize,
    },
}

/// Top-level configuration for the project and task services.
///
/// # Examples
///
/// ```
/// use taskboard::config::{ClosedProjectPolicy, EngineConfig};
///
/// let config = EngineConfig::default();
/// assert_eq!(config.limits.max_comment_length, 1000);
/// assert_eq!(
///     config.closed_project_policy,
///     ClosedProjectPolicy::OwnerMayChangeStatus
/// );
///
/// let strict = EngineConfig::strict();
/// assert_eq!(strict.closed_project_policy, ClosedProjectPolicy::Frozen);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Field length limits applied while validating input.
    pub limits: ValidationLimits,
    /// Whether a closed project still accepts owner status changes.
    pub closed_project_policy: ClosedProjectPolicy,
}

impl EngineConfig {
    /// Creates a configuration that freezes closed projects completely.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            closed_project_policy: ClosedProjectPolicy::Frozen,
            ..Self::default()
        }
    }

    /// Parses and validates a configuration from a JSON document.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document is malformed or names
    /// an unknown field, and the errors of [`Self::validate`] otherwise.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the limits are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ProjectTitleBounds`] when the minimum project
    /// title length exceeds the maximum, or
    /// [`ConfigError::CommentLimitTooHigh`] when the comment limit is above
    /// [`COMMENT_LENGTH_CEILING`].
    pub const fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.limits;
        if limits.min_project_title_length > limits.max_project_title_length {
            return Err(ConfigError::ProjectTitleBounds {
                min: limits.min_project_title_length,
                max: limits.max_project_title_length,
            });
        }
        if limits.max_comment_length > COMMENT_LENGTH_CEILING {
            return Err(ConfigError::CommentLimitTooHigh {
                configured: limits.max_comment_length,
                ceiling: COMMENT_LENGTH_CEILING,
            });
        }
        Ok(())
    }
}

/// How a closed project treats task status changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosedProjectPolicy {
    /// The owning manager may still change task status after closure.
    #[default]
    OwnerMayChangeStatus,
    /// No task status change is accepted once the project is closed.
    Frozen,
}

impl ClosedProjectPolicy {
    /// Returns `true` when the owner keeps the status override on closed
    /// projects.
    #[must_use]
    pub const fn owner_may_change_status(self) -> bool {
        matches!(self, Self::OwnerMayChangeStatus)
    }
}

/// Length limits, in characters, for user-supplied text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationLimits {
    /// Minimum project title length after trimming.
    pub min_project_title_length: usize,
    /// Maximum project title length after trimming.
    pub max_project_title_length: usize,
    /// Maximum project description length.
    pub max_project_description_length: usize,
    /// Maximum task title length after trimming.
    pub max_task_title_length: usize,
    /// Maximum task description length.
    pub max_task_description_length: usize,
    /// Maximum comment length, at most [`COMMENT_LENGTH_CEILING`].
    pub max_comment_length: usize,
    /// Maximum given name length.
    pub max_name_length: usize,
    /// Maximum surname length.
    pub max_surname_length: usize,
    /// Maximum phone number length.
    pub max_phone_length: usize,
    /// Maximum photo reference length.
    pub max_photo_reference_length: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            min_project_title_length: 3,
            max_project_title_length: 100,
            max_project_description_length: 1000,
            max_task_title_length: 200,
            max_task_description_length: 2000,
            max_comment_length: COMMENT_LENGTH_CEILING,
            max_name_length: 100,
            max_surname_length: 150,
            max_phone_length: 20,
            max_photo_reference_length: 512,
        }
    }
}
