//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the attendance
//! policy from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::AttendancePolicy;

/// Loads and provides access to the attendance policy.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/attendance.yaml").unwrap();
/// println!("Loaded policy: {}", loader.policy().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: AttendancePolicy,
}

impl ConfigLoader {
    /// Loads the policy from a YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing or unreadable ([`EngineError::ConfigNotFound`])
    /// - The file is not valid YAML for the policy, or the policy is
    ///   inconsistent ([`EngineError::ConfigParseError`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content).map_err(|e| match e {
            EngineError::ConfigParseError { message, .. } => EngineError::ConfigParseError {
                path: path_str,
                message,
            },
            other => other,
        })
    }

    /// Parses and validates a policy from YAML text.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        let policy: AttendancePolicy =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        Self::from_policy(policy)
    }

    /// Wraps an already-built policy after validating it.
    pub fn from_policy(policy: AttendancePolicy) -> EngineResult<Self> {
        policy
            .validate()
            .map_err(|message| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message,
            })?;
        Ok(Self { policy })
    }

    /// Returns the loaded policy.
    pub fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            policy: AttendancePolicy::default(),
        }
    }
}
