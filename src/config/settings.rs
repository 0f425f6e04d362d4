//! Runtime settings for the server binary.

use std::env;
use std::path::PathBuf;

/// Server settings read from the environment.
///
/// | Variable | Default |
/// |---|---|
/// | `ATTENDANCE_ADDR` | `127.0.0.1:8080` |
/// | `ATTENDANCE_POLICY` | `config/attendance.yaml` |
/// | `ATTENDANCE_STORE_PATH` | `data/attendance_records.json` |
/// | `ATTENDANCE_BACKUP_PATH` | `data/attendance_backup.jsonl` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Address the HTTP server binds to.
    pub addr: String,
    /// Path of the YAML policy file.
    pub policy_path: PathBuf,
    /// Path of the JSON record store document.
    pub store_path: PathBuf,
    /// Path of the JSON-lines backup file.
    pub backup_path: PathBuf,
}

impl ServerSettings {
    /// Reads settings from the process environment, loading `.env` first.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            addr: value("ATTENDANCE_ADDR", "127.0.0.1:8080"),
            policy_path: value("ATTENDANCE_POLICY", "config/attendance.yaml").into(),
            store_path: value("ATTENDANCE_STORE_PATH", "data/attendance_records.json").into(),
            backup_path: value("ATTENDANCE_BACKUP_PATH", "data/attendance_backup.jsonl").into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let settings = ServerSettings::from_lookup(|_| None);
        assert_eq!(settings.addr, "127.0.0.1:8080");
        assert_eq!(settings.policy_path, PathBuf::from("config/attendance.yaml"));
        assert_eq!(settings.store_path, PathBuf::from("data/attendance_records.json"));
        assert_eq!(settings.backup_path, PathBuf::from("data/attendance_backup.jsonl"));
    }

    #[test]
    fn test_overrides_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("ATTENDANCE_ADDR", "0.0.0.0:9000"),
            ("ATTENDANCE_STORE_PATH", "/var/lib/attendance/records.json"),
        ]);
        let settings = ServerSettings::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(settings.addr, "0.0.0.0:9000");
        assert_eq!(
            settings.store_path,
            PathBuf::from("/var/lib/attendance/records.json")
        );
        assert_eq!(settings.policy_path, PathBuf::from("config/attendance.yaml"));
    }
}
