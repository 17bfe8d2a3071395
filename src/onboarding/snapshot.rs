use std::path::Path;

use crate::config::{read_config_file_raw, validate_config, Config, ConfigIssue};

/// The persisted document as observed at the start of a run.
#[derive(Debug, Clone)]
pub struct ConfigSnapshot {
    /// Whether a document was found on disk.
    pub exists: bool,
    /// Whether the document passed schema validation. A missing document
    /// is valid (the run starts from an empty config).
    pub valid: bool,
    pub config: Config,
    pub issues: Vec<ConfigIssue>,
}

/// Read and schema-validate the persisted configuration.
///
/// Never touches the on-disk document. When `valid` is false the caller
/// must abort the run and report `issues`; merging on top of a broken
/// document is not allowed.
pub fn read_config_snapshot(path: &Path) -> ConfigSnapshot {
    if !path.exists() {
        return ConfigSnapshot {
            exists: false,
            valid: true,
            config: Config::default(),
            issues: Vec::new(),
        };
    }

    let raw = match read_config_file_raw(path) {
        Ok(raw) => raw,
        Err(err) => {
            return ConfigSnapshot {
                exists: true,
                valid: false,
                config: Config::default(),
                issues: vec![ConfigIssue {
                    path: "$".to_string(),
                    message: format!("{err:#}"),
                }],
            };
        }
    };

    let config: Config = match serde_json::from_value(raw) {
        Ok(config) => config,
        Err(err) => {
            return ConfigSnapshot {
                exists: true,
                valid: false,
                config: Config::default(),
                issues: vec![ConfigIssue {
                    path: "$".to_string(),
                    message: err.to_string(),
                }],
            };
        }
    };

    let issues = validate_config(&config);
    ConfigSnapshot {
        exists: true,
        valid: issues.is_empty(),
        config,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_valid_and_empty() {
        let dir = TempDir::new().unwrap();
        let snapshot = read_config_snapshot(&dir.path().join("config.json"));
        assert!(!snapshot.exists);
        assert!(snapshot.valid);
        assert_eq!(snapshot.config, Config::default());
        assert!(snapshot.issues.is_empty());
    }

    #[test]
    fn malformed_document_reports_issues() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.json");
        fs::write(&file, "{ not json at all").unwrap();

        let snapshot = read_config_snapshot(&file);
        assert!(snapshot.exists);
        assert!(!snapshot.valid);
        assert!(!snapshot.issues.is_empty());
    }

    #[test]
    fn structurally_broken_document_is_invalid() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.json");
        fs::write(&file, r#"{"gateway": "not-an-object"}"#).unwrap();

        let snapshot = read_config_snapshot(&file);
        assert!(snapshot.exists);
        assert!(!snapshot.valid);
    }

    #[test]
    fn unknown_bind_string_still_loads() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.json");
        fs::write(&file, r#"{"gateway": {"bind": "satellite"}}"#).unwrap();

        let snapshot = read_config_snapshot(&file);
        assert!(snapshot.valid);
        assert_eq!(
            snapshot.config.gateway.bind.as_deref(),
            Some("satellite")
        );
    }
}
