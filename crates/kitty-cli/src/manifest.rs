//! Extension manifest
//!
//! The editor extension ships a manifest naming its bundle identifier; command
//! identifiers are qualified with it.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AccessControlError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionManifest {
    #[serde(rename = "CFBundleIdentifier")]
    pub bundle_identifier: String,
}

impl ExtensionManifest {
    pub fn from_json(json: &str) -> Result<Self, AccessControlError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON manifest from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AccessControlError> {
        let path = path.as_ref();
        let manifest = Self::from_json(&fs::read_to_string(path)?)?;
        debug!(path = %path.display(), bundle = %manifest.bundle_identifier, "loaded manifest");
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_keys_are_ignored() {
        let manifest = ExtensionManifest::from_json(
            r#"{"CFBundleIdentifier": "com.example.Kitty", "CFBundleName": "Kitty"}"#,
        )
        .unwrap();
        assert_eq!(manifest.bundle_identifier, "com.example.Kitty");
    }

    #[test]
    fn test_missing_identifier() {
        let err = ExtensionManifest::from_json(r#"{"CFBundleName": "Kitty"}"#).unwrap_err();
        assert!(matches!(err, AccessControlError::Manifest(_)));
    }
}
