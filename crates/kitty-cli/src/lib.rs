//! Access Kitty host
//!
//! Everything between an editor command and the rewrite engine: command
//! identifiers, selection ranges, the extension manifest and the content-type
//! gate. The `kitty` binary drives it from the command line.

pub mod command;
pub mod error;
pub mod invocation;
pub mod manifest;
pub mod notifier;
pub mod selection;

pub use command::access_change;
pub use error::AccessControlError;
pub use invocation::{perform, Invocation, Outcome};
pub use manifest::ExtensionManifest;
pub use notifier::{DefaultNotifier, Notifier};
pub use selection::{TextPosition, TextRange};

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;

pub const SWIFT_SOURCE: &str = "public.swift-source";
pub const PLAYGROUND: &str = "com.apple.dt.playground";

/// Host configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Prefix of every command identifier, the extension's bundle identifier
    pub bundle_prefix: String,
    /// Content types the rewriter accepts
    pub content_types: Vec<String>,
    /// Log at `DEBUG` instead of `INFO`
    pub debug: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            bundle_prefix: "com.accesskitty.Extension".to_string(),
            content_types: vec![SWIFT_SOURCE.to_string(), PLAYGROUND.to_string()],
            debug: false,
        }
    }
}

impl HostConfig {
    pub fn from_manifest(manifest: &ExtensionManifest) -> Self {
        Self {
            bundle_prefix: manifest.bundle_identifier.clone(),
            ..Default::default()
        }
    }

    pub fn supports(&self, content_type: &str) -> bool {
        self.content_types.iter().any(|supported| supported == content_type)
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        }
    }
}
