//! Operation file loading
//!
//! The operation file is handed to ansible-playbook untouched. It is only
//! parsed here to reject malformed YAML early and to discover declared tags.

use crate::{
    error::{DeployError, Result},
    utils::fs::FileSystemUtils,
};
use serde_yaml::Value;
use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};
use tracing::{debug, instrument};

/// A loaded operation file
#[derive(Debug, Clone)]
pub struct OperationFile {
    /// Path the file was read from
    pub path: PathBuf,
    /// Contents exactly as read
    pub raw: String,
    /// Parsed YAML document
    pub document: Value,
}

impl OperationFile {
    /// Read and parse an operation file
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        let raw = FileSystemUtils::new().read_file_to_string(path)?;
        let operation = Self::parse_str(&raw, path)?;
        debug!(
            "Loaded operation file {} ({} plays)",
            path.display(),
            operation.play_count()
        );
        Ok(operation)
    }

    /// Parse operation file text
    pub fn parse_str(raw: &str, path: &Path) -> Result<Self> {
        let document: Value =
            serde_yaml::from_str(raw).map_err(|e| DeployError::operation_parse(path, e))?;

        Ok(Self {
            path: path.to_path_buf(),
            raw: raw.to_string(),
            document,
        })
    }

    /// Number of plays; a playbook is a sequence, anything else counts as one
    pub fn play_count(&self) -> usize {
        match &self.document {
            Value::Sequence(plays) => plays.len(),
            Value::Null => 0,
            _ => 1,
        }
    }

    /// Every tag named under a `tags` key anywhere in the document
    pub fn declared_tags(&self) -> BTreeSet<String> {
        let mut tags = BTreeSet::new();
        collect_tags(&self.document, &mut tags);
        tags
    }
}

fn collect_tags(value: &Value, tags: &mut BTreeSet<String>) {
    match value {
        Value::Mapping(map) => {
            for (key, child) in map {
                if key.as_str() == Some("tags") {
                    match child {
                        Value::String(tag) => {
                            tags.extend(tag.split(',').map(|t| t.trim().to_string()));
                        }
                        Value::Sequence(items) => {
                            tags.extend(items.iter().filter_map(Value::as_str).map(String::from));
                        }
                        _ => {}
                    }
                }
                collect_tags(child, tags);
            }
        }
        Value::Sequence(items) => {
            for item in items {
                collect_tags(item, tags);
            }
        }
        Value::Tagged(tagged) => collect_tags(&tagged.value, tags),
        _ => {}
    }
}
