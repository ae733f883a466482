//! Inventory file parsing functionality
//!
//! Reads INI-style ansible inventories into ordered sections of raw entry
//! lines. Entries are kept verbatim; interpreting them is left to callers.

use crate::error::{DeployError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path};
use tracing::{debug, instrument};

/// Name of the implicit section holding entries that precede any header
pub const DEFAULT_SECTION: &str = "";

/// One `[name]` block of an inventory
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventorySection {
    /// Group name between the brackets
    pub name: String,
    /// Entry lines in file order, trimmed
    pub entries: Vec<String>,
}

/// Parsed inventory, sections in the order they first appear
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Inventory {
    pub sections: Vec<InventorySection>,
}

impl Inventory {
    /// Look up a section by exact name
    pub fn section(&self, name: &str) -> Option<&InventorySection> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Names of all explicit sections
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .map(|section| section.name.as_str())
            .filter(|name| *name != DEFAULT_SECTION)
    }

    /// Total number of entries across sections
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|section| section.entries.len()).sum()
    }

    fn section_mut(&mut self, name: &str) -> &mut InventorySection {
        let index = match self.sections.iter().position(|section| section.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(InventorySection {
                    name: name.to_string(),
                    entries: Vec::new(),
                });
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            if section.name != DEFAULT_SECTION {
                writeln!(f, "[{}]", section.name)?;
            }
            for entry in &section.entries {
                writeln!(f, "{entry}")?;
            }
        }
        Ok(())
    }
}

/// Inventory parser
pub struct InventoryParser {
    /// Regex for `[name]` headers with an optional trailing comment
    re_header: Regex,
}

impl InventoryParser {
    /// Create a new inventory parser
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_header: Regex::new(r"^\[([^\[\]]*)\]\s*(?:[#;].*)?$").map_err(|e| {
                DeployError::invalid_parameter(format!("Failed to compile regex: {e}"))
            })?,
        })
    }

    /// Parse an inventory file
    #[instrument(skip(self))]
    pub fn parse<P: AsRef<Path> + std::fmt::Debug>(&self, path: P) -> Result<Inventory> {
        let path = path.as_ref();
        debug!("Parsing inventory file: {}", path.display());

        let content = std::fs::read_to_string(path)
            .map_err(|e| DeployError::file_system("read", path, e))?;

        let inventory = self.parse_str(&content, path)?;
        debug!(
            "Parsed inventory: {} sections, {} entries",
            inventory.sections.len(),
            inventory.entry_count()
        );
        Ok(inventory)
    }

    /// Parse inventory text; `path` is only used in error messages
    pub fn parse_str(&self, content: &str, path: &Path) -> Result<Inventory> {
        let mut inventory = Inventory::default();
        let mut current = DEFAULT_SECTION.to_string();
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            let line_no = index + 1;

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(cap) = self.re_header.captures(line) {
                let name = cap.get(1).map_or("", |m| m.as_str()).trim();
                if name.is_empty() {
                    return Err(DeployError::inventory_parse(
                        "empty section header",
                        path,
                        line_no,
                    ));
                }
                debug!("Found section [{}] at line {}", name, line_no);
                current = name.to_string();
                inventory.section_mut(&current);
                continue;
            }

            if line.starts_with('[') && !line.contains(']') {
                return Err(DeployError::inventory_parse(
                    format!("unterminated section header: {line}"),
                    path,
                    line_no,
                ));
            }

            inventory.section_mut(&current).entries.push(line.to_string());
        }

        Ok(inventory)
    }
}
