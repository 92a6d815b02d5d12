//! YAML configuration.
//!
//! Keys are accepted under their English names or their original
//! literals:
//!
//! ```yaml
//! group-label: Group          # 分组
//! output-directory: out       # 输出
//! ignore-list: [Misc]         # 过滤
//! export-map:                 # 导出
//!   west: [Fruit, Veg]
//!   east:
//!     mapping: [Fruit]        # 映射
//! ```

use crate::error::{SplitError, SplitResult};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

/// Group keys accepted by one destination.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExportTarget {
    /// A bare list of keys.
    Keys(Vec<String>),
    /// Keys nested under a `mapping` entry.
    Mapping {
        #[serde(alias = "映射")]
        mapping: Vec<String>,
    },
}

impl ExportTarget {
    pub fn keys(&self) -> &[String] {
        match self {
            ExportTarget::Keys(keys) | ExportTarget::Mapping { mapping: keys } => keys,
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SplitConfig {
    /// Header text marking the key column and the last header row.
    #[serde(rename = "group-label", alias = "分组")]
    pub group_label: String,

    /// Directory receiving `<destination>.xlsx` files.
    #[serde(rename = "output-directory", alias = "输出")]
    pub output_directory: PathBuf,

    /// Keys that are known to be unrouted and never reported.
    #[serde(
        rename = "ignore-list",
        alias = "过滤",
        default,
        deserialize_with = "nullable_list"
    )]
    pub ignore_list: Vec<String>,

    /// Destination id to the keys it accepts, in output order.
    #[serde(rename = "export-map", alias = "导出")]
    pub export_map: IndexMap<String, ExportTarget>,
}

/// An empty YAML key (`ignore-list:`) reads as an empty list.
fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl SplitConfig {
    /// Load and validate a configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> SplitResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SplitError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&text)
    }

    /// Parse and validate a configuration document.
    pub fn from_yaml_str(text: &str) -> SplitResult<Self> {
        let config: SplitConfig =
            serde_yaml::from_str(text).map_err(|e| SplitError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants serde cannot express.
    pub fn validate(&self) -> SplitResult<()> {
        if self.group_label.trim().is_empty() {
            return Err(SplitError::config("group-label must not be blank"));
        }
        if self.output_directory.as_os_str().is_empty() {
            return Err(SplitError::config("output-directory must not be empty"));
        }
        if self.export_map.is_empty() {
            return Err(SplitError::config("export-map must name at least one destination"));
        }
        for id in self.export_map.keys() {
            validate_destination_id(id)?;
        }
        Ok(())
    }

    /// Destination ids in output order.
    pub fn destinations(&self) -> impl Iterator<Item = &str> + '_ {
        self.export_map.keys().map(String::as_str)
    }
}

fn validate_destination_id(id: &str) -> SplitResult<()> {
    if id.trim().is_empty() {
        return Err(SplitError::config("export-map: destination id must not be empty"));
    }
    if id.contains(['/', '\\']) || id == "." || id == ".." {
        return Err(SplitError::config(format!(
            "export-map: destination id '{id}' is not a plain file name"
        )));
    }
    Ok(())
}
