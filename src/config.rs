//! Rendering configuration, loaded from TOML. Every field has a default.

use crate::error::{Error, Result};
use crate::model::Kind;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Headings deeper than this are demoted to bold text.
pub const MAX_HEADING_DEPTH: u8 = 4;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub thresholds: Thresholds,
    pub folders: Folders,
    /// Prepended to every page path when building link targets.
    pub link_prefix: String,
    pub overview_title: String,
    /// Output location of the overview page.
    pub overview_path: String,
    pub include_private: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            folders: Folders::default(),
            link_prefix: "/".to_string(),
            overview_title: "API Reference".to_string(),
            overview_path: "overview".to_string(),
            include_private: false,
        }
    }
}

impl Config {
    /// Load a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Member counts above which a block collapses into a disclosure group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub properties: usize,
    pub methods: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            properties: 5,
            methods: 3,
        }
    }
}

/// Output folder per page-worthy kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Folders {
    pub class: String,
    pub interface: String,
    pub function: String,
    pub enumeration: String,
    pub type_alias: String,
    pub module: String,
}

impl Default for Folders {
    fn default() -> Self {
        Self {
            class: "classes".to_string(),
            interface: "interfaces".to_string(),
            function: "functions".to_string(),
            enumeration: "enumerations".to_string(),
            type_alias: "type-aliases".to_string(),
            module: "modules".to_string(),
        }
    }
}

impl Folders {
    /// Folder for a kind, or `None` when the kind gets no page.
    pub fn folder_for(&self, kind: Kind) -> Option<&str> {
        match kind {
            Kind::Class => Some(&self.class),
            Kind::Interface => Some(&self.interface),
            Kind::Function => Some(&self.function),
            Kind::Enum => Some(&self.enumeration),
            Kind::TypeAlias => Some(&self.type_alias),
            Kind::Module => Some(&self.module),
            _ => None,
        }
    }
}
