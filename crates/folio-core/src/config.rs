//! Collection path table and layered configuration.
//!
//! The resource path of every collection lives in one table,
//! [`CollectionPaths`]. The defaults keep two data roots (`data/` and
//! `assets/data/`); overriding a single entry is a one-line config change.
//!
//! | Source | Precedence |
//! |--------|------------|
//! | defaults below | lowest |
//! | TOML file at `FOLIO_CONFIG` (default `config/folio.toml`) | |
//! | env `FOLIO__DATA_ROOT`, `FOLIO__COLLECTIONS__<NAME>` | highest |

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const DEFAULT_CONFIG_PATH: &str = "config/folio";
const DEFAULT_DATA_ROOT: &str = ".";

/// The ten collections the portfolio is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Companies,
    Customers,
    Domains,
    Education,
    Experience,
    Partners,
    People,
    Projects,
    References,
    Skills,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 10] = [
        Self::Companies,
        Self::Customers,
        Self::Domains,
        Self::Education,
        Self::Experience,
        Self::Partners,
        Self::People,
        Self::Projects,
        Self::References,
        Self::Skills,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Companies => "companies",
            Self::Customers => "customers",
            Self::Domains => "domains",
            Self::Education => "education",
            Self::Experience => "experience",
            Self::Partners => "partners",
            Self::People => "people",
            Self::Projects => "projects",
            Self::References => "references",
            Self::Skills => "skills",
        }
    }

    /// Default resource path. Note the two roots.
    pub fn default_path(&self) -> &'static str {
        match self {
            Self::Companies => "data/companies.json",
            Self::Customers => "data/customers.json",
            Self::Education => "data/education.json",
            Self::Experience => "data/experience.json",
            Self::Projects => "data/projects.json",
            Self::Skills => "data/skills.json",
            Self::Domains => "assets/data/domains.json",
            Self::Partners => "assets/data/partners.json",
            Self::People => "assets/data/people.json",
            Self::References => "assets/data/references.json",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CollectionKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownCollection(s.to_string()))
    }
}

/// Collection → resource path table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPaths {
    paths: BTreeMap<CollectionKind, String>,
}

impl Default for CollectionPaths {
    fn default() -> Self {
        Self {
            paths: CollectionKind::ALL
                .into_iter()
                .map(|k| (k, k.default_path().to_string()))
                .collect(),
        }
    }
}

impl CollectionPaths {
    pub fn get(&self, kind: CollectionKind) -> &str {
        self.paths
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_path())
    }

    pub fn set(&mut self, kind: CollectionKind, path: impl Into<String>) {
        self.paths.insert(kind, path.into());
    }

    pub fn with(mut self, kind: CollectionKind, path: impl Into<String>) -> Self {
        self.set(kind, path);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (CollectionKind, &str)> {
        self.paths.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Runtime configuration for building a [`crate::Portfolio`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolioConfig {
    /// Directory or `http(s)://` base URL the collection paths resolve under.
    pub data_root: String,
    /// Per-collection path overrides keyed by collection name.
    #[serde(default)]
    pub collections: HashMap<String, String>,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            data_root: DEFAULT_DATA_ROOT.to_string(),
            collections: HashMap::new(),
        }
    }
}

impl FolioConfig {
    /// Load from defaults, the file named by `FOLIO_CONFIG` (if present) and
    /// `FOLIO__*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("FOLIO_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Same as [`FolioConfig::load`] with an explicit file path. The `.toml`
    /// extension may be omitted; a missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let builder = config::Config::builder().set_default("data_root", DEFAULT_DATA_ROOT)?;

        let with_ext = path.with_extension("toml");
        let builder = if path.is_file() {
            builder.add_source(config::File::from(path))
        } else if with_ext.is_file() {
            builder.add_source(config::File::from(with_ext.as_path()))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        let cfg: FolioConfig = built.try_deserialize()?;
        cfg.paths()?;
        Ok(cfg)
    }

    /// Resolved path table: defaults overlaid with `collections`.
    pub fn paths(&self) -> Result<CollectionPaths, ConfigError> {
        let mut paths = CollectionPaths::default();
        for (name, path) in &self.collections {
            let kind: CollectionKind = name.parse()?;
            paths.set(kind, path.trim());
        }
        Ok(paths)
    }
}
