//! Level and deterrent configuration schemas.
//!
//! Both files are JSON. A missing or malformed file is never fatal: the
//! `load_or_default` constructors log the problem and fall back to a
//! built-in single-level campaign / single-deterrent catalog.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One herd within a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HerdConfig {
    pub elephants: u32,
}

/// One level of the campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub name: String,
    pub farms: u32,
    pub houses: u32,
    pub herds: Vec<HerdConfig>,
}

/// The full level list (`levels.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelsConfig {
    pub levels: Vec<LevelConfig>,
}

impl Default for LevelsConfig {
    fn default() -> Self {
        Self {
            levels: vec![LevelConfig {
                id: Some(1),
                name: "Default Level".to_string(),
                farms: 4,
                houses: 2,
                herds: vec![
                    HerdConfig { elephants: 8 },
                    HerdConfig { elephants: 10 },
                    HerdConfig { elephants: 12 },
                ],
            }],
        }
    }
}

impl LevelsConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_json(&read(path)?)
    }

    /// Load from `path`, falling back to the built-in level on any error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "levels config unusable, using default level");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::Invalid("no levels defined".into()));
        }
        for (i, level) in self.levels.iter().enumerate() {
            if level.herds.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "level {} ({}) has no herds",
                    i + 1,
                    level.name
                )));
            }
        }
        Ok(())
    }

    pub fn level(&self, index: u32) -> Option<&LevelConfig> {
        self.levels.get(index as usize)
    }

    pub fn level_count(&self) -> u32 {
        self.levels.len() as u32
    }
}

/// A deterrent type in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeterrentSpec {
    pub name: String,
    pub cost: u32,
    /// 0-100.
    pub effectiveness: u8,
    #[serde(rename = "duration_ms", alias = "duration")]
    pub duration_ms: u64,
    pub range: f64,
    #[serde(default = "default_size")]
    pub size: f64,
    #[serde(default)]
    pub blocking: bool,
    /// First level (1-based) at which the type can be placed.
    #[serde(rename = "unlockLevel", default = "default_unlock_level")]
    pub unlock_level: u32,
    #[serde(default)]
    pub description: String,
}

fn default_size() -> f64 {
    30.0
}

fn default_unlock_level() -> u32 {
    1
}

/// The deterrent catalog (`deterrents.json`), keyed by type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeterrentCatalog {
    pub deterrents: BTreeMap<String, DeterrentSpec>,
}

impl Default for DeterrentCatalog {
    fn default() -> Self {
        let mut deterrents = BTreeMap::new();
        deterrents.insert(
            "thorny_bush".to_string(),
            DeterrentSpec {
                name: "Thorny Bush".to_string(),
                cost: 20,
                effectiveness: 50,
                duration_ms: 200_000,
                range: 50.0,
                size: default_size(),
                blocking: false,
                unlock_level: 1,
                description: "Prickly hedge elephants prefer to walk around.".to_string(),
            },
        );
        Self { deterrents }
    }
}

impl DeterrentCatalog {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_json(&read(path)?)
    }

    /// Load from `path`, falling back to the built-in catalog on any error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "deterrent catalog unusable, using default catalog");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.deterrents.is_empty() {
            return Err(ConfigError::Invalid("no deterrent types defined".into()));
        }
        if let Some((kind, _)) = self
            .deterrents
            .iter()
            .find(|(_, spec)| spec.effectiveness > 100)
        {
            return Err(ConfigError::Invalid(format!(
                "deterrent `{kind}` effectiveness exceeds 100"
            )));
        }
        Ok(())
    }

    pub fn get(&self, kind: &str) -> Option<&DeterrentSpec> {
        self.deterrents.get(kind)
    }

    /// Types placeable at `level_number` (1-based).
    pub fn available(&self, level_number: u32) -> impl Iterator<Item = (&str, &DeterrentSpec)> {
        self.deterrents
            .iter()
            .filter(move |(_, spec)| spec.unlock_level <= level_number)
            .map(|(kind, spec)| (kind.as_str(), spec))
    }

    /// Types that become placeable exactly at `level_number` (1-based).
    pub fn unlocked_at(&self, level_number: u32) -> impl Iterator<Item = (&str, &DeterrentSpec)> {
        self.deterrents
            .iter()
            .filter(move |(_, spec)| spec.unlock_level == level_number)
            .map(|(kind, spec)| (kind.as_str(), spec))
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
