//! Configuration file support for aclshow
//!
//! Loads and validates aclshow configuration from TOML files.
//! Default location: /etc/sonic/aclshow.toml

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{AclShowError, AclShowResult};
use crate::tables::constants;
use crate::topology::Topology;
use crate::types::{InstanceId, StatusMode};

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/sonic/aclshow.toml";

/// File name of the dump for the single default instance.
pub const DEFAULT_DUMP_NAME: &str = "default.json";

/// ASIC instance topology
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopologyConfig {
    /// Instance ids in report order; empty for a single-ASIC switch
    #[serde(default)]
    pub instances: Vec<InstanceId>,
}

/// Where per-instance database state is read from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Directory holding `<instance>.json` dumps
    #[serde(default = "default_dump_dir")]
    pub dump_dir: PathBuf,

    /// Explicit instance -> dump path overrides
    #[serde(default)]
    pub dumps: IndexMap<InstanceId, PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// How per-instance status is rendered
    #[serde(default)]
    pub status_rendering: StatusMode,
}

/// Complete aclshow configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AclShowConfig {
    /// Topology configuration
    #[serde(default)]
    pub topology: TopologyConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_dump_dir() -> PathBuf {
    PathBuf::from("/var/run/sonic/acl")
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dump_dir: default_dump_dir(),
            dumps: IndexMap::new(),
        }
    }
}

impl AclShowConfig {
    /// Load configuration from file, falling back to defaults if file not found
    pub fn load_or_default(path: impl AsRef<Path>) -> AclShowResult<Self> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)
                .map_err(|e| AclShowError::parse(path.display().to_string(), e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(AclShowError::Io(e)),
        }
    }

    /// Builds the instance topology.
    pub fn topology(&self) -> Topology {
        Topology::multi(self.topology.instances.iter().cloned())
    }

    /// Applies a `--dump` argument: `INSTANCE=PATH`, or a bare `PATH` for
    /// the default instance.
    pub fn apply_dump_override(&mut self, arg: &str) -> AclShowResult<()> {
        let (instance, path) = match arg.split_once('=') {
            Some((instance, path)) => (instance.trim(), path.trim()),
            None => (constants::DEFAULT_INSTANCE, arg.trim()),
        };
        if path.is_empty() {
            return Err(AclShowError::invalid_config(
                "dump",
                format!("empty path in '{}'", arg),
            ));
        }
        self.database
            .dumps
            .insert(instance.to_string(), PathBuf::from(path));
        Ok(())
    }

    /// Returns the dump file of `instance`.
    pub fn dump_path(&self, instance: &str) -> PathBuf {
        if let Some(path) = self.database.dumps.get(instance) {
            return path.clone();
        }
        let file = if instance.is_empty() {
            DEFAULT_DUMP_NAME.to_string()
        } else {
            format!("{}.json", instance)
        };
        self.database.dump_dir.join(file)
    }

    /// Validate configuration
    pub fn validate(&self) -> AclShowResult<()> {
        let instances = &self.topology.instances;

        if instances.len() > 1 && instances.iter().any(|i| i.trim().is_empty()) {
            return Err(AclShowError::invalid_config(
                "topology.instances",
                "instance ids must be non-empty on a multi-ASIC switch",
            ));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = instances.iter().find(|i| !seen.insert(i.as_str())) {
            return Err(AclShowError::invalid_config(
                "topology.instances",
                format!("duplicate instance '{}'", dup),
            ));
        }

        let topology = self.topology();
        if let Some(stray) = self
            .database
            .dumps
            .keys()
            .find(|instance| !topology.instances().contains(*instance))
        {
            return Err(AclShowError::invalid_config(
                "database.dumps",
                format!("dump configured for unknown instance '{}'", stray),
            ));
        }

        Ok(())
    }
}
