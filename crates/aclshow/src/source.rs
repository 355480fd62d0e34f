//! Per-instance state store access.
//!
//! Each ASIC instance owns its CONFIG_DB, APPL_DB and STATE_DB. The show
//! engine only needs to read whole tables from them, which is what
//! [`AclStateStore`] exposes. [`MemoryStore`] holds the tables in memory
//! and can be loaded from a JSON database dump.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{AclShowError, AclShowResult};
use crate::tables::constants;

/// Database identifiers read by the show engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbId {
    /// Configuration database (CONFIG_DB) - control-plane ACLs.
    ConfigDb,
    /// Application database (APPL_DB) - dataplane ACLs.
    ApplDb,
    /// State database (STATE_DB) - per-instance status.
    StateDb,
}

impl DbId {
    /// All databases, in dump order.
    pub const ALL: [DbId; 3] = [DbId::ConfigDb, DbId::ApplDb, DbId::StateDb];

    /// Returns the database name as used in Redis/SONiC.
    pub fn name(&self) -> &'static str {
        match self {
            DbId::ConfigDb => "CONFIG_DB",
            DbId::ApplDb => "APPL_DB",
            DbId::StateDb => "STATE_DB",
        }
    }

    /// Separator between table name and key parts.
    pub fn key_separator(&self) -> char {
        match self {
            DbId::ApplDb => ':',
            DbId::ConfigDb | DbId::StateDb => '|',
        }
    }
}

/// Field/value pairs of one entry, in store order.
pub type FieldValues = IndexMap<String, String>;

/// Entries of one table as `(key, fields)`, in store order.
pub type TableEntries = Vec<(String, FieldValues)>;

/// Read access to the databases of one ASIC instance.
#[async_trait]
pub trait AclStateStore: Send + Sync {
    /// Returns the instance id this store belongs to.
    fn instance(&self) -> &str;

    /// Returns every entry of `table` in `db`.
    ///
    /// Keys are returned without the table prefix. A table that does not
    /// exist yields no entries. An unreachable database is an
    /// [`AclShowError::InstanceUnreachable`].
    async fn get_table(&self, db: DbId, table: &str) -> AclShowResult<TableEntries>;
}

type DbTables = IndexMap<String, IndexMap<String, FieldValues>>;

/// In-memory store, usually loaded from a database dump.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    instance: String,
    dbs: HashMap<DbId, DbTables>,
    unreachable: Option<String>,
}

impl MemoryStore {
    /// Creates an empty store for `instance`.
    pub fn new(instance: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
            dbs: HashMap::new(),
            unreachable: None,
        }
    }

    /// Creates a store whose every query fails with `message`.
    pub fn unreachable(instance: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            unreachable: Some(message.into()),
            ..Self::new(instance)
        }
    }

    /// Adds (or replaces) one entry.
    pub fn set<I, K, V>(&mut self, db: DbId, table: &str, key: &str, fields: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entry = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.dbs
            .entry(db)
            .or_default()
            .entry(table.to_string())
            .or_default()
            .insert(key.to_string(), entry);
    }

    /// Builder form of [`MemoryStore::set`].
    pub fn with_entry<I, K, V>(mut self, db: DbId, table: &str, key: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.set(db, table, key, fields);
        self
    }

    /// Parses a JSON database dump.
    ///
    /// The dump maps database names to `"<TABLE><sep><key>"` entries:
    ///
    /// ```json
    /// {
    ///   "CONFIG_DB": { "ACL_TABLE|DATAACL_5": { "type": "L3", "ports@": "Ethernet20,Ethernet124" } },
    ///   "APPL_DB":   { "ACL_RULE_TABLE:ENI:RULE_1": { "PRIORITY": "9997" } },
    ///   "STATE_DB":  { "ACL_TABLE_TABLE|DATAACL_5": { "status": "Active" } }
    /// }
    /// ```
    ///
    /// List values may be given as JSON arrays; they are stored
    /// comma-joined, as in Redis. Unknown databases are ignored.
    pub fn from_dump_str(instance: impl Into<String>, dump: &str, origin: &str) -> AclShowResult<Self> {
        let root: IndexMap<String, IndexMap<String, IndexMap<String, Value>>> =
            serde_json::from_str(dump).map_err(|e| AclShowError::parse(origin, e.to_string()))?;

        let mut store = Self::new(instance);
        for (db_name, entries) in root {
            let Some(db) = DbId::ALL.into_iter().find(|db| db.name() == db_name) else {
                debug!("{}: skipping unknown database {}", origin, db_name);
                continue;
            };
            for (full_key, raw_fields) in entries {
                let (table, key) = full_key
                    .split_once(db.key_separator())
                    .ok_or_else(|| {
                        AclShowError::parse(
                            origin,
                            format!("{} key '{}' has no table prefix", db.name(), full_key),
                        )
                    })?;
                let fields = raw_fields
                    .into_iter()
                    .map(|(field, value)| -> AclShowResult<(String, String)> {
                        let value = dump_value(&value).ok_or_else(|| {
                            AclShowError::parse(
                                origin,
                                format!("{}:{}: unsupported value for '{}'", db.name(), full_key, field),
                            )
                        })?;
                        Ok((field, value))
                    })
                    .collect::<AclShowResult<Vec<_>>>()?;
                store.set(db, table, key, fields);
            }
        }
        Ok(store)
    }

    /// Loads a JSON database dump from disk.
    ///
    /// A dump that cannot be read means the instance is unreachable.
    pub fn load_dump(instance: impl Into<String>, path: impl AsRef<Path>) -> AclShowResult<Self> {
        let instance = instance.into();
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AclShowError::unreachable(
                instance.as_str(),
                format!("cannot read dump {}: {}", path.display(), e),
            )
        })?;
        debug!("Loaded dump {} for instance '{}'", path.display(), instance);
        Self::from_dump_str(instance, &content, &path.display().to_string())
    }
}

fn dump_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => items
            .iter()
            .map(dump_value)
            .collect::<Option<Vec<_>>>()
            .map(|items| items.join(constants::LIST_SEPARATOR)),
        Value::Null | Value::Object(_) => None,
    }
}

#[async_trait]
impl AclStateStore for MemoryStore {
    fn instance(&self) -> &str {
        &self.instance
    }

    async fn get_table(&self, db: DbId, table: &str) -> AclShowResult<TableEntries> {
        if let Some(message) = &self.unreachable {
            return Err(AclShowError::unreachable(self.instance.as_str(), message.as_str()));
        }

        Ok(self
            .dbs
            .get(&db)
            .and_then(|tables| tables.get(table))
            .map(|entries| {
                entries
                    .iter()
                    .map(|(key, fields)| (key.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}
