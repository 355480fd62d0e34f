//! Record fetching and cross-instance merge.
//!
//! All instances are queried concurrently. Any failing instance fails the
//! whole fetch; no partially merged record set is ever returned.
//!
//! The fetcher owns display ordering of the raw data:
//! - tables keep store order, first-seen across instances; bindings are
//!   the union of every instance's bindings
//! - rules are grouped by table (first-seen), highest priority first
//!   within a table (stable)
//! - bindings are natural-sorted, match conditions sorted by field

use futures::future::try_join_all;
use indexmap::{IndexMap, IndexSet};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{AclShowError, AclShowResult};
use crate::record::{RuleRecord, TableRecord};
use crate::schema::normalize_status;
use crate::source::{AclStateStore, DbId, FieldValues, TableEntries};
use crate::tables::{
    fields, APP_ACL_RULE_TABLE_NAME, APP_ACL_TABLE_TABLE_NAME, CFG_ACL_RULE_NAME,
    CFG_ACL_TABLE_NAME, STATE_ACL_RULE_TABLE_NAME, STATE_ACL_TABLE_TABLE_NAME,
};
use crate::topology::Topology;
use crate::types::{AclDomain, InstanceId};

/// Raw entries and status entries read from one instance.
struct InstanceSnapshot {
    instance: InstanceId,
    entries: TableEntries,
    states: IndexMap<String, FieldValues>,
}

impl InstanceSnapshot {
    fn status(&self, key: &str) -> Option<&str> {
        self.states.get(key).and_then(|fv| {
            fv.iter()
                .find(|(field, _)| field.eq_ignore_ascii_case(fields::STATUS))
                .map(|(_, value)| value.as_str())
        })
    }
}

/// Fetches and merges ACL records from every instance of a topology.
pub struct AclFetcher {
    topology: Topology,
    stores: HashMap<InstanceId, Arc<dyn AclStateStore>>,
}

impl AclFetcher {
    /// Creates a fetcher. Every instance of the topology needs a store.
    pub fn new(topology: Topology, stores: Vec<Arc<dyn AclStateStore>>) -> AclShowResult<Self> {
        let stores: HashMap<InstanceId, Arc<dyn AclStateStore>> = stores
            .into_iter()
            .map(|store| (store.instance().to_string(), store))
            .collect();

        if let Some(missing) = topology
            .instances()
            .iter()
            .find(|instance| !stores.contains_key(*instance))
        {
            return Err(AclShowError::unreachable(
                missing.as_str(),
                "no state store configured",
            ));
        }

        Ok(Self { topology, stores })
    }

    /// Returns the topology this fetcher reports on.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    async fn snapshot(
        &self,
        instance: &InstanceId,
        db: DbId,
        table: &str,
        state_table: &str,
    ) -> AclShowResult<InstanceSnapshot> {
        let store = self
            .stores
            .get(instance)
            .ok_or_else(|| AclShowError::unreachable(instance.as_str(), "no state store configured"))?;

        let (entries, states) = futures::try_join!(
            store.get_table(db, table),
            store.get_table(DbId::StateDb, state_table)
        )?;
        debug!(
            "Instance '{}': {} {} entries, {} status entries",
            instance,
            entries.len(),
            table,
            states.len()
        );

        Ok(InstanceSnapshot {
            instance: instance.clone(),
            entries,
            states: states.into_iter().collect(),
        })
    }

    async fn snapshots(
        &self,
        db: DbId,
        table: &str,
        state_table: &str,
    ) -> AclShowResult<Vec<InstanceSnapshot>> {
        try_join_all(
            self.topology
                .instances()
                .iter()
                .map(|instance| self.snapshot(instance, db, table, state_table)),
        )
        .await
    }

    /// Fetches every table of `domain`, with status from every instance.
    pub async fn fetch_tables(&self, domain: AclDomain) -> AclShowResult<Vec<TableRecord>> {
        let (db, table) = match domain {
            AclDomain::ControlPlane => (DbId::ConfigDb, CFG_ACL_TABLE_NAME),
            AclDomain::Dataplane => (DbId::ApplDb, APP_ACL_TABLE_TABLE_NAME),
        };
        let snapshots = self.snapshots(db, table, STATE_ACL_TABLE_TABLE_NAME).await?;

        let mut merged: IndexMap<String, TableRecord> = IndexMap::new();
        for snapshot in &snapshots {
            for (name, values) in &snapshot.entries {
                let record = TableRecord::from_fields(name, values, domain, &snapshot.instance)?;
                match merged.get_mut(name) {
                    // each instance binds the table to its own ports
                    Some(existing) => {
                        for binding in record.bindings {
                            if !existing.bindings.contains(&binding) {
                                existing.bindings.push(binding);
                            }
                        }
                    }
                    None => {
                        merged.insert(name.clone(), record);
                    }
                }
            }
        }

        for record in merged.values_mut() {
            record.bindings.sort_by(|a, b| natural_cmp(a, b));
            for snapshot in &snapshots {
                let status = normalize_status(domain, snapshot.status(&record.name));
                record
                    .status_by_instance
                    .insert(snapshot.instance.clone(), status);
            }
        }

        info!("Fetched {} {} ACL tables", merged.len(), domain);
        Ok(merged.into_values().collect())
    }

    /// Fetches every rule of `domain`, grouped by table, highest priority
    /// first within each table.
    pub async fn fetch_rules(&self, domain: AclDomain) -> AclShowResult<Vec<RuleRecord>> {
        let (db, table) = match domain {
            AclDomain::ControlPlane => (DbId::ConfigDb, CFG_ACL_RULE_NAME),
            AclDomain::Dataplane => (DbId::ApplDb, APP_ACL_RULE_TABLE_NAME),
        };
        let snapshots = self.snapshots(db, table, STATE_ACL_RULE_TABLE_NAME).await?;

        let mut merged: IndexMap<String, RuleRecord> = IndexMap::new();
        for snapshot in &snapshots {
            for (key, values) in &snapshot.entries {
                let (table_name, rule_name) =
                    key.split_once(db.key_separator()).ok_or_else(|| {
                        AclShowError::inconsistent(
                            key.as_str(),
                            snapshot.instance.as_str(),
                            "key",
                            format!("expected <table>{}<rule>", db.key_separator()),
                        )
                    })?;
                let mut record = RuleRecord::from_fields(
                    table_name,
                    rule_name,
                    values,
                    domain,
                    &snapshot.instance,
                )?;
                let merge_key = record.key();
                if !merged.contains_key(&merge_key) {
                    record
                        .match_conditions
                        .sort_by(|a, b| a.field.cmp(&b.field));
                    merged.insert(merge_key, record);
                }
            }
        }

        for (key, record) in merged.iter_mut() {
            for snapshot in &snapshots {
                let status = normalize_status(domain, snapshot.status(key));
                record
                    .status_by_instance
                    .insert(snapshot.instance.clone(), status);
            }
        }

        let table_order: IndexSet<String> = merged
            .values()
            .map(|rule| rule.table_name.clone())
            .collect();
        let position = |rule: &RuleRecord| table_order.get_index_of(&rule.table_name);

        let mut rules: Vec<RuleRecord> = merged.into_values().collect();
        rules.sort_by(|a, b| {
            position(a)
                .cmp(&position(b))
                .then_with(|| b.priority.cmp(&a.priority))
        });

        info!("Fetched {} {} ACL rules", rules.len(), domain);
        Ok(rules)
    }
}

fn split_chunks(s: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut prev_digit = None;
    for (idx, ch) in s.char_indices() {
        let is_digit = ch.is_ascii_digit();
        if prev_digit.is_some_and(|prev| prev != is_digit) {
            chunks.push(&s[start..idx]);
            start = idx;
        }
        prev_digit = Some(is_digit);
    }
    if start < s.len() {
        chunks.push(&s[start..]);
    }
    chunks
}

/// Natural ordering of interface names: `Ethernet20` < `Ethernet124`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (a_chunks, b_chunks) = (split_chunks(a), split_chunks(b));
    for (x, y) in a_chunks.iter().zip(&b_chunks) {
        let numeric = x.bytes().all(|c| c.is_ascii_digit()) && y.bytes().all(|c| c.is_ascii_digit());
        let ord = if numeric {
            let (x, y) = (x.trim_start_matches('0'), y.trim_start_matches('0'));
            x.len().cmp(&y.len()).then_with(|| x.cmp(y))
        } else {
            x.cmp(y)
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a_chunks.len().cmp(&b_chunks.len()).then_with(|| a.cmp(b))
}
