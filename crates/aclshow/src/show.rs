//! `show table` and `show rule` orchestration.
//!
//! Resolves which ACL domain a name belongs to, filters the fetched
//! records, reconciles status and hands rows to the renderer.

use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::AclShowConfig;
use crate::error::{AclShowError, AclShowResult};
use crate::fetch::AclFetcher;
use crate::record::{RuleRecord, TableRecord};
use crate::rows::Row;
use crate::schema::{rule_schema, table_schema, Schema};
use crate::source::{AclStateStore, MemoryStore};
use crate::status::{reconcile, ReconciledStatus};
use crate::types::{AclDomain, AclEntityKind, InstanceId, StatusMode};

/// The ACL show command engine.
pub struct AclShow {
    fetcher: AclFetcher,
    status_mode: StatusMode,
}

impl AclShow {
    /// Creates the engine over an existing fetcher.
    pub fn new(fetcher: AclFetcher, status_mode: StatusMode) -> Self {
        Self {
            fetcher,
            status_mode,
        }
    }

    /// Builds the engine from configuration, loading one database dump
    /// per configured instance.
    pub fn from_config(config: &AclShowConfig) -> AclShowResult<Self> {
        let topology = config.topology();
        let stores = topology
            .instances()
            .iter()
            .map(|instance| -> AclShowResult<Arc<dyn AclStateStore>> {
                let store = MemoryStore::load_dump(instance.as_str(), config.dump_path(instance))?;
                Ok(Arc::new(store) as Arc<dyn AclStateStore>)
            })
            .collect::<AclShowResult<Vec<_>>>()?;

        let fetcher = AclFetcher::new(topology, stores)?;
        Ok(Self::new(fetcher, config.output.status_rendering))
    }

    fn status_of(
        &self,
        entity: &str,
        status_by_instance: &IndexMap<InstanceId, String>,
    ) -> AclShowResult<ReconciledStatus> {
        let force = self
            .status_mode
            .forces_per_instance(self.fetcher.topology().is_multi_instance());
        reconcile(status_by_instance, force).ok_or_else(|| {
            AclShowError::inconsistent(entity, "all", "status", "no instance reported a status")
        })
    }

    fn table_rows(&self, tables: &[TableRecord]) -> AclShowResult<Vec<Row>> {
        let mut rows = Vec::new();
        for table in tables {
            let status = self.status_of(&table.name, &table.status_by_instance)?;
            rows.extend(table_schema(table.domain).rows(table, &status));
        }
        Ok(rows)
    }

    fn rule_rows(&self, rules: &[RuleRecord]) -> AclShowResult<Vec<Row>> {
        let mut rows = Vec::new();
        for rule in rules {
            let status = self.status_of(&rule.key(), &rule.status_by_instance)?;
            rows.extend(rule_schema(rule.domain).rows(rule, &status));
        }
        Ok(rows)
    }

    /// Renders ACL tables.
    ///
    /// With a name, the dataplane is consulted first and the control plane
    /// second; a name found in neither is [`AclShowError::EntityNotFound`].
    /// Without a name, control-plane tables are listed before dataplane
    /// tables.
    pub async fn show_table(&self, name: Option<&str>) -> AclShowResult<String> {
        let (schema, tables) = match name {
            Some(name) => {
                let (domain, tables) = self.resolve_table(name).await?;
                let selected: Vec<TableRecord> =
                    tables.into_iter().filter(|t| t.name == name).collect();
                (table_schema(domain), selected)
            }
            None => {
                let mut tables = self.fetcher.fetch_tables(AclDomain::ControlPlane).await?;
                tables.extend(self.fetcher.fetch_tables(AclDomain::Dataplane).await?);
                (table_schema(AclDomain::ControlPlane), tables)
            }
        };

        info!("Rendering {} ACL tables", tables.len());
        let rows = self.table_rows(&tables)?;
        Ok(schema.render(&rows))
    }

    /// Renders ACL rules, optionally limited to one table and one rule.
    ///
    /// A table that exists but has no rules renders an empty table. A table
    /// or rule name that matches nothing is
    /// [`AclShowError::EntityNotFound`].
    pub async fn show_rule(
        &self,
        table_name: Option<&str>,
        rule_name: Option<&str>,
    ) -> AclShowResult<String> {
        let (schema, rules): (Schema<RuleRecord>, Vec<RuleRecord>) = match table_name {
            Some(table_name) => {
                let domain = self.resolve_rule_domain(table_name).await?;
                let rules = self
                    .fetcher
                    .fetch_rules(domain)
                    .await?
                    .into_iter()
                    .filter(|r| r.table_name == table_name)
                    .collect();
                (rule_schema(domain), rules)
            }
            None => {
                let mut rules = self.fetcher.fetch_rules(AclDomain::ControlPlane).await?;
                rules.extend(self.fetcher.fetch_rules(AclDomain::Dataplane).await?);
                (rule_schema(AclDomain::ControlPlane), rules)
            }
        };

        let rules: Vec<RuleRecord> = match rule_name {
            Some(rule_name) => {
                let selected: Vec<RuleRecord> = rules
                    .into_iter()
                    .filter(|r| r.rule_name == rule_name)
                    .collect();
                if selected.is_empty() {
                    let name = match table_name {
                        Some(table_name) => format!("{}|{}", table_name, rule_name),
                        None => rule_name.to_string(),
                    };
                    return Err(AclShowError::not_found(AclEntityKind::Rule, name));
                }
                selected
            }
            None => rules,
        };

        info!("Rendering {} ACL rules", rules.len());
        let rows = self.rule_rows(&rules)?;
        Ok(schema.render(&rows))
    }

    /// Finds the domain holding table `name`, returning that domain's tables.
    async fn resolve_table(&self, name: &str) -> AclShowResult<(AclDomain, Vec<TableRecord>)> {
        for domain in [AclDomain::Dataplane, AclDomain::ControlPlane] {
            let tables = self.fetcher.fetch_tables(domain).await?;
            if tables.iter().any(|t| t.name == name) {
                debug!("Table '{}' resolved to the {} domain", name, domain);
                return Ok((domain, tables));
            }
        }
        Err(AclShowError::not_found(AclEntityKind::Table, name))
    }

    /// Finds the domain whose rules belong to table `name`.
    ///
    /// A table is known to a domain if the domain defines it or holds
    /// rules for it.
    async fn resolve_rule_domain(&self, name: &str) -> AclShowResult<AclDomain> {
        for domain in [AclDomain::Dataplane, AclDomain::ControlPlane] {
            let has_table = self
                .fetcher
                .fetch_tables(domain)
                .await?
                .iter()
                .any(|t| t.name == name);
            let known = has_table
                || self
                    .fetcher
                    .fetch_rules(domain)
                    .await?
                    .iter()
                    .any(|r| r.table_name == name);
            if known {
                debug!("Rules of '{}' resolved to the {} domain", name, domain);
                return Ok(domain);
            }
        }
        Err(AclShowError::not_found(AclEntityKind::Table, name))
    }
}
