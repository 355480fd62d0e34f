//! ACL table and rule records.
//!
//! Records are built from the raw field/value hashes returned by each
//! instance's store. Field names are matched case-insensitively since
//! CONFIG_DB and APPL_DB spell them differently.

use indexmap::IndexMap;
use std::fmt;

use crate::error::{AclShowError, AclShowResult};
use crate::source::FieldValues;
use crate::tables::{constants, fields};
use crate::types::{AclDomain, AclPriority, AclStage, InstanceId};

/// A single `(field, value)` match condition of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCondition {
    /// Match field name (e.g. "DST_IP").
    pub field: String,
    /// Match value as stored.
    pub value: String,
}

impl MatchCondition {
    /// Creates a new match condition.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for MatchCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.value)
    }
}

/// An ACL table as reported by the show command.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRecord {
    /// Table name (unique within a domain).
    pub name: String,
    /// Table type (e.g. "L3", "MIRROR", "ENI_REDIRECT").
    pub table_type: String,
    /// Ports (or services, for CTRLPLANE tables) the table is bound to.
    pub bindings: Vec<String>,
    /// Free-text description.
    pub description: String,
    /// ACL stage.
    pub stage: AclStage,
    /// Domain the table was read from.
    pub domain: AclDomain,
    /// Status reported by each instance, in fetch order.
    pub status_by_instance: IndexMap<InstanceId, String>,
}

impl TableRecord {
    /// Creates a table with no bindings, description or status.
    pub fn new(name: impl Into<String>, table_type: impl Into<String>, domain: AclDomain) -> Self {
        Self {
            name: name.into(),
            table_type: table_type.into(),
            bindings: Vec::new(),
            description: String::new(),
            stage: AclStage::default(),
            domain,
            status_by_instance: IndexMap::new(),
        }
    }

    /// Sets the bindings.
    pub fn with_bindings<I, S>(mut self, bindings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bindings = bindings.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the stage.
    pub fn with_stage(mut self, stage: AclStage) -> Self {
        self.stage = stage;
        self
    }

    /// Records the status reported by one instance.
    pub fn with_status(mut self, instance: impl Into<String>, status: impl Into<String>) -> Self {
        self.status_by_instance.insert(instance.into(), status.into());
        self
    }

    /// Builds a table from its raw store fields.
    ///
    /// `type` is required. `stage` defaults to ingress. CTRLPLANE tables
    /// are bound to services rather than ports.
    pub fn from_fields(
        name: &str,
        values: &FieldValues,
        domain: AclDomain,
        instance: &str,
    ) -> AclShowResult<Self> {
        let mut table_type = None;
        let mut description = String::new();
        let mut stage = AclStage::default();
        let mut ports = Vec::new();
        let mut services = Vec::new();

        for (field, value) in values {
            match field.to_uppercase().as_str() {
                fields::TYPE => table_type = Some(value.clone()),
                fields::POLICY_DESC | fields::DESCRIPTION => description = value.clone(),
                fields::STAGE => {
                    stage = value.parse::<AclStage>().map_err(|e| {
                        AclShowError::inconsistent(name, instance, field.as_str(), e)
                    })?;
                }
                fields::PORTS | fields::PORTS_LIST => ports = split_list(value),
                fields::SERVICES | fields::SERVICES_LIST => services = split_list(value),
                _ => {
                    // Ignore unknown fields for forward compatibility
                }
            }
        }

        let table_type = table_type.ok_or_else(|| {
            AclShowError::inconsistent(name, instance, "type", "required field missing")
        })?;

        let bindings = if table_type.eq_ignore_ascii_case(constants::CTRLPLANE_TYPE) {
            services
        } else {
            ports
        };

        Ok(Self {
            name: name.to_string(),
            table_type,
            bindings,
            description,
            stage,
            domain,
            status_by_instance: IndexMap::new(),
        })
    }
}

/// An ACL rule as reported by the show command.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleRecord {
    /// Name of the table the rule belongs to.
    pub table_name: String,
    /// Rule name (unique within its table).
    pub rule_name: String,
    /// Rule priority.
    pub priority: AclPriority,
    /// Display form of the rule's action (e.g. "REDIRECT: 10.0.0.75").
    pub action: String,
    /// Match conditions in display order.
    pub match_conditions: Vec<MatchCondition>,
    /// Domain the rule was read from.
    pub domain: AclDomain,
    /// Status reported by each instance, in fetch order.
    pub status_by_instance: IndexMap<InstanceId, String>,
}

impl RuleRecord {
    /// Creates a rule with no action, matches or status.
    pub fn new(
        table_name: impl Into<String>,
        rule_name: impl Into<String>,
        priority: AclPriority,
        domain: AclDomain,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            rule_name: rule_name.into(),
            priority,
            action: String::new(),
            match_conditions: Vec::new(),
            domain,
            status_by_instance: IndexMap::new(),
        }
    }

    /// Sets the action.
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// Appends a match condition.
    pub fn with_match(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.match_conditions.push(MatchCondition::new(field, value));
        self
    }

    /// Records the status reported by one instance.
    pub fn with_status(mut self, instance: impl Into<String>, status: impl Into<String>) -> Self {
        self.status_by_instance.insert(instance.into(), status.into());
        self
    }

    /// Returns the `<table>|<rule>` key used in diagnostics.
    pub fn key(&self) -> String {
        format!("{}|{}", self.table_name, self.rule_name)
    }

    /// Builds a rule from its raw store fields.
    ///
    /// `PRIORITY` is required. Action fields are folded into the display
    /// action; every other field becomes a match condition, in store order.
    pub fn from_fields(
        table_name: &str,
        rule_name: &str,
        values: &FieldValues,
        domain: AclDomain,
        instance: &str,
    ) -> AclShowResult<Self> {
        let key = format!("{}|{}", table_name, rule_name);

        let priority = field_value(values, fields::PRIORITY)
            .ok_or_else(|| {
                AclShowError::inconsistent(&key, instance, fields::PRIORITY, "required field missing")
            })?
            .trim()
            .parse::<AclPriority>()
            .map_err(|e| AclShowError::inconsistent(&key, instance, fields::PRIORITY, e.to_string()))?;

        let match_conditions = values
            .iter()
            .filter(|(field, _)| !is_reserved_rule_field(field))
            .map(|(field, value)| MatchCondition::new(field.as_str(), value.as_str()))
            .collect();

        Ok(Self {
            table_name: table_name.to_string(),
            rule_name: rule_name.to_string(),
            priority,
            action: derive_action(values),
            match_conditions,
            domain,
            status_by_instance: IndexMap::new(),
        })
    }
}

/// Case-insensitive field lookup.
fn field_value<'a>(values: &'a FieldValues, name: &str) -> Option<&'a str> {
    values
        .iter()
        .find(|(field, _)| field.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

fn is_reserved_rule_field(field: &str) -> bool {
    matches!(
        field.to_uppercase().as_str(),
        fields::PRIORITY
            | fields::PACKET_ACTION
            | fields::REDIRECT_ACTION
            | fields::MIRROR_ACTION
            | fields::MIRROR_INGRESS_ACTION
            | fields::MIRROR_EGRESS_ACTION
    )
}

/// Folds the action fields of a rule into one display string.
fn derive_action(values: &FieldValues) -> String {
    if let Some(action) = field_value(values, fields::PACKET_ACTION) {
        if action.eq_ignore_ascii_case(constants::REDIRECT) {
            if let Some(target) = field_value(values, fields::REDIRECT_ACTION) {
                return format!("{}: {}", constants::REDIRECT, target);
            }
        }
        // CONFIG_DB stores redirects inline as "REDIRECT:<target>"
        if let Some((verb, target)) = action.split_once(':') {
            if verb.eq_ignore_ascii_case(constants::REDIRECT) {
                return format!("{}: {}", constants::REDIRECT, target.trim());
            }
        }
        return action.to_string();
    }

    if let Some(target) = field_value(values, fields::REDIRECT_ACTION) {
        return format!("{}: {}", constants::REDIRECT, target);
    }

    if let Some(session) = field_value(values, fields::MIRROR_INGRESS_ACTION)
        .or_else(|| field_value(values, fields::MIRROR_ACTION))
    {
        return format!("MIRROR INGRESS: {}", session);
    }

    if let Some(session) = field_value(values, fields::MIRROR_EGRESS_ACTION) {
        return format!("MIRROR EGRESS: {}", session);
    }

    String::new()
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(constants::LIST_SEPARATOR)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
