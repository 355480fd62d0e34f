//! Schema adapters for the control-plane and dataplane ACL views.
//!
//! Both domains share the row builder and renderer. They differ in the
//! status vocabulary and in how the Priority column is aligned.

use crate::record::{RuleRecord, TableRecord};
use crate::render::{render_table, Alignment};
use crate::rows::{build_rows, Column, Row};
use crate::status::ReconciledStatus;
use crate::tables::constants;
use crate::types::AclDomain;

/// Columns of one view plus the domain they present.
pub struct Schema<R> {
    pub domain: AclDomain,
    pub columns: Vec<Column<R>>,
}

impl<R> Schema<R> {
    /// Header text and alignment of every column.
    pub fn headers(&self) -> Vec<(&'static str, Alignment)> {
        self.columns
            .iter()
            .map(|column| (column.header, column.align))
            .collect()
    }

    /// Builds the rows of one entity.
    pub fn rows(&self, entity: &R, status: &ReconciledStatus) -> Vec<Row> {
        build_rows(entity, status, &self.columns)
    }

    /// Renders pre-built rows under this schema's header.
    pub fn render(&self, rows: &[Row]) -> String {
        render_table(&self.headers(), rows)
    }
}

/// `Name / Type / Binding / Description / Stage / Status`
pub fn table_schema(domain: AclDomain) -> Schema<TableRecord> {
    Schema {
        domain,
        columns: vec![
            Column::field("Name", |t: &TableRecord| t.name.clone()),
            Column::field("Type", |t: &TableRecord| t.table_type.clone()),
            Column::expand("Binding", |t: &TableRecord| t.bindings.clone()),
            Column::field("Description", |t: &TableRecord| t.description.clone()),
            Column::field("Stage", |t: &TableRecord| t.stage.to_string()),
            Column::status("Status"),
        ],
    }
}

/// `Table / Rule / Priority / Action / Match / Status`
///
/// Control-plane priorities are numeric and right-aligned; dataplane
/// priorities are shown as stored, left-aligned.
pub fn rule_schema(domain: AclDomain) -> Schema<RuleRecord> {
    let priority_align = match domain {
        AclDomain::ControlPlane => Alignment::Right,
        AclDomain::Dataplane => Alignment::Left,
    };

    Schema {
        domain,
        columns: vec![
            Column::field("Table", |r: &RuleRecord| r.table_name.clone()),
            Column::field("Rule", |r: &RuleRecord| r.rule_name.clone()),
            Column::field("Priority", |r: &RuleRecord| r.priority.to_string())
                .align(priority_align),
            Column::field("Action", |r: &RuleRecord| r.action.clone()),
            Column::expand("Match", |r: &RuleRecord| {
                r.match_conditions.iter().map(ToString::to_string).collect()
            }),
            Column::status("Status"),
        ],
    }
}

/// Maps a raw STATE_DB status onto the domain's vocabulary.
///
/// A missing entry is `N/A` in both domains. Control-plane values are shown
/// verbatim; the dataplane view only distinguishes `Active` from `N/A`.
pub fn normalize_status(domain: AclDomain, raw: Option<&str>) -> String {
    match (domain, raw) {
        (_, None) => constants::NA_STATUS.to_string(),
        (AclDomain::ControlPlane, Some(status)) => status.to_string(),
        (AclDomain::Dataplane, Some(status))
            if status.eq_ignore_ascii_case(constants::ACTIVE_STATUS) =>
        {
            constants::ACTIVE_STATUS.to_string()
        }
        (AclDomain::Dataplane, Some(_)) => constants::NA_STATUS.to_string(),
    }
}
