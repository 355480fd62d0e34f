//! # aclshow - ACL State Reconciliation and Rendering
//!
//! This crate implements the engine behind `acl-loader show table` and
//! `acl-loader show rule` for SONiC. It reconciles ACL table and rule state
//! collected from one or more ASIC instances and renders it as stable,
//! column-aligned text.
//!
//! ## Responsibilities
//! - Fetch raw ACL descriptors and status from every ASIC instance
//! - Collapse per-instance status into one reportable value
//! - Expand multi-valued fields (bindings, match conditions) into
//!   continuation rows
//! - Lay out rows as a header-and-dashes text table
//!
//! ## Data Sources
//! - `ACL_TABLE` / `ACL_RULE` (CONFIG_DB): control-plane ACLs
//! - `ACL_TABLE_TABLE` / `ACL_RULE_TABLE` (APPL_DB): dataplane redirect ACLs
//! - `ACL_TABLE_TABLE` / `ACL_RULE_TABLE` (STATE_DB): per-instance status
//!
//! # Architecture
//!
//! ```text
//! Topology ──> AclFetcher ──> reconcile() ──> build_rows() ──> render_table()
//!                 │
//!                 └──> AclStateStore (one per ASIC instance)
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod record;
pub mod render;
pub mod rows;
pub mod schema;
pub mod show;
pub mod source;
pub mod status;
pub mod tables;
pub mod topology;
pub mod types;

pub use config::{AclShowConfig, DEFAULT_CONFIG_PATH};
pub use error::{AclShowError, AclShowResult};
pub use fetch::AclFetcher;
pub use record::{MatchCondition, RuleRecord, TableRecord};
pub use render::{render_table, Alignment};
pub use rows::{build_rows, CellSource, Column, Row};
pub use schema::Schema;
pub use show::AclShow;
pub use source::{AclStateStore, DbId, FieldValues, MemoryStore, TableEntries};
pub use status::{reconcile, ReconciledStatus};
pub use topology::Topology;
pub use types::{AclDomain, AclEntityKind, AclPriority, AclStage, InstanceId, StatusMode};
