//! Table name constants for aclshow

/// CONFIG_DB ACL_TABLE table (control-plane tables)
pub const CFG_ACL_TABLE_NAME: &str = "ACL_TABLE";

/// CONFIG_DB ACL_RULE table (control-plane rules)
pub const CFG_ACL_RULE_NAME: &str = "ACL_RULE";

/// APPL_DB ACL_TABLE_TABLE (dataplane tables)
pub const APP_ACL_TABLE_TABLE_NAME: &str = "ACL_TABLE_TABLE";

/// APPL_DB ACL_RULE_TABLE (dataplane rules)
pub const APP_ACL_RULE_TABLE_NAME: &str = "ACL_RULE_TABLE";

/// STATE_DB ACL_TABLE_TABLE (table status)
pub const STATE_ACL_TABLE_TABLE_NAME: &str = "ACL_TABLE_TABLE";

/// STATE_DB ACL_RULE_TABLE (rule status)
pub const STATE_ACL_RULE_TABLE_NAME: &str = "ACL_RULE_TABLE";

/// Field names used in ACL tables
pub mod fields {
    pub const TYPE: &str = "TYPE";
    pub const POLICY_DESC: &str = "POLICY_DESC";
    pub const DESCRIPTION: &str = "DESCRIPTION";
    pub const STAGE: &str = "STAGE";
    pub const PORTS: &str = "PORTS";
    pub const PORTS_LIST: &str = "PORTS@";
    pub const SERVICES: &str = "SERVICES";
    pub const SERVICES_LIST: &str = "SERVICES@";
    pub const STATUS: &str = "status";

    pub const PRIORITY: &str = "PRIORITY";
    pub const PACKET_ACTION: &str = "PACKET_ACTION";
    pub const REDIRECT_ACTION: &str = "REDIRECT_ACTION";
    pub const MIRROR_ACTION: &str = "MIRROR_ACTION";
    pub const MIRROR_INGRESS_ACTION: &str = "MIRROR_INGRESS_ACTION";
    pub const MIRROR_EGRESS_ACTION: &str = "MIRROR_EGRESS_ACTION";
}

/// Special constants
pub mod constants {
    /// Status reported when an instance holds no state for an entity
    pub const NA_STATUS: &str = "N/A";

    /// Status of a successfully programmed entity
    pub const ACTIVE_STATUS: &str = "Active";

    /// Packet action value that takes its target from REDIRECT_ACTION
    pub const REDIRECT: &str = "REDIRECT";

    /// Table type whose bindings are services instead of ports
    pub const CTRLPLANE_TYPE: &str = "CTRLPLANE";

    /// Instance id used when the switch has a single ASIC
    pub const DEFAULT_INSTANCE: &str = "";

    /// Separator between list items in a `@`-suffixed field
    pub const LIST_SEPARATOR: &str = ",";
}
