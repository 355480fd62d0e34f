//! ACL show types and enums.
//!
//! Type-safe replacements for the strings the show command passes around:
//! stages, entity kinds, ACL domains and the status rendering mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ASIC instance identifier (namespace name, e.g. "asic0").
pub type InstanceId = String;

/// ACL priority (higher = matched first).
pub type AclPriority = u32;

/// ACL stage (ingress or egress).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AclStage {
    /// Ingress ACL (applied to incoming packets).
    #[default]
    Ingress,
    /// Egress ACL (applied to outgoing packets).
    Egress,
}

impl fmt::Display for AclStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ingress => write!(f, "ingress"),
            Self::Egress => write!(f, "egress"),
        }
    }
}

impl FromStr for AclStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INGRESS" => Ok(Self::Ingress),
            "EGRESS" => Ok(Self::Egress),
            _ => Err(format!("Unknown ACL stage: {}", s)),
        }
    }
}

/// Kind of ACL entity being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AclEntityKind {
    Table,
    Rule,
}

impl fmt::Display for AclEntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Rule => write!(f, "rule"),
        }
    }
}

/// Which ACL domain (and therefore which store) an entity comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AclDomain {
    /// L3/L2/control-plane ACLs configured in CONFIG_DB.
    ControlPlane,
    /// Redirect ACLs programmed directly into APPL_DB.
    Dataplane,
}

impl fmt::Display for AclDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ControlPlane => write!(f, "control-plane"),
            Self::Dataplane => write!(f, "dataplane"),
        }
    }
}

/// How the Status column is rendered across ASIC instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusMode {
    /// Scalar on single-ASIC switches, per-instance mapping on multi-ASIC
    /// switches even when every instance agrees.
    #[default]
    Auto,
    /// Scalar whenever all instances agree, mapping otherwise.
    Collapse,
    /// Always a per-instance mapping.
    PerInstance,
}

impl StatusMode {
    /// Returns true if status must be shown per instance even when all
    /// instances report the same value.
    pub fn forces_per_instance(&self, multi_instance: bool) -> bool {
        match self {
            Self::Auto => multi_instance,
            Self::Collapse => false,
            Self::PerInstance => true,
        }
    }
}

impl FromStr for StatusMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "collapse" => Ok(Self::Collapse),
            "per-instance" | "per_instance" => Ok(Self::PerInstance),
            _ => Err(format!("Unknown status rendering mode: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acl_stage_parse() {
        assert_eq!("INGRESS".parse::<AclStage>().unwrap(), AclStage::Ingress);
        assert_eq!("egress".parse::<AclStage>().unwrap(), AclStage::Egress);
        assert!("INVALID".parse::<AclStage>().is_err());
    }

    #[test]
    fn test_acl_stage_display() {
        assert_eq!(AclStage::Ingress.to_string(), "ingress");
        assert_eq!(AclStage::Egress.to_string(), "egress");
    }

    #[test]
    fn test_status_mode_forces_per_instance() {
        assert!(!StatusMode::Auto.forces_per_instance(false));
        assert!(StatusMode::Auto.forces_per_instance(true));
        assert!(!StatusMode::Collapse.forces_per_instance(true));
        assert!(StatusMode::PerInstance.forces_per_instance(false));
    }

    #[test]
    fn test_status_mode_parse() {
        assert_eq!("auto".parse::<StatusMode>().unwrap(), StatusMode::Auto);
        assert_eq!(
            "per-instance".parse::<StatusMode>().unwrap(),
            StatusMode::PerInstance
        );
        assert!("sometimes".parse::<StatusMode>().is_err());
    }
}
