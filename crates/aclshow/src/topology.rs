//! ASIC instance topology.
//!
//! The set of instances is passed explicitly to everything that needs it;
//! it is built once per invocation from configuration.

use crate::tables::constants;
use crate::types::InstanceId;

/// Ordered set of ASIC instances the show command reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    instances: Vec<InstanceId>,
}

impl Topology {
    /// Single-ASIC switch with the default (unnamed) instance.
    pub fn single() -> Self {
        Self {
            instances: vec![constants::DEFAULT_INSTANCE.to_string()],
        }
    }

    /// Multi-ASIC switch. An empty list falls back to [`Topology::single`].
    pub fn multi<I, S>(instances: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let instances: Vec<InstanceId> = instances.into_iter().map(Into::into).collect();
        if instances.is_empty() {
            Self::single()
        } else {
            Self { instances }
        }
    }

    /// Instance ids in topology order.
    pub fn instances(&self) -> &[InstanceId] {
        &self.instances
    }

    /// True when more than one instance contributes state.
    pub fn is_multi_instance(&self) -> bool {
        self.instances.len() > 1
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::single()
    }
}
