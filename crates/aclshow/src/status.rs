//! Status reconciliation across ASIC instances.
//!
//! Every instance reports a status string for each table and rule. The
//! reconciler collapses those into a single reportable value, or keeps the
//! per-instance view when the values disagree (or when the caller asks for
//! it, see [`StatusMode`](crate::types::StatusMode)).

use indexmap::IndexMap;
use itertools::Itertools;
use std::fmt;

use crate::types::InstanceId;

/// Status of one entity after reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconciledStatus {
    /// Every instance agrees (or there is only one).
    Scalar(String),
    /// `(instance, status)` pairs sorted by instance id.
    PerInstance(Vec<(InstanceId, String)>),
}

/// Renders `Scalar` as the bare value and `PerInstance` as
/// `{'asic0': 'Active', 'asic2': 'Active'}`.
impl fmt::Display for ReconciledStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(status) => f.write_str(status),
            Self::PerInstance(pairs) => write!(
                f,
                "{{{}}}",
                pairs
                    .iter()
                    .map(|(instance, status)| format!("'{}': '{}'", instance, status))
                    .join(", ")
            ),
        }
    }
}

/// Reconciles the per-instance status of one entity.
///
/// Returns `None` when no instance reported a status. Otherwise the result
/// is `Scalar` iff all values are equal and `force_per_instance` is false.
/// Instance ids in a `PerInstance` result are sorted ascending so the output
/// does not depend on fetch order.
pub fn reconcile(
    status_by_instance: &IndexMap<InstanceId, String>,
    force_per_instance: bool,
) -> Option<ReconciledStatus> {
    let first = status_by_instance.values().next()?;

    let all_equal = status_by_instance.values().all(|status| status == first);
    if all_equal && !force_per_instance {
        return Some(ReconciledStatus::Scalar(first.clone()));
    }

    let pairs = status_by_instance
        .iter()
        .map(|(instance, status)| (instance.clone(), status.clone()))
        .sorted_by(|a, b| a.0.cmp(&b.0))
        .collect();
    Some(ReconciledStatus::PerInstance(pairs))
}
