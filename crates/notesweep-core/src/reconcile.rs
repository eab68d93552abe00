//! Set reconciler: pure classification of the authoritative set against the
//! observed set.
//!
//! The two reconciliation kinds disagree on which side owns the orphans.
//! Revisions treat extra content files as orphans; tags treat database rows
//! missing from the export as orphans (inverted authority). The direction is
//! an explicit parameter, never an assumption.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

/// Which side of the comparison yields orphan candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrphanPolarity {
    /// Orphans are observed identifiers absent from the authoritative set
    /// (revision reconciliation)
    ObservedExtra,
    /// Orphans are authoritative identifiers absent from the observed set
    /// (tag reconciliation against an export)
    AuthoritativeExtra,
}

/// Classified discrepancies between the two sets.
///
/// `missing` and `orphans` are always disjoint and their union is the
/// symmetric difference of the inputs. Both classes are always computed;
/// missing counterparts never suppress orphan handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Identifiers expected by one side but absent from the other; reported
    /// as a consistency warning, never auto-fixed
    pub missing: BTreeSet<String>,
    /// Identifiers eligible for disposal
    pub orphans: BTreeSet<String>,
}

impl Reconciliation {
    /// True when the symmetric difference of the inputs was empty
    pub fn in_sync(&self) -> bool {
        self.missing.is_empty() && self.orphans.is_empty()
    }
}

/// Classify the discrepancies between an authoritative and an observed set.
///
/// Pure: no side effects, inputs untouched. Sorted sets are returned so
/// reports are stable, but only membership carries meaning.
pub fn reconcile(
    authoritative: &HashSet<String>,
    observed: &HashSet<String>,
    polarity: OrphanPolarity,
) -> Reconciliation {
    let auth_only: BTreeSet<String> = authoritative.difference(observed).cloned().collect();
    let observed_only: BTreeSet<String> = observed.difference(authoritative).cloned().collect();

    match polarity {
        OrphanPolarity::ObservedExtra => Reconciliation {
            missing: auth_only,
            orphans: observed_only,
        },
        OrphanPolarity::AuthoritativeExtra => Reconciliation {
            missing: observed_only,
            orphans: auth_only,
        },
    }
}
