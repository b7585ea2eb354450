//! # Compliance Cache
//!
//! Memoizes built [`StatusMatrix`] values keyed by the snapshot's content
//! digest and the reference date. Any change to a device, member, or record
//! changes the digest, so stale entries are never served; they age out of
//! the bounded queue instead of being invalidated.
//!
//! The cache owns its [`MembershipPolicy`]. A matrix depends on which
//! members are active, so a cache must not be shared between policies.
//!
//! The cache is meant for a long-lived host that re-evaluates the same
//! snapshot for many requests, such as a practice backend holding it in an
//! `Arc`. The one-shot `praxis` CLI evaluates once and builds the matrix
//! directly.
//!
//! The lock is `parking_lot::RwLock`: non-poisoning, and never held while a
//! matrix is being built.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::RwLock;

use praxis_core::{CanonicalizationError, ContentDigest, ReferenceDate};

use crate::matrix::StatusMatrix;
use crate::membership::{DefaultMembershipPolicy, MembershipPolicy};
use crate::snapshot::Snapshot;

/// Number of matrices kept by [`ComplianceCache::new`].
pub const DEFAULT_CAPACITY: usize = 8;

/// Identity of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Content digest of the snapshot.
    pub snapshot: ContentDigest,
    /// Reference date of the evaluation.
    pub reference_date: ReferenceDate,
}

/// Bounded, thread-safe memo of status matrices.
#[derive(Debug)]
pub struct ComplianceCache<P: MembershipPolicy = DefaultMembershipPolicy> {
    policy: P,
    capacity: usize,
    // Most recently used at the back.
    entries: RwLock<VecDeque<(CacheKey, Arc<StatusMatrix>)>>,
}

impl ComplianceCache<DefaultMembershipPolicy> {
    /// A cache using the default membership policy and capacity.
    pub fn new() -> Self {
        Self::with_policy(DefaultMembershipPolicy, DEFAULT_CAPACITY)
    }
}

impl Default for ComplianceCache<DefaultMembershipPolicy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: MembershipPolicy> ComplianceCache<P> {
    /// A cache with an explicit policy and capacity. A capacity of zero is
    /// raised to one.
    pub fn with_policy(policy: P, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            policy,
            capacity,
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// The membership policy matrices are built with.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Maximum number of matrices retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Look up a matrix without building it.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<StatusMatrix>> {
        self.entries
            .read()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, m)| Arc::clone(m))
    }

    /// Return the cached matrix for this snapshot and date, building and
    /// storing it on a miss.
    pub fn get_or_build(
        &self,
        snapshot: &Snapshot,
        as_of: ReferenceDate,
    ) -> Result<Arc<StatusMatrix>, CanonicalizationError> {
        let key = CacheKey {
            snapshot: snapshot.digest()?,
            reference_date: as_of,
        };

        if let Some(hit) = self.touch(&key) {
            tracing::debug!(snapshot = %key.snapshot, as_of = %as_of, "compliance cache hit");
            return Ok(hit);
        }

        tracing::debug!(snapshot = %key.snapshot, as_of = %as_of, "compliance cache miss");
        let built = Arc::new(snapshot.evaluate(&self.policy, as_of));

        let mut entries = self.entries.write();
        // Another thread may have built the same key meanwhile.
        if let Some((_, existing)) = entries.iter().find(|(k, _)| *k == key) {
            return Ok(Arc::clone(existing));
        }
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back((key, Arc::clone(&built)));
        Ok(built)
    }

    /// Number of cached matrices.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every cached matrix.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Move a hit to the most-recently-used position.
    fn touch(&self, key: &CacheKey) -> Option<Arc<StatusMatrix>> {
        let mut entries = self.entries.write();
        let pos = entries.iter().position(|(k, _)| k == key)?;
        let entry = entries.remove(pos)?;
        let matrix = Arc::clone(&entry.1);
        entries.push_back(entry);
        Some(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::AllMembersActive;
    use crate::model::{Device, TeamMember, TrainingRecord};
    use chrono::NaiveDate;
    use praxis_core::{DeviceId, TeamMemberId, TrainingRecordId};

    fn date(y: i32, m: u32, d: u32) -> ReferenceDate {
        ReferenceDate::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn snapshot() -> Snapshot {
        let mut former = TeamMember::new(TeamMemberId::new("m-2").unwrap(), "Jonas", "Weber");
        former.is_active = Some(false);
        Snapshot::new(
            vec![Device::new(DeviceId::new("d-1").unwrap(), "Autoklav")],
            vec![
                TeamMember::new(TeamMemberId::new("m-1").unwrap(), "Anna", "Schmidt"),
                former,
            ],
            vec![TrainingRecord::new(
                TrainingRecordId::new("t-1").unwrap(),
                TeamMemberId::new("m-1").unwrap(),
                DeviceId::new("d-1").unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            )],
        )
    }

    #[test]
    fn same_key_returns_same_matrix() {
        let cache = ComplianceCache::new();
        let snap = snapshot();
        let first = cache.get_or_build(&snap, date(2026, 1, 15)).unwrap();
        let second = cache.get_or_build(&snap.clone(), date(2026, 1, 15)).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn shared_cache_converges_on_one_matrix() {
        let cache = Arc::new(ComplianceCache::new());
        let snap = snapshot();
        let as_of = date(2026, 1, 15);

        let matrices: Vec<Arc<StatusMatrix>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let cache = Arc::clone(&cache);
                    let snap = &snap;
                    scope.spawn(move || cache.get_or_build(snap, as_of).unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(cache.len(), 1);
        let cached = cache.get_or_build(&snap, as_of).unwrap();
        assert!(matrices.iter().all(|m| Arc::ptr_eq(m, &cached)));
    }

    #[test]
    fn changed_date_or_snapshot_misses() {
        let cache = ComplianceCache::new();
        let snap = snapshot();
        let a = cache.get_or_build(&snap, date(2026, 1, 15)).unwrap();
        let b = cache.get_or_build(&snap, date(2026, 1, 16)).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));

        let mut changed = snap.clone();
        changed.trainings[0].is_valid = false;
        let c = cache.get_or_build(&changed, date(2026, 1, 15)).unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn capacity_evicts_least_recently_used() {
        let cache = ComplianceCache::with_policy(DefaultMembershipPolicy, 2);
        let snap = snapshot();
        let d1 = date(2026, 1, 1);
        let d2 = date(2026, 1, 2);
        let d3 = date(2026, 1, 3);
        cache.get_or_build(&snap, d1).unwrap();
        cache.get_or_build(&snap, d2).unwrap();
        // Touch d1 so d2 becomes the oldest.
        cache.get_or_build(&snap, d1).unwrap();
        cache.get_or_build(&snap, d3).unwrap();

        let digest = snap.digest().unwrap();
        let key = |reference_date| CacheKey {
            snapshot: digest,
            reference_date,
        };
        assert!(cache.get(&key(d1)).is_some());
        assert!(cache.get(&key(d2)).is_none());
        assert!(cache.get(&key(d3)).is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn policy_decides_matrix_rows() {
        let snap = snapshot();
        let default = ComplianceCache::new();
        let everyone = ComplianceCache::with_policy(AllMembersActive, 1);
        let as_of = date(2026, 1, 15);
        assert_eq!(default.get_or_build(&snap, as_of).unwrap().members().len(), 1);
        assert_eq!(everyone.get_or_build(&snap, as_of).unwrap().members().len(), 2);
    }

    #[test]
    fn zero_capacity_is_raised_and_clear_empties() {
        let cache = ComplianceCache::with_policy(DefaultMembershipPolicy, 0);
        assert_eq!(cache.capacity(), 1);
        cache.get_or_build(&snapshot(), date(2026, 1, 15)).unwrap();
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
    }
}
