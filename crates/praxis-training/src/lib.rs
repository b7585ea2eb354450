//! # praxis-training — Device-Training Compliance Engine
//!
//! Computes, for a medical practice, whether each active team member holds a
//! current briefing on each active device, and aggregates those pair
//! statuses for the dashboard views:
//!
//! - **Status** (`status.rs`): [`resolve_status`] maps one (member, device)
//!   pair to [`TrainingStatus`] via its governing record.
//!
//! - **Summaries** (`summary.rs`): per-member and per-device
//!   [`TrainingSummary`] counts and practice-wide [`PracticeStatistics`].
//!
//! - **Filtering** (`filter.rs`): text + [`StatusFilter`] selection of
//!   members and devices for the list views.
//!
//! - **Matrix** (`matrix.rs`): the full member × device grid, each pair
//!   resolved once. Row, column, and total aggregates equal the free
//!   functions above.
//!
//! - **History & attention** (`history.rs`, `attention.rs`): per-pair
//!   record history, members still needing a briefing, and trainings about
//!   to lapse.
//!
//! - **Snapshot & cache** (`snapshot.rs`, `cache.rs`): the read-only input
//!   with its content digest, and a bounded matrix memo keyed by
//!   (digest, reference date). The cache is held by long-lived services
//!   that evaluate the same snapshot repeatedly; one-shot callers use
//!   [`Snapshot::evaluate`] instead.
//!
//! ## Time
//!
//! No function here reads the clock. Every computation takes an explicit
//! [`ReferenceDate`](praxis_core::ReferenceDate), so results for a given
//! snapshot and date are reproducible.
//!
//! ## Counting
//!
//! `trained` counts include expiring pairs; `expiring` is a flagged subset.
//! See [`summary`] for the exact rule.

pub mod attention;
pub mod cache;
pub mod filter;
pub mod history;
pub mod matrix;
pub mod membership;
pub mod model;
pub mod snapshot;
pub mod status;
pub mod summary;

pub use attention::{expiring_soon, members_requiring_training, ExpiringTraining};
pub use cache::{CacheKey, ComplianceCache};
pub use filter::{filter_devices, filter_members, StatusFilter};
pub use history::{pair_history, HistoryEntry};
pub use matrix::{MatrixEntry, StatusMatrix};
pub use membership::{AllMembersActive, DefaultMembershipPolicy, MembershipPolicy};
pub use model::{Device, TeamMember, TrainerRole, TrainingRecord, TrainingType};
pub use snapshot::Snapshot;
pub use status::{
    resolve_status, select_governing, PairStatus, RecordExpiry, TrainingStatus,
    EXPIRY_LOOKAHEAD_DAYS,
};
pub use summary::{
    compute_statistics, round_percent, summarize_device, summarize_member, PracticeStatistics,
    TrainingSummary,
};
