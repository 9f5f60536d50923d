#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Catalog index infrastructure.
//!
//! # Purpose
//!
//! The `index` subsystem owns the two-phase lifecycle of catalog state: a
//! build phase that ingests static descriptors, and a serving phase that
//! publishes immutable snapshots to concurrent readers.
//!
//! # Mental Model
//!
//! 1. **Build Phase:** [`CatalogBuilder`] ingests static descriptors, fixes the
//!    ingest order, rejects range conflicts, and produces a [`Snapshot`].
//! 2. **Publication:** The [`Snapshot`] is wrapped in a [`ShadowCatalog`],
//!    which manages an atomic pointer to the current state.
//! 3. **Pinning:** Each run loads an `Arc<Snapshot>` when it begins and
//!    resolves against that for its whole duration.
//! 4. **Extension:** [`ShadowCatalog::register`] builds an extended snapshot and
//!    swaps it in. Per-run overrides use [`Snapshot::with_overrides`] on a
//!    private copy and are never published.
//!
//! # Precedence Contract
//!
//! 1. **Tier:** Per-run overrides outrank every catalog entry.
//! 2. **Specificity:** The narrower version range wins.
//! 3. **Deterministic Tie-breaker:** Higher (later) ingest ordinal wins.
//!
//! - Enforced in: [`crate::index::precedence::cmp_candidates`]
//! - Tested by: [`crate::index::invariants::test_override_outranks_narrower_range`]
//! - Failure symptom: A test-local override is ignored, or the wrong
//!   version-specific shadow is picked.
//!
//! # Invariants
//!
//! - Must reject overlapping non-default ranges for the same exact type at registration.
//!   - Enforced in: [`crate::index::precedence::check_conflict`].
//!   - Tested by: [`crate::index::invariants::test_conflict_detected_at_registration`]
//!   - Failure symptom: Resolution silently picks one of two ambiguous shadows.
//!
//! - Must keep pinned snapshots unchanged across registrations.
//!   - Enforced in: [`crate::index::runtime::ShadowCatalog::register`] (copy-on-write).
//!   - Tested by: [`crate::index::invariants::test_pinned_snapshot_isolated_from_register`]
//!   - Failure symptom: A running test sees shadows registered by another test.
//!
//! - Must provide linearizable writes without lost updates.
//!   - Enforced in: [`crate::index::runtime::ShadowCatalog::register`] (CAS loop).
//!   - Tested by: [`crate::index::invariants::test_no_lost_updates`]
//!   - Failure symptom: Concurrent registrations silently dropped.

mod build;
pub(crate) mod precedence;
pub(crate) mod runtime;
pub(crate) mod snapshot;

pub use build::CatalogBuilder;
pub use runtime::{ShadowCatalog, global};
pub use snapshot::{Candidate, Snapshot};

#[cfg(any(test, doc))]
pub(crate) mod invariants;
