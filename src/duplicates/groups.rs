//! Identity grouping and canonical selection.
//!
//! # Overview
//!
//! Files are grouped by their content hash in an [`IdentityIndex`]. The
//! index remembers the order in which each identity was first seen, and
//! each [`IdentityGroup`] keeps its members in discovery order, so the
//! emitted [`DuplicatePair`]s never depend on hash-table iteration order.
//!
//! Within a group of two or more members exactly one is canonical, chosen
//! by a [`CanonicalPolicy`]. Every other member becomes the `duplicate`
//! half of a pair.
//!
//! # Example
//!
//! ```
//! use cleanset::duplicates::{CanonicalPolicy, IdentityIndex};
//! use cleanset::scanner::{hash_bytes, FileRecord};
//! use std::path::PathBuf;
//!
//! let mut index = IdentityIndex::new();
//! index.insert(hash_bytes(b"aa"), FileRecord::new(PathBuf::from("/a/f1"), 2, None));
//! index.insert(hash_bytes(b"bb"), FileRecord::new(PathBuf::from("/a/f2"), 2, None));
//! index.insert(hash_bytes(b"aa"), FileRecord::new(PathBuf::from("/b/f3"), 2, None));
//!
//! let pairs = index.duplicate_pairs(CanonicalPolicy::FirstDiscovered);
//! assert_eq!(pairs.len(), 1);
//! assert_eq!(pairs[0].duplicate.path, PathBuf::from("/b/f3"));
//! assert_eq!(pairs[0].canonical.path, PathBuf::from("/a/f1"));
//! ```

use std::cmp::Reverse;
use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::scanner::{hash_to_hex, FileRecord, Hash};

/// All records sharing one content identity.
///
/// Never empty; members are in discovery order.
#[derive(Debug, Clone)]
pub struct IdentityGroup {
    /// Shared BLAKE3 digest
    pub hash: Hash,
    /// Records with this content, in discovery order
    pub members: Vec<FileRecord>,
}

impl IdentityGroup {
    fn new(hash: Hash, first: FileRecord) -> Self {
        Self {
            hash,
            members: vec![first],
        }
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false for groups produced by the index.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the group holds at least one duplicate.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.members.len() > 1
    }

    /// Number of duplicate copies (members minus the canonical).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.members.len().saturating_sub(1)
    }

    /// Content size, taken from the first member.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.members.first().map_or(0, |m| m.size)
    }

    /// Bytes that removing all duplicates would free.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size() * self.duplicate_count() as u64
    }

    /// Hash as hexadecimal string.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash)
    }

    /// Paths of all members.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.members.iter().map(|m| m.path.clone()).collect()
    }

    /// The canonical member under `policy`.
    #[must_use]
    pub fn canonical(&self, policy: CanonicalPolicy) -> &FileRecord {
        &self.members[policy.select(&self.members)]
    }
}

/// Insertion-ordered map from content identity to its group.
#[derive(Debug, Clone, Default)]
pub struct IdentityIndex {
    groups: Vec<IdentityGroup>,
    positions: HashMap<Hash, usize>,
}

impl IdentityIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the group for `hash`, creating it if needed.
    pub fn insert(&mut self, hash: Hash, record: FileRecord) {
        match self.positions.get(&hash) {
            Some(&pos) => self.groups[pos].members.push(record),
            None => {
                self.positions.insert(hash, self.groups.len());
                self.groups.push(IdentityGroup::new(hash, record));
            }
        }
    }

    /// Look up the group for `hash`.
    #[must_use]
    pub fn get(&self, hash: &Hash) -> Option<&IdentityGroup> {
        self.positions.get(hash).map(|&pos| &self.groups[pos])
    }

    /// Whether any record with this identity has been inserted.
    #[must_use]
    pub fn contains(&self, hash: &Hash) -> bool {
        self.positions.contains_key(hash)
    }

    /// Groups in first-appearance order.
    #[must_use]
    pub fn groups(&self) -> &[IdentityGroup] {
        &self.groups
    }

    /// Groups that contain at least one duplicate.
    pub fn duplicate_groups(&self) -> impl Iterator<Item = &IdentityGroup> {
        self.groups.iter().filter(|g| g.has_duplicates())
    }

    /// Number of distinct identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of records across all groups.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(IdentityGroup::len).sum()
    }

    /// Emit a pair for every non-canonical member of every group.
    ///
    /// Pairs come in group first-appearance order, then member order.
    #[must_use]
    pub fn duplicate_pairs(&self, policy: CanonicalPolicy) -> Vec<DuplicatePair> {
        let mut pairs = Vec::new();
        for group in self.duplicate_groups() {
            let canonical_idx = policy.select(&group.members);
            let canonical = &group.members[canonical_idx];
            log::debug!(
                "Group {} ({} members): canonical {}",
                &group.hash_hex()[..16],
                group.len(),
                canonical.path.display()
            );
            for (i, member) in group.members.iter().enumerate() {
                if i == canonical_idx {
                    continue;
                }
                pairs.push(DuplicatePair {
                    duplicate: member.clone(),
                    canonical: canonical.clone(),
                    hash: group.hash,
                });
            }
        }
        pairs
    }

    /// Consume the index, returning its groups.
    #[must_use]
    pub fn into_groups(self) -> Vec<IdentityGroup> {
        self.groups
    }
}

/// A file whose content already exists elsewhere.
///
/// `duplicate.path != canonical.path` and both share `hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicatePair {
    /// The redundant copy
    pub duplicate: FileRecord,
    /// The copy that is kept
    pub canonical: FileRecord,
    /// Shared content identity
    pub hash: Hash,
}

impl DuplicatePair {
    /// Hash as hexadecimal string.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash)
    }

    /// Size of the duplicate in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.duplicate.size
    }
}

/// Rule for choosing the canonical member of a group.
///
/// Ties, and members without a modification time, fall back to discovery
/// order. Members with no known time rank after all members that have one.
/// Under every policy a symlinked member is chosen only when the group has
/// no regular file.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum CanonicalPolicy {
    /// First member in discovery order (the earliest folder wins)
    #[default]
    #[serde(rename = "first")]
    #[value(name = "first")]
    FirstDiscovered,
    /// Member with the oldest modification time
    #[serde(rename = "oldest")]
    #[value(name = "oldest")]
    OldestModified,
    /// Member with the newest modification time
    #[serde(rename = "newest")]
    #[value(name = "newest")]
    NewestModified,
}

impl CanonicalPolicy {
    /// Index of the canonical member within `members`.
    ///
    /// Returns 0 for an empty slice.
    #[must_use]
    pub fn select(self, members: &[FileRecord]) -> usize {
        let indexed = members.iter().enumerate();
        let chosen = match self {
            Self::FirstDiscovered => indexed.min_by_key(|(i, m)| (m.is_symlink, *i)),
            Self::OldestModified => indexed
                .min_by_key(|(i, m)| (m.is_symlink, m.modified.is_none(), m.modified, *i)),
            Self::NewestModified => indexed.min_by_key(|(i, m)| {
                (m.is_symlink, m.modified.is_none(), Reverse(m.modified), *i)
            }),
        };
        chosen.map_or(0, |(i, _)| i)
    }
}

/// Counters describing one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Entries listed across all scanned folders
    pub total_entries: usize,
    /// Regular files among them
    pub candidates: usize,
    /// Directories, dangling symlinks and special files
    pub skipped_entries: usize,
    /// Candidates hashed successfully
    pub hashed: usize,
    /// Candidates that could not be hashed
    pub failed: usize,
    /// Distinct content identities
    pub unique_identities: usize,
    /// Groups with two or more members
    pub duplicate_groups: usize,
    /// Files reported as duplicates
    pub duplicate_files: usize,
    /// Bytes held by duplicate files
    pub wasted_bytes: u64,
}

impl ScanSummary {
    /// Fill the group counters from a finished index.
    pub fn record_index(&mut self, index: &IdentityIndex) {
        self.unique_identities = index.len();
        self.duplicate_groups = index.duplicate_groups().count();
        self.duplicate_files = index.duplicate_groups().map(IdentityGroup::duplicate_count).sum();
        self.wasted_bytes = index.duplicate_groups().map(IdentityGroup::wasted_space).sum();
    }

    /// Add counters from another pass.
    pub fn absorb(&mut self, other: &ScanSummary) {
        self.total_entries += other.total_entries;
        self.candidates += other.candidates;
        self.skipped_entries += other.skipped_entries;
        self.hashed += other.hashed;
        self.failed += other.failed;
    }

    /// Whether any duplicates were found.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.duplicate_files > 0
    }
}
