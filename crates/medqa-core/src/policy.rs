//! Deduplication policies.
//!
//! Row filtering happens on raw candidate rows before resolution; column
//! shaping happens on the resolved records. Both are applied identically to
//! every split of a policy so the three files share one schema.
//!
//! "Keep first" always means first in the original input order. Every filter
//! here is a single forward scan that remembers the keys it has seen.
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use crate::types::{CandidateRow, ResolvedRecord, TrainRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    Raw,
    DedupNeg,
    DedupAll,
}

impl Policy {
    /// Run order of the driver.
    pub const ALL: [Policy; 3] = [Policy::Raw, Policy::DedupNeg, Policy::DedupAll];

    pub fn dir_name(self) -> &'static str {
        match self {
            Policy::Raw => "preprocessed",
            Policy::DedupNeg => "deduplicate_neg",
            Policy::DedupAll => "deduplicate_all",
        }
    }

    /// Filter one split's raw rows. The input is never modified.
    pub fn filter_rows(self, rows: &[CandidateRow]) -> Vec<CandidateRow> {
        match self {
            Policy::Raw => rows.to_vec(),
            Policy::DedupNeg => drop_negatives(rows),
            Policy::DedupAll => dedup_questions(drop_negatives(rows)),
        }
    }

    /// Shape resolved records into this policy's output columns.
    pub fn project(self, records: Vec<ResolvedRecord>) -> Vec<ResolvedRecord> {
        match self {
            Policy::Raw => records,
            Policy::DedupNeg | Policy::DedupAll => records.into_iter().map(ResolvedRecord::into_pair).collect(),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Policy::Raw => "raw",
            Policy::DedupNeg => "dedup_neg",
            Policy::DedupAll => "dedup_all",
        };
        f.write_str(name)
    }
}

/// Stable "keep first" deduplication by `key`.
pub fn dedup_stable<T, K, F>(rows: impl IntoIterator<Item = T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    rows.into_iter().filter(|row| seen.insert(key(row))).collect()
}

/// Train rows lose `neg_ans_id` and collapse on `(question_id, pos_ans_id)`;
/// eval rows keep only `label == 1`.
pub fn drop_negatives(rows: &[CandidateRow]) -> Vec<CandidateRow> {
    let mut seen_pairs = HashSet::new();
    rows.iter()
        .filter_map(|row| match row {
            CandidateRow::Train(train) => seen_pairs
                .insert((train.question_id.as_str(), train.pos_ans_id.as_str()))
                .then(|| {
                    CandidateRow::Train(TrainRow {
                        question_id: train.question_id.clone(),
                        pos_ans_id: train.pos_ans_id.clone(),
                        neg_ans_id: None,
                    })
                }),
            CandidateRow::Eval(eval) => (eval.label == 1).then(|| row.clone()),
        })
        .collect()
}

/// At most one row per `question_id`.
pub fn dedup_questions(rows: Vec<CandidateRow>) -> Vec<CandidateRow> {
    dedup_stable(rows, |row| row.question_id().to_string())
}
