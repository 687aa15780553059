//! Domain types shared by the loader, resolver, policies and writer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier as it appears in the source tables.
pub type RowId = String;

/// A training candidate: a question with one positive and one negative answer.
///
/// `neg_ans_id` is `None` once a policy has dropped the negative column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainRow {
    pub question_id: RowId,
    pub pos_ans_id: RowId,
    pub neg_ans_id: Option<RowId>,
}

/// A validation/test candidate with its occurrence count and relevance label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalRow {
    pub question_id: RowId,
    pub ans_id: RowId,
    pub cnt: i64,
    pub label: i64,
}

/// One raw candidate row, tagged by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateRow {
    Train(TrainRow),
    Eval(EvalRow),
}

impl CandidateRow {
    pub fn question_id(&self) -> &str {
        match self {
            CandidateRow::Train(row) => &row.question_id,
            CandidateRow::Eval(row) => &row.question_id,
        }
    }

    /// The answer that gets resolved: the positive answer for train rows.
    pub fn answer_id(&self) -> &str {
        match self {
            CandidateRow::Train(row) => &row.pos_ans_id,
            CandidateRow::Eval(row) => &row.ans_id,
        }
    }
}

/// Output unit written to a split file.
///
/// Serialized untagged, so each variant's field names become the JSON keys:
/// `{question, pos_ans}`, `{question, ans, cnt, label}` or `{question, answer}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResolvedRecord {
    Eval { question: String, ans: String, cnt: i64, label: i64 },
    Train { question: String, pos_ans: String },
    Pair { question: String, answer: String },
}

impl ResolvedRecord {
    pub fn question(&self) -> &str {
        match self {
            ResolvedRecord::Train { question, .. }
            | ResolvedRecord::Eval { question, .. }
            | ResolvedRecord::Pair { question, .. } => question,
        }
    }

    pub fn answer(&self) -> &str {
        match self {
            ResolvedRecord::Train { pos_ans, .. } => pos_ans,
            ResolvedRecord::Eval { ans, .. } => ans,
            ResolvedRecord::Pair { answer, .. } => answer,
        }
    }

    /// Collapse to the uniform `{question, answer}` shape, dropping `cnt`/`label`.
    pub fn into_pair(self) -> Self {
        match self {
            ResolvedRecord::Train { question, pos_ans } => ResolvedRecord::Pair { question, answer: pos_ans },
            ResolvedRecord::Eval { question, ans, .. } => ResolvedRecord::Pair { question, answer: ans },
            pair @ ResolvedRecord::Pair { .. } => pair,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Split {
    Train,
    Validation,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Validation, Split::Test];

    pub fn name(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Validation => "validation",
            Split::Test => "test",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.json", self.name())
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
