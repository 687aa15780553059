//! Id → text lookup mappings for questions and answers.
//!
//! Built once per run and then shared read-only (behind an `Arc`) with every
//! resolver worker.
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::config::DatasetPaths;
use crate::error::{Error, IdKind, Result};
use crate::tables::{normalize_id, read_columns, ANSWER_COLUMNS, QUESTION_COLUMNS};
use crate::types::RowId;

#[derive(Debug, Clone, Default)]
pub struct Lookups {
    questions: HashMap<RowId, String>,
    answers: HashMap<RowId, String>,
}

impl Lookups {
    /// Build both mappings from `(id, content)` pairs. A repeated id keeps its
    /// last content.
    pub fn from_pairs<Q, A>(questions: Q, answers: A) -> Self
    where
        Q: IntoIterator<Item = (RowId, String)>,
        A: IntoIterator<Item = (RowId, String)>,
    {
        Self {
            questions: build_map(IdKind::Question, questions),
            answers: build_map(IdKind::Answer, answers),
        }
    }

    pub fn load(paths: &DatasetPaths, delimiter: u8) -> Result<Self> {
        let questions = read_pairs(&paths.questions, delimiter, QUESTION_COLUMNS)?;
        let answers = read_pairs(&paths.answers, delimiter, ANSWER_COLUMNS)?;
        let lookups = Self::from_pairs(questions, answers);
        info!(questions = lookups.questions.len(), answers = lookups.answers.len(), "Built lookup tables");
        Ok(lookups)
    }

    pub fn question(&self, id: &str) -> Option<&str> {
        self.questions.get(id).map(String::as_str)
    }

    pub fn answer(&self, id: &str) -> Option<&str> {
        self.answers.get(id).map(String::as_str)
    }

    /// Like [`Lookups::question`]/[`Lookups::answer`], but a miss is an
    /// `UnresolvedId` error tagged with the row it came from.
    pub fn require(&self, kind: IdKind, id: &str, row_index: usize) -> Result<String> {
        let found = match kind {
            IdKind::Question => self.question(id),
            IdKind::Answer => self.answer(id),
        };
        found
            .map(str::to_string)
            .ok_or_else(|| Error::UnresolvedId { kind, id: id.to_string(), row_index })
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }
}

fn read_pairs(path: &Path, delimiter: u8, columns: [&str; 2]) -> Result<Vec<(RowId, String)>> {
    Ok(read_columns(path, delimiter, columns)?
        .into_iter()
        .map(|[id, content]| (normalize_id(id), content))
        .collect())
}

fn build_map<I>(kind: IdKind, pairs: I) -> HashMap<RowId, String>
where
    I: IntoIterator<Item = (RowId, String)>,
{
    let mut map = HashMap::new();
    let mut repeated = 0usize;
    for (id, content) in pairs {
        if map.insert(id, content).is_some() {
            repeated += 1;
        }
    }
    if repeated > 0 {
        warn!(%kind, repeated, "Lookup table repeats ids; keeping the last content for each");
    }
    map
}
