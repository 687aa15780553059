//! Parallel id → text resolution.
//!
//! Each `resolve` call builds its own fixed-size rayon pool, maps rows in
//! parallel and tears the pool down when it returns. Output order always
//! matches input order: rayon's indexed `collect` places every result at its
//! source index regardless of which worker finished first.
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::sync::Arc;
use tracing::debug;

use crate::error::{Error, IdKind, Result};
use crate::lookup::Lookups;
use crate::types::{CandidateRow, ResolvedRecord};

/// Resolve one row. Pure: the result depends only on the row and the lookups.
pub fn resolve_row(lookups: &Lookups, row: &CandidateRow, row_index: usize) -> Result<ResolvedRecord> {
    let question = lookups.require(IdKind::Question, row.question_id(), row_index)?;
    let answer = lookups.require(IdKind::Answer, row.answer_id(), row_index)?;
    Ok(match row {
        CandidateRow::Train(_) => ResolvedRecord::Train { question, pos_ans: answer },
        CandidateRow::Eval(eval) => ResolvedRecord::Eval { question, ans: answer, cnt: eval.cnt, label: eval.label },
    })
}

pub struct RowResolver {
    lookups: Arc<Lookups>,
    workers: usize,
    show_progress: bool,
}

impl RowResolver {
    pub fn new(lookups: Arc<Lookups>, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::InvalidConfig("workers must be at least 1".to_string()));
        }
        Ok(Self { lookups, workers, show_progress: false })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Resolve every row, returning records in input order.
    ///
    /// Any unresolved id fails the whole call. When several rows fail, the
    /// error reported is the one with the lowest row index.
    pub fn resolve(&self, label: &str, rows: &[CandidateRow]) -> Result<Vec<ResolvedRecord>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("medqa-resolve-{}", i))
            .build()?;
        debug!(label, workers = self.workers, rows = rows.len(), "Created resolver pool");

        let pb = self.progress_bar(label, rows.len());
        let lookups = Arc::clone(&self.lookups);
        let results: Vec<Result<ResolvedRecord>> = pool.install(|| {
            rows.par_iter()
                .enumerate()
                .map(|(i, row)| {
                    let resolved = resolve_row(&lookups, row, i);
                    pb.inc(1);
                    resolved
                })
                .collect()
        });
        pb.finish_and_clear();

        results.into_iter().collect()
    }

    fn progress_bar(&self, label: &str, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len as u64);
        let style = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows ({percent}%) {msg}")
            .map(|s| s.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb.set_message(label.to_string());
        pb
    }
}
