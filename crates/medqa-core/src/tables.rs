//! Delimited-table loading.
//!
//! Columns are located by header name, so extra columns and column order in the
//! source files do not matter. A missing required column is a schema error and
//! is reported before any row is read.
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;
use tracing::info;

use crate::config::DatasetPaths;
use crate::error::{Error, Result};
use crate::types::{CandidateRow, EvalRow, Split, TrainRow};

pub const QUESTION_COLUMNS: [&str; 2] = ["question_id", "content"];
pub const ANSWER_COLUMNS: [&str; 2] = ["ans_id", "content"];
pub const TRAIN_COLUMNS: [&str; 3] = ["question_id", "pos_ans_id", "neg_ans_id"];
pub const EVAL_COLUMNS: [&str; 4] = ["question_id", "ans_id", "cnt", "label"];

/// Read the named columns of every data row, in file order.
pub fn read_columns<const N: usize>(path: &Path, delimiter: u8, columns: [&str; N]) -> Result<Vec<[String; N]>> {
    let csv_err = |source: csv::Error| Error::Csv { path: path.to_path_buf(), source };
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(Trim::Headers)
        .from_path(path)
        .map_err(csv_err)?;

    let headers = reader.headers().map_err(csv_err)?.clone();
    let positions = column_positions(path, &headers, &columns)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        rows.push(std::array::from_fn(|i| record.get(positions[i]).unwrap_or_default().to_string()));
    }
    Ok(rows)
}

fn column_positions<const N: usize>(path: &Path, headers: &StringRecord, columns: &[&str; N]) -> Result<[usize; N]> {
    let mut positions = [0usize; N];
    for (slot, column) in positions.iter_mut().zip(columns.iter()) {
        *slot = headers.iter().position(|h| h == *column).ok_or_else(|| Error::Schema {
            table: path.display().to_string(),
            column: (*column).to_string(),
        })?;
    }
    Ok(positions)
}

/// Ids are opaque but never carry surrounding whitespace; `content` is kept as written.
pub fn normalize_id(id: String) -> String {
    let trimmed = id.trim();
    if trimmed.len() == id.len() { id } else { trimmed.to_string() }
}

fn parse_int(path: &Path, column: &str, row_index: usize, value: &str) -> Result<i64> {
    value.trim().parse::<i64>().map_err(|_| Error::InvalidValue {
        table: path.display().to_string(),
        column: column.to_string(),
        row_index,
        value: value.to_string(),
    })
}

pub fn load_train_candidates(path: &Path, delimiter: u8) -> Result<Vec<CandidateRow>> {
    let rows = read_columns(path, delimiter, TRAIN_COLUMNS)?;
    Ok(rows
        .into_iter()
        .map(|[question_id, pos_ans_id, neg_ans_id]| {
            CandidateRow::Train(TrainRow {
                question_id: normalize_id(question_id),
                pos_ans_id: normalize_id(pos_ans_id),
                neg_ans_id: Some(normalize_id(neg_ans_id)),
            })
        })
        .collect())
}

pub fn load_eval_candidates(path: &Path, delimiter: u8) -> Result<Vec<CandidateRow>> {
    let rows = read_columns(path, delimiter, EVAL_COLUMNS)?;
    rows.into_iter()
        .enumerate()
        .map(|(i, [question_id, ans_id, cnt, label])| {
            Ok(CandidateRow::Eval(EvalRow {
                cnt: parse_int(path, "cnt", i, &cnt)?,
                label: parse_int(path, "label", i, &label)?,
                question_id: normalize_id(question_id),
                ans_id: normalize_id(ans_id),
            }))
        })
        .collect()
}

/// The three raw candidate tables of a run.
#[derive(Debug, Clone)]
pub struct CandidateTables {
    pub train: Vec<CandidateRow>,
    pub validation: Vec<CandidateRow>,
    pub test: Vec<CandidateRow>,
}

impl CandidateTables {
    pub fn load(paths: &DatasetPaths, delimiter: u8) -> Result<Self> {
        let train = load_train_candidates(&paths.train, delimiter)?;
        let validation = load_eval_candidates(&paths.validation, delimiter)?;
        let test = load_eval_candidates(&paths.test, delimiter)?;
        info!(train = train.len(), validation = validation.len(), test = test.len(), "Loaded candidate tables");
        Ok(Self { train, validation, test })
    }

    pub fn split(&self, split: Split) -> &[CandidateRow] {
        match split {
            Split::Train => &self.train,
            Split::Validation => &self.validation,
            Split::Test => &self.test,
        }
    }
}
