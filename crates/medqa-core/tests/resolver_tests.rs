use std::sync::Arc;

use medqa_core::error::{Error, IdKind};
use medqa_core::lookup::Lookups;
use medqa_core::resolver::{resolve_row, RowResolver};
use medqa_core::types::{CandidateRow, EvalRow, ResolvedRecord, TrainRow};

fn lookups(n: usize) -> Arc<Lookups> {
    let questions = (0..n).map(|i| (format!("q{i}"), format!("question {i}")));
    let answers = (0..n).map(|i| (format!("a{i}"), format!("answer {i}")));
    Arc::new(Lookups::from_pairs(questions, answers))
}

/// `n` train rows over `ids` known ids, scrambled so output order is not id order.
fn train_rows(n: usize, ids: usize) -> Vec<CandidateRow> {
    (0..n)
        .map(|i| {
            let q = (i * 7919) % ids;
            let a = (i * 104_729 + 13) % ids;
            CandidateRow::Train(TrainRow {
                question_id: format!("q{q}"),
                pos_ans_id: format!("a{a}"),
                neg_ans_id: Some(format!("a{}", (a + 1) % ids)),
            })
        })
        .collect()
}

fn eval_row(question_id: &str, ans_id: &str) -> CandidateRow {
    CandidateRow::Eval(EvalRow { question_id: question_id.to_string(), ans_id: ans_id.to_string(), cnt: 1, label: 1 })
}

#[test]
fn output_order_matches_input_for_any_worker_count() {
    let lookups = lookups(997);
    let rows = train_rows(5_000, 997);

    let mut outputs = Vec::new();
    for workers in [1, 2, 8] {
        let resolver = RowResolver::new(Arc::clone(&lookups), workers).unwrap();
        let out = resolver.resolve("train", &rows).expect("resolve");
        assert_eq!(out.len(), rows.len());
        outputs.push(out);
    }
    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[0], outputs[2]);

    for (row, record) in rows.iter().zip(&outputs[2]) {
        assert_eq!(Some(record.question()), lookups.question(row.question_id()));
        assert_eq!(Some(record.answer()), lookups.answer(row.answer_id()));
    }
}

#[test]
fn eval_rows_carry_count_and_label() {
    let lookups = lookups(3);
    let row = CandidateRow::Eval(EvalRow { question_id: "q1".to_string(), ans_id: "a2".to_string(), cnt: 5, label: 0 });
    let record = resolve_row(&lookups, &row, 0).unwrap();
    assert_eq!(
        record,
        ResolvedRecord::Eval { question: "question 1".to_string(), ans: "answer 2".to_string(), cnt: 5, label: 0 }
    );
}

#[test]
fn missing_answer_id_fails_with_row_index() {
    let lookups = lookups(10);
    let mut rows = train_rows(10, 10);
    rows.push(CandidateRow::Train(TrainRow {
        question_id: "q1".to_string(),
        pos_ans_id: "a404".to_string(),
        neg_ans_id: None,
    }));

    let resolver = RowResolver::new(lookups, 4).unwrap();
    match resolver.resolve("train", &rows).unwrap_err() {
        Error::UnresolvedId { kind, id, row_index } => {
            assert_eq!(kind, IdKind::Answer);
            assert_eq!(id, "a404");
            assert_eq!(row_index, 10);
        }
        other => panic!("expected unresolved id, got {other:?}"),
    }
}

#[test]
fn lowest_failing_row_is_reported() {
    let lookups = lookups(4);
    let mut rows: Vec<CandidateRow> = (0..200).map(|i| eval_row(&format!("q{}", i % 4), "a1")).collect();
    for i in [150, 37, 90] {
        rows[i] = eval_row(&format!("missing{i}"), "a0");
    }

    let resolver = RowResolver::new(lookups, 8).unwrap();
    match resolver.resolve("validation", &rows).unwrap_err() {
        Error::UnresolvedId { kind, row_index, .. } => {
            assert_eq!(kind, IdKind::Question);
            assert_eq!(row_index, 37);
        }
        other => panic!("expected unresolved id, got {other:?}"),
    }
}

#[test]
fn empty_input_resolves_to_empty_output() {
    let resolver = RowResolver::new(lookups(1), 2).unwrap();
    assert!(resolver.resolve("test", &[]).unwrap().is_empty());
}

#[test]
fn zero_workers_is_rejected() {
    assert!(matches!(RowResolver::new(lookups(1), 0), Err(Error::InvalidConfig(_))));
}
