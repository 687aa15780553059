#![allow(dead_code)]

use std::fs;
use std::path::Path;

use medqa_core::config::PipelineConfig;

/// Write a complete cMedQA2-style dataset under `dir`.
pub fn write_dataset(dir: &Path, questions: &str, answers: &str, train: &str, dev: &str, test: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("question.csv"), questions).unwrap();
    fs::write(dir.join("answer.csv"), answers).unwrap();
    fs::write(dir.join("train_candidates.txt"), train).unwrap();
    fs::write(dir.join("dev_candidates.txt"), dev).unwrap();
    fs::write(dir.join("test_candidates.txt"), test).unwrap();
}

/// A small dataset with duplicates, negatives and non-ASCII content.
pub fn write_sample_dataset(dir: &Path) {
    write_dataset(
        dir,
        "question_id,content\n1,头痛怎么办\n2,\"fever, what now\"\n3,Q3\n",
        "ans_id,content\n10,多喝水\n11,A11\n12,A12\n13,A13\n",
        "question_id,pos_ans_id,neg_ans_id\n1,10,11\n1,10,12\n1,13,11\n2,11,10\n3,12,13\n",
        "question_id,ans_id,cnt,label\n1,10,2,1\n1,11,1,0\n1,13,1,1\n2,12,3,0\n2,11,1,1\n",
        "question_id,ans_id,cnt,label\n3,12,1,1\n3,13,4,0\n2,11,2,1\n",
    );
}

pub fn config_for(data_dir: &Path, output_dir: &Path, workers: usize) -> PipelineConfig {
    PipelineConfig {
        data_dir: data_dir.to_string_lossy().to_string(),
        output_dir: output_dir.to_string_lossy().to_string(),
        workers,
        progress: false,
        ..PipelineConfig::default()
    }
}

pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
