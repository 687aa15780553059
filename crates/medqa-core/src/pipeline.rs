//! End-to-end driver: lookups → per-policy filter → resolve → project → write.
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::lookup::Lookups;
use crate::policy::Policy;
use crate::resolver::RowResolver;
use crate::tables::CandidateTables;
use crate::types::{ResolvedRecord, Split};
use crate::writer::write_split;

/// Outcome of one (policy, split) output file.
#[derive(Debug, Clone)]
pub struct SplitReport {
    pub policy: Policy,
    pub split: Split,
    pub input_rows: usize,
    pub output_rows: usize,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub splits: Vec<SplitReport>,
}

impl RunReport {
    pub fn get(&self, policy: Policy, split: Split) -> Option<&SplitReport> {
        self.splits.iter().find(|s| s.policy == policy && s.split == split)
    }
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Load every input table, then produce all policies' split files.
    ///
    /// Schema problems in any table surface before resolution starts.
    pub fn run(&self) -> Result<RunReport> {
        let paths = self.config.dataset_paths();
        let delimiter = self.config.delimiter_byte()?;
        let lookups = Arc::new(Lookups::load(&paths, delimiter)?);
        let tables = CandidateTables::load(&paths, delimiter)?;
        let resolver = RowResolver::new(lookups, self.config.workers)?.with_progress(self.config.progress);
        run_policies(&resolver, &tables, &self.config.output_root())
    }
}

/// Run the three policies in order against already-loaded tables.
pub fn run_policies(resolver: &RowResolver, tables: &CandidateTables, output_root: &Path) -> Result<RunReport> {
    let mut report = RunReport::default();
    for policy in Policy::ALL {
        info!(%policy, "Processing policy");
        let policy_dir = output_root.join(policy.dir_name());

        // Resolve all splits before writing any, so a failure leaves no partial policy output.
        let mut resolved: Vec<(Split, usize, Vec<ResolvedRecord>)> = Vec::with_capacity(Split::ALL.len());
        for split in Split::ALL {
            let raw = tables.split(split);
            let filtered = policy.filter_rows(raw);
            info!(%policy, %split, input = raw.len(), kept = filtered.len(), "Filtered candidates");
            let records = resolver.resolve(&format!("{}/{}", policy, split), &filtered)?;
            resolved.push((split, raw.len(), policy.project(records)));
        }

        for (split, input_rows, records) in resolved {
            let path = write_split(&policy_dir, split, &records)?;
            report.splits.push(SplitReport { policy, split, input_rows, output_rows: records.len(), path });
        }
    }
    info!(files = report.splits.len(), "Data processing complete");
    Ok(report)
}
