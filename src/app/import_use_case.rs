use metrics::{counter, histogram};
use serde::Serialize;
use std::time::Instant;
use tracing::{error, info, instrument, warn};

use crate::app::ports::InvestigationSinkPort;
use crate::config::ImportConfig;
use crate::domain::{Investigation, RawSighting};
use crate::error::Result;
use crate::pipeline::processing::transform_record;
use crate::pipeline::{load_sightings, select, EffectCounts};

/// Use case for importing selected sightings as investigations
pub struct ImportUseCase {
    config: ImportConfig,
    sink: Box<dyn InvestigationSinkPort>,
}

/// Counters for a complete import run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    pub loaded: usize,
    pub tier_one: usize,
    pub high_signal: usize,
    pub selected: usize,
    pub batches: usize,
    pub imported: usize,
    pub failed: usize,
    pub failures: Vec<BatchFailure>,
    pub effects: EffectCounts,
}

/// A batch the sink rejected; every row in it counts as failed
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    /// 1-based batch number
    pub batch: usize,
    pub size: usize,
    pub error: String,
}

impl ImportUseCase {
    pub fn new(config: ImportConfig, sink: Box<dyn InvestigationSinkPort>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, sink })
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Loads the configured input file, then runs the import.
    pub async fn run_from_file(&self) -> Result<ImportSummary> {
        println!("Loading data from {}...", self.config.input_file.display());
        let records = load_sightings(&self.config.input_file)?;
        println!("Loaded {} total records", records.len());
        Ok(self.run(records).await)
    }

    /// Select, transform and insert. Batch failures are recorded in the
    /// summary rather than returned.
    #[instrument(skip(self, records), fields(table = %self.config.table))]
    pub async fn run(&self, records: Vec<RawSighting>) -> ImportSummary {
        let selection = select(records, self.config.max_records);
        println!("Tier 1 (coords + LST): {}", selection.tier_one);
        println!("High signal: {}", selection.high_signal);
        println!("Selected top {} records", selection.selected.len());

        let investigations: Vec<Investigation> = selection
            .selected
            .iter()
            .map(|r| transform_record(r, self.config.user_id))
            .collect();

        let mut summary = ImportSummary {
            loaded: selection.loaded,
            tier_one: selection.tier_one,
            high_signal: selection.high_signal,
            selected: selection.selected.len(),
            effects: EffectCounts::tally(&selection.selected),
            ..ImportSummary::default()
        };

        self.insert_batches(&investigations, &mut summary).await;
        summary
    }

    /// Inserts `investigations` in `batch_size` chunks, one awaited call at a
    /// time. A failed batch is counted in full and the loop moves on.
    async fn insert_batches(&self, investigations: &[Investigation], summary: &mut ImportSummary) {
        let total_batches = batch_count(investigations.len(), self.config.batch_size);
        summary.batches = total_batches;

        for (i, batch) in investigations.chunks(self.config.batch_size).enumerate() {
            let batch_num = i + 1;
            let started = Instant::now();
            let result = self.sink.insert(&self.config.table, batch).await;
            histogram!("ufo_import_batch_duration_seconds").record(started.elapsed().as_secs_f64());

            match result {
                Ok(()) => {
                    summary.imported += batch.len();
                    counter!("ufo_import_batches_total", "outcome" => "imported").increment(1);
                    counter!("ufo_import_records_imported_total").increment(batch.len() as u64);
                    info!(batch = batch_num, size = batch.len(), "Batch imported");
                    println!(
                        "Batch {}/{}: Imported {} records (total: {})",
                        batch_num,
                        total_batches,
                        batch.len(),
                        summary.imported
                    );
                }
                Err(e) => {
                    summary.failed += batch.len();
                    counter!("ufo_import_batches_total", "outcome" => "failed").increment(1);
                    counter!("ufo_import_records_failed_total").increment(batch.len() as u64);
                    error!(batch = batch_num, size = batch.len(), "Batch insert failed: {}", e);
                    println!("Batch {}/{}: FAILED - {}", batch_num, total_batches, e);
                    summary.failures.push(BatchFailure {
                        batch: batch_num,
                        size: batch.len(),
                        error: e.to_string(),
                    });
                }
            }
        }

        if summary.failed > 0 {
            warn!("{} of {} records failed to import", summary.failed, investigations.len());
        }
    }
}

/// Number of batches needed for `records` rows, i.e. `ceil(records / batch_size)`.
pub fn batch_count(records: usize, batch_size: usize) -> usize {
    if batch_size == 0 {
        return 0;
    }
    records.div_ceil(batch_size)
}

impl ImportSummary {
    pub fn print_report(&self) {
        println!("\n=== Import Complete ===");
        println!("Imported: {}", self.imported);
        println!("Failed: {}", self.failed);

        println!("\n=== Data Quality ===");
        println!("With physiological_effects: {}", self.effects.physiological_effects);
        println!("With em_interference: {}", self.effects.em_interference);
        println!("With earthquake_nearby: {}", self.effects.earthquake_nearby);
        println!("With witness_count > 1: {}", self.effects.multiple_witnesses);
        println!("With geomagnetic_storm: {}", self.effects.geomagnetic_storm);
    }
}
