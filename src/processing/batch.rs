//! Parallel processing of readings for many datapoints
//!
//! Datapoints are independent, so each one becomes a job on the rayon pool.
//! Within a job the readings are processed in the order given, which keeps
//! the output chronological if the input was.

use rayon::prelude::*;

use crate::datapoint::{
    DatapointDescriptor, DatapointId, ProcessedReading, RawReading, ReadingError,
};
use crate::processing::ExpressionEvaluator;

pub struct ReadingJob<'a> {
    pub datapoint: &'a DatapointDescriptor,
    pub readings: Vec<RawReading>,
}

#[derive(Debug)]
pub struct JobOutcome {
    pub datapoint: DatapointId,
    /// One entry per input reading, in input order; `Ok(None)` means filtered
    pub results: Vec<Result<Option<ProcessedReading>, ReadingError>>,
}

impl JobOutcome {
    pub fn published(&self) -> impl Iterator<Item = &ProcessedReading> {
        self.results
            .iter()
            .filter_map(|r| r.as_ref().ok().and_then(Option::as_ref))
    }
}

pub fn process_batch<E>(jobs: &[ReadingJob<'_>], evaluator: &E) -> Vec<JobOutcome>
where
    E: ExpressionEvaluator + Sync + ?Sized,
{
    log::debug!("Processing readings for {} datapoint(s)", jobs.len());

    jobs.par_iter()
        .map(|job| {
            let results = job
                .readings
                .iter()
                .map(|reading| job.datapoint.process(reading, evaluator))
                .collect::<Vec<_>>();

            let failures = results.iter().filter(|r| r.is_err()).count();
            if failures > 0 {
                log::warn!(
                    "{} of {} reading(s) for {} could not be processed",
                    failures,
                    results.len(),
                    job.datapoint.id()
                );
            }

            JobOutcome {
                datapoint: job.datapoint.id().clone(),
                results,
            }
        })
        .collect()
}
