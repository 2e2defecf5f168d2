//! Concurrent identifier checks
//!
//! Every identifier is checked by its own task. Tasks share nothing but the
//! result map, and [`Processor::execute`] only returns once all of them have
//! finished. A task that fails leaves no entry behind; it is logged and the
//! rest of the batch carries on.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use indexmap::{IndexMap, IndexSet};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::check::result::{ResolutionReport, ResolutionResult};
use crate::config::DEFAULT_MAX_CONCURRENT_FETCHES;
use crate::gav::Gav;
use crate::version::error::RegistryError;
use crate::version::matcher::best_match;
use crate::version::registry::Registry;
use crate::version::types::VersionIndex;

type SharedResults = Arc<Mutex<HashMap<Gav, ResolutionResult>>>;

pub struct Processor {
    registry: Arc<dyn Registry>,
    /// Zero means unbounded
    max_concurrent: usize,
}

impl Processor {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self {
            registry,
            max_concurrent: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }

    /// Limit the number of metadata fetches in flight; zero removes the limit
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    /// Check every identifier and wait for all checks to finish
    ///
    /// The report lists identifiers in input order; duplicates are checked once.
    pub async fn execute(&self, gavs: &[Gav]) -> ResolutionReport {
        let gavs: IndexSet<Gav> = gavs.iter().cloned().collect();
        let results: SharedResults = Arc::default();
        let permits = (self.max_concurrent > 0).then(|| Arc::new(Semaphore::new(self.max_concurrent)));

        let mut join_set = JoinSet::new();
        for gav in gavs.iter().cloned() {
            let registry = self.registry.clone();
            let results = results.clone();
            let permits = permits.clone();

            join_set.spawn(async move {
                let _permit = match permits {
                    Some(permits) => permits.acquire_owned().await.ok(),
                    None => None,
                };

                match check(registry.as_ref(), &gav).await {
                    Ok(result) => {
                        results
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .insert(gav, result);
                    }
                    Err(e) => error!("Failed to check {}: {}", gav, e),
                }
            });
        }

        while let Some(joined) = join_set.join_next().await {
            if let Err(e) = joined {
                error!("Check task did not complete: {}", e);
            }
        }

        let mut collected = std::mem::take(&mut *results.lock().unwrap_or_else(PoisonError::into_inner));
        let ordered: IndexMap<Gav, ResolutionResult> = gavs
            .into_iter()
            .filter_map(|gav| collected.remove(&gav).map(|result| (gav, result)))
            .collect();

        let report = ResolutionReport::new(self.registry.root(), ordered);
        info!(
            "Checked {} dependencies in {}, {} unavailable",
            report.len(),
            report.repo_root,
            report.failure_count()
        );
        report
    }
}

/// Fetch the index for one identifier and evaluate it
async fn check(registry: &dyn Registry, gav: &Gav) -> Result<ResolutionResult, RegistryError> {
    let root = registry.root();
    match &gav.version {
        Some(version) => debug!(
            "Searching {} for version {} of {} from {}",
            root,
            version,
            gav.artifact,
            gav.group
        ),
        None => debug!(
            "Searching {} for available versions of {} from {}",
            root,
            gav.artifact,
            gav.group
        ),
    }

    let index = registry.fetch_version_index(&gav.group, &gav.artifact).await?;
    Ok(evaluate(gav, index))
}

/// Decide the outcome for `gav` given the published index
///
/// - Exact request, found: narrowed to the matched version
/// - Exact request, not found: the full index, for listing alternatives
/// - Listing request: the full index, available when it is non-empty
pub fn evaluate(gav: &Gav, index: VersionIndex) -> ResolutionResult {
    match &gav.version {
        Some(requested) => match best_match(requested, &index.versions) {
            Some(matched) => ResolutionResult {
                exact_match: true,
                available: true,
                version_index: VersionIndex::single(matched),
            },
            None => ResolutionResult {
                exact_match: true,
                available: false,
                version_index: index,
            },
        },
        None => ResolutionResult {
            exact_match: false,
            available: !index.is_empty(),
            version_index: index,
        },
    }
}
