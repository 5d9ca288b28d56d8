// src/core/scanner/orchestrator.rs

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info};

use super::classifier::DomainClassifier;
use super::prober::Prober;
use super::resolver::Resolver;
use crate::core::models::{DomainResult, ScanBatch};

/// Receiving end of a running scan.
///
/// Results arrive in completion order. The channel closes once every domain
/// has been classified, so draining it to `None` means the scan is done.
pub struct ScanHandle {
    total: usize,
    results: mpsc::Receiver<DomainResult>,
}

impl ScanHandle {
    /// Number of distinct domains submitted.
    pub fn total(&self) -> usize {
        self.total
    }

    pub async fn recv(&mut self) -> Option<DomainResult> {
        self.results.recv().await
    }

    /// Waits for every outstanding result and collects them into a batch.
    pub async fn collect(mut self) -> ScanBatch {
        let mut batch = ScanBatch::new();
        while let Some(result) = self.results.recv().await {
            batch.push(result);
        }
        batch
    }
}

/// Runs the classifier over a domain set with a fixed-size worker pool.
///
/// Each worker takes one domain off a shared queue, classifies it to
/// completion, hands the result to the completion channel and only then
/// takes the next domain. There is no scan-wide deadline; each domain is
/// bounded by the classifier's own timeouts.
pub struct ScanOrchestrator<R, P> {
    classifier: Arc<DomainClassifier<R, P>>,
    pool_size: usize,
}

impl<R, P> ScanOrchestrator<R, P>
where
    R: Resolver + 'static,
    P: Prober + 'static,
{
    pub fn new(classifier: DomainClassifier<R, P>, pool_size: usize) -> Self {
        Self {
            classifier: Arc::new(classifier),
            pool_size: pool_size.max(1),
        }
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn classifier(&self) -> &DomainClassifier<R, P> {
        &self.classifier
    }

    /// Starts the workers and returns immediately with the completion channel.
    pub fn spawn<I, S>(&self, domains: I) -> ScanHandle
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queue = unique_domains(domains);
        let total = queue.len();
        let workers = self.pool_size.min(total);
        info!(domains = total, workers, "Starting reachability scan.");

        let queue = Arc::new(Mutex::new(queue));
        let (tx, rx) = mpsc::channel(total.max(1));

        for worker_id in 0..workers {
            let queue = Arc::clone(&queue);
            let classifier = Arc::clone(&self.classifier);
            let tx = tx.clone();
            tokio::spawn(async move {
                loop {
                    let next = queue.lock().await.pop_front();
                    let Some(domain) = next else { break };

                    let result = Arc::clone(&classifier).classify_guarded(domain).await;
                    debug!(worker_id, domain = %result.domain, verdict = %result.verdict, "Domain classified.");
                    if tx.send(result).await.is_err() {
                        debug!(worker_id, "Result receiver dropped, stopping worker.");
                        break;
                    }
                }
            });
        }

        ScanHandle { total, results: rx }
    }

    /// Classifies every domain and blocks until all results are in.
    pub async fn scan<I, S>(&self, domains: I) -> ScanBatch
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let batch = self.spawn(domains).collect().await;
        let tally = batch.tally();
        info!(
            accessible = tally.accessible,
            blocked = tally.blocked,
            errors = tally.error,
            "Reachability scan finished."
        );
        batch
    }
}

/// The input is a set: later duplicates are dropped, first occurrence keeps its place.
fn unique_domains<I, S>(domains: I) -> VecDeque<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    domains
        .into_iter()
        .map(Into::into)
        .filter(|domain| seen.insert(domain.clone()))
        .collect()
}
