//! Product view-model backed by a single store worker thread.
//!
//! # Responsibility
//! - Own the SQLite connection on a dedicated worker thread.
//! - Dispatch insert/find/delete/refresh jobs without blocking the caller.
//! - Publish `all_products` and `search_results` snapshots after each job.
//!
//! # Invariants
//! - Jobs run one at a time in enqueue order.
//! - `all_products` is republished after open, every insert and every delete.
//! - `search_results` is republished after every find.
//! - A failed store job is logged and leaves both lists unchanged; the first
//!   failure since the previous `wait_idle` is returned by the next one.

use super::observable::Observable;
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::product::{NewProduct, Product, ProductId};
use crate::repo::product_repo::{
    ProductRepository, RepoError, RepoResult, SqliteProductRepository,
};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::{debug, error, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::thread::JoinHandle;

const WORKER_THREAD_NAME: &str = "roomdemo-store";

/// Errors raised while starting or talking to the store worker.
#[derive(Debug)]
pub enum ViewModelError {
    /// Database could not be opened or migrated.
    Db(DbError),
    /// Worker thread could not be spawned.
    WorkerSpawn(std::io::Error),
    /// Worker thread is gone; no further jobs can run.
    WorkerStopped,
    /// A store job failed; later jobs in the same batch still ran.
    Store { job: &'static str, error: RepoError },
}

impl Display for ViewModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::WorkerSpawn(err) => write!(f, "failed to start store worker: {err}"),
            Self::WorkerStopped => write!(f, "store worker has stopped"),
            Self::Store { job, error } => write!(f, "store job `{job}` failed: {error}"),
        }
    }
}

impl Error for ViewModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::WorkerSpawn(err) => Some(err),
            Self::WorkerStopped => None,
            Self::Store { error, .. } => Some(error),
        }
    }
}

impl From<DbError> for ViewModelError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Outcome of the jobs that ran since the previous `wait_idle`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobReport {
    /// Ids assigned by successful inserts, in job order.
    pub inserted: Vec<ProductId>,
    /// Rows removed by successful deletes.
    pub removed: usize,
}

#[derive(Default)]
struct PendingOutcome {
    report: JobReport,
    failure: Option<(&'static str, RepoError)>,
}

impl PendingOutcome {
    fn record<T>(&mut self, label: &'static str, result: RepoResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                error!("event=store_job module=viewmodel status=error job={label} error={err}");
                if self.failure.is_none() {
                    self.failure = Some((label, err));
                }
                None
            }
        }
    }

    fn take(&mut self) -> Result<JobReport, ViewModelError> {
        let outcome = std::mem::take(self);
        match outcome.failure {
            Some((job, error)) => Err(ViewModelError::Store { job, error }),
            None => Ok(outcome.report),
        }
    }
}

enum StoreJob {
    Insert(NewProduct),
    Find(String),
    Delete(String),
    Refresh,
    Barrier(Sender<Result<JobReport, ViewModelError>>),
}

impl StoreJob {
    fn label(&self) -> &'static str {
        match self {
            Self::Insert(_) => "insert",
            Self::Find(_) => "find",
            Self::Delete(_) => "delete",
            Self::Refresh => "refresh",
            Self::Barrier(_) => "barrier",
        }
    }
}

/// Mediator holding the observable product lists.
pub struct ProductViewModel {
    jobs: Option<Sender<StoreJob>>,
    worker: Option<JoinHandle<()>>,
    all_products: Observable<Vec<Product>>,
    search_results: Observable<Vec<Product>>,
}

impl ProductViewModel {
    /// Opens (or creates) the database file and starts the store worker.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ViewModelError> {
        Self::with_connection(open_db(path)?)
    }

    /// Starts the store worker on a fresh in-memory database.
    pub fn open_in_memory() -> Result<Self, ViewModelError> {
        Self::with_connection(open_db_in_memory()?)
    }

    /// Starts the store worker on an already migrated connection.
    pub fn with_connection(conn: Connection) -> Result<Self, ViewModelError> {
        let (jobs_tx, jobs_rx) = unbounded();
        let all_products = Observable::new(Vec::new());
        let search_results = Observable::new(Vec::new());

        let worker_all = all_products.clone();
        let worker_search = search_results.clone();
        let worker = std::thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || run_store_worker(conn, jobs_rx, worker_all, worker_search))
            .map_err(ViewModelError::WorkerSpawn)?;

        Ok(Self {
            jobs: Some(jobs_tx),
            worker: Some(worker),
            all_products,
            search_results,
        })
    }

    /// Every stored product, ordered by id.
    pub fn all_products(&self) -> &Observable<Vec<Product>> {
        &self.all_products
    }

    /// Result of the most recent find.
    pub fn search_results(&self) -> &Observable<Vec<Product>> {
        &self.search_results
    }

    pub fn insert_product(&self, product: NewProduct) -> Result<(), ViewModelError> {
        self.enqueue(StoreJob::Insert(product))
    }

    pub fn find_product(&self, name: impl Into<String>) -> Result<(), ViewModelError> {
        self.enqueue(StoreJob::Find(name.into()))
    }

    pub fn delete_product(&self, name: impl Into<String>) -> Result<(), ViewModelError> {
        self.enqueue(StoreJob::Delete(name.into()))
    }

    /// Re-reads the full list, e.g. after another process wrote to the file.
    pub fn refresh(&self) -> Result<(), ViewModelError> {
        self.enqueue(StoreJob::Refresh)
    }

    /// Blocks until every job enqueued before this call has finished.
    ///
    /// Returns what those jobs did, or the first store failure among them.
    pub fn wait_idle(&self) -> Result<JobReport, ViewModelError> {
        let (done_tx, done_rx) = bounded(1);
        self.enqueue(StoreJob::Barrier(done_tx))?;
        done_rx.recv().map_err(|_| ViewModelError::WorkerStopped)?
    }

    fn enqueue(&self, job: StoreJob) -> Result<(), ViewModelError> {
        let label = job.label();
        let sender = self.jobs.as_ref().ok_or(ViewModelError::WorkerStopped)?;
        sender.send(job).map_err(|_| {
            error!("event=store_enqueue module=viewmodel status=error job={label} error_code=worker_stopped");
            ViewModelError::WorkerStopped
        })
    }
}

impl Drop for ProductViewModel {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop after queued jobs drain.
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("event=store_worker module=viewmodel status=error error_code=worker_panicked");
            }
        }
    }
}

fn run_store_worker(
    conn: Connection,
    jobs: Receiver<StoreJob>,
    all_products: Observable<Vec<Product>>,
    search_results: Observable<Vec<Product>>,
) {
    info!("event=store_worker module=viewmodel status=start");
    let repo = SqliteProductRepository::new(&conn);
    let mut pending = PendingOutcome::default();
    publish_list(&mut pending, "refresh", repo.list_products(), &all_products);

    while let Ok(job) = jobs.recv() {
        let label = job.label();
        match job {
            StoreJob::Insert(product) => {
                if let Some(id) = pending.record(label, repo.insert_product(&product)) {
                    pending.report.inserted.push(id);
                    publish_list(&mut pending, label, repo.list_products(), &all_products);
                }
            }
            StoreJob::Find(name) => {
                publish_list(&mut pending, label, repo.find_products(&name), &search_results);
            }
            StoreJob::Delete(name) => {
                if let Some(removed) = pending.record(label, repo.delete_products(&name)) {
                    pending.report.removed += removed;
                    publish_list(&mut pending, label, repo.list_products(), &all_products);
                }
            }
            StoreJob::Refresh => {
                publish_list(&mut pending, label, repo.list_products(), &all_products)
            }
            StoreJob::Barrier(done) => {
                let _ = done.send(pending.take());
            }
        }
    }

    info!("event=store_worker module=viewmodel status=stopped");
}

fn publish_list(
    pending: &mut PendingOutcome,
    label: &'static str,
    result: RepoResult<Vec<Product>>,
    target: &Observable<Vec<Product>>,
) {
    if let Some(products) = pending.record(label, result) {
        debug!(
            "event=store_publish module=viewmodel job={label} count={}",
            products.len()
        );
        target.publish(products);
    }
}
