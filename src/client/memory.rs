use std::{
    collections::{BTreeMap, VecDeque},
    fmt,
    marker::PhantomData,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Duration,
};

use async_trait::async_trait;

use super::{ApiError, Poller, ResourceClient};
use crate::ids::ResourceId;

/// Remote call recorded by [`InMemoryClient`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientOperation {
    Get,
    CreateOrUpdate,
    Delete,
    Stop,
    Start,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCall {
    pub operation: ClientOperation,
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Submit,
    Poll,
}

#[derive(Debug)]
struct Fault {
    operation: ClientOperation,
    stage: Stage,
    error: ApiError,
}

type WriteHook<I, M> = Arc<dyn Fn(&I, &mut M) + Send + Sync>;

/// [`ResourceClient`] keeping documents in memory
///
/// Documents are keyed by identifier, ignoring case like the remote API does.
/// Failures can be injected either when an operation is submitted or while it is
/// polled, and every call is recorded.
pub struct InMemoryClient<I, M> {
    documents: Arc<Mutex<BTreeMap<String, M>>>,
    faults: Mutex<VecDeque<Fault>>,
    calls: Mutex<Vec<ClientCall>>,
    latency: Duration,
    on_write: Option<WriteHook<I, M>>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
    _id: PhantomData<fn(&I)>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn key<I: ResourceId>(id: &I) -> String {
    id.id().to_lowercase()
}

impl<I, M> Default for InMemoryClient<I, M> {
    fn default() -> Self {
        Self {
            documents: Default::default(),
            faults: Default::default(),
            calls: Default::default(),
            latency: Duration::ZERO,
            on_write: None,
            in_flight: Default::default(),
            peak_in_flight: Default::default(),
            _id: PhantomData,
        }
    }
}

impl<I, M> InMemoryClient<I, M>
where
    I: ResourceId,
    M: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every long-running operation by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Transform documents when they are written, like the service filling computed fields
    pub fn on_write<F>(mut self, hook: F) -> Self
    where
        F: Fn(&I, &mut M) + Send + Sync + 'static,
    {
        self.on_write = Some(Arc::new(hook));
        self
    }

    /// Store a document as if it had been created out of band
    pub fn insert(&self, id: &I, model: M) {
        lock(&self.documents).insert(key(id), model);
    }

    /// Remove a document as if it had been deleted out of band
    pub fn remove(&self, id: &I) -> Option<M> {
        lock(&self.documents).remove(&key(id))
    }

    pub fn document(&self, id: &I) -> Option<M> {
        lock(&self.documents).get(&key(id)).cloned()
    }

    /// Make the next `operation` fail when submitted
    pub fn fail_next(&self, operation: ClientOperation, error: ApiError) {
        lock(&self.faults).push_back(Fault {
            operation,
            stage: Stage::Submit,
            error,
        });
    }

    /// Make the next `operation` be accepted, then fail while polled
    pub fn fail_next_poll(&self, operation: ClientOperation, error: ApiError) {
        lock(&self.faults).push_back(Fault {
            operation,
            stage: Stage::Poll,
            error,
        });
    }

    pub fn calls(&self) -> Vec<ClientCall> {
        lock(&self.calls).clone()
    }

    pub fn count(&self, operation: ClientOperation) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|call| call.operation == operation)
            .count()
    }

    /// Highest number of write operations observed running at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, operation: ClientOperation, id: &I) -> Option<Fault> {
        lock(&self.calls).push(ClientCall {
            operation,
            id: id.id(),
        });
        let mut faults = lock(&self.faults);
        let position = faults
            .iter()
            .position(|fault| fault.operation == operation)?;
        faults.remove(position)
    }

    /// Long-running operation applying `apply` to the documents once complete
    fn operation<F>(&self, poll_fault: Option<ApiError>, apply: F) -> Poller
    where
        F: FnOnce(&mut BTreeMap<String, M>) -> Result<(), ApiError> + Send + 'static,
    {
        let documents = self.documents.clone();
        let in_flight = self.in_flight.clone();
        let peak = self.peak_in_flight.clone();
        let latency = self.latency;
        Poller::new(async move {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            let result = match poll_fault {
                Some(error) => Err(error),
                None => apply(&mut lock(&documents)),
            };
            in_flight.fetch_sub(1, Ordering::SeqCst);
            result
        })
    }

    fn submit(
        &self,
        operation: ClientOperation,
        id: &I,
    ) -> Result<Option<ApiError>, ApiError> {
        match self.record(operation, id) {
            Some(Fault {
                stage: Stage::Submit,
                error,
                ..
            }) => Err(error),
            Some(Fault {
                stage: Stage::Poll,
                error,
                ..
            }) => Ok(Some(error)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl<I, M> ResourceClient<I, M> for InMemoryClient<I, M>
where
    I: ResourceId,
    M: Clone + Send + 'static,
{
    async fn get(&self, id: &I) -> Result<M, ApiError> {
        self.submit(ClientOperation::Get, id)?;
        self.document(id)
            .ok_or_else(|| ApiError::not_found(&id.id()))
    }

    async fn create_or_update(&self, id: &I, mut model: M) -> Result<Poller, ApiError> {
        let poll_fault = self.submit(ClientOperation::CreateOrUpdate, id)?;
        if let Some(hook) = &self.on_write {
            hook(id, &mut model);
        }
        let key = key(id);
        Ok(self.operation(poll_fault, move |documents| {
            documents.insert(key, model);
            Ok(())
        }))
    }

    async fn delete(&self, id: &I) -> Result<Poller, ApiError> {
        let poll_fault = self.submit(ClientOperation::Delete, id)?;
        if self.document(id).is_none() {
            return Err(ApiError::not_found(&id.id()));
        }
        let key = key(id);
        Ok(self.operation(poll_fault, move |documents| {
            documents.remove(&key);
            Ok(())
        }))
    }

    async fn stop(&self, id: &I) -> Result<Poller, ApiError> {
        let poll_fault = self.submit(ClientOperation::Stop, id)?;
        Ok(self.operation(poll_fault, |_| Ok(())))
    }

    async fn start(&self, id: &I) -> Result<Poller, ApiError> {
        let poll_fault = self.submit(ClientOperation::Start, id)?;
        Ok(self.operation(poll_fault, |_| Ok(())))
    }
}

impl<I, M> fmt::Debug for InMemoryClient<I, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryClient")
            .field("documents", &lock(&self.documents).len())
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}
