//!
//! # Shared controller factory
//!
//! One [`SharedController`] exists per group/version/kind. Every typed
//! [`Controller`](crate::Controller) of that kind registers its handlers
//! on it, so one watch feeds all of them.
//!
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_channel::{Receiver, Sender, unbounded};
use async_lock::RwLock;
use futures_util::StreamExt;
use futures_util::future::BoxFuture;
use tracing::{debug, error, info, instrument, trace};

use fluvio_future::task::spawn;
use fluvio_future::timer::sleep;

use cattle_management_metadata::{GroupVersionKind, ResourceDescriptor, ResourceSpec};

use crate::client::{MetadataClient, NameSpace, ObjectKey, SharedClient};
use crate::config::ControllerFactoryConfig;

pub type HandlerFuture = BoxFuture<'static, anyhow::Result<()>>;

/// handler invoked with the key of every changed object
pub type SharedHandler = Arc<dyn Fn(ObjectKey) -> HandlerFuture + Send + Sync>;

/// feeds keys of a kind into the work queue until the process ends
pub(crate) type WatchTask = Box<dyn FnOnce(WorkQueue) -> BoxFuture<'static, ()> + Send>;

#[derive(Debug, Default)]
struct QueueState {
    /// keys waiting to be processed, including those re-added while processing
    dirty: HashSet<ObjectKey>,
    /// keys handed to a worker and not yet done
    processing: HashSet<ObjectKey>,
}

/// Queue of object keys.
/// A key is never queued twice, and never handed to two workers at once:
/// a key added while it is processed is queued again once it is done.
#[derive(Debug, Clone)]
pub struct WorkQueue {
    sender: Sender<ObjectKey>,
    receiver: Receiver<ObjectKey>,
    state: Arc<Mutex<QueueState>>,
}

impl WorkQueue {
    fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            state: Arc::new(Mutex::new(QueueState::default())),
        }
    }

    pub fn add(&self, key: ObjectKey) {
        let mut state = self.state.lock().unwrap();
        if !state.dirty.insert(key.clone()) {
            return;
        }
        if state.processing.contains(&key) {
            trace!(%key, "marked dirty while processing");
            return;
        }
        trace!(%key, "queued");
        // unbounded and we hold a receiver, send can't fail
        let _ = self.sender.try_send(key);
    }

    pub fn add_after(&self, key: ObjectKey, delay: Duration) {
        let queue = self.clone();
        spawn(async move {
            sleep(delay).await;
            queue.add(key);
        });
    }

    /// keys waiting to be processed
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// next key, caller must call [`WorkQueue::done`] once processed
    async fn next(&self) -> Option<ObjectKey> {
        let key = self.receiver.recv().await.ok()?;
        let mut state = self.state.lock().unwrap();
        state.dirty.remove(&key);
        state.processing.insert(key.clone());
        Some(key)
    }

    fn done(&self, key: &ObjectKey) {
        let mut state = self.state.lock().unwrap();
        state.processing.remove(key);
        if state.dirty.contains(key) {
            trace!(%key, "requeued after processing");
            let _ = self.sender.try_send(key.clone());
        }
    }
}

/// Watch, queue and handlers of one kind
pub struct SharedController {
    descriptor: ResourceDescriptor,
    queue: WorkQueue,
    handlers: RwLock<Vec<(String, SharedHandler)>>,
    watch: Mutex<Option<WatchTask>>,
    started: AtomicBool,
}

impl fmt::Debug for SharedController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedController")
            .field("descriptor", &self.descriptor)
            .field("queued", &self.queue.len())
            .field("started", &self.is_started())
            .finish()
    }
}

impl SharedController {
    fn new(descriptor: ResourceDescriptor) -> Self {
        Self {
            descriptor,
            queue: WorkQueue::new(),
            handlers: RwLock::new(vec![]),
            watch: Mutex::new(None),
            started: AtomicBool::new(false),
        }
    }

    pub fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    pub fn queue(&self) -> &WorkQueue {
        &self.queue
    }

    pub fn enqueue(&self, key: ObjectKey) {
        self.queue.add(key);
    }

    pub fn enqueue_after(&self, key: ObjectKey, delay: Duration) {
        self.queue.add_after(key, delay);
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    pub async fn handler_names(&self) -> Vec<String> {
        self.handlers
            .read()
            .await
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub async fn register_handler(&self, name: &str, handler: SharedHandler) {
        debug!(kind = self.descriptor.kind(), name, "registering handler");
        self.handlers.write().await.push((name.to_owned(), handler));
    }

    /// first watch installed wins, later ones are dropped
    pub(crate) fn install_watch(&self, task: WatchTask) {
        let mut watch = self.watch.lock().unwrap();
        if watch.is_none() && !self.is_started() {
            *watch = Some(task);
        }
    }

    fn has_watch(&self) -> bool {
        self.watch.lock().unwrap().is_some()
    }

    /// spawn watch and workers, only first call has effect
    pub(crate) fn start(self: &Arc<Self>, workers: usize, retry_backoff: Duration) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }
        info!(kind = self.descriptor.kind(), workers, "starting controller");

        if let Some(watch) = self.watch.lock().unwrap().take() {
            spawn(watch(self.queue.clone()));
        }

        for worker in 0..workers {
            let controller = self.clone();
            spawn(async move {
                controller.worker_loop(worker, retry_backoff).await;
            });
        }
    }

    #[instrument(skip(self, retry_backoff), fields(kind = self.descriptor.kind()))]
    async fn worker_loop(self: Arc<Self>, worker: usize, retry_backoff: Duration) {
        while let Some(key) = self.queue.next().await {
            self.process(&key, retry_backoff).await;
            self.queue.done(&key);
        }
        debug!("work queue closed");
    }

    /// run every handler, key is retried once after backoff if any failed
    async fn process(&self, key: &ObjectKey, retry_backoff: Duration) {
        let handlers = self.handlers.read().await.clone();
        let mut failed = false;
        for (name, handler) in handlers {
            trace!(%key, handler = %name, "invoking");
            if let Err(err) = handler(key.clone()).await {
                error!(%key, handler = %name, "handler failed: {:#}", err);
                failed = true;
            }
        }

        if failed {
            self.queue.add_after(key.clone(), retry_backoff);
        }
    }
}

/// Hands out one [`SharedController`] per kind and starts them
pub struct SharedControllerFactory<C> {
    client: SharedClient<C>,
    config: ControllerFactoryConfig,
    controllers: Mutex<HashMap<GroupVersionKind, Arc<SharedController>>>,
    started: AtomicBool,
}

impl<C> fmt::Debug for SharedControllerFactory<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedControllerFactory")
            .field("config", &self.config)
            .field("controllers", &self.controller_count())
            .field("started", &self.is_started())
            .finish()
    }
}

impl<C> SharedControllerFactory<C> {
    pub fn client(&self) -> &SharedClient<C> {
        &self.client
    }

    pub fn config(&self) -> &ControllerFactoryConfig {
        &self.config
    }

    pub fn controller_count(&self) -> usize {
        self.controllers.lock().unwrap().len()
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }
}

impl<C> SharedControllerFactory<C>
where
    C: MetadataClient,
{
    pub fn new(client: SharedClient<C>, config: ControllerFactoryConfig) -> Self {
        Self {
            client,
            config,
            controllers: Mutex::new(HashMap::new()),
            started: AtomicBool::new(false),
        }
    }

    pub fn shared(client: SharedClient<C>, config: ControllerFactoryConfig) -> Arc<Self> {
        Arc::new(Self::new(client, config))
    }

    /// shared controller of a kind, created on first request
    pub fn for_descriptor(&self, descriptor: &ResourceDescriptor) -> Arc<SharedController> {
        let mut controllers = self.controllers.lock().unwrap();
        controllers
            .entry(descriptor.gvk)
            .or_insert_with(|| {
                debug!(%descriptor, "new shared controller");
                Arc::new(SharedController::new(*descriptor))
            })
            .clone()
    }

    /// Starts every kind that has handlers.
    /// Kinds getting their first handler later are started on registration.
    pub fn start(&self) {
        self.started.store(true, Ordering::SeqCst);
        let controllers: Vec<_> = self.controllers.lock().unwrap().values().cloned().collect();
        for controller in controllers {
            self.start_controller(&controller);
        }
    }

    pub(crate) fn start_controller(&self, controller: &Arc<SharedController>) {
        if !self.is_started() || !controller.has_watch() {
            return;
        }
        let workers = self.config.workers_for(controller.descriptor().kind());
        controller.start(workers, self.config.retry_backoff);
    }

    /// install watch of `S` on its shared controller
    pub(crate) fn watch<S: ResourceSpec>(&self, controller: &SharedController) {
        let task: WatchTask = Box::new({
            let client = self.client.clone();
            let namespace = self.config.watch_namespace();
            let resync = self.config.resync;
            move |queue: WorkQueue| -> BoxFuture<'static, ()> {
                Box::pin(watch_loop::<S, C>(client, namespace, resync, queue))
            }
        });
        controller.install_watch(task);
    }
}

/// list then follow changes, start over on every resync or broken stream
#[instrument(skip(client, queue), fields(kind = S::descriptor().kind()))]
async fn watch_loop<S, C>(
    client: SharedClient<C>,
    namespace: NameSpace,
    resync: Duration,
    queue: WorkQueue,
) where
    S: ResourceSpec,
    C: MetadataClient,
{
    use tokio::select;

    const RETRY_WATCH: Duration = Duration::from_secs(1);

    loop {
        let mut stream = match client.watch_stream::<S>(&namespace).await {
            Ok(stream) => stream,
            Err(err) => {
                error!("watch failed: {}", err);
                sleep(RETRY_WATCH).await;
                continue;
            }
        };

        match client.retrieve_items::<S>(&namespace).await {
            Ok(items) => {
                debug!(items = items.len(), "listed");
                for item in &items {
                    queue.add(ObjectKey::of(item));
                }
            }
            Err(err) => error!("list failed: {}", err),
        }

        let deadline = Instant::now() + resync;
        loop {
            select! {
                event = stream.next() => match event {
                    Some(Ok(event)) => queue.add(ObjectKey::of_watch(&event)),
                    Some(Err(err)) => error!("watch event: {}", err),
                    None => {
                        debug!("watch stream ended");
                        break;
                    }
                },
                _ = sleep(deadline.saturating_duration_since(Instant::now())) => {
                    debug!("resync");
                    break;
                }
            }
        }
    }
}
