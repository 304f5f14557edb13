//! Single-owner tree thread
//!
//! One thread owns the only [`AvlTree`]. Callers hold cloneable
//! [`TreeHandle`]s that send commands over a channel and block on a
//! per-command reply, so access is serialized and no reader ever sees a
//! partially updated tree. Rotated pairs go out through a separate
//! [`HighlightQueue`] that presentation code drains at its own pace.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::config::EngineConfig;
use crate::telemetry::{HighlightQueue, MutationReport, RotationEvent};
use crate::tree::{AvlTree, TreeKey};
use crate::TreeError;

/// Request handled by the owner thread
#[derive(Debug)]
enum Command<K> {
    Insert(K, Sender<MutationReport<K>>),
    Delete(K, Sender<MutationReport<K>>),
    Reset(Sender<MutationReport<K>>),
    Traverse(Sender<Vec<K>>),
    RotationLog(Sender<Vec<RotationEvent<K>>>),
    Structure(Sender<String>),
    Shutdown,
}

/// Cloneable sender side of a running [`TreeService`]
#[derive(Debug)]
pub struct TreeHandle<K> {
    commands: Sender<Command<K>>,
}

impl<K> Clone for TreeHandle<K> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
        }
    }
}

impl<K: TreeKey + Send + 'static> TreeHandle<K> {
    fn request<T>(&self, build: impl FnOnce(Sender<T>) -> Command<K>) -> Result<T, TreeError> {
        let (reply, response) = mpsc::channel();
        self.commands
            .send(build(reply))
            .map_err(|_| TreeError::ServiceStopped)?;
        response.recv().map_err(|_| TreeError::ServiceStopped)
    }

    /// Insert `key`; duplicates are reported, not rejected.
    pub fn insert(&self, key: K) -> Result<MutationReport<K>, TreeError> {
        self.request(|reply| Command::Insert(key, reply))
    }

    /// Delete `key`; absent keys are reported, not rejected.
    pub fn delete(&self, key: K) -> Result<MutationReport<K>, TreeError> {
        self.request(|reply| Command::Delete(key, reply))
    }

    /// Discard the tree, its log, and any pending highlights.
    pub fn reset(&self) -> Result<MutationReport<K>, TreeError> {
        self.request(Command::Reset)
    }

    /// Keys in ascending order
    pub fn traverse(&self) -> Result<Vec<K>, TreeError> {
        self.request(Command::Traverse)
    }

    /// Copy of the rotation log, oldest first
    pub fn rotation_log(&self) -> Result<Vec<RotationEvent<K>>, TreeError> {
        self.request(Command::RotationLog)
    }

    /// Ask the owner thread to stop after pending commands.
    pub fn shutdown(&self) -> Result<(), TreeError> {
        self.commands
            .send(Command::Shutdown)
            .map_err(|_| TreeError::ServiceStopped)
    }
}

impl<K: TreeKey + std::fmt::Display + Send + 'static> TreeHandle<K> {
    /// Sideways structure dump of the current tree
    pub fn structure(&self) -> Result<String, TreeError> {
        self.request(Command::Structure)
    }
}

/// Running owner thread plus its telemetry queue
#[derive(Debug)]
pub struct TreeService<K> {
    handle: TreeHandle<K>,
    highlights: HighlightQueue<K>,
    owner: Option<JoinHandle<()>>,
}

impl<K: TreeKey + std::fmt::Display + Send + 'static> TreeService<K> {
    /// Validate `config` and start the owner thread.
    pub fn spawn(config: EngineConfig) -> Result<Self, TreeError> {
        config.validate()?;
        let highlights = HighlightQueue::with_capacity(config.queue_capacity)?;
        let (commands, inbox) = mpsc::channel();

        let owner = {
            let highlights = highlights.clone();
            let verify = config.verify_invariants;
            thread::Builder::new()
                .name(config.thread_name.clone())
                .spawn(move || run_owner(inbox, highlights, verify))?
        };
        tracing::info!(
            thread = %config.thread_name,
            queue_capacity = config.queue_capacity,
            verify_invariants = config.verify_invariants,
            "tree service started"
        );

        Ok(Self {
            handle: TreeHandle { commands },
            highlights,
            owner: Some(owner),
        })
    }

    /// New handle to the owner thread
    pub fn handle(&self) -> TreeHandle<K> {
        self.handle.clone()
    }

    /// Consumer side of the highlight queue
    pub fn highlights(&self) -> HighlightQueue<K> {
        self.highlights.clone()
    }

    /// Stop the owner thread and wait for it.
    pub fn shutdown(mut self) -> Result<(), TreeError> {
        self.stop()
    }

    fn stop(&mut self) -> Result<(), TreeError> {
        let Some(owner) = self.owner.take() else {
            return Ok(());
        };
        // Already gone is fine: join reports how it ended.
        let _ = self.handle.shutdown();
        owner.join().map_err(|_| TreeError::OwnerPanicked)
    }
}

impl<K> Drop for TreeService<K> {
    fn drop(&mut self) {
        if let Some(owner) = self.owner.take() {
            let _ = self.handle.commands.send(Command::Shutdown);
            let _ = owner.join();
        }
    }
}

fn run_owner<K>(inbox: Receiver<Command<K>>, highlights: HighlightQueue<K>, verify: bool)
where
    K: TreeKey + std::fmt::Display,
{
    let mut tree = AvlTree::new();

    while let Ok(command) = inbox.recv() {
        match command {
            Command::Insert(key, reply) => {
                let report = tree.insert(key);
                settle(&mut tree, &highlights, verify);
                let _ = reply.send(report);
            }
            Command::Delete(key, reply) => {
                let report = tree.delete(&key);
                settle(&mut tree, &highlights, verify);
                let _ = reply.send(report);
            }
            Command::Reset(reply) => {
                let report = tree.reset();
                let discarded = highlights.drain().len();
                tracing::debug!(discarded, "pending highlights discarded");
                let _ = reply.send(report);
            }
            Command::Traverse(reply) => {
                let _ = reply.send(tree.traverse());
            }
            Command::RotationLog(reply) => {
                let _ = reply.send(tree.rotation_log().entries().to_vec());
            }
            Command::Structure(reply) => {
                let _ = reply.send(tree.structure());
            }
            Command::Shutdown => break,
        }
    }

    tracing::info!(keys = tree.len(), "tree service stopped");
}

/// Post-mutation step: optional full check, then hand the rotated pair to
/// the highlight queue.
fn settle<K: TreeKey>(tree: &mut AvlTree<K>, highlights: &HighlightQueue<K>, verify: bool) {
    if verify {
        if let Err(err) = tree.check_invariants() {
            tracing::error!(%err, "tree invariant violated");
            panic!("tree invariant violated: {err}");
        }
    }
    if let Some(pair) = tree.take_last_rotated() {
        if let Err(err) = highlights.publish(pair) {
            tracing::warn!(%err, dropped = highlights.dropped(), "highlight snapshot discarded");
        }
    }
}
