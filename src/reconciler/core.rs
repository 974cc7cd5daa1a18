/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Core Reconciler implementation.
//!
//! The [`Reconciler`] owns the [`OrderStore`] and runs as a single-writer
//! event loop. Handles send commands over a channel; submissions are posted
//! on their own tasks and report back through a completion channel, so the
//! store is only ever touched from the loop.

use super::command::ReconcilerCommand;
use super::event::ReconcileEvent;
use super::generator::OrderGenerator;
use super::instruction::RenderInstruction;
use super::receipt::SubmissionReceipt;
use super::submission::{SubmissionFailed, SubmissionId, SubmissionOutcome, Submitter};
use crate::orderbook::{Order, OrderBookSnapshot, OrderStore, Side};
use std::collections::VecDeque;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Type alias for event listener functions.
type EventListener = Arc<dyn Fn(&ReconcileEvent) + Send + Sync>;

/// Default command channel capacity.
const DEFAULT_CAPACITY: usize = 65536;

/// Errors that can occur when talking to a running [`Reconciler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReconcilerError {
    /// The event loop has stopped.
    #[error("reconciler has been shut down")]
    Shutdown,
}

/// Submission posted and awaiting its outcome.
struct InFlight {
    submission_id: SubmissionId,
    order: Order,
    generation: u64,
    reply: oneshot::Sender<SubmissionReceipt>,
}

/// Per-side submission queue: one in flight, the rest waiting in FIFO order.
#[derive(Default)]
struct SideQueue {
    in_flight: Option<InFlight>,
    waiting: VecDeque<oneshot::Sender<SubmissionReceipt>>,
}

impl SideQueue {
    fn is_idle(&self) -> bool {
        self.in_flight.is_none() && self.waiting.is_empty()
    }
}

/// Message sent back to the loop when a submission task finishes.
struct Completion {
    side: Side,
    submission_id: SubmissionId,
    outcome: SubmissionOutcome,
}

/// Owns the order book and folds snapshots and synthetic submissions into it.
///
/// Each call produces a [`RenderInstruction`] telling renderers whether to
/// rebuild everything, insert one row, or do nothing. Instructions reach
/// registered listeners as [`ReconcileEvent`]s in sequence order.
///
/// At most one submission per side is in flight. Later requests for the same
/// side queue behind it and only generate and prepend their order once they
/// start, so a rollback always removes its own candidate.
///
/// # Examples
///
/// ```no_run
/// use orderbook_reconciler::reconciler::{Reconciler, SimulatedSubmitter, UniformOrderGenerator};
/// use orderbook_reconciler::Side;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let reconciler = Reconciler::new(SimulatedSubmitter::default(), UniformOrderGenerator::new());
/// let (handle, task) = reconciler.spawn();
///
/// let receipt = handle.submit_synthetic_order(Side::Buy).await?;
/// assert!(receipt.is_committed());
///
/// drop(handle);
/// task.wait().await?;
/// # Ok(())
/// # }
/// ```
pub struct Reconciler<S: Submitter, G: OrderGenerator> {
    /// The authoritative book.
    store: OrderStore,

    /// Posts candidate orders.
    submitter: Arc<S>,

    /// Produces candidate orders.
    generator: G,

    /// Next sequence number to assign.
    sequence: u64,

    /// Command channel buffer size.
    capacity: usize,

    /// Submission state, indexed by side.
    queues: [SideQueue; 2],

    /// Event listeners called synchronously for each event.
    event_listeners: Vec<EventListener>,
}

impl<S: Submitter, G: OrderGenerator> Reconciler<S, G> {
    /// Creates a reconciler over an empty book.
    #[must_use]
    pub fn new(submitter: S, generator: G) -> Self {
        Self::with_capacity(submitter, generator, DEFAULT_CAPACITY)
    }

    /// Creates a reconciler with a specific command channel capacity.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn with_capacity(submitter: S, generator: G, capacity: usize) -> Self {
        Self {
            store: OrderStore::new(),
            submitter: Arc::new(submitter),
            generator,
            sequence: 1,
            capacity: capacity.max(1),
            queues: Default::default(),
            event_listeners: Vec::new(),
        }
    }

    /// Starts from an existing store instead of an empty one, e.g. a store
    /// rebuilt by [`ReplayEngine`](super::ReplayEngine).
    #[must_use]
    pub fn with_store(mut self, store: OrderStore) -> Self {
        self.store = store;
        self
    }

    /// Registers an event listener.
    ///
    /// Listeners are called synchronously in sequence order for each event.
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: Fn(&ReconcileEvent) + Send + Sync + 'static,
    {
        self.event_listeners.push(Arc::new(listener));
    }

    /// Spawns the event loop on a new task.
    ///
    /// Returns the handle used to send commands and the task handle used to
    /// wait for shutdown. The loop stops once every [`ReconcilerHandle`] is
    /// dropped and no submission is pending.
    #[must_use]
    pub fn spawn(self) -> (ReconcilerHandle, ReconcilerTask) {
        let (command_tx, command_rx) = mpsc::channel(self.capacity);

        let handle = tokio::spawn(async move {
            self.run_loop(command_rx).await;
        });

        (ReconcilerHandle { command_tx }, ReconcilerTask { handle })
    }

    /// Runs the main event loop.
    async fn run_loop(mut self, mut command_rx: mpsc::Receiver<ReconcilerCommand>) {
        let (completion_tx, mut completion_rx) = mpsc::unbounded_channel();
        let mut accepting = true;

        loop {
            tokio::select! {
                Some(completion) = completion_rx.recv() => {
                    self.on_completion(completion, &completion_tx);
                }
                command = command_rx.recv(), if accepting => match command {
                    Some(command) => self.on_command(command, &completion_tx),
                    None => {
                        debug!("all reconciler handles dropped");
                        accepting = false;
                    }
                },
                else => break,
            }

            if !accepting && self.queues.iter().all(SideQueue::is_idle) {
                break;
            }
        }

        debug!(last_sequence = self.sequence - 1, "reconciler stopped");
    }

    fn on_command(
        &mut self,
        command: ReconcilerCommand,
        completion_tx: &mpsc::UnboundedSender<Completion>,
    ) {
        match command {
            ReconcilerCommand::ApplySnapshot { snapshot, reply } => {
                let instruction = self.apply_snapshot(snapshot);
                let _ = reply.send(instruction);
            }
            ReconcilerCommand::SubmitSynthetic { side, reply } => {
                let queue = &mut self.queues[side.index()];
                if queue.in_flight.is_some() {
                    queue.waiting.push_back(reply);
                    debug!(%side, waiting = queue.waiting.len(), "submission queued");
                } else {
                    self.start_submission(side, reply, completion_tx);
                }
            }
            ReconcilerCommand::ReadBook { reply } => {
                let _ = reply.send(self.store.snapshot());
            }
        }
    }

    /// Replaces the book and emits a full rebuild.
    fn apply_snapshot(&mut self, snapshot: OrderBookSnapshot) -> RenderInstruction {
        for side in Side::ALL {
            if let Some(pending) = &self.queues[side.index()].in_flight {
                warn!(
                    %side,
                    submission_id = %pending.submission_id,
                    "snapshot replaces book while submission is pending"
                );
            }
        }

        self.store.load_snapshot(snapshot);
        info!(
            buy = self.store.len(Side::Buy),
            sell = self.store.len(Side::Sell),
            "snapshot applied"
        );

        let instruction = RenderInstruction::full_rebuild(self.store.snapshot());
        self.emit(None, instruction).instruction
    }

    /// Generates a candidate, prepends it optimistically and posts it.
    fn start_submission(
        &mut self,
        side: Side,
        reply: oneshot::Sender<SubmissionReceipt>,
        completion_tx: &mpsc::UnboundedSender<Completion>,
    ) {
        let submission_id = Uuid::new_v4();
        let order = self.generator.next_order();
        let len = self.store.prepend(side, order);
        debug!(%side, %submission_id, len, "optimistic prepend");

        self.queues[side.index()].in_flight = Some(InFlight {
            submission_id,
            order,
            generation: self.store.generation(),
            reply,
        });

        let submitter = Arc::clone(&self.submitter);
        let completion_tx = completion_tx.clone();
        let request = order.to_request(side);
        tokio::spawn(async move {
            let posting = tokio::spawn(async move { submitter.submit(request).await });
            let outcome = match posting.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(%side, %submission_id, error = %e, "submission task did not finish");
                    SubmissionOutcome::Failure {
                        error: SubmissionFailed::new(format!(
                            "submission task did not finish: {e}"
                        )),
                    }
                }
            };
            debug!(%side, %submission_id, success = outcome.is_success(), "submission resolved");
            let _ = completion_tx.send(Completion {
                side,
                submission_id,
                outcome,
            });
        });
    }

    /// Commits or rolls back a finished submission and starts the next
    /// queued one for the same side.
    fn on_completion(
        &mut self,
        completion: Completion,
        completion_tx: &mpsc::UnboundedSender<Completion>,
    ) {
        let Completion {
            side,
            submission_id,
            outcome,
        } = completion;

        let Some(pending) = self.queues[side.index()].in_flight.take() else {
            error!(%side, %submission_id, "completion without pending submission");
            return;
        };
        debug_assert_eq!(pending.submission_id, submission_id);

        let instruction = if pending.generation != self.store.generation() {
            warn!(%side, %submission_id, "book replaced while pending, dropping outcome");
            RenderInstruction::None
        } else {
            match outcome {
                SubmissionOutcome::Success { data } => {
                    info!(
                        %side,
                        %submission_id,
                        quantity = data.quantity,
                        price = data.price,
                        "order added"
                    );
                    RenderInstruction::IncrementalInsert {
                        side,
                        order: pending.order,
                    }
                }
                SubmissionOutcome::Failure { error } => {
                    error!(%side, %submission_id, %error, "failed to add order");
                    if let Err(e) = self.store.remove_first(side) {
                        error!(%side, %submission_id, error = %e, "rollback found nothing to remove");
                    }
                    RenderInstruction::None
                }
            }
        };

        let event = self.emit(Some(submission_id), instruction);
        let receipt = SubmissionReceipt {
            submission_id,
            sequence_num: event.sequence_num,
            side,
            order: pending.order,
            instruction: event.instruction,
        };
        if pending.reply.send(receipt).is_err() {
            debug!(%side, %submission_id, "submitter no longer waiting for receipt");
        }

        if let Some(next) = self.queues[side.index()].waiting.pop_front() {
            self.start_submission(side, next, completion_tx);
        }
    }

    /// Stamps an instruction with the next sequence number and notifies
    /// listeners.
    fn emit(
        &mut self,
        submission_id: Option<SubmissionId>,
        instruction: RenderInstruction,
    ) -> ReconcileEvent {
        let seq = self.sequence;
        self.sequence += 1;

        let event = ReconcileEvent::new(seq, nanos_since_epoch(), submission_id, instruction);
        for listener in &self.event_listeners {
            listener(&event);
        }
        event
    }
}

/// Cloneable handle for sending commands to a running [`Reconciler`].
#[derive(Debug, Clone)]
pub struct ReconcilerHandle {
    command_tx: mpsc::Sender<ReconcilerCommand>,
}

impl ReconcilerHandle {
    /// Replaces the whole book with `snapshot`.
    ///
    /// Always resolves to [`RenderInstruction::FullRebuild`] carrying the new
    /// book.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcilerError::Shutdown`] if the event loop has stopped.
    pub async fn apply_snapshot(
        &self,
        snapshot: OrderBookSnapshot,
    ) -> Result<RenderInstruction, ReconcilerError> {
        let (reply, rx) = oneshot::channel();
        self.send(ReconcilerCommand::ApplySnapshot { snapshot, reply })
            .await?;
        rx.await.map_err(|_| ReconcilerError::Shutdown)
    }

    /// Generates a synthetic order for `side`, prepends it optimistically and
    /// posts it.
    ///
    /// Resolves once the submission is committed or rolled back. A failed
    /// submission is not an error: the receipt carries
    /// [`RenderInstruction::None`].
    ///
    /// # Errors
    ///
    /// Returns [`ReconcilerError::Shutdown`] if the event loop has stopped.
    pub async fn submit_synthetic_order(
        &self,
        side: Side,
    ) -> Result<SubmissionReceipt, ReconcilerError> {
        let (reply, rx) = oneshot::channel();
        self.send(ReconcilerCommand::SubmitSynthetic { side, reply })
            .await?;
        rx.await.map_err(|_| ReconcilerError::Shutdown)
    }

    /// Copies out the current book, including optimistic orders still
    /// pending.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcilerError::Shutdown`] if the event loop has stopped.
    pub async fn book(&self) -> Result<OrderBookSnapshot, ReconcilerError> {
        let (reply, rx) = oneshot::channel();
        self.send(ReconcilerCommand::ReadBook { reply }).await?;
        rx.await.map_err(|_| ReconcilerError::Shutdown)
    }

    async fn send(&self, command: ReconcilerCommand) -> Result<(), ReconcilerError> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| ReconcilerError::Shutdown)
    }
}

/// Handle to a spawned reconciler task.
pub struct ReconcilerTask {
    handle: tokio::task::JoinHandle<()>,
}

impl ReconcilerTask {
    /// Stops the event loop without waiting for pending submissions.
    ///
    /// Handles still alive afterwards get [`ReconcilerError::Shutdown`].
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Waits for the reconciler to shut down.
    pub async fn wait(self) -> Result<(), tokio::task::JoinError> {
        self.handle.await
    }
}

/// Returns the current time in nanoseconds since the Unix epoch.
#[inline]
fn nanos_since_epoch() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
