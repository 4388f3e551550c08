// SPDX-License-Identifier: MPL-2.0
//! Notice lifecycle management.
//!
//! The [`NotificationCenter`] owns the queue, the bound surface and the run
//! state. It shows one notice at a time: render, animate in, dwell, wait for
//! activity if asked to, animate out, settle, then move on to the next.
//!
//! All state lives behind one mutex and is only touched from notifier calls,
//! timer tasks and activity callbacks, so the run loop behaves as if it were
//! single-threaded. Timers are Tokio tasks; each carries a generation and is
//! ignored once superseded, even if it already woke up.

use super::activity::{ActivityHub, ActivityKind, ActivitySource, Listener, ListenerId};
use super::animation::{Fade, Stage, Strategy};
use super::notice::{Content, Notice, Severity};
use super::queue::Queue;
use crate::config::{Config, SharedConfig};
use crate::surface::{class, Surface};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

const EVENT_CAPACITY: usize = 64;

/// Lifecycle events, for observers and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A notice was rendered and started animating in.
    Shown(Notice),
    /// A notice finished animating out. Not sent for notices interrupted by
    /// a forced restart.
    Hidden(Notice),
    /// The queue is drained and nothing is on screen.
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Animating in, dwelling, or waiting for activity.
    Showing,
    /// Animating out or settling.
    Exiting,
}

/// Point-in-time view of the run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunState {
    pub phase: Phase,
    pub listeners_attached: bool,
    pub dwell_pending: bool,
}

impl RunState {
    /// True from the start of an enter animation until the settle delay after
    /// its exit has elapsed.
    #[must_use]
    pub fn animation_in_progress(&self) -> bool {
        self.phase != Phase::Idle
    }
}

/// One cancellable task slot.
#[derive(Debug, Default)]
struct Timer {
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl Timer {
    fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Cancels whatever is running and returns the generation for its successor.
    fn rearm(&mut self) -> u64 {
        self.cancel();
        self.generation
    }

    fn start(&mut self, handle: JoinHandle<()>) {
        self.handle = Some(handle);
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Called by the task itself when it fires.
    fn finish(&mut self, generation: u64) -> bool {
        if self.is_current(generation) {
            self.handle = None;
            true
        } else {
            false
        }
    }

    fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

struct Binding {
    surface: Box<dyn Surface>,
    strategy: Strategy,
}

#[derive(Default)]
struct Inner {
    queue: Queue,
    phase: Phase,
    current: Option<Notice>,
    binding: Option<Binding>,
    listeners: Vec<(ActivityKind, ListenerId)>,
    dwell: Timer,
    animation: Timer,
    closed: bool,
}

struct Shared {
    inner: Mutex<Inner>,
    config: SharedConfig,
    activity: Arc<dyn ActivitySource>,
    runtime: Handle,
    events: broadcast::Sender<Event>,
    busy: watch::Sender<bool>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: Event) {
        // No receivers is fine.
        let _ = self.events.send(event);
    }

    fn mark_idle(&self) {
        let changed = self.busy.send_if_modified(|busy| std::mem::replace(busy, false));
        if changed {
            tracing::debug!("notification center idle");
            self.emit(Event::Idle);
        }
    }

    fn tick(self: &Arc<Self>) {
        let mut inner = self.lock();
        self.tick_locked(&mut inner);
    }

    fn tick_locked(self: &Arc<Self>, inner: &mut Inner) {
        if inner.closed || inner.binding.is_none() {
            return;
        }
        let config = self.config.get();
        let busy = inner.phase != Phase::Idle;
        if busy && !config.force_restart_on_busy {
            return;
        }

        if inner.queue.is_empty() {
            self.dismiss_locked(inner);
            if inner.phase == Phase::Idle {
                self.mark_idle();
            }
            return;
        }

        if busy {
            // Forced restart: whatever the live notice was doing is dropped.
            inner.animation.cancel();
            if let Some(interrupted) = inner.current.take() {
                tracing::debug!(id = ?interrupted.id(), "notice interrupted");
            }
        }
        inner.phase = Phase::Showing;
        self.busy.send_replace(true);
        self.start_dwell(inner, config.dwell_timeout());

        let Some(notice) = inner.queue.pop() else {
            return;
        };
        let Some(binding) = inner.binding.as_mut() else {
            return;
        };
        binding.surface.set_content(notice.content());
        let strategy = binding.strategy;

        tracing::debug!(
            id = ?notice.id(),
            severity = %notice.severity(),
            queued = inner.queue.len(),
            "showing notice"
        );

        let generation = inner.animation.rearm();
        let stage = SurfaceStage::new(self, generation);
        let severity = notice.severity().clone();
        let fade = Fade::from_config(&config);
        inner.animation.start(self.runtime.spawn(async move {
            strategy.enter(&stage, &severity, busy, fade).await;
        }));

        inner.current = Some(notice.clone());
        self.emit(Event::Shown(notice));
    }

    fn start_dwell(self: &Arc<Self>, inner: &mut Inner, dwell: Duration) {
        let generation = inner.dwell.rearm();
        let weak = Arc::downgrade(self);
        inner.dwell.start(self.runtime.spawn(async move {
            tokio::time::sleep(dwell).await;
            if let Some(shared) = weak.upgrade() {
                shared.on_dwell_elapsed(generation);
            }
        }));
    }

    fn on_dwell_elapsed(self: &Arc<Self>, generation: u64) {
        let mut inner = self.lock();
        if !inner.dwell.finish(generation) || inner.closed {
            return;
        }
        tracing::trace!("dwell elapsed");
        if !inner.listeners.is_empty() {
            return;
        }
        if self.config.get().wait_for_activity {
            self.attach_listeners(&mut inner);
        } else {
            self.dismiss_locked(&mut inner);
        }
    }

    fn attach_listeners(self: &Arc<Self>, inner: &mut Inner) {
        let weak = Arc::downgrade(self);
        let listener: Listener = Arc::new(move |kind: ActivityKind| {
            if let Some(shared) = weak.upgrade() {
                shared.on_activity(kind);
            }
        });
        for kind in ActivityKind::ALL {
            let id = self.activity.subscribe(kind, Arc::clone(&listener));
            inner.listeners.push((kind, id));
        }
        tracing::trace!("waiting for activity");
    }

    fn detach_listeners(&self, inner: &mut Inner) {
        for (kind, id) in inner.listeners.drain(..) {
            self.activity.unsubscribe(kind, id);
        }
    }

    fn on_activity(self: &Arc<Self>, kind: ActivityKind) {
        let mut inner = self.lock();
        if inner.listeners.is_empty() {
            return;
        }
        tracing::debug!(%kind, "activity observed");
        self.dismiss_locked(&mut inner);
    }

    /// Drops activity listeners and starts the exit of a showing notice.
    fn dismiss_locked(self: &Arc<Self>, inner: &mut Inner) {
        self.detach_listeners(inner);
        if inner.phase == Phase::Showing {
            self.begin_exit(inner);
        }
    }

    fn begin_exit(self: &Arc<Self>, inner: &mut Inner) {
        let Some(strategy) = inner.binding.as_ref().map(|binding| binding.strategy) else {
            return;
        };
        inner.phase = Phase::Exiting;
        inner.dwell.cancel();

        let generation = inner.animation.rearm();
        let stage = SurfaceStage::new(self, generation);
        let fade = Fade::from_config(&self.config.get());
        let weak = Arc::downgrade(self);
        tracing::trace!(?strategy, "exit started");

        inner.animation.start(self.runtime.spawn(async move {
            if !strategy.exit(&stage, fade).await {
                return;
            }
            let Some(settle) = weak
                .upgrade()
                .and_then(|shared| shared.on_exit_complete(generation))
            else {
                return;
            };
            tokio::time::sleep(settle).await;
            if let Some(shared) = weak.upgrade() {
                shared.on_settled(generation);
            }
        }));
    }

    /// Returns the settle delay to wait, or `None` if superseded.
    fn on_exit_complete(&self, generation: u64) -> Option<Duration> {
        let inner = self.lock();
        if inner.closed || !inner.animation.is_current(generation) {
            return None;
        }
        if let Some(notice) = inner.current.clone() {
            tracing::debug!(id = ?notice.id(), "notice hidden");
            self.emit(Event::Hidden(notice));
        }
        Some(self.config.get().settle_delay())
    }

    fn on_settled(self: &Arc<Self>, generation: u64) {
        let mut inner = self.lock();
        if !inner.animation.finish(generation) || inner.closed {
            return;
        }
        inner.phase = Phase::Idle;
        inner.current = None;
        self.tick_locked(&mut inner);
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        let inner = self.inner.get_mut().unwrap_or_else(PoisonError::into_inner);
        for (kind, id) in inner.listeners.drain(..) {
            self.activity.unsubscribe(kind, id);
        }
        inner.dwell.cancel();
        inner.animation.cancel();
    }
}

/// Surface access for one animation generation.
struct SurfaceStage {
    shared: Weak<Shared>,
    generation: u64,
}

impl SurfaceStage {
    fn new(shared: &Arc<Shared>, generation: u64) -> Self {
        Self {
            shared: Arc::downgrade(shared),
            generation,
        }
    }
}

impl Stage for SurfaceStage {
    fn with_surface(&self, f: &mut dyn FnMut(&mut dyn Surface)) -> bool {
        let Some(shared) = self.shared.upgrade() else {
            return false;
        };
        let mut inner = shared.lock();
        if inner.closed || !inner.animation.is_current(self.generation) {
            return false;
        }
        match inner.binding.as_mut() {
            Some(binding) => {
                f(binding.surface.as_mut());
                true
            }
            None => false,
        }
    }
}

/// Builder for a [`NotificationCenter`].
#[derive(Default)]
pub struct Builder {
    config: SharedConfig,
    activity: Option<Arc<dyn ActivitySource>>,
    runtime: Option<Handle>,
}

impl Builder {
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = SharedConfig::new(config);
        self
    }

    /// Shares a configuration handle with the embedding application.
    #[must_use]
    pub fn shared_config(mut self, config: SharedConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn activity(mut self, source: impl ActivitySource + 'static) -> Self {
        let source: Arc<dyn ActivitySource> = Arc::new(source);
        self.activity = Some(source);
        self
    }

    /// Runtime timers are spawned on. Defaults to the current one.
    #[must_use]
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// # Panics
    ///
    /// Panics if no runtime was given and this is called outside a Tokio
    /// runtime.
    #[must_use]
    pub fn build(self) -> NotificationCenter {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let (busy, _) = watch::channel(false);
        NotificationCenter {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner::default()),
                config: self.config,
                activity: self
                    .activity
                    .unwrap_or_else(|| Arc::new(ActivityHub::new()) as Arc<dyn ActivitySource>),
                runtime: self.runtime.unwrap_or_else(Handle::current),
                events,
                busy,
            }),
        }
    }
}

/// Queued, animated notifier bound to one surface.
///
/// Cheap to clone; every clone drives the same queue. Dropping the last
/// clone releases timers and activity listeners.
#[derive(Clone)]
pub struct NotificationCenter {
    shared: Arc<Shared>,
}

impl NotificationCenter {
    /// Creates a center with default configuration on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    #[must_use]
    pub fn new(activity: impl ActivitySource + 'static) -> Self {
        Self::builder().activity(activity).build()
    }

    #[must_use]
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Binds the surface notices render into. This is the host's ready
    /// signal: anything queued before it starts showing now.
    ///
    /// Only the first surface is kept; later calls return `false`.
    pub fn attach(&self, surface: impl Surface + 'static) -> bool {
        let mut inner = self.shared.lock();
        if inner.binding.is_some() {
            tracing::warn!("notification surface already attached, ignoring");
            return false;
        }

        let mut surface: Box<dyn Surface> = Box::new(surface);
        let strategy = Strategy::select(self.shared.config.get().animation, surface.as_ref());
        surface.set_id(class::BASE);
        surface.set_class_name(class::BASE);
        if strategy == Strategy::Manual {
            surface.set_opacity(0.0);
        }
        inner.binding = Some(Binding { surface, strategy });
        tracing::debug!(?strategy, queued = inner.queue.len(), "notification surface attached");

        self.shared.tick_locked(&mut inner);
        true
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.shared.lock().binding.is_some()
    }

    /// Strategy chosen when the surface was attached.
    #[must_use]
    pub fn strategy(&self) -> Option<Strategy> {
        self.shared.lock().binding.as_ref().map(|binding| binding.strategy)
    }

    /// Queues a notice and runs the loop.
    pub fn push(&self, severity: Severity, content: impl Into<Content>) {
        self.enqueue(Notice::new(severity, content));
    }

    pub fn enqueue(&self, notice: Notice) {
        let mut inner = self.shared.lock();
        tracing::trace!(id = ?notice.id(), severity = %notice.severity(), "notice queued");
        inner.queue.push(notice);
        self.shared.tick_locked(&mut inner);
    }

    /// Same as [`log`](Self::log).
    pub fn notify(&self, content: impl Into<Content>) {
        self.log(content);
    }

    pub fn log(&self, content: impl Into<Content>) {
        self.push(Severity::Log, content);
    }

    pub fn error(&self, content: impl Into<Content>) {
        self.push(Severity::Error, content);
    }

    pub fn info(&self, content: impl Into<Content>) {
        self.push(Severity::Info, content);
    }

    pub fn success(&self, content: impl Into<Content>) {
        self.push(Severity::Success, content);
    }

    /// Advances the run loop.
    ///
    /// A no-op while a notice is live, unless `force_restart_on_busy` is set.
    pub fn tick(&self) {
        self.shared.tick();
    }

    /// Live configuration; changes apply the next time a value is needed.
    #[must_use]
    pub fn config(&self) -> &SharedConfig {
        &self.shared.config
    }

    #[must_use]
    pub fn run_state(&self) -> RunState {
        let inner = self.shared.lock();
        RunState {
            phase: inner.phase,
            listeners_attached: !inner.listeners.is_empty(),
            dwell_pending: inner.dwell.is_pending(),
        }
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.shared.lock().queue.len()
    }

    /// Pending notices, next first.
    #[must_use]
    pub fn pending(&self) -> Vec<Notice> {
        self.shared.lock().queue.iter().cloned().collect()
    }

    /// The live notice, if any.
    #[must_use]
    pub fn current(&self) -> Option<Notice> {
        self.shared.lock().current.clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.shared.events.subscribe()
    }

    /// Resolves once nothing is live.
    ///
    /// Notices queued before a surface is attached do not count.
    pub async fn wait_idle(&self) {
        let mut busy = self.shared.busy.subscribe();
        // The sender lives as long as `self`.
        let _ = busy.wait_for(|busy| !*busy).await;
    }

    /// Stops the loop: detaches activity listeners and cancels all timers.
    ///
    /// The element keeps whatever it showed last. Notices pushed afterwards
    /// are queued but never shown.
    pub fn shutdown(&self) {
        let mut inner = self.shared.lock();
        if inner.closed {
            return;
        }
        inner.closed = true;
        self.shared.detach_listeners(&mut inner);
        inner.dwell.cancel();
        inner.animation.cancel();
        inner.phase = Phase::Idle;
        inner.current = None;
        tracing::debug!(dropped = inner.queue.len(), "notification center shut down");
        drop(inner);
        self.shared.mark_idle();
    }
}

impl fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.shared.lock();
        f.debug_struct("NotificationCenter")
            .field("phase", &inner.phase)
            .field("queued", &inner.queue.len())
            .field("attached", &inner.binding.is_some())
            .finish_non_exhaustive()
    }
}
