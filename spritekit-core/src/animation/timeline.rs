use std::{
    cell::RefCell,
    collections::HashSet,
    fmt,
    rc::{Rc, Weak},
};

use crate::animation::{
    anim::{Anim, AnimCell},
    ease::Ease,
    tween::Tweenable,
};

/// Identifier of a scheduled tween.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TweenId(u64);

/// Timing parameters of a transition, in seconds.
///
/// A non-positive (or NaN) `duration` selects the instant path: the value is applied
/// synchronously and nothing is scheduled.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TweenOpts {
    /// Length of the interpolation.
    pub duration: f64,
    /// Wait before the interpolation starts.
    pub delay: f64,
    /// Curve applied to normalized progress.
    pub ease: Ease,
}

impl Default for TweenOpts {
    fn default() -> Self {
        Self {
            duration: 0.0,
            delay: 0.0,
            ease: Ease::FALLBACK,
        }
    }
}

impl TweenOpts {
    /// Options for a `duration`-second transition with the default curve and no delay.
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    /// Options for an instant, unscheduled change.
    pub fn instant() -> Self {
        Self::default()
    }

    /// Set the start delay.
    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Set the easing curve.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Whether these options take the instant path.
    pub fn is_instant(&self) -> bool {
        !(self.duration > 0.0)
    }
}

trait Driver {
    /// Capture the start value when the tween begins.
    fn begin(&mut self);
    /// Write the interpolated value. `false` when the target property no longer exists.
    fn apply(&mut self, eased: f64) -> bool;
    /// Detach from the target property if `id` still drives it.
    fn release(&self, id: TweenId);
}

struct PropertyDriver<T: Tweenable> {
    target: Weak<AnimCell<T>>,
    from: Option<T>,
    to: T,
}

impl<T: Tweenable> Driver for PropertyDriver<T> {
    fn begin(&mut self) {
        if self.from.is_none()
            && let Some(cell) = self.target.upgrade()
        {
            self.from = Some(cell.value.get());
        }
    }

    fn apply(&mut self, eased: f64) -> bool {
        let Some(cell) = self.target.upgrade() else {
            return false;
        };
        let from = self.from.unwrap_or(self.to);
        let value = if eased >= 1.0 {
            self.to
        } else {
            T::lerp(from, self.to, eased)
        };
        cell.value.set(value);
        true
    }

    fn release(&self, id: TweenId) {
        let Some(cell) = self.target.upgrade() else {
            return;
        };
        let mut active = cell.active.borrow_mut();
        if active.as_ref().and_then(TweenHandle::id) == Some(id) {
            *active = None;
        }
    }
}

enum Advance {
    Waiting,
    Running,
    Finished,
    Orphaned,
}

struct TweenEntry {
    id: TweenId,
    start: f64,
    opts: TweenOpts,
    started: bool,
    driver: Box<dyn Driver>,
    on_update: Option<Box<dyn FnMut()>>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl TweenEntry {
    fn advance(&mut self, now: f64) -> Advance {
        let elapsed = now - self.start - self.opts.delay.max(0.0);
        if elapsed < 0.0 {
            return Advance::Waiting;
        }
        if !self.started {
            self.started = true;
            self.driver.begin();
        }

        let progress = (elapsed / self.opts.duration).clamp(0.0, 1.0);
        let eased = if progress >= 1.0 {
            1.0
        } else {
            self.opts.ease.apply(progress)
        };
        if !self.driver.apply(eased) {
            return Advance::Orphaned;
        }
        if let Some(f) = self.on_update.as_mut() {
            f();
        }

        if progress >= 1.0 {
            Advance::Finished
        } else {
            Advance::Running
        }
    }

    fn attach(&mut self, hook: Hook) {
        match hook {
            Hook::Update(f) => self.on_update = Some(f),
            Hook::Complete(f) => self.on_complete = Some(f),
        }
    }
}

enum Hook {
    Update(Box<dyn FnMut()>),
    Complete(Box<dyn FnOnce()>),
}

#[derive(Default)]
struct TimelineState {
    now: f64,
    next_id: u64,
    tweens: Vec<TweenEntry>,

    // Bookkeeping for the tweens taken out of `tweens` while `step_to` runs callbacks.
    // Finished tweens stay `in_flight` until their completion has been dispatched.
    stepping: bool,
    completing: bool,
    in_flight: HashSet<TweenId>,
    cancelled: HashSet<TweenId>,
    deferred_hooks: Vec<(TweenId, Hook)>,
}

impl TimelineState {
    fn is_active(&self, id: TweenId) -> bool {
        self.tweens.iter().any(|e| e.id == id)
            || (self.in_flight.contains(&id) && !self.cancelled.contains(&id))
    }

    fn attach(&mut self, id: TweenId, hook: Hook) -> bool {
        if let Some(entry) = self.tweens.iter_mut().find(|e| e.id == id) {
            entry.attach(hook);
            return true;
        }
        if !self.completing && self.in_flight.contains(&id) && !self.cancelled.contains(&id) {
            self.deferred_hooks.push((id, hook));
            return true;
        }
        false
    }
}

/// Shared time authority for a set of tweens.
///
/// `Timeline` is a cheap handle: clones share the same schedule. It is single-threaded and
/// driven by the host calling [`Timeline::step_to`] (or [`Timeline::step`]) once per frame.
/// Completion callbacks run after the step has been applied and may schedule further tweens;
/// that is the only sequencing primitive.
#[derive(Clone, Default)]
pub struct Timeline {
    state: Rc<RefCell<TimelineState>>,
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let st = self.state.borrow();
        f.debug_struct("Timeline")
            .field("now", &st.now)
            .field("active", &st.tweens.len())
            .finish()
    }
}

impl Timeline {
    /// Empty timeline at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time in seconds.
    pub fn now(&self) -> f64 {
        self.state.borrow().now
    }

    /// Number of scheduled tweens, including ones still waiting out their delay.
    pub fn active_count(&self) -> usize {
        let st = self.state.borrow();
        st.tweens.len() + st.in_flight.len().saturating_sub(st.cancelled.len())
    }

    /// Whether nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Schedule a tween of `target` towards `to`.
    ///
    /// The start value is `from`, or the property's value when the tween begins (after its
    /// delay). Any tween already driving `target` is superseded without firing its completion.
    /// Instant options set the value right away and return an inert handle.
    pub fn schedule<T: Tweenable>(
        &self,
        target: &Anim<T>,
        from: Option<T>,
        to: T,
        opts: TweenOpts,
    ) -> TweenHandle {
        if opts.is_instant() {
            target.set(to);
            return TweenHandle::inert();
        }

        let id = {
            let mut st = self.state.borrow_mut();
            st.next_id += 1;
            let id = TweenId(st.next_id);
            let start = st.now;
            st.tweens.push(TweenEntry {
                id,
                start,
                opts,
                started: false,
                driver: Box::new(PropertyDriver {
                    target: target.downgrade(),
                    from,
                    to,
                }),
                on_update: None,
                on_complete: None,
            });
            id
        };

        let handle = TweenHandle {
            id: Some(id),
            timeline: Rc::downgrade(&self.state),
        };
        if let Some(prev) = target.attach(handle.clone())
            && prev.cancel()
        {
            tracing::trace!(?id, "tween superseded a running tween");
        }
        tracing::trace!(?id, duration = opts.duration, delay = opts.delay, "tween scheduled");
        handle
    }

    /// Advance by `dt` seconds.
    pub fn step(&self, dt: f64) {
        let now = self.now() + dt.max(0.0);
        self.step_to(now);
    }

    /// Advance every tween to absolute time `now`.
    ///
    /// Re-entrant calls from inside a tween callback (update or completion) are ignored.
    pub fn step_to(&self, now: f64) {
        let batch = {
            let mut st = self.state.borrow_mut();
            if st.stepping {
                tracing::warn!("Timeline::step_to called from a tween callback; ignored");
                return;
            }
            st.now = now;
            st.stepping = true;
            let batch = std::mem::take(&mut st.tweens);
            st.in_flight = batch.iter().map(|e| e.id).collect();
            batch
        };

        let mut kept = Vec::with_capacity(batch.len());
        let mut finished = Vec::new();
        for mut entry in batch {
            if self.state.borrow().cancelled.contains(&entry.id) {
                entry.driver.release(entry.id);
                continue;
            }
            match entry.advance(now) {
                Advance::Waiting | Advance::Running => kept.push(entry),
                Advance::Finished => finished.push(entry),
                Advance::Orphaned => {
                    tracing::trace!(id = ?entry.id, "tween target dropped; discarding");
                    self.state.borrow_mut().in_flight.remove(&entry.id);
                }
            }
        }

        {
            let mut st = self.state.borrow_mut();
            st.completing = true;
            st.in_flight = finished.iter().map(|e| e.id).collect();
            let cancelled = std::mem::take(&mut st.cancelled);
            let (mut kept, dropped): (Vec<_>, Vec<_>) =
                kept.into_iter().partition(|e| !cancelled.contains(&e.id));
            for entry in &dropped {
                entry.driver.release(entry.id);
            }
            // Cancellations of finished tweens are honoured at dispatch.
            st.cancelled = finished
                .iter()
                .map(|e| e.id)
                .filter(|id| cancelled.contains(id))
                .collect();
            for (id, hook) in std::mem::take(&mut st.deferred_hooks) {
                if let Some(e) = kept
                    .iter_mut()
                    .chain(finished.iter_mut())
                    .find(|e| e.id == id)
                {
                    e.attach(hook);
                }
            }
            kept.append(&mut st.tweens);
            st.tweens = kept;
            if !dropped.is_empty() {
                tracing::trace!(count = dropped.len(), "dropped tweens cancelled mid-step");
            }
        }

        for mut entry in finished {
            let cancelled = {
                let mut st = self.state.borrow_mut();
                st.in_flight.remove(&entry.id);
                st.cancelled.remove(&entry.id)
            };
            entry.driver.release(entry.id);
            if cancelled {
                tracing::trace!(id = ?entry.id, "finished tween cancelled before completion");
                continue;
            }
            tracing::trace!(id = ?entry.id, "tween complete");
            if let Some(f) = entry.on_complete.take() {
                f();
            }
        }

        let mut st = self.state.borrow_mut();
        st.stepping = false;
        st.completing = false;
        st.in_flight.clear();
        st.cancelled.clear();
    }

    /// Cancel the tween behind `handle`. Its completion callback never fires.
    pub fn cancel(&self, handle: &TweenHandle) -> bool {
        handle.id.is_some_and(|id| cancel_id(&self.state, id))
    }

    /// Cancel everything.
    pub fn clear(&self) {
        let drained = {
            let mut st = self.state.borrow_mut();
            let ids: Vec<TweenId> = st.in_flight.iter().copied().collect();
            st.cancelled.extend(ids);
            std::mem::take(&mut st.tweens)
        };
        for entry in drained {
            entry.driver.release(entry.id);
        }
    }
}

fn cancel_id(state: &Rc<RefCell<TimelineState>>, id: TweenId) -> bool {
    let removed = {
        let mut st = state.borrow_mut();
        if let Some(pos) = st.tweens.iter().position(|e| e.id == id) {
            Some(st.tweens.remove(pos))
        } else if st.in_flight.contains(&id) && !st.cancelled.contains(&id) {
            // Released when the running step merges its batch.
            st.cancelled.insert(id);
            return true;
        } else {
            None
        }
    };
    match removed {
        Some(entry) => {
            entry.driver.release(id);
            tracing::trace!(?id, "tween cancelled");
            true
        }
        None => false,
    }
}

/// Caller-side token for a scheduled tween.
///
/// Valid until the tween completes, is cancelled, or is superseded; afterwards every method is
/// a no-op. Handles returned by instant (unscheduled) transitions are inert from the start.
#[derive(Clone, Debug)]
pub struct TweenHandle {
    id: Option<TweenId>,
    timeline: Weak<RefCell<TimelineState>>,
}

impl TweenHandle {
    /// A handle that refers to nothing.
    pub fn inert() -> Self {
        Self {
            id: None,
            timeline: Weak::new(),
        }
    }

    /// Scheduled tween id; `None` for inert handles.
    pub fn id(&self) -> Option<TweenId> {
        self.id
    }

    /// Whether the tween is still scheduled.
    pub fn is_active(&self) -> bool {
        match (self.id, self.timeline.upgrade()) {
            (Some(id), Some(state)) => state.borrow().is_active(id),
            _ => false,
        }
    }

    /// Run `f` once when the tween reaches its target. Replaces a previous completion callback.
    ///
    /// Dropped without running if the tween is no longer scheduled.
    pub fn on_complete(self, f: impl FnOnce() + 'static) -> Self {
        self.hook(Hook::Complete(Box::new(f)));
        self
    }

    /// Run `f` after every applied step, including the final one.
    pub fn on_update(self, f: impl FnMut() + 'static) -> Self {
        self.hook(Hook::Update(Box::new(f)));
        self
    }

    /// Cancel the tween, leaving the property at its current value.
    pub fn cancel(&self) -> bool {
        match (self.id, self.timeline.upgrade()) {
            (Some(id), Some(state)) => cancel_id(&state, id),
            _ => false,
        }
    }

    fn hook(&self, hook: Hook) {
        let attached = match (self.id, self.timeline.upgrade()) {
            (Some(id), Some(state)) => state.borrow_mut().attach(id, hook),
            _ => false,
        };
        if !attached {
            tracing::trace!(id = ?self.id, "tween not scheduled; callback dropped");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
