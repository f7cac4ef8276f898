use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use crate::animation::{timeline::TweenHandle, tween::Tweenable};

pub(crate) struct AnimCell<T> {
    pub(crate) value: Cell<T>,
    pub(crate) active: RefCell<Option<TweenHandle>>,
}

/// An animatable property value.
///
/// The owner reads it every frame; a [`crate::Timeline`] writes it while a tween is running.
/// The timeline only holds a weak reference, so dropping the owner orphans (and silently
/// discards) any tween still targeting it. At most one tween drives a property at a time.
pub struct Anim<T: Tweenable> {
    cell: Rc<AnimCell<T>>,
}

impl<T: Tweenable> Anim<T> {
    /// New property holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            cell: Rc::new(AnimCell {
                value: Cell::new(value),
                active: RefCell::new(None),
            }),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.cell.value.get()
    }

    /// Set the value immediately, superseding any running tween.
    pub fn set(&self, value: T) {
        self.cancel();
        self.cell.value.set(value);
    }

    /// Whether a tween currently drives this property.
    pub fn is_animating(&self) -> bool {
        self.cell
            .active
            .borrow()
            .as_ref()
            .is_some_and(TweenHandle::is_active)
    }

    /// Handle of the running tween, if any.
    pub fn active_tween(&self) -> Option<TweenHandle> {
        self.cell
            .active
            .borrow()
            .as_ref()
            .filter(|h| h.is_active())
            .cloned()
    }

    /// Cancel the running tween, leaving the value where it currently is.
    pub fn cancel(&self) -> bool {
        let prev = self.cell.active.borrow_mut().take();
        prev.is_some_and(|h| h.cancel())
    }

    pub(crate) fn downgrade(&self) -> Weak<AnimCell<T>> {
        Rc::downgrade(&self.cell)
    }

    /// Rebuild a property handle from a weak reference, if the owner is still alive.
    pub(crate) fn upgrade(cell: &Weak<AnimCell<T>>) -> Option<Self> {
        cell.upgrade().map(|cell| Self { cell })
    }

    /// Record `handle` as the driving tween, returning the one it replaces.
    pub(crate) fn attach(&self, handle: TweenHandle) -> Option<TweenHandle> {
        self.cell.active.replace(Some(handle))
    }
}

impl<T: Tweenable + Default> Default for Anim<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Tweenable + fmt::Debug> fmt::Debug for Anim<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Anim")
            .field("value", &self.get())
            .field("animating", &self.is_animating())
            .finish()
    }
}
