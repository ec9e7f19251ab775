//! Collision listener callbacks
//!
//! Colliders never own their listener. A [`ListenerHandle`] is a weak
//! back-reference to the game object that wants to hear about contacts, so
//! dropping that object silently disables its callbacks.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::{CircleCollider, Collider};

/// Receives collision notifications from colliders
pub trait CollisionListener {
    /// `this` (a collider carrying this listener) overlaps `other`
    fn on_collision(&mut self, this: &Collider, other: &Collider);

    /// `circle` was pushed out of `other` to correct a penetration
    fn on_resolution(&mut self, circle: &CircleCollider, other: &Collider) {
        let _ = (circle, other);
    }
}

/// Non-owning reference to a [`CollisionListener`]
#[derive(Clone)]
pub struct ListenerHandle(Weak<RefCell<dyn CollisionListener>>);

impl ListenerHandle {
    /// Create a handle that does not extend the listener's lifetime
    pub fn new<L: CollisionListener + 'static>(listener: &Rc<RefCell<L>>) -> Self {
        let shared: Rc<RefCell<dyn CollisionListener>> = listener.clone();
        Self(Rc::downgrade(&shared))
    }

    /// Wrap an existing weak reference
    pub fn from_weak(listener: Weak<RefCell<dyn CollisionListener>>) -> Self {
        Self(listener)
    }

    /// True while the listener's owner is still alive
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// True if both handles refer to the same listener
    pub fn ptr_eq(&self, other: &ListenerHandle) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }

    /// Run `f` against the listener if it is alive and not already borrowed
    ///
    /// Returns whether `f` ran. A listener that is mid-callback (for example
    /// one that triggered a nested collision test) is skipped.
    pub(crate) fn notify(&self, f: impl FnOnce(&mut dyn CollisionListener)) -> bool {
        let Some(listener) = self.0.upgrade() else {
            return false;
        };
        let result = match listener.try_borrow_mut() {
            Ok(mut guard) => {
                f(&mut *guard);
                true
            }
            Err(_) => {
                log::warn!("collision listener already borrowed, skipping callback");
                false
            }
        };
        result
    }
}

impl fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}
