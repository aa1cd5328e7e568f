#![forbid(unsafe_code)]

//! Screen-wide pointer-down broadcast.
//!
//! Widgets that close on outside clicks need to see every press, not only
//! the ones the host routes to them. The host owns one [`PointerHub`] and
//! dispatches each pointer-down into it; every live [`PointerSubscription`]
//! receives a copy in its own queue and drains it on its next update.
//!
//! Dropping a subscription detaches it from the hub, so a widget that goes
//! away on any path leaves no listener behind.
//!
//! The hub is single-threaded (`Rc`), matching the widget tree it serves.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use seekbox_render::frame::{HitData, HitId, HitRegion};

/// A pointer press with its hit-test result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerDown {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
    /// Hit-grid owner of the pressed cell, if any.
    pub hit: Option<(HitId, HitRegion, HitData)>,
}

impl PointerDown {
    /// Create a pointer-down record.
    pub const fn new(x: u16, y: u16, hit: Option<(HitId, HitRegion, HitData)>) -> Self {
        Self { x, y, hit }
    }

    /// Whether the press landed on a cell owned by `id`.
    pub fn hits(&self, id: HitId) -> bool {
        matches!(self.hit, Some((owner, _, _)) if owner == id)
    }
}

type Queue = Rc<RefCell<VecDeque<PointerDown>>>;

#[derive(Debug, Default)]
struct HubInner {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, Queue)>>,
}

/// Host-owned registry of pointer-down listeners. Cloning shares the registry.
#[derive(Debug, Clone, Default)]
pub struct PointerHub {
    inner: Rc<HubInner>,
}

impl PointerHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a new listener.
    pub fn subscribe(&self) -> PointerSubscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id.wrapping_add(1));
        let queue: Queue = Rc::default();
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::clone(&queue)));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            listener = id,
            total = self.listener_count(),
            "pointer listener attached"
        );

        PointerSubscription {
            id,
            hub: Rc::downgrade(&self.inner),
            queue,
        }
    }

    /// Deliver `event` to every attached listener.
    pub fn dispatch(&self, event: PointerDown) {
        for (_, queue) in self.inner.listeners.borrow().iter() {
            queue.borrow_mut().push_back(event);
        }
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

/// A listener's handle. Dropping it detaches from the hub.
#[derive(Debug)]
pub struct PointerSubscription {
    id: u64,
    hub: Weak<HubInner>,
    queue: Queue,
}

impl PointerSubscription {
    /// Take every event delivered since the last drain, oldest first.
    pub fn drain(&self) -> Vec<PointerDown> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// Whether the hub is still alive.
    pub fn is_attached(&self) -> bool {
        self.hub.strong_count() > 0
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.listeners.borrow_mut().retain(|(id, _)| *id != self.id);

            #[cfg(feature = "tracing")]
            tracing::debug!(listener = self.id, "pointer listener detached");
        }
    }
}
