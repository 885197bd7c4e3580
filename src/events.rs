use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use strum::{Display as StrumDisplay, EnumIter, EnumString};

use crate::error::RotationError;
use crate::state::PlayState;

/// Names under which listeners can be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, StrumDisplay)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EventKind {
    Load,
    BeforePlay,
    BeforeStop,
    BeforeRotate,
    Rotate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationEvent {
    Load,
    BeforePlay,
    BeforeStop,
    BeforeRotate { prev: usize, next: usize },
    Rotate { prev: usize, next: usize },
}

impl RotationEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            RotationEvent::Load => EventKind::Load,
            RotationEvent::BeforePlay => EventKind::BeforePlay,
            RotationEvent::BeforeStop => EventKind::BeforeStop,
            RotationEvent::BeforeRotate { .. } => EventKind::BeforeRotate,
            RotationEvent::Rotate { .. } => EventKind::Rotate,
        }
    }
}

/// Read-only view of a controller handed to every listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub current_index: usize,
    pub pane_count: usize,
    pub play_state: PlayState,
    pub in_transition: bool,
}

pub type Listener = Rc<dyn Fn(&RotationEvent, &Snapshot) -> anyhow::Result<()>>;

/// Wraps a closure into a [`Listener`].
pub fn listener<F>(f: F) -> Listener
where
    F: Fn(&RotationEvent, &Snapshot) -> anyhow::Result<()> + 'static,
{
    Rc::new(f)
}

/// Identity of one registration. Registering the same callback twice yields two ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Registration {
    id: ListenerId,
    callback: Listener,
}

/// Listeners supplied up front through the options, registered in order.
#[derive(Clone, Default)]
pub struct Listeners(pub Vec<(EventKind, Listener)>);

impl Listeners {
    pub fn with(mut self, kind: EventKind, callback: Listener) -> Self {
        self.0.push((kind, callback));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter().map(|(kind, _)| kind)).finish()
    }
}

#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<EventKind, Vec<Registration>>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, kind: EventKind, callback: Listener) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners
            .entry(kind)
            .or_default()
            .push(Registration { id, callback });
        id
    }

    /// Drops the registration with the given identity. Unknown kinds or ids are ignored.
    pub fn remove_listener(&mut self, kind: EventKind, id: ListenerId) {
        if let Some(registrations) = self.listeners.get_mut(&kind) {
            registrations.retain(|r| r.id != id);
        }
    }

    /// Drops every registration of `callback` (same allocation) under `kind`.
    pub fn remove_callback(&mut self, kind: EventKind, callback: &Listener) {
        if let Some(registrations) = self.listeners.get_mut(&kind) {
            registrations.retain(|r| !Rc::ptr_eq(&r.callback, callback));
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Calls every listener of the event's kind in registration order.
    /// Stops at the first failing listener and reports it.
    pub fn trigger(&self, event: RotationEvent, snapshot: &Snapshot) -> Result<(), RotationError> {
        let kind = event.kind();
        let Some(registrations) = self.listeners.get(&kind) else {
            return Ok(());
        };

        // Listeners may hold clones of themselves; iterate over a stable copy.
        let callbacks: Vec<Listener> = registrations.iter().map(|r| Rc::clone(&r.callback)).collect();
        for callback in callbacks {
            callback(&event, snapshot).map_err(|reason| RotationError::Listener { event: kind, reason })?;
        }
        Ok(())
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<_, _> = self.listeners.iter().map(|(k, v)| (*k, v.len())).collect();
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}
