// src/events.rs
//
// Pointer/form events and the listener registry.
//
// Listeners are plain records (owner, scope, kind); the page decides what an
// owner does with an event. Owners remove their own subscriptions when they
// are done, so "is anything still listening?" is a query, not a guess.

use crate::dom::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseOver,
    MouseOut,
    MouseDown,
    MouseMove,
    MouseUp,
    MouseLeave,
    Click,
    Change,
}

impl EventKind {
    /// `mouseleave` is the only kind here that does not bubble.
    pub fn bubbles(self) -> bool {
        !matches!(self, EventKind::MouseLeave)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub target: NodeId,
    /// Host clock in milliseconds; only differences matter.
    pub time_ms: u64,
}

impl Event {
    pub fn new(kind: EventKind, target: NodeId, time_ms: u64) -> Self {
        Self { kind, target, time_ms }
    }
}

/// What listeners asked for while an event was dispatched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl DispatchOutcome {
    pub fn prevent_default(&mut self) { self.default_prevented = true; }
    pub fn stop_propagation(&mut self) { self.propagation_stopped = true; }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Owner {
    Picker,
    /// Index into the page's enhanced widgets.
    Widget(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    Document,
    Node(NodeId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Listener {
    pub id: ListenerId,
    pub owner: Owner,
    pub scope: Scope,
    pub kind: EventKind,
}

#[derive(Clone, Debug, Default)]
pub struct Listeners {
    next: u64,
    entries: Vec<Listener>,
}

impl Listeners {
    pub fn new() -> Self { Self::default() }

    pub fn add(&mut self, owner: Owner, scope: Scope, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next);
        self.next += 1;
        self.entries.push(Listener { id, owner, scope, kind });
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|l| l.id != id);
        self.entries.len() != before
    }

    /// Drop every subscription held by `owner`; returns how many were removed.
    pub fn remove_owner(&mut self, owner: Owner) -> usize {
        let before = self.entries.len();
        self.entries.retain(|l| l.owner != owner);
        before - self.entries.len()
    }

    pub fn count_for(&self, owner: Owner) -> usize {
        self.entries.iter().filter(|l| l.owner == owner).count()
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Owners to notify, in delivery order: node listeners along `path`
    /// (target first, then ancestors when the event bubbles), then document
    /// listeners. Within a node, registration order.
    pub fn recipients(&self, kind: EventKind, path: &[NodeId]) -> Vec<Owner> {
        let mut out = Vec::new();
        let nodes = if kind.bubbles() { path } else { &path[..path.len().min(1)] };
        for &node in nodes {
            out.extend(
                self.entries
                    .iter()
                    .filter(|l| l.kind == kind && l.scope == Scope::Node(node))
                    .map(|l| l.owner),
            );
        }
        if kind.bubbles() {
            out.extend(
                self.entries
                    .iter()
                    .filter(|l| l.kind == kind && l.scope == Scope::Document)
                    .map(|l| l.owner),
            );
        }
        out
    }
}
