// src/picker.rs
//! Picker: turns "start picking <table|list>" plus hover and click into one
//! resolved element.
//!
//! States: `Idle` → `Armed` (a live [`PickSession`]) → `Resolved`.
//! Every way out of `Armed` (a pick, `disable`, re-arming) goes through
//! [`Picker::teardown`], which removes the injected style rule, the hover class
//! and every listener the session subscribed.

use serde::{Deserialize, Serialize};

use crate::{
    config::consts::{HOVER_CLASS, PICKER_CSS, PICKER_STYLE_ID},
    dom::{Document, Element, NodeId},
    events::{EventKind, ListenerId, Listeners, Owner, Scope},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickKind {
    Table,
    List,
}

impl PickKind {
    /// Tag predicate for the elements this kind resolves to.
    pub fn matches(self, el: &Element) -> bool {
        match self {
            PickKind::Table => el.tag() == "table",
            PickKind::List => matches!(el.tag(), "ul" | "ol"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PickKind::Table => "table",
            PickKind::List => "list",
        }
    }
}

/// One armed picking session.
#[derive(Clone, Debug)]
pub struct PickSession {
    kind: PickKind,
    candidate: Option<NodeId>,
    /// Elements currently carrying the hover class.
    highlighted: Vec<NodeId>,
    style: Option<NodeId>,
    listeners: Vec<ListenerId>,
}

impl PickSession {
    pub fn kind(&self) -> PickKind { self.kind }
    pub fn candidate(&self) -> Option<NodeId> { self.candidate }
}

#[derive(Clone, Debug, Default)]
pub enum PickState {
    #[default]
    Idle,
    Armed(PickSession),
    Resolved { kind: PickKind, element: NodeId },
}

#[derive(Clone, Debug, Default)]
pub struct Picker {
    state: PickState,
}

impl Picker {
    pub fn new() -> Self { Self::default() }

    pub fn state(&self) -> &PickState { &self.state }

    pub fn is_armed(&self) -> bool { matches!(self.state, PickState::Armed(_)) }

    pub fn session(&self) -> Option<&PickSession> {
        match &self.state {
            PickState::Armed(s) => Some(s),
            _ => None,
        }
    }

    /// Idle/Resolved → Armed. Re-arming tears the previous session down first.
    pub fn start(&mut self, kind: PickKind, doc: &mut Document, listeners: &mut Listeners) {
        if self.is_armed() {
            logd!("Picker: Re-arm requested, tearing down previous session");
            self.teardown(doc, listeners);
        }

        let style = doc.create_element_with("style", &[("id", PICKER_STYLE_ID)]);
        let css = doc.create_text(PICKER_CSS);
        doc.append_child(style, css);
        let head = doc.head().unwrap_or(doc.root());
        doc.append_child(head, style);

        let subs = [EventKind::MouseOver, EventKind::MouseOut, EventKind::Click]
            .into_iter()
            .map(|k| listeners.add(Owner::Picker, Scope::Document, k))
            .collect();

        self.state = PickState::Armed(PickSession {
            kind,
            candidate: None,
            highlighted: Vec::new(),
            style: Some(style),
            listeners: subs,
        });
        logf!("Picker: Armed kind={}", kind.label());
    }

    /// Pointer entered `target`: highlight its nearest matching ancestor.
    pub fn hover(&mut self, doc: &mut Document, target: NodeId) {
        let PickState::Armed(session) = &mut self.state else { return };
        let kind = session.kind;
        let Some(found) = doc.closest(target, |el| kind.matches(el)) else { return };

        doc.add_class(found, HOVER_CLASS);
        if !session.highlighted.contains(&found) {
            session.highlighted.push(found);
        }
        session.candidate = Some(found);
    }

    /// Pointer left `target`: clear the highlight of its nearest matching ancestor.
    pub fn unhover(&mut self, doc: &mut Document, target: NodeId) {
        let PickState::Armed(session) = &mut self.state else { return };
        let kind = session.kind;
        let Some(found) = doc.closest(target, |el| kind.matches(el)) else { return };

        doc.remove_class(found, HOVER_CLASS);
        session.highlighted.retain(|&n| n != found);
        if session.candidate == Some(found) {
            session.candidate = None;
        }
    }

    /// Click while armed. With a highlighted candidate the session ends and the
    /// candidate is returned; without one the click is inert (`None`).
    pub fn resolve(&mut self, doc: &mut Document, listeners: &mut Listeners) -> Option<(PickKind, NodeId)> {
        let session = self.session()?;
        let element = session.candidate?;
        let kind = session.kind;

        self.teardown(doc, listeners);
        self.state = PickState::Resolved { kind, element };
        logf!("Picker: Resolved kind={} node={}", kind.label(), element.index());
        Some((kind, element))
    }

    /// Any state → Idle, without resolving anything.
    pub fn disable(&mut self, doc: &mut Document, listeners: &mut Listeners) {
        if self.is_armed() {
            self.teardown(doc, listeners);
            logf!("Picker: Disabled");
        }
        self.state = PickState::Idle;
    }

    fn teardown(&mut self, doc: &mut Document, listeners: &mut Listeners) {
        let PickState::Armed(session) = std::mem::take(&mut self.state) else { return };

        for id in &session.listeners {
            listeners.remove(*id);
        }
        // Anything registered under the picker's name outside this session is stale too.
        listeners.remove_owner(Owner::Picker);

        if let Some(style) = session.style {
            doc.detach(style);
        }
        for node in session.highlighted {
            doc.remove_class(node, HOVER_CLASS);
        }
    }
}
