// src/page.rs
//! Page: one loaded document plus everything attached to it.
//!
//! Owns the document, the listener registry, the picker and the enhanced
//! widgets. Hosts (GUI, CLI, tests) feed it commands and pointer events;
//! it routes events along the target's ancestor path, applies the checkbox
//! default action, and queues what must leave the page (messages for the
//! companion UI, downloads).

use crate::{
    config::options::PageOptions,
    dom::{Document, NodeId},
    enhance::{self, Download, Widget},
    events::{DispatchOutcome, Event, EventKind, Listeners, Owner},
    message::{Command, Outbound},
    picker::{PickKind, Picker},
};

#[derive(Debug)]
pub struct Page {
    doc: Document,
    options: PageOptions,
    listeners: Listeners,
    picker: Picker,
    widgets: Vec<Widget>,
    outbox: Vec<Outbound>,
    downloads: Vec<Download>,
}

impl Page {
    pub fn new(doc: Document) -> Self {
        Self::with_options(doc, PageOptions::default())
    }

    pub fn with_options(doc: Document, options: PageOptions) -> Self {
        Self {
            doc,
            options,
            listeners: Listeners::new(),
            picker: Picker::new(),
            widgets: Vec::new(),
            outbox: Vec::new(),
            downloads: Vec::new(),
        }
    }

    /* ---------- tiny accessors ---------- */

    #[inline] pub fn doc(&self) -> &Document { &self.doc }
    #[inline] pub fn doc_mut(&mut self) -> &mut Document { &mut self.doc }
    #[inline] pub fn listeners(&self) -> &Listeners { &self.listeners }
    #[inline] pub fn picker(&self) -> &Picker { &self.picker }
    #[inline] pub fn widgets(&self) -> &[Widget] { &self.widgets }
    #[inline] pub fn options(&self) -> &PageOptions { &self.options }

    pub fn widget_for(&self, element: NodeId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.element() == element)
    }

    /// Every pickable element of `kind`, in document order.
    pub fn candidates(&self, kind: PickKind) -> Vec<NodeId> {
        self.doc.find_all(self.doc.root(), |el| kind.matches(el))
    }

    /// Messages queued for the companion UI since the last call.
    pub fn take_outbox(&mut self) -> Vec<Outbound> {
        std::mem::take(&mut self.outbox)
    }

    /// Downloads produced since the last call.
    pub fn take_downloads(&mut self) -> Vec<Download> {
        std::mem::take(&mut self.downloads)
    }

    /* ---------- inbound commands ---------- */

    pub fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::StartPicking { element_type } => {
                self.picker.start(element_type, &mut self.doc, &mut self.listeners)
            }
            Command::DisablePicking => self.picker.disable(&mut self.doc, &mut self.listeners),
        }
    }

    /// JSON form of `handle_command`. Unknown or malformed messages are
    /// ignored; returns whether the message was understood.
    pub fn handle_message(&mut self, json: &str) -> bool {
        match Command::from_json(json) {
            Ok(cmd) => {
                self.handle_command(cmd);
                true
            }
            Err(e) => {
                logd!("Message: Ignored {:?} ({})", json, e);
                false
            }
        }
    }

    /* ---------- enhancement ---------- */

    /// Enhance `element` and subscribe its widget. `None` when refused
    /// (already enhanced, wrong kind, no rows).
    pub fn enhance(&mut self, element: NodeId, kind: PickKind) -> Option<usize> {
        let widget = enhance::enhance(&mut self.doc, element, kind)?;
        let ix = self.widgets.len();
        widget.subscribe(Owner::Widget(ix), &mut self.listeners);
        self.widgets.push(widget);
        Some(ix)
    }

    /* ---------- event dispatch ---------- */

    pub fn dispatch(&mut self, event: Event) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        let path = self.doc.ancestors_inclusive(event.target);

        for owner in self.listeners.recipients(event.kind, &path) {
            if outcome.propagation_stopped { break; }
            match owner {
                Owner::Picker => self.deliver_to_picker(event, &mut outcome),
                Owner::Widget(ix) => {
                    let threshold = self.options.drag_threshold_ms;
                    let Some(widget) = self.widgets.get_mut(ix) else { continue };
                    if let Some(download) = widget.handle(&mut self.doc, event, threshold) {
                        self.downloads.push(download);
                    }
                }
            }
        }

        // Default action: a click on a checkbox toggles it and fires `change`.
        if event.kind == EventKind::Click
            && !outcome.default_prevented
            && self.doc.is_checkbox(event.target)
        {
            let now = self.doc.checked(event.target);
            self.doc.set_checked(event.target, !now);
            self.doc.set_indeterminate(event.target, false);
            self.dispatch(Event::new(EventKind::Change, event.target, event.time_ms));
        }

        outcome
    }

    fn deliver_to_picker(&mut self, event: Event, outcome: &mut DispatchOutcome) {
        match event.kind {
            EventKind::MouseOver => self.picker.hover(&mut self.doc, event.target),
            EventKind::MouseOut => self.picker.unhover(&mut self.doc, event.target),
            EventKind::Click => {
                let Some((kind, element)) = self.picker.resolve(&mut self.doc, &mut self.listeners)
                else { return };
                outcome.prevent_default();
                outcome.stop_propagation();
                if self.enhance(element, kind).is_none() {
                    logd!("Picker: node={} was not enhanced", element.index());
                }
                self.outbox.push(Outbound::ClosePopup);
            }
            _ => {}
        }
    }

    /* ---------- host conveniences ---------- */

    pub fn pointer_over(&mut self, target: NodeId, time_ms: u64) -> DispatchOutcome {
        self.dispatch(Event::new(EventKind::MouseOver, target, time_ms))
    }

    pub fn pointer_out(&mut self, target: NodeId, time_ms: u64) -> DispatchOutcome {
        self.dispatch(Event::new(EventKind::MouseOut, target, time_ms))
    }

    pub fn pointer_down(&mut self, target: NodeId, time_ms: u64) -> DispatchOutcome {
        self.dispatch(Event::new(EventKind::MouseDown, target, time_ms))
    }

    pub fn pointer_move(&mut self, target: NodeId, time_ms: u64) -> DispatchOutcome {
        self.dispatch(Event::new(EventKind::MouseMove, target, time_ms))
    }

    pub fn pointer_up(&mut self, target: NodeId, time_ms: u64) -> DispatchOutcome {
        self.dispatch(Event::new(EventKind::MouseUp, target, time_ms))
    }

    pub fn pointer_leave(&mut self, target: NodeId, time_ms: u64) -> DispatchOutcome {
        self.dispatch(Event::new(EventKind::MouseLeave, target, time_ms))
    }

    pub fn click(&mut self, target: NodeId, time_ms: u64) -> DispatchOutcome {
        self.dispatch(Event::new(EventKind::Click, target, time_ms))
    }
}
