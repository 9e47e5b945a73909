// src/enhance/mod.rs
//
// Enhancer: turns a picked table or list into a selectable widget.
//
// - `enhance` mutates the element in place (checkboxes + control panel after
//   it) and marks it so a second call is a no-op.
// - `Widget` holds the node ids of what was injected plus drag state, and
//   reacts to the events the page routes to it.
//
// The document stays the source of truth for selection: checkbox state is
// read from and written to the `checked` property, never cached here.

pub mod drag;
pub mod list;
pub mod table;

use crate::{
    config::consts::*,
    dom::{Document, Element, NodeId},
    events::{Event, EventKind, Listeners, Owner, Scope},
    picker::PickKind,
};

use drag::DragTracker;

/// A file offered to the host's download mechanism.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Download {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/* ---------------- Visible text ---------------- */

pub(crate) fn is_boilerplate(el: &Element) -> bool {
    BOILERPLATE_TAGS.contains(&el.tag()) || BOILERPLATE_CLASSES.iter().any(|c| el.has_class(c))
}

/// Text of `node` minus style/script/boilerplate subtrees.
pub(crate) fn visible_text(doc: &Document, node: NodeId) -> String {
    doc.text_content_where(node, |el| !is_boilerplate(el))
}

/// Hyperlinks under `node` that are not inside a boilerplate subtree.
pub(crate) fn visible_links(doc: &Document, node: NodeId) -> Vec<NodeId> {
    doc.find_all(node, |el| el.tag() == "a")
        .into_iter()
        .filter(|&a| {
            doc.ancestors_inclusive(a)
                .into_iter()
                .take_while(|&n| n != node)
                .all(|n| doc.element(n).map(|el| !is_boilerplate(el)).unwrap_or(true))
        })
        .collect()
}

/* ---------------- Enhancement ---------------- */

pub fn is_enhanced(doc: &Document, element: NodeId) -> bool {
    doc.attr(element, ENHANCED_ATTR).is_some()
}

fn build_panel(doc: &mut Document, element: NodeId) -> Option<NodeId> {
    let panel = doc.create_element_with("div", &[("class", PANEL_CLASS)]);
    for (class, label) in [(INVERT_BTN_CLASS, INVERT_LABEL), (DOWNLOAD_BTN_CLASS, DOWNLOAD_LABEL)] {
        let button = doc.create_element_with("button", &[("class", class)]);
        let text = doc.create_text(label);
        doc.append_child(button, text);
        doc.append_child(panel, button);
    }
    if doc.insert_after(element, panel) {
        Some(panel)
    } else {
        logd!("Enhance: node={} has no parent, control panel skipped", element.index());
        None
    }
}

/// Enhance `element` as `kind`. `None` when it is already enhanced, is not
/// a `kind` element, or (tables) has no rows.
pub fn enhance(doc: &mut Document, element: NodeId, kind: PickKind) -> Option<Widget> {
    if is_enhanced(doc, element) {
        logd!("Enhance: node={} already enhanced, skipping", element.index());
        return None;
    }
    if !doc.element(element).map(|el| kind.matches(el)).unwrap_or(false) {
        logd!("Enhance: node={} is not a {}, skipping", element.index(), kind.label());
        return None;
    }

    let (select_all, checkboxes) = match kind {
        PickKind::Table => {
            let (sa, boxes) = table::add_checkboxes(doc, element)?;
            (Some(sa), boxes)
        }
        PickKind::List => (None, list::add_checkboxes(doc, element)),
    };
    let panel = build_panel(doc, element);
    doc.set_attr(element, ENHANCED_ATTR, "true");

    logf!(
        "Enhance: {} node={} checkboxes={}",
        kind.label(),
        element.index(),
        checkboxes.len() + usize::from(select_all.is_some())
    );

    Some(Widget {
        kind,
        element,
        panel,
        select_all,
        checkboxes,
        drag: DragTracker::new(),
    })
}

/* ---------------- Widget ---------------- */

#[derive(Clone, Debug)]
pub struct Widget {
    kind: PickKind,
    element: NodeId,
    panel: Option<NodeId>,
    select_all: Option<NodeId>,
    /// Row (table) or item (list) checkboxes, select-all excluded.
    checkboxes: Vec<NodeId>,
    drag: DragTracker,
}

impl Widget {
    pub fn kind(&self) -> PickKind { self.kind }
    pub fn element(&self) -> NodeId { self.element }
    pub fn panel(&self) -> Option<NodeId> { self.panel }
    pub fn select_all(&self) -> Option<NodeId> { self.select_all }
    pub fn checkboxes(&self) -> &[NodeId] { &self.checkboxes }
    pub fn drag(&self) -> &DragTracker { &self.drag }

    /// Every selection control, select-all first when present.
    pub fn controls(&self) -> Vec<NodeId> {
        self.select_all.iter().chain(self.checkboxes.iter()).copied().collect()
    }

    pub fn selected_count(&self, doc: &Document) -> usize {
        self.checkboxes.iter().filter(|&&cb| doc.checked(cb)).count()
    }

    /// Subscribe the widget's listeners under `owner`.
    pub fn subscribe(&self, owner: Owner, listeners: &mut Listeners) {
        let on_element = Scope::Node(self.element);
        listeners.add(owner, on_element, EventKind::MouseDown);
        listeners.add(owner, on_element, EventKind::Change);
        listeners.add(owner, on_element, EventKind::MouseLeave);
        listeners.add(owner, Scope::Document, EventKind::MouseMove);
        listeners.add(owner, Scope::Document, EventKind::MouseUp);
        if let Some(panel) = self.panel {
            listeners.add(owner, Scope::Node(panel), EventKind::Click);
        }
    }

    fn checkbox_at(&self, doc: &Document, target: NodeId) -> Option<NodeId> {
        let cb = doc.closest(target, |el| el.has_class(ROW_CHECKBOX_CLASS))?;
        self.checkboxes.contains(&cb).then_some(cb)
    }

    /// Set every row/item checkbox to `checked`.
    pub fn set_all(&self, doc: &mut Document, checked: bool) {
        for &cb in &self.checkboxes {
            doc.set_checked(cb, checked);
        }
    }

    /// Flip every row/item checkbox; tables then refresh select-all.
    pub fn invert(&self, doc: &mut Document) {
        for &cb in &self.checkboxes {
            let now = doc.checked(cb);
            doc.set_checked(cb, !now);
        }
        self.refresh_select_all(doc);
    }

    /// Select-all: checked when all rows are, indeterminate when some are.
    /// A header-only table leaves it as the user set it.
    pub fn refresh_select_all(&self, doc: &mut Document) {
        let Some(sa) = self.select_all else { return };
        let total = self.checkboxes.len();
        if total == 0 { return; }
        let on = self.selected_count(doc);
        let (checked, indeterminate) = match on {
            0 => (false, false),
            n if n == total => (true, false),
            _ => (false, true),
        };
        doc.set_checked(sa, checked);
        doc.set_indeterminate(sa, indeterminate);
    }

    pub fn export(&self, doc: &Document) -> Download {
        let (csv, filename) = match self.kind {
            PickKind::Table => (table::table_csv(doc, self.element), TABLE_FILENAME),
            PickKind::List => (list::list_csv(doc, self.element), LIST_FILENAME),
        };
        logf!("Export: {} rows={} → {}", self.kind.label(), csv.len(), filename);
        Download { filename: s!(filename), bytes: csv.to_bytes() }
    }

    /// React to one routed event. Returns a download when export was clicked.
    pub fn handle(&mut self, doc: &mut Document, event: Event, drag_threshold_ms: u64) -> Option<Download> {
        match event.kind {
            EventKind::MouseDown => {
                if let Some(cb) = self.checkbox_at(doc, event.target) {
                    self.drag.press(doc.checked(cb), event.time_ms);
                }
                None
            }
            EventKind::MouseMove => {
                let state = self.drag.motion(event.time_ms, drag_threshold_ms)?;
                if let Some(cb) = self.checkbox_at(doc, event.target) {
                    doc.set_checked(cb, state);
                    self.refresh_select_all(doc);
                }
                None
            }
            EventKind::MouseUp | EventKind::MouseLeave => {
                self.drag.release();
                None
            }
            EventKind::Change => {
                if Some(event.target) == self.select_all {
                    let checked = doc.checked(event.target);
                    self.set_all(doc, checked);
                    self.refresh_select_all(doc);
                } else if self.checkboxes.contains(&event.target) {
                    self.refresh_select_all(doc);
                }
                None
            }
            EventKind::Click => {
                let button = doc.closest(event.target, |el| el.tag() == "button")?;
                if doc.has_class(button, INVERT_BTN_CLASS) {
                    self.invert(doc);
                    None
                } else if doc.has_class(button, DOWNLOAD_BTN_CLASS) {
                    Some(self.export(doc))
                } else {
                    None
                }
            }
            EventKind::MouseOver | EventKind::MouseOut => None,
        }
    }
}
