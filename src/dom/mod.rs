//! In-memory document tree.
//! Pages and fragments are parsed into an arena of nodes. Controllers query
//! and mutate it the way page scripts touch the browser DOM, and register
//! listeners on nodes. Replacing a subtree discards its nodes, so listeners
//! registered on them are gone with them.

mod parse;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::events::{Action, EventKind};
use crate::render::html_escape;

/// Handle to a node. Slots of discarded subtrees are reused; the generation
/// makes a handle to a discarded node stale instead of aliasing the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    const ROOT: NodeId = NodeId {
        index: 0,
        generation: 0,
    };
}

/// The document as shared between controllers and their timers.
pub type SharedDocument = Arc<Mutex<Document>>;

pub fn share(doc: Document) -> SharedDocument {
    Arc::new(Mutex::new(doc))
}

/// Lock the shared document. A poisoned lock still holds a usable tree.
pub fn lock(doc: &SharedDocument) -> MutexGuard<'_, Document> {
    doc.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Elements whose content is raw text, never markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

pub(crate) fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag)
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub(crate) fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub kind: EventKind,
    pub action: Action,
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    style: Vec<(String, String)>,
    value: String,
    default_value: String,
    checked: bool,
    default_checked: bool,
    disabled: bool,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_lowercase(),
            ..Default::default()
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match name {
            "class" => None,
            _ => self.attrs.get(name).map(|s| s.as_str()),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Attribute assignment with the parser's semantics: `class`, `style`,
    /// `value`, `checked` and `disabled` feed the live element state.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match name {
            "class" => {
                self.classes = value.split_whitespace().map(|c| c.to_string()).collect();
            }
            "style" => {
                self.style = value
                    .split(';')
                    .filter_map(|decl| {
                        let (prop, val) = decl.split_once(':')?;
                        let prop = prop.trim();
                        if prop.is_empty() {
                            return None;
                        }
                        Some((prop.to_string(), val.trim().to_string()))
                    })
                    .collect();
            }
            "checked" => {
                self.checked = true;
                self.default_checked = true;
            }
            "disabled" => self.disabled = true,
            "value" => {
                self.value = value.to_string();
                self.default_value = value.to_string();
                self.attrs.insert(name.to_string(), value.to_string());
            }
            _ => {
                self.attrs.insert(name.to_string(), value.to_string());
            }
        }
    }

    fn is_form_control(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea" | "select")
    }
}

#[derive(Debug, Clone)]
enum NodeData {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listeners: Vec<Listener>,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Node {
            data,
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    html: NodeId,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty `<html><head></head><body></body></html>` document.
    pub fn new() -> Self {
        let mut doc = Self::empty();
        let html = doc.create_element("html");
        let head = doc.create_element("head");
        let body = doc.create_element("body");
        doc.append_child(doc.root, html);
        doc.append_child(html, head);
        doc.append_child(html, body);
        doc.html = html;
        doc.body = body;
        doc
    }

    /// A bare `#document` root.
    fn empty() -> Self {
        Document {
            slots: vec![Slot {
                generation: 0,
                node: Some(Node::new(NodeData::Element(Element::new("#document")))),
            }],
            free: Vec::new(),
            root: NodeId::ROOT,
            html: NodeId::ROOT,
            body: NodeId::ROOT,
        }
    }

    /// Parse a full page. Missing `<html>`/`<body>` wrappers are synthesized;
    /// parsed ones are kept.
    pub fn parse(source: &str) -> Result<Self, String> {
        let mut doc = Self::empty();
        let root = doc.root;
        parse::parse_into(&mut doc, root, source)?;

        let top = doc.children(root);
        let found = top.iter().copied().find(|&n| doc.tag(n) == Some("html"));
        let html = match found {
            Some(html) => html,
            None => {
                let html = doc.create_element("html");
                if top.iter().any(|&n| doc.tag(n) == Some("body")) {
                    for child in top {
                        doc.append_child(html, child);
                    }
                } else {
                    let body = doc.create_element("body");
                    for child in top {
                        doc.append_child(body, child);
                    }
                    doc.append_child(html, body);
                }
                doc.append_child(root, html);
                html
            }
        };
        let found = doc
            .child_elements(html)
            .into_iter()
            .find(|&n| doc.tag(n) == Some("body"));
        let body = match found {
            Some(body) => body,
            None => {
                let body = doc.create_element("body");
                for child in doc.children(html) {
                    if doc.tag(child) != Some("head") {
                        doc.append_child(body, child);
                    }
                }
                doc.append_child(html, body);
                body
            }
        };
        doc.html = html;
        doc.body = body;
        Ok(doc)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn document_element(&self) -> NodeId {
        self.html
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    // ── Construction ────────────────────────────────────────────────

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let node = Some(Node::new(data));
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = node;
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node,
                });
                NodeId {
                    index: (self.slots.len() - 1) as u32,
                    generation: 0,
                }
            }
        }
    }

    /// Drop `id` and everything under it. Handles to them go stale.
    fn release(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            pending.extend(node.children.iter().copied());
            let slot = &mut self.slots[id.index as usize];
            slot.node = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(id.index);
        }
    }

    /// Slots currently holding a node.
    pub fn live_nodes(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).map(|n| n.children.clone()).unwrap_or_default()
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeData::Element(Element::new(tag)))
    }

    pub(crate) fn insert_element(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = self.alloc(NodeData::Element(element));
        self.append_child(parent, id);
        id
    }

    pub(crate) fn insert_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.alloc(NodeData::Text(text.to_string()));
        self.append_child(parent, id);
        id
    }

    /// Move `child` under `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.node(parent).is_none() || self.node(child).is_none() || parent == child {
            return;
        }
        if let Some(old) = self.node(child).and_then(|n| n.parent) {
            if let Some(old) = self.node_mut(old) {
                old.children.retain(|&c| c != child);
            }
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.node_mut(parent) {
            p.children.push(child);
        }
    }

    /// Remove and discard every child of `node`. Handles into the removed
    /// subtrees go stale, so queries and listeners no longer see them.
    pub fn clear_children(&mut self, node: NodeId) {
        let Some(n) = self.node_mut(node) else {
            return;
        };
        let children = std::mem::take(&mut n.children);
        for child in children {
            self.release(child);
        }
    }

    /// Replace the contents of `node` with parsed markup. On a parse error the
    /// prior contents are left untouched.
    pub fn set_inner_html(&mut self, node: NodeId, html: &str) -> Result<(), String> {
        if self.element(node).is_none() {
            return Err(format!("node {:?} is not an element", node));
        }
        let holder = self.create_element("#fragment");
        if let Err(e) = parse::parse_into(self, holder, html) {
            self.release(holder);
            return Err(e);
        }
        self.clear_children(node);
        for child in self.children(holder) {
            self.append_child(node, child);
        }
        self.release(holder);
        Ok(())
    }

    // ── Structure ───────────────────────────────────────────────────

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    /// `node` followed by its ancestors, innermost first.
    pub fn path_to_root(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(n) = self.node(id) else {
                break;
            };
            path.push(id);
            current = n.parent;
        }
        path
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        self.path_to_root(node).last() == Some(&self.root)
    }

    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.path_to_root(node).contains(&ancestor)
    }

    pub fn child_elements(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .map(|n| {
                n.children
                    .iter()
                    .copied()
                    .filter(|&c| self.element(c).is_some())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Element descendants of `scope` in document order, `scope` excluded.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.node(scope) {
            Some(n) => n.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(id) = stack.pop() {
            if self.element(id).is_some() {
                out.push(id);
            }
            if let Some(n) = self.node(id) {
                stack.extend(n.children.iter().rev().copied());
            }
        }
        out
    }

    pub fn select<F>(&self, scope: NodeId, pred: F) -> Vec<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| self.element(id).map(&pred).unwrap_or(false))
            .collect()
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&n| self.element(n).and_then(|e| e.id()) == Some(id))
    }

    pub fn by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.select(scope, |e| e.has_class(class))
    }

    pub fn first_by_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.by_class(scope, class).into_iter().next()
    }

    pub fn by_tag(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.select(scope, |e| e.tag == tag)
    }

    pub fn by_attr(&self, scope: NodeId, name: &str) -> Vec<NodeId> {
        self.select(scope, |e| e.attr(name).is_some())
    }

    // ── Element state ───────────────────────────────────────────────

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match self.node(node).map(|n| &n.data) {
            Some(NodeData::Element(e)) => Some(e),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match self.node_mut(node).map(|n| &mut n.data) {
            Some(NodeData::Element(e)) => Some(e),
            _ => None,
        }
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.tag.as_str())
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).and_then(|e| e.attr(name))
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(e) = self.element_mut(node) {
            e.set_attr(name, value);
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(e) = self.element_mut(node) {
            e.attrs.remove(name);
        }
    }

    pub fn data(&self, node: NodeId, key: &str) -> Option<&str> {
        self.attr(node, &format!("data-{}", key))
    }

    pub fn set_data(&mut self, node: NodeId, key: &str, value: &str) {
        self.set_attr(node, &format!("data-{}", key), value);
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).map(|e| e.has_class(class)).unwrap_or(false)
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.element(node).map(|e| e.classes.clone()).unwrap_or_default()
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(e) = self.element_mut(node) {
            if !e.has_class(class) {
                e.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(e) = self.element_mut(node) {
            e.classes.retain(|c| c != class);
        }
    }

    /// Toggle `class`; returns whether it is present afterwards.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            self.has_class(node, class)
        }
    }

    pub fn style(&self, node: NodeId, prop: &str) -> Option<&str> {
        self.element(node).and_then(|e| {
            e.style
                .iter()
                .find(|(p, _)| p == prop)
                .map(|(_, v)| v.as_str())
        })
    }

    pub fn set_style(&mut self, node: NodeId, prop: &str, value: &str) {
        if let Some(e) = self.element_mut(node) {
            match e.style.iter_mut().find(|(p, _)| p == prop) {
                Some(entry) => entry.1 = value.to_string(),
                None => e.style.push((prop.to_string(), value.to_string())),
            }
        }
    }

    pub fn remove_style(&mut self, node: NodeId, prop: &str) {
        if let Some(e) = self.element_mut(node) {
            e.style.retain(|(p, _)| p != prop);
        }
    }

    pub fn value(&self, node: NodeId) -> &str {
        self.element(node).map(|e| e.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(e) = self.element_mut(node) {
            e.value = value.to_string();
        }
    }

    /// Value of the element with `id`, trimmed; empty when absent.
    pub fn field(&self, id: &str) -> String {
        self.get_element_by_id(id)
            .map(|n| self.value(n).trim().to_string())
            .unwrap_or_default()
    }

    pub fn checked(&self, node: NodeId) -> bool {
        self.element(node).map(|e| e.checked).unwrap_or(false)
    }

    pub fn set_checked(&mut self, node: NodeId, checked: bool) {
        if let Some(e) = self.element_mut(node) {
            e.checked = checked;
        }
    }

    pub fn disabled(&self, node: NodeId) -> bool {
        self.element(node).map(|e| e.disabled).unwrap_or(false)
    }

    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if let Some(e) = self.element_mut(node) {
            e.disabled = disabled;
        }
    }

    /// Restore every form control under `form` to its markup defaults.
    pub fn reset_form(&mut self, form: NodeId) {
        for node in self.descendants(form) {
            if let Some(e) = self.element_mut(node) {
                if e.is_form_control() {
                    e.value = e.default_value.clone();
                    e.checked = e.default_checked;
                }
            }
        }
    }

    // ── Text ────────────────────────────────────────────────────────

    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let Some(n) = self.node(node) else {
            return;
        };
        if let NodeData::Text(t) = &n.data {
            out.push_str(t);
        }
        for &child in &n.children {
            self.collect_text(child, out);
        }
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if self.element(node).is_none() {
            return;
        }
        self.clear_children(node);
        if !text.is_empty() {
            self.insert_text(node, text);
        }
        if self.tag(node) == Some("textarea") {
            self.set_value(node, text);
        }
    }

    /// Append to the element's text, as a typing effect does.
    pub fn append_text(&mut self, node: NodeId, text: &str) {
        let mut current = self.text_content(node);
        current.push_str(text);
        self.set_text(node, &current);
    }

    /// Remove the last character of the element's text. Returns false when
    /// the text was already empty.
    pub fn pop_char(&mut self, node: NodeId) -> bool {
        let mut current = self.text_content(node);
        if current.pop().is_none() {
            return false;
        }
        self.set_text(node, &current);
        true
    }

    // ── Listeners ───────────────────────────────────────────────────

    /// Register a listener. Registering the same kind/action pair on the same
    /// node again is a no-op; returns whether anything was added.
    pub fn listen(&mut self, node: NodeId, kind: EventKind, action: Action) -> bool {
        let Some(n) = self.node_mut(node) else {
            return false;
        };
        let listener = Listener { kind, action };
        if n.listeners.contains(&listener) {
            return false;
        }
        n.listeners.push(listener);
        true
    }

    pub fn unlisten(&mut self, node: NodeId, kind: EventKind) {
        if let Some(n) = self.node_mut(node) {
            n.listeners.retain(|l| l.kind != kind);
        }
    }

    pub fn listeners(&self, node: NodeId) -> &[Listener] {
        self.node(node)
            .map(|n| n.listeners.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_listener(&self, node: NodeId, kind: EventKind, action: Action) -> bool {
        self.listeners(node).contains(&Listener { kind, action })
    }

    // ── Serialization ───────────────────────────────────────────────

    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        if let Some(n) = self.node(node) {
            for &child in &n.children {
                self.write_node(child, &mut out);
            }
        }
        out
    }

    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node, &mut out);
        out
    }

    pub fn to_html(&self) -> String {
        format!("<!DOCTYPE html>\n{}", self.outer_html(self.html))
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        let Some(n) = self.node(node) else {
            return;
        };
        let e = match &n.data {
            NodeData::Text(t) => {
                let raw = n
                    .parent
                    .and_then(|p| self.tag(p))
                    .is_some_and(is_raw_text);
                if raw {
                    out.push_str(t);
                } else {
                    out.push_str(&html_escape(t));
                }
                return;
            }
            NodeData::Element(e) => e,
        };

        out.push('<');
        out.push_str(&e.tag);
        for (name, value) in &e.attrs {
            if name == "value" && matches!(e.tag.as_str(), "input" | "textarea") {
                continue;
            }
            out.push_str(&format!(" {}=\"{}\"", name, html_escape(value)));
        }
        if !e.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", html_escape(&e.classes.join(" "))));
        }
        if !e.style.is_empty() {
            let css: Vec<String> = e
                .style
                .iter()
                .map(|(p, v)| format!("{}: {};", p, v))
                .collect();
            out.push_str(&format!(" style=\"{}\"", html_escape(&css.join(" "))));
        }
        if e.tag == "input" && !e.value.is_empty() {
            out.push_str(&format!(" value=\"{}\"", html_escape(&e.value)));
        }
        if e.checked {
            out.push_str(" checked");
        }
        if e.disabled {
            out.push_str(" disabled");
        }
        out.push('>');

        if is_void(&e.tag) {
            return;
        }
        if e.tag == "textarea" {
            out.push_str(&html_escape(&e.value));
        } else {
            for &child in &n.children {
                self.write_node(child, out);
            }
        }
        out.push_str("</");
        out.push_str(&e.tag);
        out.push('>');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_synthesizes_body() {
        let doc = Document::parse("<div id=\"header\"></div><p>hi</p>").unwrap();
        assert_eq!(doc.tag(doc.body()), Some("body"));
        assert!(doc.get_element_by_id("header").is_some());
        assert_eq!(doc.text_content(doc.body()), "hi");
    }

    #[test]
    fn inner_html_replacement_detaches_old_nodes() {
        let mut doc = Document::parse("<div id=\"mount\"><button id=\"old\">x</button></div>").unwrap();
        let mount = doc.get_element_by_id("mount").unwrap();
        let old = doc.get_element_by_id("old").unwrap();
        doc.listen(old, EventKind::Click, Action::ToggleMenu);

        doc.set_inner_html(mount, "<button id=\"new\">y</button>").unwrap();
        assert!(!doc.is_attached(old));
        assert!(doc.get_element_by_id("old").is_none());
        let new = doc.get_element_by_id("new").unwrap();
        assert!(doc.listeners(new).is_empty());
    }

    #[test]
    fn listen_is_deduplicated() {
        let mut doc = Document::new();
        let body = doc.body();
        assert!(doc.listen(body, EventKind::Click, Action::ToggleTheme));
        assert!(!doc.listen(body, EventKind::Click, Action::ToggleTheme));
        assert_eq!(doc.listeners(body).len(), 1);
    }

    #[test]
    fn form_controls_reset_to_markup_defaults() {
        let mut doc = Document::parse(
            r#"<form id="f"><input id="a" value="x"><input id="c" type="checkbox"><textarea id="t"></textarea></form>"#,
        )
        .unwrap();
        let a = doc.get_element_by_id("a").unwrap();
        let c = doc.get_element_by_id("c").unwrap();
        let t = doc.get_element_by_id("t").unwrap();
        doc.set_value(a, "changed");
        doc.set_checked(c, true);
        doc.set_value(t, "message");

        let form = doc.get_element_by_id("f").unwrap();
        doc.reset_form(form);
        assert_eq!(doc.value(a), "x");
        assert!(!doc.checked(c));
        assert_eq!(doc.value(t), "");
    }

    #[test]
    fn class_and_style_round_trip_through_html() {
        let mut doc = Document::parse(r#"<ul id="n" class="nav-links"><li>a</li></ul>"#).unwrap();
        let n = doc.get_element_by_id("n").unwrap();
        doc.add_class(n, "active");
        doc.set_style(n, "transition-delay", "40ms");
        let html = doc.outer_html(n);
        assert!(html.contains("class=\"nav-links active\""));
        assert!(html.contains("style=\"transition-delay: 40ms;\""));
    }

    #[test]
    fn typing_helpers_edit_text() {
        let mut doc = Document::new();
        let span = doc.create_element("span");
        let body = doc.body();
        doc.append_child(body, span);
        doc.append_text(span, "ab");
        doc.append_text(span, "ç");
        assert_eq!(doc.text_content(span), "abç");
        assert!(doc.pop_char(span));
        assert_eq!(doc.text_content(span), "ab");
        doc.set_text(span, "");
        assert!(!doc.pop_char(span));
    }

    #[test]
    fn typing_cycles_reuse_freed_slots() {
        let mut doc = Document::new();
        let span = doc.create_element("span");
        let body = doc.body();
        doc.append_child(body, span);
        doc.append_text(span, "a");
        let baseline = doc.live_nodes();
        for _ in 0..1000 {
            doc.append_text(span, "b");
            assert!(doc.pop_char(span));
        }
        assert_eq!(doc.live_nodes(), baseline);
        assert!(doc.slots.len() <= baseline + 2);
        assert_eq!(doc.text_content(span), "a");
    }

    #[test]
    fn stale_handles_stay_dead_after_slot_reuse() {
        let mut doc = Document::parse("<div id=\"mount\"><button id=\"old\">x</button></div>").unwrap();
        let mount = doc.get_element_by_id("mount").unwrap();
        let old = doc.get_element_by_id("old").unwrap();
        doc.listen(old, EventKind::Click, Action::ToggleMenu);
        let before = doc.live_nodes();

        for _ in 0..50 {
            doc.set_inner_html(mount, "<button id=\"new\">y</button>").unwrap();
        }
        assert_eq!(doc.live_nodes(), before);
        assert!(!doc.is_attached(old));
        assert!(doc.listeners(old).is_empty());
        assert_eq!(doc.tag(old), None);
        let new = doc.get_element_by_id("new").unwrap();
        assert_ne!(new, old);
        assert!(doc.is_attached(new));
    }

    #[test]
    fn parse_keeps_a_single_body_without_html() {
        let doc = Document::parse("<body class=\"home\"><p id=\"p\">x</p></body>").unwrap();
        let html = doc.to_html();
        assert!(!html.contains("<body><body"));
        assert_eq!(html.matches("<body").count(), 1);
        assert_eq!(doc.by_tag(doc.root(), "body").len(), 1);
        let p = doc.get_element_by_id("p").unwrap();
        assert_eq!(doc.parent(p), Some(doc.body()));
        assert!(doc.has_class(doc.body(), "home"));
    }
}
