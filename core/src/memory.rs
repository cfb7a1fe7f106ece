//! An in-memory host tree.
//!
//! [`Document`] stores nodes in an arena addressed by [`NodeId`]. It records every mutation
//! it performs in a journal, dispatches events to subscribed handlers and serializes
//! subtrees to HTML, which makes it both the reference [`Host`] for tests and a way to
//! render virtual trees to markup without a browser.
//!
//! Children removed or replaced through [`Host`] are released together with their subtree:
//! their listeners are dropped and their slots are reused by later creations, so ids of
//! released nodes must not be kept around.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

use crate::event::{Event, EventHandler};
use crate::host::Host;

/// Identifier for a node stored inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Creates a new [`NodeId`] from the raw index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index backing this identifier.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Errors reported by [`Document`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemoryError {
    /// The id does not belong to this document.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
    /// The operation needs an element but got a text node.
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),
    /// The parent has no child at the requested position.
    #[error("node {parent:?} has no child at index {index}")]
    NoChildAt {
        /// The parent node.
        parent: NodeId,
        /// The requested position.
        index: usize,
    },
}

/// A host mutation recorded by [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// An element was created.
    CreateElement {
        /// The new node.
        node: NodeId,
        /// Its tag.
        tag: String,
    },
    /// A text node was created.
    CreateText {
        /// The new node.
        node: NodeId,
        /// Its content.
        text: String,
    },
    /// A child was appended.
    AppendChild {
        /// The parent.
        parent: NodeId,
        /// The appended child.
        child: NodeId,
    },
    /// A child was replaced.
    ReplaceChild {
        /// The parent.
        parent: NodeId,
        /// Position of the replaced child.
        index: usize,
        /// The child that took its place.
        child: NodeId,
    },
    /// A child was removed.
    RemoveChild {
        /// The parent.
        parent: NodeId,
        /// Position of the removed child.
        index: usize,
    },
    /// An attribute was set.
    SetAttribute {
        /// The element.
        node: NodeId,
        /// Attribute name.
        name: String,
        /// Attribute value.
        value: String,
    },
    /// An attribute was removed.
    RemoveAttribute {
        /// The element.
        node: NodeId,
        /// Attribute name.
        name: String,
    },
    /// A boolean attribute was toggled.
    ToggleAttribute {
        /// The element.
        node: NodeId,
        /// Attribute name.
        name: String,
        /// Whether the attribute is now present.
        on: bool,
    },
    /// A listener was subscribed.
    AddListener {
        /// The element.
        node: NodeId,
        /// Event name.
        event: String,
    },
    /// A listener was unsubscribed.
    RemoveListener {
        /// The element.
        node: NodeId,
        /// Event name.
        event: String,
    },
}

impl Mutation {
    /// Returns `true` for node creations, which do not change the attached tree on their own.
    #[must_use]
    pub const fn is_creation(&self) -> bool {
        matches!(self, Self::CreateElement { .. } | Self::CreateText { .. })
    }
}

#[derive(Debug)]
enum NodeKind {
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        listeners: Vec<(String, EventHandler)>,
    },
    Text(String),
}

#[derive(Debug)]
struct NodeEntry {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

impl NodeEntry {
    const fn new(kind: NodeKind) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            kind,
        }
    }
}

/// Arena-backed host tree.
#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<Option<NodeEntry>>,
    free: Vec<NodeId>,
    journal: Vec<Mutation>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            journal: Vec::new(),
        }
    }

    /// Creates a detached container element without recording a mutation.
    ///
    /// Use it as the parent passed to [`reconcile`](crate::reconcile).
    pub fn create_root(&mut self, tag: &str) -> NodeId {
        self.push_entry(NodeEntry::new(NodeKind::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            listeners: Vec::new(),
        }))
    }

    /// Returns the recorded mutations, oldest first.
    #[must_use]
    pub fn mutations(&self) -> &[Mutation] {
        &self.journal
    }

    /// Drains the recorded mutations.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        core::mem::take(&mut self.journal)
    }

    /// Clears the journal.
    pub fn clear_mutations(&mut self) {
        self.journal.clear();
    }

    /// Returns the number of nodes not yet released, attached or not.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Returns `true` if the document holds no live node.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the tag of an element.
    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.live(node)?.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    /// Returns the content of a text node.
    #[must_use]
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.live(node)?.kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    /// Returns the value of an attribute.
    #[must_use]
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.live(node)?.kind {
            NodeKind::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            NodeKind::Text(_) => None,
        }
    }

    /// Returns `true` if the attribute is present.
    #[must_use]
    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Returns all attributes of an element in name order.
    #[must_use]
    pub fn attributes(&self, node: NodeId) -> Vec<(&str, &str)> {
        match self.live(node).map(|entry| &entry.kind) {
            Some(NodeKind::Element { attributes, .. }) => attributes
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Returns the number of listeners subscribed to `event` on `node`.
    #[must_use]
    pub fn listener_count(&self, node: NodeId, event: &str) -> usize {
        match self.live(node).map(|entry| &entry.kind) {
            Some(NodeKind::Element { listeners, .. }) => listeners
                .iter()
                .filter(|(name, _)| name == event)
                .count(),
            _ => 0,
        }
    }

    /// Returns the children of a node.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.live(node)
            .map_or(&[], |entry| entry.children.as_slice())
    }

    /// Returns the parent of a node, if attached.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.live(node)?.parent
    }

    /// Delivers `event` to the listeners of `node` subscribed to its kind.
    ///
    /// Events do not bubble. Returns the number of handlers invoked.
    pub fn dispatch(&self, node: NodeId, event: &Event) -> usize {
        let handlers: Vec<EventHandler> = match self.live(node).map(|entry| &entry.kind) {
            Some(NodeKind::Element { listeners, .. }) => listeners
                .iter()
                .filter(|(name, _)| name == event.kind())
                .map(|(_, handler)| handler.clone())
                .collect(),
            _ => Vec::new(),
        };

        for handler in &handlers {
            handler.call(event);
        }
        handlers.len()
    }

    /// Serializes the children of `node` to HTML.
    #[must_use]
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(node) {
            self.write_html(*child, &mut out);
        }
        out
    }

    /// Serializes `node` and its subtree to HTML.
    ///
    /// Boolean attributes set through [`Host::toggle_attribute`] are printed bare.
    #[must_use]
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(entry) = self.live(node) else {
            return;
        };
        match &entry.kind {
            NodeKind::Text(text) => escape_into(text, false, out),
            NodeKind::Element {
                tag, attributes, ..
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push(' ');
                    out.push_str(name);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        escape_into(value, true, out);
                        out.push('"');
                    }
                }
                out.push('>');
                if is_void(tag) {
                    return;
                }
                for child in &entry.children {
                    self.write_html(*child, out);
                }
                let _ = write!(out, "</{tag}>");
            }
        }
    }

    fn push_entry(&mut self, entry: NodeEntry) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = Some(entry);
            return id;
        }
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Some(entry));
        id
    }

    fn live(&self, node: NodeId) -> Option<&NodeEntry> {
        self.nodes.get(node.index())?.as_ref()
    }

    fn entry(&self, node: NodeId) -> Result<&NodeEntry, MemoryError> {
        self.live(node).ok_or(MemoryError::UnknownNode(node))
    }

    fn entry_mut(&mut self, node: NodeId) -> Result<&mut NodeEntry, MemoryError> {
        self.nodes
            .get_mut(node.index())
            .and_then(Option::as_mut)
            .ok_or(MemoryError::UnknownNode(node))
    }

    /// Frees a detached node and its descendants.
    fn release(&mut self, node: NodeId) {
        let mut pending = vec![node];
        while let Some(id) = pending.pop() {
            if let Some(entry) = self.nodes.get_mut(id.index()).and_then(Option::take) {
                pending.extend(entry.children);
                self.free.push(id);
            }
        }
    }

    fn element_mut(
        &mut self,
        node: NodeId,
    ) -> Result<(&mut BTreeMap<String, String>, &mut Vec<(String, EventHandler)>), MemoryError> {
        match &mut self.entry_mut(node)?.kind {
            NodeKind::Element {
                attributes,
                listeners,
                ..
            } => Ok((attributes, listeners)),
            NodeKind::Text(_) => Err(MemoryError::NotAnElement(node)),
        }
    }

    fn child_id(&self, parent: NodeId, index: usize) -> Result<NodeId, MemoryError> {
        self.entry(parent)?
            .children
            .get(index)
            .copied()
            .ok_or(MemoryError::NoChildAt { parent, index })
    }

    /// Detaches `child` from its current parent, if any.
    fn detach(&mut self, child: NodeId) -> Result<(), MemoryError> {
        if let Some(previous) = self.entry(child)?.parent {
            self.entry_mut(previous)?.children.retain(|id| *id != child);
            self.entry_mut(child)?.parent = None;
        }
        Ok(())
    }
}

impl Host for Document {
    type Node = NodeId;
    type Error = MemoryError;

    fn create_element(&mut self, tag: &str) -> Result<NodeId, MemoryError> {
        let node = self.create_root(tag);
        self.journal.push(Mutation::CreateElement {
            node,
            tag: tag.into(),
        });
        Ok(node)
    }

    fn create_text(&mut self, text: &str) -> Result<NodeId, MemoryError> {
        let node = self.push_entry(NodeEntry::new(NodeKind::Text(text.into())));
        self.journal.push(Mutation::CreateText {
            node,
            text: text.into(),
        });
        Ok(node)
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), MemoryError> {
        let (parent, child) = (*parent, *child);
        if matches!(self.entry(parent)?.kind, NodeKind::Text(_)) {
            return Err(MemoryError::NotAnElement(parent));
        }
        self.detach(child)?;
        self.entry_mut(parent)?.children.push(child);
        self.entry_mut(child)?.parent = Some(parent);
        self.journal.push(Mutation::AppendChild { parent, child });
        Ok(())
    }

    fn replace_child(
        &mut self,
        parent: &NodeId,
        index: usize,
        child: &NodeId,
    ) -> Result<(), MemoryError> {
        let (parent, child) = (*parent, *child);
        self.detach(child)?;
        let previous = self.child_id(parent, index)?;
        self.entry_mut(parent)?.children[index] = child;
        self.entry_mut(child)?.parent = Some(parent);
        self.release(previous);
        self.journal.push(Mutation::ReplaceChild {
            parent,
            index,
            child,
        });
        Ok(())
    }

    fn remove_child(&mut self, parent: &NodeId, index: usize) -> Result<(), MemoryError> {
        let parent = *parent;
        let removed = self.child_id(parent, index)?;
        self.entry_mut(parent)?.children.remove(index);
        self.release(removed);
        self.journal.push(Mutation::RemoveChild { parent, index });
        Ok(())
    }

    fn child_at(&self, parent: &NodeId, index: usize) -> Option<NodeId> {
        self.child_id(*parent, index).ok()
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> Result<(), MemoryError> {
        let (attributes, _) = self.element_mut(*node)?;
        attributes.insert(name.into(), value.into());
        self.journal.push(Mutation::SetAttribute {
            node: *node,
            name: name.into(),
            value: value.into(),
        });
        Ok(())
    }

    fn remove_attribute(&mut self, node: &NodeId, name: &str) -> Result<(), MemoryError> {
        let (attributes, _) = self.element_mut(*node)?;
        attributes.remove(name);
        self.journal.push(Mutation::RemoveAttribute {
            node: *node,
            name: name.into(),
        });
        Ok(())
    }

    fn toggle_attribute(&mut self, node: &NodeId, name: &str, on: bool) -> Result<(), MemoryError> {
        let (attributes, _) = self.element_mut(*node)?;
        if on {
            attributes.insert(name.into(), String::new());
        } else {
            attributes.remove(name);
        }
        self.journal.push(Mutation::ToggleAttribute {
            node: *node,
            name: name.into(),
            on,
        });
        Ok(())
    }

    fn add_listener(
        &mut self,
        node: &NodeId,
        event: &str,
        handler: &EventHandler,
    ) -> Result<(), MemoryError> {
        let (_, listeners) = self.element_mut(*node)?;
        listeners.push((event.into(), handler.clone()));
        self.journal.push(Mutation::AddListener {
            node: *node,
            event: event.into(),
        });
        Ok(())
    }

    fn remove_listener(
        &mut self,
        node: &NodeId,
        event: &str,
        handler: &EventHandler,
    ) -> Result<(), MemoryError> {
        let (_, listeners) = self.element_mut(*node)?;
        if let Some(position) = listeners
            .iter()
            .position(|(name, existing)| name == event && existing.ptr_eq(handler))
        {
            listeners.remove(position);
        }
        self.journal.push(Mutation::RemoveListener {
            node: *node,
            event: event.into(),
        });
        Ok(())
    }
}

fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
            | "source" | "track" | "wbr"
    )
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::handler;
    use alloc::rc::Rc;
    use core::cell::Cell;

    #[test]
    fn builds_and_serializes() {
        let mut doc = Document::new();
        let root = doc.create_root("body");
        let div = doc.create_element("div").unwrap();
        doc.set_attribute(&div, "title", "a \"b\"").unwrap();
        doc.toggle_attribute(&div, "hidden", true).unwrap();
        let text = doc.create_text("1 < 2").unwrap();
        doc.append_child(&div, &text).unwrap();
        doc.append_child(&root, &div).unwrap();

        assert_eq!(
            doc.inner_html(root),
            "<div hidden title=\"a &quot;b&quot;\">1 &lt; 2</div>"
        );
        assert_eq!(doc.parent(div), Some(root));
    }

    #[test]
    fn replace_and_remove_by_position() {
        let mut doc = Document::new();
        let root = doc.create_root("ul");
        let a = doc.create_text("a").unwrap();
        let b = doc.create_text("b").unwrap();
        let c = doc.create_text("c").unwrap();
        doc.append_child(&root, &a).unwrap();
        doc.append_child(&root, &b).unwrap();

        doc.replace_child(&root, 0, &c).unwrap();
        assert_eq!(doc.children(root), [c, b]);
        assert_eq!(doc.parent(a), None);

        doc.remove_child(&root, 1).unwrap();
        assert_eq!(doc.children(root), [c]);
        assert_eq!(
            doc.remove_child(&root, 3),
            Err(MemoryError::NoChildAt {
                parent: root,
                index: 3
            })
        );
    }

    #[test]
    fn text_nodes_reject_element_operations() {
        let mut doc = Document::new();
        let text = doc.create_text("x").unwrap();
        assert_eq!(
            doc.set_attribute(&text, "id", "y"),
            Err(MemoryError::NotAnElement(text))
        );
    }

    #[test]
    fn dispatch_reaches_matching_listeners_only() {
        let mut doc = Document::new();
        let button = doc.create_element("button").unwrap();
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let on_click = handler(move |_| counter.set(counter.get() + 1));
        doc.add_listener(&button, "click", &on_click).unwrap();

        assert_eq!(doc.dispatch(button, &Event::new("input")), 0);
        assert_eq!(doc.dispatch(button, &Event::new("click")), 1);
        assert_eq!(clicks.get(), 1);

        doc.remove_listener(&button, "click", &on_click).unwrap();
        assert_eq!(doc.dispatch(button, &Event::new("click")), 0);
        assert_eq!(doc.listener_count(button, "click"), 0);
    }

    #[test]
    fn journal_records_and_drains() {
        let mut doc = Document::new();
        let root = doc.create_root("div");
        assert!(doc.mutations().is_empty());
        let p = doc.create_element("p").unwrap();
        doc.append_child(&root, &p).unwrap();
        let drained = doc.take_mutations();
        assert_eq!(drained.len(), 2);
        assert!(drained[0].is_creation());
        assert!(doc.mutations().is_empty());
    }

    #[test]
    fn replaced_subtrees_are_released() {
        let token = Rc::new(());
        let captured = token.clone();
        let on_click = handler(move |_| {
            let _token = &captured;
        });

        let mut doc = Document::new();
        let root = doc.create_root("body");
        let button = doc.create_element("button").unwrap();
        let label = doc.create_text("go").unwrap();
        doc.append_child(&button, &label).unwrap();
        doc.add_listener(&button, "click", &on_click).unwrap();
        doc.append_child(&root, &button).unwrap();
        drop(on_click);
        assert_eq!(Rc::strong_count(&token), 2);

        let span = doc.create_element("span").unwrap();
        doc.replace_child(&root, 0, &span).unwrap();

        assert_eq!(Rc::strong_count(&token), 1);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.tag(button), None);
        assert_eq!(doc.text(label), None);
        assert_eq!(doc.set_attribute(&button, "id", "x"), Err(MemoryError::UnknownNode(button)));
    }

    #[test]
    fn released_slots_are_reused() {
        let mut doc = Document::new();
        let root = doc.create_root("body");
        let first = doc.create_element("p").unwrap();
        doc.append_child(&root, &first).unwrap();

        for round in 0..1000 {
            let next = doc.create_element(if round % 2 == 0 { "div" } else { "p" }).unwrap();
            doc.replace_child(&root, 0, &next).unwrap();
        }

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.children(root).len(), 1);
        assert_eq!(doc.inner_html(root), "<p></p>");
    }

    #[test]
    fn removed_child_is_released() {
        let mut doc = Document::new();
        let root = doc.create_root("ul");
        let item = doc.create_element("li").unwrap();
        doc.append_child(&root, &item).unwrap();

        doc.remove_child(&root, 0).unwrap();
        assert_eq!(doc.len(), 1);
        assert!(doc.children(root).is_empty());
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let mut doc = Document::new();
        let input = doc.create_element("input").unwrap();
        doc.toggle_attribute(&input, "disabled", true).unwrap();
        assert_eq!(doc.to_html(input), "<input disabled>");
    }
}
