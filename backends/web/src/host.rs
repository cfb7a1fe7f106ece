use gvdom_core::{Event, EventHandler, Host};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Node};

use crate::error::WebError;

/// A subscription made through [`Host::add_listener`].
///
/// The closure must stay alive for as long as the browser may call it.
#[derive(Debug)]
struct Listener {
    target: Node,
    event: String,
    handler: EventHandler,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

/// [`Host`] implementation backed by the browser DOM.
#[derive(Debug)]
pub struct DomHost {
    document: Document,
    listeners: Vec<Listener>,
}

impl DomHost {
    /// Creates a host that allocates nodes from `document`.
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self {
            document,
            listeners: Vec::new(),
        }
    }

    /// Returns the document nodes are created in.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Number of live listener closures.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn child(parent: &Node, index: usize) -> Result<Node, WebError> {
        u32::try_from(index)
            .ok()
            .and_then(|position| parent.child_nodes().item(position))
            .ok_or(WebError::MissingChild { index })
    }

    /// Drops the closures of every listener attached inside `subtree`.
    fn release_subtree(&mut self, subtree: &Node) {
        let before = self.listeners.len();
        self.listeners
            .retain(|listener| !subtree.contains(Some(&listener.target)));
        let released = before - self.listeners.len();
        if released > 0 {
            tracing::trace!(released, "released listeners of detached subtree");
        }
    }
}

fn element(node: &Node) -> Result<&Element, WebError> {
    node.dyn_ref::<Element>().ok_or(WebError::NotAnElement)
}

impl Host for DomHost {
    type Node = Node;
    type Error = WebError;

    fn create_element(&mut self, tag: &str) -> Result<Node, WebError> {
        Ok(self.document.create_element(tag)?.into())
    }

    fn create_text(&mut self, text: &str) -> Result<Node, WebError> {
        Ok(self.document.create_text_node(text).into())
    }

    fn append_child(&mut self, parent: &Node, child: &Node) -> Result<(), WebError> {
        parent.append_child(child)?;
        Ok(())
    }

    fn replace_child(&mut self, parent: &Node, index: usize, child: &Node) -> Result<(), WebError> {
        let previous = Self::child(parent, index)?;
        parent.replace_child(child, &previous)?;
        self.release_subtree(&previous);
        Ok(())
    }

    fn remove_child(&mut self, parent: &Node, index: usize) -> Result<(), WebError> {
        let previous = Self::child(parent, index)?;
        parent.remove_child(&previous)?;
        self.release_subtree(&previous);
        Ok(())
    }

    fn child_at(&self, parent: &Node, index: usize) -> Option<Node> {
        Self::child(parent, index).ok()
    }

    fn set_attribute(&mut self, node: &Node, name: &str, value: &str) -> Result<(), WebError> {
        element(node)?.set_attribute(name, value)?;
        Ok(())
    }

    fn remove_attribute(&mut self, node: &Node, name: &str) -> Result<(), WebError> {
        element(node)?.remove_attribute(name)?;
        Ok(())
    }

    fn toggle_attribute(&mut self, node: &Node, name: &str, on: bool) -> Result<(), WebError> {
        element(node)?.toggle_attribute_with_force(name, on)?;
        // Live properties such as `checked` stop following the attribute after user input.
        js_sys::Reflect::set(node, &JsValue::from_str(name), &JsValue::from_bool(on))?;
        Ok(())
    }

    fn add_listener(
        &mut self,
        node: &Node,
        event: &str,
        handler: &EventHandler,
    ) -> Result<(), WebError> {
        let callback = handler.clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            callback.call(&Event::new(event.type_()));
        });
        node.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target: node.clone(),
            event: event.to_owned(),
            handler: handler.clone(),
            closure,
        });
        Ok(())
    }

    fn remove_listener(
        &mut self,
        node: &Node,
        event: &str,
        handler: &EventHandler,
    ) -> Result<(), WebError> {
        let Some(position) = self.listeners.iter().position(|listener| {
            listener.target.is_same_node(Some(node))
                && listener.event == event
                && listener.handler.ptr_eq(handler)
        }) else {
            tracing::debug!(event, "no listener to remove");
            return Ok(());
        };

        let listener = self.listeners.swap_remove(position);
        node.remove_event_listener_with_callback(event, listener.closure.as_ref().unchecked_ref())?;
        Ok(())
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use gvdom_core::{VNode, h, handler, reconcile};
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn setup() -> (DomHost, Element) {
        let document = web_sys::window().unwrap().document().unwrap();
        let container = document.create_element("div").unwrap();
        (DomHost::new(document), container)
    }

    fn render(host: &mut DomHost, container: &Element, new: &VNode, old: Option<&VNode>) {
        let parent: Node = container.clone().into();
        reconcile(host, &parent, Some(new), old, 0).unwrap();
    }

    fn click(node: &Node) {
        let event = web_sys::Event::new("click").unwrap();
        node.dispatch_event(&event).unwrap();
    }

    fn property(node: &Node, name: &str) -> Option<bool> {
        js_sys::Reflect::get(node, &JsValue::from_str(name))
            .unwrap()
            .as_bool()
    }

    #[wasm_bindgen_test]
    fn mounts_elements_and_text() {
        let (mut host, container) = setup();
        let tree = h!(
            "ul",
            {},
            h!("li", {}, "a"),
            h!("li", { "hidden" => true, "title" => 1 }, "b"),
        );
        render(&mut host, &container, &tree, None);
        assert_eq!(
            container.inner_html(),
            "<ul><li>a</li><li hidden=\"\" title=\"1\">b</li></ul>"
        );
    }

    #[wasm_bindgen_test]
    fn children_are_addressed_by_position() {
        let (mut host, container) = setup();
        let parent: Node = container.clone().into();
        for text in ["a", "b", "c"] {
            let child = host.create_text(text).unwrap();
            host.append_child(&parent, &child).unwrap();
        }

        host.remove_child(&parent, 1).unwrap();
        let replacement = host.create_text("z").unwrap();
        host.replace_child(&parent, 1, &replacement).unwrap();

        assert_eq!(parent.text_content().as_deref(), Some("az"));
        assert!(host.child_at(&parent, 2).is_none());
        assert_eq!(host.remove_child(&parent, 5), Err(WebError::MissingChild { index: 5 }));
    }

    #[wasm_bindgen_test]
    fn replacing_a_subtree_drops_its_closures() {
        let (mut host, container) = setup();
        let old = h!("div", {}, h!("button", { "onClick" => handler(|_| {}) }));
        render(&mut host, &container, &old, None);
        assert_eq!(host.listener_count(), 1);

        render(&mut host, &container, &h!("section"), Some(&old));
        assert_eq!(host.listener_count(), 0);
        assert_eq!(container.inner_html(), "<section></section>");
    }

    #[wasm_bindgen_test]
    fn removed_handler_stops_firing() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let on_click = handler(move |_| counter.set(counter.get() + 1));

        let (mut host, container) = setup();
        let old = h!("button", { "onClick" => on_click });
        render(&mut host, &container, &old, None);
        let button = container.first_child().unwrap();

        click(&button);
        assert_eq!(hits.get(), 1);

        render(&mut host, &container, &h!("button"), Some(&old));
        assert_eq!(host.listener_count(), 0);
        click(&button);
        assert_eq!(hits.get(), 1);
    }

    #[wasm_bindgen_test]
    fn boolean_props_round_trip_attribute_and_property() {
        let (mut host, container) = setup();
        let old = h!("input", { "type" => "checkbox", "checked" => true });
        render(&mut host, &container, &old, None);
        let input = container.first_child().unwrap();
        let element = input.dyn_ref::<Element>().unwrap();
        assert!(element.has_attribute("checked"));
        assert_eq!(property(&input, "checked"), Some(true));

        render(&mut host, &container, &h!("input", { "type" => "checkbox" }), Some(&old));
        assert!(!element.has_attribute("checked"));
        assert_eq!(property(&input, "checked"), Some(false));
    }
}
