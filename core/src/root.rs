//! Caller-side bookkeeping for repeated renders into one container.

use crate::host::Host;
use crate::node::VNode;
use crate::renderer::Renderer;

/// Owns a host, a container node and the tree last rendered into it.
///
/// Each [`RenderRoot::render`] reconciles the new tree against the retained one at
/// position 0 of the container and then retains the new tree.
#[derive(Debug)]
pub struct RenderRoot<H: Host> {
    host: H,
    container: H::Node,
    renderer: Renderer,
    current: Option<VNode>,
}

impl<H: Host> RenderRoot<H> {
    /// Creates a root rendering into `container`, which is expected to be empty.
    pub fn new(host: H, container: H::Node) -> Self {
        Self::with_renderer(host, container, Renderer::new())
    }

    /// Creates a root with a custom renderer configuration.
    pub const fn with_renderer(host: H, container: H::Node, renderer: Renderer) -> Self {
        Self {
            host,
            container,
            renderer,
            current: None,
        }
    }

    /// Renders `next`, mounting on the first call and reconciling afterwards.
    ///
    /// # Errors
    ///
    /// Propagates host failures. A failure can leave the container partly patched, so the
    /// retained tree is dropped together with the container's child and the next render
    /// mounts from scratch.
    pub fn render(&mut self, next: VNode) -> Result<(), H::Error> {
        let result = self.renderer.reconcile(
            &mut self.host,
            &self.container,
            Some(&next),
            self.current.as_ref(),
            0,
        );
        match result {
            Ok(()) => {
                self.current = Some(next);
                Ok(())
            }
            Err(error) => {
                self.discard();
                Err(error)
            }
        }
    }

    fn discard(&mut self) {
        if self.current.take().is_none() || self.host.child_at(&self.container, 0).is_none() {
            return;
        }
        tracing::debug!("discarding partly patched tree");
        if let Err(error) = self.host.remove_child(&self.container, 0) {
            tracing::warn!(%error, "failed to clear container after render error");
        }
    }

    /// Removes the rendered tree from the container.
    ///
    /// # Errors
    ///
    /// Propagates host failures.
    pub fn unmount(&mut self) -> Result<(), H::Error> {
        if let Some(current) = self.current.take() {
            self.renderer
                .reconcile(&mut self.host, &self.container, None, Some(&current), 0)?;
        }
        Ok(())
    }

    /// The tree currently realized in the container.
    #[must_use]
    pub const fn current(&self) -> Option<&VNode> {
        self.current.as_ref()
    }

    /// The container node.
    #[must_use]
    pub const fn container(&self) -> &H::Node {
        &self.container
    }

    /// The host.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The renderer configuration.
    #[must_use]
    pub const fn renderer(&self) -> Renderer {
        self.renderer
    }

    /// Consumes the root and returns its host.
    pub fn into_host(self) -> H {
        self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventHandler;
    use crate::h;
    use crate::memory::{Document, MemoryError, NodeId};

    fn root() -> RenderRoot<Document> {
        let mut doc = Document::new();
        let container = doc.create_root("main");
        RenderRoot::new(doc, container)
    }

    #[test]
    fn first_render_mounts_then_reconciles() {
        let mut root = root();
        root.render(h!("p", {}, "one")).unwrap();
        assert_eq!(root.host().inner_html(*root.container()), "<p>one</p>");

        root.host_mut().clear_mutations();
        root.render(h!("p", { "class" => "x" }, "one")).unwrap();
        assert_eq!(root.host().inner_html(*root.container()), "<p class=\"x\">one</p>");
        assert_eq!(root.host().mutations().len(), 1);
    }

    #[test]
    fn unmount_clears_container() {
        let mut root = root();
        root.render(h!("p", {}, "one")).unwrap();
        root.unmount().unwrap();
        assert!(root.current().is_none());
        assert_eq!(root.host().inner_html(*root.container()), "");
    }

    /// Delegates to [`Document`] but rejects the `fail` attribute.
    #[derive(Debug, Default)]
    struct Picky(Document);

    impl Host for Picky {
        type Node = NodeId;
        type Error = MemoryError;

        fn create_element(&mut self, tag: &str) -> Result<NodeId, MemoryError> {
            self.0.create_element(tag)
        }

        fn create_text(&mut self, text: &str) -> Result<NodeId, MemoryError> {
            self.0.create_text(text)
        }

        fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), MemoryError> {
            self.0.append_child(parent, child)
        }

        fn replace_child(
            &mut self,
            parent: &NodeId,
            index: usize,
            child: &NodeId,
        ) -> Result<(), MemoryError> {
            self.0.replace_child(parent, index, child)
        }

        fn remove_child(&mut self, parent: &NodeId, index: usize) -> Result<(), MemoryError> {
            self.0.remove_child(parent, index)
        }

        fn child_at(&self, parent: &NodeId, index: usize) -> Option<NodeId> {
            self.0.child_at(parent, index)
        }

        fn set_attribute(
            &mut self,
            node: &NodeId,
            name: &str,
            value: &str,
        ) -> Result<(), MemoryError> {
            if name == "fail" {
                return Err(MemoryError::NotAnElement(*node));
            }
            self.0.set_attribute(node, name, value)
        }

        fn remove_attribute(&mut self, node: &NodeId, name: &str) -> Result<(), MemoryError> {
            self.0.remove_attribute(node, name)
        }

        fn toggle_attribute(
            &mut self,
            node: &NodeId,
            name: &str,
            on: bool,
        ) -> Result<(), MemoryError> {
            self.0.toggle_attribute(node, name, on)
        }

        fn add_listener(
            &mut self,
            node: &NodeId,
            event: &str,
            handler: &EventHandler,
        ) -> Result<(), MemoryError> {
            self.0.add_listener(node, event, handler)
        }

        fn remove_listener(
            &mut self,
            node: &NodeId,
            event: &str,
            handler: &EventHandler,
        ) -> Result<(), MemoryError> {
            self.0.remove_listener(node, event, handler)
        }
    }

    #[test]
    fn failed_render_starts_over() {
        let mut doc = Picky::default();
        let container = doc.0.create_root("main");
        let mut root = RenderRoot::new(doc, container);

        root.render(h!("ul", {}, h!("li", {}, "a"), h!("li", {}, "b"))).unwrap();
        // The first item is patched before the second one fails.
        let broken = h!("ul", {}, h!("li", {}, "c"), h!("li", { "fail" => "x" }, "d"));
        assert!(root.render(broken).is_err());
        assert!(root.current().is_none());
        assert_eq!(root.host().0.inner_html(container), "");

        root.render(h!("ul", {}, h!("li", {}, "e"))).unwrap();
        assert_eq!(root.host().0.inner_html(container), "<ul><li>e</li></ul>");
    }

    #[test]
    fn retains_last_tree() {
        let mut root = root();
        let tree = h!("div", { "id" => "a" });
        root.render(tree.clone()).unwrap();
        assert_eq!(root.current(), Some(&tree));
    }
}
