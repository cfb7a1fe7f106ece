//! The capability set a real UI tree must provide.
//!
//! The renderer never touches a concrete tree directly. Everything it does goes through
//! [`Host`], so the same reconciler drives the browser DOM, the in-memory
//! [`Document`](crate::memory::Document) or any other tree with the same operations.

use core::fmt::Debug;

use crate::event::EventHandler;

/// A mutable host tree.
///
/// Children are addressed by position within their parent. Host nodes are handles: cloning
/// one must yield another handle to the same node.
pub trait Host {
    /// Handle to a node of the host tree.
    type Node: Clone + Debug;
    /// Error raised by host operations.
    type Error: core::error::Error;

    /// Creates a detached element node.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the tag.
    fn create_element(&mut self, tag: &str) -> Result<Self::Node, Self::Error>;

    /// Creates a detached text node.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot allocate the node.
    fn create_text(&mut self, text: &str) -> Result<Self::Node, Self::Error>;

    /// Appends `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if either node is invalid or `parent` cannot hold children.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), Self::Error>;

    /// Replaces the child of `parent` at `index` with `child`.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no child at `index`.
    fn replace_child(
        &mut self,
        parent: &Self::Node,
        index: usize,
        child: &Self::Node,
    ) -> Result<(), Self::Error>;

    /// Removes the child of `parent` at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no child at `index`.
    fn remove_child(&mut self, parent: &Self::Node, index: usize) -> Result<(), Self::Error>;

    /// Returns the child of `parent` at `index`, if any.
    fn child_at(&self, parent: &Self::Node, index: usize) -> Option<Self::Node>;

    /// Sets an attribute value.
    ///
    /// # Errors
    ///
    /// Returns an error if `node` is not an element.
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str)
    -> Result<(), Self::Error>;

    /// Removes an attribute.
    ///
    /// # Errors
    ///
    /// Returns an error if `node` is not an element.
    fn remove_attribute(&mut self, node: &Self::Node, name: &str) -> Result<(), Self::Error>;

    /// Makes a boolean attribute present (`on`) or absent.
    ///
    /// # Errors
    ///
    /// Returns an error if `node` is not an element.
    fn toggle_attribute(&mut self, node: &Self::Node, name: &str, on: bool)
    -> Result<(), Self::Error>;

    /// Subscribes `handler` to `event` on `node`.
    ///
    /// # Errors
    ///
    /// Returns an error if the host refuses the subscription.
    fn add_listener(
        &mut self,
        node: &Self::Node,
        event: &str,
        handler: &EventHandler,
    ) -> Result<(), Self::Error>;

    /// Removes a subscription previously made with [`Host::add_listener`].
    ///
    /// # Errors
    ///
    /// Returns an error if the host refuses the removal.
    fn remove_listener(
        &mut self,
        node: &Self::Node,
        event: &str,
        handler: &EventHandler,
    ) -> Result<(), Self::Error>;
}
