//! Mounting and reconciliation.
//!
//! [`Renderer::mount`] realizes a virtual node as a host node. [`Renderer::reconcile`] takes
//! the host child of `parent` at `index`, the virtual node it was rendered from and the
//! virtual node it should now look like, and applies the smallest patch it can find:
//!
//! 1. nothing was there: mount the new node and append it,
//! 2. nothing should be there: remove the child,
//! 3. the nodes differ in kind, leaf value, tag or component: replace the child,
//! 4. otherwise patch props in place and recurse into children by position.
//!
//! The renderer keeps no tree between calls. The caller passes the tree that is actually
//! realized as `old`; a mismatch yields unspecified patches rather than an error.

use crate::event::event_name;
use crate::host::Host;
use crate::node::VNode;
use crate::props::{PropValue, Props};

/// How reconciliation treats two nodes of the same component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ComponentUpdate {
    /// Invoke both components and reconcile their outputs.
    #[default]
    Rerender,
    /// Patch the component's own props and children onto its previously mounted output
    /// without invoking it again. Only correct while the output shape does not depend on
    /// the changed props.
    PatchProps,
}

/// Mounts and reconciles virtual trees against a [`Host`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Renderer {
    component_update: ComponentUpdate,
}

impl Renderer {
    /// Creates a renderer with the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            component_update: ComponentUpdate::Rerender,
        }
    }

    /// Selects how nodes of the same component are reconciled.
    #[must_use]
    pub const fn component_update(mut self, mode: ComponentUpdate) -> Self {
        self.component_update = mode;
        self
    }

    /// Returns the configured component update mode.
    #[must_use]
    pub const fn component_update_mode(&self) -> ComponentUpdate {
        self.component_update
    }

    /// Creates the host node for `node`, including its whole subtree.
    ///
    /// Components are invoked eagerly, every time.
    ///
    /// # Errors
    ///
    /// Propagates the first failing host operation.
    pub fn mount<H: Host>(&self, host: &mut H, node: &VNode) -> Result<H::Node, H::Error> {
        match node {
            VNode::Leaf(leaf) => {
                tracing::trace!(%leaf, "mounting text");
                host.create_text(&leaf.to_string())
            }
            VNode::Component(component) => {
                tracing::trace!(component = component.component().name(), "resolving component");
                let output = component.resolve();
                self.mount(host, &output)
            }
            VNode::Element(element) => {
                tracing::trace!(tag = element.tag(), "mounting element");
                let created = host.create_element(element.tag())?;
                let props = element.props();
                if !props.is_empty() {
                    for (key, value) in props.attributes() {
                        apply_attribute(host, &created, key, value)?;
                    }
                    for (key, handler) in props.handlers() {
                        host.add_listener(&created, &event_name(key), handler)?;
                    }
                }
                for child in element.children() {
                    let mounted = self.mount(host, child)?;
                    host.append_child(&created, &mounted)?;
                }
                Ok(created)
            }
        }
    }

    /// Brings the child of `parent` at `index` from `old` to `new`.
    ///
    /// # Errors
    ///
    /// Propagates the first failing host operation.
    pub fn reconcile<H: Host>(
        &self,
        host: &mut H,
        parent: &H::Node,
        new: Option<&VNode>,
        old: Option<&VNode>,
        index: usize,
    ) -> Result<(), H::Error> {
        match (new, old) {
            (None, None) => Ok(()),
            (Some(new), None) => {
                tracing::debug!(index, "appending child");
                let mounted = self.mount(host, new)?;
                host.append_child(parent, &mounted)
            }
            (None, Some(_)) => {
                if host.child_at(parent, index).is_none() {
                    tracing::warn!(index, "no host child to remove");
                    return Ok(());
                }
                tracing::debug!(index, "removing child");
                host.remove_child(parent, index)
            }
            (Some(new), Some(old)) => self.patch(host, parent, new, old, index),
        }
    }

    fn patch<H: Host>(
        &self,
        host: &mut H,
        parent: &H::Node,
        new: &VNode,
        old: &VNode,
        index: usize,
    ) -> Result<(), H::Error> {
        if changed(new, old) {
            if host.child_at(parent, index).is_none() {
                tracing::warn!(index, "no host child to replace");
                return Ok(());
            }
            tracing::debug!(index, "replacing child");
            let mounted = self.mount(host, new)?;
            return host.replace_child(parent, index, &mounted);
        }

        match (new, old) {
            (VNode::Element(new), VNode::Element(old)) => self.patch_in_place(
                host,
                parent,
                index,
                (new.props(), old.props()),
                (new.children(), old.children()),
            ),
            (VNode::Component(new), VNode::Component(old)) => match self.component_update {
                ComponentUpdate::Rerender => {
                    let (new_output, old_output) = (new.resolve(), old.resolve());
                    self.patch(host, parent, &new_output, &old_output, index)
                }
                ComponentUpdate::PatchProps => self.patch_in_place(
                    host,
                    parent,
                    index,
                    (new.props(), old.props()),
                    (new.children(), old.children()),
                ),
            },
            // Equal leaves.
            _ => Ok(()),
        }
    }

    fn patch_in_place<H: Host>(
        &self,
        host: &mut H,
        parent: &H::Node,
        index: usize,
        (new_props, old_props): (&Props, &Props),
        (new_children, old_children): (&[VNode], &[VNode]),
    ) -> Result<(), H::Error> {
        let Some(node) = host.child_at(parent, index) else {
            tracing::warn!(index, "no host child to patch");
            return Ok(());
        };

        patch_props(host, &node, new_props, old_props)?;
        self.reconcile_children(host, &node, new_children, old_children)
    }

    /// Reconciles two child lists position by position.
    ///
    /// Tail removals run from the last index down so every removal still addresses a live
    /// child.
    fn reconcile_children<H: Host>(
        &self,
        host: &mut H,
        node: &H::Node,
        new: &[VNode],
        old: &[VNode],
    ) -> Result<(), H::Error> {
        let common = new.len().min(old.len());
        for index in 0..common {
            self.reconcile(host, node, new.get(index), old.get(index), index)?;
        }
        for index in common..new.len() {
            self.reconcile(host, node, new.get(index), None, index)?;
        }
        for index in (common..old.len()).rev() {
            self.reconcile(host, node, None, old.get(index), index)?;
        }
        Ok(())
    }
}

/// Returns `true` when `old` cannot be patched into `new`.
fn changed(new: &VNode, old: &VNode) -> bool {
    match (new, old) {
        (VNode::Leaf(new), VNode::Leaf(old)) => new != old,
        (VNode::Element(new), VNode::Element(old)) => new.tag() != old.tag(),
        (VNode::Component(new), VNode::Component(old)) => new.component() != old.component(),
        _ => true,
    }
}

fn apply_attribute<H: Host>(
    host: &mut H,
    node: &H::Node,
    key: &str,
    value: &PropValue,
) -> Result<(), H::Error> {
    match value {
        PropValue::Bool(on) => host.toggle_attribute(node, key, *on),
        PropValue::Str(_) | PropValue::Number(_) => match value.attribute_value() {
            Some(text) => host.set_attribute(node, key, &text),
            None => Ok(()),
        },
        PropValue::Handler(handler) => host.add_listener(node, &event_name(key), handler),
        PropValue::Null => Ok(()),
    }
}

/// Applies the difference between two prop mappings to `node`.
///
/// Equal values are left alone, handlers included: a handler is only resubscribed when its
/// identity changes.
fn patch_props<H: Host>(
    host: &mut H,
    node: &H::Node,
    new: &Props,
    old: &Props,
) -> Result<(), H::Error> {
    for (key, value) in new {
        let previous = old.get(key);
        if previous == Some(value) {
            continue;
        }
        tracing::trace!(key = key.as_str(), "updating prop");
        update_prop(host, node, key, Some(value), previous)?;
    }
    for (key, value) in old {
        if !new.contains_key(key) {
            tracing::trace!(key = key.as_str(), "removing prop");
            update_prop(host, node, key, None, Some(value))?;
        }
    }
    Ok(())
}

fn update_prop<H: Host>(
    host: &mut H,
    node: &H::Node,
    key: &str,
    new: Option<&PropValue>,
    old: Option<&PropValue>,
) -> Result<(), H::Error> {
    let overwrites_attribute = matches!(
        new,
        Some(PropValue::Str(_) | PropValue::Number(_) | PropValue::Bool(_))
    );

    match old {
        Some(PropValue::Handler(handler)) => {
            host.remove_listener(node, &event_name(key), handler)?;
        }
        Some(PropValue::Str(_) | PropValue::Number(_)) if !overwrites_attribute => {
            host.remove_attribute(node, key)?;
        }
        // Toggling off also resets the property a host may have set alongside the attribute.
        Some(PropValue::Bool(true)) if !overwrites_attribute => {
            host.toggle_attribute(node, key, false)?;
        }
        _ => {}
    }

    match new {
        Some(value) => apply_attribute(host, node, key, value),
        None => Ok(()),
    }
}

/// [`Renderer::mount`] with the default configuration.
///
/// # Errors
///
/// Propagates the first failing host operation.
pub fn mount<H: Host>(host: &mut H, node: &VNode) -> Result<H::Node, H::Error> {
    Renderer::new().mount(host, node)
}

/// [`Renderer::reconcile`] with the default configuration.
///
/// # Errors
///
/// Propagates the first failing host operation.
pub fn reconcile<H: Host>(
    host: &mut H,
    parent: &H::Node,
    new: Option<&VNode>,
    old: Option<&VNode>,
    index: usize,
) -> Result<(), H::Error> {
    Renderer::new().reconcile(host, parent, new, old, index)
}
