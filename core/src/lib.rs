#![allow(clippy::module_name_repetitions)]

//! Core of the `gvdom` virtual DOM renderer.
//!
//! A virtual tree ([`VNode`]) describes what a UI should look like. The [`Renderer`] turns it
//! into real nodes of a [`Host`] tree with [`mount`], and on later renders brings the host
//! tree in line with a new virtual tree using [`reconcile`], touching only what changed.
//!
//! ```
//! use gvdom_core::{h, memory::Document, mount, reconcile, Host};
//!
//! let mut doc = Document::new();
//! let body = doc.create_root("body");
//!
//! let first = h!("p", { "class" => "greeting" }, "hello");
//! let node = mount(&mut doc, &first).unwrap();
//! doc.append_child(&body, &node).unwrap();
//!
//! let second = h!("p", { "class" => "greeting" }, "goodbye");
//! reconcile(&mut doc, &body, Some(&second), Some(&first), 0).unwrap();
//! assert_eq!(doc.inner_html(body), "<p class=\"greeting\">goodbye</p>");
//! ```
//!
//! Children are matched by position only; there are no keys. The renderer holds no state
//! between calls, so the caller keeps the last rendered tree around (or lets
//! [`RenderRoot`] do it).

extern crate alloc;

#[macro_use]
mod macros;

pub mod event;
pub mod host;
pub mod memory;
pub mod node;
pub mod props;
pub mod renderer;
pub mod root;

pub use event::{Event, EventHandler, event_name, handler};
pub use host::Host;
pub use node::{Component, ComponentNode, Element, IntoChildren, Leaf, NodeType, VNode, build};
pub use props::{PropValue, Props};
pub use renderer::{ComponentUpdate, Renderer, mount, reconcile};
pub use root::RenderRoot;
