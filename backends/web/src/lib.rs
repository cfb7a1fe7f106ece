#![allow(clippy::module_name_repetitions)]

//! Browser backend for the `gvdom` virtual DOM renderer.
//!
//! [`DomHost`] implements [`gvdom_core::Host`] on top of `web-sys`, so the core reconciler
//! can patch a live page. [`WebApp`] wires a [`DomHost`] to a mounting element and keeps
//! the last rendered tree for the next update.
//!
//! Event handlers are wrapped in `wasm-bindgen` closures owned by the host. Closures of
//! listeners inside removed or replaced subtrees are released together with the subtree.

mod app;
mod dom;
mod error;
mod host;

pub use app::{WebApp, WebAppBuilder};
pub use dom::{DEFAULT_ROOT_ID, DomRoot};
pub use error::WebError;
pub use host::DomHost;
