#![doc = include_str!("../README.md")]

#[doc(inline)]
pub use gvdom_core::*;

pub mod logging;

/// Browser host, available with the `web` feature.
#[cfg(feature = "web")]
pub use gvdom_web as web;

pub mod prelude {
    //! Commonly used items for building and rendering virtual trees.
    //!
    //! ```
    //! use gvdom::prelude::*;
    //!
    //! let mut doc = Document::new();
    //! let body = doc.create_root("body");
    //! let mut root = RenderRoot::new(doc, body);
    //! root.render(h!("p", {}, "hi")).unwrap();
    //! assert_eq!(root.host().inner_html(body), "<p>hi</p>");
    //! ```
    pub use gvdom_core::memory::{Document, NodeId};
    pub use gvdom_core::{
        Component, ComponentUpdate, Event, EventHandler, Host, PropValue, Props, RenderRoot,
        Renderer, VNode, build, h, handler, mount, props, reconcile,
    };
}
