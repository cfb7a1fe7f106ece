use crate::error::WebError;

use web_sys::{Document, Element, Node, Window};

/// Id given to the container created when no root id is configured.
pub const DEFAULT_ROOT_ID: &str = "gvdom-root";

/// The DOM element an application renders into.
#[derive(Debug, Clone)]
pub struct DomRoot {
    document: Document,
    element: Element,
}

impl DomRoot {
    /// Creates a [`DomRoot`] pointing at the provided element id.
    ///
    /// Without an id a fresh `div` is appended to the document body.
    ///
    /// # Errors
    ///
    /// Returns an error outside a browser or when the element cannot be found.
    pub fn new(root_id: Option<&str>) -> Result<Self, WebError> {
        let window: Window = web_sys::window().ok_or(WebError::DomUnavailable)?;
        let document: Document = window.document().ok_or(WebError::DomUnavailable)?;

        let element = if let Some(id) = root_id {
            document
                .get_element_by_id(id)
                .ok_or_else(|| WebError::RootNotFound(id.to_string()))?
        } else {
            let body = document.body().ok_or(WebError::DomUnavailable)?;
            let host = document.create_element("div")?;
            host.set_id(DEFAULT_ROOT_ID);
            body.append_child(&host)?;
            host
        };

        Ok(Self { document, element })
    }

    /// Returns the DOM element representing the mounting point.
    #[must_use]
    pub const fn element(&self) -> &Element {
        &self.element
    }

    /// Returns the mounting point as a plain node.
    #[must_use]
    pub fn node(&self) -> Node {
        self.element.clone().into()
    }

    /// Returns the owning document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Removes whatever the page left inside the mounting element.
    ///
    /// # Errors
    ///
    /// Propagates DOM exceptions.
    pub fn clear(&self) -> Result<(), WebError> {
        while let Some(child) = self.element.first_child() {
            self.element.remove_child(&child)?;
        }
        Ok(())
    }
}
