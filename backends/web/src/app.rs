use gvdom_core::{ComponentUpdate, RenderRoot, Renderer, VNode};

use crate::{dom::DomRoot, error::WebError, host::DomHost};

/// Builder for [`WebApp`].
#[derive(Debug, Default, Clone)]
pub struct WebAppBuilder {
    root_id: Option<String>,
    component_update: ComponentUpdate,
}

impl WebAppBuilder {
    /// Creates a new builder with default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root_id: None,
            component_update: ComponentUpdate::Rerender,
        }
    }

    /// Sets the DOM element identifier that should host the application.
    #[must_use]
    pub fn with_root_id(mut self, id: impl Into<String>) -> Self {
        self.root_id = Some(id.into());
        self
    }

    /// Selects how nodes of the same component are reconciled.
    #[must_use]
    pub const fn component_update(mut self, mode: ComponentUpdate) -> Self {
        self.component_update = mode;
        self
    }

    /// Finalises the builder and creates a [`WebApp`].
    ///
    /// # Errors
    ///
    /// Returns an error if the DOM root element cannot be found or initialized.
    pub fn build(self) -> Result<WebApp, WebError> {
        WebApp::new_with_options(self)
    }
}

/// Entry point for running a virtual tree inside the browser.
#[wasm_bindgen]
#[derive(Debug)]
pub struct WebApp {
    root: DomRoot,
    render_root: RenderRoot<DomHost>,
}

impl WebApp {
    #[allow(clippy::needless_pass_by_value)]
    fn new_with_options(builder: WebAppBuilder) -> Result<Self, WebError> {
        console_error_panic_hook::set_once();

        let root = DomRoot::new(builder.root_id.as_deref())?;
        root.clear()?;

        let host = DomHost::new(root.document().clone());
        let renderer = Renderer::new().component_update(builder.component_update);
        let render_root = RenderRoot::with_renderer(host, root.node(), renderer);
        tracing::debug!(root = ?builder.root_id, "web app created");

        Ok(Self { root, render_root })
    }

    /// Renders `view`, reconciling it against the previously rendered tree.
    ///
    /// # Errors
    ///
    /// Returns an error if a DOM operation fails.
    pub fn render(&mut self, view: VNode) -> Result<(), WebError> {
        self.render_root.render(view)
    }

    /// The tree currently shown.
    #[must_use]
    pub const fn current(&self) -> Option<&VNode> {
        self.render_root.current()
    }

    /// Returns the mounting point.
    #[must_use]
    pub const fn root(&self) -> &DomRoot {
        &self.root
    }

    /// Provides access to the DOM host.
    #[must_use]
    pub const fn host(&self) -> &DomHost {
        self.render_root.host()
    }
}

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
impl WebApp {
    /// Convenience constructor exposed to JavaScript callers.
    #[wasm_bindgen(constructor)]
    /// Creates a new [`WebApp`] using the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the DOM root element cannot be found or initialized.
    pub fn new() -> Result<Self, WebError> {
        Self::new_with_options(WebAppBuilder::new())
    }

    /// Removes the rendered tree from the page.
    ///
    /// # Errors
    ///
    /// Returns an error if a DOM operation fails.
    #[wasm_bindgen]
    pub fn unmount(&mut self) -> Result<(), WebError> {
        self.render_root.unmount()
    }
}
