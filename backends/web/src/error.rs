use core::fmt;

/// Error type produced by the web backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebError {
    /// The DOM APIs are not accessible (e.g., when executed outside of a browser).
    DomUnavailable,
    /// The requested mounting node cannot be located.
    RootNotFound(String),
    /// An element operation was applied to a text node.
    NotAnElement,
    /// The parent has no child node at the given position.
    MissingChild {
        /// The requested position.
        index: usize,
    },
    /// Wrapper around JavaScript exceptions.
    Js(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DomUnavailable => write!(f, "DOM is not available"),
            Self::RootNotFound(id) => write!(f, "Failed to find DOM element with id `{id}`"),
            Self::NotAnElement => write!(f, "DOM node is not an element"),
            Self::MissingChild { index } => write!(f, "DOM node has no child at index {index}"),
            Self::Js(msg) => write!(f, "JavaScript error: {msg}"),
        }
    }
}

impl std::error::Error for WebError {}

impl From<wasm_bindgen::JsValue> for WebError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        value
            .as_string()
            .map_or_else(|| Self::Js(format!("{value:?}")), Self::Js)
    }
}

impl From<WebError> for wasm_bindgen::JsValue {
    fn from(value: WebError) -> Self {
        match value {
            WebError::Js(msg) => Self::from(msg),
            other => Self::from(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(
            WebError::RootNotFound("app".into()).to_string(),
            "Failed to find DOM element with id `app`"
        );
        assert_eq!(
            WebError::MissingChild { index: 2 }.to_string(),
            "DOM node has no child at index 2"
        );
    }
}
