//! The virtual node model and its construction function.
//!
//! A virtual tree is plain data: [`VNode`] values built with [`build`] (or the [`h!`](crate::h)
//! macro) and handed to the [`Renderer`](crate::Renderer) by reference. Building a node never
//! touches a host and never validates its input.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::{TypeId, type_name};
use core::fmt::{self, Debug};

use crate::props::{PropValue, Props};

/// A text value: either a string or a number.
///
/// Leaves are compared by content, so `"1"` and `1` are different leaves.
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    /// A string leaf.
    Text(String),
    /// A numeric leaf.
    Number(f64),
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(value) if value.is_nan() => f.write_str("NaN"),
            Self::Number(value) if value.is_infinite() => {
                f.write_str(if *value > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Self::Number(value) if *value == 0.0 => f.write_str("0"),
            Self::Number(value) if (1e-6..1e21).contains(&value.abs()) => write!(f, "{value}"),
            Self::Number(value) => {
                let scientific = format!("{value:e}");
                match scientific.split_once('e') {
                    Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                        write!(f, "{mantissa}e+{exponent}")
                    }
                    _ => f.write_str(&scientific),
                }
            }
        }
    }
}

/// A pure function from props to a virtual node.
///
/// Function items and closures without captures are identified by their type, so creating
/// them again on every render keeps their identity. Anything else (capturing closures,
/// function pointers) is identified by the allocation made in [`Component::new`]: clones
/// are the same component, separate calls are not.
#[derive(Clone)]
pub struct Component {
    id: Option<TypeId>,
    name: &'static str,
    render: Rc<dyn Fn(&Props) -> VNode>,
}

impl Component {
    /// Wraps a render function.
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(&Props) -> VNode + 'static,
    {
        Self {
            id: (size_of::<F>() == 0).then(TypeId::of::<F>),
            name: type_name::<F>(),
            render: Rc::new(render),
        }
    }

    /// Invokes the component.
    #[must_use]
    pub fn render(&self, props: &Props) -> VNode {
        (self.render)(props)
    }

    /// Returns the type name of the wrapped function.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(id), Some(other_id)) => id == other_id,
            (None, None) => {
                core::ptr::addr_eq(Rc::as_ptr(&self.render), Rc::as_ptr(&other.render))
            }
            _ => false,
        }
    }
}

impl Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Component").field(&self.name).finish()
    }
}

/// The `type` of a node being built: a host tag or a component.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeType {
    /// A host element tag such as `"div"`.
    Tag(String),
    /// A component function.
    Component(Component),
}

impl From<&str> for NodeType {
    fn from(tag: &str) -> Self {
        Self::Tag(tag.into())
    }
}

impl From<String> for NodeType {
    fn from(tag: String) -> Self {
        Self::Tag(tag)
    }
}

impl From<Component> for NodeType {
    fn from(component: Component) -> Self {
        Self::Component(component)
    }
}

/// A host element description.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    props: Props,
    children: Vec<VNode>,
}

impl Element {
    /// Creates an element description.
    #[must_use]
    pub const fn new(tag: String, props: Props, children: Vec<VNode>) -> Self {
        Self {
            tag,
            props,
            children,
        }
    }

    /// The element tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The element props.
    #[must_use]
    pub const fn props(&self) -> &Props {
        &self.props
    }

    /// The element children.
    #[must_use]
    pub fn children(&self) -> &[VNode] {
        &self.children
    }
}

/// A component invocation waiting to be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentNode {
    component: Component,
    props: Props,
    children: Vec<VNode>,
}

impl ComponentNode {
    /// Creates a component invocation.
    #[must_use]
    pub const fn new(component: Component, props: Props, children: Vec<VNode>) -> Self {
        Self {
            component,
            props,
            children,
        }
    }

    /// The component being invoked.
    #[must_use]
    pub const fn component(&self) -> &Component {
        &self.component
    }

    /// The props the component receives.
    #[must_use]
    pub const fn props(&self) -> &Props {
        &self.props
    }

    /// Children supplied at the call site.
    #[must_use]
    pub fn children(&self) -> &[VNode] {
        &self.children
    }

    /// Invokes the component with its props.
    #[must_use]
    pub fn resolve(&self) -> VNode {
        self.component.render(&self.props)
    }
}

/// A virtual node.
#[derive(Debug, Clone, PartialEq)]
pub enum VNode {
    /// A text node.
    Leaf(Leaf),
    /// A host element.
    Element(Element),
    /// A component, resolved before it reaches the host.
    Component(ComponentNode),
}

impl VNode {
    /// Creates a text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Leaf(Leaf::Text(text.into()))
    }

    /// Returns the props of an element or component node.
    #[must_use]
    pub const fn props(&self) -> Option<&Props> {
        match self {
            Self::Leaf(_) => None,
            Self::Element(element) => Some(&element.props),
            Self::Component(node) => Some(&node.props),
        }
    }

    /// Returns the children of an element or component node. Leaves have none.
    #[must_use]
    pub fn children(&self) -> &[VNode] {
        match self {
            Self::Leaf(_) => &[],
            Self::Element(element) => &element.children,
            Self::Component(node) => &node.children,
        }
    }

    /// Invokes components until a leaf or element is reached.
    #[must_use]
    pub fn resolve(&self) -> Self {
        let mut node = self.clone();
        while let Self::Component(component) = node {
            node = component.resolve();
        }
        node
    }
}

impl From<Leaf> for VNode {
    fn from(leaf: Leaf) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<Element> for VNode {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<&str> for VNode {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for VNode {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

/// Values that can appear in a children position.
///
/// Nested lists and options are flattened into a single ordered sequence, so mapped
/// lists and conditional children compose without wrappers.
pub trait IntoChildren {
    /// Appends the children represented by `self` to `out`.
    fn push_into(self, out: &mut Vec<VNode>);
}

impl IntoChildren for VNode {
    fn push_into(self, out: &mut Vec<VNode>) {
        out.push(self);
    }
}

impl IntoChildren for Leaf {
    fn push_into(self, out: &mut Vec<VNode>) {
        out.push(VNode::Leaf(self));
    }
}

impl IntoChildren for &str {
    fn push_into(self, out: &mut Vec<VNode>) {
        out.push(VNode::text(self));
    }
}

impl IntoChildren for String {
    fn push_into(self, out: &mut Vec<VNode>) {
        out.push(VNode::text(self));
    }
}

impl IntoChildren for &String {
    fn push_into(self, out: &mut Vec<VNode>) {
        out.push(VNode::text(self.clone()));
    }
}

impl IntoChildren for PropValue {
    fn push_into(self, out: &mut Vec<VNode>) {
        if let Some(leaf) = self.to_leaf() {
            out.push(VNode::Leaf(leaf));
        }
    }
}

impl IntoChildren for &PropValue {
    fn push_into(self, out: &mut Vec<VNode>) {
        if let Some(leaf) = self.to_leaf() {
            out.push(VNode::Leaf(leaf));
        }
    }
}

impl<T: IntoChildren> IntoChildren for Option<T> {
    fn push_into(self, out: &mut Vec<VNode>) {
        if let Some(children) = self {
            children.push_into(out);
        }
    }
}

impl<T: IntoChildren> IntoChildren for Vec<T> {
    fn push_into(self, out: &mut Vec<VNode>) {
        for child in self {
            child.push_into(out);
        }
    }
}

impl<T: IntoChildren, const N: usize> IntoChildren for [T; N] {
    fn push_into(self, out: &mut Vec<VNode>) {
        for child in self {
            child.push_into(out);
        }
    }
}

macro_rules! impl_number_children {
    ($($ty:ty),*) => {
        $(
            impl IntoChildren for $ty {
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn push_into(self, out: &mut Vec<VNode>) {
                    out.push(VNode::Leaf(Leaf::Number(self as f64)));
                }
            }
        )*
    };
}

impl_number_children!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

macro_rules! impl_tuple_children {
    ($($ty:ident),*) => {
        #[allow(non_snake_case, unused_variables)]
        impl<$($ty: IntoChildren),*> IntoChildren for ($($ty,)*) {
            fn push_into(self, out: &mut Vec<VNode>) {
                let ($($ty,)*) = self;
                $($ty.push_into(out);)*
            }
        }
    };
}

tuples!(impl_tuple_children);

/// Builds a virtual node from a type, optional props and children.
///
/// Missing props default to an empty mapping and children are flattened in order.
/// Nothing is validated here.
///
/// ```
/// use gvdom_core::{Props, build};
///
/// let node = build("div", Some(Props::from([("id", "a")])), build("span", None, "hi"));
/// assert_eq!(node.children().len(), 1);
/// ```
pub fn build(ty: impl Into<NodeType>, props: Option<Props>, children: impl IntoChildren) -> VNode {
    let props = props.unwrap_or_default();
    let mut collected = Vec::new();
    children.push_into(&mut collected);

    match ty.into() {
        NodeType::Tag(tag) => VNode::Element(Element::new(tag, props, collected)),
        NodeType::Component(component) => {
            VNode::Component(ComponentNode::new(component, props, collected))
        }
    }
}
