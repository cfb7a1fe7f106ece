macro_rules! tuples {
    ($macro:ident) => {
        $macro!();
        $macro!(T0);
        $macro!(T0, T1);
        $macro!(T0, T1, T2);
        $macro!(T0, T1, T2, T3);
        $macro!(T0, T1, T2, T3, T4);
        $macro!(T0, T1, T2, T3, T4, T5);
        $macro!(T0, T1, T2, T3, T4, T5, T6);
        $macro!(T0, T1, T2, T3, T4, T5, T6, T7);
        $macro!(T0, T1, T2, T3, T4, T5, T6, T7, T8);
        $macro!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9);
        $macro!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
        $macro!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
    };
}

/// Builds a [`Props`](crate::Props) mapping from `key => value` pairs.
///
/// Values go through `Into<PropValue>`, so strings, numbers, booleans, handlers and
/// `Option`s of those are accepted.
///
/// ```
/// use gvdom_core::props;
///
/// let props = props! { "id" => "main", "tabindex" => 0, "hidden" => false };
/// assert_eq!(props.get_str("id"), Some("main"));
/// ```
#[macro_export]
macro_rules! props {
    () => {
        $crate::Props::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut props = $crate::Props::new();
        $( props.insert($key, $value); )+
        props
    }};
}

/// Markup shorthand for [`build`](crate::build).
///
/// The first argument is the node type (a tag or a [`Component`](crate::Component)), the
/// second an optional brace-delimited prop list, the rest are children.
///
/// ```
/// use gvdom_core::h;
///
/// let node = h!("div", { "id" => "a" }, h!("span", {}, "hi"), 42);
/// assert_eq!(node.children().len(), 2);
/// ```
#[macro_export]
macro_rules! h {
    ($ty:expr) => {
        $crate::build($ty, ::core::option::Option::None, ())
    };
    ($ty:expr, { $($key:expr => $value:expr),* $(,)? } $(, $child:expr)* $(,)?) => {{
        #[allow(unused_mut)]
        let mut children = ::std::vec::Vec::<$crate::VNode>::new();
        $( $crate::IntoChildren::push_into($child, &mut children); )*
        $crate::build(
            $ty,
            ::core::option::Option::Some($crate::props!($($key => $value),*)),
            children,
        )
    }};
}
