//! Counter demo.
//!
//! Renders a counter component into an in-memory document, clicks its buttons by
//! dispatching events and re-renders after every click, printing the markup and the
//! number of host mutations each update needed.

use std::cell::Cell;
use std::rc::Rc;

use gvdom::memory::{MemoryError, NodeId};
use gvdom::prelude::*;

fn counter(props: &Props) -> VNode {
    let count = props.get_number("count").unwrap_or_default();
    h!(
        "section",
        { "class" => "counter" },
        h!("h1", {}, "Count: ", count),
        h!("button", { "id" => "dec", "onClick" => props.get("onDecrement").cloned() }, "-"),
        h!("button", { "id" => "inc", "onClick" => props.get("onIncrement").cloned() }, "+"),
        (count >= 3.0).then(|| h!("p", { "class" => "note" }, "That is a lot of clicks")),
    )
}

fn find_button(doc: &Document, body: NodeId, id: &str) -> Option<NodeId> {
    let section = *doc.children(body).first()?;
    doc.children(section)
        .iter()
        .copied()
        .find(|child| doc.attribute(*child, "id") == Some(id))
}

fn main() -> Result<(), MemoryError> {
    gvdom::logging::install_tracing();

    let count = Rc::new(Cell::new(0_i32));
    let on_increment = {
        let count = count.clone();
        handler(move |_| count.set(count.get() + 1))
    };
    let on_decrement = {
        let count = count.clone();
        handler(move |_| count.set(count.get() - 1))
    };

    let view = |value: i32| {
        build(
            Component::new(counter),
            Some(props! {
                "count" => value,
                "onIncrement" => on_increment.clone(),
                "onDecrement" => on_decrement.clone(),
            }),
            (),
        )
    };

    let mut doc = Document::new();
    let body = doc.create_root("body");
    let mut root = RenderRoot::new(doc, body);

    root.render(view(count.get()))?;
    println!("{}", root.host().inner_html(body));

    for id in ["inc", "inc", "inc", "dec"] {
        let Some(button) = find_button(root.host(), body, id) else {
            tracing::warn!(id, "button not rendered");
            continue;
        };
        root.host().dispatch(button, &Event::new("click"));

        root.host_mut().clear_mutations();
        root.render(view(count.get()))?;
        let mutations = root.host().mutations().len();
        tracing::info!(id, count = count.get(), mutations, "re-rendered");
        println!("{}", root.host().inner_html(body));
    }

    root.unmount()?;
    Ok(())
}
