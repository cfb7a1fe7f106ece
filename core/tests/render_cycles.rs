//! Multi-render scenarios driven through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use gvdom_core::memory::{Document, Mutation};
use gvdom_core::{Component, Event, Props, RenderRoot, VNode, build, h, handler, props};

fn todo_item(props: &Props) -> VNode {
    let done = props.get_bool("done").unwrap_or(false);
    h!(
        "li",
        { "class" => if done { "done" } else { "open" } },
        h!("input", { "type" => "checkbox", "checked" => done }),
        props.get("label"),
    )
}

fn todo_list(items: &[(&str, bool)]) -> VNode {
    build(
        "ul",
        Some(props! { "id" => "todos" }),
        items
            .iter()
            .map(|(label, done)| {
                build(
                    Component::new(todo_item),
                    Some(props! { "label" => *label, "done" => *done }),
                    (),
                )
            })
            .collect::<Vec<_>>(),
    )
}

fn root() -> RenderRoot<Document> {
    let mut doc = Document::new();
    let container = doc.create_root("main");
    RenderRoot::new(doc, container)
}

fn html(root: &RenderRoot<Document>) -> String {
    root.host().inner_html(*root.container())
}

#[test]
fn todo_list_lifecycle() {
    let mut root = root();

    root.render(todo_list(&[("milk", false)])).unwrap();
    assert_eq!(
        html(&root),
        "<ul id=\"todos\"><li class=\"open\"><input type=\"checkbox\">milk</li></ul>"
    );

    root.host_mut().clear_mutations();
    root.render(todo_list(&[("milk", true), ("eggs", false)])).unwrap();
    assert_eq!(
        html(&root),
        "<ul id=\"todos\">\
         <li class=\"done\"><input checked type=\"checkbox\">milk</li>\
         <li class=\"open\"><input type=\"checkbox\">eggs</li>\
         </ul>"
    );
    assert!(
        !root
            .host()
            .mutations()
            .iter()
            .any(|m| matches!(m, Mutation::ReplaceChild { .. }))
    );

    root.render(todo_list(&[])).unwrap();
    assert_eq!(html(&root), "<ul id=\"todos\"></ul>");

    root.unmount().unwrap();
    assert_eq!(html(&root), "");
}

#[test]
fn handlers_survive_rerenders_until_swapped() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let save_log = log.clone();
    let save = handler(move |event: &Event| save_log.borrow_mut().push(event.kind().to_owned()));

    let view = |label: &str| h!("button", { "onClick" => save.clone() }, label);

    let mut root = root();
    root.render(view("Save")).unwrap();
    let button = root.host().children(*root.container())[0];

    root.host_mut().clear_mutations();
    root.render(view("Saving")).unwrap();
    assert!(
        root.host()
            .mutations()
            .iter()
            .all(|m| !matches!(m, Mutation::AddListener { .. } | Mutation::RemoveListener { .. }))
    );

    root.host().dispatch(button, &Event::new("click"));
    assert_eq!(log.borrow().as_slice(), ["click"]);
    assert_eq!(root.host().listener_count(button, "click"), 1);
}

#[test]
fn root_level_type_change_replaces_container_child() {
    let mut root = root();
    root.render(h!("p", {}, "loading")).unwrap();
    root.render(h!("table", {}, h!("tr", {}, h!("td", {}, 1)))).unwrap();
    assert_eq!(html(&root), "<table><tr><td>1</td></tr></table>");
    assert_eq!(root.host().children(*root.container()).len(), 1);
}

#[test]
fn alternating_renders_do_not_accumulate_nodes() {
    let token = Rc::new(());
    let mut root = root();

    for round in 0..1000 {
        let captured = token.clone();
        let on_click = handler(move |_| {
            let _token = &captured;
        });
        let tag = if round % 2 == 0 { "p" } else { "div" };
        root.render(h!(tag, { "onClick" => on_click })).unwrap();
    }

    assert_eq!(root.host().children(*root.container()).len(), 1);
    assert_eq!(root.host().len(), 2);
    // Only the last handler is still alive.
    assert_eq!(Rc::strong_count(&token), 2);
}
