use super::*;

fn sample_tree() -> Element {
    Element::new("div").with_child(
        Element::new("ul").with_child(
            Element::new("li")
                .with_child(Element::new("span").with_text("a@x.com"))
                .with_child(
                    Element::new("button")
                        .with_class("delete-btn")
                        .with_attr("data-email", "a@x.com")
                        .with_text("✖"),
                ),
        ),
    )
}

#[test]
fn escapes_markup_in_text_and_attributes() {
    let element = Element::new("span")
        .with_attr("data-email", "\"><b title='x'>")
        .with_text("<i>'x' & co");
    let html = element.to_html();
    assert!(!html.contains("<b"));
    assert!(!html.contains("<i>"));
    assert_eq!(
        html,
        "<span data-email=\"&quot;&gt;&lt;b title=&#x27;x&#x27;&gt;\">\
         &lt;i&gt;&#x27;x&#x27; &amp; co</span>"
    );
}

#[test]
fn text_content_keeps_raw_text() {
    let element = Element::new("p")
        .with_child(Element::new("strong").with_text("Schedule:"))
        .with_text(" <Fridays>");
    assert_eq!(element.text_content(), "Schedule: <Fridays>");
}

#[test]
fn closest_walks_up_from_the_activated_node() {
    let tree = sample_tree();
    // Text node inside the button.
    let button = tree.closest(&[0, 0, 1, 0], "delete-btn").expect("button");
    assert_eq!(button.attr("data-email"), Some("a@x.com"));
    // Span next to the button has no delete control in its ancestry.
    assert!(tree.closest(&[0, 0, 0], "delete-btn").is_none());
}

#[test]
fn ancestry_stops_at_invalid_index() {
    let tree = sample_tree();
    let chain = tree.ancestry(&[0, 7, 1]);
    assert_eq!(chain.len(), 2);
    assert_eq!(chain[1].tag(), "ul");
}

#[test]
fn find_path_locates_nested_element() {
    let tree = sample_tree();
    let path = tree
        .find_path(&|element: &Element| element.has_class("delete-btn"))
        .expect("path");
    assert_eq!(path, vec![0, 0, 1]);
}

#[test]
fn set_attr_overwrites_existing_value() {
    let mut element = Element::new("option").with_attr("value", "a");
    element.set_attr("value", "b");
    element.set_attr("selected", "selected");
    assert_eq!(element.attr("value"), Some("b"));
    element.remove_attr("selected");
    assert_eq!(element.to_html(), "<option value=\"b\"></option>");
}

#[test]
fn has_class_matches_whole_class_names() {
    let element = Element::new("div").with_class("success hidden");
    assert!(element.has_class("hidden"));
    assert!(element.has_class("success"));
    assert!(!element.has_class("hid"));
}
