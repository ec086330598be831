/// Snapshot of the live DOM into a PageNode tree

use wasm_bindgen::JsCast;
use web_sys::{Element, Node, Window};

use crate::page_node::{ComputedStyle, ElementNode, PageNode};

/// Copy `node` and its subtree, reading each element's computed style once
pub fn snapshot(node: &Node, window: &Window) -> PageNode {
    match node.node_type() {
        Node::TEXT_NODE => PageNode::Text(node.text_content().unwrap_or_default()),
        Node::ELEMENT_NODE => {
            let element: &Element = node.unchecked_ref();
            PageNode::Element(ElementNode {
                tag: element.tag_name(),
                style: computed_style(window, element),
                children: snapshot_children(node, window),
            })
        }
        _ => PageNode::Other,
    }
}

fn snapshot_children(node: &Node, window: &Window) -> Vec<PageNode> {
    let children = node.child_nodes();
    (0..children.length())
        .filter_map(|i| children.item(i))
        .map(|child| snapshot(&child, window))
        .collect()
}

/// Falls back to the default (visible) style when the browser has none,
/// e.g. for elements in a detached subtree.
fn computed_style(window: &Window, element: &Element) -> ComputedStyle {
    match window.get_computed_style(element) {
        Ok(Some(declaration)) => {
            let defaults = ComputedStyle::default();
            let read = |name: &str, fallback: String| {
                declaration
                    .get_property_value(name)
                    .ok()
                    .filter(|value| !value.is_empty())
                    .unwrap_or(fallback)
            };
            ComputedStyle {
                display: read("display", defaults.display),
                visibility: read("visibility", defaults.visibility),
                opacity: read("opacity", defaults.opacity),
            }
        }
        _ => {
            log::debug!("No computed style for <{}>", element.tag_name().to_lowercase());
            ComputedStyle::default()
        }
    }
}
