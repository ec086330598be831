/// Read-only snapshot of a rendered document tree

/// Computed style values that decide whether an element contributes text.
/// Values are kept as the strings the browser reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedStyle {
    pub display: String,
    pub visibility: String,
    pub opacity: String,
}

impl ComputedStyle {
    pub fn new(display: &str, visibility: &str, opacity: &str) -> ComputedStyle {
        ComputedStyle {
            display: display.to_string(),
            visibility: visibility.to_string(),
            opacity: opacity.to_string(),
        }
    }

    pub fn with_display(mut self, display: &str) -> Self {
        self.display = display.to_string();
        self
    }

    pub fn with_visibility(mut self, visibility: &str) -> Self {
        self.visibility = visibility.to_string();
        self
    }

    pub fn with_opacity(mut self, opacity: &str) -> Self {
        self.opacity = opacity.to_string();
        self
    }
}

impl Default for ComputedStyle {
    fn default() -> Self {
        ComputedStyle::new("block", "visible", "1")
    }
}

/// An element together with its computed style and ordered children
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub tag: String,
    pub style: ComputedStyle,
    pub children: Vec<PageNode>,
}

impl ElementNode {
    /// Lowercased tag name
    pub fn tag_name(&self) -> String {
        self.tag.to_ascii_lowercase()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// All descendant elements in document order, not including `self`
    pub fn descendants(&self) -> Vec<&ElementNode> {
        let mut found = Vec::new();
        collect_descendants(&self.children, &mut found);
        found
    }

    /// Raw concatenation of every descendant text node, untouched
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        collect_text(&self.children, &mut text);
        text
    }
}

fn collect_descendants<'a>(children: &'a [PageNode], found: &mut Vec<&'a ElementNode>) {
    for child in children {
        if let PageNode::Element(element) = child {
            found.push(element);
            collect_descendants(&element.children, found);
        }
    }
}

fn collect_text(children: &[PageNode], text: &mut String) {
    for child in children {
        match child {
            PageNode::Text(content) => text.push_str(content),
            PageNode::Element(element) => collect_text(&element.children, text),
            PageNode::Other => {}
        }
    }
}

/// A node of the page: text, element, or anything else (comments, etc.)
#[derive(Debug, Clone, PartialEq)]
pub enum PageNode {
    Text(String),
    Element(ElementNode),
    Other,
}

impl PageNode {
    pub fn text(content: &str) -> PageNode {
        PageNode::Text(content.to_string())
    }

    /// Element with the default (visible) style
    pub fn element(tag: &str, children: Vec<PageNode>) -> PageNode {
        PageNode::styled(tag, ComputedStyle::default(), children)
    }

    pub fn styled(tag: &str, style: ComputedStyle, children: Vec<PageNode>) -> PageNode {
        PageNode::Element(ElementNode {
            tag: tag.to_string(),
            style,
            children,
        })
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            PageNode::Element(element) => Some(element),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> PageNode {
        PageNode::element(
            "DIV",
            vec![
                PageNode::element("p", vec![PageNode::text("one")]),
                PageNode::Other,
                PageNode::element(
                    "ul",
                    vec![
                        PageNode::element("li", vec![PageNode::text("two")]),
                        PageNode::element("li", vec![PageNode::text(" three ")]),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn test_descendants_in_document_order() {
        let tree = sample_tree();
        let root = tree.as_element().unwrap();

        let tags: Vec<String> = root.descendants().iter().map(|e| e.tag_name()).collect();

        assert_eq!(tags, vec!["p", "ul", "li", "li"]);
    }

    #[test]
    fn test_text_content_is_raw() {
        let tree = sample_tree();

        assert_eq!(tree.as_element().unwrap().text_content(), "onetwo three ");
    }

    #[test]
    fn test_has_tag_ignores_case() {
        let tree = sample_tree();
        let root = tree.as_element().unwrap();

        assert!(root.has_tag("div"));
        assert!(root.has_tag("Div"));
        assert!(!root.has_tag("span"));
    }

    #[test]
    fn test_style_builders() {
        let style = ComputedStyle::default()
            .with_display("none")
            .with_visibility("hidden")
            .with_opacity("0");

        assert_eq!(style, ComputedStyle::new("none", "hidden", "0"));
        assert!(PageNode::text("x").as_element().is_none());
    }
}
