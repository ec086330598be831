/// Visibility rules applied to computed style
use crate::page_node::ComputedStyle;

/// Whether an element contributes text to an extraction.
///
/// Hidden when any of:
/// - display is "none"
/// - visibility is "hidden"
/// - opacity is exactly the string "0" ("0.01" and "0.0" stay visible)
pub fn is_visible(style: &ComputedStyle) -> bool {
    style.display != "none" && style.visibility != "hidden" && style.opacity != "0"
}

/// Whether an element's text shows up in its ancestors' rendered inner text.
/// Opacity does not hide text from inner text, so only display and
/// visibility are checked.
pub fn is_rendered(style: &ComputedStyle) -> bool {
    style.display != "none" && style.visibility != "hidden"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_is_visible() {
        assert!(is_visible(&ComputedStyle::default()));
        assert!(is_rendered(&ComputedStyle::default()));
    }

    #[test]
    fn test_display_none_hides() {
        let style = ComputedStyle::default().with_display("none");
        assert!(!is_visible(&style));
        assert!(!is_rendered(&style));
    }

    #[test]
    fn test_visibility_hidden_hides() {
        let style = ComputedStyle::default().with_visibility("hidden");
        assert!(!is_visible(&style));
        assert!(!is_rendered(&style));
    }

    #[test]
    fn test_opacity_compared_as_string() {
        assert!(!is_visible(&ComputedStyle::default().with_opacity("0")));
        assert!(is_visible(&ComputedStyle::default().with_opacity("0.01")));
        assert!(is_visible(&ComputedStyle::default().with_opacity("0.0")));
        assert!(is_rendered(&ComputedStyle::default().with_opacity("0")));
    }

    #[test]
    fn test_other_display_values_are_visible() {
        for display in ["inline", "flex", "contents", "table-cell", ""] {
            assert!(is_visible(&ComputedStyle::default().with_display(display)));
        }
        assert!(is_visible(&ComputedStyle::default().with_visibility("collapse")));
    }
}
