//! The closed set of DOM element types that `new` lowers to bridge classes.
//!
//! Any other name after `new` is an ordinary object creation.

/// Element type name and the tag passed to `document.createElement`.
pub const DOM_ELEMENTS: &[(&str, &str)] = &[
    ("HTMLElement", "div"),
    ("HTMLDivElement", "div"),
    ("HTMLSpanElement", "span"),
    ("HTMLParagraphElement", "p"),
    ("HTMLHeadingElement", "h1"),
    ("HTMLButtonElement", "button"),
    ("HTMLInputElement", "input"),
    ("HTMLTextAreaElement", "textarea"),
    ("HTMLSelectElement", "select"),
    ("HTMLLabelElement", "label"),
    ("HTMLFormElement", "form"),
    ("HTMLAnchorElement", "a"),
    ("HTMLImageElement", "img"),
    ("HTMLCanvasElement", "canvas"),
    ("HTMLUListElement", "ul"),
    ("HTMLLIElement", "li"),
];

pub fn is_dom_element(name: &str) -> bool {
    tag_for(name).is_some()
}

pub fn tag_for(name: &str) -> Option<&'static str> {
    DOM_ELEMENTS
        .iter()
        .find(|(element, _)| *element == name)
        .map(|(_, tag)| *tag)
}

/// Maps a source-style member name onto the DOM's camelCase name:
/// `TextContent` becomes `textContent`, `appendChild` is unchanged.
pub fn dom_member_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_elements() {
        assert!(is_dom_element("HTMLButtonElement"));
        assert_eq!(tag_for("HTMLAnchorElement"), Some("a"));
        assert!(!is_dom_element("Button"));
        assert!(!is_dom_element("htmlbuttonelement"));
    }

    #[test]
    fn test_dom_member_name() {
        assert_eq!(dom_member_name("TextContent"), "textContent");
        assert_eq!(dom_member_name("appendChild"), "appendChild");
        assert_eq!(dom_member_name("ID"), "iD");
        assert_eq!(dom_member_name(""), "");
    }
}
