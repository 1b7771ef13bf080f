//! Rendered element tree
//!
//! The rendering collaborator hands the engine a tree of
//! [`RenderedElement`] nodes describing the surface it produced for a page.
//! The engine mutates this tree in place when replaying overrides; the
//! renderer then materializes it however it likes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Coarse element kind derived from the tag name; drives which attribute
/// overrides may be applied to a rediscovered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    /// `img`
    Image,
    /// `a`, `area`, `link`
    Link,
    /// `video`, `audio`, `source`, `iframe`
    Media,
    /// Everything else
    Generic,
}

impl ElementKind {
    /// Kind for a tag name (lowercase)
    pub fn of_tag(tag: &str) -> Self {
        match tag {
            "img" => ElementKind::Image,
            "a" | "area" | "link" => ElementKind::Link,
            "video" | "audio" | "source" | "iframe" => ElementKind::Media,
            _ => ElementKind::Generic,
        }
    }

    /// Whether an attribute override of the given name applies to this kind
    pub fn supports(&self, property: &str) -> bool {
        match property {
            "src" => matches!(self, ElementKind::Image | ElementKind::Media),
            "alt" => matches!(self, ElementKind::Image),
            "href" => matches!(self, ElementKind::Link),
            _ => false,
        }
    }
}

/// One node of a rendered page surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedElement {
    /// Lowercase tag name
    pub tag: String,
    /// Element attributes (`id`, `class`, `src`, `alt`, `href`, ...)
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Inline style properties
    #[serde(default)]
    pub styles: BTreeMap<String, String>,
    /// Own text content, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Raw markup injected by an `innerHTML` override; opaque to the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_html: Option<String>,
    /// Child elements, in render order
    #[serde(default)]
    pub children: Vec<RenderedElement>,
}

impl RenderedElement {
    /// Create an element with the given tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_lowercase(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            text: None,
            raw_html: None,
            children: Vec::new(),
        }
    }

    /// Set the author-supplied `id` attribute
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    /// Set the `class` attribute
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    /// Set an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set an inline style property
    pub fn with_style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(name.into(), value.into());
        self
    }

    /// Set the text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child element
    pub fn with_child(mut self, child: RenderedElement) -> Self {
        self.children.push(child);
        self
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The author-supplied `id` attribute, if any
    pub fn id_attr(&self) -> Option<&str> {
        self.attr("id").filter(|id| !id.is_empty())
    }

    /// First class name of the `class` attribute, if any
    pub fn first_class(&self) -> Option<&str> {
        self.attr("class")?.split_whitespace().next()
    }

    /// The element's kind for override compatibility checks
    pub fn kind(&self) -> ElementKind {
        ElementKind::of_tag(&self.tag)
    }

    /// Replace the element's content with plain text (children are dropped,
    /// matching `textContent` assignment)
    pub fn set_text_content(&mut self, value: impl Into<String>) {
        self.children.clear();
        self.raw_html = None;
        self.text = Some(value.into());
    }

    /// Replace the element's content with raw markup (children are dropped,
    /// matching `innerHTML` assignment)
    pub fn set_inner_html(&mut self, value: impl Into<String>) {
        self.children.clear();
        self.text = None;
        self.raw_html = Some(value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_of_tag() {
        assert_eq!(ElementKind::of_tag("img"), ElementKind::Image);
        assert_eq!(ElementKind::of_tag("a"), ElementKind::Link);
        assert_eq!(ElementKind::of_tag("video"), ElementKind::Media);
        assert_eq!(ElementKind::of_tag("h1"), ElementKind::Generic);
    }

    #[test]
    fn test_kind_supports() {
        assert!(ElementKind::Image.supports("src"));
        assert!(ElementKind::Image.supports("alt"));
        assert!(!ElementKind::Image.supports("href"));
        assert!(ElementKind::Link.supports("href"));
        assert!(!ElementKind::Generic.supports("src"));
    }

    #[test]
    fn test_first_class() {
        let element = RenderedElement::new("div").with_class("hero-banner dark wide");
        assert_eq!(element.first_class(), Some("hero-banner"));
        assert!(RenderedElement::new("div").first_class().is_none());
    }

    #[test]
    fn test_set_text_content_drops_children() {
        let mut element = RenderedElement::new("p")
            .with_child(RenderedElement::new("span").with_text("old"));
        element.set_text_content("new");

        assert!(element.children.is_empty());
        assert_eq!(element.text.as_deref(), Some("new"));
    }

    #[test]
    fn test_set_inner_html_replaces_text() {
        let mut element = RenderedElement::new("div").with_text("old");
        element.set_inner_html("<b>new</b>");

        assert!(element.text.is_none());
        assert_eq!(element.raw_html.as_deref(), Some("<b>new</b>"));
    }

    #[test]
    fn test_tag_is_lowercased() {
        assert_eq!(RenderedElement::new("IMG").tag, "img");
    }
}
