//! Owned element tree standing in for the page DOM.
//!
//! Text and attribute values are stored raw and escaped only when serialized, so nothing a
//! server sends can become markup.

use std::fmt::Write as _;

use askama_escape::{escape, Html};

/// Child indices leading from a container element down to a node.
pub type NodePath = Vec<usize>;

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Element(element) => element.write_html(out),
            Self::Text(text) => {
                let _ = write!(out, "{}", escape(text, Html));
            }
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
            Self::Text(text) => out.push_str(text),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::text(text));
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(key, _)| key != name);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Drops every child and installs `children` in their place.
    pub fn replace_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Elements from `self` down to the node at `path`. A path ending on a text node yields
    /// the chain up to its parent element; an invalid index truncates the chain.
    pub fn ancestry(&self, path: &[usize]) -> Vec<&Element> {
        let mut chain = vec![self];
        let mut current = self;
        for &index in path {
            match current.children.get(index) {
                Some(Node::Element(child)) => {
                    chain.push(child);
                    current = child;
                }
                _ => break,
            }
        }
        chain
    }

    /// Nearest element carrying `class`, starting at the node at `path` and walking up to
    /// (and including) `self`.
    pub fn closest(&self, path: &[usize], class: &str) -> Option<&Element> {
        self.ancestry(path)
            .into_iter()
            .rev()
            .find(|element| element.has_class(class))
    }

    /// Depth-first search for the first descendant matching `predicate`.
    pub fn find_path(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<NodePath> {
        for (index, child) in self.children.iter().enumerate() {
            let Node::Element(child) = child else {
                continue;
            };
            if predicate(child) {
                return Some(vec![index]);
            }
            if let Some(mut rest) = child.find_path(predicate) {
                rest.insert(0, index);
                return Some(rest);
            }
        }
        None
    }

    pub fn descendants_with_class<'a>(&'a self, class: &str, out: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            if child.has_class(class) {
                out.push(child);
            }
            child.descendants_with_class(class, out);
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape(value, Html));
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

#[cfg(test)]
#[path = "tests/dom_tests.rs"]
mod tests;
