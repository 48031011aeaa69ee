//! UI injection: render greetings into a document-like surface
//!
//! The greeter only knows the [`UiInjector`] trait. [`MemoryDocument`] is a
//! small in-memory implementation with flat elements and the three simple
//! selector forms `#id`, `.class` and `tag`.

use std::fmt::Write;
use std::sync::{Mutex, PoisonError};

/// Sets the inner content of every element matching a selector
pub trait UiInjector: Send + Sync {
    /// Returns how many elements were updated. Zero matches is not an error.
    fn set_html(&self, selector: &str, html: &str) -> usize;
}

/// A single element of a [`MemoryDocument`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub inner_html: String,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            inner_html: String::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.inner_html = html.into();
        self
    }

    fn matches(&self, selector: &Selector<'_>) -> bool {
        match selector {
            Selector::Id(id) => self.id.as_deref() == Some(*id),
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
            Selector::Tag(tag) => self.tag.eq_ignore_ascii_case(tag),
        }
    }

    fn render_into(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if let Some(id) = &self.id {
            let _ = write!(out, " id=\"{}\"", id);
        }
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", self.classes.join(" "));
        }
        let _ = write!(out, ">{}</{}>", self.inner_html, self.tag);
    }
}

/// Parsed form of a simple selector
#[derive(Debug, PartialEq, Eq)]
enum Selector<'a> {
    Id(&'a str),
    Class(&'a str),
    Tag(&'a str),
}

impl<'a> Selector<'a> {
    fn parse(raw: &'a str) -> Option<Self> {
        let raw = raw.trim();
        if let Some(id) = raw.strip_prefix('#') {
            (!id.is_empty()).then_some(Self::Id(id))
        } else if let Some(class) = raw.strip_prefix('.') {
            (!class.is_empty()).then_some(Self::Class(class))
        } else if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            Some(Self::Tag(raw))
        } else {
            None
        }
    }
}

/// In-memory document of flat elements
#[derive(Debug, Default)]
pub struct MemoryDocument {
    elements: Mutex<Vec<Element>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elements(elements: impl IntoIterator<Item = Element>) -> Self {
        Self {
            elements: Mutex::new(elements.into_iter().collect()),
        }
    }

    /// Login page with an `<h1 id="greeting">` placeholder
    pub fn demo_page() -> Self {
        Self::with_elements([
            Element::new("h1").with_id("greeting"),
            Element::new("label").with_html("Language"),
            Element::new("select").with_id("lang").with_html(
                "<option value=\"en\">English</option><option value=\"es\">Español</option>",
            ),
            Element::new("button")
                .with_id("login")
                .with_class("btn")
                .with_html("Login"),
        ])
    }

    pub fn push(&self, element: Element) {
        self.lock().push(element);
    }

    /// Inner content of the first element matching `selector`
    pub fn inner_html(&self, selector: &str) -> Option<String> {
        let selector = Selector::parse(selector)?;
        self.lock()
            .iter()
            .find(|el| el.matches(&selector))
            .map(|el| el.inner_html.clone())
    }

    /// Render every element as HTML, one per line
    pub fn render(&self) -> String {
        let mut out = String::new();
        for element in self.lock().iter() {
            element.render_into(&mut out);
            out.push('\n');
        }
        out
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Element>> {
        self.elements.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl UiInjector for MemoryDocument {
    fn set_html(&self, selector: &str, html: &str) -> usize {
        let Some(selector) = Selector::parse(selector) else {
            tracing::debug!("Unsupported selector {:?}, nothing updated", selector);
            return 0;
        };

        let mut updated = 0;
        for element in self.lock().iter_mut().filter(|el| el.matches(&selector)) {
            element.inner_html = html.to_string();
            updated += 1;
        }
        updated
    }
}
