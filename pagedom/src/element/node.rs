use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::rect::Rect;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Unattached element description. Becomes a live node once inserted into a
/// [`Document`](crate::Document).
#[derive(Debug, Clone)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: String,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,

    // Visual
    pub style: BTreeMap<String, String>,

    // Geometry
    pub rect: Rect,
    /// Total scrollable width; `None` means the content fits the box.
    pub scroll_width: Option<f32>,

    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            id: generate_id(&tag),
            tag,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            style: BTreeMap::new(),
            rect: Rect::default(),
            scroll_width: None,
            children: Vec::new(),
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn section() -> Self {
        Self::new("section")
    }

    pub fn button() -> Self {
        Self::new("button")
    }

    pub fn main() -> Self {
        Self::new("main")
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Boolean attribute (`<div data-slider>`).
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.attr(name, "")
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn scroll_width(mut self, width: f32) -> Self {
        self.scroll_width = Some(width);
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }
}
