use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::document::Node;

/// Errors produced when parsing a selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unsupported selector syntax: {0:?}")]
    Unsupported(String),
}

/// Attribute condition inside `[...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

/// A compound simple selector: optional tag followed by any number of
/// `#id`, `.class`, `[attr]` and `[attr=value]` parts.
///
/// Combinators are not supported; scope queries with
/// [`Document::query_selector`](crate::Document::query_selector) instead.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

fn compound_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"^([A-Za-z][\w-]*|\*)?((?:#[\w-]+|\.[\w-]+|\[[\w-]+(?:=(?:"[^"]*"|'[^']*'|[^\]"']*))?\])*)$"#,
        )
        .expect("compound selector pattern is valid")
    })
}

fn part_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"#([\w-]+)|\.([\w-]+)|\[([\w-]+)(?:=(?:"([^"]*)"|'([^']*)'|([^\]"']*)))?\]"#,
        )
        .expect("selector part pattern is valid")
    })
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SelectorError::Empty);
        }

        let captures = compound_re()
            .captures(input)
            .ok_or_else(|| SelectorError::Unsupported(input.to_string()))?;

        let mut selector = Selector {
            tag: captures
                .get(1)
                .map(|m| m.as_str())
                .filter(|tag| *tag != "*")
                .map(str::to_ascii_lowercase),
            ..Default::default()
        };

        let parts = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
        for part in part_re().captures_iter(parts) {
            if let Some(id) = part.get(1) {
                selector.id = Some(id.as_str().to_string());
            } else if let Some(class) = part.get(2) {
                selector.classes.push(class.as_str().to_string());
            } else if let Some(name) = part.get(3) {
                let value = part
                    .get(4)
                    .or_else(|| part.get(5))
                    .or_else(|| part.get(6))
                    .map(|m| m.as_str().to_string());
                selector.attrs.push(AttrMatch {
                    name: name.as_str().to_string(),
                    value,
                });
            }
        }

        Ok(selector)
    }

    /// Check whether a live node satisfies every part of the selector.
    pub fn matches(&self, node: &Node) -> bool {
        if let Some(tag) = &self.tag {
            if !node.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.id() != id {
                return false;
            }
        }
        if !self.classes.iter().all(|class| node.has_class(class)) {
            return false;
        }
        self.attrs.iter().all(|attr| match (node.attr(&attr.name), &attr.value) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
        })
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
