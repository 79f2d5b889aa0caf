//! The subset of CSS selectors understood by the [MemoryHost](super::MemoryHost).
//!
//! Supported: type, `#id`, `.class`, `*`, `[attr]`, `[attr="value"]`,
//! `[attr^="prefix"]`, the descendant combinator and selector lists.

use nameth::NamedEnumValues as _;
use nameth::nameth;

use super::MemoryElement;
use crate::host::PageElement as _;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList(Vec<ComplexSelector>);

/// Compounds separated by descendant combinators.
#[derive(Debug, Clone, PartialEq)]
struct ComplexSelector(Vec<Compound>);

#[derive(Debug, Clone, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeSelector>,
}

#[derive(Debug, Clone, PartialEq)]
struct AttributeSelector {
    name: String,
    operator: AttributeOperator,
}

#[derive(Debug, Clone, PartialEq)]
enum AttributeOperator {
    Exists,
    Equals(String),
    StartsWith(String),
}

impl SelectorList {
    pub fn parse(selector: &str) -> Result<Self, SelectorError> {
        let complex = split_outside_brackets(selector, |c| c == ',')
            .into_iter()
            .map(|part| {
                let compounds = split_outside_brackets(part, char::is_whitespace)
                    .into_iter()
                    .filter(|compound| !compound.is_empty())
                    .map(Compound::parse)
                    .collect::<Result<Vec<_>, _>>()?;
                if compounds.is_empty() {
                    return Err(SelectorError::Empty(selector.to_owned()));
                }
                Ok(ComplexSelector(compounds))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(complex))
    }

    pub fn matches(&self, element: &MemoryElement) -> bool {
        self.0.iter().any(|complex| complex.matches(element))
    }
}

impl ComplexSelector {
    fn matches(&self, element: &MemoryElement) -> bool {
        let Some((subject, ancestors)) = self.0.split_last() else {
            return false;
        };
        if !subject.matches(element) {
            return false;
        }
        let mut current = element.parent();
        for compound in ancestors.iter().rev() {
            loop {
                let Some(ancestor) = current else {
                    return false;
                };
                current = ancestor.parent();
                if compound.matches(&ancestor) {
                    break;
                }
            }
        }
        true
    }
}

impl Compound {
    fn parse(source: &str) -> Result<Self, SelectorError> {
        let mut compound = Self::default();
        let mut chars = source.chars().peekable();
        while let Some(&c) = chars.peek() {
            match c {
                '*' => {
                    chars.next();
                }
                '#' => {
                    chars.next();
                    compound.id = Some(identifier(&mut chars, source)?);
                }
                '.' => {
                    chars.next();
                    compound.classes.push(identifier(&mut chars, source)?);
                }
                '[' => {
                    chars.next();
                    let body: String = chars.by_ref().take_while(|c| *c != ']').collect();
                    compound.attributes.push(AttributeSelector::parse(&body, source)?);
                }
                c if is_identifier_char(c) => {
                    compound.tag = Some(identifier(&mut chars, source)?.to_ascii_uppercase());
                }
                c => return Err(SelectorError::Unexpected(c, source.to_owned())),
            }
        }
        Ok(compound)
    }

    fn matches(&self, element: &MemoryElement) -> bool {
        if let Some(tag) = &self.tag {
            if *tag != element.tag() {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.id().as_ref() != Some(id) {
                return false;
            }
        }
        self.classes.iter().all(|class| element.has_class(class))
            && self
                .attributes
                .iter()
                .all(|attribute| attribute.matches(element))
    }
}

impl AttributeSelector {
    fn parse(body: &str, source: &str) -> Result<Self, SelectorError> {
        let (name, operator) = if let Some((name, value)) = body.split_once("^=") {
            (name, AttributeOperator::StartsWith(unquote(value)))
        } else if let Some((name, value)) = body.split_once('=') {
            (name, AttributeOperator::Equals(unquote(value)))
        } else {
            (body, AttributeOperator::Exists)
        };
        let name = name.trim();
        if name.is_empty() || !name.chars().all(is_identifier_char) {
            return Err(SelectorError::InvalidAttribute(source.to_owned()));
        }
        Ok(Self {
            name: name.to_owned(),
            operator,
        })
    }

    fn matches(&self, element: &MemoryElement) -> bool {
        let Some(value) = element.attr(&self.name) else {
            return false;
        };
        match &self.operator {
            AttributeOperator::Exists => true,
            AttributeOperator::Equals(expected) => value == *expected,
            AttributeOperator::StartsWith(prefix) => value.starts_with(prefix.as_str()),
        }
    }
}

fn identifier(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    source: &str,
) -> Result<String, SelectorError> {
    let mut identifier = String::new();
    while let Some(c) = chars.next_if(|c| is_identifier_char(*c)) {
        identifier.push(c);
    }
    if identifier.is_empty() {
        return Err(SelectorError::Empty(source.to_owned()));
    }
    Ok(identifier)
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn unquote(value: &str) -> String {
    let value = value.trim();
    let unquoted = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value);
    unquoted.to_owned()
}

fn split_outside_brackets(source: &str, is_separator: impl Fn(char) -> bool) -> Vec<&str> {
    let mut parts = vec![];
    let mut depth = 0;
    let mut start = 0;
    for (i, c) in source.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth -= 1,
            c if depth == 0 && is_separator(c) => {
                parts.push(source[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(source[start..].trim());
    parts
}

#[nameth]
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SelectorError {
    #[error("[{n}] Empty selector in '{0}'", n = self.name())]
    Empty(String),

    #[error("[{n}] Unexpected '{0}' in '{1}'", n = self.name())]
    Unexpected(char, String),

    #[error("[{n}] Invalid attribute selector in '{0}'", n = self.name())]
    InvalidAttribute(String),
}

#[cfg(test)]
mod tests {
    use super::SelectorError;
    use super::SelectorList;
    use crate::host::memory::MemoryHost;

    #[test]
    fn compound() {
        let host = MemoryHost::new();
        let button = host.body().child(
            host.create("button")
                .with_id("lang-pt")
                .with_class("lang-btn active")
                .with_attr("type", "submit"),
        );
        for selector in [
            "button",
            "BUTTON",
            "*",
            "#lang-pt",
            ".lang-btn",
            ".lang-btn.active",
            "button#lang-pt.active",
            "[type]",
            "button[type=\"submit\"]",
            "[type='submit']",
            "[type^=\"sub\"]",
        ] {
            let list = SelectorList::parse(selector).unwrap();
            assert!(list.matches(&button), "{selector}");
        }
        for selector in ["a", "#lang-en", ".nav-menu", "[href]", "[type=\"reset\"]", "[type^=\"x\"]"] {
            let list = SelectorList::parse(selector).unwrap();
            assert!(!list.matches(&button), "{selector}");
        }
    }

    #[test]
    fn descendant_and_list() {
        let host = MemoryHost::new();
        let nav = host.body().child(host.create("ul").with_class("nav-menu"));
        let item = nav.child(host.create("li"));
        let link = item.child(host.create("a").with_attr("href", "#about"));
        let other = host.body().child(host.create("a").with_attr("href", "/"));

        let nav_links = SelectorList::parse(".nav-menu a").unwrap();
        assert!(nav_links.matches(&link));
        assert!(!nav_links.matches(&other));

        let deep = SelectorList::parse("body .nav-menu li a[href^=\"#\"]").unwrap();
        assert!(deep.matches(&link));

        let list = SelectorList::parse("[data-pt], [data-en]").unwrap();
        assert!(!list.matches(&link));
        let translated = host.body().child(host.create("p").with_attr("data-en", "Hello"));
        assert!(list.matches(&translated));
    }

    #[test]
    fn invalid() {
        assert_eq!(
            Err(SelectorError::Unexpected('>', "a>b".into())),
            SelectorList::parse("a>b")
        );
        assert!(matches!(SelectorList::parse("a,"), Err(SelectorError::Empty(_))));
        assert!(matches!(
            SelectorList::parse("[=x]"),
            Err(SelectorError::InvalidAttribute(_))
        ));
    }
}
