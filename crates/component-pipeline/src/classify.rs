//! Splitting of top-level markup into document sections and component content.

use markup_parser::Document;
use std::fmt;

/// A section of the host HTML document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    /// `<head>`
    Head,
    /// `<body>`
    Body,
}

impl Section {
    /// Maps a tag name to a section, ignoring ASCII case.
    pub fn from_tag(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("head") {
            Some(Section::Head)
        } else if name.eq_ignore_ascii_case("body") {
            Some(Section::Body)
        } else {
            None
        }
    }

    /// Returns the section name as used by the host document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Head => "head",
            Section::Body => "body",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The inner content of one top-level `<head>` or `<body>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralSection {
    pub section: Section,
    /// The verbatim source between the start and end tags.
    pub content: String,
}

/// The outcome of [`classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Structural sections in document order.
    pub structural: Vec<StructuralSection>,
    /// True when no structural section was found.
    pub is_component: bool,
}

/// Partitions the root-level nodes of `document`.
///
/// Every direct child of the root named `head` or `body` becomes its own
/// [`StructuralSection`]; repeated sections are not merged. Elements with those
/// names nested deeper are ordinary content. A document without any structural
/// section, including an empty one, is a component.
pub fn classify(document: &Document, source: &str) -> Classification {
    let structural: Vec<StructuralSection> = document
        .root_elements()
        .filter_map(|el| {
            Section::from_tag(&el.name).map(|section| StructuralSection {
                section,
                content: el.inner_html(source).to_string(),
            })
        })
        .collect();

    Classification {
        is_component: structural.is_empty(),
        structural,
    }
}
