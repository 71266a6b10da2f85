//! Tree types for parsed markup.

use smol_str::SmolStr;
use source_map::Span;

/// A parsed markup document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// The root-level nodes, in document order.
    pub nodes: Vec<Node>,
    /// The span of the entire document.
    pub span: Span,
}

impl Document {
    /// Returns the root-level elements, skipping text, comments and expressions.
    pub fn root_elements(&self) -> impl Iterator<Item = &Element> {
        self.nodes.iter().filter_map(Node::as_element)
    }

    /// Returns the first root-level element with the given tag name.
    ///
    /// Tag names compare ASCII case-insensitively.
    pub fn root_element(&self, name: &str) -> Option<&Element> {
        self.root_elements().find(|el| el.is(name))
    }
}

/// A node in the markup tree.
#[derive(Debug, Clone)]
pub enum Node {
    /// An element such as `<div>...</div>`.
    Element(Element),
    /// Text between tags.
    Text(Text),
    /// A `<!-- ... -->` comment or a `<!...>` declaration.
    Comment(Comment),
    /// A `{expression}` in text content.
    Expression(Expression),
}

impl Node {
    /// Returns the span of this node.
    pub fn span(&self) -> Span {
        match self {
            Node::Element(n) => n.span,
            Node::Text(n) => n.span,
            Node::Comment(n) => n.span,
            Node::Expression(n) => n.span,
        }
    }

    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Returns the tag name if this node is an element.
    pub fn tag_name(&self) -> Option<&str> {
        self.as_element().map(|el| el.name.as_str())
    }
}

/// An element.
#[derive(Debug, Clone)]
pub struct Element {
    /// The span from `<` of the start tag to `>` of the end tag.
    pub span: Span,
    /// The tag name as written.
    pub name: SmolStr,
    /// The attributes in source order.
    pub attributes: Vec<Attribute>,
    /// The child nodes. Raw-text elements (`script`, `style`) hold a single text child.
    pub children: Vec<Node>,
    /// The span between the start tag and the end tag.
    ///
    /// `None` for void and self-closing elements.
    pub content_span: Option<Span>,
    /// Whether the start tag ended with `/>`.
    pub self_closing: bool,
}

impl Element {
    /// Returns true if the tag name equals `name`, ignoring ASCII case.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns the source text between the start and end tags, verbatim.
    pub fn inner_html<'a>(&self, source: &'a str) -> &'a str {
        self.content_span
            .map(|span| span.slice(source))
            .unwrap_or("")
    }

    /// Returns the attribute with the given name, ignoring ASCII case.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
    }
}

/// An attribute on an element.
#[derive(Debug, Clone)]
pub struct Attribute {
    /// The span of the whole attribute.
    pub span: Span,
    /// The attribute name.
    pub name: SmolStr,
    /// The span of the name.
    pub name_span: Span,
    /// The attribute value.
    pub value: AttributeValue,
}

/// The value of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// A bare attribute such as `disabled`.
    Boolean,
    /// A quoted or unquoted literal value.
    Text {
        /// The value without quotes.
        value: String,
        /// The span of the value without quotes.
        span: Span,
    },
    /// A `{expression}` value.
    Expression {
        /// The expression source without braces.
        expression: String,
        /// The span of the expression without braces.
        span: Span,
    },
}

/// Text content.
#[derive(Debug, Clone)]
pub struct Text {
    pub span: Span,
    /// The raw text; entities are not decoded.
    pub data: String,
}

impl Text {
    /// Returns true if the text is whitespace only.
    pub fn is_whitespace(&self) -> bool {
        self.data.trim().is_empty()
    }
}

/// A comment or declaration.
#[derive(Debug, Clone)]
pub struct Comment {
    pub span: Span,
    /// The text between the delimiters.
    pub data: String,
}

/// An expression in text content.
#[derive(Debug, Clone)]
pub struct Expression {
    /// The span including braces.
    pub span: Span,
    /// The expression source without braces.
    pub expression: String,
    /// The span of the expression without braces.
    pub expression_span: Span,
}
