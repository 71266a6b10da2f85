//! Component markup to JavaScript.
//!
//! The generated module exports a single function that builds the component's
//! DOM under a target node:
//!
//! ```text
//! export default function Name(target, props) {
//!   <instance script>
//!   const div_0 = document.createElement("div");
//!   div_0.appendChild(document.createTextNode(String(expr)));
//!   target.appendChild(div_0);
//! }
//! ```

use crate::emitter::Emitter;
use component_pipeline::{ComponentOptions, ComponentTranslator, TranslateError, Translation};
use markup_parser::{Attribute, AttributeValue, Document, Element, Node, Text};
use source_map::{ByteOffset, LineIndex, Position};
use std::fmt::Write as _;
use tracing::debug;

/// Translates component markup into an ES module.
///
/// Every piece of user code and every element, attribute and text node in the
/// output is mapped back to the markup. The map embeds the markup as its
/// source content.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateTranslator;

impl TemplateTranslator {
    pub fn new() -> Self {
        Self
    }
}

impl ComponentTranslator for TemplateTranslator {
    fn translate(
        &self,
        source: &str,
        options: &ComponentOptions,
    ) -> Result<Translation, TranslateError> {
        let parsed = markup_parser::parse(source);
        let index = LineIndex::new(source);

        if let Some(error) = parsed.errors.first() {
            return Err(located(&index, error.to_string(), error.span.start));
        }

        let mut generator = Generator {
            emitter: Emitter::new(&options.filename, &index),
            index: &index,
            next_id: 0,
        };
        generator.component(&parsed.document, &function_name(&options.name))?;

        let (code, map) = generator.emitter.finish_with_content(source);
        debug!(
            component = %options.name,
            mappings = map.len(),
            "generated component module"
        );
        Ok(Translation { code, map })
    }
}

struct Generator<'a> {
    emitter: Emitter<'a>,
    index: &'a LineIndex,
    next_id: usize,
}

impl<'a> Generator<'a> {
    fn component(&mut self, document: &Document, name: &str) -> Result<(), TranslateError> {
        self.emitter
            .push("export default function ")
            .push(name)
            .push("(target, props) {\n");

        for script in document.root_elements().filter(|el| el.is("script")) {
            self.script(script);
        }

        for node in &document.nodes {
            if let Node::Element(el) = node {
                if el.is("script") || el.is("style") {
                    continue;
                }
            }
            self.node(node, "target")?;
        }

        for style in document.root_elements().filter(|el| el.is("style")) {
            self.style(style);
        }

        self.emitter.push("}\n");
        Ok(())
    }

    /// Inlines the script body verbatim.
    fn script(&mut self, script: &Element) {
        for child in &script.children {
            if let Node::Text(text) = child {
                self.emitter.push_source(&text.data, text.span.start);
                if !text.data.ends_with('\n') {
                    self.emitter.newline();
                }
            }
        }
    }

    fn style(&mut self, style: &Element) {
        let var = self.var_name("style");
        self.emitter
            .push("  ")
            .push_mapped(&format!("const {var}"), style.span.start)
            .push(" = document.createElement(\"style\");\n");

        self.emitter.push("  ").push(&var).push(".textContent = ");
        match style.children.first() {
            Some(Node::Text(css)) => {
                self.emitter.push_mapped(&js_string(&css.data), css.span.start);
            }
            _ => {
                self.emitter.push("\"\"");
            }
        }
        self.emitter.push(";\n");

        self.emitter
            .push("  document.head.appendChild(")
            .push(&var)
            .push(");\n");
    }

    fn node(&mut self, node: &Node, parent: &str) -> Result<(), TranslateError> {
        match node {
            Node::Element(el) => self.element(el, parent)?,
            Node::Text(text) => self.text(text, parent),
            Node::Expression(expr) => {
                self.check_expression(&expr.expression, expr.expression_span.start)?;
                self.append_to(parent)
                    .push("document.createTextNode(String(")
                    .push_source(&expr.expression, expr.expression_span.start)
                    .push(")));\n");
            }
            Node::Comment(_) => {}
        }
        Ok(())
    }

    fn text(&mut self, text: &Text, parent: &str) {
        if text.is_whitespace() {
            return;
        }
        self.append_to(parent)
            .push("document.createTextNode(")
            .push_mapped(&js_string(&text.data), text.span.start)
            .push("));\n");
    }

    fn element(&mut self, el: &Element, parent: &str) -> Result<(), TranslateError> {
        let var = self.var_name(&el.name);
        self.emitter
            .push("  ")
            .push_mapped(&format!("const {var}"), el.span.start)
            .push(" = document.createElement(")
            .push(&js_string(&el.name))
            .push(");\n");

        for attribute in &el.attributes {
            self.attribute(&var, attribute)?;
        }
        for child in &el.children {
            self.node(child, &var)?;
        }

        self.append_to(parent).push(&var).push(");\n");
        Ok(())
    }

    fn attribute(&mut self, var: &str, attribute: &Attribute) -> Result<(), TranslateError> {
        self.emitter
            .push("  ")
            .push_mapped(var, attribute.span.start);

        match &attribute.value {
            AttributeValue::Expression { expression, span } => {
                self.check_expression(expression, span.start)?;
                match attribute.name.strip_prefix("on:") {
                    Some(event) => {
                        self.emitter
                            .push(".addEventListener(")
                            .push(&js_string(event))
                            .push(", ")
                            .push_source(expression, span.start)
                            .push(");\n");
                    }
                    None => {
                        self.emitter
                            .push(".setAttribute(")
                            .push(&js_string(&attribute.name))
                            .push(", String(")
                            .push_source(expression, span.start)
                            .push("));\n");
                    }
                }
            }
            AttributeValue::Text { value, span } => {
                self.emitter
                    .push(".setAttribute(")
                    .push(&js_string(&attribute.name))
                    .push(", ")
                    .push_mapped(&js_string(value), span.start)
                    .push(");\n");
            }
            AttributeValue::Boolean => {
                self.emitter
                    .push(".setAttribute(")
                    .push(&js_string(&attribute.name))
                    .push(", \"\");\n");
            }
        }
        Ok(())
    }

    fn append_to(&mut self, parent: &str) -> &mut Emitter<'a> {
        self.emitter.push("  ").push(parent).push(".appendChild(")
    }

    fn check_expression(&self, expression: &str, start: ByteOffset) -> Result<(), TranslateError> {
        if expression.trim().is_empty() {
            return Err(located(self.index, "expected an expression", start));
        }
        Ok(())
    }

    fn var_name(&mut self, tag: &str) -> String {
        let id = self.next_id;
        self.next_id += 1;
        let base: String = tag
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{base}_{id}")
    }
}

fn located(index: &LineIndex, message: impl Into<String>, offset: ByteOffset) -> TranslateError {
    let position = index.position(offset).unwrap_or(Position::new(1, 0));
    TranslateError::located(message, position)
}

/// Makes `name` usable as a function name.
fn function_name(name: &str) -> String {
    match name.chars().next() {
        Some(c) if !c.is_ascii_digit() => name.to_string(),
        _ => format!("_{name}"),
    }
}

/// Quotes `value` as a JavaScript string literal.
pub(crate) fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
