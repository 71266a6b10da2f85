//! Tree shape and recovery tests for the markup parser.

use markup_parser::{parse, AttributeValue, Node, ParseErrorKind};
use pretty_assertions::assert_eq;

/// Renders a compact outline of a node list, one node per line.
fn outline(nodes: &[Node], depth: usize, out: &mut String) {
    for node in nodes {
        let indent = "  ".repeat(depth);
        match node {
            Node::Element(el) => {
                let attrs: Vec<String> = el
                    .attributes
                    .iter()
                    .map(|attr| match &attr.value {
                        AttributeValue::Boolean => attr.name.to_string(),
                        AttributeValue::Text { value, .. } => format!("{}={:?}", attr.name, value),
                        AttributeValue::Expression { expression, .. } => {
                            format!("{}={{{}}}", attr.name, expression)
                        }
                    })
                    .collect();
                out.push_str(&format!("{}<{}> [{}]\n", indent, el.name, attrs.join(" ")));
                outline(&el.children, depth + 1, out);
            }
            Node::Text(text) => out.push_str(&format!("{}text {:?}\n", indent, text.data)),
            Node::Comment(comment) => {
                out.push_str(&format!("{}comment {:?}\n", indent, comment.data))
            }
            Node::Expression(expr) => {
                out.push_str(&format!("{}expr {:?}\n", indent, expr.expression))
            }
        }
    }
}

fn outline_of(source: &str) -> String {
    let mut out = String::new();
    outline(&parse(source).document.nodes, 0, &mut out);
    out
}

#[test]
fn test_component_outline() {
    let source = r#"<script>let n = 0;</script>
<button class="primary" disabled onclick={() => n++}>
  Clicked {n} times
</button>
<!-- note -->"#;

    insta::assert_snapshot!(outline_of(source), @r#"
    <script> []
      text "let n = 0;"
    text "\n"
    <button> [class="primary" disabled onclick={() => n++}]
      text "\n  Clicked "
      expr "n"
      text " times\n"
    text "\n"
    comment " note "
    "#);
}

#[test]
fn test_document_outline() {
    let source = "<!DOCTYPE html><head><meta charset=utf-8><title>T</title></head><body><br/><p>x</p></body>";

    insta::assert_snapshot!(outline_of(source), @r#"
    comment "DOCTYPE html"
    <head> []
      <meta> [charset="utf-8"]
      <title> []
        text "T"
    <body> []
      <br> []
      <p> []
        text "x"
    "#);
}

#[test]
fn test_inner_html_is_verbatim() {
    let source = "<body>\n  <h1 class='big'>Hello &amp; welcome</h1>\n  {x}\n</body>";
    let result = parse(source);
    let body = result.document.root_element("body").unwrap();
    assert_eq!(
        body.inner_html(source),
        "\n  <h1 class='big'>Hello &amp; welcome</h1>\n  {x}\n"
    );
}

#[test]
fn test_tag_names_match_case_insensitively() {
    let source = "<HEAD><Title>x</TITLE></head>";
    let result = parse(source);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    let head = result.document.root_element("head").unwrap();
    assert_eq!(head.inner_html(source), "<Title>x</TITLE>");
}

#[test]
fn test_void_and_self_closing_elements_have_no_content() {
    let source = "<img src=a.png><x-icon name=\"star\" />";
    let result = parse(source);
    assert!(result.errors.is_empty());

    let elements: Vec<_> = result.document.root_elements().collect();
    assert_eq!(elements.len(), 2);
    assert!(elements[0].content_span.is_none());
    assert!(elements[1].self_closing);
    assert_eq!(elements[1].inner_html(source), "");
}

#[test]
fn test_unclosed_element_is_closed_at_end_of_input() {
    let source = "<div><p>text";
    let result = parse(source);

    let kinds: Vec<_> = result.errors.iter().map(|e| e.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            ParseErrorKind::UnclosedTag {
                tag_name: "p".to_string()
            },
            ParseErrorKind::UnclosedTag {
                tag_name: "div".to_string()
            },
        ]
    );

    let div = result.document.root_element("div").unwrap();
    assert_eq!(div.inner_html(source), "<p>text");
}

#[test]
fn test_parent_end_tag_closes_open_children() {
    let source = "<ul><li>one<li>two</ul><p>after</p>";
    let result = parse(source);

    let roots: Vec<_> = result
        .document
        .root_elements()
        .map(|el| el.name.to_string())
        .collect();
    assert_eq!(roots, vec!["ul", "p"]);

    let ul = result.document.root_element("ul").unwrap();
    assert_eq!(ul.inner_html(source), "<li>one<li>two");
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn test_stray_closing_tag_is_dropped() {
    let result = parse("<p>a</span>b</p></br>");

    let kinds: Vec<_> = result.errors.iter().map(|e| e.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            ParseErrorKind::UnexpectedClosingTag {
                tag_name: "span".to_string()
            },
            ParseErrorKind::VoidElementClosingTag {
                tag_name: "br".to_string()
            },
        ]
    );
    assert_eq!(result.document.nodes.len(), 1);
}

#[test]
fn test_unclosed_expression_and_comment() {
    let result = parse("<p>{a</p>");
    assert_eq!(result.errors[0].kind, ParseErrorKind::UnclosedExpression);

    let result = parse("<!-- never closed");
    assert_eq!(result.errors[0].kind, ParseErrorKind::UnclosedComment);
    assert_eq!(result.document.nodes.len(), 1);
}

#[test]
fn test_unclosed_expression_is_kept_as_text() {
    let source = "<body><p>Press { to open</p></body><head></head>";
    let result = parse(source);

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind, ParseErrorKind::UnclosedExpression);
    assert_eq!(result.errors[0].span.slice(source), "{");

    let body = result.document.root_element("body").unwrap();
    assert_eq!(body.inner_html(source), "<p>Press { to open</p>");
    assert!(result.document.root_element("head").is_some());

    let p = body.children[0].as_element().unwrap();
    match &p.children[..] {
        [Node::Text(before), Node::Text(after)] => {
            assert_eq!(before.data, "Press ");
            assert_eq!(after.data, "{ to open");
        }
        other => panic!("expected two text nodes, got {other:?}"),
    }
}

#[test]
fn test_unterminated_start_tag() {
    let result = parse("<div class=\"a\"");
    assert_eq!(
        result.errors[0].kind,
        ParseErrorKind::UnterminatedStartTag {
            tag_name: "div".to_string()
        }
    );
    let div = result.document.root_element("div").unwrap();
    assert_eq!(div.attributes.len(), 1);
}

#[test]
fn test_error_spans_point_into_source() {
    let source = "<main>\n  <section>\n</main>";
    let result = parse(source);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].span.slice(source), "<section>");
}
