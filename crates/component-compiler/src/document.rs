//! The merged HTML document built from structural sections.

use component_pipeline::Section;

/// Head and body fragments collected from structural files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    head: Vec<String>,
    body: Vec<String>,
}

impl HtmlDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `content` to `section`.
    pub fn add(&mut self, section: Section, content: impl Into<String>) {
        match section {
            Section::Head => self.head.push(content.into()),
            Section::Body => self.body.push(content.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_empty() && self.body.is_empty()
    }

    /// Number of fragments added so far.
    pub fn len(&self) -> usize {
        self.head.len() + self.body.len()
    }

    /// Renders the document. Fragments are trimmed and appear in the order
    /// they were added.
    pub fn render(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n<html>\n");
        render_section(&mut out, Section::Head, &self.head);
        render_section(&mut out, Section::Body, &self.body);
        out.push_str("</html>\n");
        out
    }
}

fn render_section(out: &mut String, section: Section, fragments: &[String]) {
    out.push('<');
    out.push_str(section.as_str());
    out.push_str(">\n");
    for fragment in fragments {
        let fragment = fragment.trim();
        if !fragment.is_empty() {
            out.push_str(fragment);
            out.push('\n');
        }
    }
    out.push_str("</");
    out.push_str(section.as_str());
    out.push_str(">\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_in_insertion_order() {
        let mut document = HtmlDocument::new();
        document.add(Section::Body, "\n  <div id=\"app\"></div>\n");
        document.add(Section::Head, "<title>App</title>");
        document.add(Section::Head, "<meta charset=\"utf-8\">");
        document.add(Section::Body, "   ");

        assert_eq!(document.len(), 4);
        insta::assert_snapshot!(document.render(), @r#"
        <!DOCTYPE html>
        <html>
        <head>
        <title>App</title>
        <meta charset="utf-8">
        </head>
        <body>
        <div id="app"></div>
        </body>
        </html>
        "#);
    }

    #[test]
    fn test_empty_document() {
        let document = HtmlDocument::new();
        assert!(document.is_empty());
        assert_eq!(
            document.render(),
            "<!DOCTYPE html>\n<html>\n<head>\n</head>\n<body>\n</body>\n</html>\n"
        );
    }
}
