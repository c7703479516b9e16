// SPDX-License-Identifier: AGPL-3.0-or-later
//! HTML exporter
//!
//! Cell content is embedded verbatim. Text containing `<`, `&` or `"` yields
//! malformed markup; callers that need well-formed output must escape first.

use super::push_line;
use crate::model::{ImageCell, Notebook, PageRef, SourceCodeCell, TextCell};
use crate::traits::{BufferedExporter, Export, Exporter};
use tracing::trace;

/// Renders a notebook as a `<main>` element with one `<section>` per page
///
/// Single use: the buffer is never reset, so exporting twice concatenates.
#[derive(Debug, Default)]
pub struct HtmlExporter {
    output: String,
}

impl HtmlExporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Exporter for HtmlExporter {
    fn export_notebook(&mut self, notebook: &Notebook) {
        trace!(title = notebook.title(), "html: notebook");
        push_line(&mut self.output, r#"<main class="notebook">"#);
        push_line(&mut self.output, &format!("<h1>{}</h1>", notebook.title()));
        for page in notebook.pages() {
            page.export(self);
        }
        push_line(&mut self.output, "</main>");
    }

    fn export_page(&mut self, page: PageRef<'_>) {
        trace!(title = page.title(), "html: page");
        push_line(&mut self.output, r#"<section class="page">"#);
        push_line(&mut self.output, &format!("<h2>{}</h2>", page.title()));
        for cell in page.cells() {
            cell.export(self);
        }
        push_line(&mut self.output, "</section>");
    }

    fn export_text_cell(&mut self, cell: &TextCell) {
        push_line(&mut self.output, &format!("<p>{}</p>", cell.text));
    }

    fn export_source_code_cell(&mut self, cell: &SourceCodeCell) {
        push_line(&mut self.output, &format!("<code>{}</code>", cell.source_code));
    }

    fn export_image_cell(&mut self, cell: &ImageCell) {
        push_line(&mut self.output, &format!(r#"<img src="{}">"#, cell.image_url));
    }
}

impl BufferedExporter for HtmlExporter {
    fn output(&self) -> &str {
        &self.output
    }

    fn into_output(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_sample_notebook() {
        let mut notebook = Notebook::new("My Coding Ideas");
        let first = notebook.create_page("First Page");
        let image = notebook.insert_cell(ImageCell::new("https://x/logo.png"));
        let code = notebook.insert_cell(SourceCodeCell::new("alert('Hello, World!');"));
        let text = notebook.insert_cell(TextCell::new("Hello, World!"));
        notebook.add_cell(first, image).unwrap();
        notebook.add_cell(first, code).unwrap();
        notebook.add_cell(first, text).unwrap();
        let second = notebook.create_page("Second Page");
        notebook.push_cell(second, Cell::text("Bye, World!")).unwrap();

        let mut exporter = HtmlExporter::new();
        notebook.export(&mut exporter);

        let expected = [
            r#"<main class="notebook">"#,
            "<h1>My Coding Ideas</h1>",
            r#"<section class="page">"#,
            "<h2>First Page</h2>",
            r#"<img src="https://x/logo.png">"#,
            "<code>alert('Hello, World!');</code>",
            "<p>Hello, World!</p>",
            "</section>",
            r#"<section class="page">"#,
            "<h2>Second Page</h2>",
            "<p>Bye, World!</p>",
            "</section>",
            "</main>",
        ]
        .join("\n");
        assert_eq!(exporter.output(), expected);
    }

    #[test]
    fn test_empty_notebook() {
        let mut exporter = HtmlExporter::new();
        Notebook::new("Empty").export(&mut exporter);
        assert_eq!(
            exporter.into_output(),
            "<main class=\"notebook\">\n<h1>Empty</h1>\n</main>"
        );
    }

    #[test]
    fn test_content_is_not_escaped() {
        let mut notebook = Notebook::new("a < b");
        let page = notebook.create_page("p");
        notebook
            .push_cell(page, Cell::source_code("if (a < b && c) {}"))
            .unwrap();

        let mut exporter = HtmlExporter::new();
        notebook.export(&mut exporter);

        assert!(exporter.output().contains("<h1>a < b</h1>"));
        assert!(exporter.output().contains("<code>if (a < b && c) {}</code>"));
    }

    #[test]
    fn test_leaf_operations_emit_one_line() {
        let mut exporter = HtmlExporter::new();
        Cell::text("one").export(&mut exporter);
        Cell::image("two.png").export(&mut exporter);
        assert_eq!(exporter.output(), "<p>one</p>\n<img src=\"two.png\">");
    }

    #[test]
    fn test_buffer_is_not_reset() {
        let notebook = Notebook::new("nb");
        let mut exporter = HtmlExporter::new();
        notebook.export(&mut exporter);
        let once = exporter.output().to_string();
        notebook.export(&mut exporter);
        assert_eq!(exporter.output(), format!("{once}\n{once}"));
    }
}
