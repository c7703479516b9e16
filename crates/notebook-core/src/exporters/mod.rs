// SPDX-License-Identifier: AGPL-3.0-or-later
//! Exporters for each supported format

pub mod html;
pub mod xml;

pub use html::HtmlExporter;
pub use xml::XmlExporter;

use crate::model::Notebook;
use crate::traits::{BufferedExporter, BufferedExporterExt, Export, ExportFormat, Result};
use std::io::Write;
use tracing::debug;

/// Render `notebook` with a fresh exporter for `format`
pub fn export_to_string(notebook: &Notebook, format: ExportFormat) -> String {
    let output = match format {
        ExportFormat::Html => render(notebook, HtmlExporter::new()),
        ExportFormat::Xml => render(notebook, XmlExporter::new()),
    };
    debug!(format = format.label(), bytes = output.len(), "exported notebook");
    output
}

/// Render `notebook` for `format` into `writer`
pub fn export_to_writer<W: Write>(
    notebook: &Notebook,
    format: ExportFormat,
    writer: &mut W,
) -> Result<()> {
    match format {
        ExportFormat::Html => HtmlExporter::new().export_to_writer(notebook, writer),
        ExportFormat::Xml => XmlExporter::new().export_to_writer(notebook, writer),
    }
}

fn render<E: BufferedExporter>(notebook: &Notebook, mut exporter: E) -> String {
    notebook.export(&mut exporter);
    exporter.into_output()
}

/// Append `line`, separated from earlier output by a newline
fn push_line(output: &mut String, line: &str) {
    if !output.is_empty() {
        output.push('\n');
    }
    output.push_str(line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, ImageCell, PageRef, SourceCodeCell, TextCell};
    use crate::traits::Exporter;
    use pretty_assertions::assert_eq;

    fn sample() -> Notebook {
        let mut notebook = Notebook::new("My Coding Ideas");
        let first = notebook.create_page("First Page");
        notebook
            .push_cell(first, Cell::image("https://x/logo.png"))
            .unwrap();
        notebook
            .push_cell(first, Cell::source_code("alert('Hello, World!');"))
            .unwrap();
        notebook
            .push_cell(first, Cell::text("Hello, World!"))
            .unwrap();
        let second = notebook.create_page("Second Page");
        notebook.push_cell(second, Cell::text("Bye, World!")).unwrap();
        notebook
    }

    #[test]
    fn test_export_to_string_matches_exporters() {
        let notebook = sample();

        let mut html = HtmlExporter::new();
        notebook.export(&mut html);
        assert_eq!(export_to_string(&notebook, ExportFormat::Html), html.output());

        let mut xml = XmlExporter::new();
        notebook.export(&mut xml);
        assert_eq!(export_to_string(&notebook, ExportFormat::Xml), xml.output());
    }

    #[test]
    fn test_export_to_writer() {
        let notebook = sample();
        for format in ExportFormat::ALL {
            let mut buffer = Vec::new();
            export_to_writer(&notebook, format, &mut buffer).unwrap();
            assert_eq!(
                String::from_utf8(buffer).unwrap(),
                export_to_string(&notebook, format)
            );
        }
    }

    #[test]
    fn test_export_is_deterministic() {
        let notebook = sample();
        for format in ExportFormat::ALL {
            assert_eq!(
                export_to_string(&notebook, format),
                export_to_string(&notebook, format)
            );
        }
    }

    #[test]
    fn test_format_serde() {
        assert_eq!(serde_json::to_string(&ExportFormat::Html).unwrap(), "\"html\"");
        let format: ExportFormat = serde_json::from_str("\"xml\"").unwrap();
        assert_eq!(format, ExportFormat::Xml);
        assert_eq!(format.extension(), "xml");
        assert_eq!(format.label(), "XML");
    }

    /// Outline exporter defined entirely outside the model
    #[derive(Default)]
    struct OutlineExporter {
        lines: Vec<String>,
        depth: usize,
    }

    impl OutlineExporter {
        fn line(&mut self, text: String) {
            self.lines.push(format!("{}{}", "  ".repeat(self.depth), text));
        }
    }

    impl Exporter for OutlineExporter {
        fn export_notebook(&mut self, notebook: &Notebook) {
            self.line(format!("# {}", notebook.title()));
            self.depth += 1;
            for page in notebook.pages() {
                page.export(self);
            }
            self.depth -= 1;
        }

        fn export_page(&mut self, page: PageRef<'_>) {
            self.line(format!("## {} ({} cells)", page.title(), page.cell_count()));
            self.depth += 1;
            for cell in page.cells() {
                cell.export(self);
            }
            self.depth -= 1;
        }

        fn export_text_cell(&mut self, cell: &TextCell) {
            self.line(format!("text: {}", cell.text));
        }

        fn export_source_code_cell(&mut self, cell: &SourceCodeCell) {
            self.line(format!("code: {}", cell.source_code));
        }

        fn export_image_cell(&mut self, cell: &ImageCell) {
            self.line(format!("image: {}", cell.image_url));
        }
    }

    #[test]
    fn test_new_exporter_needs_no_model_changes() {
        let mut outline = OutlineExporter::default();
        sample().export(&mut outline);

        assert_eq!(
            outline.lines,
            vec![
                "# My Coding Ideas",
                "  ## First Page (3 cells)",
                "    image: https://x/logo.png",
                "    code: alert('Hello, World!');",
                "    text: Hello, World!",
                "  ## Second Page (1 cells)",
                "    text: Bye, World!",
            ]
        );
    }
}
