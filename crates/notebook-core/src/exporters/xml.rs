// SPDX-License-Identifier: AGPL-3.0-or-later
//! XML exporter
//!
//! Titles and cell content are embedded without escaping, same as the HTML
//! exporter.

use super::push_line;
use crate::model::{ImageCell, Notebook, PageRef, SourceCodeCell, TextCell};
use crate::traits::{BufferedExporter, Export, Exporter};
use tracing::trace;

const PREAMBLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Renders a notebook as a `<notebook>` document with `<page>` children
#[derive(Debug)]
pub struct XmlExporter {
    output: String,
}

impl XmlExporter {
    pub fn new() -> Self {
        Self {
            output: PREAMBLE.to_string(),
        }
    }
}

impl Default for XmlExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for XmlExporter {
    fn export_notebook(&mut self, notebook: &Notebook) {
        trace!(title = notebook.title(), "xml: notebook");
        push_line(
            &mut self.output,
            &format!(r#"<notebook title="{}">"#, notebook.title()),
        );
        for page in notebook.pages() {
            page.export(self);
        }
        push_line(&mut self.output, "</notebook>");
    }

    fn export_page(&mut self, page: PageRef<'_>) {
        trace!(title = page.title(), "xml: page");
        push_line(&mut self.output, &format!(r#"<page title="{}">"#, page.title()));
        for cell in page.cells() {
            cell.export(self);
        }
        push_line(&mut self.output, "</page>");
    }

    fn export_text_cell(&mut self, cell: &TextCell) {
        push_line(&mut self.output, &format!("<text>{}</text>", cell.text));
    }

    fn export_source_code_cell(&mut self, cell: &SourceCodeCell) {
        push_line(&mut self.output, &format!("<code>{}</code>", cell.source_code));
    }

    fn export_image_cell(&mut self, cell: &ImageCell) {
        push_line(&mut self.output, &format!(r#"<image url="{}" />"#, cell.image_url));
    }
}

impl BufferedExporter for XmlExporter {
    fn output(&self) -> &str {
        &self.output
    }

    fn into_output(self) -> String {
        self.output
    }
}
