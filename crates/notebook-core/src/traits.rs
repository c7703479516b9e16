// SPDX-License-Identifier: AGPL-3.0-or-later
//! Exporter capability and double-dispatch traits
//!
//! A node never knows which format it is rendered into. Each concrete node type
//! implements [`Export`] by calling the one [`Exporter`] method named after it,
//! and the exporter recurses into children by calling `export` on them in turn.

use crate::model::{ImageCell, Notebook, PageRef, SourceCodeCell, TextCell};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Error type for exporting
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Output formats shipped with this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Html,
    Xml,
}

impl ExportFormat {
    /// File extension for this format
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Xml => "xml",
        }
    }

    /// Short display name
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Xml => "XML",
        }
    }

    pub const ALL: [Self; 2] = [Self::Html, Self::Xml];
}

/// One operation per concrete node type
///
/// Implementations receive shared references and may read any attribute and the
/// `pages()` / `cells()` views, but cannot change the tree.
pub trait Exporter {
    fn export_notebook(&mut self, notebook: &Notebook);

    fn export_page(&mut self, page: PageRef<'_>);

    fn export_text_cell(&mut self, cell: &TextCell);

    fn export_source_code_cell(&mut self, cell: &SourceCodeCell);

    fn export_image_cell(&mut self, cell: &ImageCell);
}

/// Node side of the double dispatch
pub trait Export {
    /// Hand `self` to the matching exporter operation
    fn export(&self, exporter: &mut dyn Exporter);
}

/// Exporter that accumulates a text rendering
pub trait BufferedExporter: Exporter {
    /// Rendering accumulated so far
    fn output(&self) -> &str;

    fn into_output(self) -> String
    where
        Self: Sized;
}

/// Extension trait for writer output (not dyn-compatible)
pub trait BufferedExporterExt: BufferedExporter {
    /// Export `notebook` and write the accumulated output to `writer`
    fn export_to_writer<W: Write>(&mut self, notebook: &Notebook, writer: &mut W) -> Result<()>
    where
        Self: Sized,
    {
        notebook.export(self);
        writer.write_all(self.output().as_bytes())?;
        Ok(())
    }
}

impl<T: BufferedExporter> BufferedExporterExt for T {}
