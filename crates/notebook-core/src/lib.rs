// SPDX-License-Identifier: AGPL-3.0-or-later
//! Notebook Core - Notebook tree and pluggable export formats
//!
//! This crate provides:
//! - An arena-backed composite tree with consistent parent/child edges
//! - The notebook model: pages of text, source code and image cells
//! - An exporter capability with one operation per node type (double dispatch)
//! - HTML and XML exporters
//!
//! ```
//! use notebook_core::{export_to_string, Cell, ExportFormat, Notebook};
//!
//! let mut notebook = Notebook::new("Ideas");
//! let page = notebook.create_page("First Page");
//! notebook.push_cell(page, Cell::text("Hello")).unwrap();
//!
//! let html = export_to_string(&notebook, ExportFormat::Html);
//! assert!(html.contains("<p>Hello</p>"));
//! ```

pub mod exporters;
pub mod model;
pub mod traits;
pub mod tree;

pub use exporters::{export_to_string, export_to_writer, HtmlExporter, XmlExporter};
pub use model::{
    Cell, CellId, ImageCell, Notebook, Page, PageId, PageRef, SourceCodeCell, TextCell,
};
pub use traits::{
    BufferedExporter, BufferedExporterExt, Export, ExportError, ExportFormat, Exporter, Result,
};
pub use tree::{NodeId, NodeKind, Tree, TreeError};
