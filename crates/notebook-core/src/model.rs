// SPDX-License-Identifier: AGPL-3.0-or-later
//! Notebook domain model
//!
//! A [`Notebook`] owns an ordered list of pages, and each page owns an ordered
//! list of cells. All three live in one arena [`Tree`]; [`PageId`] and
//! [`CellId`] are typed handles into it.
//!
//! Every concrete node type implements [`Export`] with exactly one call into the
//! [`Exporter`] capability, passing itself.

use crate::traits::{Export, Exporter};
use crate::tree::{self, NodeId, NodeKind, Tree, TreeError};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Cell holding prose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextCell {
    pub text: String,
}

impl TextCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Cell holding raw, unescaped source code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCodeCell {
    pub source_code: String,
}

impl SourceCodeCell {
    pub fn new(source_code: impl Into<String>) -> Self {
        Self {
            source_code: source_code.into(),
        }
    }
}

/// Cell referencing an image by URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCell {
    pub image_url: String,
}

impl ImageCell {
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
        }
    }
}

/// Leaf content of a page
///
/// Exporters match on this exhaustively through [`Export`], so adding a variant
/// does not compile until every exporter handles it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cell {
    Text(TextCell),
    SourceCode(SourceCodeCell),
    Image(ImageCell),
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Cell::Text(TextCell::new(text))
    }

    pub fn source_code(source_code: impl Into<String>) -> Self {
        Cell::SourceCode(SourceCodeCell::new(source_code))
    }

    pub fn image(image_url: impl Into<String>) -> Self {
        Cell::Image(ImageCell::new(image_url))
    }

    /// Count words in this cell
    pub fn word_count(&self) -> usize {
        match self {
            Cell::Text(cell) => cell.text.split_whitespace().count(),
            Cell::SourceCode(cell) => cell.source_code.split_whitespace().count(),
            Cell::Image(_) => 0,
        }
    }

    /// Count characters in this cell
    pub fn char_count(&self) -> usize {
        match self {
            Cell::Text(cell) => cell.text.chars().count(),
            Cell::SourceCode(cell) => cell.source_code.chars().count(),
            Cell::Image(_) => 0,
        }
    }
}

impl From<TextCell> for Cell {
    fn from(cell: TextCell) -> Self {
        Cell::Text(cell)
    }
}

impl From<SourceCodeCell> for Cell {
    fn from(cell: SourceCodeCell) -> Self {
        Cell::SourceCode(cell)
    }
}

impl From<ImageCell> for Cell {
    fn from(cell: ImageCell) -> Self {
        Cell::Image(cell)
    }
}

/// Page attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
}

/// Handle to a page inside a [`Notebook`]
///
/// Handles remember the notebook that issued them; another notebook treats
/// them as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId {
    notebook: u64,
    node: NodeId,
}

/// Handle to a cell inside a [`Notebook`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId {
    notebook: u64,
    node: NodeId,
}

impl From<PageId> for NodeId {
    fn from(id: PageId) -> Self {
        id.node
    }
}

impl From<CellId> for NodeId {
    fn from(id: CellId) -> Self {
        id.node
    }
}

static NEXT_NOTEBOOK_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone)]
enum Entry {
    Notebook,
    Page(Page),
    Cell(Cell),
}

impl NodeKind for Entry {
    fn accepts_child(&self, child: &Self) -> bool {
        matches!(
            (self, child),
            (Entry::Notebook, Entry::Page(_)) | (Entry::Page(_), Entry::Cell(_))
        )
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Entry::Notebook => "notebook",
            Entry::Page(_) => "page",
            Entry::Cell(_) => "cell",
        }
    }
}

/// Root of the tree: a titled, ordered collection of pages
///
/// Cloning keeps the notebook id, so handles stay valid in the clone.
#[derive(Debug, Clone)]
pub struct Notebook {
    id: u64,
    title: String,
    tree: Tree<Entry>,
    root: NodeId,
}

impl Notebook {
    /// Create an empty notebook
    pub fn new(title: impl Into<String>) -> Self {
        let mut tree = Tree::new();
        let root = tree.alloc(Entry::Notebook);
        Self {
            id: NEXT_NOTEBOOK_ID.fetch_add(1, Ordering::Relaxed),
            title: title.into(),
            tree,
            root,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    fn page_id(&self, node: NodeId) -> PageId {
        PageId {
            notebook: self.id,
            node,
        }
    }

    fn cell_id(&self, node: NodeId) -> CellId {
        CellId {
            notebook: self.id,
            node,
        }
    }

    /// Arena node behind a page handle issued by this notebook
    fn page_node(&self, id: PageId) -> tree::Result<NodeId> {
        if id.notebook == self.id {
            Ok(id.node)
        } else {
            Err(TreeError::UnknownNode(id.node))
        }
    }

    /// Arena node behind a cell handle issued by this notebook
    fn cell_node(&self, id: CellId) -> tree::Result<NodeId> {
        if id.notebook == self.id {
            Ok(id.node)
        } else {
            Err(TreeError::UnknownNode(id.node))
        }
    }

    /// Create a page already attached at the end of this notebook
    pub fn create_page(&mut self, title: impl Into<String>) -> PageId {
        let page = Page {
            title: title.into(),
        };
        let node = self.tree.alloc_child(self.root, Entry::Page(page));
        self.page_id(node)
    }

    /// Attached pages in order
    pub fn pages(&self) -> impl Iterator<Item = PageRef<'_>> + '_ {
        self.tree
            .children(self.root)
            .iter()
            .filter_map(move |&node| self.page(self.page_id(node)))
    }

    pub fn page_count(&self) -> usize {
        self.tree.children(self.root).len()
    }

    /// Look up a page, attached or detached
    pub fn page(&self, id: PageId) -> Option<PageRef<'_>> {
        match self.tree.get(self.page_node(id).ok()?)? {
            Entry::Page(page) => Some(PageRef {
                notebook: self,
                id,
                page,
            }),
            _ => None,
        }
    }

    pub fn page_mut(&mut self, id: PageId) -> Option<&mut Page> {
        let node = self.page_node(id).ok()?;
        match self.tree.get_mut(node)? {
            Entry::Page(page) => Some(page),
            _ => None,
        }
    }

    pub fn is_attached(&self, id: PageId) -> bool {
        self.page_node(id).is_ok_and(|node| self.tree.parent(node) == Some(self.root))
    }

    /// Remove a page from the notebook's page list. Its cells stay with it.
    pub fn detach_page(&mut self, id: PageId) -> tree::Result<()> {
        let node = self.page_node(id)?;
        self.tree.set_parent(node, None)
    }

    /// Attach a page at the end of the notebook, or keep its position if
    /// it is already attached
    pub fn attach_page(&mut self, id: PageId) -> tree::Result<()> {
        let node = self.page_node(id)?;
        self.tree.set_parent(node, Some(self.root))
    }

    /// Construct a cell that no page owns yet
    pub fn insert_cell(&mut self, cell: impl Into<Cell>) -> CellId {
        let node = self.tree.alloc(Entry::Cell(cell.into()));
        self.cell_id(node)
    }

    /// Make `page` the owner of `cell`, moving it from its previous page
    pub fn add_cell(&mut self, page: PageId, cell: CellId) -> tree::Result<()> {
        let page = self.page_node(page)?;
        let cell = self.cell_node(cell)?;
        self.tree.set_parent(cell, Some(page))
    }

    /// Construct a cell and attach it at the end of `page`
    pub fn push_cell(&mut self, page: PageId, cell: impl Into<Cell>) -> tree::Result<CellId> {
        let page = self.page_node(page)?;
        let node = self.tree.insert(Entry::Cell(cell.into()), Some(page))?;
        Ok(self.cell_id(node))
    }

    pub fn detach_cell(&mut self, cell: CellId) -> tree::Result<()> {
        let node = self.cell_node(cell)?;
        self.tree.set_parent(node, None)
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        match self.tree.get(self.cell_node(id).ok()?)? {
            Entry::Cell(cell) => Some(cell),
            _ => None,
        }
    }

    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        let node = self.cell_node(id).ok()?;
        match self.tree.get_mut(node)? {
            Entry::Cell(cell) => Some(cell),
            _ => None,
        }
    }

    /// Page currently owning `id`
    pub fn cell_parent(&self, id: CellId) -> Option<PageId> {
        let node = self.cell_node(id).ok()?;
        self.tree.parent(node).map(|parent| self.page_id(parent))
    }

    /// Count words across the cells of attached pages
    pub fn word_count(&self) -> usize {
        self.pages()
            .flat_map(|page| page.cells())
            .map(Cell::word_count)
            .sum()
    }

    /// Count characters across the cells of attached pages
    pub fn char_count(&self) -> usize {
        self.pages()
            .flat_map(|page| page.cells())
            .map(Cell::char_count)
            .sum()
    }
}

/// Borrowed view of a page and its cells
#[derive(Debug, Clone, Copy)]
pub struct PageRef<'a> {
    notebook: &'a Notebook,
    id: PageId,
    page: &'a Page,
}

impl<'a> PageRef<'a> {
    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn title(&self) -> &'a str {
        &self.page.title
    }

    pub fn page(&self) -> &'a Page {
        self.page
    }

    /// Cell handles in order
    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> + 'a {
        let notebook: &'a Notebook = self.notebook;
        notebook
            .tree
            .children(self.id.node)
            .iter()
            .map(move |&node| notebook.cell_id(node))
    }

    /// Cells in order
    pub fn cells(&self) -> impl Iterator<Item = &'a Cell> + 'a {
        let notebook = self.notebook;
        self.cell_ids().filter_map(move |id| notebook.cell(id))
    }

    pub fn cell_count(&self) -> usize {
        self.notebook.tree.children(self.id.node).len()
    }
}

impl Export for Notebook {
    fn export(&self, exporter: &mut dyn Exporter) {
        exporter.export_notebook(self);
    }
}

impl Export for PageRef<'_> {
    fn export(&self, exporter: &mut dyn Exporter) {
        exporter.export_page(*self);
    }
}

impl Export for Cell {
    fn export(&self, exporter: &mut dyn Exporter) {
        match self {
            Cell::Text(cell) => cell.export(exporter),
            Cell::SourceCode(cell) => cell.export(exporter),
            Cell::Image(cell) => cell.export(exporter),
        }
    }
}

impl Export for TextCell {
    fn export(&self, exporter: &mut dyn Exporter) {
        exporter.export_text_cell(self);
    }
}

impl Export for SourceCodeCell {
    fn export(&self, exporter: &mut dyn Exporter) {
        exporter.export_source_code_cell(self);
    }
}

impl Export for ImageCell {
    fn export(&self, exporter: &mut dyn Exporter) {
        exporter.export_image_cell(self);
    }
}
