// SPDX-License-Identifier: AGPL-3.0-or-later
//! Arena-backed composite tree with single-parent ownership
//!
//! Nodes live in a flat arena and are addressed by [`NodeId`] handles. Each slot
//! records its parent and its ordered children. [`Tree::set_parent`] is the only
//! public way to change topology, and it keeps both sides of every edge in sync:
//! a node is listed in `children(p)` exactly when `parent(node) == Some(p)`.

use std::fmt;
use tracing::{debug, warn};

/// Stable handle to a node in a [`Tree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its arena
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Payload types that declare which children they may own
pub trait NodeKind {
    /// Whether a node carrying `self` may own a node carrying `child`
    fn accepts_child(&self, child: &Self) -> bool;

    /// Short name used in error messages and logs
    fn kind_name(&self) -> &'static str;
}

/// Error type for topology changes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("A {parent} node cannot own a {child} node")]
    ChildKindMismatch {
        parent: &'static str,
        child: &'static str,
    },

    #[error("Cannot move {node} under {parent}: {parent} is {node} or one of its descendants")]
    Cycle { node: NodeId, parent: NodeId },
}

pub type Result<T> = std::result::Result<T, TreeError>;

#[derive(Debug, Clone)]
struct Slot<T> {
    value: T,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena of nodes with ordered, duplicate-free child lists
#[derive(Debug, Clone)]
pub struct Tree<T> {
    slots: Vec<Slot<T>>,
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Number of nodes in the arena, attached or not
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.slots.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.slots.get(id.0).map(|slot| &slot.value)
    }

    /// Mutable access to the payload. Topology stays read-only.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots.get_mut(id.0).map(|slot| &mut slot.value)
    }

    /// Current owner of `id`, `None` for detached nodes and unknown handles
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.0).and_then(|slot| slot.parent)
    }

    /// Children of `id` in attachment order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.slots
            .get(id.0)
            .map_or(&[][..], |slot| slot.children.as_slice())
    }

    /// Walk the owner chain upwards, starting at the parent of `id`
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, T> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Add a detached node
    pub fn alloc(&mut self, value: T) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(Slot {
            value,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Add a node already owned by `parent`, skipping validation.
    /// `parent` must exist and accept the value.
    pub(crate) fn alloc_child(&mut self, parent: NodeId, value: T) -> NodeId {
        let id = self.alloc(value);
        self.slots[id.0].parent = Some(parent);
        self.add_child(parent, id);
        id
    }

    fn slot(&self, id: NodeId) -> Result<&Slot<T>> {
        self.slots.get(id.0).ok_or(TreeError::UnknownNode(id))
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        let children = &mut self.slots[parent.0].children;
        if !children.contains(&child) {
            children.push(child);
        }
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let children = &mut self.slots[parent.0].children;
        if let Some(pos) = children.iter().position(|&c| c == child) {
            children.remove(pos);
        }
    }
}

impl<T: NodeKind> Tree<T> {
    /// Add a node, optionally owned by `parent` from the start
    pub fn insert(&mut self, value: T, parent: Option<NodeId>) -> Result<NodeId> {
        if let Some(parent) = parent {
            check_kind(&self.slot(parent)?.value, &value)?;
            return Ok(self.alloc_child(parent, value));
        }
        Ok(self.alloc(value))
    }

    /// Move `id` under `parent`, or detach it when `parent` is `None`.
    ///
    /// The node is removed from its previous owner's children before being
    /// appended to the new owner's children. Setting the current parent again
    /// is a no-op and keeps the node's position. The tree is unchanged when
    /// an error is returned.
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) -> Result<()> {
        let old = self.slot(id)?.parent;
        if old == parent {
            return Ok(());
        }

        if let Some(parent) = parent {
            if let Err(err) = self.validate_attach(id, parent) {
                warn!(node = %id, parent = %parent, error = %err, "rejected reparent");
                return Err(err);
            }
        }

        if let Some(old) = old {
            self.remove_child(old, id);
        }
        self.slots[id.0].parent = parent;
        if let Some(parent) = parent {
            self.add_child(parent, id);
        }

        debug!(node = %id, old_parent = ?old, new_parent = ?parent, "reparented node");
        Ok(())
    }

    fn validate_attach(&self, id: NodeId, parent: NodeId) -> Result<()> {
        let child = self.slot(id)?;
        let owner = self.slot(parent)?;
        check_kind(&owner.value, &child.value)?;

        if parent == id || self.ancestors(parent).any(|ancestor| ancestor == id) {
            return Err(TreeError::Cycle { node: id, parent });
        }
        Ok(())
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_kind<T: NodeKind>(parent: &T, child: &T) -> Result<()> {
    if parent.accepts_child(child) {
        Ok(())
    } else {
        Err(TreeError::ChildKindMismatch {
            parent: parent.kind_name(),
            child: child.kind_name(),
        })
    }
}

/// Iterator over the owners of a node, nearest first
pub struct Ancestors<'a, T> {
    tree: &'a Tree<T>,
    next: Option<NodeId>,
}

impl<T> Iterator for Ancestors<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
