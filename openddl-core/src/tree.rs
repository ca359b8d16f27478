//! Tree representation of parsed OpenDDL documents.
//!
//! Nodes live in an index-based arena so parent links need no reference
//! cycles. Every structure header becomes one node; primitive data
//! structures (`float { 1.0, 2.0 }`) become [`DataBlock`]s on the enclosing
//! node, or on the root at top level.
//!
//! # Example
//!
//! ```
//! use openddl_core::Document;
//!
//! let doc = Document::parse(b"Metric (key = \"distance\") {float {1.0}}").unwrap();
//! let metric = doc.root().first_child().unwrap();
//!
//! assert_eq!(metric.type_name(), Some("Metric"));
//! let key = metric.property("key").and_then(|p| p.literal());
//! assert_eq!(key.and_then(|v| v.as_str()), Some("distance"));
//! assert_eq!(metric.data()[0].len(), 1);
//! ```

use std::fmt;

use crate::error::ParseError;
use crate::name::{Identifier, Name};
use crate::normalize::normalize_buffer;
use crate::parser::parse_into;
use crate::config::ParseOptions;
use crate::property::Property;
use crate::value::{Value, ValueType};

// ============================================================================
// Core Types
// ============================================================================

/// Index into the document's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Internal node storage.
#[derive(Debug, Clone)]
struct NodeData {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
    properties: Vec<Property>,
    data: Vec<DataBlock>,
}

/// The kind of node in the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Sentinel root anchoring the top-level structures.
    Root,

    /// A structure: `Type $name (props) { ... }`.
    Structure { ty: Identifier, name: Option<Name> },
}

/// Payload of a primitive data structure.
#[derive(Debug, Clone, PartialEq)]
pub enum DataPayload {
    /// `float { 1, 2, 3 }`
    List(Vec<Value>),
    /// `float[2] { {1, 2}, {3, 4} }`
    Arrays(Vec<Vec<Value>>),
}

/// One primitive data structure from a structure body.
#[derive(Debug, Clone, PartialEq)]
pub struct DataBlock {
    pub ty: ValueType,
    pub name: Option<Name>,
    /// Declared `[n]` size, if any.
    pub array_size: Option<usize>,
    pub payload: DataPayload,
}

impl DataBlock {
    /// Number of values in a list, or of sub-arrays in an array list.
    pub fn len(&self) -> usize {
        match &self.payload {
            DataPayload::List(values) => values.len(),
            DataPayload::Arrays(arrays) => arrays.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match &self.payload {
            DataPayload::List(values) => Some(values),
            DataPayload::Arrays(_) => None,
        }
    }

    pub fn as_arrays(&self) -> Option<&[Vec<Value>]> {
        match &self.payload {
            DataPayload::Arrays(arrays) => Some(arrays),
            DataPayload::List(_) => None,
        }
    }

    /// All values in source order, flattening sub-arrays.
    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        let (list, arrays) = match &self.payload {
            DataPayload::List(values) => (values.as_slice(), None),
            DataPayload::Arrays(arrays) => (&[][..], Some(arrays)),
        };
        list.iter().chain(arrays.into_iter().flatten().flatten())
    }
}

// ============================================================================
// Document
// ============================================================================

/// A parsed OpenDDL document as a tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Document {
    fn empty() -> Self {
        let root = NodeData {
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Root,
            properties: Vec::new(),
            data: Vec::new(),
        };
        Document { nodes: vec![root], root: NodeId::new(0) }
    }

    /// Parse input bytes into a document tree with default options.
    ///
    /// The input is copied before normalization; use
    /// [`OpenDdlParser`](crate::OpenDdlParser) to parse a buffer in place.
    pub fn parse(input: &[u8]) -> Result<Self, ParseError> {
        Self::parse_with(input, &ParseOptions::default())
    }

    /// Parse input bytes with explicit options.
    pub fn parse_with(input: &[u8], options: &ParseOptions) -> Result<Self, ParseError> {
        let mut buf = input.to_vec();
        let len = normalize_buffer(&mut buf);
        let mut builder = TreeBuilder::new();
        parse_into(&buf[..len], &mut builder, options)?;
        Ok(builder.finish())
    }

    /// Get the root node.
    pub fn root(&self) -> Node<'_> {
        Node { doc: self, id: self.root }
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<Node<'_>> {
        if id.index() < self.nodes.len() {
            Some(Node { doc: self, id })
        } else {
            None
        }
    }

    /// Number of structure nodes, not counting the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    fn node_data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

// ============================================================================
// Node (navigation handle)
// ============================================================================

/// A handle for navigating the document tree.
#[derive(Clone, Copy)]
pub struct Node<'doc> {
    doc: &'doc Document,
    id: NodeId,
}

impl<'doc> Node<'doc> {
    fn at(&self, id: NodeId) -> Node<'doc> {
        Node { doc: self.doc, id }
    }

    fn data_ref(&self) -> &'doc NodeData {
        self.doc.node_data(self.id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &'doc NodeKind {
        &self.data_ref().kind
    }

    pub fn is_root(&self) -> bool {
        matches!(self.kind(), NodeKind::Root)
    }

    /// The structure's type identifier; `None` for the root.
    pub fn type_name(&self) -> Option<&'doc str> {
        match self.kind() {
            NodeKind::Structure { ty, .. } => Some(ty.as_str()),
            NodeKind::Root => None,
        }
    }

    /// The structure's `$global` or `%local` name.
    pub fn name(&self) -> Option<&'doc Name> {
        match self.kind() {
            NodeKind::Structure { name, .. } => name.as_ref(),
            NodeKind::Root => None,
        }
    }

    pub fn parent(&self) -> Option<Node<'doc>> {
        self.data_ref().parent.map(|id| self.at(id))
    }

    pub fn children(&self) -> impl Iterator<Item = Node<'doc>> + 'doc {
        let doc = self.doc;
        self.data_ref().children.iter().map(move |&id| Node { doc, id })
    }

    pub fn child_count(&self) -> usize {
        self.data_ref().children.len()
    }

    pub fn first_child(&self) -> Option<Node<'doc>> {
        self.data_ref().children.first().map(|&id| self.at(id))
    }

    pub fn last_child(&self) -> Option<Node<'doc>> {
        self.data_ref().children.last().map(|&id| self.at(id))
    }

    pub fn next_sibling(&self) -> Option<Node<'doc>> {
        let siblings = &self.parent()?.data_ref().children;
        let pos = siblings.iter().position(|&id| id == self.id)?;
        siblings.get(pos + 1).map(|&id| self.at(id))
    }

    pub fn prev_sibling(&self) -> Option<Node<'doc>> {
        let siblings = &self.parent()?.data_ref().children;
        let pos = siblings.iter().position(|&id| id == self.id)?;
        pos.checked_sub(1).map(|p| self.at(siblings[p]))
    }

    /// First child structure with the given type identifier.
    pub fn find_child(&self, type_name: &str) -> Option<Node<'doc>> {
        self.children().find(|c| c.type_name() == Some(type_name))
    }

    /// Header properties in source order.
    pub fn properties(&self) -> &'doc [Property] {
        &self.data_ref().properties
    }

    /// Look up a property by key. The first match wins.
    pub fn property(&self, key: &str) -> Option<&'doc Property> {
        self.properties().iter().find(|p| p.key == key)
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.property(key).is_some()
    }

    /// Primitive data blocks in source order.
    pub fn data(&self) -> &'doc [DataBlock] {
        &self.data_ref().data
    }

    /// The flat values of the first data block, for the common
    /// single-list leaf.
    pub fn values(&self) -> Option<&'doc [Value]> {
        self.data().first()?.as_list()
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", self.kind())
            .finish()
    }
}

// ============================================================================
// TreeBuilder
// ============================================================================

/// Builds a document tree while the structure parser scans forward.
///
/// The stack holds the currently open path. A node is created under the
/// current top, pushed while its body is parsed, then popped and appended
/// to the new top.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    doc: Document,
    /// Stack of open node IDs.
    stack: Vec<NodeId>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// A builder holding only the sentinel root, with an empty stack.
    pub fn new() -> Self {
        TreeBuilder { doc: Document::empty(), stack: Vec::new() }
    }

    pub fn root_id(&self) -> NodeId {
        self.doc.root
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Allocate a structure node. It is not linked until appended.
    pub fn new_node(
        &mut self,
        ty: Identifier,
        name: Option<Name>,
        properties: Vec<Property>,
    ) -> NodeId {
        let id = NodeId::new(self.doc.nodes.len());
        self.doc.nodes.push(NodeData {
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Structure { ty, name },
            properties,
            data: Vec::new(),
        });
        id
    }

    /// Make `id` the current parse target.
    pub fn push_node(&mut self, id: NodeId) {
        self.stack.push(id);
    }

    /// Remove and return the current parse target.
    pub fn pop_node(&mut self) -> Option<NodeId> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<NodeId> {
        self.stack.last().copied()
    }

    /// Number of open nodes, root included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Link `child` as the last child of `parent`.
    ///
    /// Returns `false` and changes nothing when either id does not belong
    /// to this builder.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let len = self.doc.nodes.len();
        if parent.index() >= len || child.index() >= len || parent == child {
            return false;
        }
        self.doc.nodes[child.index()].parent = Some(parent);
        self.doc.nodes[parent.index()].children.push(child);
        true
    }

    /// Attach a data block to `id`. Returns `false` for an unknown id.
    pub fn attach_data(&mut self, id: NodeId, block: DataBlock) -> bool {
        match self.doc.nodes.get_mut(id.index()) {
            Some(node) => {
                node.data.push(block);
                true
            }
            None => false,
        }
    }

    /// Drop every node but the root and empty the stack.
    pub fn clear(&mut self) {
        *self = TreeBuilder::new();
    }

    pub fn finish(self) -> Document {
        self.doc
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    #[test]
    fn test_simple_structure() {
        let doc = Document::parse(b"Metric (key = \"distance\") {float {1.0}}").unwrap();
        let root = doc.root();

        assert!(root.is_root());
        assert_eq!(root.type_name(), None);
        assert_eq!(doc.node_count(), 1);

        let metric = root.first_child().unwrap();
        assert_eq!(metric.type_name(), Some("Metric"));
        assert_eq!(metric.properties().len(), 1);
        assert_eq!(
            metric.property("key").and_then(|p| p.literal()),
            Some(&Value::String("distance".into()))
        );
        assert_eq!(metric.data().len(), 1);
        assert_eq!(metric.data()[0].ty, ValueType::Float);
        assert_eq!(metric.values(), Some(&[Value::Float(1.0)][..]));
    }

    #[test]
    fn test_nested_structures() {
        let doc =
            Document::parse(b"GeometryNode $node1 { Name { string {\"a\"} } Mesh %m {} }").unwrap();
        let node = doc.root().first_child().unwrap();
        assert_eq!(node.name(), Some(&Name::global("node1")));
        assert_eq!(node.child_count(), 2);

        let name = node.find_child("Name").unwrap();
        let mesh = node.find_child("Mesh").unwrap();
        assert_eq!(name.parent().unwrap().id(), node.id());
        assert_eq!(mesh.name(), Some(&Name::local("m")));
        assert_eq!(name.next_sibling().unwrap().id(), mesh.id());
        assert_eq!(mesh.prev_sibling().unwrap().id(), name.id());
        assert!(mesh.next_sibling().is_none());
        assert!(name.prev_sibling().is_none());
        assert!(node.find_child("Missing").is_none());
    }

    #[test]
    fn test_top_level_data_goes_to_root() {
        let doc = Document::parse(b"int32 {1, 2} A {}").unwrap();
        let root = doc.root();
        assert_eq!(root.data().len(), 1);
        assert_eq!(root.values().map(|v| v.len()), Some(2));
        assert_eq!(root.child_count(), 1);
        assert_eq!(doc.node_count(), 1);
    }

    #[test]
    fn test_data_block_views() {
        let doc = Document::parse(b"V { int16[2] $pts { {1, 2}, {3, 4} } }").unwrap();
        let block = &doc.root().first_child().unwrap().data()[0];

        assert_eq!(block.name, Some(Name::global("pts")));
        assert_eq!(block.array_size, Some(2));
        assert_eq!(block.len(), 2);
        assert!(block.as_list().is_none());
        assert_eq!(
            block.as_arrays().map(|a| a[1].clone()),
            Some(vec![Value::Int16(3), Value::Int16(4)])
        );
        let flat: Vec<_> = block.values().filter_map(|v| v.as_i64()).collect();
        assert_eq!(flat, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_builder_stack() {
        let mut builder = TreeBuilder::new();
        assert_eq!(builder.top(), None);

        let root = builder.root_id();
        builder.push_node(root);
        let a = builder.new_node(Identifier::new("A"), None, Vec::new());
        builder.push_node(a);
        assert_eq!(builder.top(), Some(a));
        assert_eq!(builder.depth(), 2);

        let popped = builder.pop_node().unwrap();
        let parent = builder.top().unwrap();
        assert!(builder.append_child(parent, popped));
        assert_eq!(builder.pop_node(), Some(root));
        assert_eq!(builder.pop_node(), None);

        let doc = builder.finish();
        assert_eq!(doc.root().first_child().and_then(|n| n.type_name()), Some("A"));
    }

    #[test]
    fn test_builder_rejects_foreign_ids() {
        let mut other = TreeBuilder::new();
        other.new_node(Identifier::new("X"), None, Vec::new());
        let foreign = other.new_node(Identifier::new("Y"), None, Vec::new());

        let mut builder = TreeBuilder::new();
        let root = builder.root_id();
        let a = builder.new_node(Identifier::new("A"), None, Vec::new());
        let block = DataBlock {
            ty: ValueType::Int32,
            name: None,
            array_size: None,
            payload: DataPayload::List(vec![Value::Int32(1)]),
        };

        assert!(!builder.append_child(root, foreign));
        assert!(!builder.append_child(foreign, a));
        assert!(!builder.append_child(a, a));
        assert!(!builder.attach_data(foreign, block.clone()));
        assert!(builder.attach_data(a, block));

        // A cleared builder no longer knows ids it handed out before.
        builder.clear();
        assert!(!builder.append_child(root, a));

        let doc = builder.finish();
        assert_eq!(doc.node_count(), 0);
        assert!(doc.root().data().is_empty());
    }

    #[test]
    fn test_get_out_of_range() {
        let doc = Document::parse(b"").unwrap();
        assert!(doc.get(NodeId::new(0)).is_some());
        assert!(doc.get(NodeId::new(1)).is_none());
        assert_eq!(doc.node_count(), 0);
    }

    #[test]
    fn test_parse_error() {
        let err = Document::parse(b"A { B {").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Unclosed(2));
    }
}
