//! Structure parser and parser facade.
//!
//! [`OpenDdlParser`] owns (or borrows) the input buffer, normalizes it,
//! and drives a recursive-descent pass over the normalized bytes that
//! builds the node tree as it scans forward:
//!
//! ```text
//! document  := (structure | data)*
//! structure := identifier name? properties? '{' (structure | data)* '}'
//! data      := keyword ('[' n ']')? name? '{' literals | sub-arrays '}'
//! ```
//!
//! # Example
//!
//! ```
//! use openddl_core::{OpenDdlParser, Value};
//!
//! let mut parser = OpenDdlParser::with_buffer("Metric (key = \"distance\") {float {1.0}}");
//! assert!(parser.parse());
//!
//! let metric = parser.root().unwrap().first_child().unwrap();
//! assert_eq!(metric.type_name(), Some("Metric"));
//! assert_eq!(metric.values(), Some(&[Value::Float(1.0)][..]));
//! ```

use std::fmt;
use std::mem;

use crate::buffer::Buffer;
use crate::config::ParseOptions;
use crate::error::{ParseError, ParseErrorKind};
use crate::literal::{
    next_token, parse_data_array_list, parse_data_list, parse_identifier, parse_name,
    parse_primitive_data_type, parse_property, starts_literal,
};
use crate::log::{emit, LogCallback, LogSeverity};
use crate::normalize::normalize_buffer;
use crate::tree::{DataBlock, DataPayload, Document, Node, NodeId, TreeBuilder};
use crate::value::ValueType;

// ============================================================================
// Structure parser
// ============================================================================

/// Parse a normalized buffer into `tree`.
///
/// The root is pushed first and popped once the whole buffer is consumed.
pub(crate) fn parse_into(
    buf: &[u8],
    tree: &mut TreeBuilder,
    options: &ParseOptions,
) -> Result<(), ParseError> {
    let root = tree.root_id();
    tree.push_node(root);

    let mut parser = StructureParser { buf, tree, options };
    let mut pos = next_token(buf, 0);
    while pos < buf.len() {
        if buf[pos] == b'}' {
            return Err(ParseError::new(ParseErrorKind::UnexpectedToken('}'), pos));
        }
        pos = parser.parse_next_node(pos)?;
        pos = next_token(buf, pos);
    }

    parser.tree.pop_node();
    Ok(())
}

struct StructureParser<'p> {
    buf: &'p [u8],
    tree: &'p mut TreeBuilder,
    options: &'p ParseOptions,
}

impl StructureParser<'_> {
    /// Parse one structure or primitive data structure starting at `pos`.
    fn parse_next_node(&mut self, pos: usize) -> Result<usize, ParseError> {
        let start = next_token(self.buf, pos);
        let (id, _) = parse_identifier(self.buf, start)?;
        if ValueType::from_keyword(id.as_str()).is_some() {
            return self.parse_data_structure(start);
        }

        let (node, pos) = self.parse_header(start)?;
        let depth = self.tree.depth() - 1;
        if depth > self.options.max_depth {
            return Err(ParseError::new(ParseErrorKind::TooDeep(self.options.max_depth), start));
        }
        let end = self.parse_structure(node, pos)?;

        if let Some(node) = self.tree.pop_node() {
            if let Some(parent) = self.tree.top() {
                self.tree.append_child(parent, node);
            }
        }
        Ok(end)
    }

    /// `identifier name? ('(' property* ')')?`, then create and push the node.
    fn parse_header(&mut self, start: usize) -> Result<(NodeId, usize), ParseError> {
        let buf = self.buf;
        let (ty, mut pos) = parse_identifier(buf, start)?;

        let mut name = None;
        let p = next_token(buf, pos);
        if matches!(buf.get(p), Some(b'$') | Some(b'%')) {
            let (n, end) = parse_name(buf, p)?;
            name = Some(n);
            pos = end;
        }

        let mut properties = Vec::new();
        let p = next_token(buf, pos);
        if buf.get(p) == Some(&b'(') {
            let mut q = p + 1;
            loop {
                q = next_token(buf, q);
                match buf.get(q) {
                    Some(b')') => {
                        pos = q + 1;
                        break;
                    }
                    None => return Err(ParseError::new(ParseErrorKind::ExpectedToken(')'), q)),
                    Some(_) => {
                        let (property, end) = parse_property(buf, q)?;
                        properties.push(property);
                        q = end;
                    }
                }
            }
        }

        let node = self.tree.new_node(ty, name, properties);
        self.tree.push_node(node);
        Ok((node, pos))
    }

    /// `'{' (structure | data)* '}'` for the node on top of the stack.
    fn parse_structure(&mut self, node: NodeId, pos: usize) -> Result<usize, ParseError> {
        let buf = self.buf;
        let open = next_token(buf, pos);
        if buf.get(open) != Some(&b'{') {
            return Err(ParseError::new(ParseErrorKind::ExpectedToken('{'), open));
        }

        let mut p = next_token(buf, open + 1);
        if buf.get(p).is_some_and(|&b| starts_literal(b)) {
            // Literal data under a type that is not a primitive keyword.
            let ty = self
                .tree
                .document()
                .get(node)
                .and_then(|n| n.type_name())
                .unwrap_or_default()
                .to_owned();
            return Err(ParseError::new(ParseErrorKind::UnknownDataType(ty), p));
        }

        loop {
            p = next_token(buf, p);
            match buf.get(p) {
                Some(b'}') => return Ok(p + 1),
                None => {
                    let open = self.tree.depth().saturating_sub(1);
                    return Err(ParseError::new(ParseErrorKind::Unclosed(open), p));
                }
                Some(_) => p = self.parse_next_node(p)?,
            }
        }
    }

    /// `keyword ('[' n ']')? name? '{' ... '}'`, attached to the top of stack.
    fn parse_data_structure(&mut self, start: usize) -> Result<usize, ParseError> {
        let buf = self.buf;
        let (primitive, mut pos) = parse_primitive_data_type(buf, start)?;

        let mut name = None;
        let p = next_token(buf, pos);
        if matches!(buf.get(p), Some(b'$') | Some(b'%')) {
            let (n, end) = parse_name(buf, p)?;
            name = Some(n);
            pos = end;
        }

        let open = next_token(buf, pos);
        if buf.get(open) != Some(&b'{') {
            return Err(ParseError::new(ParseErrorKind::ExpectedToken('{'), open));
        }
        let nested = buf.get(next_token(buf, open + 1)) == Some(&b'{');

        let (payload, end) = if primitive.array_size.is_some() || nested {
            let (arrays, end) = parse_data_array_list(buf, open, primitive.ty)?;
            if let (Some(expected), true) = (primitive.array_size, self.options.check_array_sizes) {
                if let Some(bad) = arrays.iter().find(|a| a.len() != expected) {
                    return Err(ParseError::new(
                        ParseErrorKind::ArraySizeMismatch { expected, found: bad.len() },
                        open,
                    ));
                }
            }
            (DataPayload::Arrays(arrays), end)
        } else {
            let (values, end) = parse_data_list(buf, open, primitive.ty)?;
            (DataPayload::List(values), end)
        };

        let target = self.tree.top().unwrap_or_else(|| self.tree.root_id());
        self.tree.attach_data(
            target,
            DataBlock { ty: primitive.ty, name, array_size: primitive.array_size, payload },
        );
        Ok(end)
    }
}

// ============================================================================
// Facade
// ============================================================================

/// OpenDDL parser over an owned or borrowed buffer.
///
/// The parsed tree stays with the parser until [`clear`](Self::clear), the
/// next parse, or [`take_document`](Self::take_document).
pub struct OpenDdlParser<'a> {
    buffer: Option<Buffer<'a>>,
    /// Logical length; shrinks after normalization.
    len: usize,
    tree: TreeBuilder,
    options: ParseOptions,
    log_callback: Option<LogCallback>,
    last_error: Option<ParseError>,
    /// Set once a parse succeeded and the tree is whole.
    complete: bool,
}

impl Default for OpenDdlParser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> OpenDdlParser<'a> {
    /// A parser with no buffer.
    pub fn new() -> Self {
        OpenDdlParser {
            buffer: None,
            len: 0,
            tree: TreeBuilder::new(),
            options: ParseOptions::default(),
            log_callback: None,
            last_error: None,
            complete: false,
        }
    }

    pub fn with_buffer(buffer: impl Into<Buffer<'a>>) -> Self {
        let mut parser = Self::new();
        parser.set_buffer(buffer);
        parser
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn set_options(&mut self, options: ParseOptions) {
        self.options = options;
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Replace the active buffer. An owned predecessor is dropped, and any
    /// previous tree is discarded.
    pub fn set_buffer(&mut self, buffer: impl Into<Buffer<'a>>) {
        let buffer = buffer.into();
        self.len = buffer.len();
        self.buffer = Some(buffer);
        self.reset_tree();
    }

    /// The logical bytes of the active buffer (normalized after a parse).
    pub fn buffer(&self) -> &[u8] {
        match &self.buffer {
            Some(b) => &b.as_slice()[..self.len],
            None => &[],
        }
    }

    pub fn buffer_size(&self) -> usize {
        self.len
    }

    /// Drop the buffer and the tree. Options and the log callback stay.
    pub fn clear(&mut self) {
        self.buffer = None;
        self.len = 0;
        self.reset_tree();
    }

    fn reset_tree(&mut self) {
        self.tree.clear();
        self.last_error = None;
        self.complete = false;
    }

    /// Normalize and parse the buffer. On failure, one message goes to the
    /// log callback at `Error` severity and `false` is returned.
    pub fn parse(&mut self) -> bool {
        self.try_parse().is_ok()
    }

    /// Like [`parse`](Self::parse), returning the error.
    pub fn try_parse(&mut self) -> Result<(), ParseError> {
        self.reset_tree();
        let result = self.run();
        match &result {
            Ok(()) => {
                self.complete = true;
                let message = format!("parsed {} structures", self.tree.document().node_count());
                emit(self.log_callback.as_ref(), LogSeverity::Debug, &message);
            }
            Err(err) => {
                self.tree.clear();
                emit(self.log_callback.as_ref(), LogSeverity::Error, &err.to_string());
                self.last_error = Some(err.clone());
            }
        }
        result
    }

    fn run(&mut self) -> Result<(), ParseError> {
        let buffer = self
            .buffer
            .as_mut()
            .ok_or_else(|| ParseError::new(ParseErrorKind::NoBuffer, 0))?;

        let before = self.len;
        self.len = normalize_buffer(&mut buffer.as_mut_slice()[..before]);
        tracing::debug!(target: "openddl", before, after = self.len, "buffer normalized");

        parse_into(&buffer.as_slice()[..self.len], &mut self.tree, &self.options)
    }

    /// Error of the last failed parse.
    pub fn last_error(&self) -> Option<&ParseError> {
        self.last_error.as_ref()
    }

    /// Install a diagnostic hook, replacing any previous one.
    pub fn set_log_callback<F>(&mut self, callback: F)
    where
        F: Fn(LogSeverity, &str) + Send + Sync + 'static,
    {
        self.log_callback = Some(Box::new(callback));
    }

    /// Remove the diagnostic hook; diagnostics are dropped again.
    pub fn clear_log_callback(&mut self) {
        self.log_callback = None;
    }

    pub fn log_callback(&self) -> Option<&LogCallback> {
        self.log_callback.as_ref()
    }

    pub fn push_node(&mut self, id: NodeId) {
        self.tree.push_node(id);
    }

    pub fn pop_node(&mut self) -> Option<NodeId> {
        self.tree.pop_node()
    }

    pub fn top(&self) -> Option<NodeId> {
        self.tree.top()
    }

    /// The sentinel root, once a parse has succeeded.
    pub fn root(&self) -> Option<Node<'_>> {
        self.document().map(Document::root)
    }

    pub fn document(&self) -> Option<&Document> {
        self.complete.then(|| self.tree.document())
    }

    /// Move the parsed tree out, leaving the parser without a root.
    pub fn take_document(&mut self) -> Option<Document> {
        if !mem::take(&mut self.complete) {
            return None;
        }
        Some(mem::take(&mut self.tree).finish())
    }

    /// Crate version string.
    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

impl fmt::Debug for OpenDdlParser<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenDdlParser")
            .field("buffer_size", &self.len)
            .field("options", &self.options)
            .field("has_log_callback", &self.log_callback.is_some())
            .field("complete", &self.complete)
            .field("last_error", &self.last_error)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
