//! OpenDDL Core Parser
//!
//! Parses OpenDDL (Open Data Description Language) text into a tree of
//! structures carrying typed properties and primitive data.
//!
//! # Architecture
//!
//! - **normalize.rs** - In-place comment stripping and whitespace collapse
//! - **literal.rs** - Stateless literal tokenizers
//! - **parser.rs** - Recursive-descent structure parser and `OpenDdlParser` facade
//! - **tree.rs** - Node arena, navigation handles, tree builder
//! - **export.rs** - Writes a tree back out as OpenDDL text
//! - **value.rs** / **name.rs** / **property.rs** - Data model
//!
//! # Example
//!
//! ```
//! use openddl_core::{Document, ValueType};
//!
//! let doc = Document::parse(br#"
//!     GeometryNode $node1 (visible = true)
//!     {
//!         Name { string { "Box" } }
//!         Transform { float[3] { {1, 0, 0}, {0, 1, 0} } }
//!     }
//! "#).unwrap();
//!
//! let node = doc.root().first_child().unwrap();
//! assert_eq!(node.type_name(), Some("GeometryNode"));
//! assert_eq!(node.child_count(), 2);
//!
//! let transform = node.find_child("Transform").unwrap();
//! assert_eq!(transform.data()[0].ty, ValueType::Float);
//! assert_eq!(transform.data()[0].len(), 2);
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod export;
pub mod literal;
pub mod log;
pub mod name;
pub mod normalize;
pub mod parser;
pub mod property;
pub mod tree;
pub mod value;

pub use buffer::Buffer;
pub use config::ParseOptions;
pub use error::{ErrorCategory, Expected, ParseError, ParseErrorKind, Parsed};
pub use export::write_document;
pub use log::{LogCallback, LogSeverity};
pub use name::{Identifier, Name, NameType, Reference};
pub use normalize::normalize_buffer;
pub use parser::OpenDdlParser;
pub use property::{Property, PropertyValue};
pub use tree::{DataBlock, DataPayload, Document, Node, NodeId, NodeKind, TreeBuilder};
pub use value::{Value, ValueType};
