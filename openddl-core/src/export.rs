//! Write a document tree back out as OpenDDL text.
//!
//! Output is indented with one tab per level. Within a body, data blocks
//! come before child structures. Every value is written so that it parses
//! back to the same value; non-finite floats use their hex bit pattern.
//!
//! ```
//! use openddl_core::Document;
//!
//! let doc = Document::parse(b"Metric (key = \"distance\") {float {1.0}}").unwrap();
//! assert_eq!(doc.to_ddl_string(), "Metric (key = \"distance\")\n{\n\tfloat {1.0}\n}\n");
//! ```

use std::fmt::{self, Write};

use crate::property::{Property, PropertyValue};
use crate::tree::{DataBlock, DataPayload, Document, Node};
use crate::value::Value;

/// Serialize `doc` into `out`.
pub fn write_document<W: Write>(doc: &Document, out: &mut W) -> fmt::Result {
    let root = doc.root();
    write_body(root, 0, out)
}

impl Document {
    /// The document as OpenDDL text.
    pub fn to_ddl_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_document(self, f)
    }
}

fn indent<W: Write>(level: usize, out: &mut W) -> fmt::Result {
    for _ in 0..level {
        out.write_char('\t')?;
    }
    Ok(())
}

/// Data blocks, then child structures, of `node` at `level`.
fn write_body<W: Write>(node: Node<'_>, level: usize, out: &mut W) -> fmt::Result {
    for block in node.data() {
        indent(level, out)?;
        write_data_block(block, out)?;
        out.write_char('\n')?;
    }
    for child in node.children() {
        write_structure(child, level, out)?;
    }
    Ok(())
}

fn write_structure<W: Write>(node: Node<'_>, level: usize, out: &mut W) -> fmt::Result {
    indent(level, out)?;
    out.write_str(node.type_name().unwrap_or_default())?;
    if let Some(name) = node.name() {
        write!(out, " {}", name)?;
    }
    if !node.properties().is_empty() {
        out.write_str(" (")?;
        for (i, property) in node.properties().iter().enumerate() {
            if i > 0 {
                out.write_str(", ")?;
            }
            write_property(property, out)?;
        }
        out.write_char(')')?;
    }

    if node.data().is_empty() && node.child_count() == 0 {
        return out.write_str(" {}\n");
    }
    out.write_char('\n')?;
    indent(level, out)?;
    out.write_str("{\n")?;
    write_body(node, level + 1, out)?;
    indent(level, out)?;
    out.write_str("}\n")
}

fn write_property<W: Write>(property: &Property, out: &mut W) -> fmt::Result {
    write!(out, "{} = ", property.key)?;
    match &property.value {
        PropertyValue::Literal(value) => write_value(value, out),
        PropertyValue::Reference(reference) => write!(out, "{}", reference),
    }
}

fn write_data_block<W: Write>(block: &DataBlock, out: &mut W) -> fmt::Result {
    out.write_str(block.ty.name())?;
    if let Some(size) = block.array_size {
        write!(out, "[{}]", size)?;
    }
    if let Some(name) = &block.name {
        write!(out, " {}", name)?;
    }
    out.write_str(" {")?;
    match &block.payload {
        DataPayload::List(values) => write_list(values, out)?,
        DataPayload::Arrays(arrays) => {
            for (i, values) in arrays.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                out.write_char('{')?;
                write_list(values, out)?;
                out.write_char('}')?;
            }
        }
    }
    out.write_char('}')
}

fn write_list<W: Write>(values: &[Value], out: &mut W) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write_value(value, out)?;
    }
    Ok(())
}

/// Write one value in a form the literal tokenizers read back.
pub fn write_value<W: Write>(value: &Value, out: &mut W) -> fmt::Result {
    match value {
        Value::Bool(b) => write!(out, "{}", b),
        Value::Int8(x) => write!(out, "{}", x),
        Value::Int16(x) => write!(out, "{}", x),
        Value::Int32(x) => write!(out, "{}", x),
        Value::Int64(x) => write!(out, "{}", x),
        Value::UInt8(x) => write!(out, "{}", x),
        Value::UInt16(x) => write!(out, "{}", x),
        Value::UInt32(x) => write!(out, "{}", x),
        Value::UInt64(x) => write!(out, "{}", x),
        // `{:?}` always keeps a `.` or exponent and round-trips exactly.
        Value::Float(x) if x.is_finite() => write!(out, "{:?}", x),
        Value::Float(x) => write!(out, "0x{:08X}", x.to_bits()),
        Value::Double(x) if x.is_finite() => write!(out, "{:?}", x),
        Value::Double(x) => write!(out, "0x{:016X}", x.to_bits()),
        Value::String(s) => write!(out, "\"{}\"", s),
        Value::Ref(r) => write!(out, "{}", r),
        Value::Type(t) => out.write_str(t.name()),
        Value::Binary(bytes) => {
            out.write_str("0x")?;
            if bytes.is_empty() {
                return out.write_char('0');
            }
            for b in bytes {
                write!(out, "{:02X}", b)?;
            }
            Ok(())
        }
    }
}
