//! Primitive data types and typed values.
//!
//! OpenDDL types data syntactically by the enclosing declaration: a
//! `float { 1, 2 }` block holds floats even though the tokens look like
//! integers. The literal tokenizers receive the declared [`ValueType`] and
//! produce the matching [`Value`] variant.

use std::fmt;

use phf::phf_map;

use crate::name::Reference;

/// Primitive data type of a value or data block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    /// 32-bit float (`float`).
    Float,
    /// 64-bit float (`double`).
    Double,
    String,
    Ref,
    Type,
    /// Raw bytes from a hexadecimal blob. Has no keyword.
    Binary,
}

/// Keyword table: canonical OpenDDL names plus the short aliases.
static KEYWORDS: phf::Map<&'static str, ValueType> = phf_map! {
    "bool" => ValueType::Bool,
    "b" => ValueType::Bool,
    "int8" => ValueType::Int8,
    "i8" => ValueType::Int8,
    "int16" => ValueType::Int16,
    "i16" => ValueType::Int16,
    "int32" => ValueType::Int32,
    "i32" => ValueType::Int32,
    "int64" => ValueType::Int64,
    "i64" => ValueType::Int64,
    "unsigned_int8" => ValueType::UInt8,
    "uint8" => ValueType::UInt8,
    "u8" => ValueType::UInt8,
    "unsigned_int16" => ValueType::UInt16,
    "uint16" => ValueType::UInt16,
    "u16" => ValueType::UInt16,
    "unsigned_int32" => ValueType::UInt32,
    "uint32" => ValueType::UInt32,
    "u32" => ValueType::UInt32,
    "unsigned_int64" => ValueType::UInt64,
    "uint64" => ValueType::UInt64,
    "u64" => ValueType::UInt64,
    "float" => ValueType::Float,
    "float32" => ValueType::Float,
    "f" => ValueType::Float,
    "f32" => ValueType::Float,
    "double" => ValueType::Double,
    "float64" => ValueType::Double,
    "d" => ValueType::Double,
    "f64" => ValueType::Double,
    "string" => ValueType::String,
    "s" => ValueType::String,
    "ref" => ValueType::Ref,
    "r" => ValueType::Ref,
    "type" => ValueType::Type,
    "t" => ValueType::Type,
};

impl ValueType {
    /// Look up a primitive data type keyword.
    #[inline]
    pub fn from_keyword(keyword: &str) -> Option<ValueType> {
        KEYWORDS.get(keyword).copied()
    }

    /// Canonical keyword (`"binary"` for the keyword-less blob type).
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Int8 => "int8",
            ValueType::Int16 => "int16",
            ValueType::Int32 => "int32",
            ValueType::Int64 => "int64",
            ValueType::UInt8 => "unsigned_int8",
            ValueType::UInt16 => "unsigned_int16",
            ValueType::UInt32 => "unsigned_int32",
            ValueType::UInt64 => "unsigned_int64",
            ValueType::Float => "float",
            ValueType::Double => "double",
            ValueType::String => "string",
            ValueType::Ref => "ref",
            ValueType::Type => "type",
            ValueType::Binary => "binary",
        }
    }

    #[inline]
    pub fn is_integer(self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    #[inline]
    pub fn is_signed(self) -> bool {
        matches!(self, ValueType::Int8 | ValueType::Int16 | ValueType::Int32 | ValueType::Int64)
    }

    #[inline]
    pub fn is_unsigned(self) -> bool {
        matches!(self, ValueType::UInt8 | ValueType::UInt16 | ValueType::UInt32 | ValueType::UInt64)
    }

    #[inline]
    pub fn is_float(self) -> bool {
        matches!(self, ValueType::Float | ValueType::Double)
    }

    /// Width in bits of numeric types.
    pub fn bits(self) -> Option<u32> {
        match self {
            ValueType::Int8 | ValueType::UInt8 => Some(8),
            ValueType::Int16 | ValueType::UInt16 => Some(16),
            ValueType::Int32 | ValueType::UInt32 | ValueType::Float => Some(32),
            ValueType::Int64 | ValueType::UInt64 | ValueType::Double => Some(64),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single decoded literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float(f32),
    Double(f64),
    /// String content between the quotes, escapes kept as written.
    String(String),
    Ref(Reference),
    Type(ValueType),
    Binary(Vec<u8>),
}

impl Value {
    /// The primitive type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Bool,
            Value::Int8(_) => ValueType::Int8,
            Value::Int16(_) => ValueType::Int16,
            Value::Int32(_) => ValueType::Int32,
            Value::Int64(_) => ValueType::Int64,
            Value::UInt8(_) => ValueType::UInt8,
            Value::UInt16(_) => ValueType::UInt16,
            Value::UInt32(_) => ValueType::UInt32,
            Value::UInt64(_) => ValueType::UInt64,
            Value::Float(_) => ValueType::Float,
            Value::Double(_) => ValueType::Double,
            Value::String(_) => ValueType::String,
            Value::Ref(_) => ValueType::Ref,
            Value::Type(_) => ValueType::Type,
            Value::Binary(_) => ValueType::Binary,
        }
    }

    /// Try to get as boolean.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Any integer that fits in `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int8(x) => Some(*x as i64),
            Value::Int16(x) => Some(*x as i64),
            Value::Int32(x) => Some(*x as i64),
            Value::Int64(x) => Some(*x),
            Value::UInt8(x) => Some(*x as i64),
            Value::UInt16(x) => Some(*x as i64),
            Value::UInt32(x) => Some(*x as i64),
            Value::UInt64(x) => i64::try_from(*x).ok(),
            _ => None,
        }
    }

    /// Any non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt8(x) => Some(*x as u64),
            Value::UInt16(x) => Some(*x as u64),
            Value::UInt32(x) => Some(*x as u64),
            Value::UInt64(x) => Some(*x),
            Value::Int8(_) | Value::Int16(_) | Value::Int32(_) | Value::Int64(_) => {
                self.as_i64().and_then(|x| u64::try_from(x).ok())
            }
            _ => None,
        }
    }

    /// Float or double, widened.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x as f64),
            Value::Double(x) => Some(*x),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Value::Ref(r) => Some(r),
            _ => None,
        }
    }

    #[inline]
    pub fn as_type(&self) -> Option<ValueType> {
        match self {
            Value::Type(t) => Some(*t),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }
}
