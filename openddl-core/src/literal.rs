//! Literal tokenizers.
//!
//! Every tokenizer is a pure function over the (normalized) buffer:
//!
//! ```text
//! parse_x(buf, pos, ..) -> Result<(X, new_pos), ParseError>
//! ```
//!
//! `buf.len()` is the end bound. A tokenizer first skips separators with
//! [`next_token`], recognizes its literal at the resulting position, and
//! returns the position just past the token. Nothing is guessed: if the
//! expected shape is not there, the error carries the offset where
//! recognition failed.
//!
//! ```
//! use openddl_core::literal::{parse_integer_literal, parse_hexa_literal};
//! use openddl_core::{Value, ValueType};
//!
//! let (v, end) = parse_integer_literal(b"  -42}", 0, ValueType::Int16).unwrap();
//! assert_eq!((v, end), (Value::Int16(-42), 5));
//!
//! let (v, _) = parse_hexa_literal(b"0x1A2B", 0).unwrap();
//! assert_eq!(v, Value::Binary(vec![0x1A, 0x2B]));
//! ```

use unicode_xid::UnicodeXID;

use crate::error::{Expected, ParseError, ParseErrorKind, Parsed};
use crate::name::{Identifier, Name, NameType, Reference};
use crate::normalize::string_end;
use crate::property::{Property, PropertyValue};
use crate::value::{Value, ValueType};

// ============================================================================
// Character classes
// ============================================================================

/// Bytes skipped between tokens: whitespace and commas.
#[inline]
pub fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b',')
}

/// Skip separators starting at `pos`.
#[inline]
pub fn next_token(buf: &[u8], mut pos: usize) -> usize {
    while pos < buf.len() && is_separator(buf[pos]) {
        pos += 1;
    }
    pos
}

/// Can this byte open a literal (as opposed to a structure header)?
#[inline]
pub(crate) fn starts_literal(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'-' | b'+' | b'.' | b'"' | b'{')
}

/// Width in bytes of the identifier character at `pos`, if there is one.
fn ident_char_at(buf: &[u8], pos: usize, first: bool) -> Option<usize> {
    let b = *buf.get(pos)?;
    if b.is_ascii() {
        let ok = b == b'_' || b.is_ascii_alphabetic() || (!first && b.is_ascii_digit());
        return ok.then_some(1);
    }
    let (ch, width) = decode_char(&buf[pos..])?;
    let ok = if first {
        UnicodeXID::is_xid_start(ch)
    } else {
        UnicodeXID::is_xid_continue(ch)
    };
    ok.then_some(width)
}

/// Decode one multi-byte UTF-8 character.
fn decode_char(bytes: &[u8]) -> Option<(char, usize)> {
    let width = match bytes.first()? {
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return None,
    };
    let s = std::str::from_utf8(bytes.get(..width)?).ok()?;
    s.chars().next().map(|ch| (ch, width))
}

/// True when the byte at `pos` cannot continue a numeric or keyword token.
#[inline]
fn at_token_end(buf: &[u8], pos: usize) -> bool {
    match buf.get(pos) {
        None => true,
        Some(&b) => !(b == b'_' || b == b'.' || b.is_ascii_alphanumeric() || b >= 0x80),
    }
}

#[inline]
fn has_prefix(buf: &[u8], pos: usize, lower: u8) -> bool {
    buf.get(pos) == Some(&b'0')
        && buf.get(pos + 1).map(|b| b.to_ascii_lowercase()) == Some(lower)
}

#[inline]
fn literal_text(buf: &[u8], start: usize, end: usize) -> String {
    String::from_utf8_lossy(&buf[start..end]).into_owned()
}

// ============================================================================
// Identifiers, names, references
// ============================================================================

/// Parse an identifier. A leading digit is rejected.
pub fn parse_identifier(buf: &[u8], pos: usize) -> Parsed<Identifier> {
    let start = next_token(buf, pos);
    let mut end = match ident_char_at(buf, start, true) {
        Some(width) => start + width,
        None => return Err(ParseError::expected(Expected::Identifier, start)),
    };
    while let Some(width) = ident_char_at(buf, end, false) {
        end += width;
    }
    let text = std::str::from_utf8(&buf[start..end])
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidUtf8, start))?;
    Ok((Identifier::new(text), end))
}

/// Parse `$global`, `%local`, or a bare identifier.
///
/// The identifier must directly follow the sigil.
pub fn parse_name(buf: &[u8], pos: usize) -> Parsed<Name> {
    let start = next_token(buf, pos);
    let (ty, id_start) = match buf.get(start) {
        Some(b'$') => (NameType::Global, start + 1),
        Some(b'%') => (NameType::Local, start + 1),
        _ => (NameType::Plain, start),
    };
    if ident_char_at(buf, id_start, true).is_none() {
        return Err(ParseError::expected(Expected::Name, start));
    }
    let (id, end) = parse_identifier(buf, id_start)?;
    Ok((Name::new(ty, id), end))
}

/// Parse a reference: names joined by `.`, or the literal `null`.
///
/// A name directly followed by `%name` also continues the chain, so
/// `$node%mesh` and `$node.%mesh` are the same reference.
pub fn parse_reference(buf: &[u8], pos: usize) -> Parsed<Reference> {
    let start = next_token(buf, pos);
    let (first, mut end) = parse_name(buf, start)
        .map_err(|_| ParseError::expected(Expected::Reference, start))?;

    let continues = |end: usize| matches!(buf.get(end), Some(b'.') | Some(b'%'));
    if first.ty == NameType::Plain && first.id == "null" && !continues(end) {
        return Ok((Reference::null(), end));
    }

    let mut names = vec![first];
    while continues(end) {
        let name_start = if buf[end] == b'.' { end + 1 } else { end };
        if matches!(buf.get(name_start), Some(b) if is_separator(*b)) {
            return Err(ParseError::expected(Expected::Name, name_start));
        }
        let (name, name_end) = parse_name(buf, name_start)?;
        names.push(name);
        end = name_end;
    }
    Ok((Reference::new(names), end))
}

// ============================================================================
// Booleans
// ============================================================================

/// Parse `true` or `false` (case-sensitive).
pub fn parse_boolean_literal(buf: &[u8], pos: usize) -> Parsed<Value> {
    let start = next_token(buf, pos);
    let rest = &buf[start..];
    let (value, len) = if rest.starts_with(b"true") {
        (true, 4)
    } else if rest.starts_with(b"false") {
        (false, 5)
    } else {
        return Err(ParseError::expected(Expected::Boolean, start));
    };
    if ident_char_at(buf, start + len, false).is_some() {
        return Err(ParseError::expected(Expected::Boolean, start));
    }
    Ok((Value::Bool(value), start + len))
}

// ============================================================================
// Integers
// ============================================================================

/// Scan digits of `radix` with `_` separators between digits.
///
/// Returns the accumulated magnitude (`None` on overflow), the end
/// position, and the number of digits seen.
fn scan_digits(buf: &[u8], start: usize, radix: u32) -> (Option<u64>, usize, usize) {
    let mut pos = start;
    let mut value = Some(0u64);
    let mut count = 0;
    while let Some(&b) = buf.get(pos) {
        if let Some(digit) = (b as char).to_digit(radix) {
            value = value
                .and_then(|v| v.checked_mul(radix as u64))
                .and_then(|v| v.checked_add(digit as u64));
            count += 1;
            pos += 1;
        } else if b == b'_'
            && count > 0
            && buf.get(pos + 1).and_then(|&n| (n as char).to_digit(radix)).is_some()
        {
            pos += 1;
        } else {
            break;
        }
    }
    (value, pos, count)
}

/// Build an integer value of `ty`, or `None` if `v` does not fit.
fn integer_value(ty: ValueType, v: i128) -> Option<Value> {
    match ty {
        ValueType::Int8 => i8::try_from(v).ok().map(Value::Int8),
        ValueType::Int16 => i16::try_from(v).ok().map(Value::Int16),
        ValueType::Int32 => i32::try_from(v).ok().map(Value::Int32),
        ValueType::Int64 => i64::try_from(v).ok().map(Value::Int64),
        ValueType::UInt8 => u8::try_from(v).ok().map(Value::UInt8),
        ValueType::UInt16 => u16::try_from(v).ok().map(Value::UInt16),
        ValueType::UInt32 => u32::try_from(v).ok().map(Value::UInt32),
        ValueType::UInt64 => u64::try_from(v).ok().map(Value::UInt64),
        _ => None,
    }
}

/// Interpret a hex/binary/octal magnitude as a bit pattern of `ty`'s width.
fn bit_pattern(ty: ValueType, magnitude: u64) -> Option<i128> {
    let bits = ty.bits()?;
    let magnitude = magnitude as i128;
    if magnitude >= 1i128 << bits {
        return None;
    }
    if ty.is_signed() && magnitude >= 1i128 << (bits - 1) {
        Some(magnitude - (1i128 << bits))
    } else {
        Some(magnitude)
    }
}

/// Parse an integer literal of the integer type `ty`.
///
/// Accepts an optional sign, then decimal digits, or a `0x` (hex), `0b`
/// (binary), or `0o` (octal) bit pattern. Decimal values must lie in the
/// type's range; unsigned bit patterns must fit its width and are
/// reinterpreted as two's complement for signed types, so `0xFF` as `int8`
/// is `-1`. A negated bit pattern is a magnitude, range-checked like a
/// decimal: `-0x80` as `int8` is `-128`, `-0xFF` is out of range.
pub fn parse_integer_literal(buf: &[u8], pos: usize, ty: ValueType) -> Parsed<Value> {
    let start = next_token(buf, pos);
    if !ty.is_integer() {
        return Err(ParseError::expected(Expected::Integer, start));
    }

    let mut p = start;
    let negative = match buf.get(p) {
        Some(b'-') => {
            p += 1;
            true
        }
        Some(b'+') => {
            p += 1;
            false
        }
        _ => false,
    };

    let (magnitude, end, pattern) = if has_prefix(buf, p, b'x') {
        let (bytes, end) =
            hex_bytes(buf, p).map_err(|_| ParseError::expected(Expected::Integer, start))?;
        (bytes_to_u64(&bytes), end, true)
    } else {
        let (radix, digits_start, pattern) = if has_prefix(buf, p, b'b') {
            (2, p + 2, true)
        } else if has_prefix(buf, p, b'o') {
            (8, p + 2, true)
        } else {
            (10, p, false)
        };
        let (magnitude, end, count) = scan_digits(buf, digits_start, radix);
        if count == 0 || !at_token_end(buf, end) {
            return Err(ParseError::expected(Expected::Integer, start));
        }
        (magnitude, end, pattern)
    };

    let out_of_range = || {
        ParseError::new(
            ParseErrorKind::OutOfRange { literal: literal_text(buf, start, end), ty },
            start,
        )
    };

    let magnitude = magnitude.ok_or_else(out_of_range)?;
    let unsigned = if pattern && !negative {
        bit_pattern(ty, magnitude).ok_or_else(out_of_range)?
    } else {
        magnitude as i128
    };
    let signed = if negative { -unsigned } else { unsigned };
    let value = integer_value(ty, signed).ok_or_else(out_of_range)?;
    Ok((value, end))
}

/// Big-endian bytes to `u64`, ignoring leading zero bytes.
fn bytes_to_u64(bytes: &[u8]) -> Option<u64> {
    let significant = bytes.iter().position(|&b| b != 0).map_or(&[][..], |i| &bytes[i..]);
    if significant.len() > 8 {
        return None;
    }
    Some(significant.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64))
}

// ============================================================================
// Hexadecimal blobs
// ============================================================================

/// Decode `0x...` at `start` into big-endian bytes.
fn hex_bytes(buf: &[u8], start: usize) -> Parsed<Vec<u8>> {
    if !has_prefix(buf, start, b'x') {
        return Err(ParseError::expected(Expected::HexLiteral, start));
    }
    let mut pos = start + 2;
    let mut nibbles: Vec<u8> = Vec::new();
    while let Some(&b) = buf.get(pos) {
        if let Some(digit) = (b as char).to_digit(16) {
            nibbles.push(digit as u8);
        } else if !(b == b'_'
            && !nibbles.is_empty()
            && buf.get(pos + 1).is_some_and(|n| n.is_ascii_hexdigit()))
        {
            break;
        }
        pos += 1;
    }
    if nibbles.is_empty() || !at_token_end(buf, pos) {
        return Err(ParseError::expected(Expected::HexLiteral, start));
    }

    // An odd digit count gets a leading zero nibble: 0xABC -> [0x0A, 0xBC].
    if nibbles.len() % 2 == 1 {
        nibbles.insert(0, 0);
    }
    let bytes = nibbles.chunks_exact(2).map(|pair| (pair[0] << 4) | pair[1]).collect();
    Ok((bytes, pos))
}

/// Parse a hexadecimal blob into raw bytes.
///
/// Bytes are big-endian with the first nibble most significant. An odd
/// number of digits is padded with a leading zero nibble.
pub fn parse_hexa_literal(buf: &[u8], pos: usize) -> Parsed<Value> {
    let start = next_token(buf, pos);
    let (bytes, end) = hex_bytes(buf, start)?;
    Ok((Value::Binary(bytes), end))
}

// ============================================================================
// Floating point
// ============================================================================

/// Parse a floating-point literal of type `Float` or `Double`.
///
/// Accepts `[sign] digits [. digits] [(e|E) [sign] digits]` with at least
/// one mantissa digit, or a `0x`/`0b`/`0o` bit pattern of the type's width.
pub fn parse_floating_literal(buf: &[u8], pos: usize, ty: ValueType) -> Parsed<Value> {
    let start = next_token(buf, pos);
    if !ty.is_float() {
        return Err(ParseError::expected(Expected::Float, start));
    }

    let mut p = start;
    let negative = match buf.get(p) {
        Some(b'-') => {
            p += 1;
            true
        }
        Some(b'+') => {
            p += 1;
            false
        }
        _ => false,
    };

    if has_prefix(buf, p, b'x') || has_prefix(buf, p, b'b') || has_prefix(buf, p, b'o') {
        return float_from_bits(buf, start, p, negative, ty);
    }

    let (_, mut end, int_digits) = scan_digits(buf, p, 10);
    let mut frac_digits = 0;
    if buf.get(end) == Some(&b'.') {
        let (_, frac_end, count) = scan_digits(buf, end + 1, 10);
        frac_digits = count;
        end = frac_end;
    }
    if int_digits + frac_digits == 0 {
        return Err(ParseError::expected(Expected::Float, start));
    }
    if matches!(buf.get(end), Some(b'e') | Some(b'E')) {
        let mut e = end + 1;
        if matches!(buf.get(e), Some(b'-') | Some(b'+')) {
            e += 1;
        }
        let (_, exp_end, exp_digits) = scan_digits(buf, e, 10);
        if exp_digits == 0 {
            return Err(ParseError::expected(Expected::Float, start));
        }
        end = exp_end;
    }
    if !at_token_end(buf, end) {
        return Err(ParseError::expected(Expected::Float, start));
    }

    let text: String = buf[start..end]
        .iter()
        .filter(|&&b| b != b'_')
        .map(|&b| b as char)
        .collect();
    let out_of_range = || {
        ParseError::new(
            ParseErrorKind::OutOfRange { literal: literal_text(buf, start, end), ty },
            start,
        )
    };

    let value = if ty == ValueType::Float {
        let v: f32 = text.parse().map_err(|_| ParseError::expected(Expected::Float, start))?;
        if v.is_infinite() {
            return Err(out_of_range());
        }
        Value::Float(v)
    } else {
        let v: f64 = text.parse().map_err(|_| ParseError::expected(Expected::Float, start))?;
        if v.is_infinite() {
            return Err(out_of_range());
        }
        Value::Double(v)
    };
    Ok((value, end))
}

/// A float written as the bit pattern of its IEEE representation.
fn float_from_bits(
    buf: &[u8],
    start: usize,
    digits_start: usize,
    negative: bool,
    ty: ValueType,
) -> Parsed<Value> {
    let carrier = if ty == ValueType::Float { ValueType::UInt32 } else { ValueType::UInt64 };
    let (bits, end) =
        parse_integer_literal(buf, digits_start, carrier).map_err(|err| match err.kind {
            ParseErrorKind::OutOfRange { literal, .. } => {
                let sign = if negative { "-" } else { "" };
                ParseError::new(
                    ParseErrorKind::OutOfRange { literal: format!("{}{}", sign, literal), ty },
                    start,
                )
            }
            _ => ParseError::expected(Expected::Float, start),
        })?;
    let value = match bits {
        Value::UInt32(b) => {
            let v = f32::from_bits(b);
            Value::Float(if negative { -v } else { v })
        }
        Value::UInt64(b) => {
            let v = f64::from_bits(b);
            Value::Double(if negative { -v } else { v })
        }
        _ => return Err(ParseError::expected(Expected::Float, start)),
    };
    Ok((value, end))
}

// ============================================================================
// Strings
// ============================================================================

/// Parse a double-quoted string.
///
/// Backslash escapes are passed through verbatim: `"a\"b"` yields the five
/// characters `a\"b`. The content must be valid UTF-8.
pub fn parse_string_literal(buf: &[u8], pos: usize) -> Parsed<Value> {
    let start = next_token(buf, pos);
    if buf.get(start) != Some(&b'"') {
        return Err(ParseError::expected(Expected::String, start));
    }
    let end = string_end(buf, start)
        .ok_or_else(|| ParseError::new(ParseErrorKind::UnterminatedString, start))?;
    let content = std::str::from_utf8(&buf[start + 1..end - 1])
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidUtf8, start))?;
    Ok((Value::String(content.to_owned()), end))
}

// ============================================================================
// Data types
// ============================================================================

/// A primitive data type keyword with its optional `[n]` array size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveType {
    pub ty: ValueType,
    pub array_size: Option<usize>,
}

/// Parse a primitive data type keyword, optionally followed by `[n]`.
pub fn parse_primitive_data_type(buf: &[u8], pos: usize) -> Parsed<PrimitiveType> {
    let start = next_token(buf, pos);
    let (id, end) = parse_identifier(buf, start)
        .map_err(|_| ParseError::expected(Expected::DataType, start))?;
    let ty = ValueType::from_keyword(id.as_str())
        .ok_or_else(|| ParseError::new(ParseErrorKind::UnknownDataType(id.to_string()), start))?;

    let bracket = next_token(buf, end);
    if buf.get(bracket) != Some(&b'[') {
        return Ok((PrimitiveType { ty, array_size: None }, end));
    }

    let digits = next_token(buf, bracket + 1);
    let (size, digits_end, count) = scan_digits(buf, digits, 10);
    if count == 0 {
        return Err(ParseError::expected(Expected::ArraySize, digits));
    }
    let size = size
        .and_then(|s| usize::try_from(s).ok())
        .filter(|&s| s > 0)
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidArraySize, digits))?;
    let close = next_token(buf, digits_end);
    if buf.get(close) != Some(&b']') {
        return Err(ParseError::new(ParseErrorKind::ExpectedToken(']'), close));
    }
    Ok((PrimitiveType { ty, array_size: Some(size) }, close + 1))
}

/// A bare data type keyword as a value of a `type` data list.
fn parse_type_literal(buf: &[u8], pos: usize) -> Parsed<Value> {
    let start = next_token(buf, pos);
    let (id, end) = parse_identifier(buf, start)
        .map_err(|_| ParseError::expected(Expected::DataType, start))?;
    let ty = ValueType::from_keyword(id.as_str())
        .ok_or_else(|| ParseError::new(ParseErrorKind::UnknownDataType(id.to_string()), start))?;
    Ok((Value::Type(ty), end))
}

// ============================================================================
// Properties
// ============================================================================

/// Does the numeric token at `pos` have a fraction or exponent?
fn looks_like_float(buf: &[u8], pos: usize) -> bool {
    let mut p = pos;
    if matches!(buf.get(p), Some(b'-') | Some(b'+')) {
        p += 1;
    }
    if has_prefix(buf, p, b'x') || has_prefix(buf, p, b'b') || has_prefix(buf, p, b'o') {
        return false;
    }
    buf[p..]
        .iter()
        .take_while(|&&b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.')
        .any(|&b| matches!(b, b'.' | b'e' | b'E'))
}

/// Parse `identifier = value`.
///
/// The value type follows from the token shape: a quoted token is a
/// string, `true`/`false` a bool, a number with a fraction or exponent a
/// double, any other number an `int32`, and `$`/`%`/identifier tokens a
/// reference.
pub fn parse_property(buf: &[u8], pos: usize) -> Parsed<Property> {
    let (key, end) = parse_identifier(buf, pos)?;
    let eq = next_token(buf, end);
    if buf.get(eq) != Some(&b'=') {
        return Err(ParseError::new(ParseErrorKind::ExpectedToken('='), eq));
    }
    let p = next_token(buf, eq + 1);

    let (value, end) = match buf.get(p) {
        Some(b'"') => {
            let (v, end) = parse_string_literal(buf, p)?;
            (PropertyValue::Literal(v), end)
        }
        Some(b'$') | Some(b'%') => {
            let (r, end) = parse_reference(buf, p)?;
            (PropertyValue::Reference(r), end)
        }
        Some(&b) if b.is_ascii_digit() || matches!(b, b'-' | b'+' | b'.') => {
            let (v, end) = if looks_like_float(buf, p) {
                parse_floating_literal(buf, p, ValueType::Double)?
            } else {
                parse_integer_literal(buf, p, ValueType::Int32)?
            };
            (PropertyValue::Literal(v), end)
        }
        Some(_) if ident_char_at(buf, p, true).is_some() => match parse_boolean_literal(buf, p) {
            Ok((v, end)) => (PropertyValue::Literal(v), end),
            Err(_) => {
                let (r, end) = parse_reference(buf, p)?;
                (PropertyValue::Reference(r), end)
            }
        },
        _ => return Err(ParseError::expected(Expected::PropertyValue, p)),
    };
    Ok((Property::new(key, value), end))
}

// ============================================================================
// Data lists
// ============================================================================

/// Parse one literal of the declared type `ty`.
pub fn parse_literal(buf: &[u8], pos: usize, ty: ValueType) -> Parsed<Value> {
    match ty {
        ValueType::Bool => parse_boolean_literal(buf, pos),
        ValueType::Float | ValueType::Double => parse_floating_literal(buf, pos, ty),
        ValueType::String => parse_string_literal(buf, pos),
        ValueType::Ref => {
            let (r, end) = parse_reference(buf, pos)?;
            Ok((Value::Ref(r), end))
        }
        ValueType::Type => parse_type_literal(buf, pos),
        ValueType::Binary => parse_hexa_literal(buf, pos),
        _ => parse_integer_literal(buf, pos, ty),
    }
}

/// Parse `{ v, v, ... }` where every literal has type `ty`.
pub fn parse_data_list(buf: &[u8], pos: usize, ty: ValueType) -> Parsed<Vec<Value>> {
    let open = next_token(buf, pos);
    if buf.get(open) != Some(&b'{') {
        return Err(ParseError::new(ParseErrorKind::ExpectedToken('{'), open));
    }
    let mut values = Vec::new();
    let mut p = open + 1;
    loop {
        p = next_token(buf, p);
        match buf.get(p) {
            Some(b'}') => return Ok((values, p + 1)),
            None => return Err(ParseError::new(ParseErrorKind::ExpectedToken('}'), p)),
            Some(_) => {
                let (value, end) = parse_literal(buf, p, ty)?;
                values.push(value);
                p = end;
            }
        }
    }
}

/// Parse `{ {..}, {..}, ... }`: a list of data lists of type `ty`.
pub fn parse_data_array_list(buf: &[u8], pos: usize, ty: ValueType) -> Parsed<Vec<Vec<Value>>> {
    let open = next_token(buf, pos);
    if buf.get(open) != Some(&b'{') {
        return Err(ParseError::new(ParseErrorKind::ExpectedToken('{'), open));
    }
    let mut lists = Vec::new();
    let mut p = open + 1;
    loop {
        p = next_token(buf, p);
        match buf.get(p) {
            Some(b'}') => return Ok((lists, p + 1)),
            Some(b'{') => {
                let (list, end) = parse_data_list(buf, p, ty)?;
                lists.push(list);
                p = end;
            }
            None => return Err(ParseError::new(ParseErrorKind::ExpectedToken('}'), p)),
            Some(_) => return Err(ParseError::new(ParseErrorKind::ExpectedToken('{'), p)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
