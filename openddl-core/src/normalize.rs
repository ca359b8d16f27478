//! In-place buffer normalization.
//!
//! Runs once before structure parsing. Comments disappear, every run of
//! whitespace and comments collapses to one byte (`\n` if the run crossed a
//! line break, a space otherwise), and leading/trailing whitespace is
//! dropped. String literals are copied through untouched, so a `//` inside
//! quotes survives.
//!
//! ```
//! use openddl_core::normalize_buffer;
//!
//! let mut buf = b"Metric  // unit\n{ float /* scale */ {1.0} }  ".to_vec();
//! let len = normalize_buffer(&mut buf);
//! assert_eq!(&buf[..len], b"Metric\n{ float {1.0} }");
//! ```

use memchr::{memchr2, memmem};

/// Normalize `buf` in place and return its new logical length.
///
/// The bytes past the returned length are left in an unspecified state.
pub fn normalize_buffer(buf: &mut [u8]) -> usize {
    let len = buf.len();
    let mut read = 0;
    let mut write = 0;
    // Separator owed for the whitespace/comment run just skipped.
    let mut pending: Option<u8> = None;

    while read < len {
        match buf[read] {
            b'"' => {
                flush(buf, &mut write, &mut pending);
                let end = string_end(buf, read).unwrap_or(len);
                buf.copy_within(read..end, write);
                write += end - read;
                read = end;
            }
            b'/' if buf.get(read + 1) == Some(&b'/') => {
                // The line break itself is handled as whitespace on the next turn.
                read = memchr2(b'\n', b'\r', &buf[read..]).map_or(len, |i| read + i);
                pending.get_or_insert(b' ');
            }
            b'/' if buf.get(read + 1) == Some(&b'*') => {
                read = memmem::find(&buf[read + 2..], b"*/").map_or(len, |i| read + 2 + i + 2);
                pending.get_or_insert(b' ');
            }
            b'\n' | b'\r' => {
                pending = Some(b'\n');
                read += 1;
            }
            b' ' | b'\t' | 0x0b | 0x0c => {
                pending.get_or_insert(b' ');
                read += 1;
            }
            b => {
                flush(buf, &mut write, &mut pending);
                buf[write] = b;
                write += 1;
                read += 1;
            }
        }
    }

    write
}

/// Emit the owed separator, unless we are still at the start of the buffer.
#[inline]
fn flush(buf: &mut [u8], write: &mut usize, pending: &mut Option<u8>) {
    if let Some(sep) = pending.take() {
        if *write > 0 {
            buf[*write] = sep;
            *write += 1;
        }
    }
}

/// Position just past the string literal opening at `start`, or `None` if
/// the closing quote is missing.
pub(crate) fn string_end(buf: &[u8], start: usize) -> Option<usize> {
    let mut pos = start + 1;
    while pos < buf.len() {
        let i = memchr2(b'"', b'\\', &buf[pos..])?;
        if buf[pos + i] == b'"' {
            return Some(pos + i + 1);
        }
        // Skip the backslash and whatever it escapes.
        pos += i + 2;
    }
    None
}
