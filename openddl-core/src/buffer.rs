//! Input buffers.

/// Bytes handed to the parser, either owned or borrowed.
///
/// Normalization rewrites the buffer in place, so a borrowed buffer must be
/// mutable. The parser never frees a borrowed buffer.
#[derive(Debug)]
pub enum Buffer<'a> {
    Owned(Vec<u8>),
    Borrowed(&'a mut [u8]),
}

impl Buffer<'_> {
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Owned(v) => v,
            Buffer::Borrowed(s) => s,
        }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Buffer::Owned(v) => v,
            Buffer::Borrowed(s) => s,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, Buffer::Owned(_))
    }
}

impl From<Vec<u8>> for Buffer<'_> {
    fn from(v: Vec<u8>) -> Self {
        Buffer::Owned(v)
    }
}

impl From<String> for Buffer<'_> {
    fn from(s: String) -> Self {
        Buffer::Owned(s.into_bytes())
    }
}

impl From<&str> for Buffer<'_> {
    fn from(s: &str) -> Self {
        Buffer::Owned(s.as_bytes().to_vec())
    }
}

impl<'a> From<&'a mut [u8]> for Buffer<'a> {
    fn from(s: &'a mut [u8]) -> Self {
        Buffer::Borrowed(s)
    }
}

impl<'a> From<&'a mut Vec<u8>> for Buffer<'a> {
    fn from(v: &'a mut Vec<u8>) -> Self {
        Buffer::Borrowed(v.as_mut_slice())
    }
}
