//! Identifiers, qualified names, and references.

use std::fmt;

/// An identifier token: `Metric`, `position`, `_x1`.
///
/// Identifiers are owned copies of the bytes consumed from the buffer, so
/// `len()` always equals the number of bytes the tokenizer advanced over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Box<str>);

impl Identifier {
    pub fn new(text: impl Into<Box<str>>) -> Self {
        Identifier(text.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// How a name is qualified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameType {
    /// `$name`: unique across the whole file.
    Global,
    /// `%name`: unique among siblings.
    Local,
    /// A bare identifier inside a reference chain.
    Plain,
}

impl NameType {
    /// The sigil that introduces this kind of name, if any.
    pub fn sigil(self) -> Option<char> {
        match self {
            NameType::Global => Some('$'),
            NameType::Local => Some('%'),
            NameType::Plain => None,
        }
    }
}

/// A qualified name: `$camera`, `%mesh`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    pub ty: NameType,
    pub id: Identifier,
}

impl Name {
    pub fn new(ty: NameType, id: Identifier) -> Self {
        Name { ty, id }
    }

    pub fn global(id: &str) -> Self {
        Name::new(NameType::Global, Identifier::new(id))
    }

    pub fn local(id: &str) -> Self {
        Name::new(NameType::Local, Identifier::new(id))
    }

    pub fn plain(id: &str) -> Self {
        Name::new(NameType::Plain, Identifier::new(id))
    }

    #[inline]
    pub fn is_global(&self) -> bool {
        self.ty == NameType::Global
    }

    #[inline]
    pub fn is_local(&self) -> bool {
        self.ty == NameType::Local
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sigil) = self.ty.sigil() {
            write!(f, "{}", sigil)?;
        }
        write!(f, "{}", self.id)
    }
}

/// A chain of names pointing at another structure: `$node.%mesh`.
///
/// An empty chain is the `null` reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Reference {
    pub names: Vec<Name>,
}

impl Reference {
    pub fn new(names: Vec<Name>) -> Self {
        Reference { names }
    }

    pub fn null() -> Self {
        Reference::default()
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.names.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Name> {
        self.names.iter()
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.names.is_empty() {
            return f.write_str("null");
        }
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", name)?;
        }
        Ok(())
    }
}

impl<'r> IntoIterator for &'r Reference {
    type Item = &'r Name;
    type IntoIter = std::slice::Iter<'r, Name>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}
