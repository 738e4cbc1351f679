use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// Location of a value inside a document tree.
///
/// Renders as `features[3].feature_animations[1].key_values[0].data`; the
/// root renders as `$`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    pub fn root() -> Self {
        FieldPath(Vec::new())
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.0.push(Segment::Key(key.into()));
        self
    }

    pub fn index(mut self, index: usize) -> Self {
        self.0.push(Segment::Index(index));
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("$");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => f.write_str(key)?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Borrowed position used while walking the tree. Only turned into an owned
/// [`FieldPath`] when an error has to be reported.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Cursor<'a> {
    Root,
    Key(&'a Cursor<'a>, &'a str),
    Index(&'a Cursor<'a>, usize),
}

impl<'a> Cursor<'a> {
    pub(crate) fn key<'b>(&'b self, key: &'b str) -> Cursor<'b> {
        Cursor::Key(self, key)
    }

    pub(crate) fn index(&self, index: usize) -> Cursor<'_> {
        Cursor::Index(self, index)
    }

    pub(crate) fn to_path(&self) -> FieldPath {
        match self {
            Cursor::Root => FieldPath::root(),
            Cursor::Key(parent, key) => parent.to_path().key(*key),
            Cursor::Index(parent, index) => parent.to_path().index(*index),
        }
    }
}
