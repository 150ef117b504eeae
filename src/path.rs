use serde::{Serialize, Serializer};
use std::{error, fmt};
use std::str::FromStr;

/// A field inside a record, one segment per level of nesting.
///
/// Written as `personalInfo.firstName`. There is no escaping, so a key that
/// itself contains a dot can't be named by a parsed path. Paths built while
/// walking a record keep such keys as a single segment.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath {
    segments: Vec<String>
}

/// Where a path sits relative to another one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Relation {
    Equal,
    /// Strictly inside the other path.
    Below,
    /// Strictly contains the other path.
    Above,
    Apart
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathError {
    Empty,
    EmptySegment(usize)
}

impl FieldPath {
    pub fn parse(s: &str) -> Result<FieldPath, PathError> {
        if s.is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = Vec::new();
        for (i, segment) in s.split('.').enumerate() {
            if segment.is_empty() {
                return Err(PathError::EmptySegment(i));
            }
            segments.push(segment.to_owned());
        }

        Ok(FieldPath { segments: segments })
    }

    /// A single-segment path. The segment is taken as is, dots included.
    pub fn root<S: Into<String>>(segment: S) -> FieldPath {
        FieldPath { segments: vec![segment.into()] }
    }

    pub fn child<S: Into<String>>(&self, segment: S) -> FieldPath {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        FieldPath { segments: segments }
    }

    /// The same path, nested one level deeper under `segment`.
    pub fn under(&self, segment: &str) -> FieldPath {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.push(segment.to_owned());
        segments.extend(self.segments.iter().cloned());
        FieldPath { segments: segments }
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Compares against a dotted rule path, segment by segment.
    pub fn relation(&self, other: &str) -> Relation {
        let mut mine = self.segments();
        let mut theirs = other.split('.');

        loop {
            match (mine.next(), theirs.next()) {
                (Some(a), Some(b)) if a == b => continue,
                (Some(_), Some(_)) => return Relation::Apart,
                (Some(_), None) => return Relation::Below,
                (None, Some(_)) => return Relation::Above,
                (None, None) => return Relation::Equal
            }
        }
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<FieldPath, PathError> {
        FieldPath::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PathError::Empty => write!(f, "empty field path"),
            PathError::EmptySegment(i) => write!(f, "segment {} of field path is empty", i)
        }
    }
}

impl error::Error for PathError {}
