//! # Issue Paths
//!
//! A [`Path`] addresses a location inside a validated value: an ordered
//! sequence of object keys and array indices. Paths stay structured for
//! their whole life inside the engine and are joined with `.` only when
//! rendered for a consumer (map keys, messages, JSON output).
//!
//! ## Dotted Strings
//!
//! Lookups accept either a structured path or a dot-joined string through
//! [`PathQuery`]. A dotted string is split on `.` before comparison, so a
//! key that itself contains a literal `.` cannot be addressed by a dotted
//! query. This ambiguity is kept as-is: use a structured [`Path`] when a key
//! may contain a dot.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// Object key.
    Key(String),
    /// Array index.
    Index(usize),
}

impl PathSegment {
    /// Whether this segment renders exactly as `part`.
    fn renders_as(&self, part: &str) -> bool {
        match self {
            Self::Key(key) => key == part,
            Self::Index(index) => index.to_string() == part,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Structured address of a location inside a validated value.
///
/// Two paths are equal iff their segment sequences are equal element-wise.
/// A `Path` has no mutating API; [`Path::child`] and [`Path::index`] return
/// new paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// The empty path, addressing the validated value itself.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from an ordered sequence of segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Parse a dot-joined string.
    ///
    /// `""` parses as the root path. Parts made only of ASCII digits become
    /// [`PathSegment::Index`]; everything else becomes [`PathSegment::Key`].
    pub fn parse_dotted(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::root();
        }
        Self(
            dotted
                .split('.')
                .map(|part| {
                    if !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) {
                        part.parse::<usize>()
                            .map(PathSegment::Index)
                            .unwrap_or_else(|_| PathSegment::Key(part.to_string()))
                    } else {
                        PathSegment::Key(part.to_string())
                    }
                })
                .collect(),
        )
    }

    /// A new path with `key` appended.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.into()));
        Self(segments)
    }

    /// A new path with array index `index` appended.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    /// The segments of this path, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns true for the empty path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the dotted rendering is `""`: the root, or a single empty
    /// key. String-keyed views cannot tell these two apart.
    pub fn renders_empty(&self) -> bool {
        match self.0.as_slice() {
            [] => true,
            [PathSegment::Key(key)] => key.is_empty(),
            _ => false,
        }
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `.`-joined rendering used at presentation boundaries.
    pub fn joined(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_segments(iter)
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dotted = String::deserialize(deserializer)?;
        Ok(Self::parse_dotted(&dotted))
    }
}

/// Lookup argument accepted by the report's path queries.
///
/// A structured query matches by segment equality. A dotted query matches
/// a path with the same number of parts where every part equals the
/// segment's rendering.
#[derive(Debug, Clone, Copy)]
pub enum PathQuery<'a> {
    /// A pre-built structured path.
    Structured(&'a Path),
    /// A dot-joined string.
    Dotted(&'a str),
}

impl PathQuery<'_> {
    /// Whether `path` is addressed by this query.
    pub fn matches(&self, path: &Path) -> bool {
        match *self {
            Self::Structured(query) => query == path,
            Self::Dotted("") => path.renders_empty(),
            Self::Dotted(dotted) => {
                let parts = dotted.split('.');
                let segments = path.segments();
                parts.clone().count() == segments.len()
                    && parts
                        .zip(segments)
                        .all(|(part, segment)| segment.renders_as(part))
            }
        }
    }
}

impl<'a> From<&'a Path> for PathQuery<'a> {
    fn from(path: &'a Path) -> Self {
        Self::Structured(path)
    }
}

impl<'a> From<&'a str> for PathQuery<'a> {
    fn from(dotted: &'a str) -> Self {
        Self::Dotted(dotted)
    }
}

impl<'a> From<&'a String> for PathQuery<'a> {
    fn from(dotted: &'a String) -> Self {
        Self::Dotted(dotted.as_str())
    }
}
