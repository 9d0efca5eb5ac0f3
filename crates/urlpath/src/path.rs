use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Div;

use crate::err;
use crate::error::UrlPathResult;
use crate::parse;

/* 📖 # What is a UrlPath?

A UrlPath represents a local or remote resource as a filesystem path,
modeled on pathlib. One immutable value type covers both `file` and
`http(s)` resources; the scheme decides which backend handles I/O while
all structural operations (join, parent, name, match, relative_to, ...)
are pure and identical across schemes.

An empty scheme means "implicit local file". Equality treats it as equal
to an explicit `file` scheme (scheme transparency).
*/

/// A local or remote resource path.
///
/// Immutable value type: every transformation returns a new `UrlPath`.
/// Instances are cheap to clone and safe to share across threads.
#[derive(Clone)]
pub struct UrlPath {
    scheme: String,
    netloc: String,
    root: String,
    segments: Vec<String>,
}

/* 📖 # Why a PathPart trait instead of accepting only &str?

The reference API accepts "a string or a same-family path object" in every
constructor position and raises TypeError otherwise. Expressing that bound
as a trait moves the check to compile time: strings contribute themselves,
a UrlPath contributes its component parts, and any other type simply does
not implement the trait.
*/

/// Anything that can contribute raw parts to a path under construction.
pub trait PathPart {
    fn append_to(&self, parts: &mut Vec<String>);
}

impl PathPart for &str {
    fn append_to(&self, parts: &mut Vec<String>) {
        parts.push((*self).to_string());
    }
}

impl PathPart for String {
    fn append_to(&self, parts: &mut Vec<String>) {
        parts.push(self.clone());
    }
}

impl PathPart for &String {
    fn append_to(&self, parts: &mut Vec<String>) {
        parts.push((*self).clone());
    }
}

impl PathPart for UrlPath {
    fn append_to(&self, parts: &mut Vec<String>) {
        parts.extend(self.parts());
    }
}

impl PathPart for &UrlPath {
    fn append_to(&self, parts: &mut Vec<String>) {
        parts.extend(self.parts());
    }
}

impl UrlPath {
    /// Creates a path from a single part.
    pub fn new(part: impl PathPart) -> Self {
        let mut raw = Vec::new();
        part.append_to(&mut raw);
        Self::from_raw(raw)
    }

    /// Creates a path by combining several parts, rightmost rooted part
    /// winning as in a filesystem join.
    pub fn from_parts<P: PathPart>(parts: impl IntoIterator<Item = P>) -> Self {
        let mut raw = Vec::new();
        for part in parts {
            part.append_to(&mut raw);
        }
        Self::from_raw(raw)
    }

    fn from_raw(raw: Vec<String>) -> Self {
        let parsed = parse::parse_parts(&raw);
        Self {
            scheme: parsed.scheme,
            netloc: parsed.netloc,
            root: parsed.root,
            segments: parsed.segments,
        }
    }

    /// The scheme of the path; empty means implicit local/file.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The network location of the path; empty for local paths.
    pub fn netloc(&self) -> &str {
        &self.netloc
    }

    /// The root of the path: the separator if absolute, else empty.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The normalized path segments, from root (or start) to leaf.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The path of the resource: root plus segments, without scheme/netloc.
    pub fn path(&self) -> String {
        format!("{}{}", self.root, self.segments.join("/"))
    }

    /// The path's components: `scheme:`, `//netloc` and root prefixes (each
    /// present only when non-empty) followed by the segments.
    pub fn parts(&self) -> Vec<String> {
        let mut rv = Vec::with_capacity(self.segments.len() + 3);
        if !self.scheme.is_empty() {
            rv.push(format!("{}:", self.scheme));
        }
        if !self.netloc.is_empty() {
            rv.push(format!("//{}", self.netloc));
        }
        if !self.root.is_empty() {
            rv.push(self.root.clone());
        }
        rv.extend(self.segments.iter().cloned());
        rv
    }

    /// Joins this path with another part.
    /// Also available as the `/` operator.
    pub fn join(&self, other: impl PathPart) -> Self {
        let mut raw = self.parts();
        other.append_to(&mut raw);
        Self::from_raw(raw)
    }

    /// Joins this path with several parts at once.
    pub fn joinpath<P: PathPart>(&self, others: impl IntoIterator<Item = P>) -> Self {
        let mut raw = self.parts();
        for other in others {
            other.append_to(&mut raw);
        }
        Self::from_raw(raw)
    }

    /// The logical parent of the path.
    /// A path with no segments is its own parent.
    pub fn parent(&self) -> Self {
        let mut raw = self.parts();
        if !self.segments.is_empty() {
            raw.pop();
        }
        Self::from_raw(raw)
    }

    /// The logical ancestors of the path, nearest first.
    ///
    /// Computed by repeated `parent()`; stops the first time a newly
    /// computed parent repeats an earlier value, so the sequence is finite
    /// even though a root is its own parent.
    pub fn parents(&self) -> Vec<UrlPath> {
        let mut rv: Vec<UrlPath> = Vec::new();
        let mut current = self.parent();
        while !rv.contains(&current) {
            let next = current.parent();
            rv.push(current);
            current = next;
        }
        rv
    }

    /// The final path component, or empty when the path has fewer than two
    /// segments.
    pub fn name(&self) -> &str {
        if self.segments.len() > 1 {
            self.segments.last().map(String::as_str).unwrap_or("")
        } else {
            ""
        }
    }

    /// The final path component without its last suffix.
    pub fn stem(&self) -> &str {
        let name = self.name();
        match name.rsplit_once('.') {
            Some((stem, _)) => stem,
            None => name,
        }
    }

    /// The last dotted extension of the final component, or empty.
    pub fn suffix(&self) -> String {
        self.suffixes().pop().unwrap_or_default()
    }

    /// Every dotted extension of the final component, in order.
    pub fn suffixes(&self) -> Vec<String> {
        self.name()
            .split('.')
            .skip(1)
            .filter(|s| !s.is_empty())
            .map(|s| format!(".{}", s))
            .collect()
    }

    /// Whether the path is absolute.
    pub fn is_absolute(&self) -> bool {
        !self.root.is_empty()
    }

    /// Renders the path as a URI, defaulting the scheme to `file`.
    /// Fails when the path is not absolute.
    pub fn as_uri(&self) -> UrlPathResult<String> {
        if !self.is_absolute() {
            return Err(err!("relative path can't be expressed as a file URI"));
        }
        let scheme = if self.scheme.is_empty() {
            "file"
        } else {
            &self.scheme
        };
        Ok(format!(
            "{}://{}{}{}",
            scheme,
            self.netloc,
            self.root,
            self.segments.join("/")
        ))
    }

    /* 📖 # Why does matches() fold the pattern but not the path?

    The reference lowercases the pattern before parsing it, then compares
    the original path segments against it case-sensitively. The asymmetry
    is preserved verbatim rather than "fixed", as is the slightly different
    scheme-defaulting used here versus relative_to() and equality.
    */

    /// Glob-style suffix match of this path against `pattern`.
    ///
    /// A rooted pattern must match the full segment count, scheme (with
    /// `file` default) and netloc; a relative pattern matches trailing
    /// segments right to left and must not be longer than the path.
    /// Fails on an empty pattern.
    pub fn matches(&self, pattern: &str) -> UrlPathResult<bool> {
        let pattern = pattern.to_lowercase();
        let parsed = parse::parse_parts(std::slice::from_ref(&pattern));
        if parsed.segments.is_empty() {
            return Err(err!("empty pattern"));
        }

        // scheme transparency: an empty scheme counts as 'file'
        if !parsed.scheme.is_empty() {
            let own = if self.scheme.is_empty() {
                "file".to_string()
            } else {
                self.scheme.to_lowercase()
            };
            if parsed.scheme != own {
                return Ok(false);
            }
        }

        if !parsed.netloc.is_empty() && parsed.netloc != self.netloc.to_lowercase() {
            return Ok(false);
        }

        if !parsed.root.is_empty() && parsed.segments.len() != self.segments.len() {
            return Ok(false);
        }
        if parsed.segments.len() > self.segments.len() {
            return Ok(false);
        }

        for (segment, pat) in self.segments.iter().rev().zip(parsed.segments.iter().rev()) {
            if !glob_segment_match(segment, pat)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Computes a version of this path relative to `other`.
    ///
    /// Both sides are expanded to their absolute-equivalent component list
    /// (scheme defaulting to `file` when rooted); fails when the target's
    /// components are not a case-folded prefix of this path's.
    pub fn relative_to(&self, other: impl PathPart) -> UrlPathResult<UrlPath> {
        let scheme = if self.scheme.is_empty() {
            "file"
        } else {
            &self.scheme
        };
        let abs_parts: Vec<String> = if !self.root.is_empty() {
            let mut rv = vec![scheme.to_string(), self.netloc.clone(), self.root.clone()];
            rv.extend(self.segments.iter().cloned());
            rv
        } else {
            self.segments.clone()
        };

        let mut raw = Vec::new();
        other.append_to(&mut raw);
        let to = parse::parse_parts(&raw);
        let to_abs_parts: Vec<String> = if !to.root.is_empty() {
            let to_scheme = if to.scheme.is_empty() {
                "file".to_string()
            } else {
                to.scheme.clone()
            };
            let mut rv = vec![to_scheme, to.netloc.clone(), to.root.clone()];
            rv.extend(to.segments.iter().cloned());
            rv
        } else {
            to.segments.clone()
        };

        let n = to_abs_parts.len();
        let mismatch = if n == 0 {
            !self.root.is_empty()
        } else {
            n > abs_parts.len()
                || !abs_parts[..n]
                    .iter()
                    .zip(&to_abs_parts)
                    .all(|(a, b)| a.to_lowercase() == b.to_lowercase())
        };
        if mismatch {
            let formatted =
                parse::format_parsed_parts(&to.scheme, &to.netloc, &to.root, &to.segments);
            return Err(err!("'{}' does not start with '{}'", self, formatted));
        }

        let mut rest: Vec<String> = Vec::with_capacity(abs_parts.len() - n + 1);
        rest.push(if n == 1 {
            self.root.clone()
        } else {
            String::new()
        });
        rest.extend(abs_parts[n..].iter().cloned());
        Ok(Self::from_raw(rest))
    }

    /// Returns a new path with the final component replaced.
    /// Fails when the path has no name (root-only or empty paths).
    pub fn with_name(&self, name: &str) -> UrlPathResult<UrlPath> {
        if self.parent() == *self {
            return Err(err!("{:?} has an empty name", self));
        }
        Ok(self.parent().join(name))
    }

    /// Returns a new path with the suffix of the final component replaced.
    pub fn with_suffix(&self, suffix: &str) -> UrlPathResult<UrlPath> {
        self.with_name(&format!("{}{}", self.stem(), suffix))
    }

    fn eq_scheme(&self) -> &str {
        if self.scheme.is_empty() {
            "file"
        } else {
            &self.scheme
        }
    }
}

/// Matches one path segment against one shell-glob pattern segment.
fn glob_segment_match(segment: &str, pattern: &str) -> UrlPathResult<bool> {
    let glob = globset::GlobBuilder::new(pattern)
        .literal_separator(false)
        .build()
        .map_err(|e| err!("invalid glob pattern '{}': {}", pattern, e))?;
    Ok(glob.compile_matcher().is_match(segment))
}

impl PartialEq for UrlPath {
    fn eq(&self, other: &Self) -> bool {
        self.eq_scheme() == other.eq_scheme()
            && self.netloc == other.netloc
            && self.root == other.root
            && self.segments == other.segments
    }
}

impl Eq for UrlPath {}

impl Hash for UrlPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.eq_scheme().hash(state);
        self.netloc.hash(state);
        self.root.hash(state);
        self.segments.hash(state);
    }
}

impl fmt::Display for UrlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&parse::format_parsed_parts(
            &self.scheme,
            &self.netloc,
            &self.root,
            &self.segments,
        ))
    }
}

impl fmt::Debug for UrlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UrlPath({:?})", self.to_string())
    }
}

impl From<&str> for UrlPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for UrlPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&UrlPath> for UrlPath {
    fn from(path: &UrlPath) -> Self {
        path.clone()
    }
}

impl<P: PathPart> FromIterator<P> for UrlPath {
    fn from_iter<T: IntoIterator<Item = P>>(iter: T) -> Self {
        Self::from_parts(iter)
    }
}

impl<P: PathPart> Div<P> for &UrlPath {
    type Output = UrlPath;

    fn div(self, rhs: P) -> UrlPath {
        self.join(rhs)
    }
}

impl<P: PathPart> Div<P> for UrlPath {
    type Output = UrlPath;

    fn div(self, rhs: P) -> UrlPath {
        self.join(rhs)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UrlPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UrlPath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(UrlPath::from(raw))
    }
}
