//! core::types
//!
//! Strong types for the ref model.
//!
//! # Types
//!
//! - [`Oid`] - Git object identifier (SHA)
//! - [`RefName`] - Validated, fully-qualified Git reference path
//! - [`RefType`] - Namespace classification of a ref
//! - [`Ref`] - A named pointer to a commit, as handed to callers
//!
//! # Validation
//!
//! These types enforce validity at construction time. Text coming back from
//! git is funneled through them, so a malformed sha or ref path is rejected
//! at the parsing boundary rather than leaking into results.
//!
//! # Examples
//!
//! ```
//! use reflens::core::types::{Oid, Ref, RefName, RefType};
//!
//! let sha = Oid::new("abc123def4567890abc123def4567890abc12345").unwrap();
//! let full = RefName::new("refs/remotes/origin/main").unwrap();
//! let r = Ref::from_full_name(&full, sha);
//!
//! assert_eq!(r.name, "origin/main");
//! assert_eq!(r.ref_type, RefType::RemoteBranch);
//!
//! assert!(Oid::new("not-a-sha").is_err());
//! assert!(RefName::new("refs/heads/bad..name").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid object id: {0}")]
    InvalidOid(String),

    #[error("invalid ref name: {0}")]
    InvalidRefName(String),
}

/// A Git object identifier (SHA-1 or SHA-256).
///
/// OIDs are normalized to lowercase for consistency.
///
/// # Example
///
/// ```
/// use reflens::core::types::Oid;
///
/// let oid = Oid::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
/// assert_eq!(oid.as_str(), "abc123def4567890abc123def4567890abc12345");
/// assert_eq!(oid.short(7), "abc123d");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Oid(String);

impl Oid {
    /// Create a new validated object id.
    ///
    /// The OID is normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidOid` if the string is not a valid hex OID.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();
        Self::validate(&oid)?;
        Ok(Self(oid))
    }

    /// Check whether a string looks like a full object id without allocating.
    ///
    /// Used to tell a detached `HEAD` file apart from a `ref:` indirection.
    pub fn is_full_hex(candidate: &str) -> bool {
        Self::validate(candidate).is_ok()
    }

    /// Get an abbreviated form of the OID.
    ///
    /// Returns the first `len` characters. If `len` exceeds the OID length,
    /// returns the full OID.
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    fn validate(oid: &str) -> Result<(), TypeError> {
        // SHA-1 is 40 hex chars, SHA-256 is 64
        if oid.len() != 40 && oid.len() != 64 {
            return Err(TypeError::InvalidOid(format!(
                "expected 40 or 64 hex characters, got {}",
                oid.len()
            )));
        }
        if !oid.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidOid(
                "object id must be hexadecimal".into(),
            ));
        }
        Ok(())
    }

    /// Get the object id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Oid {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Oid> for String {
    fn from(oid: Oid) -> Self {
        oid.0
    }
}

impl AsRef<str> for Oid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated, fully-qualified Git reference path.
///
/// Accepts anything git itself would print from `for-each-ref` or
/// `rev-parse --symbolic-full-name`, including the bare `HEAD` pseudo-ref.
///
/// # Example
///
/// ```
/// use reflens::core::types::RefName;
///
/// let refname = RefName::new("refs/heads/feature/foo").unwrap();
/// assert_eq!(refname.strip_prefix("refs/heads/"), Some("feature/foo"));
/// assert_eq!(refname.strip_prefix("refs/tags/"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RefName(String);

impl RefName {
    /// Create a new validated ref name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRefName` if the name violates Git's refname rules.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    /// Strip a prefix from the ref name and return the remainder.
    ///
    /// Returns `None` if the ref doesn't start with the given prefix.
    pub fn strip_prefix(&self, prefix: &str) -> Option<&str> {
        self.0.strip_prefix(prefix)
    }

    /// Validate a ref name against Git's refname rules.
    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidRefName("ref name cannot be empty".into()));
        }

        if name.starts_with('/') {
            return Err(TypeError::InvalidRefName(
                "ref name cannot start with '/'".into(),
            ));
        }

        if name.ends_with('/') {
            return Err(TypeError::InvalidRefName(
                "ref name cannot end with '/'".into(),
            ));
        }
        if name.ends_with(".lock") {
            return Err(TypeError::InvalidRefName(
                "ref name cannot end with '.lock'".into(),
            ));
        }

        if name.contains("..") {
            return Err(TypeError::InvalidRefName(
                "ref name cannot contain '..'".into(),
            ));
        }
        if name.contains("@{") {
            return Err(TypeError::InvalidRefName(
                "ref name cannot contain '@{'".into(),
            ));
        }
        if name.contains("//") {
            return Err(TypeError::InvalidRefName(
                "ref name cannot contain '//'".into(),
            ));
        }

        const INVALID_CHARS: [char; 8] = [' ', '~', '^', ':', '\\', '?', '*', '['];
        for c in INVALID_CHARS {
            if name.contains(c) {
                return Err(TypeError::InvalidRefName(format!(
                    "ref name cannot contain '{c}'"
                )));
            }
        }

        if name.chars().any(|c| c.is_ascii_control()) {
            return Err(TypeError::InvalidRefName(
                "ref name cannot contain control characters".into(),
            ));
        }

        for component in name.split('/') {
            if component.starts_with('.') {
                return Err(TypeError::InvalidRefName(
                    "path component cannot start with '.'".into(),
                ));
            }
            if component.ends_with(".lock") {
                return Err(TypeError::InvalidRefName(
                    "path component cannot end with '.lock'".into(),
                ));
            }
        }

        Ok(())
    }

    /// Get the ref name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RefName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RefName> for String {
    fn from(name: RefName) -> Self {
        name.0
    }
}

impl AsRef<str> for RefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Namespace classification of a ref.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefType {
    /// `refs/heads/*`
    LocalBranch,
    /// `refs/remotes/*`
    RemoteBranch,
    /// `refs/tags/*`
    Tag,
    /// Anything else, including a detached commit.
    Other,
}

impl RefType {
    pub(crate) const LOCAL_PREFIX: &'static str = "refs/heads/";
    pub(crate) const REMOTE_PREFIX: &'static str = "refs/remotes/";
    pub(crate) const TAG_PREFIX: &'static str = "refs/tags/";

    /// Classify a fully-qualified ref path, returning the type and short name.
    ///
    /// Prefixes are checked in order: heads, remotes, tags. Remote names keep
    /// their `<remote>/` prefix. Unrecognised paths are returned whole.
    ///
    /// # Example
    ///
    /// ```
    /// use reflens::core::types::RefType;
    ///
    /// assert_eq!(RefType::classify("refs/heads/main"), (RefType::LocalBranch, "main"));
    /// assert_eq!(RefType::classify("refs/remotes/up/x"), (RefType::RemoteBranch, "up/x"));
    /// assert_eq!(RefType::classify("refs/tags/v1"), (RefType::Tag, "v1"));
    /// assert_eq!(RefType::classify("refs/notes/commits"), (RefType::Other, "refs/notes/commits"));
    /// ```
    pub fn classify(full: &str) -> (RefType, &str) {
        if let Some(name) = full.strip_prefix(Self::LOCAL_PREFIX) {
            (RefType::LocalBranch, name)
        } else if let Some(name) = full.strip_prefix(Self::REMOTE_PREFIX) {
            (RefType::RemoteBranch, name)
        } else if let Some(name) = full.strip_prefix(Self::TAG_PREFIX) {
            (RefType::Tag, name)
        } else {
            (RefType::Other, full)
        }
    }

    /// Short label used in text output.
    pub fn label(&self) -> &'static str {
        match self {
            RefType::LocalBranch => "local",
            RefType::RemoteBranch => "remote",
            RefType::Tag => "tag",
            RefType::Other => "other",
        }
    }
}

impl std::fmt::Display for RefType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A named pointer to a commit.
///
/// Two refs with the same `name` but a different `ref_type` (a branch and a
/// tag both called `v1`, say) are distinct values and compare unequal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ref {
    /// Short name, e.g. `main` or `origin/main`.
    pub name: String,
    /// Namespace the ref lives in.
    #[serde(rename = "type")]
    pub ref_type: RefType,
    /// Commit the ref currently points to.
    pub sha: Oid,
}

impl Ref {
    /// Create a ref from its parts.
    pub fn new(name: impl Into<String>, ref_type: RefType, sha: Oid) -> Self {
        Self {
            name: name.into(),
            ref_type,
            sha,
        }
    }

    /// Build a ref from a fully-qualified path and the commit it resolves to.
    pub fn from_full_name(full: &RefName, sha: Oid) -> Self {
        let (ref_type, name) = RefType::classify(full.as_str());
        Self::new(name, ref_type, sha)
    }

    /// A ref standing for a detached commit, named by its own sha.
    pub fn detached(sha: Oid) -> Self {
        Self::new(sha.as_str().to_string(), RefType::Other, sha)
    }

    /// Reconstruct the fully-qualified path for this ref.
    ///
    /// `Other` refs already carry their full path (or a sha) as their name.
    pub fn full_name(&self) -> String {
        match self.ref_type {
            RefType::LocalBranch => format!("{}{}", RefType::LOCAL_PREFIX, self.name),
            RefType::RemoteBranch => format!("{}{}", RefType::REMOTE_PREFIX, self.name),
            RefType::Tag => format!("{}{}", RefType::TAG_PREFIX, self.name),
            RefType::Other => self.name.clone(),
        }
    }

    /// For remote-tracking refs, the remote portion of the name.
    pub fn remote(&self) -> Option<&str> {
        match self.ref_type {
            RefType::RemoteBranch => self.name.split_once('/').map(|(remote, _)| remote),
            _ => None,
        }
    }
}

impl std::fmt::Display for Ref {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
