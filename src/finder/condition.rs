//! Search conditions
//!
//! This module provides composable boolean conditions for matching files
//! based on extension, size, name, path, location and timestamps.
//!
//! Conditions are combined with [`Condition::and`] and [`Condition::or`] into
//! an immutable tree. Evaluation short-circuits: `and` stops on the first
//! false operand, `or` stops on the first true operand. Combination is a
//! plain left-to-right chain, there is no AND-before-OR precedence. To get
//! `a AND (b OR c)` write `a.and(b.or(c))`; `a.and(b).or(c)` groups as
//! `(a AND b) OR c`.

use std::collections::HashSet;
use std::fmt;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use log::debug;
use regex::Regex;

use crate::errors::{FindError, FindResult};

/// Operators for combining conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
}

/// Extensions matched by [`Condition::is_image`]
const IMAGE_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".svg", ".webp", ".tiff", ".ico",
];

/// Extensions matched by [`Condition::is_video`]
const VIDEO_EXTENSIONS: &[&str] = &[
    ".mp4", ".avi", ".mov", ".mkv", ".flv", ".wmv", ".webm", ".m4v", ".mpg", ".mpeg",
];

/// Extensions matched by [`Condition::is_audio`]
const AUDIO_EXTENSIONS: &[&str] = &[
    ".mp3", ".wav", ".flac", ".aac", ".ogg", ".wma", ".m4a", ".opus",
];

/// Extensions matched by [`Condition::is_document`]
const DOCUMENT_EXTENSIONS: &[&str] = &[
    ".pdf", ".doc", ".docx", ".txt", ".odt", ".rtf", ".md", ".markdown",
];

/// Extensions matched by [`Condition::is_archive`]
const ARCHIVE_EXTENSIONS: &[&str] = &[
    ".zip", ".tar", ".gz", ".bz2", ".7z", ".rar", ".xz", ".tgz",
];

/// A search condition that can be combined with AND/OR logic.
///
/// # Example
///
/// ```
/// use file_finder::Condition;
///
/// let condition = Condition::extension([".png"])
///     .and(Condition::size_greater_than(1000));
/// ```
#[derive(Clone)]
pub struct Condition {
    kind: ConditionKind,
    description: String,
}

#[derive(Clone)]
enum ConditionKind {
    Leaf(Predicate),
    Combine {
        op: Operator,
        left: Box<Condition>,
        right: Box<Condition>,
    },
}

/// One condition kind with its captured parameters.
#[derive(Clone)]
enum Predicate {
    Extension(HashSet<String>),
    SizeGreaterThan(u64),
    SizeLessThan(u64),
    SizeBetween { min: u64, max: u64 },
    DirMembership {
        paths: Vec<PathBuf>,
        names: Vec<String>,
        negate: bool,
    },
    PathMatches(Regex),
    NameMatches(Regex),
    NameContains { needle: String, case_sensitive: bool },
    NameEquals { name: String, case_sensitive: bool },
    ModifiedSince(SystemTime),
    CreatedSince(SystemTime),
    Custom(Arc<dyn Fn(&Path, Option<&Metadata>) -> bool + Send + Sync>),
}

impl Condition {
    fn leaf(predicate: Predicate, description: String) -> Self {
        debug!("Created condition: {}", description);
        Self {
            kind: ConditionKind::Leaf(predicate),
            description,
        }
    }

    /// Combine this condition with another using AND logic.
    ///
    /// Returns a new condition; both operands are consumed.
    pub fn and(self, other: Condition) -> Condition {
        let description = format!("({} AND {})", self.description, other.description);
        debug!("Combined conditions with AND: {}", description);
        Condition {
            kind: ConditionKind::Combine {
                op: Operator::And,
                left: Box::new(self),
                right: Box::new(other),
            },
            description,
        }
    }

    /// Combine this condition with another using OR logic.
    pub fn or(self, other: Condition) -> Condition {
        let description = format!("({} OR {})", self.description, other.description);
        debug!("Combined conditions with OR: {}", description);
        Condition {
            kind: ConditionKind::Combine {
                op: Operator::Or,
                left: Box::new(self),
                right: Box::new(other),
            },
            description,
        }
    }

    /// Evaluate this condition against a path.
    ///
    /// `hint` is an optional metadata handle from the current traversal step;
    /// when it is absent, predicates that need file metadata stat the path
    /// themselves. A failed stat (missing file, permission denied) makes the
    /// predicate false rather than an error, so a scan degrades gracefully.
    pub fn evaluate(&self, path: &Path, hint: Option<&Metadata>) -> bool {
        match &self.kind {
            ConditionKind::Leaf(predicate) => predicate.matches(path, hint),
            ConditionKind::Combine { op, left, right } => match op {
                Operator::And => left.evaluate(path, hint) && right.evaluate(path, hint),
                Operator::Or => left.evaluate(path, hint) || right.evaluate(path, hint),
            },
        }
    }

    /// Human-readable description of the condition (diagnostic only).
    pub fn description(&self) -> &str {
        &self.description
    }

    // ===== Extension conditions =====

    /// Match files with specific extensions.
    ///
    /// Extensions are normalized to lowercase with a leading dot, so
    /// `"PNG"` and `".png"` are equivalent. Files without an extension
    /// never match.
    ///
    /// # Example
    ///
    /// ```
    /// use file_finder::Condition;
    ///
    /// let condition = Condition::extension([".png", "jpg", ".GIF"]);
    /// ```
    pub fn extension<I, S>(extensions: I) -> Condition
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized = HashSet::new();
        for ext in extensions {
            let ext = ext.as_ref().to_lowercase();
            if ext.starts_with('.') {
                normalized.insert(ext);
            } else {
                normalized.insert(format!(".{}", ext));
            }
        }

        let mut listed: Vec<&str> = normalized.iter().map(String::as_str).collect();
        listed.sort_unstable();
        let description = format!("extension in [{}]", listed.join(", "));
        Condition::leaf(Predicate::Extension(normalized), description)
    }

    // ===== Size conditions =====

    /// Match files strictly larger than `size_bytes`.
    pub fn size_greater_than(size_bytes: u64) -> Condition {
        Condition::leaf(
            Predicate::SizeGreaterThan(size_bytes),
            format!("size > {} bytes", size_bytes),
        )
    }

    /// Match files strictly smaller than `size_bytes`.
    pub fn size_less_than(size_bytes: u64) -> Condition {
        Condition::leaf(
            Predicate::SizeLessThan(size_bytes),
            format!("size < {} bytes", size_bytes),
        )
    }

    /// Match files with size in the given range, inclusive on both ends.
    pub fn size_between(min_bytes: u64, max_bytes: u64) -> Condition {
        Condition::leaf(
            Predicate::SizeBetween {
                min: min_bytes,
                max: max_bytes,
            },
            format!("size between {} and {} bytes", min_bytes, max_bytes),
        )
    }

    // ===== Location conditions =====

    /// Match files within the specified directories.
    ///
    /// Absolute arguments are resolved and matched as "the candidate lives
    /// under (or at) this path"; plain names are matched against the name of
    /// every ancestor directory. Any single hit, by either strategy, makes
    /// the candidate match.
    pub fn in_directory<I, S>(directories: I) -> Condition
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (paths, names, description) = Self::split_directory_args(directories);
        Condition::leaf(
            Predicate::DirMembership {
                paths,
                names,
                negate: false,
            },
            format!("in directory {}", description),
        )
    }

    /// Match files NOT in the specified directories.
    ///
    /// Logical negation of [`Condition::in_directory`] with the same
    /// arguments.
    pub fn not_in_directory<I, S>(directories: I) -> Condition
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (paths, names, description) = Self::split_directory_args(directories);
        Condition::leaf(
            Predicate::DirMembership {
                paths,
                names,
                negate: true,
            },
            format!("not in directory {}", description),
        )
    }

    fn split_directory_args<I, S>(directories: I) -> (Vec<PathBuf>, Vec<String>, String)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut paths = Vec::new();
        let mut names = Vec::new();
        let mut listed = Vec::new();

        for dir in directories {
            let dir = dir.as_ref();
            listed.push(dir.to_string());
            let path = Path::new(dir);
            if path.is_absolute() {
                paths.push(std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()));
            } else {
                names.push(dir.to_string());
            }
        }

        (paths, names, format!("[{}]", listed.join(", ")))
    }

    /// Match files whose full path matches a regex pattern (search, not
    /// full match). An invalid pattern fails here, at construction time.
    pub fn path_matches(pattern: &str) -> FindResult<Condition> {
        let compiled = Regex::new(pattern).map_err(|e| FindError::PatternError {
            message: format!("Invalid pattern '{}': {}", pattern, e),
        })?;
        Ok(Condition::leaf(
            Predicate::PathMatches(compiled),
            format!("path matches '{}'", pattern),
        ))
    }

    // ===== Name conditions =====

    /// Match files whose name matches a regex pattern (search, not full
    /// match). An invalid pattern fails here, at construction time.
    pub fn name_matches(pattern: &str) -> FindResult<Condition> {
        let compiled = Regex::new(pattern).map_err(|e| FindError::PatternError {
            message: format!("Invalid pattern '{}': {}", pattern, e),
        })?;
        Ok(Condition::leaf(
            Predicate::NameMatches(compiled),
            format!("name matches '{}'", pattern),
        ))
    }

    /// Match files whose name contains a substring.
    ///
    /// With `case_sensitive = false` both sides are lowercased before
    /// comparison.
    pub fn name_contains(substring: &str, case_sensitive: bool) -> Condition {
        let needle = if case_sensitive {
            substring.to_string()
        } else {
            substring.to_lowercase()
        };
        let description = format!("name contains '{}'", needle);
        Condition::leaf(
            Predicate::NameContains {
                needle,
                case_sensitive,
            },
            description,
        )
    }

    /// Match files with an exact name.
    pub fn name_equals(name: &str, case_sensitive: bool) -> Condition {
        let name = if case_sensitive {
            name.to_string()
        } else {
            name.to_lowercase()
        };
        let description = format!("name equals '{}'", name);
        Condition::leaf(
            Predicate::NameEquals {
                name,
                case_sensitive,
            },
            description,
        )
    }

    // ===== Time conditions =====

    /// Match files modified within the last `days` days.
    ///
    /// The cutoff is computed once, here. Reusing the condition hours later
    /// still applies the original cutoff.
    pub fn modified_within_days(days: u64) -> Condition {
        Condition::leaf(
            Predicate::ModifiedSince(days_ago(days)),
            format!("modified within {} days", days),
        )
    }

    /// Match files created within the last `days` days.
    ///
    /// On filesystems without a creation timestamp the predicate is false.
    pub fn created_within_days(days: u64) -> Condition {
        Condition::leaf(
            Predicate::CreatedSince(days_ago(days)),
            format!("created within {} days", days),
        )
    }

    // ===== File type shortcuts =====

    /// Match common image file types.
    pub fn is_image() -> Condition {
        Condition::extension(IMAGE_EXTENSIONS)
    }

    /// Match common video file types.
    pub fn is_video() -> Condition {
        Condition::extension(VIDEO_EXTENSIONS)
    }

    /// Match common audio file types.
    pub fn is_audio() -> Condition {
        Condition::extension(AUDIO_EXTENSIONS)
    }

    /// Match common document file types.
    pub fn is_document() -> Condition {
        Condition::extension(DOCUMENT_EXTENSIONS)
    }

    /// Match common archive file types.
    pub fn is_archive() -> Condition {
        Condition::extension(ARCHIVE_EXTENSIONS)
    }

    // ===== Escape hatch =====

    /// Build a condition from a raw predicate function.
    pub fn custom<F>(description: &str, predicate: F) -> Condition
    where
        F: Fn(&Path, Option<&Metadata>) -> bool + Send + Sync + 'static,
    {
        Condition::leaf(
            Predicate::Custom(Arc::new(predicate)),
            description.to_string(),
        )
    }

    /// A condition that matches every file.
    pub fn any_file() -> Condition {
        Condition::custom("any file", |_, _| true)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Condition({})", self.description)
    }
}

impl Predicate {
    fn matches(&self, path: &Path, hint: Option<&Metadata>) -> bool {
        match self {
            Predicate::Extension(extensions) => match path.extension() {
                Some(ext) => {
                    let ext = format!(".{}", ext.to_string_lossy().to_lowercase());
                    extensions.contains(&ext)
                }
                None => false,
            },
            Predicate::SizeGreaterThan(size) => {
                file_size(path, hint).map_or(false, |s| s > *size)
            }
            Predicate::SizeLessThan(size) => {
                file_size(path, hint).map_or(false, |s| s < *size)
            }
            Predicate::SizeBetween { min, max } => {
                file_size(path, hint).map_or(false, |s| *min <= s && s <= *max)
            }
            Predicate::DirMembership {
                paths,
                names,
                negate,
            } => {
                let resolved =
                    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

                let in_path = paths.iter().any(|dir| resolved.starts_with(dir));
                let in_name = resolved
                    .ancestors()
                    .skip(1)
                    .filter_map(Path::file_name)
                    .filter_map(|name| name.to_str())
                    .any(|name| names.iter().any(|wanted| wanted == name));

                (in_path || in_name) != *negate
            }
            Predicate::PathMatches(pattern) => pattern.is_match(&path.to_string_lossy()),
            Predicate::NameMatches(pattern) => file_name(path)
                .map_or(false, |name| pattern.is_match(&name)),
            Predicate::NameContains {
                needle,
                case_sensitive,
            } => file_name(path).map_or(false, |name| {
                if *case_sensitive {
                    name.contains(needle)
                } else {
                    name.to_lowercase().contains(needle)
                }
            }),
            Predicate::NameEquals {
                name: wanted,
                case_sensitive,
            } => file_name(path).map_or(false, |name| {
                if *case_sensitive {
                    name == *wanted
                } else {
                    name.to_lowercase() == *wanted
                }
            }),
            Predicate::ModifiedSince(cutoff) => stat(path, hint)
                .and_then(|meta| meta.modified().ok())
                .map_or(false, |mtime| mtime >= *cutoff),
            Predicate::CreatedSince(cutoff) => stat(path, hint)
                .and_then(|meta| meta.created().ok())
                .map_or(false, |ctime| ctime >= *cutoff),
            Predicate::Custom(predicate) => (**predicate)(path, hint),
        }
    }
}

/// Metadata from the traversal hint if present, from a fresh stat otherwise.
fn stat(path: &Path, hint: Option<&Metadata>) -> Option<Metadata> {
    match hint {
        Some(meta) => Some(meta.clone()),
        None => path.metadata().ok(),
    }
}

fn file_size(path: &Path, hint: Option<&Metadata>) -> Option<u64> {
    stat(path, hint).map(|meta| meta.len())
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

fn days_ago(days: u64) -> SystemTime {
    let span = Duration::from_secs(days.saturating_mul(24 * 60 * 60));
    SystemTime::now()
        .checked_sub(span)
        .unwrap_or(SystemTime::UNIX_EPOCH)
}
