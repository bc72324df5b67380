//! Symbol-presence oracle over existing destination packages.
//!
//! Before emitting a hand-editable stub, the generator asks whether the
//! target declaration already exists on disk. The oracle scans every
//! non-hidden, non-test Go file directly inside a destination directory
//! whose `package` clause matches the destination package, and indexes
//! top-level type names and pointer-receiver method names. The index is a
//! point-in-time snapshot: files the generator itself emits later in the
//! same run are not observed.
//!
//! A missing directory means "no declarations found". Source that fails
//! the structural sanity check is fatal for the run: idempotence cannot
//! be decided over an untrustworthy index.

use std::{
    collections::{HashMap, HashSet},
    fs, io,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};

static PACKAGE_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^package\s+([A-Za-z_]\w*)").expect("package pattern"));

/// Top-level single type declaration: `type Name ...`.
static TYPE_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^type\s+([A-Za-z_]\w*)\b").expect("type pattern"));

/// Start of a grouped declaration block: `type (`.
static TYPE_GROUP_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^type\s*\($").expect("type group pattern"));

/// Name inside a grouped type block.
static TYPE_GROUP_MEMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+([A-Za-z_]\w*)\b").expect("group member pattern"));

/// Top-level method with a single-value, pointer-typed receiver:
/// `func (x *Recv) Name(`. Value receivers are deliberately not matched.
static METHOD_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^func\s*\(\s*(?:[A-Za-z_]\w*\s+)?\*\s*([A-Za-z_]\w*)\s*\)\s*([A-Za-z_]\w*)\s*\(")
        .expect("method pattern")
});

/// Declarations found in one destination package.
#[derive(Debug, Clone, Default)]
pub struct DeclarationIndex {
    types: HashSet<String>,
    methods: HashSet<(String, String)>,
}

impl DeclarationIndex {
    /// Whether a top-level type with this exact name was found.
    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains(name)
    }

    /// Whether a pointer-receiver method `name` on `receiver` was found.
    pub fn has_method(&self, receiver: &str, name: &str) -> bool {
        self.methods
            .contains(&(receiver.to_string(), name.to_string()))
    }

    /// Whether the scan found any declarations at all.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.methods.is_empty()
    }

    /// Index declarations from one file's stripped source.
    fn scan(&mut self, stripped: &str) {
        let mut in_type_group = false;
        for line in stripped.lines() {
            if in_type_group {
                if line.starts_with(')') {
                    in_type_group = false;
                } else if let Some(captures) = TYPE_GROUP_MEMBER.captures(line) {
                    self.types.insert(captures[1].to_string());
                }
                continue;
            }
            if TYPE_GROUP_OPEN.is_match(line.trim_end()) {
                in_type_group = true;
            } else if let Some(captures) = TYPE_DECL.captures(line) {
                self.types.insert(captures[1].to_string());
            } else if let Some(captures) = METHOD_DECL.captures(line) {
                self.methods
                    .insert((captures[1].to_string(), captures[2].to_string()));
            }
        }
    }
}

/// Run-scoped cache of declaration indexes, keyed by destination
/// directory and package name.
#[derive(Debug, Default)]
pub struct DeclarationOracle {
    cache: HashMap<(PathBuf, String), DeclarationIndex>,
}

impl DeclarationOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Does a top-level type `name` already exist in the package?
    pub fn type_exists(&mut self, dir: &Path, package: &str, name: &str) -> Result<bool> {
        Ok(self.index(dir, package)?.has_type(name))
    }

    /// Does a pointer-receiver method `name` on `receiver` already exist
    /// in the package?
    pub fn method_exists(
        &mut self,
        dir: &Path,
        package: &str,
        receiver: &str,
        name: &str,
    ) -> Result<bool> {
        Ok(self.index(dir, package)?.has_method(receiver, name))
    }

    /// Whether the package has any declarations at all in `dir`.
    pub fn package_present(&mut self, dir: &Path, package: &str) -> Result<bool> {
        Ok(!self.index(dir, package)?.is_empty())
    }

    /// Build (or fetch) the index for a (directory, package) pair.
    fn index(&mut self, dir: &Path, package: &str) -> Result<&DeclarationIndex> {
        let key = (dir.to_path_buf(), package.to_string());
        if !self.cache.contains_key(&key) {
            let index = build_index(dir, package)?;
            debug!(dir = %dir.display(), package, empty = index.is_empty(), "indexed package");
            self.cache.insert(key.clone(), index);
        }
        Ok(&self.cache[&key])
    }
}

fn build_index(dir: &Path, package: &str) -> Result<DeclarationIndex> {
    let mut index = DeclarationIndex::default();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        // A simply-absent directory is "no declarations", not a failure.
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(index),
        Err(source) => {
            return Err(Error::Io {
                path: dir.to_path_buf(),
                source,
            });
        }
    };

    for entry in entries {
        let entry = entry.map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if path.is_dir()
            || name.starts_with('.')
            || !name.ends_with(".go")
            || name.ends_with("_test.go")
        {
            continue;
        }
        let source = fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let stripped = strip_source(&source).map_err(|reason| Error::SourceParse {
            path: path.clone(),
            reason,
        })?;
        let declared = PACKAGE_CLAUSE
            .captures(&stripped)
            .map(|captures| captures[1].to_string());
        if declared.as_deref() != Some(package) {
            continue;
        }
        index.scan(&stripped);
    }

    Ok(index)
}

/// Blank out comments and string/rune literals while verifying brace and
/// parenthesis balance, so declaration scanning never matches quoted or
/// commented text. Newlines are preserved. Returns a reason string on
/// structurally broken source.
fn strip_source(source: &str) -> std::result::Result<String, String> {
    #[derive(PartialEq)]
    enum State {
        Code,
        LineComment,
        BlockComment,
        Str,
        RawStr,
        Rune,
    }

    let mut out = String::with_capacity(source.len());
    let mut state = State::Code;
    let mut braces: i64 = 0;
    let mut parens: i64 = 0;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    out.push_str("  ");
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    out.push_str("  ");
                    state = State::BlockComment;
                }
                '"' => {
                    out.push(' ');
                    state = State::Str;
                }
                '`' => {
                    out.push(' ');
                    state = State::RawStr;
                }
                '\'' => {
                    out.push(' ');
                    state = State::Rune;
                }
                '{' => {
                    braces += 1;
                    out.push(c);
                }
                '}' => {
                    braces -= 1;
                    if braces < 0 {
                        return Err("unbalanced '}'".to_string());
                    }
                    out.push(c);
                }
                '(' => {
                    parens += 1;
                    out.push(c);
                }
                ')' => {
                    parens -= 1;
                    if parens < 0 {
                        return Err("unbalanced ')'".to_string());
                    }
                    out.push(c);
                }
                _ => out.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                } else {
                    out.push(' ');
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("  ");
                    state = State::Code;
                } else if c == '\n' {
                    out.push('\n');
                } else {
                    out.push(' ');
                }
            }
            State::Str | State::Rune => {
                if c == '\\' {
                    chars.next();
                    out.push_str("  ");
                } else if c == '\n' {
                    return Err("newline in literal".to_string());
                } else if (state == State::Str && c == '"') || (state == State::Rune && c == '\'') {
                    out.push(' ');
                    state = State::Code;
                } else {
                    out.push(' ');
                }
            }
            State::RawStr => {
                if c == '`' {
                    out.push(' ');
                    state = State::Code;
                } else if c == '\n' {
                    out.push('\n');
                } else {
                    out.push(' ');
                }
            }
        }
    }

    match state {
        State::Code if braces != 0 => Err("unbalanced '{'".to_string()),
        State::Code if parens != 0 => Err("unbalanced '('".to_string()),
        State::Code => Ok(out),
        State::LineComment => Ok(out),
        State::BlockComment => Err("unterminated block comment".to_string()),
        State::Str | State::Rune => Err("unterminated literal".to_string()),
        State::RawStr => Err("unterminated raw string".to_string()),
    }
}
