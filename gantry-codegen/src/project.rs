//! Project-root discovery and canonical import-path resolution.
//!
//! Two strategies, tried in order. Root-relative mode walks the
//! filesystem upward from the injected start directory looking for the
//! root marker ([`crate::paths::ROOT_MARKER`]) and derives import paths
//! from the module identifier it declares. When no marker exists, the
//! legacy fallback searches a configured list of workspace roots, with
//! symlink-resolved variants of both sides, and strips the matched
//! `<root>/src` prefix. A fallback miss degrades to an empty import path;
//! it is never an error.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    paths,
};

/// First line of the root marker matching this pattern declares the
/// module; a trailing line comment is tolerated.
static MODULE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^module (.*?)(?: //.*)?$").expect("module line pattern"));

/// Module identity read from a root marker file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    /// Canonical module identifier, e.g. `example.com/proj`.
    pub identifier: String,
    /// Directory containing the marker file.
    pub root_dir: PathBuf,
}

/// Resolves the canonical import path of generated packages.
///
/// Both the starting directory and the fallback workspace roots are
/// injected at construction instead of being read from ambient process
/// state, so resolution is testable against fixture trees. A found root
/// marker is cached and authoritative for the rest of the run; a miss is
/// *not* cached, since different files may sit under different fallback
/// roots.
#[derive(Debug)]
pub struct ProjectRoots {
    start_dir: PathBuf,
    fallback_roots: Vec<PathBuf>,
    module: Option<ModuleInfo>,
}

impl ProjectRoots {
    /// Create a resolver rooted at `start_dir` with an explicit list of
    /// fallback workspace roots, consulted in order.
    pub fn new(start_dir: impl Into<PathBuf>, fallback_roots: Vec<PathBuf>) -> Self {
        Self {
            start_dir: start_dir.into(),
            fallback_roots,
            module: None,
        }
    }

    /// Wiring-time convenience: start at the process working directory and
    /// take fallback roots from the colon-delimited `GOPATH` variable.
    pub fn from_env() -> io::Result<Self> {
        let start_dir = std::env::current_dir()?;
        let fallback_roots = std::env::var("GOPATH")
            .map(|gopath| gopath.split(':').map(PathBuf::from).collect())
            .unwrap_or_default();
        Ok(Self::new(start_dir, fallback_roots))
    }

    /// The injected starting directory. Destination directories of
    /// relative output paths are anchored here.
    pub fn start_dir(&self) -> &Path {
        &self.start_dir
    }

    /// The cached module identity, once root-relative resolution has
    /// succeeded.
    pub fn module(&self) -> Option<&ModuleInfo> {
        self.module.as_ref()
    }

    /// Resolve the canonical import path for a destination package path.
    ///
    /// Returns the empty string when no strategy succeeds; callers treat
    /// that as "import path unknown" and degrade gracefully.
    pub fn resolve_import_path(&mut self, package_path: &str) -> Result<String> {
        if self.module.is_none() {
            self.module = find_root_marker(&self.start_dir)?;
            if let Some(module) = &self.module {
                debug!(
                    module = %module.identifier,
                    root = %module.root_dir.display(),
                    "found root marker"
                );
            }
        }

        if let Some(module) = &self.module {
            let relative = self
                .start_dir
                .strip_prefix(&module.root_dir)
                .unwrap_or(Path::new(""));
            let wd_import = paths::join(&[&module.identifier, &path_to_import(relative)]);
            return Ok(combine(&wd_import, package_path));
        }

        Ok(self.resolve_fallback(package_path))
    }

    /// Legacy resolution over the configured workspace roots. For each
    /// candidate, four prefix combinations are tested: the plain and
    /// symlink-resolved forms of the start directory against the plain
    /// and symlink-resolved forms of the root. First candidate in
    /// configured order wins.
    fn resolve_fallback(&self, package_path: &str) -> String {
        let wd = &self.start_dir;
        let resolved_wd = fs::canonicalize(wd).ok();

        for root in &self.fallback_roots {
            let resolved_root = fs::canonicalize(root).ok();
            if wd.starts_with(root) {
                return import_under_root(wd, root, package_path);
            }
            if let Some(xwd) = &resolved_wd
                && xwd.starts_with(root)
            {
                return import_under_root(xwd, root, package_path);
            }
            if let Some(xroot) = &resolved_root
                && wd.starts_with(xroot)
            {
                return import_under_root(wd, xroot, package_path);
            }
            if let (Some(xwd), Some(xroot)) = (&resolved_wd, &resolved_root)
                && xwd.starts_with(xroot)
            {
                return import_under_root(xwd, xroot, package_path);
            }
        }

        warn!(
            start_dir = %wd.display(),
            "no workspace root matched; import path unknown"
        );
        String::new()
    }
}

/// Walk upward from `start` to the filesystem root; the first directory
/// containing the marker file ends the search. A marker without a module
/// line yields `None` and resolution falls back to the workspace roots.
fn find_root_marker(start: &Path) -> Result<Option<ModuleInfo>> {
    for dir in start.ancestors() {
        let marker = dir.join(paths::ROOT_MARKER);
        if !marker.is_file() {
            continue;
        }
        let content = fs::read_to_string(&marker).map_err(|source| Error::Io {
            path: marker.clone(),
            source,
        })?;
        for line in content.lines() {
            if let Some(captures) = MODULE_LINE.captures(line) {
                return Ok(Some(ModuleInfo {
                    identifier: captures[1].to_string(),
                    root_dir: dir.to_path_buf(),
                }));
            }
        }
        return Ok(None);
    }
    Ok(None)
}

/// Import path for a package under a matched workspace root: the working
/// directory stripped of `<root>/src`, joined with the package path.
fn import_under_root(wd: &Path, root: &Path, package_path: &str) -> String {
    let src = root.join("src");
    let wd_import = wd
        .strip_prefix(&src)
        .map(path_to_import)
        .unwrap_or_default();
    combine(&wd_import, package_path)
}

/// Combine the working directory's import path with a destination package
/// path. A package path of `.` contributes nothing, and one already
/// prefixed by the working-directory import path is returned as-is.
fn combine(wd_import: &str, package_path: &str) -> String {
    let package_path = paths::clean(package_path);
    let package_path = if package_path == "." { "" } else { &package_path };
    if !package_path.is_empty() && package_path.starts_with(wd_import) {
        package_path.to_string()
    } else {
        paths::join(&[wd_import, package_path])
    }
}

fn path_to_import(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write_marker(dir: &Path, content: &str) {
        fs::write(dir.join(paths::ROOT_MARKER), content).unwrap();
    }

    #[test]
    fn test_root_relative_resolution() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("ws/proj");
        let start = root.join("sub");
        fs::create_dir_all(&start).unwrap();
        write_marker(&root, "module example.com/proj\n\ngo 1.21\n");

        let mut roots = ProjectRoots::new(&start, Vec::new());
        assert_eq!(
            roots.resolve_import_path("out/pkg").unwrap(),
            "example.com/proj/sub/out/pkg"
        );
        // Marker is cached after the first hit.
        assert!(roots.module().is_some());
    }

    #[test]
    fn test_marker_line_tolerates_trailing_comment() {
        let temp = TempDir::new().unwrap();
        write_marker(temp.path(), "module example.com/proj // owned by platform\n");

        let info = find_root_marker(temp.path()).unwrap().unwrap();
        assert_eq!(info.identifier, "example.com/proj");
        assert_eq!(info.root_dir, temp.path());
    }

    #[test]
    fn test_marker_without_module_line_falls_through() {
        let temp = TempDir::new().unwrap();
        write_marker(temp.path(), "go 1.21\n");

        assert!(find_root_marker(temp.path()).unwrap().is_none());
    }

    #[test]
    fn test_nearest_marker_wins() {
        let temp = TempDir::new().unwrap();
        let outer = temp.path();
        let inner = outer.join("nested");
        fs::create_dir_all(&inner).unwrap();
        write_marker(outer, "module example.com/outer\n");
        write_marker(&inner, "module example.com/inner\n");

        let info = find_root_marker(&inner).unwrap().unwrap();
        assert_eq!(info.identifier, "example.com/inner");
    }

    #[test]
    fn test_fallback_resolution() {
        let temp = TempDir::new().unwrap();
        let gopath = temp.path().join("gopath");
        let start = gopath.join("src/example.com/proj");
        fs::create_dir_all(&start).unwrap();

        let mut roots = ProjectRoots::new(&start, vec![gopath]);
        assert_eq!(
            roots.resolve_import_path("pb").unwrap(),
            "example.com/proj/pb"
        );
    }

    #[test]
    fn test_fallback_miss_degrades_to_empty() {
        let temp = TempDir::new().unwrap();
        let start = temp.path().join("elsewhere");
        fs::create_dir_all(&start).unwrap();

        let mut roots = ProjectRoots::new(&start, vec![PathBuf::from("/nonexistent/gopath")]);
        assert_eq!(roots.resolve_import_path("pb").unwrap(), "");
    }

    #[cfg(unix)]
    #[test]
    fn test_fallback_matches_through_symlinked_root() {
        let temp = TempDir::new().unwrap();
        let real_root = temp.path().join("real");
        let start = real_root.join("src/example.com/proj");
        fs::create_dir_all(&start).unwrap();
        let link = temp.path().join("link");
        std::os::unix::fs::symlink(&real_root, &link).unwrap();

        // The configured root is the symlink but the start dir lives under
        // the resolved target; the symlink-resolved combination matches.
        let mut roots = ProjectRoots::new(&start, vec![link]);
        let resolved = roots.resolve_import_path("pb").unwrap();
        assert_eq!(resolved, "example.com/proj/pb");
    }

    #[test]
    fn test_package_path_already_qualified() {
        assert_eq!(
            combine("example.com/proj", "example.com/proj/pb"),
            "example.com/proj/pb"
        );
        assert_eq!(combine("example.com/proj", "."), "example.com/proj");
        assert_eq!(combine("example.com/proj", "./pb"), "example.com/proj/pb");
    }

    #[test]
    fn test_first_configured_root_wins() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        let start = a.join("src/example.com/proj");
        fs::create_dir_all(&start).unwrap();
        fs::create_dir_all(b.join("src")).unwrap();

        let mut roots = ProjectRoots::new(&start, vec![b, a]);
        // `b` is configured first but does not contain the start dir, so
        // resolution proceeds to `a`.
        assert_eq!(
            roots.resolve_import_path("pb").unwrap(),
            "example.com/proj/pb"
        );
    }
}
