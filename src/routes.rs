//! Route manifest generation.
//!
//! Walks a file-routed page directory and turns every content page into the
//! URL path it is served under.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::config::SiteConfig;
use crate::error::SiteError;

/// File stems the web framework uses for non-page files
pub const RESERVED_STEMS: &[&str] = &[
    "error",
    "global-error",
    "layout",
    "template",
    "loading",
    "not-found",
    "default",
    "route",
];

#[derive(Debug, Clone)]
pub struct RouteOptions {
    pub page_extensions: Vec<String>,
    pub extra_reserved: Vec<String>,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self::from(&SiteConfig::default())
    }
}

impl From<&SiteConfig> for RouteOptions {
    fn from(config: &SiteConfig) -> Self {
        Self {
            page_extensions: config.page_extensions.clone(),
            extra_reserved: config.extra_reserved.clone(),
        }
    }
}

impl RouteOptions {
    pub fn is_reserved(&self, stem: &str) -> bool {
        RESERVED_STEMS.contains(&stem) || self.extra_reserved.iter().any(|r| r == stem)
    }

    fn is_page_extension(&self, ext: &str) -> bool {
        self.page_extensions
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }

    /// Whether a file (relative to the page root) is a content page
    pub fn is_content_page(&self, rel: &Path) -> bool {
        let ext = match rel.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext,
            None => return false,
        };
        let stem = match rel.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem,
            None => return false,
        };
        self.is_page_extension(ext) && !self.is_reserved(stem)
    }
}

/// A content page found on disk together with the route it serves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFile {
    pub path: PathBuf,
    pub route: String,
}

/// Walk `app_dir` and return every content page file in path order.
///
/// Several files may map to the same route; `collect_routes` deduplicates.
pub fn collect_page_files(app_dir: &Path, options: &RouteOptions) -> Result<Vec<PageFile>, SiteError> {
    if !app_dir.exists() {
        return Err(SiteError::MissingAppDir(app_dir.to_path_buf()));
    }
    if !app_dir.is_dir() {
        return Err(SiteError::NotADirectory(app_dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    collect_files(app_dir, &mut paths)?;
    paths.sort();

    let mut pages = Vec::new();
    for path in paths {
        let rel = match path.strip_prefix(app_dir) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        if !options.is_content_page(rel) {
            tracing::debug!("skipping non-page file {}", rel.display());
            continue;
        }
        match route_for(rel) {
            Some(route) => pages.push(PageFile { path, route }),
            None => tracing::debug!("skipping dynamic route {}", rel.display()),
        }
    }
    Ok(pages)
}

/// Sorted, deduplicated routes of every content page under `app_dir`
pub fn collect_routes(app_dir: &Path, options: &RouteOptions) -> Result<Vec<String>, SiteError> {
    let mut routes = BTreeSet::new();
    for page in collect_page_files(app_dir, options)? {
        if !routes.insert(page.route.clone()) {
            tracing::warn!(
                "{} maps to {} which another page already serves",
                page.path.display(),
                page.route
            );
        }
    }
    Ok(routes.into_iter().collect())
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), SiteError> {
    let entries = fs::read_dir(dir).map_err(|e| SiteError::io(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| SiteError::io(dir, e))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        // Hidden files, private folders and tooling output
        if name.starts_with('.') || name.starts_with('_') || should_skip_dir(&name) {
            continue;
        }

        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_dir {
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

fn should_skip_dir(name: &str) -> bool {
    matches!(name, "node_modules" | "target")
}

/// URL path for a content file given relative to the page root.
///
/// Returns `None` for dynamic segments (`[id]`), which have no static URL.
pub fn route_for(rel: &Path) -> Option<String> {
    let mut segments: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();

    let file = segments.pop()?;
    let stem = match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file,
    };
    if stem != "page" && stem != "index" {
        segments.push(stem);
    }

    let mut parts = Vec::with_capacity(segments.len());
    for segment in segments {
        if is_route_group(&segment) {
            continue;
        }
        if segment.starts_with('[') {
            return None;
        }
        parts.push(segment);
    }

    Some(format!("/{}", parts.join("/")))
}

fn is_route_group(segment: &str) -> bool {
    segment.len() > 2 && segment.starts_with('(') && segment.ends_with(')')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_route_for_page_suffix() {
        assert_eq!(
            route_for(Path::new("instructions/mov/page.tsx")).as_deref(),
            Some("/instructions/mov")
        );
        assert_eq!(route_for(Path::new("page.tsx")).as_deref(), Some("/"));
        assert_eq!(route_for(Path::new("about.mdx")).as_deref(), Some("/about"));
    }

    #[test]
    fn test_route_for_index_collapses() {
        assert_eq!(route_for(Path::new("index.md")).as_deref(), Some("/"));
        assert_eq!(
            route_for(Path::new("history/index.md")).as_deref(),
            Some("/history")
        );
    }

    #[test]
    fn test_route_for_groups_and_dynamic() {
        assert_eq!(
            route_for(Path::new("(reference)/registers/eflags/page.toml")).as_deref(),
            Some("/registers/eflags")
        );
        assert_eq!(route_for(Path::new("(marketing)/page.tsx")).as_deref(), Some("/"));
        assert_eq!(route_for(Path::new("instructions/[mnemonic]/page.tsx")), None);
    }

    #[test]
    fn test_reserved_stems() {
        let options = RouteOptions::default();
        for stem in ["error", "layout", "template", "loading", "not-found"] {
            assert!(options.is_reserved(stem), "{stem} should be reserved");
        }
        assert!(!options.is_reserved("page"));
        assert!(!options.is_content_page(Path::new("styles.css")));
    }

    #[test]
    fn test_collect_routes_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "page.tsx");
        touch(root, "layout.tsx");
        touch(root, "not-found.tsx");
        touch(root, "instructions/page.tsx");
        touch(root, "instructions/loading.tsx");
        touch(root, "instructions/mov/page.tsx");
        touch(root, "instructions/mov/error.tsx");
        touch(root, "instructions/add/page.mdx");
        touch(root, "registers/template.tsx");
        touch(root, "registers/eflags/page.tsx");
        touch(root, "globals.css");

        let routes = collect_routes(root, &RouteOptions::default()).unwrap();
        assert_eq!(
            routes,
            vec![
                "/",
                "/instructions",
                "/instructions/add",
                "/instructions/mov",
                "/registers/eflags",
            ]
        );
    }

    #[test]
    fn test_route_groups_do_not_change_filtering() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "(reference)/layout.tsx");
        touch(root, "(reference)/history/page.tsx");
        touch(root, "(reference)/history/error.tsx");
        touch(root, "(site)/about/page.md");

        let routes = collect_routes(root, &RouteOptions::default()).unwrap();
        assert_eq!(routes, vec!["/about", "/history"]);
    }

    #[test]
    fn test_duplicate_routes_collapse() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "(a)/cpuid/page.tsx");
        touch(root, "(b)/cpuid/page.tsx");
        touch(root, "cpuid.mdx");

        let routes = collect_routes(root, &RouteOptions::default()).unwrap();
        assert_eq!(routes, vec!["/cpuid"]);
    }

    #[test]
    fn test_skips_private_and_hidden() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "_components/page.tsx");
        touch(root, ".drafts/page.tsx");
        touch(root, "node_modules/pkg/index.js");
        touch(root, "nop/page.tsx");

        let routes = collect_routes(root, &RouteOptions::default()).unwrap();
        assert_eq!(routes, vec!["/nop"]);
    }

    #[test]
    fn test_extra_reserved() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "opengraph-image.tsx");
        touch(root, "page.tsx");

        let options = RouteOptions {
            extra_reserved: vec!["opengraph-image".to_string()],
            ..RouteOptions::default()
        };
        assert_eq!(collect_routes(root, &options).unwrap(), vec!["/"]);
    }

    #[test]
    fn test_missing_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            collect_routes(&missing, &RouteOptions::default()),
            Err(SiteError::MissingAppDir(_))
        ));

        let file = dir.path().join("file.txt");
        fs::write(&file, "").unwrap();
        assert!(matches!(
            collect_routes(&file, &RouteOptions::default()),
            Err(SiteError::NotADirectory(_))
        ));
    }
}
