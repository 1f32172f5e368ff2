//! Page tree on disk: export, load, and new-site scaffolding

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::page::Page;
use crate::routes::{self, RouteOptions};

pub const PAGE_FILE: &str = "page.toml";

/// Route group holding the exported reference pages
const REFERENCE_GROUP: &str = "(reference)";

/// Where a page lives inside the page tree
pub fn page_path(app_dir: &Path, route: &str) -> PathBuf {
    let segments: Vec<&str> = route.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return app_dir.join(PAGE_FILE);
    }
    let mut path = app_dir.join(REFERENCE_GROUP);
    for segment in segments {
        path.push(segment);
    }
    path.join(PAGE_FILE)
}

pub fn export_pages<'a, I>(pages: I, app_dir: &Path) -> Result<usize, SiteError>
where
    I: IntoIterator<Item = &'a Page>,
{
    let mut count = 0;
    for page in pages {
        let path = page_path(app_dir, &page.route);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
        }
        let content = toml::to_string_pretty(page).map_err(|source| SiteError::PageSerialize {
            route: page.route.clone(),
            source,
        })?;
        fs::write(&path, content).map_err(|e| SiteError::io(&path, e))?;
        tracing::debug!("exported {} to {}", page.route, path.display());
        count += 1;
    }
    tracing::info!("exported {} pages to {}", count, app_dir.display());
    Ok(count)
}

/// Load every `page.toml` in the tree; routes come from the file locations.
///
/// Content pages in other formats are part of the manifest but are not
/// loaded here.
pub fn load_page_tree(app_dir: &Path, options: &RouteOptions) -> Result<Vec<Page>, SiteError> {
    let mut pages: Vec<Page> = Vec::new();
    for file in routes::collect_page_files(app_dir, options)? {
        if file.path.file_name().and_then(|n| n.to_str()) != Some(PAGE_FILE) {
            continue;
        }
        if pages.iter().any(|p| p.route == file.route) {
            tracing::warn!("{} duplicates route {}, skipped", file.path.display(), file.route);
            continue;
        }
        let content = fs::read_to_string(&file.path).map_err(|e| SiteError::io(&file.path, e))?;
        let mut page: Page = toml::from_str(&content).map_err(|source| SiteError::PageParse {
            path: file.path.clone(),
            source,
        })?;
        page.route = file.route;
        pages.push(page);
    }
    pages.sort_by(|a, b| a.route.cmp(&b.route));
    Ok(pages)
}

pub fn create_new_site(name: &str, pages: &[Page]) -> Result<PathBuf> {
    let site_dir = PathBuf::from(name);

    if site_dir.exists() {
        anyhow::bail!("Directory '{}' already exists", name);
    }

    fs::create_dir_all(&site_dir)
        .with_context(|| format!("Failed to create directory: {}", name))?;

    let config = SiteConfig::default();
    config.save(&site_dir)?;

    let app_dir = config.resolve(&site_dir, &config.app_dir);
    export_pages(pages, &app_dir).context("Failed to export pages")?;

    let readme = site_dir.join("README.md");
    let readme_content = format!(
        r#"# {}

An x86 reference site. Pages live under `app/` as `page.toml` files; the
directory layout gives each page its URL. Parenthesized directories such as
`(reference)` group pages without appearing in the URL.

## Commands

```bash
cd {}
x86ref manifest          # write public/page-list.txt and public/sitemap.xml
x86ref browse --site .   # browse the pages in this tree
```

Edit `x86ref.toml` to set `base_url` before generating the sitemap.
"#,
        name, name
    );
    fs::write(&readme, readme_content).context("Failed to create README.md")?;

    Ok(site_dir)
}
