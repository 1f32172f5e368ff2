//! Page-list manifest and XML sitemap output

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::routes::{self, RouteOptions};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// What a manifest build produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub routes: Vec<String>,
    pub manifest_path: PathBuf,
    pub sitemap_path: PathBuf,
}

/// One route per line
pub fn render_manifest(routes: &[String]) -> String {
    let mut out = String::new();
    for route in routes {
        out.push_str(route);
        out.push('\n');
    }
    out
}

pub fn render_sitemap(routes: &[String], base_url: &str) -> Result<String, SiteError> {
    let base = normalize_base_url(base_url)?;

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_NS));
    for route in routes {
        out.push_str("  <url>\n");
        out.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&page_url(base, route))));
        out.push_str("  </url>\n");
    }
    out.push_str("</urlset>\n");
    Ok(out)
}

/// Absolute URL of a route under `base`, route segments percent-encoded
pub fn page_url(base: &str, route: &str) -> String {
    let base = base.trim_end_matches('/');
    format!("{}/{}", base, encode_route(route.trim_start_matches('/')))
}

/// Percent-encode each path segment, keeping the `/` separators
fn encode_route(route: &str) -> String {
    route
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<String>>()
        .join("/")
}

fn normalize_base_url(base_url: &str) -> Result<&str, SiteError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| SiteError::InvalidBaseUrl(base_url.to_string()))?;

    let host = host.split('/').next().unwrap_or("");
    if host.is_empty()
        || host.contains(char::is_whitespace)
        || trimmed.contains(char::is_control)
    {
        return Err(SiteError::InvalidBaseUrl(base_url.to_string()));
    }
    Ok(trimmed)
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Walk the site's page tree and write the manifest and sitemap
pub fn build(site_dir: &Path, site: &SiteConfig) -> Result<BuildReport, SiteError> {
    let app_dir = site.resolve(site_dir, &site.app_dir);
    tracing::info!("scanning pages under {}", app_dir.display());

    let routes = routes::collect_routes(&app_dir, &RouteOptions::from(site))?;
    write_outputs(routes, site_dir, site)
}

pub fn write_outputs(
    routes: Vec<String>,
    site_dir: &Path,
    site: &SiteConfig,
) -> Result<BuildReport, SiteError> {
    // Validate before touching the filesystem
    let sitemap = render_sitemap(&routes, &site.base_url)?;
    let manifest = render_manifest(&routes);

    let manifest_path = site.resolve(site_dir, &site.manifest_path);
    let sitemap_path = site.resolve(site_dir, &site.sitemap_path);

    write_file(&manifest_path, &manifest)?;
    tracing::info!("wrote {} routes to {}", routes.len(), manifest_path.display());
    write_file(&sitemap_path, &sitemap)?;
    tracing::info!("wrote sitemap to {}", sitemap_path.display());

    Ok(BuildReport {
        routes,
        manifest_path,
        sitemap_path,
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), SiteError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| SiteError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes(list: &[&str]) -> Vec<String> {
        list.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_manifest_lines() {
        let out = render_manifest(&routes(&["/", "/instructions/mov"]));
        assert_eq!(out, "/\n/instructions/mov\n");
        assert_eq!(render_manifest(&[]), "");
    }

    #[test]
    fn test_sitemap_one_loc_per_route() {
        let xml = render_sitemap(
            &routes(&["/", "/instructions", "/registers/eflags"]),
            "https://x86ref.dev/",
        )
        .unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert_eq!(xml.matches("<url>").count(), 3);
        assert_eq!(xml.matches("</url>").count(), 3);
        assert!(xml.contains("<loc>https://x86ref.dev/</loc>"));
        assert!(xml.contains("<loc>https://x86ref.dev/instructions</loc>"));
        assert!(xml.contains("<loc>https://x86ref.dev/registers/eflags</loc>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_sitemap_escapes() {
        let xml = render_sitemap(&routes(&["/mov"]), "https://example.com/a&b").unwrap();
        assert!(xml.contains("<loc>https://example.com/a&amp;b/mov</loc>"));
        assert_eq!(escape_xml("<x y='1'>"), "&lt;x y=&apos;1&apos;&gt;");
    }

    #[test]
    fn test_sitemap_percent_encodes_routes() {
        let xml = render_sitemap(
            &routes(&["/a&b", "/<x>", "/a\u{1}b", "/history/intel 8086", "/history/80386/é"]),
            "https://example.com",
        )
        .unwrap();
        assert!(xml.contains("<loc>https://example.com/a%26b</loc>"));
        assert!(xml.contains("<loc>https://example.com/%3Cx%3E</loc>"));
        assert!(xml.contains("<loc>https://example.com/a%01b</loc>"));
        assert!(xml.contains("<loc>https://example.com/history/intel%208086</loc>"));
        assert!(xml.contains("<loc>https://example.com/history/80386/%C3%A9</loc>"));
        assert!(!xml.chars().any(|c| c.is_control() && !matches!(c, '\n' | '\t' | '\r')));
    }

    #[test]
    fn test_sitemap_keeps_base_path() {
        let xml = render_sitemap(&routes(&["/mov"]), "https://example.com/docs/").unwrap();
        assert!(xml.contains("<loc>https://example.com/docs/mov</loc>"));
    }

    #[test]
    fn test_invalid_base_url() {
        for bad in [
            "example.com",
            "ftp://example.com",
            "https://",
            "https:// bad host",
            "https://example.com/\u{1}",
        ] {
            assert!(
                matches!(render_sitemap(&[], bad), Err(SiteError::InvalidBaseUrl(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_build_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let site_dir = dir.path();
        let app = site_dir.join("app");
        fs::create_dir_all(app.join("(reference)/instructions/nop")).unwrap();
        fs::write(app.join("page.toml"), "").unwrap();
        fs::write(app.join("layout.tsx"), "").unwrap();
        fs::write(app.join("(reference)/instructions/nop/page.toml"), "").unwrap();

        let report = build(site_dir, &SiteConfig::default()).unwrap();
        assert_eq!(report.routes, routes(&["/", "/instructions/nop"]));

        let manifest = fs::read_to_string(site_dir.join("public/page-list.txt")).unwrap();
        assert_eq!(manifest, "/\n/instructions/nop\n");
        let sitemap = fs::read_to_string(site_dir.join("public/sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://x86ref.dev/instructions/nop</loc>"));
    }
}
