use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::theme::Theme;

pub const SITE_CONFIG_FILE: &str = "x86ref.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub browse: BrowseConfig,
    pub layout: LayoutConfig,
    pub theme_name: String,
    #[serde(skip)]
    pub theme: Theme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    pub show_toc: bool,
    pub show_nav: bool,
    /// Widest a bit-field diagram band may get before it wraps
    pub diagram_width: usize,
    /// Used for the page URL copied with `y`
    pub base_url: String,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            show_toc: true,
            show_nav: true,
            diagram_width: 72,
            base_url: String::from("https://x86ref.dev"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub nav_width: u16,
    pub toc_width: u16,
    pub nav_min_width: u16,
    pub nav_max_width: u16,
    pub toc_min_width: u16,
    pub toc_max_width: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            nav_width: 28,
            toc_width: 30,
            nav_min_width: 18,
            nav_max_width: 50,
            toc_min_width: 20,
            toc_max_width: 50,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browse: BrowseConfig::default(),
            layout: LayoutConfig::default(),
            theme_name: String::from("gruvbox"),
            theme: Theme::gruvbox(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
            let mut config: Config =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;
            config.theme = Theme::from_name(&config.theme_name);
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn set_theme(&mut self, name: &str) {
        self.theme_name = name.to_string();
        self.theme = Theme::from_name(name);
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_file_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "x86ref", "x86ref")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}

/// Per-site settings read from `x86ref.toml` in the site root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: String,
    pub app_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub sitemap_path: PathBuf,
    pub page_extensions: Vec<String>,
    pub extra_reserved: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://x86ref.dev"),
            app_dir: PathBuf::from("app"),
            manifest_path: PathBuf::from("public/page-list.txt"),
            sitemap_path: PathBuf::from("public/sitemap.xml"),
            page_extensions: ["toml", "tsx", "ts", "jsx", "js", "mdx", "md"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            extra_reserved: vec![],
        }
    }
}

impl SiteConfig {
    pub fn load(site_dir: &Path) -> Result<Self> {
        let config_path = site_dir.join(SITE_CONFIG_FILE);

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let config: SiteConfig = toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?;
            Ok(config)
        } else {
            Ok(SiteConfig::default())
        }
    }

    pub fn save(&self, site_dir: &Path) -> Result<()> {
        let config_path = site_dir.join(SITE_CONFIG_FILE);
        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// Paths in the config are relative to the site root
    pub fn resolve(&self, site_dir: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            site_dir.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_config_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::load(dir.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_site_config_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(SITE_CONFIG_FILE),
            "base_url = \"https://example.org\"\nextra_reserved = [\"opengraph-image\"]\n",
        )
        .unwrap();

        let config = SiteConfig::load(dir.path()).unwrap();
        assert_eq!(config.base_url, "https://example.org");
        assert_eq!(config.extra_reserved, vec!["opengraph-image".to_string()]);
        assert_eq!(config.app_dir, PathBuf::from("app"));
    }

    #[test]
    fn test_site_config_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig {
            base_url: String::from("https://docs.example"),
            ..SiteConfig::default()
        };
        config.save(dir.path()).unwrap();
        assert_eq!(SiteConfig::load(dir.path()).unwrap(), config);
    }

    #[test]
    fn test_user_config_parses_theme_name() {
        let config: Config = toml::from_str("theme_name = \"light\"").unwrap();
        assert_eq!(config.theme_name, "light");
        assert!(config.browse.show_toc);
    }

    #[test]
    fn test_resolve_relative_to_site() {
        let config = SiteConfig::default();
        let site = Path::new("/srv/site");
        assert_eq!(
            config.resolve(site, &config.sitemap_path),
            PathBuf::from("/srv/site/public/sitemap.xml")
        );
    }
}
