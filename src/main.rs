mod app;
mod clipboard;
mod config;
mod content;
mod error;
mod input;
mod page;
mod render;
mod routes;
mod site;
mod sitemap;
mod theme;
mod toc;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand};
use config::{Config, SiteConfig};
use content::Catalog;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use render::RenderOptions;
use routes::RouteOptions;
use std::io::stdout;
use std::path::{Path, PathBuf};
use theme::Theme;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "x86ref")]
#[command(author, version, about = "x86/x86-64 instruction and register reference", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse pages in the terminal (default)
    Browse {
        #[command(flatten)]
        source: PageSource,

        /// Color theme for this session (dark, light, gruvbox)
        #[arg(long)]
        theme: Option<String>,
    },
    /// Print a page as plain text
    Show {
        /// Route or short name, e.g. /instructions/mov or mov
        route: String,

        #[command(flatten)]
        source: PageSource,

        /// Wrap width
        #[arg(short, long, default_value_t = 100)]
        width: usize,

        /// Leave out the contents list
        #[arg(long)]
        no_toc: bool,
    },
    /// Print a page's numbered table of contents
    Toc {
        route: String,

        #[command(flatten)]
        source: PageSource,
    },
    /// Write the page-list manifest and the XML sitemap for a site
    Manifest {
        /// Site root containing x86ref.toml
        #[arg(long, default_value = ".")]
        site: PathBuf,
    },
    /// Write the built-in pages as a page tree
    Export {
        /// Target app directory
        dir: PathBuf,
    },
    /// Create a new site with the built-in pages
    New { name: String },
}

#[derive(clap::Args, Debug)]
struct PageSource {
    /// Read pages from this site's page tree instead of the built-in set
    #[arg(long)]
    site: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command.unwrap_or(Command::Browse {
        source: PageSource { site: None },
        theme: None,
    }) {
        Command::Browse { source, theme } => {
            let catalog = load_catalog(&source)?;
            let mut config = Config::load()?;
            if let Some(name) = theme {
                if !Theme::available_themes().contains(&name.as_str()) {
                    anyhow::bail!(
                        "Unknown theme '{}' (available: {})",
                        name,
                        Theme::available_themes().join(", ")
                    );
                }
                config.set_theme(&name);
            }
            browse(catalog, config)
        }
        Command::Show {
            route,
            source,
            width,
            no_toc,
        } => {
            init_logging();
            let catalog = load_catalog(&source)?;
            let page = catalog
                .resolve(&route)
                .with_context(|| format!("No page for '{}'", route))?;
            let options = RenderOptions {
                width,
                show_toc: !no_toc,
                ..RenderOptions::default()
            };
            let rendered = render::render_page(page, &options, |r| catalog.title_of(r));
            for error in &rendered.errors {
                tracing::warn!("{}: {}", page.route, error);
            }
            print!("{}", rendered.to_plain_text());
            Ok(())
        }
        Command::Toc { route, source } => {
            init_logging();
            let catalog = load_catalog(&source)?;
            let page = catalog
                .resolve(&route)
                .with_context(|| format!("No page for '{}'", route))?;
            for (depth, entry) in toc::flatten(&page.toc()) {
                println!(
                    "{}{:<6}{}  #{}",
                    "  ".repeat(depth),
                    entry.label(),
                    entry.title,
                    entry.anchor
                );
            }
            Ok(())
        }
        Command::Manifest { site } => {
            init_logging();
            let site_config = SiteConfig::load(&site)?;
            let report = sitemap::build(&site, &site_config)
                .with_context(|| format!("Failed to build manifest for {}", site.display()))?;
            println!(
                "{} routes -> {}, {}",
                report.routes.len(),
                report.manifest_path.display(),
                report.sitemap_path.display()
            );
            Ok(())
        }
        Command::Export { dir } => {
            init_logging();
            let count = site::export_pages(content::all_pages(), &dir)?;
            println!("Exported {} pages to {}", count, dir.display());
            Ok(())
        }
        Command::New { name } => {
            init_logging();
            site::create_new_site(&name, content::all_pages())?;
            println!("Created new site: {}", name);
            println!("Run: cd {} && x86ref manifest", name);
            Ok(())
        }
    }
}

/// Logs go to stderr; the browser never installs a subscriber so the
/// alternate screen stays clean.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "x86ref=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_catalog(source: &PageSource) -> Result<Catalog> {
    match &source.site {
        None => Ok(Catalog::builtin()),
        Some(site_dir) => load_site_catalog(site_dir),
    }
}

fn load_site_catalog(site_dir: &Path) -> Result<Catalog> {
    let site_config = SiteConfig::load(site_dir)?;
    let app_dir = site_config.resolve(site_dir, &site_config.app_dir);
    let pages = site::load_page_tree(&app_dir, &RouteOptions::from(&site_config))
        .with_context(|| format!("Failed to load pages from {}", app_dir.display()))?;
    if pages.is_empty() {
        anyhow::bail!("No page.toml files under {}", app_dir.display());
    }
    Ok(Catalog::new(pages))
}

fn browse(catalog: Catalog, config: Config) -> Result<()> {
    let mut app = App::new(catalog, config)?;

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if input::handle_event(app)? == input::Action::Quit {
            break;
        }
    }
    Ok(())
}
