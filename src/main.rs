//! mdxdoc: render a JSON declaration graph into MDX reference pages.
//!
//! - **directory mode**: `mdxdoc project.json -o docs/api` writes one
//!   `<folder>/<slug>.mdx` per declaration, `overview.mdx` and `navigation.json`
//! - **stdout mode**: `mdxdoc project.json` prints the overview page

use anyhow::{Context, Result};
use clap::Parser;
use mdxdoc::{load_project, render_site, Config, Site};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mdxdoc",
    about = "Generate MDX reference pages from a JSON declaration graph"
)]
struct Cli {
    /// Declaration graph (JSON)
    input: PathBuf,

    /// Output directory. If omitted, the overview is printed to stdout.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Rendering config (TOML)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Skip the overview page
    #[arg(long)]
    no_overview: bool,

    /// Document private declarations and members
    #[arg(long)]
    include_private: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if cli.include_private {
        config.include_private = true;
    }

    let root = load_project(&cli.input)?;
    let site = render_site(&root, &config);

    match &cli.output {
        Some(dir) => write_site(&site, dir, !cli.no_overview),
        None => {
            if !cli.no_overview {
                print!("{}", site.overview.document);
            }
            Ok(())
        }
    }
}

/// Write every page, the overview and `navigation.json` under `dir`.
fn write_site(site: &Site, dir: &Path, with_overview: bool) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;

    let overview = with_overview.then_some(&site.overview);
    for page in site.pages.iter().chain(overview) {
        let path = dir.join(page.file_name());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&path, page.document.to_markdown())
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    let nav_path = dir.join("navigation.json");
    let nav = serde_json::to_string_pretty(&site.navigation)
        .context("failed to serialize navigation")?;
    fs::write(&nav_path, nav + "\n")
        .with_context(|| format!("failed to write {}", nav_path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "mdxdoc",
            "project.json",
            "-o",
            "out",
            "-c",
            "mdxdoc.toml",
            "--no-overview",
            "--include-private",
        ])
        .unwrap();
        assert_eq!(cli.input, PathBuf::from("project.json"));
        assert_eq!(cli.output, Some(PathBuf::from("out")));
        assert_eq!(cli.config, Some(PathBuf::from("mdxdoc.toml")));
        assert!(cli.no_overview);
        assert!(cli.include_private);
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["mdxdoc"]).is_err());
    }
}
