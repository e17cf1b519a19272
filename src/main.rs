use clap::{Parser, Subcommand};
use listing_press::{config, generate, import, materialize, output, store};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "listing-press")]
#[command(about = "Static content pipeline for commercial real-estate listings")]
#[command(long_about = "\
Static content pipeline for commercial real-estate listings

A CSV export is the data source. Rows become markdown records, records
become JSON API fixtures, and fixtures are bound into grid and detail
pages.

Pipeline stages:

  seed         data/export.csv  →  content/listings/
  materialize  content/         →  api/ + js/
  generate     api/             →  dist/

Seeding is destructive: it clears the Content Store and writes at most 6
records per run. The other stages are full, idempotent rebuilds and skip
quietly when their input does not exist yet.

Site options (document-title suffix, Open Graph base URL) are read from
an optional config.toml in the working directory.")]
#[command(version)]
struct Cli {
    /// CSV export to seed from
    #[arg(long, default_value = "data/export.csv", global = true)]
    data: PathBuf,

    /// Content Store directory
    #[arg(long, default_value = "content/listings", global = true)]
    content: PathBuf,

    /// API artifact directory
    #[arg(long, default_value = "api", global = true)]
    api: PathBuf,

    /// Embedded data module directory
    #[arg(long, default_value = "js", global = true)]
    js: PathBuf,

    /// Generated page directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reseed the Content Store from the CSV export (destructive)
    Seed,
    /// Write the JSON API artifacts and embedded data module
    Materialize,
    /// Bind the artifacts into grid and detail pages
    Generate,
    /// Run materialize + generate
    Build,
    /// Read and validate the Content Store without writing anything
    Check,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let site = config::load_config(&PathBuf::from("."))?;

    match cli.command {
        Command::Seed => {
            let report = import::seed(&cli.data, &cli.content)?;
            output::print_lines(&output::format_seed_report(&report));
        }
        Command::Materialize => {
            run_materialize(&cli)?;
        }
        Command::Generate => {
            run_generate(&cli, &site)?;
        }
        Command::Build => {
            println!("==> Stage 1: Materializing {}", cli.content.display());
            run_materialize(&cli)?;
            println!("==> Stage 2: Generating pages → {}", cli.output.display());
            run_generate(&cli, &site)?;
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            match store::read_all(&cli.content) {
                Ok(listings) => {
                    output::print_lines(&output::format_check_report(&listings));
                    println!("==> Content is valid");
                }
                Err(store::StoreError::Missing(path)) => {
                    println!("Content store not found at {}", path.display());
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    Ok(())
}

fn run_materialize(cli: &Cli) -> Result<(), materialize::MaterializeError> {
    match materialize::materialize(&cli.content, &cli.api, &cli.js)? {
        Some(report) => output::print_lines(&output::format_materialize_report(
            report.total,
            report.available,
            report.leased,
        )),
        None => println!("Content store not found, nothing to materialize"),
    }
    Ok(())
}

fn run_generate(cli: &Cli, site: &config::SiteConfig) -> Result<(), generate::GenerateError> {
    match generate::generate(&cli.api, &cli.output, site)? {
        Some(report) => output::print_lines(&output::format_generate_report(report.detail_pages)),
        None => println!("No collection document found, nothing to generate"),
    }
    Ok(())
}
