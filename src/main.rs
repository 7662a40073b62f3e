use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use mkdocs2book::{read_book, Exporter, SearchIndex};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "mkdocs2book")]
#[command(about = "CLI utility to turn an MkDocs project into structured book JSON")]
#[command(version = "0.1.0")]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an MkDocs project into book JSON
    Export {
        /// Directory containing mkdocs.yml and docs/
        project_root: PathBuf,

        /// Output file (defaults to book-demo.json inside the project root)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
    /// Search the sections of an exported book
    Search {
        /// Book JSON produced by `export`
        book: PathBuf,

        /// Search terms
        #[arg(required = true)]
        query: Vec<String>,

        /// Maximum number of results to print
        #[arg(short = 'n', long = "limit", default_value = "10", value_parser = parse_limit)]
        limit: usize,
    },
}

fn parse_limit(s: &str) -> Result<usize, String> {
    let value = s.parse::<usize>().map_err(|_| "Not a number.")?;
    if value == 0 {
        return Err("Must be a positive number.".to_string());
    }
    Ok(value)
}

fn search_book(book_path: &Path, query: &str, limit: usize) -> Result<()> {
    let book = read_book(book_path)?;
    let index = SearchIndex::new(&book);
    info!(
        "Searching {} sections of \"{}\" for \"{}\"",
        index.len(),
        book.book.title.green(),
        query
    );

    let hits = index.search(query);
    if hits.is_empty() {
        println!("No matches found for \"{}\"", query);
        return Ok(());
    }

    for hit in hits.iter().take(limit) {
        println!(
            "{:>4}  {} {} {}",
            hit.score,
            hit.section_number.blue(),
            hit.section_title.bold(),
            format!("({})", hit.chapter_title).dimmed()
        );
        if !hit.summary.is_empty() {
            println!("      {}", hit.summary);
        }
    }

    info!("{} of {} matching sections shown", hits.len().min(limit), hits.len());
    Ok(())
}

fn main() {
    let filter = EnvFilter::from_default_env()
        .add_directive("mkdocs2book=info".parse().unwrap());

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Export { project_root, output } => {
            info!("MkDocs → JSON export");
            Exporter::new(project_root, output)
                .run()
                .map(|_| info!("{}", "Export completed successfully".green()))
                .map_err(anyhow::Error::from)
        }
        Commands::Search { book, query, limit } => search_book(&book, &query.join(" "), limit),
    };

    if let Err(e) = result {
        error!("{}", format!("Error: {}", e).red());
        process::exit(1);
    }
}
