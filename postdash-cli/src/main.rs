//! CLI for the postdash dashboard pipeline.
//!
//! Drives the derivation pipeline from a terminal: fetch or load a post
//! list, print chart summaries, render the filtered/paginated table, and
//! write spreadsheet (CSV) exports.

use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use postdash::export::to_csv;
use postdash::fetch::{DEFAULT_POSTS_ENDPOINT, FetchConfig, fetch_posts};
use postdash::geocode::{GeocodeConfig, lookup};
use postdash::store::RecordStore;
use postdash::table::{PAGE_SIZE, PAGE_WINDOW, content_preview};
use postdash::{
    PageContext, aggregate_by_group, build_full_export, build_page_export, filter_records,
    paginate, sample_cumulative, visible_page_window, write_csv,
};

/// postdash — post-record dashboard pipeline CLI.
#[derive(Parser)]
#[command(name = "postdash", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Print chart summaries: posts per user and cumulative growth series.
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        /// Groups to print cumulative series for.
        #[arg(long, value_delimiter = ',', default_value = "1,2")]
        groups: Vec<u64>,
    },

    /// Render one page of the filtered table.
    Table {
        #[command(flatten)]
        source: SourceArgs,

        /// Search query (matched case-insensitively across all fields).
        #[arg(long, default_value = "")]
        query: String,

        /// Page to display (1-indexed).
        #[arg(long, default_value = "1")]
        page: usize,

        /// Output format.
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Export the filtered table (or one page of it) to a CSV file.
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// Search query applied before exporting.
        #[arg(long, default_value = "")]
        query: String,

        /// Export only this page (exports everything when omitted).
        #[arg(long)]
        page: Option<usize>,

        /// Directory to write the export file into.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Look up a free-text location (first geocoding candidate).
    Locate {
        /// Free-text location query.
        query: String,
    },
}

/// Where the post list comes from.
#[derive(Args)]
struct SourceArgs {
    /// Read the post list from a local JSON file instead of fetching.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Endpoint to fetch the post list from.
    #[arg(long, default_value = DEFAULT_POSTS_ENDPOINT)]
    endpoint: String,
}

/// Output format for the table command.
#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable rows.
    Text,
    /// JSON object with items and page metadata.
    Json,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Summary { source, groups } => cmd_summary(&source, &groups),
        Commands::Table {
            source,
            query,
            page,
            format,
        } => cmd_table(&source, &query, page, &format),
        Commands::Export {
            source,
            query,
            page,
            out,
        } => cmd_export(&source, &query, page, &out),
        Commands::Locate { query } => cmd_locate(&query),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Loads the record store from a local file or the configured endpoint.
fn load_store(source: &SourceArgs) -> Result<RecordStore, Box<dyn std::error::Error>> {
    match &source.input {
        Some(path) => {
            let body = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read '{}': {e}", path.display()))?;
            Ok(postdash::fetch::decode_posts(&body))
        }
        None => Ok(fetch_posts(&FetchConfig::new(&source.endpoint))?),
    }
}

/// Implements `postdash summary`.
fn cmd_summary(source: &SourceArgs, groups: &[u64]) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store(source)?;
    let buckets = aggregate_by_group(store.records());

    println!("Posts per user ({} records, {} users):", store.len(), buckets.len());
    for bucket in &buckets {
        println!("  {:<10} {:>4}", bucket.key, bucket.count);
    }

    for &group_id in groups {
        let subgroup = store.group(group_id);
        let series = sample_cumulative(&subgroup, postdash::DEFAULT_MAX_POINTS);

        println!();
        println!("User {group_id} cumulative posts ({} total):", subgroup.len());
        if series.is_empty() {
            println!("  (no posts)");
        }
        for point in &series {
            println!("  {:<10} {:>4}", point.label, point.cumulative_count);
        }
    }

    Ok(())
}

/// Implements `postdash table`.
fn cmd_table(
    source: &SourceArgs,
    query: &str,
    page: usize,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store(source)?;
    let filtered = filter_records(store.records(), query);
    let view = paginate(&filtered, page, PAGE_SIZE);

    match format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "items": view.items,
                "total_filtered": view.total_filtered,
                "total_pages": view.total_pages,
                "current_page": view.current_page,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            if view.total_filtered == 0 {
                println!("No results found for \"{query}\".");
                return Ok(());
            }

            for record in &view.items {
                println!(
                    "User {:<3} #{:<4} {:<45} {}",
                    record.group_id,
                    record.id,
                    record.title,
                    content_preview(&record.body)
                );
            }

            println!();
            println!(
                "Showing {} to {} of {} results",
                view.showing_from(),
                view.showing_to(),
                view.total_filtered
            );
            let window = visible_page_window(view.current_page, view.total_pages, PAGE_WINDOW);
            let numbers: Vec<String> = window
                .iter()
                .map(|&n| {
                    if n == view.current_page {
                        format!("[{n}]")
                    } else {
                        n.to_string()
                    }
                })
                .collect();
            println!(
                "Page {} of {}   {}",
                view.current_page,
                view.total_pages,
                numbers.join(" ")
            );
        }
    }

    Ok(())
}

/// Implements `postdash export`.
fn cmd_export(
    source: &SourceArgs,
    query: &str,
    page: Option<usize>,
    out: &PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store(source)?;
    let filtered = filter_records(store.records(), query);

    let sheet = match page {
        Some(page) => {
            let view = paginate(&filtered, page, PAGE_SIZE);
            build_page_export(
                &view.items,
                PageContext {
                    page: view.current_page,
                    page_size: view.page_size,
                },
            )
        }
        None => build_full_export(&filtered, Utc::now()),
    };

    let path = write_csv(&sheet, out)?;
    println!(
        "Wrote {} row(s) to {} ({} bytes)",
        sheet.rows.len(),
        path.display(),
        to_csv(&sheet).len()
    );

    Ok(())
}

/// Implements `postdash locate`.
fn cmd_locate(query: &str) -> Result<(), Box<dyn std::error::Error>> {
    match lookup(&GeocodeConfig::default(), query)? {
        Some(place) => {
            println!("{}", place.name);
            println!("  lat: {:.6}", place.lat);
            println!("  lon: {:.6}", place.lon);
        }
        None => println!("No location found for \"{query}\"."),
    }

    Ok(())
}
