//! Salesdash CLI
//!
//! Command-line interface for Salesdash operations:
//! - Import a CSV export into the SQLite source
//! - Print the headline KPIs
//! - Render a tab as JSON
//! - Break a measure down by a dimension
//! - List tabs and generate a config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use salesdash::config::{generate_default_config, load_dotenv, Config};
use salesdash::dashboard::{render, DashboardContext, TABS};
use salesdash::dataset::{import_csv, parse_database_url, SalesRecord};
use salesdash::logging::init_tracing;
use salesdash::query::{
    group_by, parse_filter_date, top_n, AggregationFunc, GroupKey, Measure, SalesFilter,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "salesdash-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sales analytics dashboard tooling")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured data source
    #[arg(long, global = true)]
    pub database_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a CSV export into a SQLite table
    Import {
        /// Path to CSV file
        path: PathBuf,
        /// Target table (default: configured table)
        #[arg(short, long)]
        table: Option<String>,
        /// Field delimiter
        #[arg(short, long, default_value = ",")]
        delimiter: char,
        /// Drop the table first if it exists
        #[arg(long)]
        replace: bool,
    },

    /// Show headline figures of the full table
    Summary,

    /// Render one tab as JSON
    Render {
        /// Tab id (tab-1 .. tab-8)
        #[arg(default_value = "tab-1")]
        tab: String,
        #[command(flatten)]
        filter: FilterArgs,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Aggregate a measure by a dimension
    Breakdown {
        /// Dimension (region, brand, city, salesperson, month, weekday, ...)
        by: String,
        /// Measure (total, quantity, net_profit, unit_price, ...)
        #[arg(short, long, default_value = "total")]
        measure: String,
        /// Aggregation function (sum, avg, min, max, count)
        #[arg(short, long, default_value = "sum")]
        aggregation: String,
        /// Keep only the N largest groups
        #[arg(short, long)]
        top: Option<usize>,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List tabs and their charts
    Tabs,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Filter controls shared by `render` and `breakdown`
#[derive(clap::Args)]
pub struct FilterArgs {
    /// Region to keep (repeatable, "ALL" for no filter)
    #[arg(short, long = "region")]
    pub regions: Vec<String>,
    /// Brand to keep (repeatable, "ALL" for no filter)
    #[arg(short, long = "brand")]
    pub brands: Vec<String>,
    /// Inclusive start date
    #[arg(long)]
    pub start: Option<String>,
    /// Inclusive end date
    #[arg(long)]
    pub end: Option<String>,
}

impl FilterArgs {
    fn to_filter(&self) -> anyhow::Result<SalesFilter> {
        let bound = |v: &Option<String>| -> anyhow::Result<_> {
            Ok(match v {
                Some(s) => parse_filter_date(s)?,
                None => None,
            })
        };

        Ok(SalesFilter {
            regions: self.regions.clone(),
            brands: self.brands.clone(),
            start_date: bound(&self.start)?,
            end_date: bound(&self.end)?,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    load_dotenv();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.database_url {
        config.source.database_url = url.clone();
    }

    // Keep stdout clean for JSON output
    config.logging.level = "warn".to_string();
    init_tracing(&config.logging).context("Failed to initialize tracing")?;

    match cli.command {
        Commands::Import {
            path,
            table,
            delimiter,
            replace,
        } => {
            if !path.exists() {
                bail!("File not found: {:?}", path);
            }
            if !delimiter.is_ascii() {
                bail!("Delimiter must be a single ASCII character");
            }

            let db_path = parse_database_url(&config.source.database_url)?;
            let table = table.unwrap_or_else(|| config.source.table.clone());

            let report = import_csv(&path, &db_path, &table, delimiter as u8, replace)
                .with_context(|| format!("Failed to import {:?}", path))?;

            println!("Import results:");
            println!("  Database: {}", db_path.display());
            println!("  Table: {}", table);
            println!("  Rows imported: {}", report.rows_written);
            println!("  Rows failed: {}", report.rows_failed);

            if !report.errors.is_empty() {
                println!();
                println!("Errors (first {}):", report.errors.len());
                for error in &report.errors {
                    println!("  {}", error);
                }
            }
        }

        Commands::Summary => {
            let ctx = load_context(&config)?;
            let layout = &ctx.layout;

            println!("Sales Summary");
            println!("=============");
            println!("Rows: {}", ctx.table.len());
            for card in &layout.cards {
                println!("{:<16} {:>16}", card.title, card.display);
            }
            if let Some(range) = &layout.date_range {
                println!("{:<16} {} .. {}", "Purchase dates", range.min, range.max);
            }
            println!("{:<16} {}", "Regions", layout.region_options.len() - 1);
            println!("{:<16} {}", "Brands", layout.brand_options.len() - 1);
        }

        Commands::Render {
            tab,
            filter,
            pretty,
        } => {
            let ctx = load_context(&config)?;
            let view = render(&ctx, &tab, &filter.to_filter()?)?;

            let json = if pretty {
                serde_json::to_string_pretty(&view)?
            } else {
                serde_json::to_string(&view)?
            };
            println!("{}", json);
        }

        Commands::Breakdown {
            by,
            measure,
            aggregation,
            top,
            filter,
        } => {
            let key: GroupKey = by.parse()?;
            let measure: Measure = measure.parse()?;
            let func = parse_aggregation(&aggregation)?;

            let ctx = load_context(&config)?;
            let rows: Vec<&SalesRecord> = filter.to_filter()?.apply(ctx.table.iter());

            let mut groups = group_by(&rows, &[key], measure, func);
            if let Some(n) = top {
                groups = top_n(groups, n);
            }

            println!("{:<30} {:>16} {:>8}", key.label(), format!("{}({})", func, measure.column()), "Rows");
            println!("{}", "-".repeat(56));
            for group in &groups {
                println!("{:<30} {:>16.2} {:>8}", group.label(), group.value, group.rows);
            }
            println!();
            println!("{} groups over {} rows", groups.len(), rows.len());
        }

        Commands::Tabs => {
            for tab in &TABS {
                println!("{} - {}", tab.id, tab.label);
                for chart in tab.charts {
                    println!("    [{:>2}] {}", chart.width, chart.title);
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();

            if let Some(path) = output {
                std::fs::write(&path, &content)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                println!("Config written to {:?}", path);
            } else {
                println!("{}", content);
            }
        }
    }

    Ok(())
}

fn load_context(config: &Config) -> anyhow::Result<DashboardContext> {
    DashboardContext::load(config).with_context(|| {
        format!(
            "Failed to load {} from {}",
            config.source.table, config.source.database_url
        )
    })
}

fn parse_aggregation(s: &str) -> anyhow::Result<AggregationFunc> {
    match s.to_lowercase().as_str() {
        "sum" => Ok(AggregationFunc::Sum),
        "avg" | "average" | "mean" => Ok(AggregationFunc::Avg),
        "min" => Ok(AggregationFunc::Min),
        "max" => Ok(AggregationFunc::Max),
        "count" => Ok(AggregationFunc::Count),
        other => bail!("Unknown aggregation: {}", other),
    }
}
