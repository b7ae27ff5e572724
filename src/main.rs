use clap::{Args, Parser, Subcommand};
use colored::{ColoredString, Colorize};
use eyre::{Result, eyre};
use resourcestore::config::Config;
use resourcestore::models::sample_inventory;
use resourcestore::{
    QueryParams, Resource, ResourceStatus, ResourceStore, SortDirection, SortField, jsonl, query, stats,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "resourcestore")]
#[command(about = "ResourceStore CLI - Search, filter and page through a travel operations inventory")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// JSONL file to load resources from (default: config data_file, else the sample inventory)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Path to a YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct QueryArgs {
    /// Case-insensitive text matched against name and type
    #[arg(short, long)]
    search: Option<String>,

    /// Exact resource type (e.g. Vehicle, Equipment)
    #[arg(short = 't', long = "type")]
    resource_type: Option<String>,

    /// available, maintenance or unavailable
    #[arg(long)]
    status: Option<ResourceStatus>,

    /// Attribute to sort by (name, type, totalQuantity, availableQuantity, status, lastUpdated, id)
    #[arg(long)]
    sort: Option<SortField>,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Minimum available quantity
    #[arg(long)]
    min_quantity: Option<u32>,

    /// Maximum available quantity
    #[arg(long)]
    max_quantity: Option<u32>,
}

impl QueryArgs {
    fn to_params(&self) -> QueryParams {
        QueryParams {
            search: self.search.clone(),
            resource_type: self.resource_type.clone(),
            status: self.status,
            sort_field: self.sort,
            sort_direction: if self.desc { SortDirection::Desc } else { SortDirection::Asc },
            min_quantity: self.min_quantity,
            max_quantity: self.max_quantity,
            ..Default::default()
        }
    }
}

#[derive(Args)]
struct MovementArgs {
    id: String,

    /// Units to move
    quantity: u32,

    /// Who is moving the stock
    #[arg(short, long)]
    user: Option<String>,

    /// Write the store back to the data file afterwards
    #[arg(long)]
    save: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of matching resources
    List {
        #[command(flatten)]
        query: QueryArgs,

        /// Page number, starting at 1
        #[arg(short, long)]
        page: Option<usize>,

        /// Page size (default: config default_limit)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single resource
    Get { id: String },

    /// Stock totals per resource type
    Stats,

    /// Resources running low on available stock
    Alerts {
        /// Alert below this many available units (default: config low_stock_threshold)
        #[arg(long)]
        threshold: Option<u32>,
    },

    /// Write every matching resource to a JSONL file
    Export {
        output: PathBuf,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Take units of a resource out of stock
    CheckOut(MovementArgs),

    /// Return units of a resource to stock
    CheckIn(MovementArgs),
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let store = load_store(&cli, &config)?;

    match cli.command {
        Commands::List {
            query: args,
            page,
            limit,
            json,
        } => {
            let mut params = args.to_params();
            params.page = page;
            params.limit = Some(limit.unwrap_or(config.default_limit));

            let result = store.query(&params);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_table(&result.items);
                println!(
                    "\nPage {} of {} ({} matching)",
                    result.page,
                    result.page_count().max(1),
                    result.total
                );
            }
        }
        Commands::Get { id } => {
            let resource = store.get_by_id(&id)?;
            println!("{}", serde_json::to_string_pretty(&resource)?);
        }
        Commands::Stats => {
            println!("{:<16} {:>8} {:>8} {:>10} {:>8}", "TYPE".bold(), "RECORDS", "TOTAL", "AVAILABLE", "IN USE");
            for summary in stats::summarize(&store.snapshot()) {
                println!(
                    "{:<16} {:>8} {:>8} {:>10} {:>8}",
                    summary.name, summary.records, summary.total, summary.available, summary.in_use
                );
            }
        }
        Commands::Alerts { threshold } => {
            let threshold = threshold.unwrap_or(config.low_stock_threshold);
            let alerts = stats::low_stock(&store.snapshot(), threshold);
            if alerts.is_empty() {
                println!("No resources below {} available units", threshold);
            }
            for alert in alerts {
                println!(
                    "{} {} ({} available, threshold {})",
                    "LOW".red().bold(),
                    alert.item,
                    alert.current,
                    alert.threshold
                );
            }
        }
        Commands::Export { output, query: args } => {
            let records = query::all_matches(&store.snapshot(), &args.to_params());
            jsonl::write_jsonl(&output, &records)?;
            println!("Exported {} resources to {}", records.len(), output.display());
        }
        Commands::CheckOut(ref args) => {
            let resource = store.check_out(&args.id, args.quantity, args.user.as_deref())?;
            finish_movement(&cli, &config, &store, &resource, args.save)?;
        }
        Commands::CheckIn(ref args) => {
            let resource = store.check_in(&args.id, args.quantity, args.user.as_deref())?;
            finish_movement(&cli, &config, &store, &resource, args.save)?;
        }
    }

    Ok(())
}

fn load_store(cli: &Cli, config: &Config) -> Result<ResourceStore> {
    let options = config.store_options();

    match cli.data.as_ref().or(config.data_file.as_ref()) {
        Some(path) => {
            if !path.exists() {
                return Err(eyre!("Data file not found: {}", path.display()));
            }
            let records: Vec<Resource> = jsonl::read_jsonl_latest(path)?;
            Ok(ResourceStore::from_records(records, options)?)
        }
        None => {
            let store = ResourceStore::with_options(options);
            for draft in sample_inventory() {
                store.add(draft)?;
            }
            Ok(store)
        }
    }
}

fn finish_movement(cli: &Cli, config: &Config, store: &ResourceStore, resource: &Resource, save: bool) -> Result<()> {
    println!(
        "{}: {}/{} available",
        resource.name.bold(),
        resource.available_quantity,
        resource.total_quantity
    );
    for activity in store.recent_activities(config.activity_log_size) {
        println!(
            "  {} {:<9} x{:<4} {} by {}",
            activity.time.format("%Y-%m-%d %H:%M:%S"),
            activity.kind.to_string().cyan(),
            activity.quantity,
            activity.item,
            activity.user.as_deref().unwrap_or("-")
        );
    }

    if save {
        let path = cli
            .data
            .as_ref()
            .or(config.data_file.as_ref())
            .ok_or_else(|| eyre!("--save needs a data file (--data or config data_file)"))?;
        jsonl::write_jsonl(path, store.snapshot().records())?;
        println!("Saved {} resources to {}", store.len(), path.display());
    }
    Ok(())
}

fn print_table(items: &[Resource]) {
    println!(
        "{:<38} {:<24} {:<12} {:>9} {:<12}",
        "ID".bold(),
        "NAME".bold(),
        "TYPE".bold(),
        "AVAILABLE".bold(),
        "STATUS".bold()
    );
    for r in items {
        println!(
            "{:<38} {:<24} {:<12} {:>9} {:<12}",
            r.id,
            r.name,
            r.resource_type,
            format!("{}/{}", r.available_quantity, r.total_quantity),
            status_label(r.status)
        );
    }
}

fn status_label(status: ResourceStatus) -> ColoredString {
    match status {
        ResourceStatus::Available => status.as_str().green(),
        ResourceStatus::Maintenance => status.as_str().yellow(),
        ResourceStatus::Unavailable => status.as_str().red(),
    }
}
