use clap::{ArgAction, Parser};
use ottocollect_core::*;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

mod errors;
mod operations;
mod state;
mod ui;

use operations::{collect_selection, parse_sort_flags, parse_sultan_order, FileOperations};
use state::AppState;
use ui::{render_report, set_status, show_error, show_warnings, ReportOptions, StatusLevel};

/// OttoCollect catalog browser - filter, sort and group banknote collections
///
/// Examples:
///   # Group the whole catalog by category
///   ottocollect catalog.json
///
///   # Only specimens, by pick number
///   ottocollect catalog.json --type specimens --sort extPick
///
///   # Group by sultan inside each category, with an explicit reign order
///   ottocollect catalog.json --sort sultan,extPick --sultan-order "Abdulmecid=0" --sultan-order "Abdulaziz=1"
///
///   # Search, then export the matches
///   ottocollect catalog.json --search kaime --export kaime.json
#[derive(Parser, Debug)]
#[command(name = "ottocollect")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Filtering Logic:\n  \
    - Values of one flag are combined with OR (repeat the flag or separate with commas)\n  \
    - Different flags are combined with AND\n  \
    - Categories and countries match by slug (abdul-hamid-ii) or by name\n  \
    - Types match by canonical type (issued notes, specimens, ...)\n\n\
Sort Rules (first rule wins, later rules break ties):\n  \
    sultan, faceValue, extPick, newest, oldest, priceHighToLow, priceLowToHigh, country\n\n\
Grouping:\n  \
    - Results are grouped by series in catalog order\n  \
    - Sorting by sultan adds sultan sub-groups")]
struct Cli {
    /// Path to the catalog JSON file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Case-insensitive text to look for in any banknote field
    #[arg(short, long, value_name = "TEXT", default_value = "")]
    search: String,

    /// Filter by category (series) slug or name
    #[arg(short, long = "category", value_name = "ID")]
    categories: Vec<String>,

    /// Filter by banknote type
    #[arg(short, long = "type", value_name = "TYPE")]
    types: Vec<String>,

    /// Filter by country slug or name
    #[arg(short = 'C', long = "country", value_name = "ID")]
    countries: Vec<String>,

    /// Sort rule, primary first (can be repeated)
    #[arg(short = 'S', long = "sort", value_name = "RULE")]
    sort: Vec<String>,

    /// Sultan display rank for sultan sub-groups (format: name=rank)
    #[arg(long = "sultan-order", value_name = "NAME=RANK")]
    sultan_order: Vec<String>,

    /// List matches in sort order instead of grouping by category
    #[arg(long)]
    flat: bool,

    /// Show category and type facets with counts
    #[arg(long)]
    facets: bool,

    /// Write the matching entries to a new catalog file
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (update, sultan_order) = parse_inputs(&cli).unwrap_or_else(|err| {
        show_error("Invalid Arguments", err.to_string(), "");
        process::exit(2);
    });

    let mut state = AppState::new();
    if !FileOperations::new(&mut state).load_file(&cli.file) {
        process::exit(1);
    }

    if let Some(view) = state.view.as_ref() {
        if let Err(warnings) = validate_collection(view.items()) {
            show_warnings("Catalog warnings:", &warnings);
        }
    }

    state.merge_sultan_order(sultan_order);
    state.apply_filters(update);

    let Some(view) = state.view.as_ref() else {
        process::exit(1);
    };

    let options = ReportOptions {
        flat: cli.flat,
        facets: cli.facets,
    };
    match render_report(&state.get_heading(), view, options) {
        Ok(report) => print!("{}", report),
        Err(err) => {
            show_error("Report Error", "Failed to render the report.", err.to_string());
            process::exit(1);
        }
    }

    if let Some(path) = &cli.export {
        if !FileOperations::new(&mut state).export(path) {
            process::exit(1);
        }
    }

    set_status(
        format!(
            "{} of {} entries match",
            view_len(&state, |v| v.filtered_items().len()),
            view_len(&state, |v| v.items().len())
        ),
        StatusLevel::Info,
    );
}

fn parse_inputs(cli: &Cli) -> Result<(FilterUpdate, SultanOrderMap), operations::ValidationError> {
    let update = FilterUpdate {
        search: Some(cli.search.clone()),
        categories: Some(collect_selection(&cli.categories)),
        types: Some(collect_selection(&cli.types)),
        countries: Some(collect_selection(&cli.countries)),
        sort: Some(parse_sort_flags(&cli.sort)?),
    };
    let sultan_order = parse_sultan_order(&cli.sultan_order)?;

    Ok((update, sultan_order))
}

fn view_len(state: &AppState, f: impl Fn(&CollectionView<CatalogEntry>) -> usize) -> usize {
    state.view.as_ref().map(f).unwrap_or(0)
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
