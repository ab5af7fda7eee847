use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use holocron::app::{App, RunSummary};
use holocron::config::ConfigLoader;
use holocron::error::HolocronError;
use holocron::fetch::{FetchSource, HttpClient};
use holocron::store::Store;

#[derive(Parser)]
#[command(name = "holocron")]
#[command(about = "Archive the Star Wars API: fetch every collection, cache it, export one merged JSON universe")]
#[command(version, author)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Fetch all collections and write the merged export (default)")]
    Fetch(FetchArgs),
    #[command(about = "Remove the local cache")]
    Clear(ClearArgs),
}

#[derive(Args, Default)]
struct FetchArgs {
    #[arg(long)]
    api_root: Option<String>,

    #[arg(long)]
    cache_dir: Option<String>,

    #[arg(long)]
    output: Option<String>,
}

#[derive(Args, Default)]
struct ClearArgs {
    #[arg(long)]
    cache_dir: Option<String>,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<HolocronError>() {
            return ExitCode::from(map_exit_code(err));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &HolocronError) -> u8 {
    match error {
        HolocronError::ConfigRead(_)
        | HolocronError::ConfigParse(_)
        | HolocronError::MissingStartUrl(_) => 2,
        HolocronError::Http(_) | HolocronError::Status { .. } => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Fetch(FetchArgs::default())) {
        Commands::Fetch(args) => run_fetch(args, cli.config.as_deref()),
        Commands::Clear(args) => run_clear(args, cli.config.as_deref()),
    }
}

fn run_fetch(args: FetchArgs, config: Option<&str>) -> miette::Result<()> {
    let mut resolved = ConfigLoader::resolve(config).into_diagnostic()?;
    if let Some(api_root) = args.api_root {
        resolved.api_root = api_root;
    }
    if let Some(cache_dir) = args.cache_dir {
        resolved.cache_dir = cache_dir.into();
    }
    if let Some(output) = args.output {
        resolved.output = output.into();
    }

    let store = Store::with_root(resolved.cache_dir.clone());
    let client = HttpClient::new().into_diagnostic()?;
    let app = App::new(client, store);

    let summary = app
        .run(&resolved.api_root, &resolved.output)
        .into_diagnostic()?;
    print_summary(&summary);
    Ok(())
}

fn run_clear(args: ClearArgs, config: Option<&str>) -> miette::Result<()> {
    let mut resolved = ConfigLoader::resolve(config).into_diagnostic()?;
    if let Some(cache_dir) = args.cache_dir {
        resolved.cache_dir = cache_dir.into();
    }

    let store = Store::with_root(resolved.cache_dir.clone());
    store.clear().into_diagnostic()?;
    println!("cleared cache at {}", resolved.cache_dir);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    let green = "\x1b[32m";
    let cyan = "\x1b[36m";
    let reset = "\x1b[0m";

    for item in &summary.items {
        let color = match item.source {
            FetchSource::Cache => green,
            FetchSource::Network => cyan,
        };
        println!(
            "{color}{}: {} records ({}){reset}",
            item.kind,
            item.records,
            item.source.as_str()
        );
    }
    println!("{green}wrote {}{reset}", summary.output_path);
}
