use clap::{Parser, Subcommand};
use sales_report::config::Config;
use sales_report::logging;
use sales_report::runner::{self, ReportKind};
use std::path::PathBuf;

/// Builds a text report from a sales lead or commercial pipeline CSV export
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// YAML file overriding the default input and output paths
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Count leads by status
    Leads(ReportArgs),
    /// Summarize open, won and lost deal value
    Pipeline(ReportArgs),
}

#[derive(Debug, clap::Args)]
struct ReportArgs {
    /// CSV export to read
    input: Option<PathBuf>,

    /// Where to write the report
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    logging::init_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let (kind, args) = match cli.command {
        Command::Leads(args) => (ReportKind::Leads, args),
        Command::Pipeline(args) => (ReportKind::Pipeline, args),
    };
    let defaults = config.paths(kind);
    let input = args.input.unwrap_or_else(|| defaults.input.clone());
    let output = args.output.unwrap_or_else(|| defaults.output.clone());

    let now = chrono::Local::now().naive_local();
    let text = runner::run_report(kind, &input, &output, now)?;

    println!("Relatório gerado: {}", output.display());
    println!();
    println!("{}", text);

    Ok(())
}
