use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use portmap_protocol::StatusCounts;
use portmap_report::{render_gap_section, render_matrix, upsert_section, write_document, MergeOutcome};
use portmap_scanner::{find_placeholders, PlaceholderHit};
use serde::Serialize;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

mod config;
mod workspace;

pub use config::{ProjectConfig, CONFIG_FILE_NAME};
pub use workspace::Workspace;

/// Placeholder hits printed before the rest are summarised.
const CHECK_PRINT_LIMIT: usize = 200;

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    print_stdout(&serde_json::to_string_pretty(value)?)
}

#[derive(Parser)]
#[command(name = "portmap")]
#[command(about = "Track and scaffold a Java to Cangjie API port", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project directory of the port (defaults to current directory)
    #[arg(long, global = true)]
    project_root: Option<PathBuf>,

    /// Configuration file (defaults to <project-root>/portmap.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Source tree to extract declarations from (overrides [source].root)
    #[arg(long, global = true)]
    source_root: Option<PathBuf>,

    /// Target source tree (overrides [target].src_dir)
    #[arg(long, global = true)]
    target_root: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write placeholder skeletons for source declarations with no target type
    Scaffold(ScaffoldArgs),

    /// Regenerate the migration matrix and the gap section of the gap report
    Refresh(RefreshArgs),

    /// Fail when any target file still carries the placeholder marker
    Check(CheckArgs),

    /// Rewrite package lines so they follow the directory layout
    Repackage(RepackageArgs),
}

#[derive(Args)]
struct ScaffoldArgs {
    /// List the files that would be written without touching the tree
    #[arg(long)]
    dry_run: bool,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct RefreshArgs {
    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CheckArgs {
    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct RepackageArgs {
    /// Directory whose files are repackaged
    dir: PathBuf,

    /// Package of `dir` itself; sub-directories append their names
    #[arg(long)]
    prefix: String,

    /// Report the files that would change without writing them
    #[arg(long)]
    dry_run: bool,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ScaffoldOutput {
    sources: usize,
    targets: usize,
    already_ported: usize,
    created: Vec<PathBuf>,
    existing: Vec<PathBuf>,
    dry_run: bool,
}

#[derive(Serialize)]
struct RefreshOutput {
    sources: usize,
    targets: usize,
    counts: StatusCounts,
    matrix_path: PathBuf,
    gap_report_path: PathBuf,
    gap_section: &'static str,
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    marker: &'a str,
    total: usize,
    hits: &'a [PlaceholderHit],
}

pub fn main_entry() -> Result<ExitCode> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON parsing.
    let json_output = match &cli.command {
        Commands::Scaffold(args) => args.json,
        Commands::Refresh(args) => args.json,
        Commands::Check(args) => args.json,
        Commands::Repackage(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let project_root = match cli.project_root.take() {
        Some(root) => root,
        None => env::current_dir().context("Failed to resolve current directory")?,
    };
    let config = ProjectConfig::discover(&project_root, cli.config.as_deref())?;
    let ws = Workspace::new(project_root, config, cli.source_root, cli.target_root);

    match cli.command {
        Commands::Scaffold(args) => run_scaffold(&ws, args),
        Commands::Refresh(args) => run_refresh(&ws, args),
        Commands::Check(args) => run_check(&ws, args),
        Commands::Repackage(args) => run_repackage(&ws, args),
    }
}

fn run_scaffold(ws: &Workspace, args: ScaffoldArgs) -> Result<ExitCode> {
    let sources = ws.sources()?;
    let inventory = ws.inventory()?;
    let synth = ws.synthesizer();

    let output = if args.dry_run {
        let (planned, already_ported) = synth.plan(&sources, &inventory, &ws.target_root);
        let (existing, created): (Vec<_>, Vec<_>) =
            planned.into_iter().map(|stub| stub.path).partition(|path| path.exists());
        ScaffoldOutput {
            sources: sources.len(),
            targets: inventory.len(),
            already_ported,
            created,
            existing,
            dry_run: true,
        }
    } else {
        let report = synth
            .synthesize(&sources, &inventory, &ws.target_root)
            .context("Failed to write skeletons")?;
        ScaffoldOutput {
            sources: sources.len(),
            targets: inventory.len(),
            already_ported: report.already_ported,
            created: report.created,
            existing: report.existing,
            dry_run: false,
        }
    };

    if args.json {
        print_json(&output)?;
        return Ok(ExitCode::SUCCESS);
    }

    let verb = if output.dry_run { "Would create" } else { "Created" };
    for path in &output.created {
        print_stdout(&format!("{verb} {}", ws.display_path(path).display()))?;
    }
    print_stdout(&format!(
        "{verb} {} files ({} already on disk, {} of {} declarations already ported)",
        output.created.len(),
        output.existing.len(),
        output.already_ported,
        output.sources
    ))?;
    Ok(ExitCode::SUCCESS)
}

fn run_refresh(ws: &Workspace, args: RefreshArgs) -> Result<ExitCode> {
    let sources = ws.sources()?;
    let inventory = ws.inventory()?;
    let assessments = ws.assess(&sources, &inventory);
    let report_cfg = &ws.config.report;

    let matrix_path = ws.project_path(&report_cfg.matrix_path);
    let matrix = render_matrix(&assessments, report_cfg, &ws.config.source.root_package);
    write_document(&matrix_path, &matrix).context("Failed to write migration matrix")?;

    let gap_path = ws.project_path(&report_cfg.gap_report_path);
    let section = render_gap_section(&assessments, report_cfg);
    let outcome = upsert_section(
        &gap_path,
        &section,
        &report_cfg.begin_marker,
        &report_cfg.end_marker,
    )
    .context("Failed to update gap report")?;

    let output = RefreshOutput {
        sources: sources.len(),
        targets: inventory.len(),
        counts: StatusCounts::tally(assessments.iter().map(|a| &a.status)),
        matrix_path,
        gap_report_path: gap_path,
        gap_section: match outcome {
            MergeOutcome::Replaced => "replaced",
            MergeOutcome::Appended => "appended",
            MergeOutcome::Unchanged => "unchanged",
        },
    };

    if args.json {
        print_json(&output)?;
        return Ok(ExitCode::SUCCESS);
    }

    print_stdout(&format!(
        "Wrote {}",
        ws.display_path(&output.matrix_path).display()
    ))?;
    print_stdout(&format!(
        "Gap section {} in {}",
        output.gap_section,
        ws.display_path(&output.gap_report_path).display()
    ))?;
    print_stdout(&format!(
        "{} declarations: ✅ {} 🟡 {} ⚠️ {} ⛔ {}",
        output.counts.total(),
        output.counts.implemented,
        output.counts.planned,
        output.counts.subset,
        output.counts.unsupported
    ))?;
    Ok(ExitCode::SUCCESS)
}

fn run_check(ws: &Workspace, args: CheckArgs) -> Result<ExitCode> {
    let marker = ws.config.classify.placeholder_marker.as_str();
    let hits = find_placeholders(&ws.target_root, &ws.config.target, marker)
        .with_context(|| format!("Failed to scan {}", ws.target_root.display()))?;
    let code = if hits.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    };

    if args.json {
        print_json(&CheckOutput {
            marker,
            total: hits.len(),
            hits: &hits,
        })?;
        return Ok(code);
    }
    if hits.is_empty() {
        return Ok(code);
    }

    print_stdout(&format!(
        "Found {} placeholder marker lines containing: {marker:?}",
        hits.len()
    ))?;
    for hit in hits.iter().take(CHECK_PRINT_LIMIT) {
        print_stdout(&format!(
            "{}:{}: {}",
            ws.display_path(&hit.path).display(),
            hit.line_no,
            hit.line
        ))?;
    }
    if hits.len() > CHECK_PRINT_LIMIT {
        print_stdout(&format!("... ({} more)", hits.len() - CHECK_PRINT_LIMIT))?;
    }
    Ok(code)
}

fn run_repackage(ws: &Workspace, args: RepackageArgs) -> Result<ExitCode> {
    let dir = ws.project_path(&args.dir);
    let report = portmap_synth::repackage_tree(
        &dir,
        &args.prefix,
        &ws.config.target.extension,
        args.dry_run,
    )
    .with_context(|| format!("Failed to repackage {}", dir.display()))?;

    if args.json {
        print_json(&report)?;
    } else {
        let verb = if args.dry_run { "Would update" } else { "Updated" };
        for path in &report.updated {
            print_stdout(&format!("{verb} {}", ws.display_path(path).display()))?;
        }
        print_stdout(&format!(
            "{verb} {} files ({} already correct, {} failed)",
            report.updated.len(),
            report.unchanged,
            report.failed
        ))?;
    }

    if report.failed > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
