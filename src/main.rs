//! Rescore: Resume File Quality Analyzer CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::LevelFilter;
use rescore::analyzer::{AggregateStats, AnalysisEngine, FileReport};
use rescore::config::{build_ignore_set, is_ignored, load_config, Config, CONFIG_FILENAME};
use rescore::reporter::{ConsoleReporter, JsonReporter};
use rescore::upload::{ErrorResponse, UploadPolicy};
use rescore::watcher::ResumeWatcher;
use rescore::{FileMetadata, Status};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

/// Rescore: score resume uploads by file name, size and type
#[derive(Parser, Debug)]
#[command(name = "rescore")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Resume file or directory to analyze (omit when using a subcommand)
    #[arg(required = true)]
    path: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Minimum score threshold (exit 1 if below)
    #[arg(long, short)]
    threshold: Option<u8>,

    /// Exit 1 if any file is at or below this status (red, yellow)
    #[arg(long, value_name = "STATUS")]
    fail_on: Option<Status>,

    /// Declared media type, instead of inferring it from the extension
    #[arg(long = "type", value_name = "MEDIA_TYPE")]
    media_type: Option<String>,

    /// Quiet mode (minimal output)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (score breakdown and debug logging)
    #[arg(long, short)]
    verbose: bool,

    /// Path to config file (default: search .rescorerc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Watch for file changes and re-analyze
    #[arg(long)]
    watch: bool,

    /// Run analysis in parallel (default for directories with many files)
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run MCP server (stdio JSON-RPC)
    Mcp {
        /// Path to config file (default: search .rescorerc.json in current dir and parents)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create .rescorerc.json with sensible defaults
    Init {
        /// Minimum score threshold (e.g. 60)
        #[arg(long)]
        threshold: Option<u8>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Analyze upload metadata without a file on disk
    Check {
        /// File name as uploaded
        #[arg(long)]
        name: String,

        /// Size in bytes
        #[arg(long)]
        size: u64,

        /// Declared media type (default: inferred from the name)
        #[arg(long = "type", value_name = "MEDIA_TYPE")]
        media_type: Option<String>,

        /// Output format as JSON
        #[arg(long, short)]
        json: bool,

        /// Path to config file (default: search .rescorerc.json in current dir and parents)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Some(cmd) = args.command {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        return match cmd {
            Commands::Mcp { config } => {
                let config = load_config(&cwd, config.as_deref())?;
                rescore::mcp::run_mcp_server(&config.upload_policy())?;
                Ok(ExitCode::SUCCESS)
            }
            Commands::Init { threshold, dir } => run_init(threshold, dir.as_deref().unwrap_or(&cwd)),
            Commands::Check {
                name,
                size,
                media_type,
                json,
                config,
            } => {
                let config = load_config(&cwd, config.as_deref())?;
                run_check(&name, size, media_type.as_deref(), json, &config.upload_policy())
            }
        };
    }

    let path = args
        .path
        .clone()
        .context("A path is required when no subcommand is given")?;

    // Resolve work directory for config search
    let work_dir = if path.is_file() {
        path.parent().unwrap_or(Path::new("."))
    } else {
        path.as_path()
    };

    // Load config (CLI flags override config file)
    let config = load_config(work_dir, args.config.as_deref())?
        .merge_with_cli(args.threshold, args.fail_on);

    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    let engine = AnalysisEngine::new().with_policy(config.upload_policy());

    if args.watch {
        return run_watch(&args, &path, &engine, &config, ignore_set.as_ref());
    }

    let patterns = config.get_file_patterns();
    let files = collect_resume_files(&path, ignore_set.as_ref(), &patterns)?;

    if files.is_empty() {
        eprintln!("{}: No resume files found", "Warning".yellow());
        return Ok(ExitCode::from(2));
    }

    if let Some(jobs) = args.jobs {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
        {
            log::warn!("Could not configure {} worker threads: {}", jobs, e);
        }
    }

    let use_parallel = args.parallel || files.len() > 10;
    let outcomes = if path.is_file() {
        vec![engine.analyze_path(&files[0], args.media_type.as_deref())]
    } else if use_parallel {
        engine.analyze_parallel(&files)
    } else {
        engine.analyze_many(&files)
    };

    let mut reports = Vec::with_capacity(outcomes.len());
    let mut had_errors = false;
    for (file, outcome) in files.iter().zip(outcomes) {
        match outcome {
            Ok(report) => reports.push(report),
            Err(e) => {
                if !args.quiet {
                    eprintln!(
                        "{}: Failed to analyze {}: {:#}",
                        "Error".red(),
                        file.display(),
                        e
                    );
                }
                had_errors = true;
            }
        }
    }

    if reports.is_empty() {
        eprintln!("{}: All files failed to analyze", "Error".red());
        return Ok(ExitCode::from(2));
    }

    let stats = AnalysisEngine::aggregate_stats(&reports);
    print_reports(&args, &reports, &stats);

    if had_errors || stats.rejected > 0 {
        return Ok(ExitCode::from(2));
    }

    Ok(gate(&config, &reports, &stats, args.quiet || args.json))
}

fn print_reports(args: &Args, reports: &[FileReport], stats: &AggregateStats) {
    if args.json {
        let reporter = JsonReporter::new().pretty();
        if reports.len() == 1 {
            println!("{}", reporter.report(&reports[0]));
        } else {
            println!("{}", reporter.report_with_summary(reports, stats));
        }
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        for report in reports {
            reporter.report_quiet(report);
        }
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }

        if reports.len() == 1 {
            reporter.report(&reports[0]);
        } else {
            reporter.report_many(reports, stats);
        }
    }
}

/// Threshold and fail-on checks; exit 1 when either trips
fn gate(config: &Config, reports: &[FileReport], stats: &AggregateStats, silent: bool) -> ExitCode {
    if let Some(threshold) = config.threshold {
        let score = match reports {
            [single] => single.response().map(|r| r.result.score).unwrap_or(0),
            _ => stats.average_score,
        };

        if score < threshold {
            if !silent {
                eprintln!(
                    "\n{}: Score {} is below threshold {}",
                    "Failed".red().bold(),
                    score,
                    threshold
                );
            }
            return ExitCode::from(1);
        }
    }

    if let (Some(fail_on), Some(worst)) = (config.fail_on, stats.worst_status) {
        if worst <= fail_on {
            if !silent {
                eprintln!(
                    "\n{}: At least one resume is {} (fail-on {})",
                    "Failed".red().bold(),
                    worst,
                    fail_on
                );
            }
            return ExitCode::from(1);
        }
    }

    ExitCode::SUCCESS
}

fn run_check(
    name: &str,
    size: u64,
    media_type: Option<&str>,
    json: bool,
    policy: &UploadPolicy,
) -> Result<ExitCode> {
    let media_type = media_type
        .map(str::to_string)
        .unwrap_or_else(|| rescore::upload::media_type_for_path(Path::new(name)).to_string());
    let metadata = FileMetadata::new(name, size, media_type);
    let engine = AnalysisEngine::new().with_policy(policy.clone());

    match engine.analyze_upload(Some(&metadata)) {
        Ok(response) => {
            if json {
                println!("{}", JsonReporter::new().pretty().report(&response));
            } else {
                ConsoleReporter::new().report_result(&metadata, &response.result);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let body = ErrorResponse::from(&err);
            if json {
                println!("{}", JsonReporter::new().pretty().report(&body));
            } else {
                ConsoleReporter::new().report_rejection(Path::new(name), &body);
            }
            Ok(ExitCode::from(2))
        }
    }
}

fn run_init(threshold: Option<u8>, dir: &Path) -> Result<ExitCode> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let threshold_value = threshold.unwrap_or(60);
    let policy = UploadPolicy::default();
    let config = serde_json::json!({
        "threshold": threshold_value,
        "failOn": "red",
        "ignore": ["**/archive/**", "**/~$*"],
        "filePatterns": [".pdf", ".doc", ".docx"],
        "upload": {
            "maxFileSize": policy.max_file_size,
            "minFileSize": policy.min_file_size
        }
    });
    let json = serde_json::to_string_pretty(&config)?;

    std::fs::write(&config_path, format!("{}\n", json))
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    println!(
        "{}: Created {} with threshold={}",
        "Done".green().bold(),
        config_path.display(),
        threshold_value
    );
    Ok(ExitCode::SUCCESS)
}

fn run_watch(
    args: &Args,
    path: &Path,
    engine: &AnalysisEngine,
    config: &Config,
    ignore_set: Option<&globset::GlobSet>,
) -> Result<ExitCode> {
    let patterns = config.get_file_patterns();
    let watcher = ResumeWatcher::watch(path, &patterns).context("Failed to create file watcher")?;
    eprintln!("{}: Watching for changes... (Ctrl+C to stop)", "Info".blue());

    let reporter = if args.verbose {
        ConsoleReporter::new().verbose()
    } else {
        ConsoleReporter::new()
    };

    loop {
        let changed = watcher.next_changes();
        for file in changed {
            if ignore_set.map(|set| is_ignored(&file, set)).unwrap_or(false) {
                continue;
            }
            match engine.analyze_path(&file, None) {
                Ok(report) if args.json => println!("{}", JsonReporter::new().report(&report)),
                Ok(report) if args.quiet => reporter.report_quiet(&report),
                Ok(report) => reporter.report(&report),
                // Files are often gone again by the time the batch is drained
                Err(e) => log::debug!("Skipping {}: {:#}", file.display(), e),
            }
        }
    }
}

fn collect_resume_files(
    path: &Path,
    ignore_set: Option<&globset::GlobSet>,
    patterns: &[&str],
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if let Some(set) = ignore_set {
            if is_ignored(path, set) {
                return Ok(vec![]);
            }
        }
        // An explicitly named file is always analyzed, whatever its extension
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let file_path = entry.path();
        if !ResumeWatcher::is_resume_file(file_path, patterns) {
            continue;
        }
        if let Some(set) = ignore_set {
            if is_ignored(file_path, set) {
                continue;
            }
        }
        files.push(file_path.to_path_buf());
    }

    // Sort for consistent output
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PATTERNS: [&str; 3] = [".pdf", ".doc", ".docx"];

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, b"x").unwrap();
        path
    }

    #[test]
    fn test_collect_resume_files_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b_resume.pdf");
        touch(dir.path(), "a/cv.docx");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "~$cv.docx");

        let files = collect_resume_files(dir.path(), None, &PATTERNS).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["a/cv.docx", "b_resume.pdf"]);
    }

    #[test]
    fn test_collect_resume_files_respects_ignore() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "resume.pdf");
        touch(dir.path(), "archive/old_resume.pdf");

        let set = build_ignore_set(&["**/archive/**".to_string()]).unwrap();
        let files = collect_resume_files(dir.path(), Some(&set), &PATTERNS).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("resume.pdf"));
    }

    #[test]
    fn test_collect_single_file_ignores_extension_filter() {
        let dir = TempDir::new().unwrap();
        let file = touch(dir.path(), "doc1.txt");
        let files = collect_resume_files(&file, None, &PATTERNS).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_collect_missing_path_errors() {
        assert!(collect_resume_files(Path::new("/nonexistent/dir"), None, &PATTERNS).is_err());
    }

    #[test]
    fn test_custom_patterns() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "resume.pdf");
        touch(dir.path(), "resume.docx");
        let files = collect_resume_files(dir.path(), None, &[".pdf"]).unwrap();
        assert_eq!(files.len(), 1);
    }
}
