use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use unifi_timeline::analyzer::DatasetAnalyzer;
use unifi_timeline::classifier::Classifier;
use unifi_timeline::config;
use unifi_timeline::input;
use unifi_timeline::merge::MergeEngine;
use unifi_timeline::output::{self, TimelineDocument};
use unifi_timeline::ui;

#[derive(clap::Parser)]
#[command(
    name = "unifi-timeline",
    version,
    disable_version_flag = true,
    about = "Classify and merge UniFi release records into a timeline document"
)]
struct Args {
    #[arg(help = "JSON export of release records ('-' reads stdin)")]
    input: String,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Output file (overrides [output] in the config)")]
    output: Option<String>,

    #[arg(long, help = "Print a profile of the input records and exit")]
    analyze: bool,

    #[arg(long, help = "Process and summarize without writing the document")]
    dry_run: bool,

    #[arg(long, default_value = "info", help = "Log filter (RUST_LOG takes precedence)")]
    log_level: String,

    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Version,
        help = "Print version information"
    )]
    #[allow(dead_code)]
    version: Option<bool>,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&args.log_level);

    let input_path = args.input.as_str();

    // Load configuration
    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    if let Some(path) = args.output.as_deref() {
        apply_output_override(&mut config.output, path);
    }

    let classifier = Classifier::new(&config.taxonomy).context("invalid keyword table")?;

    let loaded = input::load_releases(input_path)
        .with_context(|| format!("failed to read releases from {}", input_path))?;
    for warning in &loaded.warnings {
        ui::display_record_warning(warning);
    }
    ui::display_status(&format!("Loaded {} release records", loaded.releases.len()));

    if args.analyze {
        let profile = DatasetAnalyzer::new(&classifier).analyze(&loaded.releases);
        ui::display_profile(&profile, &classifier);
        return Ok(());
    }

    let engine = MergeEngine::new(classifier, config.display, config.sources);
    let mut timeline = engine.process(&loaded.releases);
    for warning in &timeline.warnings {
        ui::display_record_warning(warning);
    }
    let mut warnings = loaded.warnings;
    warnings.append(&mut timeline.warnings);
    timeline.warnings = warnings;

    ui::display_timeline_summary(&timeline, engine.classifier());

    if args.dry_run {
        ui::display_status(&format!(
            "Dry run: would write {}",
            config.output.path().display()
        ));
        return Ok(());
    }

    let document = TimelineDocument::new(&timeline, engine.classifier());
    let path = output::write_document(&document, &config.output)
        .context("failed to write timeline document")?;
    ui::display_success(&format!("Timeline written to {}", path.display()));

    Ok(())
}

/// Split an `--output` path into the `[output]` directory and file name
fn apply_output_override(output: &mut config::OutputConfig, path: &str) {
    let path = std::path::Path::new(path);
    if let Some(file) = path.file_name() {
        output.file = file.to_string_lossy().into_owned();
    }
    output.dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
}
