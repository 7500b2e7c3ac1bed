//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::Result;
use competency_core::pipeline::{ConvertSummary, ConvertTarget, ProgressReporter, WrittenFile};
use competency_shared::config::CONFIG_FILE_NAME;
use competency_shared::{
    ConvertConfig, LabelGroup, LabelSelection, Language, init_config, init_config_at, load_config,
    resolve_config_path,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Competency dataset converter: extract translation and classification sub-datasets.
#[derive(Parser)]
#[command(
    name = "competency-converter",
    version,
    about = "Extract transformation and classification sub-datasets from the competency dataset.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Config file (defaults to ./competency-converter.toml, then ~/.competency-converter/).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config_path: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Defaults to `run` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Write both the transformation and the classification dataset.
    Run(PipelineArgs),

    /// Write only the transformation dataset.
    Transform(PipelineArgs),

    /// Write only the classification dataset.
    Classify(PipelineArgs),

    /// Show the label groups and their id ranges.
    Groups,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Flags overriding the config file for a conversion run.
#[derive(Args, Debug, Default)]
pub(crate) struct PipelineArgs {
    /// Raw competency dataset (JSON).
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output file for the transformation pairs.
    #[arg(long, value_name = "PATH")]
    pub transform_out: Option<PathBuf>,

    /// Output file for the classification pairs.
    #[arg(long, value_name = "PATH")]
    pub classify_out: Option<PathBuf>,

    /// Label groups to keep, comma-separated (non_op,process,knowledge,inductive,non_cog).
    #[arg(short = 'l', long, value_name = "GROUPS")]
    pub include_labels: Option<String>,

    /// Sentence language: EN for English, anything else for German.
    #[arg(long)]
    pub lang: Option<String>,

    /// Accept a dataset without a top-level `label_lookup` entry.
    #[arg(long)]
    pub allow_missing_lookup: bool,
}

impl PipelineArgs {
    /// Overlay these flags on a config-derived runtime config.
    fn apply(self, mut config: ConvertConfig) -> Result<ConvertConfig> {
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(path) = self.transform_out {
            config.transformation_output = path;
        }
        if let Some(path) = self.classify_out {
            config.classification_output = path;
        }
        if let Some(list) = self.include_labels {
            config.include_labels = LabelSelection::parse_list(&list)?;
        }
        if let Some(lang) = self.lang {
            config.lang = Language::from(lang.as_str());
        }
        if self.allow_missing_lookup {
            config.require_label_lookup = false;
        }
        Ok(config)
    }
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a config file with defaults.
    Init {
        /// Write to the working directory instead of the home directory.
        #[arg(long)]
        local: bool,
    },
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "competency=info",
        1 => "competency=debug",
        _ => "competency=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_path;
    let command = cli
        .command
        .unwrap_or_else(|| Command::Run(PipelineArgs::default()));

    match command {
        Command::Run(args) => cmd_convert(config_path.as_deref(), args, ConvertTarget::All),
        Command::Transform(args) => {
            cmd_convert(config_path.as_deref(), args, ConvertTarget::Transformation)
        }
        Command::Classify(args) => {
            cmd_convert(config_path.as_deref(), args, ConvertTarget::Classification)
        }
        Command::Groups => cmd_groups(),
        Command::Config { action } => match action {
            ConfigAction::Init { local } => cmd_config_init(local),
            ConfigAction::Show => cmd_config_show(config_path.as_deref()),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_convert(config_path: Option<&Path>, args: PipelineArgs, target: ConvertTarget) -> Result<()> {
    let app_config = load_config(config_path)?;
    let config = args.apply(ConvertConfig::from(&app_config))?;

    if config.include_labels.is_empty() {
        warn!("no label groups selected, the classification dataset will be empty");
    }

    info!(
        input = %config.input.display(),
        view = ?target,
        include_labels = %config.include_labels,
        lang = %config.lang,
        "converting competency dataset"
    );

    let reporter = CliProgress::new();
    let summary = competency_core::pipeline::run(&config, target, &reporter)?;

    println!();
    println!("  Conversion finished!");
    if let Some(file) = &summary.transformation {
        println!("  Transformations:  {:>6}  {}", file.entries, file.path.display());
    }
    if let Some(file) = &summary.classification {
        println!("  Classifications:  {:>6}  {}", file.entries, file.path.display());
    }
    println!("  Time:             {:.1}s", summary.elapsed.as_secs_f64());
    println!();

    Ok(())
}

fn cmd_groups() -> Result<()> {
    println!("  {:<10}  {:<22}  description", "group", "label ids");
    for group in LabelGroup::ALL {
        let (lower, upper) = group.bounds();
        let range = if lower + 1 == upper {
            format!("id == {upper}")
        } else {
            format!("{lower} < id <= {upper}")
        };
        println!("  {:<10}  {:<22}  {}", group.as_str(), range, group.description());
    }
    Ok(())
}

fn cmd_config_init(local: bool) -> Result<()> {
    let path = if local {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        init_config_at(&path)?;
        path
    } else {
        init_config()?
    };
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    match resolve_config_path(config_path)? {
        Some(path) => println!("# {}", path.display()),
        None => println!("# defaults (no config file found)"),
    }
    let config = load_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn file_written(&self, file: &WrittenFile) {
        self.spinner.set_message(format!("Wrote {}", file.path.display()));
    }

    fn done(&self, _summary: &ConvertSummary) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_defaults_to_run() {
        let cli = Cli::try_parse_from(["competency-converter"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "competency-converter",
            "classify",
            "--input",
            "data/full.json",
            "--include-labels",
            "process,knowledge",
            "--lang",
            "EN",
            "--allow-missing-lookup",
        ])
        .unwrap();

        let Some(Command::Classify(args)) = cli.command else {
            panic!("expected classify subcommand");
        };
        let config = args.apply(ConvertConfig::default()).unwrap();

        assert_eq!(config.input, PathBuf::from("data/full.json"));
        assert_eq!(config.transformation_output, PathBuf::from("transformed_dataset.json"));
        assert!(config.include_labels.contains(LabelGroup::Knowledge));
        assert!(!config.include_labels.contains(LabelGroup::NonOp));
        assert_eq!(config.lang, Language::En);
        assert!(!config.require_label_lookup);
    }

    #[test]
    fn written_file_updates_spinner_message() {
        let progress = CliProgress {
            spinner: ProgressBar::hidden(),
        };
        progress.file_written(&WrittenFile {
            path: PathBuf::from("classification_dataset.json"),
            entries: 3,
        });
        assert_eq!(progress.spinner.message(), "Wrote classification_dataset.json");
    }

    #[test]
    fn lang_flag_is_case_sensitive() {
        let args = PipelineArgs {
            lang: Some("en".into()),
            ..PipelineArgs::default()
        };
        let config = args.apply(ConvertConfig::default()).unwrap();
        assert_eq!(config.lang, Language::De);
    }

    #[test]
    fn unknown_label_group_flag_is_rejected() {
        let args = PipelineArgs {
            include_labels: Some("process,emotional".into()),
            ..PipelineArgs::default()
        };
        assert!(args.apply(ConvertConfig::default()).is_err());
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["competency-converter", "run", "--config", "conv.toml", "-v"])
                .unwrap();
        assert_eq!(cli.config_path, Some(PathBuf::from("conv.toml")));
        assert_eq!(cli.verbose, 1);
    }
}
