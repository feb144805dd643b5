use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use html_i18n_extractor::core::{
    print_error_message, print_info_message, run, DocumentMode, ExtractorOptions,
};
use html_i18n_extractor::env::{parse_bool, EnvConfig};
use html_i18n_extractor::error::ExtractResult;
use html_i18n_extractor::parsers::ApostropheScope;
use html_i18n_extractor::translation::{CollisionPolicy, ExcludeRule};

/// Extract translatable text from an HTML document into a keyed dictionary
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// HTML document or template fragment to process
    input: PathBuf,

    /// Prefix for every generated key (joined with '_')
    label_prefix: Option<String>,

    /// Skip subtrees matching tag.class (class matched as substring)
    exclude: Option<String>,

    /// Overwrite the input file with the annotated markup
    #[arg(value_parser = parse_replace_source)]
    replace_source: Option<bool>,

    /// Directory for the generated files [default: next to the input]
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// How to parse the input
    #[arg(short, long, value_enum, default_value_t = ModeArg::Auto)]
    mode: ModeArg,

    /// Skip every subtree with this tag (repeatable)
    #[arg(long = "skip-tag", value_name = "TAG")]
    skip_tags: Vec<String>,

    /// Fail when one key maps to different texts
    #[arg(long)]
    strict: bool,

    /// Where &apos; is turned back into an apostrophe
    #[arg(long, value_enum, default_value_t = ApostropheArg::Document)]
    apostrophe_scope: ApostropheArg,

    /// Character encoding of the input document
    #[arg(short = 'E', long)]
    encoding: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Auto,
    Fragment,
    FullPage,
}

impl From<ModeArg> for DocumentMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Auto => DocumentMode::Auto,
            ModeArg::Fragment => DocumentMode::Fragment,
            ModeArg::FullPage => DocumentMode::FullPage,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ApostropheArg {
    Document,
    Placeholders,
}

impl From<ApostropheArg> for ApostropheScope {
    fn from(scope: ApostropheArg) -> Self {
        match scope {
            ApostropheArg::Document => ApostropheScope::Document,
            ApostropheArg::Placeholders => ApostropheScope::Placeholders,
        }
    }
}

/// Exit status: 0 done, 1 done but an output file could not be written, 2 failed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

fn parse_replace_source(value: &str) -> Result<bool, String> {
    parse_bool(value, "REPLACE_SOURCE").map_err(|e| e.message)
}

fn build_options(cli: &Cli, env: &EnvConfig) -> ExtractResult<ExtractorOptions> {
    let selector = cli.exclude.as_deref().unwrap_or(&env.exclude);
    let collision_policy = if cli.strict || env.strict {
        CollisionPolicy::Strict
    } else {
        CollisionPolicy::Overwrite
    };

    Ok(ExtractorOptions {
        label_prefix: cli
            .label_prefix
            .clone()
            .unwrap_or_else(|| env.label_prefix.clone()),
        exclude: ExcludeRule::parse(selector)?,
        skip_tags: cli.skip_tags.iter().map(|t| t.to_ascii_lowercase()).collect(),
        replace_source: cli.replace_source.unwrap_or(false),
        document_mode: cli.mode.into(),
        collision_policy,
        apostrophe_scope: cli.apostrophe_scope.into(),
        encoding: cli.encoding.clone(),
        output_dir: cli.output_dir.clone(),
    })
}

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let env = match EnvConfig::from_env() {
        Ok(env) => env,
        Err(err) => {
            print_error_message(&format!("Error: {}", err));
            return ExitStatus::Error.into();
        }
    };

    init_tracing(if cli.verbose { "debug" } else { &env.log_level });

    let options = match build_options(&cli, &env) {
        Ok(options) => options,
        Err(err) => {
            print_error_message(&format!("Error: {}", err));
            return ExitStatus::Error.into();
        }
    };

    match run(&cli.input, &options).await {
        Ok(report) => {
            print_info_message(&format!(
                "Done! Total strings processed: {}",
                report.total_strings()
            ));
            if report.is_complete() {
                ExitStatus::Success.into()
            } else {
                ExitStatus::Failure.into()
            }
        }
        Err(err) => {
            print_error_message(&format!("Error: {}", err));
            ExitStatus::Error.into()
        }
    }
}
