use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::error::{ExtractError, ExtractResult};
use crate::parsers::html::{
    decode_html, hide_placeholders, markup_to_dom, restore_placeholders, serialize_document,
    serialize_fragment, skip_leading_noise, ApostropheScope, FragmentWrapper,
};
use crate::translation::{
    CollisionPolicy, ExcludeRule, ExtractionStats, Extractor, ExtractorConfig, TranslationMap,
};

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";

/// Suffix appended to the input's base name for both artifacts
pub const OUTPUT_SUFFIX: &str = "_translation";

/// How the input document is fed to the parser
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DocumentMode {
    /// Full page if it starts with a doctype or `<html>`, fragment otherwise (default).
    /// Leading template tags, comments and whitespace are skipped before sniffing.
    #[default]
    Auto,
    /// Template snippet: wrapped in `<html><body>` (plus table containers for table parts)
    /// for parsing, wrapper stripped afterwards
    Fragment,
    /// Complete document, serialized as-is
    FullPage,
}

impl DocumentMode {
    /// Whether the markup gets the synthetic `<html><body>` wrapper
    pub fn wraps(&self, markup: &str) -> bool {
        match self {
            DocumentMode::Fragment => true,
            DocumentMode::FullPage => false,
            DocumentMode::Auto => {
                let head: String = skip_leading_noise(markup)
                    .chars()
                    .take(9)
                    .collect::<String>()
                    .to_ascii_lowercase();
                !(head.starts_with("<!doctype") || head.starts_with("<html"))
            }
        }
    }
}

/// Configuration options for one extraction run
#[derive(Default, Clone, Debug)]
pub struct ExtractorOptions {
    pub label_prefix: String,
    pub exclude: Option<ExcludeRule>,
    pub skip_tags: Vec<String>,
    pub replace_source: bool,
    pub document_mode: DocumentMode,
    pub collision_policy: CollisionPolicy,
    pub apostrophe_scope: ApostropheScope,
    pub encoding: Option<String>,
    pub output_dir: Option<PathBuf>,
}

impl ExtractorOptions {
    fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            label_prefix: self.label_prefix.clone(),
            exclude: self.exclude.clone(),
            skip_tags: self.skip_tags.clone(),
            apostrophe_scope: self.apostrophe_scope,
        }
    }
}

/// Annotated markup plus the dictionary extracted from it
#[derive(Debug, Clone)]
pub struct ExtractionOutput {
    pub markup: String,
    pub map: TranslationMap,
    pub stats: ExtractionStats,
}

/// Where the two artifacts of a run are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub markup: PathBuf,
    pub dictionary: PathBuf,
}

/// Outcome of a complete file run
#[derive(Debug)]
pub struct RunReport {
    pub paths: OutputPaths,
    pub stats: ExtractionStats,
    pub dictionary_entries: usize,
    /// Absorbed, non-fatal write failures
    pub write_errors: Vec<ExtractError>,
}

impl RunReport {
    /// Total count of translatable strings discovered
    pub fn total_strings(&self) -> usize {
        self.stats.translatable
    }

    pub fn is_complete(&self) -> bool {
        self.write_errors.is_empty()
    }
}

/// Extracts translatable text from raw document bytes
///
/// The bytes are decoded with `options.encoding` when given, UTF-8 otherwise.
pub fn extract_from_data(data: &[u8], options: &ExtractorOptions) -> ExtractResult<ExtractionOutput> {
    let markup = decode_html(data, options.encoding.as_deref());
    extract_from_markup(&markup, options)
}

/// Extracts translatable text from a markup string
///
/// Runs the whole guard → parse → walk → serialize → restore pipeline. Nothing escapes
/// a failed run: in strict mode a conflicting key aborts before any markup is produced.
///
/// # Examples
///
/// ```
/// use html_i18n_extractor::core::{extract_from_markup, ExtractorOptions};
///
/// let output = extract_from_markup("<p>Hello</p>", &ExtractorOptions::default()).unwrap();
/// assert_eq!(output.markup, r#"<p translate="_hello"></p>"#);
/// assert_eq!(output.map.get("_hello"), Some("Hello"));
/// ```
pub fn extract_from_markup(
    markup: &str,
    options: &ExtractorOptions,
) -> ExtractResult<ExtractionOutput> {
    let wrapper = options
        .document_mode
        .wraps(markup)
        .then(|| FragmentWrapper::for_markup(markup));
    debug!("document mode {:?}, fragment wrapper: {:?}", options.document_mode, wrapper);

    let prepared = match &wrapper {
        Some(wrapper) => wrapper.wrap(markup),
        None => markup.to_string(),
    };
    let dom = markup_to_dom(&hide_placeholders(&prepared));

    let config = options.extractor_config();
    let outcome = Extractor::new(&config).extract(&dom);

    let conflicts: Vec<_> = outcome
        .collisions
        .iter()
        .filter(|collision| collision.is_conflict())
        .collect();
    for collision in &conflicts {
        warn!(
            "key {} overwritten: {:?} -> {:?}",
            collision.key, collision.previous, collision.current
        );
    }
    if options.collision_policy == CollisionPolicy::Strict && !conflicts.is_empty() {
        let mut keys: Vec<String> = conflicts.iter().map(|c| c.key.clone()).collect();
        keys.dedup();
        return Err(ExtractError::KeyCollision { keys });
    }

    let serialized = match &wrapper {
        Some(wrapper) => serialize_fragment(&dom, wrapper),
        None => serialize_document(&dom),
    };

    Ok(ExtractionOutput {
        markup: restore_placeholders(&serialized, options.apostrophe_scope),
        map: outcome.map,
        stats: outcome.stats,
    })
}

/// Computes both artifact paths for an input file
///
/// `<dir>/<basename>_translation.html` and `<dir>/<basename>_translation.json`, where
/// `<dir>` is `options.output_dir` or the input's own directory. With `replace_source`
/// the markup goes back to the input path.
pub fn format_output_paths(input: &Path, options: &ExtractorOptions) -> OutputPaths {
    let base_name = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = options
        .output_dir
        .clone()
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();

    let markup = if options.replace_source {
        input.to_path_buf()
    } else {
        dir.join(format!("{}{}.html", base_name, OUTPUT_SUFFIX))
    };

    OutputPaths {
        markup,
        dictionary: dir.join(format!("{}{}.json", base_name, OUTPUT_SUFFIX)),
    }
}

/// Reads `input`, extracts it and writes both artifacts
///
/// A read failure aborts before anything is written. The two writes run concurrently and
/// their failures are collected in the report instead of cutting the run short.
pub async fn run(input: &Path, options: &ExtractorOptions) -> ExtractResult<RunReport> {
    let data = tokio::fs::read(input)
        .await
        .map_err(|source| ExtractError::Read {
            path: input.to_path_buf(),
            source,
        })?;

    let output = extract_from_data(&data, options)?;
    let json = output.map.to_json_pretty()?;
    let paths = format_output_paths(input, options);

    info!(
        "{}: {} translatable strings, {} dictionary entries",
        input.display(),
        output.stats.translatable,
        output.map.len()
    );

    let write_errors = write_artifacts(&paths, &output.markup, &json).await;

    Ok(RunReport {
        paths,
        stats: output.stats,
        dictionary_entries: output.map.len(),
        write_errors,
    })
}

async fn write_artifacts(paths: &OutputPaths, markup: &str, json: &str) -> Vec<ExtractError> {
    let (markup_result, json_result) = tokio::join!(
        tokio::fs::write(&paths.markup, markup),
        tokio::fs::write(&paths.dictionary, json),
    );

    [(markup_result, &paths.markup), (json_result, &paths.dictionary)]
        .into_iter()
        .filter_map(|(result, path)| match result {
            Ok(()) => {
                debug!("wrote {}", path.display());
                None
            }
            Err(source) => {
                let err = ExtractError::Write {
                    path: path.clone(),
                    source,
                };
                error!("{}", err);
                Some(err)
            }
        })
        .collect()
}

/// Prints an error message to stderr
pub fn print_error_message(msg: &str) {
    if std::io::stderr().is_terminal() {
        eprintln!("{ANSI_COLOR_RED}{msg}{ANSI_COLOR_RESET}");
    } else {
        eprintln!("{msg}");
    }
}

/// Prints an info message to stdout
pub fn print_info_message(msg: &str) {
    println!("{msg}");
}
