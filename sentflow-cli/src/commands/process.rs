//! Process command implementation

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use sentflow_core::language::load_from_file;
use sentflow_engine::{Sequencer, TokenizerKind, TokenizerPool};

use crate::config::CliConfig;
use crate::input::{resolve_patterns, ChunkReader};
use crate::output::{JsonFormatter, OutputFormatter, TextFormatter};

const STDIN_NAME: &str = "<stdin>";

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob); stdin when omitted or "-"
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "SENTFLOW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Language code or alias
    #[arg(short, long, value_name = "CODE")]
    pub language: Option<String>,

    /// External language configuration file
    #[arg(long, value_name = "FILE")]
    pub language_config: Option<PathBuf>,

    /// Tokenizer backend (neural, rule-based)
    #[arg(short, long, value_name = "KIND")]
    pub tokenizer: Option<TokenizerKind>,

    /// Directory of cached boundary models
    #[arg(long, value_name = "DIR", env = "SENTFLOW_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// Fail instead of falling back when no cached model exists
    #[arg(long)]
    pub offline: bool,

    /// Bytes per input chunk
    #[arg(long, value_name = "BYTES")]
    pub chunk_bytes: Option<usize>,

    /// Emit the first fragment as soon as a separator arrives
    #[arg(long)]
    pub quick_yield: bool,

    /// Emit one early fragment for every sentence
    #[arg(long)]
    pub quick_yield_all: bool,

    /// Emit every fragment as soon as a separator arrives
    #[arg(long)]
    pub quick_yield_every: bool,

    /// Treat line breaks as sentence ends
    #[arg(long)]
    pub poetic: bool,

    /// Keep line breaks in poetic output
    #[arg(long)]
    pub preserve_line_breaks: bool,

    /// Only cut at punctuation
    #[arg(long)]
    pub strict: bool,

    /// Remove emoji from sentences
    #[arg(long)]
    pub strip_emojis: bool,

    /// Log every flush decision
    #[arg(long)]
    pub debug: bool,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text with one sentence per line
    Text,
    /// One JSON object per sentence
    Json,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();
        log::debug!("Arguments: {:?}", self);

        let config = self.resolve_config()?;
        let chunk_bytes = config.input.chunk_bytes;
        let sequencer = self.build_sequencer(config)?;
        let mut formatter = self.formatter()?;

        let mut total = 0;
        if self.reads_stdin() {
            let reader = ChunkReader::new(io::stdin().lock(), chunk_bytes, STDIN_NAME);
            total += process_source(&sequencer, reader, STDIN_NAME, formatter.as_mut())?;
        } else {
            for path in resolve_patterns(&self.input)? {
                let name = path.display().to_string();
                log::info!("Processing {name}");
                let file = File::open(&path).with_context(|| format!("Failed to open {name}"))?;
                let reader = ChunkReader::new(file, chunk_bytes, name.clone());
                total += process_source(&sequencer, reader, &name, formatter.as_mut())?;
            }
        }

        formatter.finish()?;
        log::info!("Emitted {total} sentence(s)");
        Ok(())
    }

    fn reads_stdin(&self) -> bool {
        self.input.is_empty() || self.input.iter().all(|i| i == "-")
    }

    /// Configuration file (or defaults) with command line overrides applied
    pub fn resolve_config(&self) -> Result<CliConfig> {
        let mut config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        let engine = &mut config.engine;
        if let Some(language) = &self.language {
            engine.language = language.clone();
        }
        if let Some(kind) = self.tokenizer {
            engine.tokenizer = kind;
        }
        engine.offline |= self.offline;
        engine.quick_yield_single_sentence_fragment |= self.quick_yield;
        engine.quick_yield_for_all_sentences |= self.quick_yield_all;
        engine.quick_yield_every_fragment |= self.quick_yield_every;
        engine.poetic_mode |= self.poetic;
        engine.preserve_line_breaks |= self.preserve_line_breaks;
        engine.strict_punctuation_mode |= self.strict;
        engine.cleanup_text_emojis |= self.strip_emojis;
        engine.debug |= self.debug;

        if let Some(bytes) = self.chunk_bytes {
            config.input.chunk_bytes = bytes;
        }
        if let Some(dir) = &self.model_dir {
            config.tokenizer.model_dir = Some(dir.clone());
        }
        if let Some(path) = &self.language_config {
            config.tokenizer.language_config = Some(path.clone());
        }

        config.validate()?;
        Ok(config)
    }

    /// Register external language data and bring the backend up
    fn build_sequencer(&self, mut config: CliConfig) -> Result<Sequencer> {
        let mut pool = TokenizerPool::new();
        if let Some(dir) = &config.tokenizer.model_dir {
            pool = pool.with_model_dir(dir.clone());
        }

        if let Some(path) = &config.tokenizer.language_config {
            let rules = load_from_file(path)
                .with_context(|| format!("Failed to load language config: {}", path.display()))?;
            log::info!("Loaded language '{}' from {}", rules.code(), path.display());
            if self.language.is_none() {
                config.engine.language = rules.code().to_string();
            }
            pool.register_language(rules);
        }

        let engine = config.engine;
        pool.init_tokenizer(engine.tokenizer, &engine.language, engine.offline, engine.debug)
            .with_context(|| {
                format!(
                    "Failed to initialize {} tokenizer for '{}'",
                    engine.tokenizer, engine.language
                )
            })?;

        Ok(Sequencer::new(engine, Arc::new(pool)))
    }

    fn formatter(&self) -> Result<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        };

        Ok(match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        })
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        if self.quiet {
            return;
        }
        let log_level = match self.verbose {
            0 if self.debug => "debug",
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        // A logger may already be installed when running inside tests
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .try_init();
    }
}

/// Stream one input through the engine, writing sentences as they arrive
fn process_source<R: Read>(
    sequencer: &Sequencer,
    chunks: ChunkReader<R>,
    name: &str,
    formatter: &mut dyn OutputFormatter,
) -> Result<usize> {
    let mut count = 0;
    for sentence in sequencer.try_sentences(chunks)? {
        let sentence = sentence.with_context(|| format!("Failed to process {name}"))?;
        formatter.format_sentence(&sentence, name)?;
        count += 1;
    }
    Ok(count)
}
