use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use speller::report::{check_text, Report, Timings};
use speller::{Config, ReportFormat, WordIndex};

#[derive(Parser, Debug)]
#[command(name = "speller", version)]
#[command(about = "Spell check text files against a word list")]
struct Args {
    /// Word list to load (overrides the config file)
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Config file (defaults to <config dir>/speller/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<ReportFormat>,

    /// Number of hash buckets
    #[arg(long)]
    buckets: Option<usize>,

    /// Longest accepted word; 0 disables the limit
    #[arg(long)]
    max_len: Option<usize>,

    /// Texts to check
    #[arg(required = true)]
    texts: Vec<PathBuf>,
}

fn config(args: &Args) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(dictionary) = &args.dictionary {
        config.dictionary = dictionary.clone();
    }
    if let Some(format) = args.format {
        config.report = format;
    }
    if let Some(buckets) = args.buckets {
        config.bucket_count = buckets;
    }
    if let Some(max_len) = args.max_len {
        config.max_word_len = (max_len > 0).then_some(max_len);
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = config(&args)?;
    debug!("{config:?}");

    let mut index = WordIndex::with_options(config.index_options())?;

    let started = Instant::now();
    index
        .load(&config.dictionary)
        .with_context(|| format!("Could not load {}", config.dictionary.display()))?;
    let load = started.elapsed();

    let mut texts = Vec::with_capacity(args.texts.len());
    let mut check = Duration::ZERO;
    for path in &args.texts {
        let bytes = fs::read(path).with_context(|| format!("Could not open {}", path.display()))?;
        let text = String::from_utf8_lossy(&bytes);
        let started = Instant::now();
        texts.push(check_text(&index, path, &text));
        check += started.elapsed();
        info!("Checked {}", path.display());
    }

    let started = Instant::now();
    let words_in_dictionary = index.size();
    let size = started.elapsed();

    let started = Instant::now();
    index.unload();
    let unload = started.elapsed();

    let report = Report {
        dictionary: config.dictionary.clone(),
        words_in_dictionary,
        texts,
        timings: Timings {
            load: load.as_secs_f64(),
            check: check.as_secs_f64(),
            size: size.as_secs_f64(),
            unload: unload.as_secs_f64(),
        },
    };

    let mut out = io::stdout().lock();
    match config.report {
        ReportFormat::Text => report.write_text(&mut out)?,
        ReportFormat::Json => report.write_json(&mut out)?,
    }
    out.flush()?;
    Ok(())
}
