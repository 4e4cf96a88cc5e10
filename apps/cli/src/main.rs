use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tokio::{fs, io::AsyncReadExt};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tubenotes_core::{
    ChatBackend, ChunkingConfig, HierarchicalSummarizer, HuggingFaceBackend, LeadBackend, Locator,
    Report, SummarizationBackend, SummarizerConfig, TubenotesError, YouTubeSource,
    format_full_notes, format_source, format_summary_only, get_root_cache_dir,
    save_transcript_files, source, word_count,
};

use crate::{
    cli::{BackendKind, Cli, Command, Options},
    progress::{ChunkProgress, create_spinner, format_duration},
};

mod cli;
mod progress;

const RECOMMENDED_CHUNK_SIZE: std::ops::RangeInclusive<usize> = 800..=2000;
const RECOMMENDED_OVERLAP: std::ops::RangeInclusive<usize> = 50..=300;

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,tubenotes={level},tubenotes_core={level}"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_backend(options: &Options) -> tubenotes_core::Result<Box<dyn SummarizationBackend>> {
    let timeout = options.timeout_secs.map(Duration::from_secs);

    Ok(match options.backend {
        BackendKind::Huggingface => Box::new(HuggingFaceBackend::from_env(
            options.model.as_deref(),
            timeout,
        )?),
        BackendKind::Chat => Box::new(ChatBackend::new(
            options.provider.into(),
            options.model.clone(),
            timeout,
        )?),
        BackendKind::Lead => Box::new(LeadBackend),
    })
}

fn warn_outside_recommended(chunking: &ChunkingConfig) {
    if !RECOMMENDED_CHUNK_SIZE.contains(&chunking.chunk_size) {
        println!(
            "{} chunk size {} is outside the recommended 800-2000",
            style("!").yellow().bold(),
            chunking.chunk_size
        );
    }
    if !RECOMMENDED_OVERLAP.contains(&chunking.overlap) {
        println!(
            "{} overlap {} is outside the recommended 50-300",
            style("!").yellow().bold(),
            chunking.overlap
        );
    }
}

async fn read_stdin() -> Result<String> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("failed to read text from stdin")?;
    Ok(text)
}

fn print_heading(title: &str) {
    println!("\n{}", style(title).cyan().bold());
    println!("{}", style("─".repeat(60)).dim());
}

async fn run(cli: Cli) -> Result<()> {
    let options = cli.options;

    let chunking = ChunkingConfig::new(options.chunk_size, options.overlap)?;
    let config = SummarizerConfig {
        chunking,
        max_concurrency: options.concurrency,
        ..SummarizerConfig::default()
    };

    // Validate API key early
    let backend = build_backend(&options)?;
    let summarizer = HierarchicalSummarizer::new(backend, config)?;

    println!(
        "\n{}  {}\n",
        style("tubenotes").cyan().bold(),
        style("Transcript Summarizer").dim()
    );
    warn_outside_recommended(&chunking);

    let locator = match cli.command {
        Command::Youtube { url } => Locator::YouTube(url),
        Command::Text { text: Some(text) } => Locator::Text(text),
        Command::Text { text: None } => Locator::Text(read_stdin().await?),
        Command::File { path } => Locator::File(path),
    };

    let total_start = Instant::now();

    // Step 1: Load input
    let step_start = Instant::now();
    let youtube = YouTubeSource::new(get_root_cache_dir(), options.force);
    let spinner = create_spinner(match &locator {
        Locator::YouTube(_) => "Fetching transcript...",
        Locator::Text(_) => "Reading text...",
        Locator::File(_) => "Reading file...",
    });
    let loaded = match source::load(&locator, &youtube).await {
        Ok(loaded) => loaded,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.into());
        }
    };
    let document = loaded.document;
    spinner.finish_with_message(format!(
        "{} {} {}",
        style("✓").green().bold(),
        format_source(&document.source),
        style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
    ));

    if let Some(dir) = &options.save_transcript {
        match &loaded.transcript {
            Some(transcript) => {
                let (txt, json) = save_transcript_files(transcript, dir).await?;
                println!(
                    "{} Transcript saved: {} {}",
                    style("✓").green().bold(),
                    style(txt.display()).cyan(),
                    style(json.display()).cyan()
                );
            }
            None => println!(
                "{} --save-transcript only applies to YouTube input",
                style("!").yellow().bold()
            ),
        }
    }

    let char_count = document.char_count();
    println!(
        "{} {} chars, {} words, ~{} chunks",
        style("✓").green().bold(),
        char_count,
        word_count(&document.text),
        chunking.estimated_chunks(char_count)
    );

    if options.show_chunks {
        let chunks = chunking.chunk(&document.text)?;
        print_heading(&format!("CHUNKS ({})", chunks.len()));
        for chunk in &chunks {
            println!(
                "{} {}",
                style(format!("[Chunk {}]", chunk.index + 1)).cyan().bold(),
                style(format!("chars {}..{}", chunk.start, chunk.end())).dim()
            );
            println!("{}\n", chunk.text);
        }
    }

    println!("{}", style("─".repeat(60)).dim());

    // Step 2: Summarize
    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("ctrl-c received, cancelling");
            on_ctrl_c.cancel();
        }
    });

    let step_start = Instant::now();
    let progress = ChunkProgress::new(options.show_chunk_summaries);
    let summary = match summarizer
        .summarize_with(&document.text, &progress, &cancel)
        .await
    {
        Ok(summary) => summary,
        Err(e) => {
            progress.abandon();
            return Err(e.into());
        }
    };
    progress.finish(format!(
        "{} Summarized {} chunks with {} {}",
        style("✓").green().bold(),
        summary.chunk_summaries.len(),
        summarizer.backend().name(),
        style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
    ));

    let report = Report::build(document.source.clone(), &document.text, summary)?;

    print_heading("FINAL SUMMARY");
    println!("{}", report.final_summary);

    print_heading("KEY POINTS");
    for (i, point) in report.key_points.iter().enumerate() {
        println!("{} {}", style(format!("{}.", i + 1)).yellow(), point);
    }

    print_heading("STATISTICS");
    println!("Original:    {} words", report.original_words);
    println!("Summary:     {} words", report.summary_words);
    println!("Compression: {:.1}%", report.compression_percent);
    println!("Chunks:      {}", report.chunk_summaries.len());

    println!();
    if let Some(path) = &options.output {
        fs::write(path, format_full_notes(&report))
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!(
            "{} {}",
            style("Saved notes:").dim(),
            style(path.display()).cyan()
        );
    }
    if let Some(path) = &options.summary_output {
        fs::write(path, format_summary_only(&report))
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!(
            "{} {}",
            style("Saved summary:").dim(),
            style(path.display()).cyan()
        );
    }

    println!(
        "{} {}\n",
        style("Total time:").dim(),
        style(format_duration(total_start.elapsed())).cyan().bold()
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("\n{} {:#}", style("Error:").red().bold(), err);
        if let Some(e) = err.downcast_ref::<TubenotesError>() {
            eprintln!("{} {}", style("Hint:").yellow().bold(), e.hint());
        }
        std::process::exit(1);
    }
}
