use anyhow::{Context, Result};
use context_crafter::config::Config;
use context_crafter::context::engine::Engine;
use context_crafter::context::gather;
use context_crafter::io::clipboard;
use context_crafter::output;
use context_crafter::ui::{self, CopyProgress};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    // RUST_LOG overrides -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let config = Config::from_cli();
    init_tracing(config.verbose);

    let project = gather::collect_project(&config.root, &config.collect_options())
        .with_context(|| format!("failed to read project at {}", config.root.display()))?;
    let name = config.name.clone().unwrap_or(project.name);
    let output = Engine::default().process_project(
        &project.files,
        &name,
        &project.patterns,
        config.mode,
    )?;

    if let Some(idx) = config.chunk_index {
        let Some(snippet) = output::format_chunk_snippet(&output, idx) else {
            eprintln!(
                "chunk index {idx} is out of range; output has {} chunk(s)",
                output.chunk_count()
            );
            std::process::exit(3);
        };
        if config.stdout {
            let mut stdout = io::stdout().lock();
            stdout.write_all(snippet.as_bytes())?;
            stdout.flush()?;
        }
        if !config.no_clipboard {
            clipboard::copy_to_clipboard(&snippet, false)?;
            record_copy(&config, &output, idx)?;
        }
    } else if config.stream {
        let mut progress = match &config.progress_file {
            Some(path) => CopyProgress::load(path, &output),
            None => CopyProgress::for_output(&output),
        };
        let mut input = io::stdin().lock();
        let mut stdout = io::stdout().lock();
        ui::streaming_mode(&output, &mut progress, &config, &mut input, &mut stdout)?;
    } else {
        if config.json {
            output::write_json(&mut io::stdout().lock(), &output)?;
        } else if config.stdout {
            output::write_chunks(&mut io::stdout().lock(), &output)?;
        }
        // Without an explicit index the first part goes to the clipboard.
        if !config.no_clipboard {
            if let Some(first) = output::format_chunk_snippet(&output, 0) {
                clipboard::copy_to_clipboard(&first, false)?;
                record_copy(&config, &output, 0)?;
            }
        }
    }

    eprintln!("{}", output::summary(&output));
    Ok(())
}

fn record_copy(
    config: &Config,
    output: &context_crafter::ProcessedOutput,
    idx: usize,
) -> Result<()> {
    if let Some(path) = &config.progress_file {
        let mut progress = CopyProgress::load(path, output);
        progress.mark_copied(idx);
        progress.save(path)?;
    }
    Ok(())
}
