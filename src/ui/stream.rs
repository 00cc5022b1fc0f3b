use crate::config::Config;
use crate::context::types::ProcessedOutput;
use crate::io::clipboard;
use crate::ui::progress::CopyProgress;
use anyhow::Result;
use std::io::{BufRead, Write};

enum Choice {
    Next,
    Part(usize),
    Quit,
}

/// Interactive streaming mode: copy parts one at a time, in order by
/// default, recording which ones have been copied.
pub fn streaming_mode(
    output: &ProcessedOutput,
    progress: &mut CopyProgress,
    config: &Config,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let total = output.chunk_count();
    writeln!(out, "▲ Streaming {total} parts (1..{total}).")?;
    let mut next = progress.next_index();
    while let Some(idx) = next {
        let snippet = output.chunks[idx].render();
        if config.stdout {
            write!(out, "{snippet}")?;
        }
        if !config.no_clipboard {
            clipboard::copy_to_clipboard(&snippet, false)?;
        }
        progress.mark_copied(idx);
        if let Some(path) = &config.progress_file {
            progress.save(path)?;
        }
        writeln!(
            out,
            "✔ copied part {} of {total} ({} done)",
            idx + 1,
            progress.copied_count()
        )?;

        next = match read_choice(input, out, total)? {
            Choice::Quit => None,
            Choice::Part(n) => Some(n),
            Choice::Next => {
                let pending = progress.next_index();
                if pending.is_none() {
                    writeln!(out, "All {total} parts copied!")?;
                }
                pending
            }
        };
    }
    Ok(())
}

fn read_choice(
    input: &mut impl BufRead,
    out: &mut impl Write,
    total: usize,
) -> Result<Choice> {
    loop {
        write!(
            out,
            "Enter part # (1..{total}), Enter for the next part, or 'q' to quit: "
        )?;
        out.flush()?;
        let mut cmd = String::new();
        if input.read_line(&mut cmd)? == 0 {
            return Ok(Choice::Quit);
        }
        let cmd = cmd.trim();
        if cmd.eq_ignore_ascii_case("q") {
            return Ok(Choice::Quit);
        }
        if cmd.is_empty() {
            return Ok(Choice::Next);
        }
        match cmd.parse::<usize>() {
            Ok(n) if (1..=total).contains(&n) => return Ok(Choice::Part(n - 1)),
            _ => writeln!(out, "Invalid part: {cmd}")?,
        }
    }
}
