use crate::context::types::ProcessedOutput;
use anyhow::Result;
use std::io::Write;

/// Separator printed ahead of each chunk when output spans several.
pub fn chunk_banner(
    idx: usize,
    total: usize,
) -> String {
    format!("----- part {} of {} -----\n", idx + 1, total)
}

/// Text of chunk `idx`, exactly as it should be pasted.
pub fn format_chunk_snippet(
    output: &ProcessedOutput,
    idx: usize,
) -> Option<String> {
    output.chunks.get(idx).map(|c| c.render())
}

/// Write every chunk, with banners only when the output is chunked.
pub fn write_chunks(
    out: &mut impl Write,
    output: &ProcessedOutput,
) -> Result<()> {
    let total = output.chunk_count();
    for (idx, chunk) in output.chunks.iter().enumerate() {
        if output.is_chunked {
            out.write_all(chunk_banner(idx, total).as_bytes())?;
        }
        out.write_all(chunk.render().as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_json(
    out: &mut impl Write,
    output: &ProcessedOutput,
) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, output)?;
    writeln!(out)?;
    Ok(())
}

/// One-line summary for stderr.
pub fn summary(output: &ProcessedOutput) -> String {
    let chunks = output.chunk_count();
    format!(
        "OK {} files, ~{} tokens, {} chunk{}",
        output.file_count(),
        output.token_estimate,
        chunks,
        if chunks == 1 { "" } else { "s" }
    )
}
