//! Shared plumbing for the integration suites.

use anyhow::{Result, anyhow};
use declgen::host::SymbolModel;
use declgen::{CancellationToken, GenerationInput, GenerationOutput, Generator, IncrementalCache};

/// Run one pass with a fresh cache and no cancellation.
pub fn generate<H: SymbolModel>(
    generator: &Generator<H>,
    input: &GenerationInput,
) -> Result<GenerationOutput> {
    generator
        .run(input, &CancellationToken::new(), &mut IncrementalCache::new())
        .map_err(|e| anyhow!("generation failed: {e}"))
}

/// Diagnostic codes in output order.
pub fn codes(output: &GenerationOutput) -> Vec<&'static str> {
    output.diagnostics.iter().map(|d| d.id.code()).collect()
}

/// Text of the generated file `hint`.
pub fn text<'a>(output: &'a GenerationOutput, hint: &str) -> Result<&'a str> {
    output
        .source(hint)
        .map(|s| s.text.as_str())
        .ok_or_else(|| {
            let hints: Vec<&str> = output.sources.iter().map(|s| s.hint_name.as_str()).collect();
            anyhow!("no source named {hint}; generated {hints:?}")
        })
}
