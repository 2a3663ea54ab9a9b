//! Plain-text rendering with a `--> file:line:col` pointer and caret
//! underlining for the primary span.

use crate::Diagnostic;
use crate::FileId;
use crate::TextRange;
use std::fmt::Write;

/// Provides access to source text for rendering diagnostics.
pub trait SourceProvider {
  fn file_name(&self, file: FileId) -> Option<&str>;
  fn file_text(&self, file: FileId) -> Option<&str>;
}

/// 1-based line/column of a byte offset. Columns are byte columns; rendering
/// exactness for multi-byte lines is not worth a grapheme library here.
fn line_col(text: &str, offset: u32) -> (usize, usize) {
  let offset = (offset as usize).min(text.len());
  let before = &text[..offset];
  let line = before.bytes().filter(|&b| b == b'\n').count() + 1;
  let col = before.len() - before.rfind('\n').map(|i| i + 1).unwrap_or(0) + 1;
  (line, col)
}

fn line_containing(text: &str, offset: u32) -> (&str, usize) {
  let offset = (offset as usize).min(text.len());
  let start = text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
  let end = text[offset..]
    .find('\n')
    .map(|i| offset + i)
    .unwrap_or(text.len());
  (&text[start..end], start)
}

/// Render a diagnostic into a human-readable string.
pub fn render_diagnostic(provider: &dyn SourceProvider, diagnostic: &Diagnostic) -> String {
  let mut output = String::new();
  writeln!(
    output,
    "{}[{}]: {}",
    diagnostic.severity, diagnostic.code, diagnostic.message
  )
  .unwrap();

  let file = diagnostic.primary.file;
  if let (Some(name), Some(text)) = (provider.file_name(file), provider.file_text(file)) {
    render_span(&mut output, name, text, diagnostic.primary.range);
  }

  for label in &diagnostic.labels {
    if let (Some(name), Some(text)) = (
      provider.file_name(label.span.file),
      provider.file_text(label.span.file),
    ) {
      let (line, col) = line_col(text, label.span.range.start);
      writeln!(output, "  - {}:{}:{}: {}", name, line, col, label.message).unwrap();
    }
  }

  for note in &diagnostic.notes {
    writeln!(output, "= note: {}", note).unwrap();
  }

  output
}

fn render_span(output: &mut String, name: &str, text: &str, range: TextRange) {
  let (line, col) = line_col(text, range.start);
  writeln!(output, "--> {}:{}:{}", name, line, col).unwrap();
  let (line_text, line_start) = line_containing(text, range.start);
  writeln!(output, "  | {}", line_text).unwrap();
  let pad = (range.start as usize).saturating_sub(line_start);
  let max_width = line_text.len().saturating_sub(pad).max(1);
  let underline = (range.len() as usize).clamp(1, max_width);
  writeln!(output, "  | {}{}", " ".repeat(pad), "^".repeat(underline)).unwrap();
}
