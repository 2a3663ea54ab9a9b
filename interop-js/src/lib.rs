//! Rewrites a module's `import`/`export` declarations into an equivalent
//! program expressed purely in terms of a synchronous `require`-shaped load
//! primitive, under one of two strategies: live-binding (getter-backed
//! exports that observe later mutation, correct under circular imports) or
//! static (plain assignments fixed at evaluation time).
//!
//! The pass owns the tree for the duration of one synchronous call, holds no
//! state across calls, and performs no I/O, so separate modules can be
//! transformed on parallel workers freely.

use diagnostics::{Diagnostic, FileId, Span, TextRange};
use syntax_js::ast::node::Node;
use syntax_js::ast::stx::TopLevel;
use syntax_js::loc::Loc;

use crate::hygiene::FreshNames;

mod assemble;
mod compose_live;
mod compose_static;
mod emit;
pub mod helpers;
pub mod hygiene;
pub mod records;
pub mod resolve;
pub mod scan;
#[cfg(test)]
mod tests;

/// Unsupported module syntax (string import/export names, malformed wildcard
/// exports). Fatal for the current module.
pub const ERR_UNSUPPORTED_SYNTAX: &str = "INTEROP0001";
/// `export { a }` with no local binding `a` anywhere in module scope. Fatal.
pub const ERR_UNRESOLVED_EXPORT: &str = "INTEROP0002";
/// A malformed binding inside an exported declaration was skipped. The rest
/// of the module still transforms.
pub const WARN_SKIPPED_BINDING: &str = "INTEROP0003";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Strategy {
  /// Exports are plain assignments at module-evaluation time. Minimal
  /// runtime indirection; mutation after export is not observed.
  Static,
  /// Exports are accessor properties forwarding to the live local binding.
  LiveBinding,
}

#[derive(Clone, Debug)]
pub struct TransformOptions {
  /// Name given to the default-unwrap interop helper if it is emitted.
  pub import_default_helper_name: String,
  /// Name given to the namespace-wrap interop helper if it is emitted.
  pub import_all_helper_name: String,
  /// Wrap every specifier in a `require.resolve` call before loading.
  pub resolve_specifiers: bool,
  pub strategy: Strategy,
}

impl TransformOptions {
  pub fn new(strategy: Strategy) -> Self {
    Self {
      import_default_helper_name: "_interopRequireDefault".to_string(),
      import_all_helper_name: "_interopRequireWildcard".to_string(),
      resolve_specifiers: false,
      strategy,
    }
  }
}

impl Default for TransformOptions {
  fn default() -> Self {
    Self::new(Strategy::Static)
  }
}

/// Side channel mutated by the pass. `is_es_module` is only ever raised; a
/// module with no module syntax leaves the caller-supplied value untouched.
/// The surrounding bundler keys its interop convention for the whole file on
/// this flag.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ModuleOutput {
  pub is_es_module: bool,
}

pub(crate) struct TransformContext<'a> {
  pub file: FileId,
  pub options: &'a TransformOptions,
  pub fresh: FreshNames,
  pub diagnostics: Vec<Diagnostic>,
}

impl TransformContext<'_> {
  fn span(&self, loc: Loc) -> Span {
    Span::new(self.file, TextRange::new(loc.start_u32(), loc.end_u32()))
  }

  pub fn error(&mut self, loc: Loc, code: &'static str, message: impl Into<String>) {
    self
      .diagnostics
      .push(Diagnostic::error(code, message, self.span(loc)));
  }

  pub fn warning(&mut self, loc: Loc, code: &'static str, message: impl Into<String>) {
    self
      .diagnostics
      .push(Diagnostic::warning(code, message, self.span(loc)));
  }

  pub fn fresh_name(&mut self, hint: impl Into<String>) -> String {
    self.fresh.fresh(hint)
  }

  pub fn has_fatal(&self) -> bool {
    self.diagnostics.iter().any(Diagnostic::is_fatal)
  }
}

/// Rewrite `top_level`'s import/export declarations onto the load primitive.
///
/// On success the returned diagnostics are non-fatal (skipped malformed
/// bindings). On failure the module is unusable and every collected
/// diagnostic is returned, at least one of them fatal; the transform never
/// retries, since a re-run would fail identically.
///
/// ```
/// use diagnostics::FileId;
/// use interop_js::{transform_module, ModuleOutput, Strategy, TransformOptions};
/// use syntax_js::ast::node::Node;
/// use syntax_js::ast::stx::TopLevel;
/// use syntax_js::loc::Loc;
///
/// let mut top_level = Node::new(Loc(0, 0), TopLevel { body: vec![] });
/// let mut output = ModuleOutput::default();
/// let options = TransformOptions::new(Strategy::Static);
/// let warnings =
///   transform_module(FileId(0), &options, &mut top_level, &mut output).unwrap();
/// assert!(warnings.is_empty());
/// assert!(!output.is_es_module);
/// ```
pub fn transform_module(
  file: FileId,
  options: &TransformOptions,
  top_level: &mut Node<TopLevel>,
  output: &mut ModuleOutput,
) -> Result<Vec<Diagnostic>, Vec<Diagnostic>> {
  let mut fresh = FreshNames::new(hygiene::collect_identifier_strings(top_level));
  fresh.reserve(&options.import_default_helper_name);
  fresh.reserve(&options.import_all_helper_name);
  let mut cx = TransformContext {
    file,
    options,
    fresh,
    diagnostics: Vec::new(),
  };

  let bindings = scan::collect_module_bindings(&top_level.stx.body);
  let records = scan::scan_module(&mut cx, &mut top_level.stx.body, &bindings);
  if cx.has_fatal() {
    return Err(cx.diagnostics);
  }
  if !records.has_module_syntax() {
    return Ok(cx.diagnostics);
  }

  let mut resolution = resolve::resolve_bindings(&mut cx.fresh, options.strategy, &records);
  resolve::rewrite_body(&mut resolution, &mut top_level.stx.body);

  let composed = match options.strategy {
    Strategy::Static => compose_static::compose_static_exports(&mut cx, &records, &mut resolution),
    Strategy::LiveBinding => {
      compose_live::compose_live_exports(&mut cx, &records, &mut resolution)
    }
  };
  assemble::assemble_module(&mut cx, top_level, &records, resolution, composed, output);
  Ok(cx.diagnostics)
}
