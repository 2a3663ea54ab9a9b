//! Statement assembler: places the module marker, helper declarations,
//! emitted loads, the rewritten body, and the composed export statements in
//! final order, and maintains the caller's ES-module side channel.

use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::Stmt;
use syntax_js::ast::stx::TopLevel;
use syntax_js::loc::Loc;

use crate::emit;
use crate::helpers;
use crate::records::ModuleRecords;
use crate::resolve::{Resolution, SlotId};
use crate::{ModuleOutput, Strategy, TransformContext};

/// What a composer produced, keyed by where each statement must land.
pub struct ComposedExports {
  /// Before any load statement runs: live accessors and the explicit
  /// export-name set. Declared early so circular importers can already read
  /// this module's surface.
  pub prologue: Vec<Node<Stmt>>,
  /// Interleaved immediately after the named slot's load statement.
  pub after_slot: Vec<(SlotId, Node<Stmt>)>,
  /// Spliced into the body at recorded insertion points, so static exports
  /// capture their value at export-statement time.
  pub in_body: Vec<(usize, Node<Stmt>)>,
  /// After the module body: deferred re-exports, declaration-backed exports,
  /// and the default export last.
  pub epilogue: Vec<Node<Stmt>>,
  pub any_exports: bool,
}

pub fn assemble_module(
  cx: &mut TransformContext,
  top_level: &mut Node<TopLevel>,
  records: &ModuleRecords,
  mut resolution: Resolution,
  composed: ComposedExports,
  output: &mut ModuleOutput,
) {
  let body = std::mem::take(&mut top_level.stx.body);
  let body = splice_in_body(body, composed.in_body);
  let loads = emit::emit_load_statements(cx, records, &mut resolution, composed.after_slot);
  let helper_decls = emit::helper_decls(cx, &resolution);

  let mut out = Vec::with_capacity(
    1 + helper_decls.len()
      + composed.prologue.len()
      + loads.len()
      + body.len()
      + composed.epilogue.len(),
  );
  if composed.any_exports {
    out.push(match cx.options.strategy {
      Strategy::Static => helpers::module_marker_static(Loc(0, 0)),
      Strategy::LiveBinding => helpers::module_marker_live(Loc(0, 0)),
    });
  }
  out.extend(helper_decls);
  out.extend(composed.prologue);
  out.extend(loads);
  out.extend(body);
  out.extend(composed.epilogue);
  top_level.stx.body = out;

  // The flag is only ever raised, never cleared: a module without module
  // syntax must leave the caller-supplied value untouched.
  if composed.any_exports || resolution.slots.any_interop_slot_referenced() {
    output.is_es_module = true;
  }
}

/// Insert statements before the body statement whose index they recorded,
/// preserving record order for equal indices.
fn splice_in_body(
  body: Vec<Node<Stmt>>,
  mut insertions: Vec<(usize, Node<Stmt>)>,
) -> Vec<Node<Stmt>> {
  if insertions.is_empty() {
    return body;
  }
  let mut out = Vec::with_capacity(body.len() + insertions.len());
  for (index, stmt) in body.into_iter().enumerate() {
    let mut i = 0;
    while i < insertions.len() {
      if insertions[i].0 <= index {
        out.push(insertions.remove(i).1);
      } else {
        i += 1;
      }
    }
    out.push(stmt);
  }
  out.extend(insertions.into_iter().map(|(_, stmt)| stmt));
  out
}
