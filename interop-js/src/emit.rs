//! Import/interop emitter: one statement per loaded-module slot that is
//! actually referenced, grouped per specifier in first-seen order, plus the
//! shared interop helper declarations when a wrapped slot exists.

use ahash::HashMap;
use itertools::Itertools;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::decl::VarDeclMode;
use syntax_js::ast::stmt::Stmt;
use syntax_js::builder;
use syntax_js::loc::Loc;

use crate::helpers;
use crate::records::{ModuleRecords, SlotKind};
use crate::resolve::{Resolution, SlotId};
use crate::TransformContext;

/// `require("x")`, or `require(require.resolve("x"))` when the caller wants
/// specifiers resolved to their final form at load time.
fn load_expr(cx: &TransformContext, loc: Loc, specifier: &str) -> Node<Expr> {
  let spec = if cx.options.resolve_specifiers {
    builder::call(
      loc,
      builder::member(loc, builder::id(loc, "require"), "resolve"),
      vec![builder::string(loc, specifier)],
    )
  } else {
    builder::string(loc, specifier)
  };
  builder::call(loc, builder::id(loc, "require"), vec![spec])
}

fn wrap_helper(cx: &TransformContext, loc: Loc, kind: SlotKind, arg: Node<Expr>) -> Node<Expr> {
  let helper = match kind {
    SlotKind::DefaultUnwrapped => &cx.options.import_default_helper_name,
    SlotKind::NamespaceWrapped => &cx.options.import_all_helper_name,
    SlotKind::Raw => unreachable!("raw slots load without interop"),
  };
  builder::call(loc, builder::id(loc, helper.clone()), vec![arg])
}

/// The helper declarations, emitted at most once each and only when a slot
/// of the matching kind was materialized.
pub fn helper_decls(cx: &TransformContext, resolution: &Resolution) -> Vec<Node<Stmt>> {
  let loc = Loc(0, 0);
  let mut decls = Vec::new();
  let referenced = |kind: SlotKind| {
    resolution
      .slots
      .slots()
      .iter()
      .any(|slot| slot.kind == kind && slot.referenced)
  };
  if referenced(SlotKind::DefaultUnwrapped) {
    decls.push(helpers::default_unwrap_helper_decl(
      loc,
      &cx.options.import_default_helper_name,
    ));
  }
  if referenced(SlotKind::NamespaceWrapped) {
    decls.push(helpers::namespace_wrap_helper_decl(
      loc,
      &cx.options.import_all_helper_name,
    ));
  }
  decls
}

/// Emit the per-specifier load blocks. `after_slot` statements (namespace
/// re-export assignments, wildcard accessor loops) are interleaved directly
/// after the slot they depend on.
pub fn emit_load_statements(
  cx: &mut TransformContext,
  records: &ModuleRecords,
  resolution: &mut Resolution,
  after_slot: Vec<(SlotId, Node<Stmt>)>,
) -> Vec<Node<Stmt>> {
  let mut interleaved = after_slot
    .into_iter()
    .map(|(slot, stmt)| (slot.0, stmt))
    .into_group_map();

  // Static-strategy narrow loads, grouped by specifier in import order.
  let mut narrow: HashMap<&str, Vec<Node<Stmt>>> = HashMap::default();
  for (idx, binding) in records.imports.iter().enumerate() {
    if !resolution.used_imports[idx] {
      continue;
    }
    let loc = binding.loc;
    let member = binding
      .member
      .clone()
      .expect("narrow loads always project a member");
    narrow
      .entry(binding.specifier.as_str())
      .or_default()
      .push(builder::var_decl_stmt(
        loc,
        binding.local.clone(),
        Some(builder::member(
          loc,
          load_expr(cx, loc, &binding.specifier),
          member,
        )),
        VarDeclMode::Var,
      ));
  }

  let side_effect_locs: HashMap<&str, Loc> = records
    .side_effects
    .iter()
    .map(|import| (import.specifier.as_str(), import.loc))
    .collect();

  let mut out = Vec::new();
  for specifier in &records.specifier_order {
    let mut emitted_any = false;
    if let Some(mut loads) = narrow.remove(specifier.as_str()) {
      emitted_any = !loads.is_empty();
      out.append(&mut loads);
    }

    let raw = resolution.slots.lookup_id(specifier, SlotKind::Raw);
    let default = resolution
      .slots
      .lookup_id(specifier, SlotKind::DefaultUnwrapped);
    let ns = resolution
      .slots
      .lookup_id(specifier, SlotKind::NamespaceWrapped);
    let raw_referenced = raw.is_some_and(|id| resolution.slots.get(id).referenced);
    let default_referenced = default.is_some_and(|id| resolution.slots.get(id).referenced);
    let ns_referenced = ns.is_some_and(|id| resolution.slots.get(id).referenced);

    // A single raw load carries every derived slot whenever more than one
    // wrapping of the same specifier is needed, so the loader runs once.
    let carrier = if raw_referenced || (default_referenced && ns_referenced) {
      Some(match raw {
        Some(id) => id,
        None => resolution
          .slots
          .intern(&mut cx.fresh, specifier, SlotKind::Raw),
      })
    } else {
      None
    };

    let loc = records
      .imports
      .iter()
      .find(|binding| &binding.specifier == specifier)
      .map(|binding| binding.loc)
      .or_else(|| side_effect_locs.get(specifier.as_str()).copied())
      .unwrap_or(Loc(0, 0));

    if let Some(carrier) = carrier {
      let name = resolution.slots.get(carrier).name.clone();
      out.push(builder::var_decl_stmt(
        loc,
        name,
        Some(load_expr(cx, loc, specifier)),
        VarDeclMode::Var,
      ));
      emitted_any = true;
      if let Some(mut stmts) = interleaved.remove(&carrier.0) {
        out.append(&mut stmts);
      }
    }

    for (slot, kind) in [
      (default, SlotKind::DefaultUnwrapped),
      (ns, SlotKind::NamespaceWrapped),
    ] {
      let Some(slot) = slot else { continue };
      if !resolution.slots.get(slot).referenced {
        continue;
      }
      let source = match carrier {
        Some(carrier) => builder::id(loc, resolution.slots.get(carrier).name.clone()),
        None => load_expr(cx, loc, specifier),
      };
      let name = resolution.slots.get(slot).name.clone();
      out.push(builder::var_decl_stmt(
        loc,
        name,
        Some(wrap_helper(cx, loc, kind, source)),
        VarDeclMode::Var,
      ));
      emitted_any = true;
      if let Some(mut stmts) = interleaved.remove(&slot.0) {
        out.append(&mut stmts);
      }
    }

    // A side-effect-only import still forces exactly one load; any load
    // already emitted for this specifier has triggered the side effects.
    if !emitted_any && side_effect_locs.contains_key(specifier.as_str()) {
      let loc = side_effect_locs[specifier.as_str()];
      out.push(builder::expr_stmt(loc, load_expr(cx, loc, specifier)));
    }
  }

  // Any interleaved statement whose slot was somehow not materialized still
  // belongs in the output rather than being dropped.
  for (_, stmts) in interleaved.into_iter().sorted_by_key(|(slot, _)| *slot) {
    out.extend(stmts);
  }

  out
}
