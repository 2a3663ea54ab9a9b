//! Live-binding export composer: named and default exports become accessor
//! properties whose getters read the local binding at access time, so
//! importers observe reassignment after export, including across circular
//! imports. Function/class declarations never change after declaration and
//! take a plain assignment at program end instead.

use itertools::Itertools;
use syntax_js::builder;
use syntax_js::loc::Loc;

use crate::assemble::ComposedExports;
use crate::helpers;
use crate::records::{ExportRecord, ModuleRecords, SlotKind};
use crate::resolve::Resolution;
use crate::TransformContext;

pub fn compose_live_exports(
  cx: &mut TransformContext,
  records: &ModuleRecords,
  resolution: &mut Resolution,
) -> ComposedExports {
  let mut prologue = Vec::new();
  let mut after_slot = Vec::new();
  let mut epilogue = Vec::new();
  let any_exports = !records.exports.is_empty();

  // Wildcard re-export loops must never shadow an explicit export, even one
  // whose accessor is defined later, so the explicit name set is reified up
  // front.
  let export_names_local = records
    .exports
    .iter()
    .any(|record| matches!(record, ExportRecord::ReExportAll { .. }))
    .then(|| cx.fresh_name("_exportNames"));
  if let Some(local) = &export_names_local {
    let names: Vec<String> = records
      .exports
      .iter()
      .filter_map(ExportRecord::exported_name)
      .filter(|name| *name != "default")
      .unique()
      .map(String::from)
      .collect();
    prologue.push(helpers::export_names_decl(Loc(0, 0), local, &names));
  }

  for record in &records.exports {
    match record {
      ExportRecord::NamedLocal {
        exported,
        local,
        declaration,
        loc,
        ..
      } => {
        if *declaration {
          epilogue.push(helpers::export_assign(
            *loc,
            exported,
            builder::id(*loc, local.clone()),
          ));
        } else {
          let value = resolution
            .resolve_local_value(local, *loc)
            .unwrap_or_else(|| builder::id(*loc, local.clone()));
          prologue.push(helpers::export_accessor(*loc, exported, value));
        }
      }
      ExportRecord::DefaultLocal {
        local,
        declaration,
        loc,
      } => {
        if *declaration {
          epilogue.push(helpers::export_assign(
            *loc,
            "default",
            builder::id(*loc, local.clone()),
          ));
        } else {
          prologue.push(helpers::export_accessor(
            *loc,
            "default",
            builder::id(*loc, local.clone()),
          ));
        }
      }
      ExportRecord::ReExportNamed {
        specifier,
        imported,
        exported,
        loc,
      } => {
        let (kind, member) = if imported == "default" {
          (SlotKind::DefaultUnwrapped, "default")
        } else {
          (SlotKind::Raw, imported.as_str())
        };
        let slot = resolution.slots.require(&mut cx.fresh, specifier, kind);
        let slot_name = resolution.slots.get(slot).name.clone();
        let value = builder::member(*loc, builder::id(*loc, slot_name), member);
        after_slot.push((slot, helpers::export_accessor(*loc, exported, value)));
      }
      ExportRecord::ReExportNamespace {
        specifier,
        exported,
        loc,
      } => {
        // The namespace object is fixed once created, so a plain assignment
        // suffices even under the live strategy.
        let slot = resolution
          .slots
          .require(&mut cx.fresh, specifier, SlotKind::NamespaceWrapped);
        let slot_name = resolution.slots.get(slot).name.clone();
        after_slot.push((
          slot,
          helpers::export_assign(*loc, exported, builder::id(*loc, slot_name)),
        ));
      }
      ExportRecord::ReExportAll { specifier, loc } => {
        let slot = resolution
          .slots
          .require(&mut cx.fresh, specifier, SlotKind::Raw);
        let slot_name = resolution.slots.get(slot).name.clone();
        after_slot.push((
          slot,
          helpers::export_all_live(*loc, &slot_name, export_names_local.as_deref()),
        ));
      }
    }
  }

  ComposedExports {
    prologue,
    after_slot,
    in_body: Vec::new(),
    epilogue,
    any_exports,
  }
}
