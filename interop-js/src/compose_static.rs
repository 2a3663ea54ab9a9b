//! Static export composer: the export surface is populated by plain
//! assignments, each fixed at export-statement time. Cheapest possible reads
//! for importers, but mutation of an exported binding after the export
//! statement runs is not observed.

use syntax_js::builder;

use crate::assemble::ComposedExports;
use crate::helpers;
use crate::records::{ExportRecord, ModuleRecords, SlotKind};
use crate::resolve::Resolution;
use crate::TransformContext;

pub fn compose_static_exports(
  cx: &mut TransformContext,
  records: &ModuleRecords,
  resolution: &mut Resolution,
) -> ComposedExports {
  let mut after_slot = Vec::new();
  let mut in_body = Vec::new();
  let mut named_from = Vec::new();
  // The default export is deferred to the very end of the emitted statement
  // list, after all named exports, regardless of source position.
  let mut defaults = Vec::new();
  let mut any_exports = false;

  for record in &records.exports {
    any_exports = true;
    match record {
      ExportRecord::NamedLocal {
        exported,
        local,
        insert_at,
        loc,
        ..
      } => {
        // Assigned at the export statement's own position, so the exported
        // value snapshots the binding as it was there.
        let value = resolution
          .resolve_local_value(local, *loc)
          .unwrap_or_else(|| builder::id(*loc, local.clone()));
        in_body.push((*insert_at, helpers::export_assign(*loc, exported, value)));
      }
      ExportRecord::DefaultLocal { local, loc, .. } => {
        defaults.push(helpers::export_assign(
          *loc,
          "default",
          builder::id(*loc, local.clone()),
        ));
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
        named_from.push(helpers::export_assign(*loc, exported, value));
      }
      ExportRecord::ReExportNamespace {
        specifier,
        exported,
        loc,
      } => {
        // Assigned right after the namespace slot loads, not deferred.
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
        // The copy loop runs with the loads, before any explicit export
        // statement, so explicit exports always win by overwriting.
        let slot = resolution
          .slots
          .require(&mut cx.fresh, specifier, SlotKind::Raw);
        let slot_name = resolution.slots.get(slot).name.clone();
        after_slot.push((slot, helpers::export_all_static(*loc, &slot_name)));
      }
    }
  }

  // Deferred re-exports run after the body (beating wildcard copies), then
  // the default export closes the program.
  let mut epilogue = named_from;
  epilogue.append(&mut defaults);

  ComposedExports {
    prologue: Vec::new(),
    after_slot,
    in_body,
    epilogue,
    any_exports,
  }
}
