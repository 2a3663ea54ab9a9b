//! The strategy-agnostic intermediate representation produced by the scanner
//! and consumed by the composers and the import emitter.

use syntax_js::loc::Loc;

/// How the value loaded for a specifier must be shaped before a binding can
/// read from it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SlotKind {
  /// The loader's return value, untouched.
  Raw,
  /// Wrapped by the default-unwrap helper so `.default` access always works.
  DefaultUnwrapped,
  /// Wrapped by the namespace helper so enumerable own-property access works
  /// uniformly.
  NamespaceWrapped,
}

/// One local name introduced by an import declaration.
///
/// Created by the scanner, consumed by the reference-rewrite pass, never
/// mutated after creation.
#[derive(Debug)]
pub struct ImportBinding {
  pub local: String,
  pub specifier: String,
  pub kind: SlotKind,
  /// Property projected off the slot. `None` for namespace imports, which
  /// reference the slot directly; `Some("default")` for default imports.
  pub member: Option<String>,
  pub loc: Loc,
}

#[derive(Debug)]
pub enum ExportRecord {
  /// `export { a as b }`, `export const b = …`, `export function b() {}`
  NamedLocal {
    exported: String,
    local: String,
    /// Backed by a function/class declaration, whose binding never changes
    /// after declaration.
    declaration: bool,
    /// Index into the scanned body where the export statement originally
    /// stood (right after its declaration, if it had one). The static
    /// composer assigns at this position so the exported value is fixed at
    /// export-statement time; the live composer ignores it, since accessors
    /// defer the read.
    insert_at: usize,
    loc: Loc,
  },
  /// `export default …`. `local` is the declaration's name or a synthesized
  /// local the scanner assigned the expression to.
  DefaultLocal {
    local: String,
    declaration: bool,
    loc: Loc,
  },
  /// `export { a as b } from "x"`. Introduces no local name in this module.
  ReExportNamed {
    specifier: String,
    /// The name read from the source module; may be `default`.
    imported: String,
    exported: String,
    loc: Loc,
  },
  /// `export * as ns from "x"`
  ReExportNamespace {
    specifier: String,
    exported: String,
    loc: Loc,
  },
  /// `export * from "x"`. Re-exports every enumerable own key except
  /// `default`/reserved keys, dynamically.
  ReExportAll { specifier: String, loc: Loc },
}

impl ExportRecord {
  /// The name this record defines on the export surface, if statically known.
  pub fn exported_name(&self) -> Option<&str> {
    match self {
      ExportRecord::NamedLocal { exported, .. } => Some(exported),
      ExportRecord::DefaultLocal { .. } => Some("default"),
      ExportRecord::ReExportNamed { exported, .. } => Some(exported),
      ExportRecord::ReExportNamespace { exported, .. } => Some(exported),
      ExportRecord::ReExportAll { .. } => None,
    }
  }
}

/// `import "x"`: must trigger the module's side effects even though it binds
/// nothing.
#[derive(Debug)]
pub struct SideEffectImport {
  pub specifier: String,
  pub loc: Loc,
}

#[derive(Debug, Default)]
pub struct ModuleRecords {
  pub imports: Vec<ImportBinding>,
  pub exports: Vec<ExportRecord>,
  pub side_effects: Vec<SideEffectImport>,
  /// Every specifier named by any declaration, in first-seen order. Emitted
  /// load statements follow this order.
  pub specifier_order: Vec<String>,
}

impl ModuleRecords {
  pub fn note_specifier(&mut self, specifier: &str) {
    if !self.specifier_order.iter().any(|s| s == specifier) {
      self.specifier_order.push(specifier.to_string());
    }
  }

  pub fn has_module_syntax(&self) -> bool {
    !self.imports.is_empty() || !self.exports.is_empty() || !self.side_effects.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn specifier_order_dedupes_preserving_first_seen() {
    let mut records = ModuleRecords::default();
    records.note_specifier("b");
    records.note_specifier("a");
    records.note_specifier("b");
    assert_eq!(records.specifier_order, vec!["b", "a"]);
  }

  #[test]
  fn exported_name_of_default_is_default() {
    let record = ExportRecord::DefaultLocal {
      local: "_default".into(),
      declaration: false,
      loc: Loc(0, 0),
    };
    assert_eq!(record.exported_name(), Some("default"));
  }
}
