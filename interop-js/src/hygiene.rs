//! Collision-free naming for synthesized locals.
//!
//! Every name the transform invents (per-specifier slot locals, the
//! synthesized default-export local, the export-name set) is produced here,
//! seeded from a human-readable hint and disambiguated with a counter suffix
//! on collision.

use ahash::HashSet;
use derive_visitor::{DriveMut, VisitorMut};
use once_cell::sync::Lazy;
use syntax_js::ast::expr::pat::{ClassOrFuncName, IdPat};
use syntax_js::ast::expr::IdExpr;
use syntax_js::ast::node::Node;
use syntax_js::ast::stx::TopLevel;

use crate::records::SlotKind;

// Names that may never be synthesized as binding identifiers, either because
// they are reserved words or because the emitted program gives them a meaning.
static RESERVED: Lazy<HashSet<&'static str>> = Lazy::new(|| {
  [
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true",
    "try", "typeof", "var", "void", "while", "with", "let", "static", "yield", "await",
    // Bindings the emitted program relies on.
    "require", "exports", "module", "Object",
  ]
  .into_iter()
  .collect()
});

#[derive(Debug)]
pub struct FreshNames {
  used: HashSet<String>,
}

impl FreshNames {
  pub fn new(used: HashSet<String>) -> Self {
    Self { used }
  }

  /// Reserve a caller-chosen name (e.g. a configured helper name) so no
  /// synthesized local can collide with it.
  pub fn reserve(&mut self, name: &str) {
    self.used.insert(name.to_string());
  }

  pub fn fresh(&mut self, preferred: impl Into<String>) -> String {
    let preferred = preferred.into();
    if !RESERVED.contains(preferred.as_str()) && self.used.insert(preferred.clone()) {
      return preferred;
    }
    for suffix in 1usize.. {
      let candidate = format!("{preferred}_{suffix}");
      if self.used.insert(candidate.clone()) {
        return candidate;
      }
    }
    unreachable!();
  }
}

/// Every identifier string that occurs anywhere in the module, binding or
/// usage. Seeding the generator with all of them is coarser than true scope
/// analysis but guarantees synthesized names never capture or shadow.
pub fn collect_identifier_strings(top_level: &mut Node<TopLevel>) -> HashSet<String> {
  type IdExprNode = Node<IdExpr>;
  type IdPatNode = Node<IdPat>;
  type ClassOrFuncNameNode = Node<ClassOrFuncName>;

  #[derive(VisitorMut)]
  #[visitor(IdExprNode(enter), IdPatNode(enter), ClassOrFuncNameNode(enter))]
  struct Collector {
    names: HashSet<String>,
  }

  impl Collector {
    fn enter_id_expr_node(&mut self, node: &mut IdExprNode) {
      self.names.insert(node.stx.name.clone());
    }

    fn enter_id_pat_node(&mut self, node: &mut IdPatNode) {
      self.names.insert(node.stx.name.clone());
    }

    fn enter_class_or_func_name_node(&mut self, node: &mut ClassOrFuncNameNode) {
      self.names.insert(node.stx.name.clone());
    }
  }

  let mut collector = Collector {
    names: HashSet::default(),
  };
  top_level.drive_mut(&mut collector);
  collector.names
}

/// Derive the identifier hint for a specifier's slot local, e.g.
/// `"./util/path-browserify"` becomes `_path_browserify` for the raw slot.
pub fn slot_hint(specifier: &str, kind: SlotKind) -> String {
  let mut base = String::with_capacity(specifier.len() + 1);
  base.push('_');
  // Only the last path segment carries meaning for readability.
  let tail = specifier
    .rsplit('/')
    .find(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
    .unwrap_or(specifier);
  for c in tail.chars() {
    if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
      base.push(c);
    } else {
      base.push('_');
    }
  }
  if base.len() > 1 && base[1..].starts_with(|c: char| c.is_ascii_digit()) {
    base.insert(1, '_');
  }
  match kind {
    SlotKind::Raw => base,
    SlotKind::DefaultUnwrapped => format!("{base}_default"),
    SlotKind::NamespaceWrapped => format!("{base}_ns"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fresh_prefers_hint_then_suffixes() {
    let mut names = FreshNames::new(HashSet::default());
    assert_eq!(names.fresh("_a"), "_a");
    assert_eq!(names.fresh("_a"), "_a_1");
    assert_eq!(names.fresh("_a"), "_a_2");
  }

  #[test]
  fn fresh_never_yields_reserved_or_runtime_names() {
    let mut names = FreshNames::new(HashSet::default());
    assert_eq!(names.fresh("exports"), "exports_1");
    assert_eq!(names.fresh("default"), "default_1");
  }

  #[test]
  fn reserved_caller_names_are_avoided() {
    let mut names = FreshNames::new(HashSet::default());
    names.reserve("_interop");
    assert_eq!(names.fresh("_interop"), "_interop_1");
  }

  #[test]
  fn slot_hints_sanitize_specifiers() {
    assert_eq!(slot_hint("foo", SlotKind::Raw), "_foo");
    assert_eq!(slot_hint("./a-b", SlotKind::Raw), "_a_b");
    assert_eq!(
      slot_hint("@scope/pkg", SlotKind::DefaultUnwrapped),
      "_pkg_default"
    );
    assert_eq!(slot_hint("../x", SlotKind::NamespaceWrapped), "_x_ns");
    assert_eq!(slot_hint("3d", SlotKind::Raw), "__3d");
  }
}
