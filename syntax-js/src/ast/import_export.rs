use super::expr::pat::IdPat;
use super::node::Node;
use super::stmt::decl::PatDecl;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::{Deserialize, Serialize};

/// A name on either side of an import/export specifier. ECMAScript allows
/// string names (`export { x as "not an ident" }`); the transform rejects
/// them, but the tree must still be able to represent them.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub enum ModuleExportImportName {
  Ident(String),
  Str(String),
}

impl ModuleExportImportName {
  pub fn as_str(&self) -> &str {
    match self {
      ModuleExportImportName::Ident(name) | ModuleExportImportName::Str(name) => name,
    }
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExportName {
  #[drive(skip)]
  pub type_only: bool, // TypeScript: export { type Foo }
  #[drive(skip)]
  pub exportable: ModuleExportImportName,
  // This is always set, even when no explicit alias is provided, so downstream
  // tasks never have to reconstruct the implicit alias.
  pub alias: Node<IdPat>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ExportNames {
  // `export * from "module"`
  // `export * as name from "module"`
  All(Option<Node<IdPat>>),
  // `export {a as default, b as c, d, "e" as f}`
  // `export {default, a as b, c} from "module"`
  // `default` is still a name, so we don't use an enum.
  Specific(Vec<Node<ExportName>>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportName {
  #[drive(skip)]
  pub type_only: bool, // TypeScript: import { type Foo }
  #[drive(skip)]
  pub importable: ModuleExportImportName,
  // This is always set, even when no explicit alias is provided.
  // PatDecl always contains IdPat.
  pub alias: Node<PatDecl>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ImportNames {
  // `import * as name`
  // PatDecl always contains IdPat.
  All(Node<PatDecl>),
  // `import {a as b, c, default as e}`
  // `default` is still a name, so we don't use an enum.
  Specific(Vec<Node<ImportName>>),
}

#[cfg(test)]
mod tests {
  use super::ModuleExportImportName;
  use serde_json::json;

  #[test]
  fn module_export_import_name_serializes_with_tag() {
    let ident = ModuleExportImportName::Ident("a".into());
    assert_eq!(serde_json::to_value(&ident).unwrap(), json!({"Ident": "a"}));
    let string_name = ModuleExportImportName::Str("a-b".into());
    assert_eq!(
      serde_json::to_value(&string_name).unwrap(),
      json!({"Str": "a-b"})
    );
  }
}
