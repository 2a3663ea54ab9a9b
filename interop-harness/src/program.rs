//! Shorthand constructors for the module shapes the transform's tests feed
//! it. Everything defaults to a zero location; the `_at` variants exist for
//! tests that assert on diagnostic spans.

use syntax_js::ast::expr::Expr;
use syntax_js::ast::import_export::*;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::decl::VarDeclMode;
use syntax_js::ast::stmt::*;
use syntax_js::ast::stx::TopLevel;
use syntax_js::builder;
use syntax_js::loc::Loc;

pub const L: Loc = Loc(0, 0);

pub fn module(body: Vec<Node<Stmt>>) -> Node<TopLevel> {
  Node::new(L, TopLevel { body })
}

/// Take a (transformed) module's statements for registry registration.
pub fn into_body(top: Node<TopLevel>) -> Vec<Node<Stmt>> {
  top.stx.body
}

pub fn import_side_effect(specifier: &str) -> Node<Stmt> {
  Node::new(
    L,
    Stmt::Import(Node::new(L, ImportStmt {
      type_only: false,
      default: None,
      names: None,
      module: specifier.to_string(),
    })),
  )
}

pub fn import_default(local: &str, specifier: &str) -> Node<Stmt> {
  Node::new(
    L,
    Stmt::Import(Node::new(L, ImportStmt {
      type_only: false,
      default: Some(builder::pat_decl(L, local)),
      names: None,
      module: specifier.to_string(),
    })),
  )
}

pub fn import_ns(local: &str, specifier: &str) -> Node<Stmt> {
  Node::new(
    L,
    Stmt::Import(Node::new(L, ImportStmt {
      type_only: false,
      default: None,
      names: Some(ImportNames::All(builder::pat_decl(L, local))),
      module: specifier.to_string(),
    })),
  )
}

/// `import { a, b as c } from "specifier"` — pairs of (imported, local
/// alias); pass the same name twice for no alias.
pub fn import_named(specifier: &str, names: &[(&str, &str)]) -> Node<Stmt> {
  let entries = names
    .iter()
    .map(|(imported, local)| {
      Node::new(L, ImportName {
        type_only: false,
        importable: ModuleExportImportName::Ident(imported.to_string()),
        alias: builder::pat_decl(L, *local),
      })
    })
    .collect();
  Node::new(
    L,
    Stmt::Import(Node::new(L, ImportStmt {
      type_only: false,
      default: None,
      names: Some(ImportNames::Specific(entries)),
      module: specifier.to_string(),
    })),
  )
}

/// `import type { T } from "specifier"` — dropped entirely by the scanner.
pub fn import_type_only(specifier: &str, name: &str) -> Node<Stmt> {
  Node::new(
    L,
    Stmt::Import(Node::new(L, ImportStmt {
      type_only: true,
      default: None,
      names: Some(ImportNames::Specific(vec![Node::new(L, ImportName {
        type_only: false,
        importable: ModuleExportImportName::Ident(name.to_string()),
        alias: builder::pat_decl(L, name),
      })])),
      module: specifier.to_string(),
    })),
  )
}

fn export_entries(names: &[(&str, &str)]) -> Vec<Node<ExportName>> {
  names
    .iter()
    .map(|(local, exported)| {
      Node::new(L, ExportName {
        type_only: false,
        exportable: ModuleExportImportName::Ident(local.to_string()),
        alias: Node::new(L, syntax_js::ast::expr::pat::IdPat {
          name: exported.to_string(),
        }),
      })
    })
    .collect()
}

/// `export { a, b as c };` — pairs of (local, exported alias).
pub fn export_named(names: &[(&str, &str)]) -> Node<Stmt> {
  export_named_at(L, names)
}

pub fn export_named_at(loc: Loc, names: &[(&str, &str)]) -> Node<Stmt> {
  Node::new(
    loc,
    Stmt::ExportList(Node::new(loc, ExportListStmt {
      type_only: false,
      names: ExportNames::Specific(export_entries(names)),
      from: None,
    })),
  )
}

/// `export { "strange name" as alias };` — rejected by the transform.
pub fn export_named_str(local: &str, exported: &str) -> Node<Stmt> {
  Node::new(
    L,
    Stmt::ExportList(Node::new(L, ExportListStmt {
      type_only: false,
      names: ExportNames::Specific(vec![Node::new(L, ExportName {
        type_only: false,
        exportable: ModuleExportImportName::Str(local.to_string()),
        alias: Node::new(L, syntax_js::ast::expr::pat::IdPat {
          name: exported.to_string(),
        }),
      })]),
      from: None,
    })),
  )
}

/// `export { a, b as c } from "specifier"` — pairs of (imported, exported).
pub fn export_named_from(specifier: &str, names: &[(&str, &str)]) -> Node<Stmt> {
  Node::new(
    L,
    Stmt::ExportList(Node::new(L, ExportListStmt {
      type_only: false,
      names: ExportNames::Specific(export_entries(names)),
      from: Some(specifier.to_string()),
    })),
  )
}

pub fn export_all_from(specifier: &str) -> Node<Stmt> {
  Node::new(
    L,
    Stmt::ExportList(Node::new(L, ExportListStmt {
      type_only: false,
      names: ExportNames::All(None),
      from: Some(specifier.to_string()),
    })),
  )
}

pub fn export_ns_from(alias: &str, specifier: &str) -> Node<Stmt> {
  Node::new(
    L,
    Stmt::ExportList(Node::new(L, ExportListStmt {
      type_only: false,
      names: ExportNames::All(Some(Node::new(L, syntax_js::ast::expr::pat::IdPat {
        name: alias.to_string(),
      }))),
      from: Some(specifier.to_string()),
    })),
  )
}

pub fn export_default_expr(expression: Node<Expr>) -> Node<Stmt> {
  Node::new(
    L,
    Stmt::ExportDefaultExpr(Node::new(L, ExportDefaultExprStmt { expression })),
  )
}

/// `export <mode> name = init;`
pub fn export_decl(mode: VarDeclMode, name: &str, init: Node<Expr>) -> Node<Stmt> {
  let Stmt::VarDecl(mut decl) = *builder::var_decl_stmt(L, name, Some(init), mode).stx else {
    unreachable!();
  };
  decl.stx.export = true;
  Node::new(L, Stmt::VarDecl(decl))
}

pub fn export_let(name: &str, init: Node<Expr>) -> Node<Stmt> {
  export_decl(VarDeclMode::Let, name, init)
}

pub fn export_const(name: &str, init: Node<Expr>) -> Node<Stmt> {
  export_decl(VarDeclMode::Const, name, init)
}

/// `export function name() { body }`
pub fn export_func(name: &str, body: Vec<Node<Stmt>>) -> Node<Stmt> {
  let Stmt::FunctionDecl(mut func) = *builder::func_decl_stmt(L, name, vec![], body).stx else {
    unreachable!();
  };
  func.stx.export = true;
  Node::new(L, Stmt::FunctionDecl(func))
}

/// `export default function [name]() { body }`
pub fn export_default_func(name: Option<&str>, body: Vec<Node<Stmt>>) -> Node<Stmt> {
  let Stmt::FunctionDecl(mut func) =
    *builder::func_decl_stmt(L, name.unwrap_or(""), vec![], body).stx
  else {
    unreachable!();
  };
  if name.is_none() {
    func.stx.name = None;
  }
  func.stx.export_default = true;
  Node::new(L, Stmt::FunctionDecl(func))
}

/// `let name = init;`
pub fn let_decl(name: &str, init: Node<Expr>) -> Node<Stmt> {
  builder::var_decl_stmt(L, name, Some(init), VarDeclMode::Let)
}

/// `name = value;`
pub fn assign_stmt(name: &str, value: Node<Expr>) -> Node<Stmt> {
  builder::expr_stmt(L, builder::assign_expr(L, builder::id(L, name), value))
}
