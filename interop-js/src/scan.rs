//! Declaration scanner: one traversal of the module's top-level statements
//! that classifies every import/export declaration into an IR record and
//! removes it from the tree. Non-module statements stay in place in their
//! original relative order; exported declarations are re-inserted in place
//! with the `export` modifier stripped.

use ahash::HashMap;
use syntax_js::ast::expr::pat::{ClassOrFuncName, Pat};
use syntax_js::ast::import_export::{ExportNames, ImportNames, ModuleExportImportName};
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::decl::{PatDecl, VarDeclMode};
use syntax_js::ast::stmt::*;
use syntax_js::builder;
use syntax_js::loc::Loc;

use crate::records::*;
use crate::TransformContext;
use crate::{ERR_UNRESOLVED_EXPORT, ERR_UNSUPPORTED_SYNTAX, WARN_SKIPPED_BINDING};

/// What a top-level name is bound by, for validating same-module named
/// exports and for the live strategy's declaration/accessor split.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BindingKind {
  /// Function or class declaration: the binding never legitimately changes
  /// after the declaration statement runs.
  Declaration,
  /// Everything else: var/let/const bindings and import-introduced locals.
  Other,
}

pub type ModuleBindings = HashMap<String, BindingKind>;

/// Collect every name bound at module scope, including `var`s hoisted out of
/// nested blocks and locals introduced by imports. Runs before scanning so
/// that forward-referencing export lists validate correctly.
pub fn collect_module_bindings(body: &[Node<Stmt>]) -> ModuleBindings {
  let mut bindings = ModuleBindings::default();
  for stmt in body {
    collect_stmt_bindings(stmt, true, &mut bindings);
  }
  bindings
}

fn collect_stmt_bindings(stmt: &Node<Stmt>, top_level: bool, bindings: &mut ModuleBindings) {
  match stmt.stx.as_ref() {
    Stmt::FunctionDecl(func) => {
      if top_level {
        if let Some(name) = &func.stx.name {
          bindings.insert(name.stx.name.clone(), BindingKind::Declaration);
        }
      }
    }
    Stmt::ClassDecl(class) => {
      if top_level {
        if let Some(name) = &class.stx.name {
          bindings.insert(name.stx.name.clone(), BindingKind::Declaration);
        }
      }
    }
    Stmt::VarDecl(decl) => {
      // Nested declarations only reach module scope through `var` hoisting.
      if top_level || decl.stx.mode == VarDeclMode::Var {
        for declarator in &decl.stx.declarators {
          let mut names = Vec::new();
          collect_pat_names(&declarator.pattern.stx.pat, &mut names);
          for (name, _) in names {
            bindings.insert(name, BindingKind::Other);
          }
        }
      }
    }
    Stmt::Import(import) => {
      if import.stx.type_only {
        return;
      }
      if let Some(default) = &import.stx.default {
        if let Some(name) = pat_decl_name(default) {
          bindings.insert(name.to_string(), BindingKind::Other);
        }
      }
      match &import.stx.names {
        Some(ImportNames::All(alias)) => {
          if let Some(name) = pat_decl_name(alias) {
            bindings.insert(name.to_string(), BindingKind::Other);
          }
        }
        Some(ImportNames::Specific(entries)) => {
          for entry in entries {
            if entry.stx.type_only {
              continue;
            }
            if let Some(name) = pat_decl_name(&entry.stx.alias) {
              bindings.insert(name.to_string(), BindingKind::Other);
            }
          }
        }
        None => {}
      }
    }
    // `var` declarations inside nested statements still bind at module scope.
    Stmt::Block(block) => {
      for stmt in &block.stx.body {
        collect_stmt_bindings(stmt, false, bindings);
      }
    }
    Stmt::If(if_stmt) => {
      collect_stmt_bindings(&if_stmt.stx.consequent, false, bindings);
      if let Some(alternate) = &if_stmt.stx.alternate {
        collect_stmt_bindings(alternate, false, bindings);
      }
    }
    Stmt::DoWhile(do_while) => collect_stmt_bindings(&do_while.stx.body, false, bindings),
    Stmt::While(while_stmt) => collect_stmt_bindings(&while_stmt.stx.body, false, bindings),
    Stmt::ForIn(for_in) => {
      collect_for_lhs_bindings(&for_in.stx.lhs, bindings);
      for stmt in &for_in.stx.body.stx.body {
        collect_stmt_bindings(stmt, false, bindings);
      }
    }
    Stmt::ForOf(for_of) => {
      collect_for_lhs_bindings(&for_of.stx.lhs, bindings);
      for stmt in &for_of.stx.body.stx.body {
        collect_stmt_bindings(stmt, false, bindings);
      }
    }
    Stmt::ForTriple(for_triple) => {
      if let ForTripleStmtInit::Decl(decl) = &for_triple.stx.init {
        if decl.stx.mode == VarDeclMode::Var {
          for declarator in &decl.stx.declarators {
            let mut names = Vec::new();
            collect_pat_names(&declarator.pattern.stx.pat, &mut names);
            for (name, _) in names {
              bindings.insert(name, BindingKind::Other);
            }
          }
        }
      }
      for stmt in &for_triple.stx.body.stx.body {
        collect_stmt_bindings(stmt, false, bindings);
      }
    }
    Stmt::Label(label) => collect_stmt_bindings(&label.stx.statement, false, bindings),
    Stmt::Try(try_stmt) => {
      for stmt in &try_stmt.stx.wrapped.stx.body {
        collect_stmt_bindings(stmt, false, bindings);
      }
      if let Some(catch) = &try_stmt.stx.catch {
        for stmt in &catch.stx.body {
          collect_stmt_bindings(stmt, false, bindings);
        }
      }
      if let Some(finally) = &try_stmt.stx.finally {
        for stmt in &finally.stx.body {
          collect_stmt_bindings(stmt, false, bindings);
        }
      }
    }
    Stmt::Switch(switch) => {
      for branch in &switch.stx.branches {
        for stmt in &branch.stx.body {
          collect_stmt_bindings(stmt, false, bindings);
        }
      }
    }
    _ => {}
  }
}

fn collect_for_lhs_bindings(lhs: &ForInOfLhs, bindings: &mut ModuleBindings) {
  if let ForInOfLhs::Decl((VarDeclMode::Var, pat_decl)) = lhs {
    let mut names = Vec::new();
    collect_pat_names(&pat_decl.stx.pat, &mut names);
    for (name, _) in names {
      bindings.insert(name, BindingKind::Other);
    }
  }
}

/// Recursively collect every identifier bound by a pattern, with the loc of
/// the binding identifier. Bindings with an empty name are skipped here; the
/// exported-pattern path reports them (see `scan_exported_pat`).
fn collect_pat_names(pat: &Node<Pat>, out: &mut Vec<(String, Loc)>) {
  match pat.stx.as_ref() {
    Pat::Id(id) => {
      if !id.stx.name.is_empty() {
        out.push((id.stx.name.clone(), id.loc));
      }
    }
    Pat::Arr(arr) => {
      for elem in arr.stx.elements.iter().flatten() {
        collect_pat_names(&elem.target, out);
      }
      if let Some(rest) = &arr.stx.rest {
        collect_pat_names(rest, out);
      }
    }
    Pat::Obj(obj) => {
      for prop in &obj.stx.properties {
        collect_pat_names(&prop.stx.target, out);
      }
      if let Some(rest) = &obj.stx.rest {
        if !rest.stx.name.is_empty() {
          out.push((rest.stx.name.clone(), rest.loc));
        }
      }
    }
  }
}

/// Like `collect_pat_names`, but reports a skipped-binding diagnostic for
/// malformed (empty-named) binding identifiers, since a partially scanned
/// export list is still useful to the caller.
fn scan_exported_pat(
  cx: &mut TransformContext,
  pat: &Node<Pat>,
  out: &mut Vec<(String, Loc)>,
) {
  match pat.stx.as_ref() {
    Pat::Id(id) => {
      if id.stx.name.is_empty() {
        cx.warning(
          id.loc,
          WARN_SKIPPED_BINDING,
          "skipping malformed binding in exported declaration",
        );
      } else {
        out.push((id.stx.name.clone(), id.loc));
      }
    }
    Pat::Arr(arr) => {
      for elem in arr.stx.elements.iter().flatten() {
        scan_exported_pat(cx, &elem.target, out);
      }
      if let Some(rest) = &arr.stx.rest {
        scan_exported_pat(cx, rest, out);
      }
    }
    Pat::Obj(obj) => {
      for prop in &obj.stx.properties {
        scan_exported_pat(cx, &prop.stx.target, out);
      }
      if let Some(rest) = &obj.stx.rest {
        if rest.stx.name.is_empty() {
          cx.warning(
            rest.loc,
            WARN_SKIPPED_BINDING,
            "skipping malformed binding in exported declaration",
          );
        } else {
          out.push((rest.stx.name.clone(), rest.loc));
        }
      }
    }
  }
}

fn pat_decl_name(pat_decl: &Node<PatDecl>) -> Option<&str> {
  match pat_decl.stx.pat.stx.as_ref() {
    Pat::Id(id) if !id.stx.name.is_empty() => Some(&id.stx.name),
    _ => None,
  }
}

/// Scan the module's top-level statements, stripping module syntax into
/// `ModuleRecords` and rebuilding the body without it.
pub fn scan_module(
  cx: &mut TransformContext,
  body: &mut Vec<Node<Stmt>>,
  bindings: &ModuleBindings,
) -> ModuleRecords {
  let mut records = ModuleRecords::default();
  let mut new_body = Vec::with_capacity(body.len());
  for stmt in body.drain(..) {
    scan_stmt(cx, stmt, bindings, &mut records, &mut new_body);
  }
  *body = new_body;
  records
}

fn scan_stmt(
  cx: &mut TransformContext,
  stmt: Node<Stmt>,
  bindings: &ModuleBindings,
  records: &mut ModuleRecords,
  new_body: &mut Vec<Node<Stmt>>,
) {
  let loc = stmt.loc;
  match *stmt.stx {
    Stmt::Import(import) => scan_import(cx, import, loc, records),
    Stmt::ExportList(export_list) => {
      scan_export_list(cx, export_list, loc, new_body.len(), bindings, records)
    }
    Stmt::ExportDefaultExpr(default_expr) => {
      // Anonymous default export: bind the expression to a synthesized local
      // in place so its evaluation order is preserved.
      let local = cx.fresh_name("_default");
      let expression = default_expr.stx.expression;
      new_body.push(builder::var_decl_stmt(
        loc,
        local.clone(),
        Some(expression),
        VarDeclMode::Var,
      ));
      records.exports.push(ExportRecord::DefaultLocal {
        local,
        declaration: false,
        loc,
      });
    }
    Stmt::FunctionDecl(mut func) => {
      if func.stx.export_default {
        let local = match &func.stx.name {
          Some(name) => name.stx.name.clone(),
          None => {
            // Name the declaration itself rather than introducing a second
            // binding; hoisting keeps it readable before this statement.
            let synthesized = cx.fresh_name("_default");
            func.stx.name = Some(Node::new(loc, ClassOrFuncName {
              name: synthesized.clone(),
            }));
            synthesized
          }
        };
        records.exports.push(ExportRecord::DefaultLocal {
          local,
          declaration: true,
          loc,
        });
      } else if func.stx.export {
        if let Some(name) = &func.stx.name {
          records.exports.push(ExportRecord::NamedLocal {
            exported: name.stx.name.clone(),
            local: name.stx.name.clone(),
            declaration: true,
            insert_at: new_body.len() + 1,
            loc,
          });
        } else {
          cx.warning(
            loc,
            WARN_SKIPPED_BINDING,
            "skipping exported function declaration without a name",
          );
        }
      }
      func.stx.export = false;
      func.stx.export_default = false;
      new_body.push(Node::with_assoc(loc, stmt.assoc, Stmt::FunctionDecl(func)));
    }
    Stmt::ClassDecl(mut class) => {
      if class.stx.export_default {
        let local = match &class.stx.name {
          Some(name) => name.stx.name.clone(),
          None => {
            let synthesized = cx.fresh_name("_default");
            class.stx.name = Some(Node::new(loc, ClassOrFuncName {
              name: synthesized.clone(),
            }));
            synthesized
          }
        };
        records.exports.push(ExportRecord::DefaultLocal {
          local,
          declaration: true,
          loc,
        });
      } else if class.stx.export {
        if let Some(name) = &class.stx.name {
          records.exports.push(ExportRecord::NamedLocal {
            exported: name.stx.name.clone(),
            local: name.stx.name.clone(),
            declaration: true,
            insert_at: new_body.len() + 1,
            loc,
          });
        } else {
          cx.warning(
            loc,
            WARN_SKIPPED_BINDING,
            "skipping exported class declaration without a name",
          );
        }
      }
      class.stx.export = false;
      class.stx.export_default = false;
      new_body.push(Node::with_assoc(loc, stmt.assoc, Stmt::ClassDecl(class)));
    }
    Stmt::VarDecl(mut decl) => {
      if decl.stx.export {
        for declarator in &decl.stx.declarators {
          let mut names = Vec::new();
          scan_exported_pat(cx, &declarator.pattern.stx.pat, &mut names);
          for (name, name_loc) in names {
            records.exports.push(ExportRecord::NamedLocal {
              exported: name.clone(),
              local: name,
              declaration: false,
              insert_at: new_body.len() + 1,
              loc: name_loc,
            });
          }
        }
        decl.stx.export = false;
      }
      new_body.push(Node::with_assoc(loc, stmt.assoc, Stmt::VarDecl(decl)));
    }
    stx => new_body.push(Node::with_assoc(loc, stmt.assoc, stx)),
  }
}

fn scan_import(
  cx: &mut TransformContext,
  import: Node<ImportStmt>,
  loc: Loc,
  records: &mut ModuleRecords,
) {
  if import.stx.type_only {
    return;
  }
  let stx = *import.stx;
  let specifier = stx.module;
  let mut bound_any = false;
  // A statement whose specifier list is entirely type-only is itself
  // type-only in effect and vanishes without triggering side effects.
  let mut dropped_all_entries = false;

  if let Some(default) = &stx.default {
    if let Some(local) = pat_decl_name(default) {
      records.note_specifier(&specifier);
      records.imports.push(ImportBinding {
        local: local.to_string(),
        specifier: specifier.clone(),
        kind: SlotKind::DefaultUnwrapped,
        member: Some("default".to_string()),
        loc: default.loc,
      });
      bound_any = true;
    }
  }

  match &stx.names {
    Some(ImportNames::All(alias)) => {
      if let Some(local) = pat_decl_name(alias) {
        records.note_specifier(&specifier);
        records.imports.push(ImportBinding {
          local: local.to_string(),
          specifier: specifier.clone(),
          kind: SlotKind::NamespaceWrapped,
          member: None,
          loc: alias.loc,
        });
        bound_any = true;
      }
    }
    Some(ImportNames::Specific(entries)) => {
      let runtime_entries = entries.iter().filter(|e| !e.stx.type_only);
      dropped_all_entries = !entries.is_empty() && runtime_entries.clone().count() == 0;
      for entry in runtime_entries {
        let imported = match &entry.stx.importable {
          ModuleExportImportName::Ident(name) => name.clone(),
          ModuleExportImportName::Str(_) => {
            cx.error(
              entry.loc,
              ERR_UNSUPPORTED_SYNTAX,
              "string import names are not supported",
            );
            continue;
          }
        };
        let Some(local) = pat_decl_name(&entry.stx.alias) else {
          continue;
        };
        let (kind, member) = if imported == "default" {
          (SlotKind::DefaultUnwrapped, "default".to_string())
        } else {
          (SlotKind::Raw, imported)
        };
        records.note_specifier(&specifier);
        records.imports.push(ImportBinding {
          local: local.to_string(),
          specifier: specifier.clone(),
          kind,
          member: Some(member),
          loc: entry.loc,
        });
        bound_any = true;
      }
    }
    None => {}
  }

  if !bound_any && !dropped_all_entries {
    records.note_specifier(&specifier);
    records.side_effects.push(SideEffectImport { specifier, loc });
  }
}

fn scan_export_list(
  cx: &mut TransformContext,
  export_list: Node<ExportListStmt>,
  loc: Loc,
  insert_at: usize,
  bindings: &ModuleBindings,
  records: &mut ModuleRecords,
) {
  if export_list.stx.type_only {
    return;
  }
  let stx = *export_list.stx;
  match (stx.from, stx.names) {
    (Some(specifier), ExportNames::All(alias)) => {
      records.note_specifier(&specifier);
      match alias {
        Some(alias) => records.exports.push(ExportRecord::ReExportNamespace {
          specifier,
          exported: alias.stx.name.clone(),
          loc,
        }),
        None => records
          .exports
          .push(ExportRecord::ReExportAll { specifier, loc }),
      }
    }
    (Some(specifier), ExportNames::Specific(entries)) => {
      let mut noted = false;
      for entry in entries {
        if entry.stx.type_only {
          continue;
        }
        let imported = match entry.stx.exportable {
          ModuleExportImportName::Ident(name) => name,
          ModuleExportImportName::Str(_) => {
            cx.error(
              loc,
              ERR_UNSUPPORTED_SYNTAX,
              "string export names are not supported",
            );
            continue;
          }
        };
        if !noted {
          records.note_specifier(&specifier);
          noted = true;
        }
        records.exports.push(ExportRecord::ReExportNamed {
          specifier: specifier.clone(),
          imported,
          exported: entry.stx.alias.stx.name.clone(),
          loc,
        });
      }
    }
    (None, ExportNames::Specific(entries)) => {
      for entry in entries {
        if entry.stx.type_only {
          continue;
        }
        let local = match entry.stx.exportable {
          ModuleExportImportName::Ident(name) => name,
          ModuleExportImportName::Str(_) => {
            cx.error(
              loc,
              ERR_UNSUPPORTED_SYNTAX,
              "string export names are not supported",
            );
            continue;
          }
        };
        let Some(kind) = bindings.get(local.as_str()) else {
          cx.error(
            loc,
            ERR_UNRESOLVED_EXPORT,
            format!("cannot export `{local}`: no local binding with that name"),
          );
          continue;
        };
        records.exports.push(ExportRecord::NamedLocal {
          exported: entry.stx.alias.stx.name.clone(),
          local,
          declaration: *kind == BindingKind::Declaration,
          insert_at,
          loc,
        });
      }
    }
    (None, ExportNames::All(_)) => {
      // `export *` without a source module has no meaning; the parser should
      // never produce it.
      cx.error(
        loc,
        ERR_UNSUPPORTED_SYNTAX,
        "wildcard export without a source module",
      );
    }
  }
}
