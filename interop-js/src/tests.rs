use crate::hygiene::FreshNames;
use crate::records::{ExportRecord, SlotKind};
use crate::scan::{collect_module_bindings, scan_module};
use crate::{
  transform_module, ModuleOutput, Strategy, TransformContext, TransformOptions,
  ERR_UNRESOLVED_EXPORT, ERR_UNSUPPORTED_SYNTAX, WARN_SKIPPED_BINDING,
};
use diagnostics::{FileId, Severity};
use interop_harness::program::*;
use syntax_js::ast::class_or_object::{ClassOrObjKey, ClassOrObjMemberDirectKey};
use syntax_js::ast::expr::pat::{IdPat, ObjPat, ObjPatProp, Pat};
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::decl::{PatDecl, VarDecl, VarDeclMode, VarDeclarator};
use syntax_js::ast::stmt::Stmt;
use syntax_js::ast::stx::TopLevel;
use syntax_js::builder;
use syntax_js::loc::Loc;

fn scan(top: &mut Node<TopLevel>) -> (crate::records::ModuleRecords, Vec<diagnostics::Diagnostic>) {
  let options = TransformOptions::default();
  let mut cx = TransformContext {
    file: FileId(0),
    options: &options,
    fresh: FreshNames::new(Default::default()),
    diagnostics: Vec::new(),
  };
  let bindings = collect_module_bindings(&top.stx.body);
  let records = scan_module(&mut cx, &mut top.stx.body, &bindings);
  (records, cx.diagnostics)
}

#[test]
fn scanner_classifies_every_import_shape() {
  let mut top = module(vec![
    import_side_effect("s"),
    import_default("d", "x"),
    import_ns("n", "y"),
    import_named("z", &[("a", "a"), ("default", "dd")]),
  ]);
  let (records, diagnostics) = scan(&mut top);
  assert!(diagnostics.is_empty());
  assert_eq!(records.side_effects.len(), 1);
  assert_eq!(records.side_effects[0].specifier, "s");
  assert_eq!(records.imports.len(), 4);

  assert_eq!(records.imports[0].local, "d");
  assert_eq!(records.imports[0].kind, SlotKind::DefaultUnwrapped);
  assert_eq!(records.imports[0].member.as_deref(), Some("default"));

  assert_eq!(records.imports[1].local, "n");
  assert_eq!(records.imports[1].kind, SlotKind::NamespaceWrapped);
  assert_eq!(records.imports[1].member, None);

  assert_eq!(records.imports[2].local, "a");
  assert_eq!(records.imports[2].kind, SlotKind::Raw);
  assert_eq!(records.imports[2].member.as_deref(), Some("a"));

  assert_eq!(records.imports[3].local, "dd");
  assert_eq!(records.imports[3].kind, SlotKind::DefaultUnwrapped);

  assert_eq!(records.specifier_order, vec!["s", "x", "y", "z"]);
  // Every import/export statement is gone from the body.
  assert!(top.stx.body.is_empty());
}

#[test]
fn type_only_imports_vanish_without_side_effects() {
  let mut top = module(vec![import_type_only("x", "T")]);
  let (records, diagnostics) = scan(&mut top);
  assert!(diagnostics.is_empty());
  assert!(!records.has_module_syntax());
  assert!(top.stx.body.is_empty());
}

#[test]
fn exported_destructuring_records_every_bound_name() {
  // export const { a, b: { c } } = value;
  let inner = Node::new(L, Pat::Obj(Node::new(L, ObjPat {
    properties: vec![Node::new(L, ObjPatProp {
      key: ClassOrObjKey::Direct(Node::new(L, ClassOrObjMemberDirectKey { key: "c".into() })),
      target: Node::new(L, Pat::Id(Node::new(L, IdPat { name: "c".into() }))),
      shorthand: false,
      default_value: None,
    })],
    rest: None,
  })));
  let pat = Node::new(L, Pat::Obj(Node::new(L, ObjPat {
    properties: vec![
      Node::new(L, ObjPatProp {
        key: ClassOrObjKey::Direct(Node::new(L, ClassOrObjMemberDirectKey { key: "a".into() })),
        target: Node::new(L, Pat::Id(Node::new(L, IdPat { name: "a".into() }))),
        shorthand: true,
        default_value: None,
      }),
      Node::new(L, ObjPatProp {
        key: ClassOrObjKey::Direct(Node::new(L, ClassOrObjMemberDirectKey { key: "b".into() })),
        target: inner,
        shorthand: false,
        default_value: None,
      }),
    ],
    rest: None,
  })));
  let decl = Node::new(
    L,
    Stmt::VarDecl(Node::new(L, VarDecl {
      export: true,
      mode: VarDeclMode::Const,
      declarators: vec![VarDeclarator {
        pattern: Node::new(L, PatDecl { pat }),
        initializer: Some(builder::id(L, "value")),
      }],
    })),
  );
  let mut top = module(vec![let_decl("value", builder::number(L, 0.0)), decl]);
  let (records, diagnostics) = scan(&mut top);
  assert!(diagnostics.is_empty());
  let exported: Vec<_> = records
    .exports
    .iter()
    .filter_map(ExportRecord::exported_name)
    .collect();
  assert_eq!(exported, vec!["a", "c"]);
  // The declaration itself stays in the body, with `export` stripped.
  assert_eq!(top.stx.body.len(), 2);
  let Stmt::VarDecl(decl) = top.stx.body[1].stx.as_ref() else {
    panic!("expected var decl to survive");
  };
  assert!(!decl.stx.export);
}

#[test]
fn missing_local_export_fails_with_source_location() {
  let mut top = module(vec![export_named_at(Loc(5, 9), &[("nope", "nope")])]);
  let mut output = ModuleOutput::default();
  let options = TransformOptions::new(Strategy::Static);
  let diagnostics =
    transform_module(FileId(3), &options, &mut top, &mut output).unwrap_err();
  assert_eq!(diagnostics.len(), 1);
  assert_eq!(diagnostics[0].code, ERR_UNRESOLVED_EXPORT);
  assert_eq!(diagnostics[0].severity, Severity::Error);
  assert_eq!(diagnostics[0].primary.file, FileId(3));
  assert_eq!(diagnostics[0].primary.range.start, 5);
  assert_eq!(diagnostics[0].primary.range.end, 9);
}

#[test]
fn forward_referenced_export_list_is_legal() {
  let mut top = module(vec![
    export_named(&[("later", "later")]),
    let_decl("later", builder::number(L, 1.0)),
  ]);
  let mut output = ModuleOutput::default();
  let options = TransformOptions::new(Strategy::Static);
  transform_module(FileId(0), &options, &mut top, &mut output).expect("forward refs are legal");
  assert!(output.is_es_module);
}

#[test]
fn string_export_name_is_unsupported_syntax() {
  let mut top = module(vec![export_named_str("weird name", "alias")]);
  let mut output = ModuleOutput::default();
  let options = TransformOptions::new(Strategy::LiveBinding);
  let diagnostics =
    transform_module(FileId(0), &options, &mut top, &mut output).unwrap_err();
  assert_eq!(diagnostics[0].code, ERR_UNSUPPORTED_SYNTAX);
}

#[test]
fn malformed_exported_binding_warns_and_continues() {
  let empty_name = Node::new(
    L,
    Stmt::VarDecl(Node::new(L, VarDecl {
      export: true,
      mode: VarDeclMode::Let,
      declarators: vec![VarDeclarator {
        pattern: Node::new(L, PatDecl {
          pat: Node::new(L, Pat::Id(Node::new(L, IdPat { name: String::new() }))),
        }),
        initializer: Some(builder::number(L, 1.0)),
      }],
    })),
  );
  let mut top = module(vec![empty_name, export_let("ok", builder::number(L, 2.0))]);
  let mut output = ModuleOutput::default();
  let options = TransformOptions::new(Strategy::Static);
  let warnings =
    transform_module(FileId(0), &options, &mut top, &mut output).expect("warning is not fatal");
  assert_eq!(warnings.len(), 1);
  assert_eq!(warnings[0].code, WARN_SKIPPED_BINDING);
  assert_eq!(warnings[0].severity, Severity::Warning);
  assert!(output.is_es_module);
}

#[test]
fn module_without_module_syntax_is_left_alone() {
  let mut top = module(vec![let_decl("x", builder::number(L, 1.0))]);
  let mut output = ModuleOutput { is_es_module: false };
  let options = TransformOptions::default();
  transform_module(FileId(0), &options, &mut top, &mut output).unwrap();
  assert!(!output.is_es_module);
  assert_eq!(top.stx.body.len(), 1);

  // A caller-supplied `true` must survive untouched too.
  let mut top = module(vec![]);
  let mut output = ModuleOutput { is_es_module: true };
  transform_module(FileId(0), &options, &mut top, &mut output).unwrap();
  assert!(output.is_es_module);
}

#[test]
fn import_bindings_never_mutate_after_scan() {
  let mut top = module(vec![
    import_named("m", &[("a", "renamed")]),
    let_decl("use", builder::id(L, "renamed")),
  ]);
  let (records, _) = scan(&mut top);
  assert_eq!(records.imports.len(), 1);
  assert_eq!(records.imports[0].local, "renamed");
  assert_eq!(records.imports[0].specifier, "m");
}
