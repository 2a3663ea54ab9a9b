use ahash::HashSet;
use diagnostics::FileId;
use interop_harness::print::print_program;
use interop_harness::program::*;
use interop_js::{transform_module, ModuleOutput, Strategy, TransformOptions};
use syntax_js::ast::expr::pat::Pat;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::Stmt;
use syntax_js::ast::stx::TopLevel;
use syntax_js::builder;

fn transformed(strategy: Strategy, mut top: Node<TopLevel>) -> Vec<Node<Stmt>> {
  let mut output = ModuleOutput::default();
  let options = TransformOptions::new(strategy);
  transform_module(FileId(0), &options, &mut top, &mut output).expect("transform should succeed");
  into_body(top)
}

fn top_level_var_names(body: &[Node<Stmt>]) -> Vec<String> {
  let mut names = Vec::new();
  for stmt in body {
    if let Stmt::VarDecl(decl) = stmt.stx.as_ref() {
      for declarator in &decl.stx.declarators {
        if let Pat::Id(id) = declarator.pattern.stx.pat.stx.as_ref() {
          names.push(id.stx.name.clone());
        }
      }
    }
  }
  names
}

#[test]
fn synthesized_default_name_avoids_user_bindings() {
  let top = module(vec![
    let_decl("_default", builder::number(L, 0.0)),
    export_default_expr(builder::number(L, 5.0)),
  ]);
  let body = transformed(Strategy::Static, top);
  let printed = print_program(&body);
  // The user's `_default` keeps its name; the synthetic local gets a fresh
  // one and the default export reads from it.
  assert!(printed.contains("let _default = 0;"), "{printed}");
  let names = top_level_var_names(&body);
  let unique: HashSet<&String> = names.iter().collect();
  assert_eq!(unique.len(), names.len(), "duplicate binding in:\n{printed}");
  assert!(!printed.contains("exports.default = _default;"), "{printed}");
}

#[test]
fn fifty_default_adjacent_names_stay_unique() {
  let mut body = vec![let_decl("_default", builder::number(L, 0.0))];
  for i in 1..50 {
    body.push(let_decl(&format!("_default_{i}"), builder::number(L, 0.0)));
  }
  body.push(export_default_expr(builder::number(L, 5.0)));
  let transformed_body = transformed(Strategy::Static, module(body));
  let names = top_level_var_names(&transformed_body);
  assert_eq!(names.len(), 51);
  let unique: HashSet<&String> = names.iter().collect();
  assert_eq!(unique.len(), 51, "synthesized default name collided");
}

#[test]
fn slot_names_dodge_user_bindings() {
  let top = module(vec![
    let_decl("_m", builder::number(L, 0.0)),
    import_named("m", &[("a", "a"), ("b", "b"), ("c", "c")]),
    export_let("out", builder::id(L, "a")),
    export_let("out2", builder::id(L, "b")),
    export_let("out3", builder::id(L, "c")),
  ]);
  let body = transformed(Strategy::Static, top);
  let names = top_level_var_names(&body);
  let unique: HashSet<&String> = names.iter().collect();
  assert_eq!(unique.len(), names.len(), "slot name collided with a binding");
}

#[test]
fn colliding_specifier_hints_fall_back_to_counters() {
  // Both specifiers sanitize to the same `_a_b` hint; only uniqueness is
  // guaranteed, not any particular spelling.
  let top = module(vec![
    import_ns("first", "./a-b"),
    import_ns("second", "./a_b"),
    export_let("out", builder::id(L, "first")),
    export_let("out2", builder::id(L, "second")),
  ]);
  // Two namespace slots plus the two exported locals.
  let body = transformed(Strategy::Static, top);
  let names = top_level_var_names(&body);
  assert_eq!(names.len(), 4);
  let unique: HashSet<&String> = names.iter().collect();
  assert_eq!(unique.len(), 4, "slot names for distinct specifiers collided");
}

#[test]
fn helper_names_are_reserved_against_synthesis() {
  let mut top = module(vec![
    import_default("d", "wrap"),
    export_let("out", builder::id(L, "d")),
  ]);
  let mut output = ModuleOutput::default();
  let mut options = TransformOptions::new(Strategy::Static);
  options.import_default_helper_name = "_wrap_default".to_string();
  transform_module(FileId(0), &options, &mut top, &mut output).unwrap();
  // The slot hint for "wrap"'s default slot is `_wrap_default`, which must
  // not shadow the helper of the same configured name.
  let printed = print_program(&top.stx.body);
  assert!(printed.contains("function _wrap_default("), "{printed}");
  assert!(printed.contains("= _wrap_default("), "{printed}");
  let names = top_level_var_names(&top.stx.body);
  assert!(!names.contains(&"_wrap_default".to_string()), "{printed}");
}
