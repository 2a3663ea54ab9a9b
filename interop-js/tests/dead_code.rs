use diagnostics::FileId;
use interop_harness::print::print_program;
use interop_harness::program::*;
use interop_js::{transform_module, ModuleOutput, Strategy, TransformOptions};
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

#[test]
fn unreferenced_named_import_is_never_materialized() {
  let top = module(vec![
    import_named("m", &[("a", "a"), ("b", "b")]),
    export_let("out", builder::id(L, "a")),
  ]);
  let printed = print_program(&transformed(Strategy::Static, top));
  assert!(printed.contains("require(\"m\").a"), "{printed}");
  assert!(!printed.contains("var b"), "{printed}");
  assert!(!printed.contains(".b"), "{printed}");
}

#[test]
fn specifier_with_no_surviving_references_emits_nothing() {
  let top = module(vec![import_named("m", &[("unused", "unused")])]);
  let printed = print_program(&transformed(Strategy::Static, top));
  assert_eq!(printed, "");

  let top = module(vec![import_default("unused", "m"), import_ns("alsoUnused", "m")]);
  let printed = print_program(&transformed(Strategy::LiveBinding, top));
  assert_eq!(printed, "");
}

#[test]
fn side_effect_import_loads_exactly_once() {
  let top = module(vec![
    import_side_effect("s"),
    import_named("s", &[("unused", "unused")]),
    import_default("alsoUnused", "s"),
  ]);
  let printed = print_program(&transformed(Strategy::Static, top));
  assert_eq!(printed.matches("require(\"s\")").count(), 1, "{printed}");
  assert!(printed.contains("require(\"s\");"), "{printed}");
}

#[test]
fn side_effect_is_satisfied_by_a_real_load() {
  let top = module(vec![
    import_side_effect("s"),
    import_named("s", &[("used", "used")]),
    export_let("out", builder::id(L, "used")),
  ]);
  let printed = print_program(&transformed(Strategy::Static, top));
  assert_eq!(printed.matches("require(\"s\")").count(), 1, "{printed}");
  assert!(printed.contains("var used = require(\"s\").used;"), "{printed}");
}

#[test]
fn shadowed_names_do_not_count_as_references() {
  // The body only ever reads a locally shadowed `hidden`, so the import is
  // dead and the specifier vanishes.
  let inner = builder::func_decl_stmt(
    L,
    "user",
    vec![builder::param(L, "hidden")],
    vec![builder::return_stmt(L, Some(builder::id(L, "hidden")))],
  );
  let top = module(vec![
    import_named("m", &[("hidden", "hidden")]),
    inner,
    export_func("noop", vec![]),
  ]);
  let printed = print_program(&transformed(Strategy::Static, top));
  assert!(!printed.contains("require(\"m\")"), "{printed}");
}

#[test]
fn references_inside_nested_functions_keep_the_slot_alive() {
  let inner = builder::func_decl_stmt(
    L,
    "user",
    vec![],
    vec![builder::return_stmt(L, Some(builder::id(L, "kept")))],
  );
  let top = module(vec![
    import_named("m", &[("kept", "kept")]),
    inner,
    export_func("noop", vec![]),
  ]);
  let printed = print_program(&transformed(Strategy::Static, top));
  assert!(printed.contains("require(\"m\")"), "{printed}");
}
