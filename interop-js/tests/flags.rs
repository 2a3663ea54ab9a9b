use diagnostics::FileId;
use interop_harness::program::*;
use interop_js::{transform_module, ModuleOutput, Strategy, TransformOptions};
use syntax_js::ast::node::Node;
use syntax_js::ast::stx::TopLevel;
use syntax_js::builder;

fn flag_after(strategy: Strategy, mut top: Node<TopLevel>, initial: bool) -> bool {
  let mut output = ModuleOutput {
    is_es_module: initial,
  };
  let options = TransformOptions::new(strategy);
  transform_module(FileId(0), &options, &mut top, &mut output).expect("transform should succeed");
  output.is_es_module
}

#[test]
fn module_without_module_syntax_keeps_the_callers_value() {
  for initial in [false, true] {
    let top = module(vec![let_decl("x", builder::number(L, 1.0))]);
    assert_eq!(flag_after(Strategy::Static, top, initial), initial);
  }
}

#[test]
fn a_lone_wildcard_reexport_sets_the_flag() {
  let top = module(vec![export_all_from("a")]);
  assert!(flag_after(Strategy::Static, top, false));
  let top = module(vec![export_all_from("a")]);
  assert!(flag_after(Strategy::LiveBinding, top, false));
}

#[test]
fn side_effect_only_imports_do_not_set_the_flag() {
  let top = module(vec![import_side_effect("s")]);
  assert!(!flag_after(Strategy::Static, top, false));
}

#[test]
fn plain_named_imports_do_not_require_esm_interop() {
  let top = module(vec![
    import_named("m", &[("a", "a")]),
    let_decl("use", builder::id(L, "a")),
  ]);
  assert!(!flag_after(Strategy::Static, top, false));
}

#[test]
fn a_referenced_default_import_requires_esm_interop() {
  let top = module(vec![
    import_default("d", "m"),
    let_decl("use", builder::id(L, "d")),
  ]);
  assert!(flag_after(Strategy::Static, top, false));
}

#[test]
fn an_unreferenced_default_import_does_not_set_the_flag() {
  let top = module(vec![import_default("unused", "m")]);
  assert!(!flag_after(Strategy::LiveBinding, top, false));
}
