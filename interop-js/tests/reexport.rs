use diagnostics::FileId;
use interop_harness::print::print_program;
use interop_harness::program::*;
use interop_harness::registry::{Registry, Runtime};
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

fn source_module(strategy: Strategy) -> Vec<Node<Stmt>> {
  // a: export const x = 100; export const y = 2; export default 9;
  transformed(
    strategy,
    module(vec![
      export_const("x", builder::number(L, 100.0)),
      export_const("y", builder::number(L, 2.0)),
      export_default_expr(builder::number(L, 9.0)),
    ]),
  )
}

fn precedence_case(strategy: Strategy, wildcard_first: bool) -> (f64, f64) {
  let body = if wildcard_first {
    vec![
      export_all_from("a"),
      export_const("x", builder::number(L, 1.0)),
    ]
  } else {
    vec![
      export_const("x", builder::number(L, 1.0)),
      export_all_from("a"),
    ]
  };
  let mut registry = Registry::new();
  registry.add_program("a", source_module(strategy));
  registry.add_program("m", transformed(strategy, module(body)));
  let runtime = Runtime::new(&registry);
  let x = runtime.export_value("m", "x").unwrap().as_num().unwrap();
  let y = runtime.export_value("m", "y").unwrap().as_num().unwrap();
  (x, y)
}

// Explicit exports win over wildcard re-exports regardless of statement
// order, in both strategies.
#[test]
fn explicit_exports_beat_wildcards() {
  for strategy in [Strategy::Static, Strategy::LiveBinding] {
    for wildcard_first in [true, false] {
      let (x, y) = precedence_case(strategy, wildcard_first);
      assert_eq!(x, 1.0, "{strategy:?} wildcard_first={wildcard_first}");
      assert_eq!(y, 2.0, "{strategy:?} wildcard_first={wildcard_first}");
    }
  }
}

#[test]
fn wildcard_never_forwards_default_or_marker() {
  let mut registry = Registry::new();
  registry.add_program("a", source_module(Strategy::LiveBinding));
  registry.add_program(
    "m",
    transformed(
      Strategy::LiveBinding,
      module(vec![export_all_from("a")]),
    ),
  );
  let runtime = Runtime::new(&registry);
  assert!(runtime.export_value("m", "default").unwrap().is_undefined());
  assert_eq!(runtime.export_keys("m").unwrap(), vec!["x", "y"]);
}

#[test]
fn named_reexport_of_default_reads_through_interop() {
  for strategy in [Strategy::Static, Strategy::LiveBinding] {
    let mut registry = Registry::new();
    registry.add_program("a", source_module(strategy));
    registry.add_program(
      "m",
      transformed(strategy, module(vec![export_named_from("a", &[(
        "default", "d",
      )])])),
    );
    let runtime = Runtime::new(&registry);
    let d = runtime.export_value("m", "d").unwrap();
    assert_eq!(d.as_num(), Some(9.0), "{strategy:?}");
  }
}

#[test]
fn reexport_introduces_no_local_binding() {
  let body = transformed(
    Strategy::Static,
    module(vec![export_named_from("a", &[("x", "x")])]),
  );
  let printed = print_program(&body);
  assert!(printed.contains("exports.x = "), "{printed}");
  assert!(!printed.contains("var x"), "{printed}");
}

#[test]
fn namespace_reexport_exposes_the_wrapped_module() {
  let mut registry = Registry::new();
  registry.add_program("a", source_module(Strategy::Static));
  registry.add_program(
    "m",
    transformed(
      Strategy::Static,
      module(vec![export_ns_from("ns", "a")]),
    ),
  );
  let runtime = Runtime::new(&registry);
  let ns = runtime.export_value("m", "ns").unwrap();
  let x = runtime.read_prop(&ns, "x").unwrap();
  assert_eq!(x.as_num(), Some(100.0));
  let default = runtime.read_prop(&ns, "default").unwrap();
  assert_eq!(default.as_num(), Some(9.0));
}
