use diagnostics::FileId;
use interop_harness::print::print_program;
use interop_harness::program::*;
use interop_harness::registry::{Registry, Runtime};
use interop_js::{transform_module, ModuleOutput, Strategy, TransformOptions};
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::Stmt;
use syntax_js::ast::stx::TopLevel;
use syntax_js::builder;
use syntax_js::operator::OperatorName;

fn transformed(mut top: Node<TopLevel>) -> Vec<Node<Stmt>> {
  let mut output = ModuleOutput::default();
  let options = TransformOptions::new(Strategy::LiveBinding);
  transform_module(FileId(0), &options, &mut top, &mut output).expect("transform should succeed");
  into_body(top)
}

#[test]
fn importer_observes_post_export_mutation() {
  let mut registry = Registry::new();
  registry.add_program(
    "e",
    transformed(module(vec![
      export_let("counter", builder::number(L, 0.0)),
      assign_stmt("counter", builder::number(L, 1.0)),
    ])),
  );
  registry.add_program(
    "i",
    transformed(module(vec![
      import_named("e", &[("counter", "counter")]),
      export_let("seen", builder::id(L, "counter")),
    ])),
  );
  let runtime = Runtime::new(&registry);
  let seen = runtime.export_value("i", "seen").unwrap();
  assert_eq!(seen.as_num(), Some(1.0));
}

#[test]
fn mutation_through_an_exported_function_stays_visible() {
  // export let v = 0; export function bump() { v = v + 1; }
  let bump_body = vec![assign_stmt(
    "v",
    builder::binary_expr(
      L,
      OperatorName::Addition,
      builder::id(L, "v"),
      builder::number(L, 1.0),
    ),
  )];
  let mut registry = Registry::new();
  registry.add_program(
    "e",
    transformed(module(vec![
      export_let("v", builder::number(L, 0.0)),
      export_func("bump", bump_body),
    ])),
  );
  let runtime = Runtime::new(&registry);
  assert_eq!(runtime.export_value("e", "v").unwrap().as_num(), Some(0.0));
  runtime.call_export("e", "bump").unwrap();
  assert_eq!(runtime.export_value("e", "v").unwrap().as_num(), Some(1.0));
  runtime.call_export("e", "bump").unwrap();
  assert_eq!(runtime.export_value("e", "v").unwrap().as_num(), Some(2.0));
}

#[test]
fn function_declaration_exports_assign_at_program_end() {
  let body = transformed(module(vec![
    export_func("f", vec![builder::return_stmt(L, Some(builder::number(L, 7.0)))]),
    export_let("x", builder::number(L, 1.0)),
  ]));
  let printed = print_program(&body);
  let last = printed.lines().last().unwrap();
  assert_eq!(last, "exports.f = f;");
  // The declaration itself stays in place in the body.
  assert!(printed.contains("function f()"), "{printed}");
}

#[test]
fn circular_imports_resolve_through_accessors() {
  // a: import { bFn } from "b"; export let aVal = 10;
  //    export function aFn() { return bFn(); }
  // b: import { aVal } from "a"; export function bFn() { return aVal; }
  // c: import { aFn } from "a"; export let out = aFn();
  let a = module(vec![
    import_named("b", &[("bFn", "bFn")]),
    export_let("aVal", builder::number(L, 10.0)),
    export_func("aFn", vec![builder::return_stmt(
      L,
      Some(builder::call(L, builder::id(L, "bFn"), vec![])),
    )]),
  ]);
  let b = module(vec![
    import_named("a", &[("aVal", "aVal")]),
    export_func("bFn", vec![builder::return_stmt(
      L,
      Some(builder::id(L, "aVal")),
    )]),
  ]);
  let c = module(vec![
    import_named("a", &[("aFn", "aFn")]),
    export_let("out", builder::call(L, builder::id(L, "aFn"), vec![])),
  ]);
  let mut registry = Registry::new();
  registry.add_program("a", transformed(a));
  registry.add_program("b", transformed(b));
  registry.add_program("c", transformed(c));
  let runtime = Runtime::new(&registry);
  let out = runtime.export_value("c", "out").unwrap();
  assert_eq!(out.as_num(), Some(10.0));
}

#[test]
fn reexported_binding_stays_live_through_the_chain() {
  let mut registry = Registry::new();
  registry.add_program(
    "e",
    transformed(module(vec![
      export_let("counter", builder::number(L, 0.0)),
      assign_stmt("counter", builder::number(L, 1.0)),
    ])),
  );
  registry.add_program(
    "mid",
    transformed(module(vec![export_named_from("e", &[(
      "counter", "relayed",
    )])])),
  );
  let runtime = Runtime::new(&registry);
  let relayed = runtime.export_value("mid", "relayed").unwrap();
  assert_eq!(relayed.as_num(), Some(1.0));
}

#[test]
fn accessors_are_declared_before_any_load() {
  let body = transformed(module(vec![
    import_named("dep", &[("d", "d")]),
    export_let("x", builder::id(L, "d")),
  ]));
  let printed = print_program(&body);
  let accessor = printed
    .find("Object.defineProperty(exports, \"x\"")
    .expect("accessor for x");
  let load = printed.find("require(\"dep\")").expect("load for dep");
  assert!(accessor < load, "{printed}");
}

#[test]
fn marker_is_defined_non_enumerable_and_first() {
  let body = transformed(module(vec![export_const("x", builder::number(L, 1.0))]));
  let printed = print_program(&body);
  let first = printed.lines().next().unwrap();
  assert!(
    first.starts_with("Object.defineProperty(exports, \"__esModule\""),
    "{printed}"
  );

  let mut registry = Registry::new();
  registry.add_program("m", body);
  let runtime = Runtime::new(&registry);
  // Non-enumerable: the marker never leaks into the key set.
  assert_eq!(runtime.export_keys("m").unwrap(), vec!["x"]);
  assert_eq!(
    runtime
      .export_value("m", "__esModule")
      .unwrap()
      .as_bool(),
    Some(true)
  );
}
