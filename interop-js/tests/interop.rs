use diagnostics::FileId;
use interop_harness::program::*;
use interop_harness::registry::{HostValue, Registry, Runtime};
use interop_js::helpers::{default_unwrap_helper_decl, namespace_wrap_helper_decl};
use interop_js::{transform_module, ModuleOutput, Strategy, TransformOptions};
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::decl::VarDeclMode;
use syntax_js::ast::stmt::Stmt;
use syntax_js::ast::stx::TopLevel;
use syntax_js::builder;
use syntax_js::operator::OperatorName;

fn transformed(strategy: Strategy, mut top: Node<TopLevel>) -> Vec<Node<Stmt>> {
  let mut output = ModuleOutput::default();
  let options = TransformOptions::new(strategy);
  transform_module(FileId(0), &options, &mut top, &mut output).expect("transform should succeed");
  into_body(top)
}

fn legacy_registry() -> Registry {
  let mut registry = Registry::new();
  registry.add_host_object("legacy", vec![
    ("value".to_string(), HostValue::Num(42.0)),
    ("name".to_string(), HostValue::Str("legacy".to_string())),
  ]);
  registry
}

#[test]
fn default_import_of_a_plain_module_takes_its_whole_exports() {
  let mut registry = legacy_registry();
  registry.add_program(
    "m",
    transformed(
      Strategy::Static,
      module(vec![
        import_default("d", "legacy"),
        export_let("out", builder::id(L, "d")),
      ]),
    ),
  );
  let runtime = Runtime::new(&registry);
  let out = runtime.export_value("m", "out").unwrap();
  let value = runtime.read_prop(&out, "value").unwrap();
  assert_eq!(value.as_num(), Some(42.0));
}

#[test]
fn default_import_of_a_converted_module_takes_its_default() {
  let mut registry = Registry::new();
  registry.add_program(
    "e",
    transformed(
      Strategy::LiveBinding,
      module(vec![export_default_expr(builder::number(L, 7.0))]),
    ),
  );
  registry.add_program(
    "m",
    transformed(
      Strategy::LiveBinding,
      module(vec![
        import_default("d", "e"),
        export_let("out", builder::id(L, "d")),
      ]),
    ),
  );
  let runtime = Runtime::new(&registry);
  assert_eq!(runtime.export_value("m", "out").unwrap().as_num(), Some(7.0));
}

#[test]
fn namespace_import_of_a_plain_module_wraps_every_key() {
  let mut registry = legacy_registry();
  registry.add_program(
    "m",
    transformed(
      Strategy::Static,
      module(vec![
        import_ns("ns", "legacy"),
        export_let("picked", builder::member(L, builder::id(L, "ns"), "value")),
        export_let("whole", builder::id(L, "ns")),
      ]),
    ),
  );
  let runtime = Runtime::new(&registry);
  assert_eq!(
    runtime.export_value("m", "picked").unwrap().as_num(),
    Some(42.0)
  );
  let whole = runtime.export_value("m", "whole").unwrap();
  assert_eq!(
    runtime.read_prop(&whole, "name").unwrap().as_str(),
    Some("legacy")
  );
  // `default` points at the whole original value.
  let default = runtime.read_prop(&whole, "default").unwrap();
  assert_eq!(runtime.read_prop(&default, "value").unwrap().as_num(), Some(42.0));
}

/// Build a program that applies a helper twice and exports both results plus
/// an identity comparison, without going through the transform.
fn double_application(helper: Node<Stmt>, helper_name: &str) -> Vec<Node<Stmt>> {
  let load = builder::call(
    L,
    builder::id(L, "require"),
    vec![builder::string(L, "legacy")],
  );
  vec![
    helper,
    builder::var_decl_stmt(
      L,
      "once",
      Some(builder::call(L, builder::id(L, helper_name), vec![load])),
      VarDeclMode::Var,
    ),
    builder::var_decl_stmt(
      L,
      "twice",
      Some(builder::call(
        L,
        builder::id(L, helper_name),
        vec![builder::id(L, "once")],
      )),
      VarDeclMode::Var,
    ),
    builder::expr_stmt(
      L,
      builder::assign_expr(
        L,
        builder::member(L, builder::id(L, "exports"), "same"),
        builder::binary_expr(
          L,
          OperatorName::StrictEquality,
          builder::id(L, "once"),
          builder::id(L, "twice"),
        ),
      ),
    ),
  ]
}

#[test]
fn namespace_wrap_is_idempotent() {
  let mut registry = legacy_registry();
  registry.add_program(
    "m",
    double_application(namespace_wrap_helper_decl(L, "_wrap"), "_wrap"),
  );
  let runtime = Runtime::new(&registry);
  assert_eq!(
    runtime.export_value("m", "same").unwrap().as_bool(),
    Some(true)
  );
}

#[test]
fn default_unwrap_is_idempotent() {
  let mut registry = legacy_registry();
  registry.add_program(
    "m",
    double_application(default_unwrap_helper_decl(L, "_unwrap"), "_unwrap"),
  );
  let runtime = Runtime::new(&registry);
  assert_eq!(
    runtime.export_value("m", "same").unwrap().as_bool(),
    Some(true)
  );
}

#[test]
fn helpers_are_emitted_at_most_once_and_only_when_needed() {
  use interop_harness::print::print_program;

  // Two default imports, no namespace import: exactly one default helper
  // declaration, no wildcard helper.
  let body = transformed(
    Strategy::Static,
    module(vec![
      import_default("a", "x"),
      import_default("b", "y"),
      export_let("out", builder::id(L, "a")),
      export_let("out2", builder::id(L, "b")),
    ]),
  );
  let printed = print_program(&body);
  assert_eq!(
    printed.matches("function _interopRequireDefault(").count(),
    1,
    "{printed}"
  );
  assert!(!printed.contains("_interopRequireWildcard"), "{printed}");
}
