//! Builders for the JavaScript fragments the transform emits: the two shared
//! interop helpers and the statements that populate the module's export
//! surface.
//!
//! The helper bodies only reference their own parameters and globals, so
//! they never need hygiene treatment; everything else synthesized here takes
//! already-freshened names from the caller.

use syntax_js::ast::expr::Expr;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::decl::VarDeclMode;
use syntax_js::ast::stmt::Stmt;
use syntax_js::builder::*;
use syntax_js::loc::Loc;
use syntax_js::operator::OperatorName;

/// `module && module.__esModule`
fn is_module_record(loc: Loc, value: &str) -> Node<Expr> {
  binary_expr(
    loc,
    OperatorName::LogicalAnd,
    id(loc, value),
    member(loc, id(loc, value), "__esModule"),
  )
}

/// `Object.keys(subject).forEach(function (key) { body })`
fn for_each_key(loc: Loc, subject: Node<Expr>, body: Vec<Node<Stmt>>) -> Node<Stmt> {
  let keys = call(loc, member(loc, id(loc, "Object"), "keys"), vec![subject]);
  let callback = func_expr(loc, vec![param(loc, "key")], body);
  expr_stmt(
    loc,
    call(loc, member(loc, keys, "forEach"), vec![callback]),
  )
}

/// `if (key === "default" || key === "__esModule") return;`
fn skip_reserved_keys(loc: Loc) -> Node<Stmt> {
  let is_default = binary_expr(
    loc,
    OperatorName::StrictEquality,
    id(loc, "key"),
    string(loc, "default"),
  );
  let is_marker = binary_expr(
    loc,
    OperatorName::StrictEquality,
    id(loc, "key"),
    string(loc, "__esModule"),
  );
  if_stmt(
    loc,
    binary_expr(loc, OperatorName::LogicalOr, is_default, is_marker),
    vec![return_stmt(loc, None)],
  )
}

/// `Object.defineProperty(target, key, descriptor)`
fn define_property(
  loc: Loc,
  target: Node<Expr>,
  key: Node<Expr>,
  descriptor: Node<Expr>,
) -> Node<Expr> {
  call(
    loc,
    member(loc, id(loc, "Object"), "defineProperty"),
    vec![target, key, descriptor],
  )
}

/// `{ enumerable: true, get: function () { return value; } }`
fn getter_descriptor(loc: Loc, value: Node<Expr>) -> Node<Expr> {
  object(loc, vec![
    obj_prop(loc, "enumerable", boolean(loc, true)),
    obj_prop(
      loc,
      "get",
      func_expr(loc, vec![], vec![return_stmt(loc, Some(value))]),
    ),
  ])
}

/// The default-unwrap helper. Returns its argument unchanged when it is
/// already a converted module record; otherwise wraps it so `.default`
/// access works. The wrapper carries the record marker, which keeps the
/// helper idempotent across chained re-exports.
///
/// ```js
/// function <name>(module) {
///   return module && module.__esModule
///     ? module
///     : { __esModule: true, default: module };
/// }
/// ```
pub fn default_unwrap_helper_decl(loc: Loc, name: &str) -> Node<Stmt> {
  let wrapper = object(loc, vec![
    obj_prop(loc, "__esModule", boolean(loc, true)),
    obj_prop(loc, "default", id(loc, "module")),
  ]);
  let body = vec![return_stmt(
    loc,
    Some(cond(
      loc,
      is_module_record(loc, "module"),
      id(loc, "module"),
      wrapper,
    )),
  )];
  func_decl_stmt(loc, name, vec![param(loc, "module")], body)
}

/// The namespace-wrap helper. Copies every enumerable own property as a
/// forwarding accessor (so later mutation of the source module is observed)
/// plus a `default` member pointing at the whole original value.
///
/// ```js
/// function <name>(module) {
///   if (module && module.__esModule) return module;
///   var target = { __esModule: true };
///   if (module != null) {
///     Object.keys(module).forEach(function (key) {
///       if (key === "default" || key === "__esModule") return;
///       Object.defineProperty(target, key, {
///         enumerable: true,
///         get: function () { return module[key]; },
///       });
///     });
///   }
///   target.default = module;
///   return target;
/// }
/// ```
pub fn namespace_wrap_helper_decl(loc: Loc, name: &str) -> Node<Stmt> {
  let copy_key = expr_stmt(
    loc,
    define_property(
      loc,
      id(loc, "target"),
      id(loc, "key"),
      getter_descriptor(
        loc,
        computed_member(loc, id(loc, "module"), id(loc, "key")),
      ),
    ),
  );
  let copy_loop = for_each_key(loc, id(loc, "module"), vec![
    skip_reserved_keys(loc),
    copy_key,
  ]);
  let body = vec![
    if_stmt(loc, is_module_record(loc, "module"), vec![return_stmt(
      loc,
      Some(id(loc, "module")),
    )]),
    var_decl_stmt(
      loc,
      "target",
      Some(object(loc, vec![obj_prop(
        loc,
        "__esModule",
        boolean(loc, true),
      )])),
      VarDeclMode::Var,
    ),
    if_stmt(
      loc,
      binary_expr(loc, OperatorName::Inequality, id(loc, "module"), null(loc)),
      vec![copy_loop],
    ),
    expr_stmt(
      loc,
      assign_expr(
        loc,
        member(loc, id(loc, "target"), "default"),
        id(loc, "module"),
      ),
    ),
    return_stmt(loc, Some(id(loc, "target"))),
  ];
  func_decl_stmt(loc, name, vec![param(loc, "module")], body)
}

/// `exports.__esModule = true;`
pub fn module_marker_static(loc: Loc) -> Node<Stmt> {
  expr_stmt(
    loc,
    assign_expr(
      loc,
      member(loc, id(loc, "exports"), "__esModule"),
      boolean(loc, true),
    ),
  )
}

/// `Object.defineProperty(exports, "__esModule", { value: true });`
pub fn module_marker_live(loc: Loc) -> Node<Stmt> {
  expr_stmt(
    loc,
    define_property(
      loc,
      id(loc, "exports"),
      string(loc, "__esModule"),
      object(loc, vec![obj_prop(loc, "value", boolean(loc, true))]),
    ),
  )
}

/// `exports.<exported> = value;`
pub fn export_assign(loc: Loc, exported: &str, value: Node<Expr>) -> Node<Stmt> {
  expr_stmt(
    loc,
    assign_expr(loc, member(loc, id(loc, "exports"), exported), value),
  )
}

/// A live accessor: reads forward to the current value at access time.
///
/// `Object.defineProperty(exports, "<exported>", { enumerable: true, get:
/// function () { return value; } });`
pub fn export_accessor(loc: Loc, exported: &str, value: Node<Expr>) -> Node<Stmt> {
  expr_stmt(
    loc,
    define_property(
      loc,
      id(loc, "exports"),
      string(loc, exported),
      getter_descriptor(loc, value),
    ),
  )
}

/// `var <local> = { a: true, b: true };` — the explicitly exported names, so
/// wildcard re-export loops never shadow them.
pub fn export_names_decl(loc: Loc, local: &str, names: &[String]) -> Node<Stmt> {
  let members = names
    .iter()
    .map(|name| obj_prop(loc, name.clone(), boolean(loc, true)))
    .collect();
  var_decl_stmt(
    loc,
    local,
    Some(object(loc, members)),
    VarDeclMode::Var,
  )
}

/// Static `export * from`: copy every key as a plain value snapshot. Runs
/// before named-export assignments, so explicit exports win by overwriting.
///
/// ```js
/// Object.keys(_m).forEach(function (key) {
///   if (key === "default" || key === "__esModule") return;
///   exports[key] = _m[key];
/// });
/// ```
pub fn export_all_static(loc: Loc, slot: &str) -> Node<Stmt> {
  let copy = expr_stmt(
    loc,
    assign_expr(
      loc,
      computed_member(loc, id(loc, "exports"), id(loc, "key")),
      computed_member(loc, id(loc, slot), id(loc, "key")),
    ),
  );
  for_each_key(loc, id(loc, slot), vec![skip_reserved_keys(loc), copy])
}

/// Live `export * from`: define a forwarding accessor per key, skipping
/// reserved keys, explicitly exported names, and anything already present on
/// the export surface (first writer wins between overlapping wildcards).
///
/// ```js
/// Object.keys(_m).forEach(function (key) {
///   if (key === "default" || key === "__esModule") return;
///   if (Object.prototype.hasOwnProperty.call(_exportNames, key)) return;
///   if (key in exports) return;
///   Object.defineProperty(exports, key, {
///     enumerable: true,
///     get: function () { return _m[key]; },
///   });
/// });
/// ```
pub fn export_all_live(loc: Loc, slot: &str, export_names_local: Option<&str>) -> Node<Stmt> {
  let mut body = vec![skip_reserved_keys(loc)];
  if let Some(export_names) = export_names_local {
    let has_own = call(
      loc,
      member(
        loc,
        member(
          loc,
          member(loc, id(loc, "Object"), "prototype"),
          "hasOwnProperty",
        ),
        "call",
      ),
      vec![id(loc, export_names), id(loc, "key")],
    );
    body.push(if_stmt(loc, has_own, vec![return_stmt(loc, None)]));
  }
  body.push(if_stmt(
    loc,
    binary_expr(loc, OperatorName::In, id(loc, "key"), id(loc, "exports")),
    vec![return_stmt(loc, None)],
  ));
  body.push(expr_stmt(
    loc,
    define_property(
      loc,
      id(loc, "exports"),
      id(loc, "key"),
      getter_descriptor(loc, computed_member(loc, id(loc, slot), id(loc, "key"))),
    ),
  ));
  for_each_key(loc, id(loc, slot), body)
}
