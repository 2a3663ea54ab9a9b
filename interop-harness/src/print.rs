//! Compact, deterministic JavaScript rendering of the AST subset the
//! transform consumes and emits. One top-level statement per line, single
//! spaces inside, minimal parenthesization. Meant for test assertions, not
//! for shipping code.

use syntax_js::ast::class_or_object::*;
use syntax_js::ast::expr::lit::*;
use syntax_js::ast::expr::pat::*;
use syntax_js::ast::expr::*;
use syntax_js::ast::func::{Func, FuncBody};
use syntax_js::ast::import_export::*;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::decl::*;
use syntax_js::ast::stmt::*;
use syntax_js::operator::OperatorName;

pub fn print_program(stmts: &[Node<Stmt>]) -> String {
  stmts
    .iter()
    .map(|stmt| print_stmt(stmt))
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn print_stmt(stmt: &Node<Stmt>) -> String {
  let mut out = String::new();
  write_stmt(&mut out, stmt);
  out
}

pub fn print_expr(expr: &Node<Expr>) -> String {
  let mut out = String::new();
  write_expr(&mut out, expr, 0);
  out
}

fn write_stmts_spaced(out: &mut String, stmts: &[Node<Stmt>]) {
  for (i, stmt) in stmts.iter().enumerate() {
    if i > 0 {
      out.push(' ');
    }
    write_stmt(out, stmt);
  }
}

fn write_block(out: &mut String, stmts: &[Node<Stmt>]) {
  if stmts.is_empty() {
    out.push_str("{}");
    return;
  }
  out.push_str("{ ");
  write_stmts_spaced(out, stmts);
  out.push_str(" }");
}

fn write_stmt(out: &mut String, stmt: &Node<Stmt>) {
  match stmt.stx.as_ref() {
    Stmt::Block(block) => write_block(out, &block.stx.body),
    Stmt::Break(brk) => {
      out.push_str("break");
      if let Some(label) = &brk.stx.label {
        out.push(' ');
        out.push_str(label);
      }
      out.push(';');
    }
    Stmt::Continue(cont) => {
      out.push_str("continue");
      if let Some(label) = &cont.stx.label {
        out.push(' ');
        out.push_str(label);
      }
      out.push(';');
    }
    Stmt::DoWhile(do_while) => {
      out.push_str("do ");
      write_stmt(out, &do_while.stx.body);
      out.push_str(" while (");
      write_expr(out, &do_while.stx.condition, 0);
      out.push_str(");");
    }
    Stmt::Empty(_) => out.push(';'),
    Stmt::ExportDefaultExpr(export_default) => {
      out.push_str("export default ");
      write_expr(out, &export_default.stx.expression, 2);
      out.push(';');
    }
    Stmt::ExportList(export_list) => write_export_list(out, &export_list.stx),
    Stmt::Expr(expr_stmt) => {
      let needs_parens = starts_ambiguously(&expr_stmt.stx.expr);
      if needs_parens {
        out.push('(');
      }
      write_expr(out, &expr_stmt.stx.expr, 0);
      if needs_parens {
        out.push(')');
      }
      out.push(';');
    }
    Stmt::ForIn(for_in) => {
      out.push_str("for (");
      write_for_in_of_lhs(out, &for_in.stx.lhs);
      out.push_str(" in ");
      write_expr(out, &for_in.stx.rhs, 0);
      out.push_str(") ");
      write_block(out, &for_in.stx.body.stx.body);
    }
    Stmt::ForOf(for_of) => {
      out.push_str("for (");
      write_for_in_of_lhs(out, &for_of.stx.lhs);
      out.push_str(" of ");
      write_expr(out, &for_of.stx.rhs, 0);
      out.push_str(") ");
      write_block(out, &for_of.stx.body.stx.body);
    }
    Stmt::ForTriple(for_triple) => {
      out.push_str("for (");
      match &for_triple.stx.init {
        ForTripleStmtInit::None => {}
        ForTripleStmtInit::Expr(expr) => write_expr(out, expr, 0),
        ForTripleStmtInit::Decl(decl) => write_var_decl(out, &decl.stx),
      }
      out.push(';');
      if let Some(cond) = &for_triple.stx.cond {
        out.push(' ');
        write_expr(out, cond, 0);
      }
      out.push(';');
      if let Some(post) = &for_triple.stx.post {
        out.push(' ');
        write_expr(out, post, 0);
      }
      out.push_str(") ");
      write_block(out, &for_triple.stx.body.stx.body);
    }
    Stmt::If(if_stmt) => {
      out.push_str("if (");
      write_expr(out, &if_stmt.stx.test, 0);
      out.push_str(") ");
      write_stmt(out, &if_stmt.stx.consequent);
      if let Some(alternate) = &if_stmt.stx.alternate {
        out.push_str(" else ");
        write_stmt(out, alternate);
      }
    }
    Stmt::Import(import) => write_import(out, &import.stx),
    Stmt::Label(label) => {
      out.push_str(&label.stx.name);
      out.push_str(": ");
      write_stmt(out, &label.stx.statement);
    }
    Stmt::Return(ret) => {
      out.push_str("return");
      if let Some(value) = &ret.stx.value {
        out.push(' ');
        write_expr(out, value, 2);
      }
      out.push(';');
    }
    Stmt::Switch(switch) => {
      out.push_str("switch (");
      write_expr(out, &switch.stx.test, 0);
      out.push_str(") { ");
      for branch in &switch.stx.branches {
        match &branch.stx.case {
          Some(case) => {
            out.push_str("case ");
            write_expr(out, case, 0);
            out.push_str(": ");
          }
          None => out.push_str("default: "),
        }
        write_stmts_spaced(out, &branch.stx.body);
        out.push(' ');
      }
      out.push('}');
    }
    Stmt::Throw(throw) => {
      out.push_str("throw ");
      write_expr(out, &throw.stx.value, 2);
      out.push(';');
    }
    Stmt::Try(try_stmt) => {
      out.push_str("try ");
      write_block(out, &try_stmt.stx.wrapped.stx.body);
      if let Some(catch) = &try_stmt.stx.catch {
        out.push_str(" catch ");
        if let Some(parameter) = &catch.stx.parameter {
          out.push('(');
          write_pat(out, &parameter.stx.pat);
          out.push_str(") ");
        }
        write_block(out, &catch.stx.body);
      }
      if let Some(finally) = &try_stmt.stx.finally {
        out.push_str(" finally ");
        write_block(out, &finally.stx.body);
      }
    }
    Stmt::While(while_stmt) => {
      out.push_str("while (");
      write_expr(out, &while_stmt.stx.condition, 0);
      out.push_str(") ");
      write_stmt(out, &while_stmt.stx.body);
    }
    Stmt::ClassDecl(class) => {
      if class.stx.export {
        out.push_str("export ");
      }
      if class.stx.export_default {
        out.push_str("export default ");
      }
      write_class(
        out,
        class.stx.name.as_ref(),
        class.stx.extends.as_ref(),
        &class.stx.members,
      );
    }
    Stmt::FunctionDecl(func) => {
      if func.stx.export {
        out.push_str("export ");
      }
      if func.stx.export_default {
        out.push_str("export default ");
      }
      write_func(
        out,
        func.stx.name.as_ref().map(|name| name.stx.name.as_str()),
        &func.stx.function.stx,
      );
    }
    Stmt::VarDecl(decl) => {
      if decl.stx.export {
        out.push_str("export ");
      }
      write_var_decl(out, &decl.stx);
      out.push(';');
    }
  }
}

fn write_for_in_of_lhs(out: &mut String, lhs: &ForInOfLhs) {
  match lhs {
    ForInOfLhs::Assign(pat) => write_pat(out, pat),
    ForInOfLhs::Decl((mode, pat_decl)) => {
      out.push_str(mode_keyword(*mode));
      out.push(' ');
      write_pat(out, &pat_decl.stx.pat);
    }
  }
}

fn mode_keyword(mode: VarDeclMode) -> &'static str {
  match mode {
    VarDeclMode::Const => "const",
    VarDeclMode::Let => "let",
    VarDeclMode::Var => "var",
  }
}

fn write_var_decl(out: &mut String, decl: &VarDecl) {
  out.push_str(mode_keyword(decl.mode));
  out.push(' ');
  for (i, declarator) in decl.declarators.iter().enumerate() {
    if i > 0 {
      out.push_str(", ");
    }
    write_pat(out, &declarator.pattern.stx.pat);
    if let Some(init) = &declarator.initializer {
      out.push_str(" = ");
      write_expr(out, init, 3);
    }
  }
}

fn write_import(out: &mut String, import: &ImportStmt) {
  out.push_str("import ");
  if import.type_only {
    out.push_str("type ");
  }
  let mut wrote_clause = false;
  if let Some(default) = &import.default {
    write_pat(out, &default.stx.pat);
    wrote_clause = true;
  }
  match &import.names {
    Some(ImportNames::All(alias)) => {
      if wrote_clause {
        out.push_str(", ");
      }
      out.push_str("* as ");
      write_pat(out, &alias.stx.pat);
      wrote_clause = true;
    }
    Some(ImportNames::Specific(entries)) => {
      if wrote_clause {
        out.push_str(", ");
      }
      out.push_str("{ ");
      for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
          out.push_str(", ");
        }
        write_module_name(out, &entry.stx.importable);
        out.push_str(" as ");
        write_pat(out, &entry.stx.alias.stx.pat);
      }
      out.push_str(" }");
      wrote_clause = true;
    }
    None => {}
  }
  if wrote_clause {
    out.push_str(" from ");
  }
  write_str_lit(out, &import.module);
  out.push(';');
}

fn write_export_list(out: &mut String, export_list: &ExportListStmt) {
  out.push_str("export ");
  if export_list.type_only {
    out.push_str("type ");
  }
  match &export_list.names {
    ExportNames::All(alias) => {
      out.push('*');
      if let Some(alias) = alias {
        out.push_str(" as ");
        out.push_str(&alias.stx.name);
      }
    }
    ExportNames::Specific(entries) => {
      out.push_str("{ ");
      for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
          out.push_str(", ");
        }
        write_module_name(out, &entry.stx.exportable);
        out.push_str(" as ");
        out.push_str(&entry.stx.alias.stx.name);
      }
      out.push_str(" }");
    }
  }
  if let Some(from) = &export_list.from {
    out.push_str(" from ");
    write_str_lit(out, from);
  }
  out.push(';');
}

fn write_module_name(out: &mut String, name: &ModuleExportImportName) {
  match name {
    ModuleExportImportName::Ident(name) => out.push_str(name),
    ModuleExportImportName::Str(name) => write_str_lit(out, name),
  }
}

fn write_pat(out: &mut String, pat: &Node<Pat>) {
  match pat.stx.as_ref() {
    Pat::Id(id) => out.push_str(&id.stx.name),
    Pat::Arr(arr) => {
      out.push('[');
      for (i, elem) in arr.stx.elements.iter().enumerate() {
        if i > 0 {
          out.push_str(", ");
        }
        if let Some(elem) = elem {
          write_pat(out, &elem.target);
          if let Some(default) = &elem.default_value {
            out.push_str(" = ");
            write_expr(out, default, 3);
          }
        }
      }
      if let Some(rest) = &arr.stx.rest {
        if !arr.stx.elements.is_empty() {
          out.push_str(", ");
        }
        out.push_str("...");
        write_pat(out, rest);
      }
      out.push(']');
    }
    Pat::Obj(obj) => {
      out.push_str("{ ");
      for (i, prop) in obj.stx.properties.iter().enumerate() {
        if i > 0 {
          out.push_str(", ");
        }
        if prop.stx.shorthand {
          write_pat(out, &prop.stx.target);
        } else {
          write_key(out, &prop.stx.key);
          out.push_str(": ");
          write_pat(out, &prop.stx.target);
        }
        if let Some(default) = &prop.stx.default_value {
          out.push_str(" = ");
          write_expr(out, default, 3);
        }
      }
      if let Some(rest) = &obj.stx.rest {
        if !obj.stx.properties.is_empty() {
          out.push_str(", ");
        }
        out.push_str("...");
        out.push_str(&rest.stx.name);
      }
      out.push_str(" }");
    }
  }
}

fn write_key(out: &mut String, key: &ClassOrObjKey) {
  match key {
    ClassOrObjKey::Direct(direct) => out.push_str(&direct.stx.key),
    ClassOrObjKey::Computed(expr) => {
      out.push('[');
      write_expr(out, expr, 0);
      out.push(']');
    }
  }
}

fn write_func(out: &mut String, name: Option<&str>, func: &Func) {
  if func.arrow {
    out.push('(');
    write_params(out, func);
    out.push_str(") => ");
    match &func.body {
      FuncBody::Block(body) => write_block(out, body),
      FuncBody::Expression(expr) => write_expr(out, expr, 3),
    }
    return;
  }
  out.push_str("function ");
  if let Some(name) = name {
    out.push_str(name);
  }
  out.push('(');
  write_params(out, func);
  out.push_str(") ");
  match &func.body {
    FuncBody::Block(body) => write_block(out, body),
    FuncBody::Expression(_) => out.push_str("{}"),
  }
}

fn write_params(out: &mut String, func: &Func) {
  for (i, parameter) in func.parameters.iter().enumerate() {
    if i > 0 {
      out.push_str(", ");
    }
    if parameter.stx.rest {
      out.push_str("...");
    }
    write_pat(out, &parameter.stx.pattern.stx.pat);
    if let Some(default) = &parameter.stx.default_value {
      out.push_str(" = ");
      write_expr(out, default, 3);
    }
  }
}

fn write_class(
  out: &mut String,
  name: Option<&Node<ClassOrFuncName>>,
  extends: Option<&Node<Expr>>,
  members: &[Node<ClassMember>],
) {
  out.push_str("class");
  if let Some(name) = name {
    out.push(' ');
    out.push_str(&name.stx.name);
  }
  if let Some(extends) = extends {
    out.push_str(" extends ");
    write_expr(out, extends, 18);
  }
  out.push_str(" { ");
  for member in members {
    if member.stx.statik {
      out.push_str("static ");
    }
    match &member.stx.val {
      ClassOrObjVal::Getter(getter) => {
        out.push_str("get ");
        write_key(out, &member.stx.key);
        write_method_tail(out, &getter.stx.func.stx);
      }
      ClassOrObjVal::Setter(setter) => {
        out.push_str("set ");
        write_key(out, &member.stx.key);
        write_method_tail(out, &setter.stx.func.stx);
      }
      ClassOrObjVal::Method(method) => {
        write_key(out, &member.stx.key);
        write_method_tail(out, &method.stx.func.stx);
      }
      ClassOrObjVal::Prop(value) => {
        write_key(out, &member.stx.key);
        if let Some(value) = value {
          out.push_str(" = ");
          write_expr(out, value, 3);
        }
        out.push(';');
      }
    }
    out.push(' ');
  }
  out.push('}');
}

fn write_method_tail(out: &mut String, func: &Func) {
  out.push('(');
  write_params(out, func);
  out.push_str(") ");
  match &func.body {
    FuncBody::Block(body) => write_block(out, body),
    FuncBody::Expression(_) => out.push_str("{}"),
  }
}

/// An expression statement starting with `function`, `class` or `{` would
/// parse as a different construct.
fn starts_ambiguously(expr: &Node<Expr>) -> bool {
  match expr.stx.as_ref() {
    Expr::Func(_) | Expr::Class(_) | Expr::LitObj(_) => true,
    Expr::Binary(binary) => starts_ambiguously(&binary.stx.left),
    Expr::Call(call) => starts_ambiguously(&call.stx.callee),
    Expr::Member(member) => starts_ambiguously(&member.stx.left),
    Expr::ComputedMember(computed) => starts_ambiguously(&computed.stx.object),
    Expr::Cond(cond) => starts_ambiguously(&cond.stx.test),
    _ => false,
  }
}

fn op_prec(op: OperatorName) -> u8 {
  match op {
    OperatorName::Comma => 1,
    OperatorName::Assignment => 2,
    OperatorName::LogicalOr => 4,
    OperatorName::LogicalAnd => 5,
    OperatorName::Equality
    | OperatorName::Inequality
    | OperatorName::StrictEquality
    | OperatorName::StrictInequality => 9,
    OperatorName::In => 10,
    OperatorName::Addition => 12,
    OperatorName::LogicalNot | OperatorName::Typeof | OperatorName::Void => 15,
  }
}

fn op_str(op: OperatorName) -> &'static str {
  match op {
    OperatorName::Addition => "+",
    OperatorName::Assignment => "=",
    OperatorName::Comma => ",",
    OperatorName::Equality => "==",
    OperatorName::In => "in",
    OperatorName::Inequality => "!=",
    OperatorName::LogicalAnd => "&&",
    OperatorName::LogicalNot => "!",
    OperatorName::LogicalOr => "||",
    OperatorName::StrictEquality => "===",
    OperatorName::StrictInequality => "!==",
    OperatorName::Typeof => "typeof",
    OperatorName::Void => "void",
  }
}

fn write_expr(out: &mut String, expr: &Node<Expr>, parent_prec: u8) {
  match expr.stx.as_ref() {
    Expr::ArrowFunc(arrow) => {
      let needs_parens = parent_prec > 2;
      if needs_parens {
        out.push('(');
      }
      write_func(out, None, &arrow.stx.func.stx);
      if needs_parens {
        out.push(')');
      }
    }
    Expr::Binary(binary) => {
      let prec = op_prec(binary.stx.operator);
      let needs_parens = prec < parent_prec;
      if needs_parens {
        out.push('(');
      }
      let (left_prec, right_prec) = if binary.stx.operator == OperatorName::Assignment {
        (prec + 1, prec)
      } else {
        (prec, prec + 1)
      };
      write_expr(out, &binary.stx.left, left_prec);
      match binary.stx.operator {
        OperatorName::Comma => out.push_str(", "),
        op => {
          out.push(' ');
          out.push_str(op_str(op));
          out.push(' ');
        }
      }
      write_expr(out, &binary.stx.right, right_prec);
      if needs_parens {
        out.push(')');
      }
    }
    Expr::Call(call) => {
      let needs_parens = 18 < parent_prec;
      if needs_parens {
        out.push('(');
      }
      write_expr(out, &call.stx.callee, 18);
      out.push('(');
      for (i, arg) in call.stx.arguments.iter().enumerate() {
        if i > 0 {
          out.push_str(", ");
        }
        if arg.stx.spread {
          out.push_str("...");
        }
        write_expr(out, &arg.stx.value, 3);
      }
      out.push(')');
      if needs_parens {
        out.push(')');
      }
    }
    Expr::Class(class) => write_class(
      out,
      class.stx.name.as_ref(),
      class.stx.extends.as_ref(),
      &class.stx.members,
    ),
    Expr::ComputedMember(computed) => {
      write_expr(out, &computed.stx.object, 18);
      if computed.stx.optional_chaining {
        out.push_str("?.");
      }
      out.push('[');
      write_expr(out, &computed.stx.member, 0);
      out.push(']');
    }
    Expr::Cond(cond) => {
      let needs_parens = 3 < parent_prec;
      if needs_parens {
        out.push('(');
      }
      write_expr(out, &cond.stx.test, 4);
      out.push_str(" ? ");
      write_expr(out, &cond.stx.consequent, 3);
      out.push_str(" : ");
      write_expr(out, &cond.stx.alternate, 3);
      if needs_parens {
        out.push(')');
      }
    }
    Expr::Func(func_expr) => write_func(
      out,
      func_expr.stx.name.as_ref().map(|name| name.stx.name.as_str()),
      &func_expr.stx.func.stx,
    ),
    Expr::Id(id) => out.push_str(&id.stx.name),
    Expr::Member(member) => {
      write_expr(out, &member.stx.left, 18);
      if member.stx.optional_chaining {
        out.push_str("?.");
      } else {
        out.push('.');
      }
      out.push_str(&member.stx.right);
    }
    Expr::This(_) => out.push_str("this"),
    Expr::Unary(unary) => {
      let needs_parens = 15 < parent_prec;
      if needs_parens {
        out.push('(');
      }
      let op = op_str(unary.stx.operator);
      out.push_str(op);
      if op.chars().all(|c| c.is_ascii_alphabetic()) {
        out.push(' ');
      }
      write_expr(out, &unary.stx.argument, 15);
      if needs_parens {
        out.push(')');
      }
    }
    Expr::LitArr(arr) => {
      out.push('[');
      for (i, elem) in arr.stx.elements.iter().enumerate() {
        if i > 0 {
          out.push_str(", ");
        }
        match elem {
          LitArrElem::Single(value) => write_expr(out, value, 3),
          LitArrElem::Rest(value) => {
            out.push_str("...");
            write_expr(out, value, 3);
          }
          LitArrElem::Empty => {}
        }
      }
      out.push(']');
    }
    Expr::LitBool(lit) => out.push_str(if lit.stx.value { "true" } else { "false" }),
    Expr::LitNull(_) => out.push_str("null"),
    Expr::LitNum(lit) => {
      let value = lit.stx.value;
      if value.fract() == 0.0 && value.abs() < 1e15 {
        out.push_str(&format!("{}", value as i64));
      } else {
        out.push_str(&format!("{}", value));
      }
    }
    Expr::LitObj(obj) => {
      if obj.stx.members.is_empty() {
        out.push_str("{}");
        return;
      }
      out.push_str("{ ");
      for (i, obj_member) in obj.stx.members.iter().enumerate() {
        if i > 0 {
          out.push_str(", ");
        }
        write_obj_member(out, obj_member);
      }
      out.push_str(" }");
    }
    Expr::LitStr(lit) => write_str_lit(out, &lit.stx.value),
    Expr::ArrPat(_) | Expr::IdPat(_) | Expr::ObjPat(_) => {
      write_pat_expr(out, expr);
    }
  }
}

fn write_obj_member(out: &mut String, member: &Node<ObjMember>) {
  match &member.stx.typ {
    ObjMemberType::Valued { key, val } => match val {
      ClassOrObjVal::Getter(getter) => {
        out.push_str("get ");
        write_key(out, key);
        write_method_tail(out, &getter.stx.func.stx);
      }
      ClassOrObjVal::Setter(setter) => {
        out.push_str("set ");
        write_key(out, key);
        write_method_tail(out, &setter.stx.func.stx);
      }
      ClassOrObjVal::Method(method) => {
        write_key(out, key);
        write_method_tail(out, &method.stx.func.stx);
      }
      ClassOrObjVal::Prop(value) => {
        write_key(out, key);
        out.push_str(": ");
        match value {
          Some(value) => write_expr(out, value, 3),
          None => out.push_str("undefined"),
        }
      }
    },
    ObjMemberType::Shorthand { id } => out.push_str(&id.stx.name),
    ObjMemberType::Rest { val } => {
      out.push_str("...");
      write_expr(out, val, 3);
    }
  }
}

fn write_pat_expr(out: &mut String, expr: &Node<Expr>) {
  match expr.stx.as_ref() {
    Expr::IdPat(id) => out.push_str(&id.stx.name),
    Expr::ArrPat(arr) => {
      out.push('[');
      for (i, elem) in arr.stx.elements.iter().enumerate() {
        if i > 0 {
          out.push_str(", ");
        }
        if let Some(elem) = elem {
          write_pat(out, &elem.target);
        }
      }
      out.push(']');
    }
    Expr::ObjPat(obj) => {
      out.push_str("{ ");
      for (i, prop) in obj.stx.properties.iter().enumerate() {
        if i > 0 {
          out.push_str(", ");
        }
        write_key(out, &prop.stx.key);
        out.push_str(": ");
        write_pat(out, &prop.stx.target);
      }
      out.push_str(" }");
    }
    _ => {}
  }
}

fn write_str_lit(out: &mut String, value: &str) {
  out.push('"');
  for c in value.chars() {
    match c {
      '"' => out.push_str("\\\""),
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      c => out.push(c),
    }
  }
  out.push('"');
}

#[cfg(test)]
mod tests {
  use super::*;
  use syntax_js::ast::stmt::decl::VarDeclMode;
  use syntax_js::builder::*;
  use syntax_js::loc::Loc;
  use syntax_js::operator::OperatorName;

  const L: Loc = Loc(0, 0);

  #[test]
  fn prints_var_decl_with_call() {
    let stmt = var_decl_stmt(
      L,
      "_x",
      Some(call(L, id(L, "require"), vec![string(L, "x")])),
      VarDeclMode::Var,
    );
    assert_eq!(print_stmt(&stmt), r#"var _x = require("x");"#);
  }

  #[test]
  fn parenthesizes_nested_assignment() {
    let inner = assign_expr(L, id(L, "a"), id(L, "b"));
    let outer = binary_expr(L, OperatorName::LogicalAnd, id(L, "c"), inner);
    assert_eq!(print_expr(&outer), "c && (a = b)");
  }

  #[test]
  fn object_literal_statement_is_parenthesized() {
    let stmt = expr_stmt(L, empty_object(L));
    assert_eq!(print_stmt(&stmt), "({});");
  }

  #[test]
  fn prints_member_access_and_strings() {
    let expr = member(L, id(L, "exports"), "__esModule");
    assert_eq!(print_expr(&expr), "exports.__esModule");
    let lit = string(L, "a\"b");
    assert_eq!(print_expr(&lit), r#""a\"b""#);
  }
}
