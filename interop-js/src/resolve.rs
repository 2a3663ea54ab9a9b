//! Binding resolver: maps every import-introduced local to a reference
//! descriptor, then walks the remaining program body once, counting which
//! loaded-module slots are actually read and substituting slot expressions
//! for import locals. Shadowed names are left alone.

use ahash::{HashMap, HashSet};
use syntax_js::ast::class_or_object::{
  ClassMember, ClassOrObjKey, ClassOrObjMemberDirectKey, ClassOrObjVal, ObjMemberType,
};
use syntax_js::ast::expr::lit::LitArrElem;
use syntax_js::ast::expr::pat::Pat;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::func::{Func, FuncBody};
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::decl::VarDecl;
use syntax_js::ast::stmt::*;
use syntax_js::builder;
use syntax_js::loc::Loc;

use crate::hygiene::{slot_hint, FreshNames};
use crate::records::{ModuleRecords, SlotKind};
use crate::Strategy;

/// In the static strategy, a specifier with at most this many named imports
/// keeps one narrow load statement per member instead of a shared slot.
const NARROW_LOAD_LIMIT: usize = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SlotId(pub usize);

#[derive(Debug)]
pub struct Slot {
  pub specifier: String,
  pub kind: SlotKind,
  pub name: String,
  /// Set when any surviving reference reads through this slot. Unreferenced
  /// slots are never materialized.
  pub referenced: bool,
}

#[derive(Debug, Default)]
pub struct SlotTable {
  slots: Vec<Slot>,
  by_key: HashMap<(String, SlotKind), usize>,
}

impl SlotTable {
  pub fn intern(&mut self, fresh: &mut FreshNames, specifier: &str, kind: SlotKind) -> SlotId {
    if let Some(&idx) = self.by_key.get(&(specifier.to_string(), kind)) {
      return SlotId(idx);
    }
    let name = fresh.fresh(slot_hint(specifier, kind));
    let idx = self.slots.len();
    self.slots.push(Slot {
      specifier: specifier.to_string(),
      kind,
      name,
      referenced: false,
    });
    self.by_key.insert((specifier.to_string(), kind), idx);
    SlotId(idx)
  }

  /// Intern and mark referenced in one step, for consumers (re-exports) that
  /// always materialize the slot they name.
  pub fn require(&mut self, fresh: &mut FreshNames, specifier: &str, kind: SlotKind) -> SlotId {
    let id = self.intern(fresh, specifier, kind);
    self.slots[id.0].referenced = true;
    id
  }

  pub fn mark_referenced(&mut self, id: SlotId) {
    self.slots[id.0].referenced = true;
  }

  pub fn get(&self, id: SlotId) -> &Slot {
    &self.slots[id.0]
  }

  pub fn lookup_id(&self, specifier: &str, kind: SlotKind) -> Option<SlotId> {
    self
      .by_key
      .get(&(specifier.to_string(), kind))
      .map(|&idx| SlotId(idx))
  }

  pub fn slots(&self) -> &[Slot] {
    &self.slots
  }

  pub fn any_interop_slot_referenced(&self) -> bool {
    self.slots.iter().any(|slot| {
      slot.referenced
        && matches!(
          slot.kind,
          SlotKind::DefaultUnwrapped | SlotKind::NamespaceWrapped
        )
    })
  }
}

/// How a read of an import local is satisfied.
#[derive(Clone, Debug)]
pub enum RefTarget {
  /// Namespace import: the slot is the value.
  Slot(SlotId),
  /// Named/default import: a property read off the slot.
  SlotMember(SlotId, String),
  /// Static-strategy narrow load: the local keeps its own name and gets its
  /// own load statement. The payload indexes into `ModuleRecords::imports`.
  KeepLocal(usize),
}

#[derive(Debug)]
pub struct Resolution {
  pub slots: SlotTable,
  refs: HashMap<String, RefTarget>,
  /// Parallel to `ModuleRecords::imports`: whether the binding was read
  /// anywhere. Only meaningful for `KeepLocal` targets; slot-backed bindings
  /// track usage on the slot itself.
  pub used_imports: Vec<bool>,
}

impl Resolution {
  /// Resolve a local name read in export position: marks usage and returns
  /// the expression that reaches the value, or `None` if the name is not an
  /// import binding (a plain identifier read suffices).
  pub fn resolve_local_value(&mut self, name: &str, loc: Loc) -> Option<Node<Expr>> {
    let target = self.refs.get(name)?.clone();
    match target {
      RefTarget::Slot(id) => {
        self.slots.mark_referenced(id);
        Some(builder::id(loc, self.slots.get(id).name.clone()))
      }
      RefTarget::SlotMember(id, member) => {
        self.slots.mark_referenced(id);
        Some(builder::member(
          loc,
          builder::id(loc, self.slots.get(id).name.clone()),
          member,
        ))
      }
      RefTarget::KeepLocal(idx) => {
        self.used_imports[idx] = true;
        None
      }
    }
  }
}

/// Build the reference-descriptor table for every import binding.
pub fn resolve_bindings(
  fresh: &mut FreshNames,
  strategy: Strategy,
  records: &ModuleRecords,
) -> Resolution {
  // Count named (non-default) members per specifier to pick between a shared
  // slot and narrow per-member loads. The live strategy always shares the
  // slot: a narrow `var a = load().a` would freeze the binding.
  let mut named_members: HashMap<&str, usize> = HashMap::default();
  if strategy == Strategy::Static {
    for binding in &records.imports {
      if binding.kind == SlotKind::Raw {
        *named_members.entry(binding.specifier.as_str()).or_default() += 1;
      }
    }
  }

  let mut slots = SlotTable::default();
  let mut refs: HashMap<String, RefTarget> = HashMap::default();
  for (idx, binding) in records.imports.iter().enumerate() {
    let target = match binding.kind {
      SlotKind::NamespaceWrapped => {
        RefTarget::Slot(slots.intern(fresh, &binding.specifier, binding.kind))
      }
      SlotKind::DefaultUnwrapped => RefTarget::SlotMember(
        slots.intern(fresh, &binding.specifier, binding.kind),
        "default".to_string(),
      ),
      SlotKind::Raw => {
        let narrow = named_members
          .get(binding.specifier.as_str())
          .is_some_and(|&count| count <= NARROW_LOAD_LIMIT);
        if narrow {
          RefTarget::KeepLocal(idx)
        } else {
          RefTarget::SlotMember(
            slots.intern(fresh, &binding.specifier, binding.kind),
            binding.member.clone().unwrap_or_default(),
          )
        }
      }
    };
    refs.insert(binding.local.clone(), target);
  }

  Resolution {
    slots,
    refs,
    used_imports: vec![false; records.imports.len()],
  }
}

/// Walk the remaining program body, marking slot usage and substituting
/// reference descriptors for import locals.
pub fn rewrite_body(resolution: &mut Resolution, body: &mut Vec<Node<Stmt>>) {
  let mut rewriter = Rewriter {
    resolution,
    scopes: Vec::new(),
  };
  rewriter.rewrite_stmts(body);
}

struct Rewriter<'a> {
  resolution: &'a mut Resolution,
  scopes: Vec<HashSet<String>>,
}

impl Rewriter<'_> {
  fn is_shadowed(&self, name: &str) -> bool {
    self.scopes.iter().any(|scope| scope.contains(name))
  }

  /// Returns the substitute expression for a read of `name`, also recording
  /// usage. `None` means the identifier stays as written.
  fn resolve_read(&mut self, name: &str, loc: Loc) -> Option<Node<Expr>> {
    if self.is_shadowed(name) {
      return None;
    }
    let target = self.resolution.refs.get(name)?.clone();
    match target {
      RefTarget::Slot(id) => {
        self.resolution.slots.mark_referenced(id);
        let slot_name = self.resolution.slots.get(id).name.clone();
        Some(builder::id(loc, slot_name))
      }
      RefTarget::SlotMember(id, member) => {
        self.resolution.slots.mark_referenced(id);
        let slot_name = self.resolution.slots.get(id).name.clone();
        Some(builder::member(loc, builder::id(loc, slot_name), member))
      }
      RefTarget::KeepLocal(idx) => {
        self.resolution.used_imports[idx] = true;
        None
      }
    }
  }

  fn rewrite_stmts(&mut self, stmts: &mut Vec<Node<Stmt>>) {
    for stmt in stmts {
      self.rewrite_stmt(stmt);
    }
  }

  fn rewrite_block(&mut self, stmts: &mut Vec<Node<Stmt>>) {
    self.scopes.push(block_decls(stmts));
    self.rewrite_stmts(stmts);
    self.scopes.pop();
  }

  fn rewrite_stmt(&mut self, stmt: &mut Node<Stmt>) {
    match stmt.stx.as_mut() {
      Stmt::Block(block) => self.rewrite_block(&mut block.stx.body),
      Stmt::Break(_) | Stmt::Continue(_) | Stmt::Empty(_) => {}
      Stmt::DoWhile(do_while) => {
        self.rewrite_stmt(&mut do_while.stx.body);
        self.rewrite_expr(&mut do_while.stx.condition);
      }
      Stmt::ExportDefaultExpr(export_default) => {
        // Scanned away before this pass runs; tolerate stray nodes.
        self.rewrite_expr(&mut export_default.stx.expression);
      }
      Stmt::ExportList(_) | Stmt::Import(_) => {}
      Stmt::Expr(expr_stmt) => self.rewrite_expr(&mut expr_stmt.stx.expr),
      Stmt::ForIn(for_in) => self.rewrite_for_in_of(
        &mut for_in.stx.lhs,
        &mut for_in.stx.rhs,
        &mut for_in.stx.body,
      ),
      Stmt::ForOf(for_of) => self.rewrite_for_in_of(
        &mut for_of.stx.lhs,
        &mut for_of.stx.rhs,
        &mut for_of.stx.body,
      ),
      Stmt::ForTriple(for_triple) => {
        let mut scope = HashSet::default();
        if let ForTripleStmtInit::Decl(decl) = &for_triple.stx.init {
          collect_var_decl_names(&decl.stx, &mut scope);
        }
        scope.extend(block_decls(&for_triple.stx.body.stx.body));
        self.scopes.push(scope);
        match &mut for_triple.stx.init {
          ForTripleStmtInit::None => {}
          ForTripleStmtInit::Expr(expr) => self.rewrite_expr(expr),
          ForTripleStmtInit::Decl(decl) => self.rewrite_var_decl(decl),
        }
        if let Some(cond) = &mut for_triple.stx.cond {
          self.rewrite_expr(cond);
        }
        if let Some(post) = &mut for_triple.stx.post {
          self.rewrite_expr(post);
        }
        self.rewrite_stmts(&mut for_triple.stx.body.stx.body);
        self.scopes.pop();
      }
      Stmt::If(if_stmt) => {
        self.rewrite_expr(&mut if_stmt.stx.test);
        self.rewrite_stmt(&mut if_stmt.stx.consequent);
        if let Some(alternate) = &mut if_stmt.stx.alternate {
          self.rewrite_stmt(alternate);
        }
      }
      Stmt::Label(label) => self.rewrite_stmt(&mut label.stx.statement),
      Stmt::Return(ret) => {
        if let Some(value) = &mut ret.stx.value {
          self.rewrite_expr(value);
        }
      }
      Stmt::Switch(switch) => {
        self.rewrite_expr(&mut switch.stx.test);
        let mut scope = HashSet::default();
        for branch in &switch.stx.branches {
          scope.extend(block_decls(&branch.stx.body));
        }
        self.scopes.push(scope);
        for branch in &mut switch.stx.branches {
          if let Some(case) = &mut branch.stx.case {
            self.rewrite_expr(case);
          }
          self.rewrite_stmts(&mut branch.stx.body);
        }
        self.scopes.pop();
      }
      Stmt::Throw(throw) => self.rewrite_expr(&mut throw.stx.value),
      Stmt::Try(try_stmt) => {
        self.rewrite_block(&mut try_stmt.stx.wrapped.stx.body);
        if let Some(catch) = &mut try_stmt.stx.catch {
          let mut scope = block_decls(&catch.stx.body);
          if let Some(parameter) = &catch.stx.parameter {
            collect_pat_decl_names(&parameter.stx.pat, &mut scope);
          }
          self.scopes.push(scope);
          self.rewrite_stmts(&mut catch.stx.body);
          self.scopes.pop();
        }
        if let Some(finally) = &mut try_stmt.stx.finally {
          self.rewrite_block(&mut finally.stx.body);
        }
      }
      Stmt::While(while_stmt) => {
        self.rewrite_expr(&mut while_stmt.stx.condition);
        self.rewrite_stmt(&mut while_stmt.stx.body);
      }
      Stmt::ClassDecl(class) => {
        if let Some(extends) = &mut class.stx.extends {
          self.rewrite_expr(extends);
        }
        for member in &mut class.stx.members {
          self.rewrite_class_member(member);
        }
      }
      Stmt::FunctionDecl(func) => {
        let function = &mut func.stx.function;
        self.rewrite_func(function);
      }
      Stmt::VarDecl(decl) => self.rewrite_var_decl(decl),
    }
  }

  fn rewrite_for_in_of(
    &mut self,
    lhs: &mut ForInOfLhs,
    rhs: &mut Node<Expr>,
    body: &mut Node<ForBody>,
  ) {
    let mut scope = HashSet::default();
    if let ForInOfLhs::Decl((_, pat_decl)) = lhs {
      collect_pat_decl_names(&pat_decl.stx.pat, &mut scope);
    }
    scope.extend(block_decls(&body.stx.body));
    self.scopes.push(scope);
    if let ForInOfLhs::Assign(pat) = lhs {
      self.rewrite_pat_defaults(pat);
    }
    self.rewrite_expr(rhs);
    self.rewrite_stmts(&mut body.stx.body);
    self.scopes.pop();
  }

  fn rewrite_var_decl(&mut self, decl: &mut Node<VarDecl>) {
    for declarator in &mut decl.stx.declarators {
      self.rewrite_pat_defaults(&mut declarator.pattern.stx.pat);
      if let Some(init) = &mut declarator.initializer {
        self.rewrite_expr(init);
      }
    }
  }

  /// Patterns bind names rather than read them, but defaults and computed
  /// keys inside a pattern are ordinary expressions.
  fn rewrite_pat_defaults(&mut self, pat: &mut Node<Pat>) {
    match pat.stx.as_mut() {
      Pat::Id(_) => {}
      Pat::Arr(arr) => {
        for elem in arr.stx.elements.iter_mut().flatten() {
          self.rewrite_pat_defaults(&mut elem.target);
          if let Some(default) = &mut elem.default_value {
            self.rewrite_expr(default);
          }
        }
        if let Some(rest) = &mut arr.stx.rest {
          self.rewrite_pat_defaults(rest);
        }
      }
      Pat::Obj(obj) => {
        for prop in &mut obj.stx.properties {
          if let ClassOrObjKey::Computed(key) = &mut prop.stx.key {
            self.rewrite_expr(key);
          }
          self.rewrite_pat_defaults(&mut prop.stx.target);
          if let Some(default) = &mut prop.stx.default_value {
            self.rewrite_expr(default);
          }
        }
      }
    }
  }

  fn rewrite_func(&mut self, func: &mut Node<Func>) {
    let mut scope = HashSet::default();
    for parameter in &func.stx.parameters {
      collect_pat_decl_names(&parameter.stx.pattern.stx.pat, &mut scope);
    }
    match &func.stx.body {
      FuncBody::Block(body) => {
        scope.extend(hoisted_decls(body));
      }
      FuncBody::Expression(_) => {}
    }
    self.scopes.push(scope);
    for parameter in &mut func.stx.parameters {
      if let Some(default) = &mut parameter.stx.default_value {
        self.rewrite_expr(default);
      }
      self.rewrite_pat_defaults(&mut parameter.stx.pattern.stx.pat);
    }
    match &mut func.stx.body {
      FuncBody::Block(body) => self.rewrite_stmts(body),
      FuncBody::Expression(expr) => self.rewrite_expr(expr),
    }
    self.scopes.pop();
  }

  fn rewrite_class_member(&mut self, member: &mut Node<ClassMember>) {
    if let ClassOrObjKey::Computed(key) = &mut member.stx.key {
      self.rewrite_expr(key);
    }
    match &mut member.stx.val {
      ClassOrObjVal::Getter(getter) => self.rewrite_func(&mut getter.stx.func),
      ClassOrObjVal::Setter(setter) => self.rewrite_func(&mut setter.stx.func),
      ClassOrObjVal::Method(method) => self.rewrite_func(&mut method.stx.func),
      ClassOrObjVal::Prop(Some(value)) => self.rewrite_expr(value),
      ClassOrObjVal::Prop(None) => {}
    }
  }

  fn rewrite_expr(&mut self, node: &mut Node<Expr>) {
    let loc = node.loc;
    if let Expr::Id(id) = node.stx.as_ref() {
      let name = id.stx.name.clone();
      if let Some(replacement) = self.resolve_read(&name, loc) {
        *node = replacement;
      }
      return;
    }
    match node.stx.as_mut() {
      Expr::Id(_) => unreachable!("handled above"),
      Expr::ArrowFunc(arrow) => self.rewrite_func(&mut arrow.stx.func),
      Expr::Binary(binary) => {
        self.rewrite_expr(&mut binary.stx.left);
        self.rewrite_expr(&mut binary.stx.right);
      }
      Expr::Call(call) => {
        self.rewrite_expr(&mut call.stx.callee);
        for arg in &mut call.stx.arguments {
          self.rewrite_expr(&mut arg.stx.value);
        }
      }
      Expr::Class(class) => {
        if let Some(extends) = &mut class.stx.extends {
          self.rewrite_expr(extends);
        }
        for member in &mut class.stx.members {
          self.rewrite_class_member(member);
        }
      }
      Expr::ComputedMember(computed) => {
        self.rewrite_expr(&mut computed.stx.object);
        self.rewrite_expr(&mut computed.stx.member);
      }
      Expr::Cond(cond) => {
        self.rewrite_expr(&mut cond.stx.test);
        self.rewrite_expr(&mut cond.stx.consequent);
        self.rewrite_expr(&mut cond.stx.alternate);
      }
      Expr::Func(func_expr) => {
        // A named function expression binds its own name inside itself.
        let mut scope = HashSet::default();
        if let Some(name) = &func_expr.stx.name {
          scope.insert(name.stx.name.clone());
        }
        self.scopes.push(scope);
        self.rewrite_func(&mut func_expr.stx.func);
        self.scopes.pop();
      }
      Expr::Member(member) => self.rewrite_expr(&mut member.stx.left),
      Expr::This(_) => {}
      Expr::Unary(unary) => self.rewrite_expr(&mut unary.stx.argument),
      Expr::LitArr(arr) => {
        for elem in &mut arr.stx.elements {
          match elem {
            LitArrElem::Single(value) | LitArrElem::Rest(value) => self.rewrite_expr(value),
            LitArrElem::Empty => {}
          }
        }
      }
      Expr::LitBool(_) | Expr::LitNull(_) | Expr::LitNum(_) | Expr::LitStr(_) => {}
      Expr::LitObj(obj) => {
        for member in &mut obj.stx.members {
          self.rewrite_obj_member(member);
        }
      }
      // Patterns in expression position are assignment targets; only their
      // defaults and computed keys are reads.
      Expr::ArrPat(_) | Expr::IdPat(_) | Expr::ObjPat(_) => {
        self.rewrite_pat_in_expr(node);
      }
    }
  }

  fn rewrite_obj_member(&mut self, member: &mut Node<syntax_js::ast::class_or_object::ObjMember>) {
    let loc = member.loc;
    // A shorthand property is a read of the identifier; substituting it
    // requires expanding to `key: value` form.
    let replacement = match &member.stx.typ {
      ObjMemberType::Shorthand { id } => {
        let name = id.stx.name.clone();
        self.resolve_read(&name, loc).map(|value| (name, value))
      }
      _ => None,
    };
    if let Some((name, value)) = replacement {
      member.stx.typ = ObjMemberType::Valued {
        key: ClassOrObjKey::Direct(Node::new(loc, ClassOrObjMemberDirectKey { key: name })),
        val: ClassOrObjVal::Prop(Some(value)),
      };
      return;
    }
    match &mut member.stx.typ {
      ObjMemberType::Valued { key, val } => {
        if let ClassOrObjKey::Computed(key) = key {
          self.rewrite_expr(key);
        }
        match val {
          ClassOrObjVal::Getter(getter) => self.rewrite_func(&mut getter.stx.func),
          ClassOrObjVal::Setter(setter) => self.rewrite_func(&mut setter.stx.func),
          ClassOrObjVal::Method(method) => self.rewrite_func(&mut method.stx.func),
          ClassOrObjVal::Prop(Some(value)) => self.rewrite_expr(value),
          ClassOrObjVal::Prop(None) => {}
        }
      }
      ObjMemberType::Shorthand { .. } => {}
      ObjMemberType::Rest { val } => self.rewrite_expr(val),
    }
  }

  fn rewrite_pat_in_expr(&mut self, node: &mut Node<Expr>) {
    match node.stx.as_mut() {
      Expr::IdPat(_) => {}
      Expr::ArrPat(arr) => {
        for elem in arr.stx.elements.iter_mut().flatten() {
          self.rewrite_pat_defaults(&mut elem.target);
          if let Some(default) = &mut elem.default_value {
            self.rewrite_expr(default);
          }
        }
        if let Some(rest) = &mut arr.stx.rest {
          self.rewrite_pat_defaults(rest);
        }
      }
      Expr::ObjPat(obj) => {
        for prop in &mut obj.stx.properties {
          if let ClassOrObjKey::Computed(key) = &mut prop.stx.key {
            self.rewrite_expr(key);
          }
          self.rewrite_pat_defaults(&mut prop.stx.target);
          if let Some(default) = &mut prop.stx.default_value {
            self.rewrite_expr(default);
          }
        }
      }
      _ => {}
    }
  }
}

/// Names declared directly in a statement list (shadowing for a block scope).
fn block_decls(stmts: &[Node<Stmt>]) -> HashSet<String> {
  let mut names = HashSet::default();
  for stmt in stmts {
    match stmt.stx.as_ref() {
      Stmt::FunctionDecl(func) => {
        if let Some(name) = &func.stx.name {
          names.insert(name.stx.name.clone());
        }
      }
      Stmt::ClassDecl(class) => {
        if let Some(name) = &class.stx.name {
          names.insert(name.stx.name.clone());
        }
      }
      Stmt::VarDecl(decl) => collect_var_decl_names(&decl.stx, &mut names),
      _ => {}
    }
  }
  names
}

/// Block-level declarations plus `var`s hoisted from nested blocks, for
/// function body scopes.
fn hoisted_decls(stmts: &[Node<Stmt>]) -> HashSet<String> {
  let mut names = block_decls(stmts);
  for (name, _) in crate::scan::collect_module_bindings(stmts) {
    names.insert(name);
  }
  names
}

fn collect_var_decl_names(decl: &VarDecl, names: &mut HashSet<String>) {
  for declarator in &decl.declarators {
    collect_pat_decl_names(&declarator.pattern.stx.pat, names);
  }
}

fn collect_pat_decl_names(pat: &Node<Pat>, names: &mut HashSet<String>) {
  match pat.stx.as_ref() {
    Pat::Id(id) => {
      names.insert(id.stx.name.clone());
    }
    Pat::Arr(arr) => {
      for elem in arr.stx.elements.iter().flatten() {
        collect_pat_decl_names(&elem.target, names);
      }
      if let Some(rest) = &arr.stx.rest {
        collect_pat_decl_names(rest, names);
      }
    }
    Pat::Obj(obj) => {
      for prop in &obj.stx.properties {
        collect_pat_decl_names(&prop.stx.target, names);
      }
      if let Some(rest) = &obj.stx.rest {
        names.insert(rest.stx.name.clone());
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::records::ImportBinding;

  fn binding(local: &str, specifier: &str, kind: SlotKind, member: Option<&str>) -> ImportBinding {
    ImportBinding {
      local: local.into(),
      specifier: specifier.into(),
      kind,
      member: member.map(String::from),
      loc: Loc(0, 0),
    }
  }

  #[test]
  fn same_specifier_and_kind_share_one_slot() {
    let mut records = ModuleRecords::default();
    records
      .imports
      .push(binding("a", "m", SlotKind::DefaultUnwrapped, Some("default")));
    records
      .imports
      .push(binding("b", "m", SlotKind::DefaultUnwrapped, Some("default")));
    let mut fresh = FreshNames::new(Default::default());
    let resolution = resolve_bindings(&mut fresh, Strategy::LiveBinding, &records);
    assert_eq!(resolution.slots.slots().len(), 1);
  }

  #[test]
  fn static_strategy_keeps_narrow_named_imports_local() {
    let mut records = ModuleRecords::default();
    records.imports.push(binding("a", "m", SlotKind::Raw, Some("a")));
    records.imports.push(binding("b", "m", SlotKind::Raw, Some("b")));
    let mut fresh = FreshNames::new(Default::default());
    let resolution = resolve_bindings(&mut fresh, Strategy::Static, &records);
    assert!(resolution.slots.slots().is_empty());
    assert!(matches!(
      resolution.refs.get("a"),
      Some(RefTarget::KeepLocal(0))
    ));
  }

  #[test]
  fn three_named_imports_coalesce_into_shared_slot() {
    let mut records = ModuleRecords::default();
    for name in ["a", "b", "c"] {
      records
        .imports
        .push(binding(name, "m", SlotKind::Raw, Some(name)));
    }
    let mut fresh = FreshNames::new(Default::default());
    let resolution = resolve_bindings(&mut fresh, Strategy::Static, &records);
    assert_eq!(resolution.slots.slots().len(), 1);
  }

  #[test]
  fn live_strategy_never_narrows() {
    let mut records = ModuleRecords::default();
    records.imports.push(binding("a", "m", SlotKind::Raw, Some("a")));
    let mut fresh = FreshNames::new(Default::default());
    let resolution = resolve_bindings(&mut fresh, Strategy::LiveBinding, &records);
    assert_eq!(resolution.slots.slots().len(), 1);
  }
}
