//! A small tree-walking evaluator covering exactly the JavaScript subset the
//! transform emits (plus the simple statements test fixtures use): closures,
//! accessor properties, and the handful of intrinsics the emitted programs
//! call (`Object.keys`, `Object.defineProperty`,
//! `Object.prototype.hasOwnProperty.call`, `Array#forEach`). Anything else
//! is a hard error, which keeps silent divergence from real engines out of
//! the test suite.

use ahash::HashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use syntax_js::ast::class_or_object::{ClassOrObjKey, ClassOrObjVal, ObjMemberType};
use syntax_js::ast::expr::lit::LitArrElem;
use syntax_js::ast::expr::pat::Pat;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::func::{Func, FuncBody};
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::decl::VarDeclMode;
use syntax_js::ast::stmt::Stmt;
use syntax_js::operator::OperatorName;

use crate::registry::Runtime;

#[derive(Clone, PartialEq, Eq)]
pub struct EvalError {
  pub message: String,
}

impl EvalError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}

impl fmt::Debug for EvalError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "EvalError: {}", self.message)
  }
}

impl fmt::Display for EvalError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.message)
  }
}

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Clone)]
pub enum Value<'a> {
  Undefined,
  Null,
  Bool(bool),
  Num(f64),
  Str(String),
  Obj(ObjRef<'a>),
  Arr(ArrRef<'a>),
  Func(FuncRef<'a>),
  Native(NativeFunc<'a>),
}

pub type ObjRef<'a> = Rc<RefCell<ObjData<'a>>>;
pub type ArrRef<'a> = Rc<RefCell<Vec<Value<'a>>>>;
pub type FuncRef<'a> = Rc<FuncData<'a>>;

impl<'a> Value<'a> {
  pub fn as_num(&self) -> Option<f64> {
    match self {
      Value::Num(n) => Some(*n),
      _ => None,
    }
  }

  pub fn as_bool(&self) -> Option<bool> {
    match self {
      Value::Bool(b) => Some(*b),
      _ => None,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::Str(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_obj(&self) -> Option<&ObjRef<'a>> {
    match self {
      Value::Obj(obj) => Some(obj),
      _ => None,
    }
  }

  pub fn is_undefined(&self) -> bool {
    matches!(self, Value::Undefined)
  }
}

pub struct FuncData<'a> {
  pub func: &'a Node<Func>,
  pub env: Env<'a>,
}

#[derive(Clone)]
pub struct NativeFunc<'a> {
  pub kind: NativeKind,
  /// Bound receiver, for `fn.call(...)` and array methods.
  pub this: Option<Box<Value<'a>>>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NativeKind {
  Require,
  RequireResolve,
  ObjectKeys,
  ObjectDefineProperty,
  HasOwnProperty,
  ArrayForEach,
  FunctionCall,
}

#[derive(Clone)]
pub enum Prop<'a> {
  Value { value: Value<'a>, enumerable: bool },
  Getter { get: Value<'a>, enumerable: bool },
}

impl Prop<'_> {
  pub fn enumerable(&self) -> bool {
    match self {
      Prop::Value { enumerable, .. } | Prop::Getter { enumerable, .. } => *enumerable,
    }
  }
}

/// Insertion-ordered string-keyed properties, matching the enumeration order
/// the emitted loops rely on.
#[derive(Default)]
pub struct ObjData<'a> {
  props: Vec<(String, Prop<'a>)>,
}

impl<'a> ObjData<'a> {
  pub fn new() -> ObjRef<'a> {
    Rc::new(RefCell::new(ObjData::default()))
  }

  pub fn lookup(&self, key: &str) -> Option<&Prop<'a>> {
    self
      .props
      .iter()
      .find(|(name, _)| name == key)
      .map(|(_, prop)| prop)
  }

  pub fn define(&mut self, key: &str, prop: Prop<'a>) {
    if let Some(slot) = self.props.iter_mut().find(|(name, _)| name == key) {
      slot.1 = prop;
    } else {
      self.props.push((key.to_string(), prop));
    }
  }

  pub fn set_value(&mut self, key: &str, value: Value<'a>) {
    match self.props.iter_mut().find(|(name, _)| name == key) {
      // Assigning through a getter-only property silently does nothing, as
      // in sloppy-mode JavaScript.
      Some((_, Prop::Getter { .. })) => {}
      Some((_, prop @ Prop::Value { .. })) => {
        let enumerable = prop.enumerable();
        *prop = Prop::Value { value, enumerable };
      }
      None => self.props.push((key.to_string(), Prop::Value {
        value,
        enumerable: true,
      })),
    }
  }

  pub fn has(&self, key: &str) -> bool {
    self.props.iter().any(|(name, _)| name == key)
  }

  pub fn enumerable_keys(&self) -> Vec<String> {
    self
      .props
      .iter()
      .filter(|(_, prop)| prop.enumerable())
      .map(|(name, _)| name.clone())
      .collect()
  }
}

#[derive(Clone)]
pub struct Env<'a>(Rc<RefCell<EnvData<'a>>>);

struct EnvData<'a> {
  vars: HashMap<String, Value<'a>>,
  parent: Option<Env<'a>>,
}

impl<'a> Env<'a> {
  pub fn root() -> Self {
    Env(Rc::new(RefCell::new(EnvData {
      vars: HashMap::default(),
      parent: None,
    })))
  }

  pub fn child(&self) -> Self {
    Env(Rc::new(RefCell::new(EnvData {
      vars: HashMap::default(),
      parent: Some(self.clone()),
    })))
  }

  pub fn declare(&self, name: &str, value: Value<'a>) {
    self.0.borrow_mut().vars.insert(name.to_string(), value);
  }

  pub fn get(&self, name: &str) -> Option<Value<'a>> {
    let data = self.0.borrow();
    if let Some(value) = data.vars.get(name) {
      return Some(value.clone());
    }
    data.parent.as_ref().and_then(|parent| parent.get(name))
  }

  pub fn assign(&self, name: &str, value: Value<'a>) -> bool {
    let mut data = self.0.borrow_mut();
    if let Some(slot) = data.vars.get_mut(name) {
      *slot = value;
      return true;
    }
    match &data.parent {
      Some(parent) => parent.assign(name, value),
      None => false,
    }
  }
}

pub enum Completion<'a> {
  Normal,
  Return(Value<'a>),
}

pub fn truthy(value: &Value) -> bool {
  match value {
    Value::Undefined | Value::Null => false,
    Value::Bool(b) => *b,
    Value::Num(n) => *n != 0.0 && !n.is_nan(),
    Value::Str(s) => !s.is_empty(),
    Value::Obj(_) | Value::Arr(_) | Value::Func(_) | Value::Native(_) => true,
  }
}

pub fn strict_eq<'a>(a: &Value<'a>, b: &Value<'a>) -> bool {
  match (a, b) {
    (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
    (Value::Bool(a), Value::Bool(b)) => a == b,
    (Value::Num(a), Value::Num(b)) => a == b,
    (Value::Str(a), Value::Str(b)) => a == b,
    (Value::Obj(a), Value::Obj(b)) => Rc::ptr_eq(a, b),
    (Value::Arr(a), Value::Arr(b)) => Rc::ptr_eq(a, b),
    (Value::Func(a), Value::Func(b)) => Rc::ptr_eq(a, b),
    _ => false,
  }
}

fn loose_eq<'a>(a: &Value<'a>, b: &Value<'a>) -> bool {
  match (a, b) {
    (Value::Undefined | Value::Null, Value::Undefined | Value::Null) => true,
    _ => strict_eq(a, b),
  }
}

pub struct Interp<'i, 'a> {
  pub runtime: &'i Runtime<'a>,
}

impl<'i, 'a> Interp<'i, 'a> {
  pub fn new(runtime: &'i Runtime<'a>) -> Self {
    Self { runtime }
  }

  /// Run a statement list as a program body: hoist `var` and function
  /// declarations, then execute in order.
  pub fn eval_program(&self, body: &'a [Node<Stmt>], env: &Env<'a>) -> EvalResult<()> {
    self.hoist(body, env);
    for stmt in body {
      if let Completion::Return(_) = self.exec_stmt(stmt, env)? {
        break;
      }
    }
    Ok(())
  }

  fn hoist(&self, body: &'a [Node<Stmt>], env: &Env<'a>) {
    for stmt in body {
      match stmt.stx.as_ref() {
        Stmt::FunctionDecl(func) => {
          if let Some(name) = &func.stx.name {
            let closure = Value::Func(Rc::new(FuncData {
              func: &func.stx.function,
              env: env.clone(),
            }));
            env.declare(&name.stx.name, closure);
          }
        }
        Stmt::VarDecl(decl) if decl.stx.mode == VarDeclMode::Var => {
          for declarator in &decl.stx.declarators {
            if let Pat::Id(id) = declarator.pattern.stx.pat.stx.as_ref() {
              if env.get(&id.stx.name).is_none() {
                env.declare(&id.stx.name, Value::Undefined);
              }
            }
          }
        }
        Stmt::Block(block) => self.hoist(&block.stx.body, env),
        Stmt::If(if_stmt) => {
          self.hoist(std::slice::from_ref(&if_stmt.stx.consequent), env);
          if let Some(alternate) = &if_stmt.stx.alternate {
            self.hoist(std::slice::from_ref(alternate), env);
          }
        }
        _ => {}
      }
    }
  }

  fn exec_stmt(&self, stmt: &'a Node<Stmt>, env: &Env<'a>) -> EvalResult<Completion<'a>> {
    match stmt.stx.as_ref() {
      Stmt::Block(block) => {
        let scope = env.child();
        self.hoist(&block.stx.body, &scope);
        for stmt in &block.stx.body {
          if let Completion::Return(value) = self.exec_stmt(stmt, &scope)? {
            return Ok(Completion::Return(value));
          }
        }
        Ok(Completion::Normal)
      }
      Stmt::Empty(_) => Ok(Completion::Normal),
      Stmt::Expr(expr_stmt) => {
        self.eval_expr(&expr_stmt.stx.expr, env)?;
        Ok(Completion::Normal)
      }
      Stmt::FunctionDecl(func) => {
        // Already bound during hoisting; rebind to keep textual order valid
        // when a declaration shadows an earlier hoisted binding.
        if let Some(name) = &func.stx.name {
          let closure = Value::Func(Rc::new(FuncData {
            func: &func.stx.function,
            env: env.clone(),
          }));
          env.declare(&name.stx.name, closure);
        }
        Ok(Completion::Normal)
      }
      Stmt::If(if_stmt) => {
        let test = self.eval_expr(&if_stmt.stx.test, env)?;
        if truthy(&test) {
          self.exec_stmt(&if_stmt.stx.consequent, env)
        } else if let Some(alternate) = &if_stmt.stx.alternate {
          self.exec_stmt(alternate, env)
        } else {
          Ok(Completion::Normal)
        }
      }
      Stmt::Return(ret) => {
        let value = match &ret.stx.value {
          Some(value) => self.eval_expr(value, env)?,
          None => Value::Undefined,
        };
        Ok(Completion::Return(value))
      }
      Stmt::Throw(throw) => {
        let value = self.eval_expr(&throw.stx.value, env)?;
        Err(EvalError::new(format!("thrown: {}", describe(&value))))
      }
      Stmt::VarDecl(decl) => {
        for declarator in &decl.stx.declarators {
          let Pat::Id(id) = declarator.pattern.stx.pat.stx.as_ref() else {
            return Err(EvalError::new(
              "harness evaluator only supports identifier declarations",
            ));
          };
          let value = match &declarator.initializer {
            Some(init) => self.eval_expr(init, env)?,
            None => Value::Undefined,
          };
          env.declare(&id.stx.name, value);
        }
        Ok(Completion::Normal)
      }
      other => Err(EvalError::new(format!(
        "unsupported statement in harness evaluator: {other:?}"
      ))),
    }
  }

  pub fn eval_expr(&self, expr: &'a Node<Expr>, env: &Env<'a>) -> EvalResult<Value<'a>> {
    match expr.stx.as_ref() {
      Expr::Id(id) => env
        .get(&id.stx.name)
        .ok_or_else(|| EvalError::new(format!("undefined identifier `{}`", id.stx.name))),
      Expr::LitBool(lit) => Ok(Value::Bool(lit.stx.value)),
      Expr::LitNull(_) => Ok(Value::Null),
      Expr::LitNum(lit) => Ok(Value::Num(lit.stx.value)),
      Expr::LitStr(lit) => Ok(Value::Str(lit.stx.value.clone())),
      Expr::LitArr(arr) => {
        let mut values = Vec::new();
        for elem in &arr.stx.elements {
          match elem {
            LitArrElem::Single(value) => values.push(self.eval_expr(value, env)?),
            LitArrElem::Empty => values.push(Value::Undefined),
            LitArrElem::Rest(_) => {
              return Err(EvalError::new("array spread unsupported in harness"));
            }
          }
        }
        Ok(Value::Arr(Rc::new(RefCell::new(values))))
      }
      Expr::LitObj(obj) => {
        let result = ObjData::new();
        for member in &obj.stx.members {
          match &member.stx.typ {
            ObjMemberType::Valued { key, val } => {
              let key = match key {
                ClassOrObjKey::Direct(direct) => direct.stx.key.clone(),
                ClassOrObjKey::Computed(expr) => match self.eval_expr(expr, env)? {
                  Value::Str(s) => s,
                  other => describe(&other),
                },
              };
              match val {
                ClassOrObjVal::Prop(Some(value)) => {
                  let value = self.eval_expr(value, env)?;
                  result.borrow_mut().define(&key, Prop::Value {
                    value,
                    enumerable: true,
                  });
                }
                ClassOrObjVal::Prop(None) => {
                  result.borrow_mut().define(&key, Prop::Value {
                    value: Value::Undefined,
                    enumerable: true,
                  });
                }
                ClassOrObjVal::Getter(getter) => {
                  let get = Value::Func(Rc::new(FuncData {
                    func: &getter.stx.func,
                    env: env.clone(),
                  }));
                  result.borrow_mut().define(&key, Prop::Getter {
                    get,
                    enumerable: true,
                  });
                }
                ClassOrObjVal::Method(method) => {
                  let value = Value::Func(Rc::new(FuncData {
                    func: &method.stx.func,
                    env: env.clone(),
                  }));
                  result.borrow_mut().define(&key, Prop::Value {
                    value,
                    enumerable: true,
                  });
                }
                ClassOrObjVal::Setter(_) => {
                  return Err(EvalError::new("setters unsupported in harness"));
                }
              }
            }
            ObjMemberType::Shorthand { id } => {
              let value = env.get(&id.stx.name).ok_or_else(|| {
                EvalError::new(format!("undefined identifier `{}`", id.stx.name))
              })?;
              result.borrow_mut().define(&id.stx.name, Prop::Value {
                value,
                enumerable: true,
              });
            }
            ObjMemberType::Rest { .. } => {
              return Err(EvalError::new("object spread unsupported in harness"));
            }
          }
        }
        Ok(Value::Obj(result))
      }
      Expr::Func(func_expr) => Ok(Value::Func(Rc::new(FuncData {
        func: &func_expr.stx.func,
        env: env.clone(),
      }))),
      Expr::ArrowFunc(arrow) => Ok(Value::Func(Rc::new(FuncData {
        func: &arrow.stx.func,
        env: env.clone(),
      }))),
      Expr::Member(member) => {
        let object = self.eval_expr(&member.stx.left, env)?;
        self.get_prop(&object, &member.stx.right)
      }
      Expr::ComputedMember(computed) => {
        let object = self.eval_expr(&computed.stx.object, env)?;
        let key = self.eval_expr(&computed.stx.member, env)?;
        match key {
          Value::Str(key) => self.get_prop(&object, &key),
          Value::Num(index) => match &object {
            Value::Arr(arr) => Ok(
              arr
                .borrow()
                .get(index as usize)
                .cloned()
                .unwrap_or(Value::Undefined),
            ),
            _ => self.get_prop(&object, &format!("{}", index)),
          },
          other => Err(EvalError::new(format!(
            "unsupported property key: {}",
            describe(&other)
          ))),
        }
      }
      Expr::Call(call) => {
        let (callee, this) = match call.stx.callee.stx.as_ref() {
          Expr::Member(member) => {
            let object = self.eval_expr(&member.stx.left, env)?;
            let callee = self.get_prop(&object, &member.stx.right)?;
            (callee, Some(object))
          }
          Expr::ComputedMember(computed) => {
            let object = self.eval_expr(&computed.stx.object, env)?;
            let key = self.eval_expr(&computed.stx.member, env)?;
            let Value::Str(key) = key else {
              return Err(EvalError::new("unsupported callee key"));
            };
            let callee = self.get_prop(&object, &key)?;
            (callee, Some(object))
          }
          _ => (self.eval_expr(&call.stx.callee, env)?, None),
        };
        let mut args = Vec::with_capacity(call.stx.arguments.len());
        for arg in &call.stx.arguments {
          if arg.stx.spread {
            return Err(EvalError::new("spread arguments unsupported in harness"));
          }
          args.push(self.eval_expr(&arg.stx.value, env)?);
        }
        self.call_value(callee, this, args)
      }
      Expr::Binary(binary) => self.eval_binary(binary, env),
      Expr::Unary(unary) => {
        let operand = || self.eval_expr(&unary.stx.argument, env);
        match unary.stx.operator {
          OperatorName::LogicalNot => Ok(Value::Bool(!truthy(&operand()?))),
          OperatorName::Void => {
            operand()?;
            Ok(Value::Undefined)
          }
          OperatorName::Typeof => Ok(Value::Str(
            match operand()? {
              Value::Undefined => "undefined",
              Value::Null | Value::Obj(_) | Value::Arr(_) => "object",
              Value::Bool(_) => "boolean",
              Value::Num(_) => "number",
              Value::Str(_) => "string",
              Value::Func(_) | Value::Native(_) => "function",
            }
            .to_string(),
          )),
          op => Err(EvalError::new(format!("unsupported unary operator {op:?}"))),
        }
      }
      Expr::Cond(cond) => {
        let test = self.eval_expr(&cond.stx.test, env)?;
        if truthy(&test) {
          self.eval_expr(&cond.stx.consequent, env)
        } else {
          self.eval_expr(&cond.stx.alternate, env)
        }
      }
      Expr::This(_) => Ok(Value::Undefined),
      other => Err(EvalError::new(format!(
        "unsupported expression in harness evaluator: {other:?}"
      ))),
    }
  }

  fn eval_binary(
    &self,
    binary: &'a Node<syntax_js::ast::expr::BinaryExpr>,
    env: &Env<'a>,
  ) -> EvalResult<Value<'a>> {
    let op = binary.stx.operator;
    match op {
      OperatorName::Assignment => {
        let value = self.eval_expr(&binary.stx.right, env)?;
        self.assign_target(&binary.stx.left, value.clone(), env)?;
        Ok(value)
      }
      OperatorName::LogicalAnd => {
        let left = self.eval_expr(&binary.stx.left, env)?;
        if truthy(&left) {
          self.eval_expr(&binary.stx.right, env)
        } else {
          Ok(left)
        }
      }
      OperatorName::LogicalOr => {
        let left = self.eval_expr(&binary.stx.left, env)?;
        if truthy(&left) {
          Ok(left)
        } else {
          self.eval_expr(&binary.stx.right, env)
        }
      }
      OperatorName::Comma => {
        self.eval_expr(&binary.stx.left, env)?;
        self.eval_expr(&binary.stx.right, env)
      }
      _ => {
        let left = self.eval_expr(&binary.stx.left, env)?;
        let right = self.eval_expr(&binary.stx.right, env)?;
        match op {
          OperatorName::StrictEquality => Ok(Value::Bool(strict_eq(&left, &right))),
          OperatorName::StrictInequality => Ok(Value::Bool(!strict_eq(&left, &right))),
          OperatorName::Equality => Ok(Value::Bool(loose_eq(&left, &right))),
          OperatorName::Inequality => Ok(Value::Bool(!loose_eq(&left, &right))),
          OperatorName::In => match (&left, &right) {
            (Value::Str(key), Value::Obj(obj)) => Ok(Value::Bool(obj.borrow().has(key))),
            _ => Err(EvalError::new("`in` requires a string key and an object")),
          },
          OperatorName::Addition => match (&left, &right) {
            (Value::Num(a), Value::Num(b)) => Ok(Value::Num(a + b)),
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
            _ => Err(EvalError::new("unsupported addition operands")),
          },
          op => Err(EvalError::new(format!(
            "unsupported binary operator {op:?}"
          ))),
        }
      }
    }
  }

  fn assign_target(
    &self,
    target: &'a Node<Expr>,
    value: Value<'a>,
    env: &Env<'a>,
  ) -> EvalResult<()> {
    match target.stx.as_ref() {
      Expr::Id(id) => {
        if env.assign(&id.stx.name, value) {
          Ok(())
        } else {
          Err(EvalError::new(format!(
            "assignment to undeclared `{}`",
            id.stx.name
          )))
        }
      }
      Expr::Member(member) => {
        let object = self.eval_expr(&member.stx.left, env)?;
        self.set_prop(&object, &member.stx.right, value)
      }
      Expr::ComputedMember(computed) => {
        let object = self.eval_expr(&computed.stx.object, env)?;
        let key = self.eval_expr(&computed.stx.member, env)?;
        let Value::Str(key) = key else {
          return Err(EvalError::new("unsupported assignment key"));
        };
        self.set_prop(&object, &key, value)
      }
      _ => Err(EvalError::new("unsupported assignment target")),
    }
  }

  pub fn get_prop(&self, target: &Value<'a>, key: &str) -> EvalResult<Value<'a>> {
    match target {
      Value::Obj(obj) => {
        let prop = obj.borrow().lookup(key).cloned();
        match prop {
          Some(Prop::Value { value, .. }) => Ok(value),
          Some(Prop::Getter { get, .. }) => {
            self.call_value(get, Some(Value::Obj(obj.clone())), Vec::new())
          }
          None => Ok(Value::Undefined),
        }
      }
      Value::Arr(arr) => match key {
        "length" => Ok(Value::Num(arr.borrow().len() as f64)),
        "forEach" => Ok(Value::Native(NativeFunc {
          kind: NativeKind::ArrayForEach,
          this: Some(Box::new(target.clone())),
        })),
        _ => Ok(Value::Undefined),
      },
      Value::Native(native) => match (native.kind, key) {
        (NativeKind::Require, "resolve") => Ok(Value::Native(NativeFunc {
          kind: NativeKind::RequireResolve,
          this: None,
        })),
        (_, "call") => Ok(Value::Native(NativeFunc {
          kind: NativeKind::FunctionCall,
          this: Some(Box::new(target.clone())),
        })),
        _ => Ok(Value::Undefined),
      },
      Value::Func(_) => match key {
        "call" => Ok(Value::Native(NativeFunc {
          kind: NativeKind::FunctionCall,
          this: Some(Box::new(target.clone())),
        })),
        _ => Ok(Value::Undefined),
      },
      other => Err(EvalError::new(format!(
        "cannot read `{key}` of {}",
        describe(other)
      ))),
    }
  }

  fn set_prop(&self, target: &Value<'a>, key: &str, value: Value<'a>) -> EvalResult<()> {
    match target {
      Value::Obj(obj) => {
        obj.borrow_mut().set_value(key, value);
        Ok(())
      }
      other => Err(EvalError::new(format!(
        "cannot set `{key}` on {}",
        describe(other)
      ))),
    }
  }

  pub fn call_value(
    &self,
    callee: Value<'a>,
    this: Option<Value<'a>>,
    args: Vec<Value<'a>>,
  ) -> EvalResult<Value<'a>> {
    match callee {
      Value::Func(func) => self.call_closure(&func, args),
      Value::Native(native) => self.call_native(&native, this, args),
      other => Err(EvalError::new(format!("{} is not callable", describe(&other)))),
    }
  }

  fn call_closure(&self, func: &FuncRef<'a>, args: Vec<Value<'a>>) -> EvalResult<Value<'a>> {
    let scope = func.env.child();
    let stx = &func.func.stx;
    for (i, parameter) in stx.parameters.iter().enumerate() {
      let Pat::Id(id) = parameter.stx.pattern.stx.pat.stx.as_ref() else {
        return Err(EvalError::new("harness functions take identifier params"));
      };
      let value = args.get(i).cloned().unwrap_or(Value::Undefined);
      scope.declare(&id.stx.name, value);
    }
    match &stx.body {
      FuncBody::Expression(expr) => self.eval_expr(expr, &scope),
      FuncBody::Block(body) => {
        self.hoist(body, &scope);
        for stmt in body {
          if let Completion::Return(value) = self.exec_stmt(stmt, &scope)? {
            return Ok(value);
          }
        }
        Ok(Value::Undefined)
      }
    }
  }

  fn call_native(
    &self,
    native: &NativeFunc<'a>,
    this: Option<Value<'a>>,
    args: Vec<Value<'a>>,
  ) -> EvalResult<Value<'a>> {
    match native.kind {
      NativeKind::Require => {
        let Some(Value::Str(specifier)) = args.first() else {
          return Err(EvalError::new("require expects a specifier string"));
        };
        self.runtime.require_with(self, specifier)
      }
      NativeKind::RequireResolve => args
        .into_iter()
        .next()
        .ok_or_else(|| EvalError::new("require.resolve expects a specifier")),
      NativeKind::ObjectKeys => match args.first() {
        Some(Value::Obj(obj)) => Ok(Value::Arr(Rc::new(RefCell::new(
          obj
            .borrow()
            .enumerable_keys()
            .into_iter()
            .map(Value::Str)
            .collect(),
        )))),
        _ => Err(EvalError::new("Object.keys expects an object")),
      },
      NativeKind::ObjectDefineProperty => {
        let mut args = args.into_iter();
        let (Some(target), Some(key), Some(descriptor)) =
          (args.next(), args.next(), args.next())
        else {
          return Err(EvalError::new("Object.defineProperty expects three args"));
        };
        let Value::Obj(target) = target else {
          return Err(EvalError::new("Object.defineProperty target must be an object"));
        };
        let Value::Str(key) = key else {
          return Err(EvalError::new("Object.defineProperty key must be a string"));
        };
        let Value::Obj(descriptor) = descriptor else {
          return Err(EvalError::new("property descriptor must be an object"));
        };
        let descriptor = descriptor.borrow();
        let enumerable = descriptor
          .lookup("enumerable")
          .map(|prop| match prop {
            Prop::Value { value, .. } => truthy(value),
            Prop::Getter { .. } => false,
          })
          .unwrap_or(false);
        let prop = if let Some(Prop::Value { value: get, .. }) = descriptor.lookup("get") {
          Prop::Getter {
            get: get.clone(),
            enumerable,
          }
        } else if let Some(Prop::Value { value, .. }) = descriptor.lookup("value") {
          Prop::Value {
            value: value.clone(),
            enumerable,
          }
        } else {
          return Err(EvalError::new("descriptor needs `get` or `value`"));
        };
        target.borrow_mut().define(&key, prop);
        Ok(Value::Obj(target.clone()))
      }
      NativeKind::HasOwnProperty => {
        let subject = this.ok_or_else(|| EvalError::new("hasOwnProperty needs a receiver"))?;
        let Some(Value::Str(key)) = args.first() else {
          return Err(EvalError::new("hasOwnProperty expects a string key"));
        };
        match subject {
          Value::Obj(obj) => Ok(Value::Bool(obj.borrow().has(key))),
          _ => Ok(Value::Bool(false)),
        }
      }
      NativeKind::ArrayForEach => {
        let Some(Value::Arr(arr)) = native.this.as_deref().cloned() else {
          return Err(EvalError::new("forEach needs an array receiver"));
        };
        let callback = args
          .into_iter()
          .next()
          .ok_or_else(|| EvalError::new("forEach expects a callback"))?;
        let snapshot: Vec<Value<'a>> = arr.borrow().clone();
        for (index, element) in snapshot.into_iter().enumerate() {
          self.call_value(callback.clone(), None, vec![
            element,
            Value::Num(index as f64),
          ])?;
        }
        Ok(Value::Undefined)
      }
      NativeKind::FunctionCall => {
        let callee = native
          .this
          .as_deref()
          .cloned()
          .ok_or_else(|| EvalError::new("call needs a function receiver"))?;
        let mut args = args.into_iter();
        let this = args.next();
        self.call_value(callee, this, args.collect())
      }
    }
  }
}

pub fn describe(value: &Value) -> String {
  match value {
    Value::Undefined => "undefined".to_string(),
    Value::Null => "null".to_string(),
    Value::Bool(b) => format!("{b}"),
    Value::Num(n) => format!("{n}"),
    Value::Str(s) => format!("{s:?}"),
    Value::Obj(_) => "[object]".to_string(),
    Value::Arr(_) => "[array]".to_string(),
    Value::Func(_) | Value::Native(_) => "[function]".to_string(),
  }
}
