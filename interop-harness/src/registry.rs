//! A lazy synchronous module registry: `require(specifier)` evaluates the
//! registered program on first load and caches its exports object, with the
//! cache entry published *before* evaluation so circular imports observe the
//! partially initialized surface, the way a synchronous CJS loader behaves.

use ahash::HashMap;
use std::cell::RefCell;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::Stmt;

use crate::eval::{
  EvalError, EvalResult, Env, Interp, NativeFunc, NativeKind, ObjData, Prop, Value,
};

/// A value a host (non-transformed) module can export.
#[derive(Clone, Debug)]
pub enum HostValue {
  Bool(bool),
  Num(f64),
  Str(String),
}

enum ModuleDef {
  /// A transformed program, evaluated with `require`/`exports` in scope.
  Program(Vec<Node<Stmt>>),
  /// A plain exports object with no module marker, standing in for a
  /// never-transformed dependency.
  Host(Vec<(String, HostValue)>),
}

#[derive(Default)]
pub struct Registry {
  modules: HashMap<String, ModuleDef>,
}

impl Registry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add_program(&mut self, specifier: impl Into<String>, body: Vec<Node<Stmt>>) {
    self
      .modules
      .insert(specifier.into(), ModuleDef::Program(body));
  }

  pub fn add_host_object(
    &mut self,
    specifier: impl Into<String>,
    props: Vec<(String, HostValue)>,
  ) {
    self.modules.insert(specifier.into(), ModuleDef::Host(props));
  }
}

pub struct Runtime<'a> {
  registry: &'a Registry,
  cache: RefCell<HashMap<String, Value<'a>>>,
  object_global: Value<'a>,
}

impl<'a> Runtime<'a> {
  pub fn new(registry: &'a Registry) -> Self {
    let object_global = ObjData::new();
    {
      let mut object = object_global.borrow_mut();
      object.define("keys", Prop::Value {
        value: Value::Native(NativeFunc {
          kind: NativeKind::ObjectKeys,
          this: None,
        }),
        enumerable: false,
      });
      object.define("defineProperty", Prop::Value {
        value: Value::Native(NativeFunc {
          kind: NativeKind::ObjectDefineProperty,
          this: None,
        }),
        enumerable: false,
      });
      let prototype = ObjData::new();
      prototype.borrow_mut().define("hasOwnProperty", Prop::Value {
        value: Value::Native(NativeFunc {
          kind: NativeKind::HasOwnProperty,
          this: None,
        }),
        enumerable: false,
      });
      object.define("prototype", Prop::Value {
        value: Value::Obj(prototype),
        enumerable: false,
      });
    }
    Self {
      registry,
      cache: RefCell::new(HashMap::default()),
      object_global: Value::Obj(object_global),
    }
  }

  /// Load a module, evaluating it on first use.
  pub fn require(&self, specifier: &str) -> EvalResult<Value<'a>> {
    let interp = Interp::new(self);
    self.require_with(&interp, specifier)
  }

  pub fn require_with(&self, interp: &Interp<'_, 'a>, specifier: &str) -> EvalResult<Value<'a>> {
    if let Some(cached) = self.cache.borrow().get(specifier) {
      return Ok(cached.clone());
    }
    let def = self
      .registry
      .modules
      .get(specifier)
      .ok_or_else(|| EvalError::new(format!("cannot resolve module `{specifier}`")))?;
    match def {
      ModuleDef::Host(props) => {
        let exports = ObjData::new();
        for (name, value) in props {
          let value = match value {
            HostValue::Bool(b) => Value::Bool(*b),
            HostValue::Num(n) => Value::Num(*n),
            HostValue::Str(s) => Value::Str(s.clone()),
          };
          exports.borrow_mut().define(name, Prop::Value {
            value,
            enumerable: true,
          });
        }
        let exports = Value::Obj(exports);
        self
          .cache
          .borrow_mut()
          .insert(specifier.to_string(), exports.clone());
        Ok(exports)
      }
      ModuleDef::Program(body) => {
        let exports = Value::Obj(ObjData::new());
        // Published before evaluation so cycles resolve to the partial
        // surface instead of recursing forever.
        self
          .cache
          .borrow_mut()
          .insert(specifier.to_string(), exports.clone());
        let env = Env::root();
        env.declare(
          "require",
          Value::Native(NativeFunc {
            kind: NativeKind::Require,
            this: None,
          }),
        );
        env.declare("exports", exports.clone());
        env.declare("Object", self.object_global.clone());
        interp.eval_program(body, &env)?;
        Ok(exports)
      }
    }
  }

  /// Load a module and read one export, through accessors if present.
  pub fn export_value(&self, specifier: &str, name: &str) -> EvalResult<Value<'a>> {
    let interp = Interp::new(self);
    let exports = self.require_with(&interp, specifier)?;
    interp.get_prop(&exports, name)
  }

  /// Load a module and call one exported function with no arguments.
  pub fn call_export(&self, specifier: &str, name: &str) -> EvalResult<Value<'a>> {
    let interp = Interp::new(self);
    let exports = self.require_with(&interp, specifier)?;
    let callee = interp.get_prop(&exports, name)?;
    interp.call_value(callee, None, Vec::new())
  }

  /// Read a plain (non-accessor) property off an already-obtained value,
  /// for drilling into exported objects.
  pub fn read_prop(&self, value: &Value<'a>, name: &str) -> EvalResult<Value<'a>> {
    let interp = Interp::new(self);
    interp.get_prop(value, name)
  }

  /// The enumerable own keys of a module's export surface, in definition
  /// order.
  pub fn export_keys(&self, specifier: &str) -> EvalResult<Vec<String>> {
    match self.require(specifier)? {
      Value::Obj(obj) => Ok(obj.borrow().enumerable_keys()),
      other => Err(EvalError::new(format!(
        "exports of `{specifier}` is not an object: {}",
        crate::eval::describe(&other)
      ))),
    }
  }
}
