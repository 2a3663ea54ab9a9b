//! Builders for synthetic nodes, used by transforms that emit new statements.

use crate::ast::class_or_object::{
  ClassOrObjKey, ClassOrObjMemberDirectKey, ClassOrObjVal, ObjMember, ObjMemberType,
};
use crate::ast::expr::lit::{LitBoolExpr, LitNullExpr, LitNumExpr, LitObjExpr, LitStrExpr};
use crate::ast::expr::pat::{IdPat, Pat};
use crate::ast::expr::*;
use crate::ast::func::{Func, FuncBody};
use crate::ast::node::Node;
use crate::ast::stmt::decl::{FuncDecl, ParamDecl, PatDecl, VarDecl, VarDeclMode, VarDeclarator};
use crate::ast::stmt::*;
use crate::loc::Loc;
use crate::operator::OperatorName;

pub fn id(loc: Loc, name: impl Into<String>) -> Node<Expr> {
  Node::new(loc, Expr::Id(Node::new(loc, IdExpr { name: name.into() })))
}

pub fn id_pat(loc: Loc, name: impl Into<String>) -> Node<Pat> {
  Node::new(loc, Pat::Id(Node::new(loc, IdPat { name: name.into() })))
}

pub fn pat_decl(loc: Loc, name: impl Into<String>) -> Node<PatDecl> {
  Node::new(loc, PatDecl {
    pat: id_pat(loc, name),
  })
}

pub fn string(loc: Loc, value: impl Into<String>) -> Node<Expr> {
  Node::new(
    loc,
    Expr::LitStr(Node::new(loc, LitStrExpr {
      value: value.into(),
    })),
  )
}

pub fn number(loc: Loc, value: f64) -> Node<Expr> {
  Node::new(loc, Expr::LitNum(Node::new(loc, LitNumExpr { value })))
}

pub fn boolean(loc: Loc, value: bool) -> Node<Expr> {
  Node::new(loc, Expr::LitBool(Node::new(loc, LitBoolExpr { value })))
}

pub fn null(loc: Loc) -> Node<Expr> {
  Node::new(loc, Expr::LitNull(Node::new(loc, LitNullExpr {})))
}

pub fn empty_object(loc: Loc) -> Node<Expr> {
  object(loc, vec![])
}

pub fn object(loc: Loc, members: Vec<Node<ObjMember>>) -> Node<Expr> {
  Node::new(loc, Expr::LitObj(Node::new(loc, LitObjExpr { members })))
}

/// A `key: value` object member with a direct (non-computed) key.
pub fn obj_prop(loc: Loc, key: impl Into<String>, value: Node<Expr>) -> Node<ObjMember> {
  Node::new(loc, ObjMember {
    typ: ObjMemberType::Valued {
      key: ClassOrObjKey::Direct(Node::new(loc, ClassOrObjMemberDirectKey { key: key.into() })),
      val: ClassOrObjVal::Prop(Some(value)),
    },
  })
}

pub fn expr_stmt(loc: Loc, expr: Node<Expr>) -> Node<Stmt> {
  Node::new(loc, Stmt::Expr(Node::new(loc, ExprStmt { expr })))
}

pub fn binary_expr(
  loc: Loc,
  operator: OperatorName,
  left: Node<Expr>,
  right: Node<Expr>,
) -> Node<Expr> {
  Node::new(
    loc,
    Expr::Binary(Node::new(loc, BinaryExpr {
      operator,
      left,
      right,
    })),
  )
}

pub fn assign_expr(loc: Loc, left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
  binary_expr(loc, OperatorName::Assignment, left, right)
}

pub fn cond(
  loc: Loc,
  test: Node<Expr>,
  consequent: Node<Expr>,
  alternate: Node<Expr>,
) -> Node<Expr> {
  Node::new(
    loc,
    Expr::Cond(Node::new(loc, CondExpr {
      test,
      consequent,
      alternate,
    })),
  )
}

pub fn unary_expr(loc: Loc, operator: OperatorName, argument: Node<Expr>) -> Node<Expr> {
  Node::new(
    loc,
    Expr::Unary(Node::new(loc, UnaryExpr { operator, argument })),
  )
}

/// `object.name`, for property names that are valid identifiers.
pub fn member(loc: Loc, object: Node<Expr>, name: impl Into<String>) -> Node<Expr> {
  Node::new(
    loc,
    Expr::Member(Node::new(loc, MemberExpr {
      optional_chaining: false,
      left: object,
      right: name.into(),
    })),
  )
}

/// `object[member]`.
pub fn computed_member(loc: Loc, object: Node<Expr>, member: Node<Expr>) -> Node<Expr> {
  Node::new(
    loc,
    Expr::ComputedMember(Node::new(loc, ComputedMemberExpr {
      optional_chaining: false,
      object,
      member,
    })),
  )
}

pub fn call(loc: Loc, callee: Node<Expr>, arguments: Vec<Node<Expr>>) -> Node<Expr> {
  let arguments = arguments
    .into_iter()
    .map(|value| {
      Node::new(loc, CallArg {
        spread: false,
        value,
      })
    })
    .collect();
  Node::new(
    loc,
    Expr::Call(Node::new(loc, CallExpr {
      optional_chaining: false,
      callee,
      arguments,
    })),
  )
}

pub fn var_decl_stmt(
  loc: Loc,
  name: impl Into<String>,
  init: Option<Node<Expr>>,
  mode: VarDeclMode,
) -> Node<Stmt> {
  let declarator = VarDeclarator {
    pattern: pat_decl(loc, name),
    initializer: init,
  };
  Node::new(
    loc,
    Stmt::VarDecl(Node::new(loc, VarDecl {
      export: false,
      mode,
      declarators: vec![declarator],
    })),
  )
}

fn plain_func(parameters: Vec<Node<ParamDecl>>, body: Vec<Node<Stmt>>) -> Func {
  Func {
    arrow: false,
    async_: false,
    generator: false,
    parameters,
    body: FuncBody::Block(body),
  }
}

pub fn param(loc: Loc, name: impl Into<String>) -> Node<ParamDecl> {
  Node::new(loc, ParamDecl {
    rest: false,
    pattern: pat_decl(loc, name),
    default_value: None,
  })
}

/// An anonymous `function (params) { body }` expression.
pub fn func_expr(loc: Loc, parameters: Vec<Node<ParamDecl>>, body: Vec<Node<Stmt>>) -> Node<Expr> {
  Node::new(
    loc,
    Expr::Func(Node::new(loc, FuncExpr {
      name: None,
      func: Node::new(loc, plain_func(parameters, body)),
    })),
  )
}

/// A `function name(params) { body }` declaration statement.
pub fn func_decl_stmt(
  loc: Loc,
  name: impl Into<String>,
  parameters: Vec<Node<ParamDecl>>,
  body: Vec<Node<Stmt>>,
) -> Node<Stmt> {
  Node::new(
    loc,
    Stmt::FunctionDecl(Node::new(loc, FuncDecl {
      export: false,
      export_default: false,
      name: Some(Node::new(loc, crate::ast::expr::pat::ClassOrFuncName {
        name: name.into(),
      })),
      function: Node::new(loc, plain_func(parameters, body)),
    })),
  )
}

pub fn return_stmt(loc: Loc, value: Option<Node<Expr>>) -> Node<Stmt> {
  Node::new(loc, Stmt::Return(Node::new(loc, ReturnStmt { value })))
}

pub fn if_stmt(loc: Loc, test: Node<Expr>, consequent: Vec<Node<Stmt>>) -> Node<Stmt> {
  let consequent = Node::new(
    loc,
    Stmt::Block(Node::new(loc, BlockStmt { body: consequent })),
  );
  Node::new(
    loc,
    Stmt::If(Node::new(loc, IfStmt {
      test,
      consequent,
      alternate: None,
    })),
  )
}

pub fn empty_stmt(loc: Loc) -> Node<Stmt> {
  Node::new(loc, Stmt::Empty(Node::new(loc, EmptyStmt {})))
}
