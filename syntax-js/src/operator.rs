use serde::Serialize;

/// The operators that can appear in this crate's expression subset.
///
/// Binary and unary operators share one enum; `BinaryExpr` and `UnaryExpr`
/// constrain which variants are legal in context.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum OperatorName {
  Addition,
  Assignment,
  Comma,
  Equality,
  In,
  Inequality,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  StrictEquality,
  StrictInequality,
  Typeof,
  Void,
}

impl OperatorName {
  pub fn is_unary(self) -> bool {
    matches!(
      self,
      OperatorName::LogicalNot | OperatorName::Typeof | OperatorName::Void
    )
  }
}
