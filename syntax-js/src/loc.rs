use std::cmp::{max, min};
use std::ops::{Add, AddAssign};

/// A location within the current source file expressed as UTF-8 byte offsets.
///
/// A location is not guaranteed to correspond to real source text: transforms
/// create entirely new nodes, and for those only an approximate/best-effort
/// location (usually the originating statement's) is available.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  /// Returns the starting offset as `u32`, clamping to `u32::MAX` if necessary.
  pub fn start_u32(&self) -> u32 {
    clamp_to_u32(self.0)
  }

  /// Returns the ending offset as `u32`, clamping to `u32::MAX` if necessary.
  pub fn end_u32(&self) -> u32 {
    clamp_to_u32(self.1)
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1 - self.0
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }

  pub fn add_option(self, rhs: Option<Loc>) -> Loc {
    let mut new = self;
    if let Some(rhs) = rhs {
      new.extend(rhs);
    };
    new
  }
}

impl Add for Loc {
  type Output = Loc;

  fn add(self, rhs: Self) -> Self::Output {
    let mut new = self;
    new.extend(rhs);
    new
  }
}

impl AddAssign for Loc {
  fn add_assign(&mut self, rhs: Self) {
    self.extend(rhs);
  }
}

fn clamp_to_u32(value: usize) -> u32 {
  if value > u32::MAX as usize {
    u32::MAX
  } else {
    value as u32
  }
}
