use crate::loc::Loc;
use ahash::HashMap;
use derive_visitor::{Drive, DriveMut};
use serde::{Serialize, Serializer};
use std::any::{Any, TypeId};
use std::fmt;
use std::fmt::{Debug, Formatter};

/// Arbitrary data attached to a node by downstream passes, keyed by type.
#[derive(Default)]
pub struct NodeAssocData {
  // Bound to Send + Sync so nodes can move across threads (one module per
  // worker is the expected usage).
  map: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl NodeAssocData {
  pub fn get<T: Any>(&self) -> Option<&T> {
    let t = TypeId::of::<T>();
    self.map.get(&t).map(|v| v.downcast_ref().unwrap())
  }

  pub fn set<T: Any + Send + Sync>(&mut self, v: T) {
    let t = TypeId::of::<T>();
    self.map.insert(t, Box::from(v));
  }
}

#[derive(Drive, DriveMut)]
pub struct Node<S: Drive + DriveMut> {
  #[drive(skip)]
  pub loc: Loc,
  pub stx: Box<S>,
  #[drive(skip)]
  pub assoc: NodeAssocData,
}

impl<S: Drive + DriveMut> Node<S> {
  pub fn new(loc: Loc, stx: S) -> Node<S> {
    Node {
      loc,
      stx: Box::new(stx),
      assoc: NodeAssocData::default(),
    }
  }

  /// Rebuild a node with the given location and associated data, e.g. when a
  /// statement is reconstructed from its dismantled parts.
  pub fn with_assoc(loc: Loc, assoc: NodeAssocData, stx: S) -> Node<S> {
    Node {
      loc,
      stx: Box::new(stx),
      assoc,
    }
  }

  /// Maps the syntax, keeping the location and associated data.
  pub fn map_stx<T: Drive + DriveMut, F: FnOnce(S) -> T>(self, f: F) -> Node<T> {
    Node {
      loc: self.loc,
      stx: Box::new(f(*self.stx)),
      assoc: self.assoc,
    }
  }

  /// Maps the syntax, copying the location but not the associated data.
  pub fn derive_stx<T: Drive + DriveMut, F: FnOnce(&S) -> T>(&self, f: F) -> Node<T> {
    Node {
      loc: self.loc,
      stx: Box::new(f(&self.stx)),
      assoc: NodeAssocData::default(),
    }
  }

  /// Wraps the node inside another node with the same loc, with syntax derived
  /// from the provided callback.
  pub fn wrap<T: Drive + DriveMut, F: FnOnce(Node<S>) -> T>(self, f: F) -> Node<T> {
    let loc = self.loc;
    let stx = f(self);
    Node::new(loc, stx)
  }
}

impl<S: Debug + Drive + DriveMut> Debug for Node<S> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    self.stx.fmt(f)
  }
}

impl<S: Serialize + Drive + DriveMut> Serialize for Node<S> {
  fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
    self.stx.serialize(serializer)
  }
}

#[cfg(test)]
mod tests {
  use super::NodeAssocData;

  #[test]
  fn assoc_data_is_keyed_by_type() {
    struct Marker(u32);
    let mut assoc = NodeAssocData::default();
    assoc.set(Marker(7));
    assert_eq!(assoc.get::<Marker>().unwrap().0, 7);
    assert!(assoc.get::<String>().is_none());
  }
}
