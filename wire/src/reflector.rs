//! The type introspection the resolution engine consumes, and the
//! registration table that provides it.

use crate::descriptor::{Args, Instance, Param, ServiceDescriptor};
use crate::error::{WireError, WireResult};
use crate::name::QualifiedName;
use dashmap::DashMap;

/// Answers questions about constructible types by qualified name.
///
/// `constructor_parameters` returns `None` both for types without a
/// constructor and for unknown types; callers are expected to check
/// `is_instantiable` first.
pub trait Reflector: Send + Sync {
  fn is_instantiable(&self, qualified: &QualifiedName) -> bool;

  fn constructor_parameters(&self, qualified: &QualifiedName) -> Option<Vec<Param>>;

  /// Builds a new instance from `args`, which must match the declared parameters in order.
  fn instantiate(&self, qualified: &QualifiedName, args: Args) -> WireResult<Instance>;
}

/// A concurrent registration table of service declarations.
///
/// Declarations can be added at any time through a shared reference. A later
/// declaration under the same qualified name replaces the earlier one.
#[derive(Default)]
pub struct Catalog {
  descriptors: DashMap<QualifiedName, ServiceDescriptor>,
}

impl Catalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Stores `descriptor` under `qualified`, returning the declaration it replaced.
  pub fn insert(
    &self,
    qualified: QualifiedName,
    descriptor: ServiceDescriptor,
  ) -> Option<ServiceDescriptor> {
    self.descriptors.insert(qualified, descriptor)
  }

  pub fn contains(&self, qualified: &QualifiedName) -> bool {
    self.descriptors.contains_key(qualified)
  }

  pub fn descriptor(&self, qualified: &QualifiedName) -> Option<ServiceDescriptor> {
    self.descriptors.get(qualified).map(|entry| entry.value().clone())
  }

  pub fn len(&self) -> usize {
    self.descriptors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.descriptors.is_empty()
  }
}

impl Reflector for Catalog {
  fn is_instantiable(&self, qualified: &QualifiedName) -> bool {
    self
      .descriptors
      .get(qualified)
      .map_or(false, |entry| entry.is_instantiable())
  }

  fn constructor_parameters(&self, qualified: &QualifiedName) -> Option<Vec<Param>> {
    let entry = self.descriptors.get(qualified)?;
    let params = entry.constructor_ref()?.params().map(<[Param]>::to_vec);
    params
  }

  fn instantiate(&self, qualified: &QualifiedName, args: Args) -> WireResult<Instance> {
    // Clone the constructor out so the shard lock is not held while user code runs.
    let constructor = self
      .descriptors
      .get(qualified)
      .and_then(|entry| entry.constructor_ref().cloned())
      .ok_or_else(|| WireError::TypeNotInstantiable {
        service: args.service().clone(),
        qualified: qualified.clone(),
      })?;

    if constructor.arity() != args.len() {
      return Err(WireError::ArgumentCountMismatch {
        service: args.service().clone(),
        expected: constructor.arity(),
        actual: args.len(),
      });
    }
    constructor.build(&args)
  }
}
