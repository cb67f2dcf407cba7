//! Non-memoizing construction with caller-supplied arguments.

use crate::descriptor::{Args, Instance};
use crate::error::{WireError, WireResult};
use crate::name::{QualifiedName, ServiceName};
use crate::reflector::Reflector;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// A constructor bound to one service type.
///
/// Every call to [`create`](Self::create) builds a new instance. Nothing is
/// stored in the container's instance registry.
#[derive(Clone)]
pub struct Factory {
  service: ServiceName,
  qualified: QualifiedName,
  arity: usize,
  reflector: Arc<dyn Reflector>,
}

impl Factory {
  pub(crate) fn new(
    service: ServiceName,
    qualified: QualifiedName,
    arity: usize,
    reflector: Arc<dyn Reflector>,
  ) -> Self {
    Self {
      service,
      qualified,
      arity,
      reflector,
    }
  }

  pub fn service(&self) -> &ServiceName {
    &self.service
  }

  pub fn qualified_name(&self) -> &QualifiedName {
    &self.qualified
  }

  /// The number of arguments `create` expects.
  pub fn arity(&self) -> usize {
    self.arity
  }

  /// Builds a fresh instance from `args`, given in constructor parameter order.
  pub fn create(&self, args: Vec<Instance>) -> WireResult<Instance> {
    if args.len() != self.arity {
      return Err(WireError::ArgumentCountMismatch {
        service: self.service.clone(),
        expected: self.arity,
        actual: args.len(),
      });
    }

    let instance = self
      .reflector
      .instantiate(&self.qualified, Args::new(self.service.clone(), args))?;
    tracing::debug!(service = %self.service, arity = self.arity, "factory created instance");
    Ok(instance)
  }

  /// Like [`create`](Self::create), downcast to `T`.
  pub fn create_as<T: Any + Send + Sync>(&self, args: Vec<Instance>) -> WireResult<Arc<T>> {
    self
      .create(args)?
      .downcast::<T>()
      .map_err(|_| WireError::TypeMismatch {
        service: self.service.clone(),
        expected: type_name::<T>(),
      })
  }
}

impl fmt::Debug for Factory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Factory")
      .field("service", &self.service)
      .field("qualified", &self.qualified)
      .field("arity", &self.arity)
      .finish_non_exhaustive()
  }
}
