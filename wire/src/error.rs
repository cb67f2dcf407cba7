//! The error type shared by every container operation.

use crate::name::{QualifiedName, ServiceName};
use thiserror::Error;

/// The error type for every fallible container operation.
#[derive(Debug, Error)]
pub enum WireError {
  /// The name does not map to a constructible type. Either nothing was
  /// declared under it, or it was declared as an abstract service.
  #[error("service '{service}' ({qualified}) is not instantiable")]
  TypeNotInstantiable {
    service: ServiceName,
    qualified: QualifiedName,
  },

  /// A constructor parameter has neither a dependency reference nor a default value.
  #[error("the parameter '{parameter}' of service '{service}' requires a default value to be instantiated")]
  MissingConstructorArgument {
    service: ServiceName,
    parameter: String,
  },

  /// `get` was called for a name that was never registered.
  #[error("the service '{service}' has not been registered; call `register` first")]
  UnknownService { service: ServiceName },

  /// A factory was invoked with the wrong number of arguments.
  #[error("the service '{service}' expects {expected} constructor argument(s), got {actual}")]
  ArgumentCountMismatch {
    service: ServiceName,
    expected: usize,
    actual: usize,
  },

  /// The dependency graph loops back on itself. The chain starts and ends with
  /// the same service.
  #[error("circular dependency detected: {}", format_chain(.chain))]
  CircularDependency { chain: Vec<ServiceName> },

  /// A resolved instance is not of the type the caller asked for.
  #[error("the service '{service}' is not of type `{expected}`")]
  TypeMismatch {
    service: ServiceName,
    expected: &'static str,
  },

  /// A constructor read an argument slot that is missing or holds another type.
  #[error("argument {index} of service '{service}' is missing or not of type `{expected}`")]
  InvalidArgument {
    service: ServiceName,
    index: usize,
    expected: &'static str,
  },

  #[error("'{name}' is not a valid service name")]
  InvalidName { name: String },

  /// A constructor ran and reported its own failure.
  #[error("failed to construct service '{service}': {source}")]
  Construction {
    service: ServiceName,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl WireError {
  /// The service the error is about, when there is a single one.
  pub fn service(&self) -> Option<&ServiceName> {
    match self {
      WireError::TypeNotInstantiable { service, .. }
      | WireError::MissingConstructorArgument { service, .. }
      | WireError::UnknownService { service }
      | WireError::ArgumentCountMismatch { service, .. }
      | WireError::TypeMismatch { service, .. }
      | WireError::InvalidArgument { service, .. }
      | WireError::Construction { service, .. } => Some(service),
      WireError::CircularDependency { chain } => chain.first(),
      WireError::InvalidName { .. } => None,
    }
  }
}

fn format_chain(chain: &[ServiceName]) -> String {
  chain
    .iter()
    .map(ServiceName::as_str)
    .collect::<Vec<_>>()
    .join(" -> ")
}

/// A specialized `Result` type for container operations.
pub type WireResult<T, E = WireError> = std::result::Result<T, E>;
