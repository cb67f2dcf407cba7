//! Declarations of how a service is constructed.

use crate::error::{WireError, WireResult};
use crate::name::ServiceName;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// A type-erased, shared service instance.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Wraps a value as an [`Instance`], e.g. to pass it to a [`Factory`](crate::Factory).
pub fn instance<T: Any + Send + Sync>(value: T) -> Instance {
  Arc::new(value)
}

type BuildFn = Arc<dyn Fn(&Args) -> WireResult<Instance> + Send + Sync>;

/// What a constructor parameter is filled with during resolution.
#[derive(Clone)]
pub enum ParamKind {
  /// Another service, resolved recursively by name.
  Service(String),
  /// A declared type name. The dependency's service name is derived from it
  /// by stripping the container's configured type suffix.
  DeclaredType(String),
  /// A literal value passed verbatim.
  Default(Instance),
  /// Nothing to fill the parameter with. Resolving the owning service fails.
  Required,
}

impl fmt::Debug for ParamKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ParamKind::Service(name) => f.debug_tuple("Service").field(name).finish(),
      ParamKind::DeclaredType(ty) => f.debug_tuple("DeclaredType").field(ty).finish(),
      ParamKind::Default(_) => f.write_str("Default(..)"),
      ParamKind::Required => f.write_str("Required"),
    }
  }
}

/// A single constructor parameter.
#[derive(Clone, Debug)]
pub struct Param {
  name: String,
  kind: ParamKind,
}

impl Param {
  /// A parameter filled with the service registered under `dependency`.
  pub fn service(name: &str, dependency: &str) -> Self {
    Self {
      name: name.to_owned(),
      kind: ParamKind::Service(dependency.to_owned()),
    }
  }

  /// A parameter filled with the service named after `declared_type`, minus
  /// the container's type suffix (`DatabaseModel` resolves `Database`).
  pub fn of_type(name: &str, declared_type: &str) -> Self {
    Self {
      name: name.to_owned(),
      kind: ParamKind::DeclaredType(declared_type.to_owned()),
    }
  }

  /// A parameter filled with `value`.
  pub fn with_default<T: Any + Send + Sync>(name: &str, value: T) -> Self {
    Self {
      name: name.to_owned(),
      kind: ParamKind::Default(Arc::new(value)),
    }
  }

  /// A parameter with no way to be filled automatically. Such a service can
  /// still be built through a [`Factory`](crate::Factory).
  pub fn required(name: &str) -> Self {
    Self {
      name: name.to_owned(),
      kind: ParamKind::Required,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn kind(&self) -> &ParamKind {
    &self.kind
  }
}

/// The arguments handed to a constructor, in parameter declaration order.
pub struct Args {
  service: ServiceName,
  values: Vec<Instance>,
}

impl Args {
  pub(crate) fn new(service: ServiceName, values: Vec<Instance>) -> Self {
    Self { service, values }
  }

  /// The service being constructed.
  pub fn service(&self) -> &ServiceName {
    &self.service
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// The argument at `index` as a shared `T`.
  pub fn get<T: Any + Send + Sync>(&self, index: usize) -> WireResult<Arc<T>> {
    self
      .values
      .get(index)
      .cloned()
      .and_then(|value| value.downcast::<T>().ok())
      .ok_or_else(|| WireError::InvalidArgument {
        service: self.service.clone(),
        index,
        expected: type_name::<T>(),
      })
  }

  /// The argument at `index`, cloned out of its shared pointer.
  pub fn value<T: Any + Send + Sync + Clone>(&self, index: usize) -> WireResult<T> {
    self.get::<T>(index).map(|value| (*value).clone())
  }

  /// The untyped argument at `index`.
  pub fn raw(&self, index: usize) -> Option<&Instance> {
    self.values.get(index)
  }

  /// Wraps a constructor's own failure so it can be returned from the build closure.
  pub fn error<E>(&self, source: E) -> WireError
  where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
  {
    WireError::Construction {
      service: self.service.clone(),
      source: source.into(),
    }
  }
}

impl fmt::Debug for Args {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Args")
      .field("service", &self.service)
      .field("len", &self.values.len())
      .finish()
  }
}

/// How a concrete service is built.
#[derive(Clone)]
pub struct Constructor {
  // `None` marks a type without a constructor, built with no arguments.
  params: Option<Vec<Param>>,
  build: BuildFn,
}

impl Constructor {
  /// The declared parameters, or `None` when the type has no constructor.
  pub fn params(&self) -> Option<&[Param]> {
    self.params.as_deref()
  }

  /// The number of arguments `build` expects.
  pub fn arity(&self) -> usize {
    self.params.as_ref().map_or(0, Vec::len)
  }

  pub fn build(&self, args: &Args) -> WireResult<Instance> {
    (self.build)(args)
  }
}

impl fmt::Debug for Constructor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Constructor")
      .field("params", &self.params)
      .finish_non_exhaustive()
  }
}

#[derive(Clone, Debug)]
enum DescriptorKind {
  Abstract,
  Concrete(Constructor),
}

/// A declaration of a service: its name and how to construct it.
///
/// # Examples
///
/// ```
/// use fibre_wire::{Param, ServiceDescriptor};
///
/// struct Database;
/// struct UserService {
///   db: std::sync::Arc<Database>,
///   page_size: u32,
/// }
///
/// let database = ServiceDescriptor::without_constructor("database", || Database);
/// let users = ServiceDescriptor::constructor("userService", |args| {
///   Ok(UserService {
///     db: args.get(0)?,
///     page_size: args.value(1)?,
///   })
/// })
/// .param(Param::service("db", "database"))
/// .param(Param::with_default("page_size", 50u32));
///
/// assert_eq!(users.constructor_ref().unwrap().arity(), 2);
/// assert!(database.constructor_ref().unwrap().params().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct ServiceDescriptor {
  name: String,
  kind: DescriptorKind,
}

impl ServiceDescriptor {
  /// A type without a constructor, built by calling `build` with no arguments.
  pub fn without_constructor<T, F>(name: &str, build: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn() -> T + Send + Sync + 'static,
  {
    Self {
      name: name.to_owned(),
      kind: DescriptorKind::Concrete(Constructor {
        params: None,
        build: Arc::new(move |_: &Args| Ok(Arc::new(build()) as Instance)),
      }),
    }
  }

  /// A type with a constructor. Parameters are added with [`param`](Self::param)
  /// and reach `build` in the order they were added.
  pub fn constructor<T, F>(name: &str, build: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Args) -> WireResult<T> + Send + Sync + 'static,
  {
    Self {
      name: name.to_owned(),
      kind: DescriptorKind::Concrete(Constructor {
        params: Some(Vec::new()),
        build: Arc::new(move |args: &Args| build(args).map(|value| Arc::new(value) as Instance)),
      }),
    }
  }

  /// A known name that cannot be instantiated, such as an interface.
  pub fn abstract_service(name: &str) -> Self {
    Self {
      name: name.to_owned(),
      kind: DescriptorKind::Abstract,
    }
  }

  /// Appends a constructor parameter. Turns a constructor-less declaration
  /// into one with a constructor; has no effect on abstract services.
  pub fn param(mut self, param: Param) -> Self {
    if let DescriptorKind::Concrete(constructor) = &mut self.kind {
      constructor.params.get_or_insert_with(Vec::new).push(param);
    }
    self
  }

  /// The name as declared, before normalization.
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn is_instantiable(&self) -> bool {
    matches!(self.kind, DescriptorKind::Concrete(_))
  }

  /// The constructor, or `None` for abstract services.
  pub fn constructor_ref(&self) -> Option<&Constructor> {
    match &self.kind {
      DescriptorKind::Concrete(constructor) => Some(constructor),
      DescriptorKind::Abstract => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args(values: Vec<Instance>) -> Args {
    Args::new(ServiceName::new("subject").unwrap(), values)
  }

  #[test]
  fn args_downcast_by_position() {
    let args = args(vec![instance(7u32), instance("seven".to_string())]);
    assert_eq!(*args.get::<u32>(0).unwrap(), 7);
    assert_eq!(args.value::<String>(1).unwrap(), "seven");
  }

  #[test]
  fn args_report_wrong_type_and_missing_slot() {
    let args = args(vec![instance(7u32)]);
    assert!(matches!(
      args.get::<String>(0),
      Err(WireError::InvalidArgument { index: 0, .. })
    ));
    assert!(matches!(
      args.get::<u32>(3),
      Err(WireError::InvalidArgument { index: 3, .. })
    ));
  }

  #[test]
  fn params_keep_declaration_order() {
    let descriptor = ServiceDescriptor::constructor("mailer", |_| Ok(()))
      .param(Param::service("transport", "smtp"))
      .param(Param::with_default("retries", 3u8))
      .param(Param::required("sender"));

    let names: Vec<_> = descriptor
      .constructor_ref()
      .unwrap()
      .params()
      .unwrap()
      .iter()
      .map(Param::name)
      .collect();
    assert_eq!(names, ["transport", "retries", "sender"]);
  }

  #[test]
  fn abstract_services_ignore_params() {
    let descriptor = ServiceDescriptor::abstract_service("repository").param(Param::required("x"));
    assert!(!descriptor.is_instantiable());
    assert!(descriptor.constructor_ref().is_none());
  }
}
