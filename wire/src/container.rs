//! The main `Container` struct and its associated methods.

use crate::builder::{ContainerBuilder, ContainerConfig};
use crate::core::{ContainerId, ResolutionGuard};
use crate::descriptor::{Args, Instance, ParamKind, ServiceDescriptor};
use crate::error::{WireError, WireResult};
use crate::factory::Factory;
use crate::name::{QualifiedName, ServiceName};
use crate::reflector::{Catalog, Reflector};
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::any::{type_name, Any};
use std::collections::HashSet;
use std::sync::Arc;

/// The dependency injection container.
///
/// Services are resolved eagerly by name with [`register`](Self::register):
/// the container asks its [`Reflector`] for the constructor, resolves every
/// dependency first, builds the service and keeps it as a singleton. Later
/// lookups through [`get`](Self::get) never construct anything.
///
/// The container is thread-safe. Concurrent `register` calls for the same
/// name construct the service exactly once.
pub struct Container<R: Reflector = Catalog> {
  id: ContainerId,
  reflector: Arc<R>,
  instances: DashMap<ServiceName, Arc<OnceCell<Instance>>>,
  config: ContainerConfig,
}

impl Container {
  /// Creates a container with an empty [`Catalog`] and default settings.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn builder() -> ContainerBuilder {
    ContainerBuilder::new()
  }

  /// Adds a declaration to the catalog under this container's namespace.
  ///
  /// Re-declaring a name replaces the declaration but never an instance
  /// that was already resolved.
  pub fn declare(&self, descriptor: ServiceDescriptor) -> WireResult<()> {
    let qualified = self.fully_qualified_name(descriptor.name())?;
    if self.reflector.insert(qualified.clone(), descriptor).is_some() {
      tracing::debug!(qualified = %qualified, "replaced service declaration");
    }
    Ok(())
  }

  /// Declares every descriptor, stopping at the first invalid name.
  pub fn declare_all<I>(&self, descriptors: I) -> WireResult<()>
  where
    I: IntoIterator<Item = ServiceDescriptor>,
  {
    descriptors
      .into_iter()
      .try_for_each(|descriptor| self.declare(descriptor))
  }
}

impl Default for Container {
  fn default() -> Self {
    Self::from_parts(Catalog::new(), ContainerConfig::default())
  }
}

impl<R: Reflector + 'static> Container<R> {
  pub(crate) fn from_parts(reflector: R, config: ContainerConfig) -> Self {
    Self {
      id: ContainerId::next(),
      reflector: Arc::new(reflector),
      instances: DashMap::new(),
      config,
    }
  }

  pub fn reflector(&self) -> &R {
    &self.reflector
  }

  pub fn config(&self) -> &ContainerConfig {
    &self.config
  }

  /// The namespaced type identity `name` resolves to, e.g. `app::Database`.
  pub fn fully_qualified_name(&self, name: &str) -> WireResult<QualifiedName> {
    Ok(self.qualify(&ServiceName::new(name)?))
  }

  // --- Resolution ---

  /// Resolves the singleton for `name`, constructing it and every unresolved
  /// dependency on the way.
  ///
  /// Registering a name twice returns the cached instance. Dependencies are
  /// cached as a side effect, before the service that needed them. If any
  /// dependency fails, the whole call fails and nothing is cached for the
  /// failed branch.
  pub fn register(&self, name: &str) -> WireResult<Instance> {
    self.resolve(&ServiceName::new(name)?)
  }

  /// Like [`register`](Self::register), downcast to `T`.
  pub fn register_as<T: Any + Send + Sync>(&self, name: &str) -> WireResult<Arc<T>> {
    let service = ServiceName::new(name)?;
    let instance = self.resolve(&service)?;
    downcast(&service, instance)
  }

  /// Like [`register`](Self::register), but a requested name that is not
  /// instantiable yields `Ok(None)` after logging a warning.
  ///
  /// Only the requested service is treated this way. A non-instantiable
  /// dependency is still an error.
  pub fn try_register(&self, name: &str) -> WireResult<Option<Instance>> {
    let service = ServiceName::new(name)?;
    match self.resolve(&service) {
      Ok(instance) => Ok(Some(instance)),
      Err(WireError::TypeNotInstantiable {
        service: failed,
        qualified,
      }) if failed == service => {
        tracing::warn!(service = %service, qualified = %qualified, "skipping service that is not instantiable");
        Ok(None)
      }
      Err(err) => Err(err),
    }
  }

  fn resolve(&self, service: &ServiceName) -> WireResult<Instance> {
    if let Some(instance) = self.cached(service) {
      tracing::trace!(service = %service, "service already resolved");
      return Ok(instance);
    }

    let qualified = self.qualify(service);
    if !self.reflector.is_instantiable(&qualified) {
      return Err(WireError::TypeNotInstantiable {
        service: service.clone(),
        qualified,
      });
    }

    if self.config.detect_cycles && ResolutionGuard::is_idle(self.id) {
      self.check_acyclic(service)?;
    }

    // Must be entered before the cell: re-initializing a cell from the
    // thread that is already initializing it would deadlock.
    let _guard = ResolutionGuard::enter(self.id, service)?;

    let cell = {
      let entry = self.instances.entry(service.clone()).or_default();
      Arc::clone(entry.value())
    };
    let instance = cell.get_or_try_init(|| self.construct(service, &qualified))?;
    Ok(Arc::clone(instance))
  }

  fn construct(&self, service: &ServiceName, qualified: &QualifiedName) -> WireResult<Instance> {
    let params = self
      .reflector
      .constructor_parameters(qualified)
      .unwrap_or_default();

    let mut values = Vec::with_capacity(params.len());
    for param in &params {
      let value = match param.kind() {
        ParamKind::Service(name) => self.resolve(&ServiceName::new(name)?)?,
        ParamKind::DeclaredType(type_name) => self.resolve(&self.declared_type_service(type_name)?)?,
        ParamKind::Default(value) => Arc::clone(value),
        ParamKind::Required => {
          return Err(WireError::MissingConstructorArgument {
            service: service.clone(),
            parameter: param.name().to_owned(),
          })
        }
      };
      values.push(value);
    }

    let arity = values.len();
    let instance = self
      .reflector
      .instantiate(qualified, Args::new(service.clone(), values))?;
    tracing::debug!(service = %service, qualified = %qualified, arity, "constructed service");
    Ok(instance)
  }

  /// Walks the declared dependencies of `root` without constructing anything
  /// and fails on the first cycle. Resolved services are skipped since their
  /// dependencies are resolved too.
  fn check_acyclic(&self, root: &ServiceName) -> WireResult<()> {
    let mut path = Vec::new();
    let mut done = HashSet::new();
    self.visit(root, &mut path, &mut done)
  }

  fn visit(
    &self,
    service: &ServiceName,
    path: &mut Vec<ServiceName>,
    done: &mut HashSet<ServiceName>,
  ) -> WireResult<()> {
    if done.contains(service) || self.contains_resolved(service) {
      return Ok(());
    }
    if let Some(start) = path.iter().position(|s| s == service) {
      let mut chain = path[start..].to_vec();
      chain.push(service.clone());
      return Err(WireError::CircularDependency { chain });
    }

    let qualified = self.qualify(service);
    if self.reflector.is_instantiable(&qualified) {
      path.push(service.clone());
      for param in self
        .reflector
        .constructor_parameters(&qualified)
        .unwrap_or_default()
      {
        let dependency = match param.kind() {
          ParamKind::Service(name) => ServiceName::new(name)?,
          ParamKind::DeclaredType(type_name) => self.declared_type_service(type_name)?,
          ParamKind::Default(_) | ParamKind::Required => continue,
        };
        self.visit(&dependency, path, done)?;
      }
      path.pop();
    }
    done.insert(service.clone());
    Ok(())
  }

  fn declared_type_service(&self, type_name: &str) -> WireResult<ServiceName> {
    ServiceName::from_type_name(type_name, self.config.type_suffix.as_deref())
  }

  fn qualify(&self, service: &ServiceName) -> QualifiedName {
    QualifiedName::new(&self.config.namespace, service)
  }

  // --- Instance registry ---

  fn cached(&self, service: &ServiceName) -> Option<Instance> {
    self
      .instances
      .get(service)
      .and_then(|cell| cell.get().cloned())
  }

  fn contains_resolved(&self, service: &ServiceName) -> bool {
    self
      .instances
      .get(service)
      .map_or(false, |cell| cell.get().is_some())
  }

  /// Returns the singleton previously resolved for `name`. Never resolves anything.
  pub fn get(&self, name: &str) -> WireResult<Instance> {
    let service = ServiceName::new(name)?;
    self
      .cached(&service)
      .ok_or(WireError::UnknownService { service })
  }

  /// Like [`get`](Self::get), downcast to `T`.
  pub fn get_as<T: Any + Send + Sync>(&self, name: &str) -> WireResult<Arc<T>> {
    let service = ServiceName::new(name)?;
    match self.cached(&service) {
      Some(instance) => downcast(&service, instance),
      None => Err(WireError::UnknownService { service }),
    }
  }

  /// Whether `name` has a resolved singleton.
  pub fn contains(&self, name: &str) -> bool {
    ServiceName::new(name).map_or(false, |service| self.contains_resolved(&service))
  }

  /// The number of resolved singletons.
  pub fn len(&self) -> usize {
    self
      .instances
      .iter()
      .filter(|entry| entry.value().get().is_some())
      .count()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// A sorted snapshot of the names with resolved singletons.
  pub fn service_names(&self) -> Vec<ServiceName> {
    let mut names: Vec<_> = self
      .instances
      .iter()
      .filter(|entry| entry.value().get().is_some())
      .map(|entry| entry.key().clone())
      .collect();
    names.sort();
    names
  }

  // --- Factories ---

  /// Returns a factory that builds fresh, unshared instances of `name`
  /// from explicit arguments.
  pub fn factory(&self, name: &str) -> WireResult<Factory> {
    let service = ServiceName::new(name)?;
    let qualified = self.qualify(&service);
    if !self.reflector.is_instantiable(&qualified) {
      return Err(WireError::TypeNotInstantiable {
        service,
        qualified,
      });
    }

    let arity = self
      .reflector
      .constructor_parameters(&qualified)
      .map_or(0, |params| params.len());
    let reflector: Arc<dyn Reflector> = self.reflector.clone();
    Ok(Factory::new(service, qualified, arity, reflector))
  }
}

fn downcast<T: Any + Send + Sync>(service: &ServiceName, instance: Instance) -> WireResult<Arc<T>> {
  instance
    .downcast::<T>()
    .map_err(|_| WireError::TypeMismatch {
      service: service.clone(),
      expected: type_name::<T>(),
    })
}
