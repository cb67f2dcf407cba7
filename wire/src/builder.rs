use crate::container::Container;
use crate::reflector::{Catalog, Reflector};

/// The namespace services are qualified with unless configured otherwise.
pub const DEFAULT_NAMESPACE: &str = "app";

/// The suffix stripped from declared type names unless configured otherwise.
pub const DEFAULT_TYPE_SUFFIX: &str = "Model";

/// Settings a [`Container`] resolves with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerConfig {
  /// Prefix of every qualified name, joined with `::`. Empty means no prefix.
  pub namespace: String,
  /// Trailing marker removed from `Param::of_type` names to find the dependency.
  pub type_suffix: Option<String>,
  /// Walk the declared dependency graph for cycles before a top-level resolution.
  pub detect_cycles: bool,
}

impl Default for ContainerConfig {
  fn default() -> Self {
    Self {
      namespace: DEFAULT_NAMESPACE.to_owned(),
      type_suffix: Some(DEFAULT_TYPE_SUFFIX.to_owned()),
      detect_cycles: true,
    }
  }
}

/// A builder for [`Container`] instances.
///
/// ```
/// use fibre_wire::{ContainerBuilder, ServiceDescriptor};
///
/// let container = ContainerBuilder::new()
///   .namespace("shop")
///   .type_suffix(None)
///   .build();
/// container
///   .declare(ServiceDescriptor::without_constructor("cart", Vec::<u32>::new))
///   .unwrap();
///
/// assert_eq!(container.fully_qualified_name("cart").unwrap().as_str(), "shop::Cart");
/// assert!(container.register("cart").is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContainerBuilder {
  config: ContainerConfig,
}

impl ContainerBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the namespace qualified names are prefixed with.
  pub fn namespace(mut self, namespace: &str) -> Self {
    self.config.namespace = namespace.to_owned();
    self
  }

  /// Sets the suffix stripped from declared type names. `None` disables stripping.
  pub fn type_suffix(mut self, suffix: Option<&str>) -> Self {
    self.config.type_suffix = suffix.map(str::to_owned);
    self
  }

  /// Enables or disables the up-front cycle check. Cycles are still reported
  /// when disabled, once resolution re-enters a service on the same thread.
  pub fn detect_cycles(mut self, enabled: bool) -> Self {
    self.config.detect_cycles = enabled;
    self
  }

  /// Builds a container backed by an empty [`Catalog`].
  pub fn build(self) -> Container {
    Container::from_parts(Catalog::new(), self.config)
  }

  /// Builds a container backed by `reflector`.
  pub fn build_with<R: Reflector + 'static>(self, reflector: R) -> Container<R> {
    Container::from_parts(reflector, self.config)
  }
}
