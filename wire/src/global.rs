//! The process-wide container instance and its accessor.

use crate::container::Container;
use once_cell::sync::Lazy;

// Created on first access in a thread-safe manner and never dropped.
static GLOBAL_CONTAINER: Lazy<Container> = Lazy::new(Container::default);

/// Provides a reference to the process-wide container.
///
/// Prefer passing an explicitly built [`Container`] through your startup
/// code; the global one exists for bootstraps that have nowhere to keep it.
///
/// # Examples
///
/// ```
/// use fibre_wire::{global, ServiceDescriptor};
///
/// global()
///   .declare(ServiceDescriptor::without_constructor("greeting", || String::from("hello")))
///   .unwrap();
/// let greeting = global().register_as::<String>("greeting").unwrap();
/// assert_eq!(*greeting, "hello");
/// ```
pub fn global() -> &'static Container {
  &GLOBAL_CONTAINER
}
