//! Public macros for ergonomic service resolution.

/// Registers a service in the global container and downcasts it, panicking
/// on failure.
///
/// Use it where a missing service is a programming error. For a fallible
/// version, use `global().register_as(...)` or [`maybe_resolve!`].
///
/// # Panics
///
/// Panics if the service cannot be resolved or is not of the requested type.
///
/// # Examples
///
/// ```
/// use fibre_wire::{global, resolve, ServiceDescriptor};
///
/// global()
///   .declare(ServiceDescriptor::without_constructor("answer", || 42_u32))
///   .unwrap();
///
/// let answer = resolve!(u32, "answer");
/// assert_eq!(*answer, 42);
/// ```
#[macro_export]
macro_rules! resolve {
    ($type:ty, $name:expr) => {
        $crate::resolve_from!($crate::global(), $type, $name)
    };
}

/// Like [`resolve!`], against an explicit container.
///
/// ```
/// use fibre_wire::{resolve_from, Container, ServiceDescriptor};
///
/// let container = Container::new();
/// container
///   .declare(ServiceDescriptor::without_constructor("label", || String::from("local")))
///   .unwrap();
///
/// assert_eq!(*resolve_from!(container, String, "label"), "local");
/// ```
#[macro_export]
macro_rules! resolve_from {
    ($container:expr, $type:ty, $name:expr) => {{
        let name: &str = $name;
        match $container.register_as::<$type>(name) {
            Ok(service) => service,
            Err(err) => panic!(
                "Failed to resolve required service '{}' as {}: {}",
                name,
                std::any::type_name::<$type>(),
                err
            ),
        }
    }};
}

/// Registers a service in the global container and downcasts it, yielding
/// `None` on any failure.
#[macro_export]
macro_rules! maybe_resolve {
    ($type:ty, $name:expr) => {
        $crate::global().register_as::<$type>($name).ok()
    };
}
