//! # Fibre Wire
//!
//! An eager, name-keyed dependency injection container.
//!
//! Services are declared with a [`ServiceDescriptor`]: a name plus a
//! constructor whose parameters are either other services (resolved
//! recursively by name) or default values. Calling
//! [`Container::register`] builds the requested service and its whole
//! dependency graph depth-first, and keeps every node as a singleton.
//! [`Container::get`] then returns those singletons without ever
//! constructing anything, and [`Container::factory`] builds fresh,
//! unshared instances from explicit arguments.
//!
//! ## Core Concepts
//!
//! - **Container**: owns the declarations (through a [`Reflector`], by
//!   default a [`Catalog`]) and the resolved singletons.
//! - **Service names**: case-normalized keys; the first letter is upper-cased.
//! - **Errors**: every operation returns a [`WireResult`]. Missing
//!   constructor arguments, unknown services and dependency cycles are
//!   reported as typed [`WireError`]s naming the offending service.
//! - **Global container**: [`global()`] for bootstraps that need one.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_wire::{Container, Param, ServiceDescriptor};
//! use std::sync::Arc;
//!
//! struct Database {
//!   url: String,
//! }
//!
//! struct UserRepository {
//!   db: Arc<Database>,
//! }
//!
//! let container = Container::new();
//! container
//!   .declare(
//!     ServiceDescriptor::constructor("database", |args| {
//!       Ok(Database { url: args.value(0)? })
//!     })
//!     .param(Param::with_default("url", String::from("postgres://localhost/app"))),
//!   )
//!   .unwrap();
//! container
//!   .declare(
//!     ServiceDescriptor::constructor("userRepository", |args| {
//!       Ok(UserRepository { db: args.get(0)? })
//!     })
//!     .param(Param::service("db", "database")),
//!   )
//!   .unwrap();
//!
//! let repo = container.register_as::<UserRepository>("userRepository").unwrap();
//! let db = container.get_as::<Database>("database").unwrap();
//!
//! assert!(Arc::ptr_eq(&repo.db, &db));
//! assert_eq!(db.url, "postgres://localhost/app");
//! ```

mod builder;
mod container;
mod core;
mod descriptor;
mod error;
mod factory;
mod global;
mod macros;
mod name;
mod reflector;

pub use builder::{ContainerBuilder, ContainerConfig, DEFAULT_NAMESPACE, DEFAULT_TYPE_SUFFIX};
pub use container::Container;
pub use descriptor::{instance, Args, Constructor, Instance, Param, ParamKind, ServiceDescriptor};
pub use error::{WireError, WireResult};
pub use factory::Factory;
pub use global::global;
pub use name::{QualifiedName, ServiceName};
pub use reflector::{Catalog, Reflector};
