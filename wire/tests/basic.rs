mod common;

use common::{wired_container, Database, Logger, Mailer, Report, UserService};
use fibre_wire::{instance, Args, Container, Param, ServiceDescriptor, WireError, WireResult};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

#[test]
fn test_register_twice_returns_the_same_instance() {
  let container = wired_container();

  let first = container.register("database").unwrap();
  let second = container.register("database").unwrap();

  assert!(Arc::ptr_eq(&first, &second));
  assert_eq!(container.len(), 1);
}

#[test]
fn test_register_wires_the_whole_graph() {
  let container = wired_container();

  // Report -> UserService -> (Database, Logger)
  let report = container.register_as::<Report>("report").unwrap();

  let users = container.get_as::<UserService>("userService").unwrap();
  let db = container.get_as::<Database>("database").unwrap();
  let logger = container.get_as::<Logger>("logger").unwrap();

  // The dependencies in the cache are the ones that were injected.
  assert!(Arc::ptr_eq(&report.users, &users));
  assert!(Arc::ptr_eq(&users.db, &db));
  assert!(Arc::ptr_eq(&users.logger, &logger));
  assert_eq!(
    container
      .service_names()
      .iter()
      .map(|n| n.as_str())
      .collect::<Vec<_>>(),
    ["Database", "Logger", "Report", "UserService"]
  );
}

#[test]
fn test_dependencies_are_built_before_their_dependents() {
  let built = Arc::new(Mutex::new(Vec::new()));
  let record = |name: &'static str| {
    let built = Arc::clone(&built);
    move |_: &Args| -> WireResult<&'static str> {
      built.lock().unwrap().push(name);
      Ok(name)
    }
  };

  // app -> (cache -> store, store)
  let container = Container::new();
  container
    .declare_all([
      ServiceDescriptor::constructor("app", record("app"))
        .param(Param::service("cache", "cache"))
        .param(Param::service("store", "store")),
      ServiceDescriptor::constructor("cache", record("cache")).param(Param::service("store", "store")),
      ServiceDescriptor::constructor("store", record("store")),
    ])
    .unwrap();

  container.register("app").unwrap();

  assert_eq!(*built.lock().unwrap(), ["store", "cache", "app"]);
}

#[test]
fn test_default_values_are_used_verbatim() {
  let container = wired_container();

  let users = container.register_as::<UserService>("userService").unwrap();

  assert_eq!(users.page_size, 25);
  assert_eq!(users.logger.level, "info");
}

#[test]
fn test_missing_argument_fails_and_caches_nothing_for_the_service() {
  let container = wired_container();

  let err = container.register("mailer").unwrap_err();

  match &err {
    WireError::MissingConstructorArgument { service, parameter } => {
      assert_eq!(service.as_str(), "Mailer");
      assert_eq!(parameter, "sender");
    }
    other => panic!("unexpected error: {other}"),
  }
  assert!(matches!(
    container.get("mailer"),
    Err(WireError::UnknownService { .. })
  ));
  // The dependency resolved before the failing parameter stays cached.
  assert!(container.contains("database"));
}

#[test]
fn test_get_unknown_service_fails() {
  let container = wired_container();

  match container.get("NeverRegistered") {
    Err(WireError::UnknownService { service }) => assert_eq!(service.as_str(), "NeverRegistered"),
    Err(other) => panic!("unexpected error: {other}"),
    Ok(_) => panic!("nothing was registered"),
  }
}

#[test]
fn test_get_never_resolves() {
  let container = wired_container();

  assert!(container.get("database").is_err());
  assert!(container.is_empty());
}

#[test]
fn test_names_are_normalized_for_register_and_get() {
  let container = wired_container();

  let registered = container.register("userService").unwrap();
  let fetched = container.get("UserService").unwrap();

  assert!(Arc::ptr_eq(&registered, &fetched));
}

#[test]
fn test_factory_builds_distinct_unshared_instances() {
  let container = wired_container();
  let singleton = container.register_as::<UserService>("userService").unwrap();
  let db = container.get("database").unwrap();
  let logger = container.get("logger").unwrap();

  let factory = container.factory("userService").unwrap();
  assert_eq!(factory.arity(), 3);

  let args = || vec![db.clone(), logger.clone(), instance(10u32)];
  let first = factory.create_as::<UserService>(args()).unwrap();
  let second = factory.create_as::<UserService>(args()).unwrap();

  assert!(!Arc::ptr_eq(&first, &second));
  assert!(!Arc::ptr_eq(&first, &singleton));
  assert!(!Arc::ptr_eq(&second, &singleton));
  assert_eq!(first.page_size, 10);
  // The cached singleton is untouched.
  assert!(Arc::ptr_eq(
    &container.get_as::<UserService>("userService").unwrap(),
    &singleton
  ));
}

#[test]
fn test_factory_rejects_wrong_argument_count() {
  let container = wired_container();
  let factory = container.factory("userService").unwrap();

  match factory.create(vec![instance(1u32)]) {
    Err(WireError::ArgumentCountMismatch {
      service,
      expected,
      actual,
    }) => {
      assert_eq!(service.as_str(), "UserService");
      assert_eq!(expected, 3);
      assert_eq!(actual, 1);
    }
    Err(other) => panic!("unexpected error: {other}"),
    Ok(_) => panic!("a single argument should not be accepted"),
  }
}

#[test]
fn test_factory_fills_required_parameters() {
  let container = wired_container();
  let factory = container.factory("mailer").unwrap();

  let mailer = factory
    .create_as::<Mailer>(vec![
      instance(Database { id: usize::MAX }),
      instance(String::from("noreply@example.com")),
    ])
    .unwrap();

  assert_eq!(mailer.sender, "noreply@example.com");
  assert_eq!(mailer.db.id, usize::MAX);
  assert!(!container.contains("mailer"));
}

#[test]
fn test_factory_without_constructor_takes_no_arguments() {
  let container = wired_container();
  let factory = container.factory("database").unwrap();

  assert_eq!(factory.arity(), 0);
  assert!(factory.create(vec![]).is_ok());
  assert!(matches!(
    factory.create(vec![instance(1u8)]),
    Err(WireError::ArgumentCountMismatch { expected: 0, actual: 1, .. })
  ));
}

#[test]
fn test_fully_qualified_name() {
  let container = wired_container();

  assert_eq!(
    container.fully_qualified_name("userService").unwrap().as_str(),
    "app::Userservice"
  );
  assert!(matches!(
    container.fully_qualified_name(""),
    Err(WireError::InvalidName { .. })
  ));
}
