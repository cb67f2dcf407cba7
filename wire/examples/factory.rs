use fibre_wire::{instance, Container, Param, ServiceDescriptor};
use std::sync::Arc;

struct Connection {
  host: String,
  port: u16,
}

fn main() {
  let container = Container::new();
  container
    .declare(
      ServiceDescriptor::constructor("connection", |args| {
        Ok(Connection {
          host: args.value(0)?,
          port: args.value(1)?,
        })
      })
      .param(Param::with_default("host", String::from("localhost")))
      .param(Param::with_default("port", 5432_u16)),
    )
    .unwrap();

  // --- Singleton ---
  let shared = container.register_as::<Connection>("connection").unwrap();
  let again = container.get_as::<Connection>("connection").unwrap();
  println!("singleton: {}:{}", shared.host, shared.port);
  assert!(Arc::ptr_eq(&shared, &again), "register and get share one instance");

  // --- Factory ---
  let factory = container.factory("connection").unwrap();
  let replica = factory
    .create_as::<Connection>(vec![instance(String::from("replica")), instance(5433_u16)])
    .unwrap();
  println!("fresh: {}:{}", replica.host, replica.port);
  assert!(!Arc::ptr_eq(&shared, &replica), "factories never hand out the singleton");

  match factory.create(vec![instance(String::from("too-few"))]) {
    Ok(_) => unreachable!("one argument is not enough"),
    Err(err) => println!("rejected: {err}"),
  }
}
