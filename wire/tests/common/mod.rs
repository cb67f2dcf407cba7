#![allow(dead_code)]

use fibre_wire::{Container, Param, ServiceDescriptor};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// --- Test Fixtures ---

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

fn next_id() -> usize {
  NEXT_ID.fetch_add(1, Ordering::SeqCst)
}

/// Built without a constructor.
#[derive(Debug)]
pub struct Database {
  pub id: usize,
}

/// Built from a default-valued parameter only.
#[derive(Debug)]
pub struct Logger {
  pub level: String,
}

/// Depends on `Database` by name and on `Logger` through a declared type.
#[derive(Debug)]
pub struct UserService {
  pub db: Arc<Database>,
  pub logger: Arc<Logger>,
  pub page_size: u32,
}

/// Depends on `UserService`, so `Report -> UserService -> Database`.
#[derive(Debug)]
pub struct Report {
  pub users: Arc<UserService>,
}

/// Has a parameter nothing can fill.
#[derive(Debug)]
pub struct Mailer {
  pub db: Arc<Database>,
  pub sender: String,
}

pub fn database() -> ServiceDescriptor {
  ServiceDescriptor::without_constructor("database", || Database { id: next_id() })
}

pub fn logger() -> ServiceDescriptor {
  ServiceDescriptor::constructor("logger", |args| {
    Ok(Logger {
      level: args.value(0)?,
    })
  })
  .param(Param::with_default("level", String::from("info")))
}

pub fn user_service() -> ServiceDescriptor {
  ServiceDescriptor::constructor("userService", |args| {
    Ok(UserService {
      db: args.get(0)?,
      logger: args.get(1)?,
      page_size: args.value(2)?,
    })
  })
  .param(Param::service("db", "database"))
  .param(Param::of_type("logger", "LoggerModel"))
  .param(Param::with_default("page_size", 25u32))
}

pub fn report() -> ServiceDescriptor {
  ServiceDescriptor::constructor("report", |args| Ok(Report { users: args.get(0)? }))
    .param(Param::service("users", "userService"))
}

pub fn mailer() -> ServiceDescriptor {
  ServiceDescriptor::constructor("mailer", |args| {
    Ok(Mailer {
      db: args.get(0)?,
      sender: args.value(1)?,
    })
  })
  .param(Param::service("db", "database"))
  .param(Param::required("sender"))
}

/// A container with every fixture declared and nothing resolved.
pub fn wired_container() -> Container {
  let container = Container::new();
  container
    .declare_all([database(), logger(), user_service(), report(), mailer()])
    .unwrap();
  container
}
