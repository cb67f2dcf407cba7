//! Wires an application from its root service and reports failures.
//!
//! Run with `RUST_LOG=fibre_wire=debug` to see each service being constructed.

use fibre_wire::{global, Param, ServiceDescriptor, WireResult};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

struct Settings {
  dsn: String,
}

struct Database {
  settings: Arc<Settings>,
  pool_size: u32,
}

fn declare_services() -> WireResult<()> {
  global().declare_all([
    ServiceDescriptor::constructor("settings", |args| Ok(Settings { dsn: args.value(0)? }))
      .param(Param::with_default("dsn", String::from("postgres://localhost/app"))),
    ServiceDescriptor::constructor("database", |args| {
      Ok(Database {
        settings: args.get(0)?,
        pool_size: args.value(1)?,
      })
    })
    .param(Param::of_type("settings", "SettingsModel"))
    .param(Param::with_default("pool_size", 8_u32)),
  ])
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  if let Err(err) = declare_services() {
    eprintln!("{err}");
    return;
  }

  match global().register_as::<Database>("database") {
    Ok(db) => println!(
      "database ready: {} ({} connections)",
      db.settings.dsn, db.pool_size
    ),
    Err(err) => eprintln!("{err}"),
  }
}
