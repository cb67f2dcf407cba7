//! Service names and their fully qualified form.

use crate::error::{WireError, WireResult};
use std::fmt;
use std::sync::Arc;

/// A normalized service key: the given name with its first letter upper-cased.
///
/// Normalization is idempotent, so `ServiceName::new` accepts both raw and
/// already-normalized input and yields the same key.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceName(Arc<str>);

impl ServiceName {
  /// Normalizes `name`. Empty names and names containing whitespace are rejected.
  pub fn new(name: &str) -> WireResult<Self> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
      return Err(WireError::InvalidName {
        name: name.to_owned(),
      });
    }
    Ok(Self(capitalize(name).into()))
  }

  /// Derives a service name from a declared type name by removing a trailing
  /// `suffix`, e.g. `DatabaseModel` becomes `Database`.
  ///
  /// The suffix is kept when stripping it would leave nothing behind.
  pub fn from_type_name(type_name: &str, suffix: Option<&str>) -> WireResult<Self> {
    let stripped = suffix
      .filter(|s| !s.is_empty())
      .and_then(|s| type_name.strip_suffix(s))
      .filter(|rest| !rest.is_empty())
      .unwrap_or(type_name);
    Self::new(stripped)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ServiceName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl fmt::Debug for ServiceName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "ServiceName({})", self.0)
  }
}

impl AsRef<str> for ServiceName {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

/// The namespaced identity a service name resolves to in a [`Reflector`](crate::Reflector).
///
/// The type part is the name lower-cased with its first letter capitalized,
/// so `userService`, `UserService` and `USERSERVICE` all qualify to
/// `app::Userservice`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName(Arc<str>);

impl QualifiedName {
  pub fn new(namespace: &str, name: &ServiceName) -> Self {
    let type_part = capitalize(&name.as_str().to_lowercase());
    if namespace.is_empty() {
      Self(type_part.into())
    } else {
      Self(format!("{}::{}", namespace, type_part).into())
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// The part after the last `::`.
  pub fn type_part(&self) -> &str {
    self.0.rsplit("::").next().unwrap_or(&self.0)
  }
}

impl fmt::Display for QualifiedName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl fmt::Debug for QualifiedName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "QualifiedName({})", self.0)
  }
}

fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}
