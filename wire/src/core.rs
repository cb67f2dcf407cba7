//! Per-thread bookkeeping for in-flight resolutions.

use crate::error::{WireError, WireResult};
use crate::name::ServiceName;
use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_CONTAINER_ID: AtomicUsize = AtomicUsize::new(0);

/// Identifies one container on the resolution stack. Service names only
/// have meaning inside the container that resolves them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct ContainerId(usize);

impl ContainerId {
  pub(crate) fn next() -> Self {
    Self(NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed))
  }
}

thread_local! {
  // The services currently being resolved on this thread, outermost first.
  // A name appearing twice for the same container means its graph loops.
  static RESOLVING_STACK: RefCell<Vec<(ContainerId, ServiceName)>> = const { RefCell::new(Vec::new()) };
}

/// An RAII guard marking a service as being resolved by one container on the
/// current thread.
///
/// Entering a service that container is already resolving fails with
/// [`WireError::CircularDependency`]. Dropping the guard removes the entry.
pub(crate) struct ResolutionGuard {
  container: ContainerId,
  service: ServiceName,
}

impl ResolutionGuard {
  pub(crate) fn enter(container: ContainerId, service: &ServiceName) -> WireResult<Self> {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      if let Some(start) = stack
        .iter()
        .position(|(id, s)| *id == container && s == service)
      {
        let mut chain: Vec<ServiceName> = stack[start..]
          .iter()
          .filter(|(id, _)| *id == container)
          .map(|(_, s)| s.clone())
          .collect();
        chain.push(service.clone());
        return Err(WireError::CircularDependency { chain });
      }
      stack.push((container, service.clone()));
      Ok(Self {
        container,
        service: service.clone(),
      })
    })
  }

  /// Whether `container` has no resolution in progress on this thread.
  pub(crate) fn is_idle(container: ContainerId) -> bool {
    RESOLVING_STACK.with(|stack| stack.borrow().iter().all(|(id, _)| *id != container))
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      if let Some(pos) = stack
        .iter()
        .rposition(|(id, s)| *id == self.container && *s == self.service)
      {
        stack.remove(pos);
      }
    });
  }
}
