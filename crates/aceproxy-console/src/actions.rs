// Action dispatch registry

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{ConsoleError, Result};

pub type ActionFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;

type Handler = Arc<dyn Fn(String) -> ActionFuture + Send + Sync>;

/// Registry mapping symbolic action identifiers to handler closures.
///
/// View markup refers to actions by id only; the wiring lives here and
/// is validated at startup with `verify`. Dispatching an unregistered
/// action is an error, never a silent no-op, and an id cannot be
/// registered twice.
#[derive(Default)]
pub struct ActionRegistry {
    handlers: RwLock<HashMap<String, Handler>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. The argument passed to the closure is the
    /// action's payload (usually an entity name).
    pub fn register<F>(&self, id: &str, handler: F) -> Result<()>
    where
        F: Fn(String) -> ActionFuture + Send + Sync + 'static,
    {
        let mut handlers = self.handlers.write();
        if handlers.contains_key(id) {
            return Err(ConsoleError::DuplicateAction(id.to_string()));
        }
        handlers.insert(id.to_string(), Arc::new(handler));
        Ok(())
    }

    /// Invoke the handler registered under `id`.
    pub async fn dispatch(&self, id: &str, argument: &str) -> Result<()> {
        let handler = self
            .handlers
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| ConsoleError::UnknownAction(id.to_string()))?;
        handler(argument.to_string()).await
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.handlers.read().contains_key(id)
    }

    /// Startup check: every id the views refer to must have a handler.
    pub fn verify(&self, expected: &[&str]) -> Result<()> {
        let handlers = self.handlers.read();
        for id in expected {
            if !handlers.contains_key(*id) {
                return Err(ConsoleError::UnknownAction((*id).to_string()));
            }
        }
        Ok(())
    }
}
