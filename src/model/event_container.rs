use std::any::Any;
use std::borrow::Cow;
use std::cell::RefCell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use thiserror::Error;
use tracing::{error, trace};

pub type Handler<E> = Rc<dyn Fn(&E) -> anyhow::Result<bool>>;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("event handler `{name}` failed: {source}")]
    Failed {
        name: Cow<'static, str>,
        #[source]
        source: anyhow::Error,
    },
    #[error("event handler `{name}` panicked: {message}")]
    Panicked {
        name: Cow<'static, str>,
        message: String,
    },
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Ordered, named event handlers.
///
/// Handlers run in registration order. A handler that errors or panics is
/// logged and skipped; the rest still run. Handlers may add or remove
/// handlers while an event is being dispatched: the list is re-read by index
/// on every step, so a handler added mid-dispatch runs in the same pass only
/// if it lands after the current position.
pub struct EventContainer<E> {
    handlers: RefCell<Vec<(Cow<'static, str>, Handler<E>)>>,
}

impl<E> Default for EventContainer<E> {
    fn default() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }
}

impl<E> EventContainer<E> {
    pub fn new() -> Self { Self::default() }

    pub fn add(
        &self,
        name: impl Into<Cow<'static, str>>,
        handler: impl Fn(&E) -> anyhow::Result<bool> + 'static,
    ) {
        self.handlers.borrow_mut().push((name.into(), Rc::new(handler)));
    }

    /// Removes the first handler registered under `name`.
    pub fn remove(&self, name: &str) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let Some(index) = handlers.iter().position(|(n, _)| n == name) else {
            return false;
        };
        handlers.remove(index);
        true
    }

    pub fn clear(&self) { self.handlers.borrow_mut().clear() }

    pub fn len(&self) -> usize { self.handlers.borrow().len() }

    pub fn is_empty(&self) -> bool { self.handlers.borrow().is_empty() }

    pub fn names(&self) -> Vec<Cow<'static, str>> {
        self.handlers.borrow().iter().map(|(n, _)| n.clone()).collect()
    }

    /// Runs every handler and returns whether any of them handled the event.
    pub fn handle_event(&self, event: &E) -> bool {
        let mut handled = false;
        let mut index = 0;
        loop {
            let Some((name, handler)) = self.handlers.borrow().get(index).cloned() else {
                break;
            };
            index += 1;

            match catch_unwind(AssertUnwindSafe(|| handler(event))) {
                Ok(Ok(result)) => {
                    trace!(%name, result, "event handled");
                    handled |= result;
                }
                Ok(Err(source)) => {
                    let err = HandlerError::Failed { name, source };
                    error!("{err}");
                }
                Err(payload) => {
                    let err = HandlerError::Panicked {
                        name,
                        message: panic_message(payload.as_ref()),
                    };
                    error!("{err}");
                }
            }
        }
        handled
    }
}
