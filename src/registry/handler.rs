//! Channel handler trait
//!
//! Handlers are invoked synchronously by [`Mediator::trigger`] and
//! [`Mediator::broadcast`]. Every handler receives the mediator that is
//! dispatching, so it can register, remove or dispatch further channels
//! from inside the call.
//!
//! Any `Fn(&mut Mediator<D>, &D) -> HandlerResult` closure is a handler and
//! is usually registered with [`Mediator::on`]. A callback that needs a bound
//! execution context is registered through [`Mediator::on_with`], which pairs
//! the context with the callback in a [`Bound`] handler. Other types
//! implementing [`Handler`] go through [`Mediator::on_handler`].

use super::error::HandlerResult;
use super::store::Mediator;

/// Callback invoked when a channel is dispatched
pub trait Handler<D>: Send + Sync + 'static {
    /// Handle a dispatched payload
    fn handle(&self, mediator: &mut Mediator<D>, data: &D) -> HandlerResult;
}

impl<D, F> Handler<D> for F
where
    D: 'static,
    F: Fn(&mut Mediator<D>, &D) -> HandlerResult + Send + Sync + 'static,
{
    fn handle(&self, mediator: &mut Mediator<D>, data: &D) -> HandlerResult {
        self(mediator, data)
    }
}

/// A callback paired with the context it is invoked with
pub struct Bound<C, F> {
    context: C,
    callback: F,
}

impl<C, F> Bound<C, F> {
    /// Bind a context to a callback
    pub fn new(context: C, callback: F) -> Self {
        Self { context, callback }
    }

    /// Get the bound context
    pub fn context(&self) -> &C {
        &self.context
    }
}

impl<D, C, F> Handler<D> for Bound<C, F>
where
    D: 'static,
    C: Send + Sync + 'static,
    F: Fn(&C, &mut Mediator<D>, &D) -> HandlerResult + Send + Sync + 'static,
{
    fn handle(&self, mediator: &mut Mediator<D>, data: &D) -> HandlerResult {
        (self.callback)(&self.context, mediator, data)
    }
}
