//! Event subscriptions with one-shot support.
//!
//! Handlers get mutable access to a host context `C` so they can schedule
//! work. Delivery is single-threaded and in subscription order.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<E, C> = Box<dyn FnMut(&E, &mut C)>;

struct Subscription<E, C> {
    id: SubscriptionId,
    once: bool,
    handler: Handler<E, C>,
}

pub struct EventBus<E, C> {
    subscriptions: Vec<Subscription<E, C>>,
    next_id: u64,
}

impl<E, C> EventBus<E, C> {
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 0,
        }
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&E, &mut C) + 'static) -> SubscriptionId {
        self.add(false, Box::new(handler))
    }

    /// Subscribe for the next event only; the subscription is dropped as
    /// soon as it has fired.
    pub fn subscribe_once(&mut self, handler: impl FnOnce(&E, &mut C) + 'static) -> SubscriptionId {
        let mut handler = Some(handler);
        self.add(
            true,
            Box::new(move |event: &E, ctx: &mut C| {
                if let Some(handler) = handler.take() {
                    handler(event, ctx);
                }
            }),
        )
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        before != self.subscriptions.len()
    }

    /// Deliver `event` to every subscriber. Returns the number of handlers run.
    pub fn emit(&mut self, event: &E, ctx: &mut C) -> usize {
        let count = self.subscriptions.len();
        self.subscriptions.retain_mut(|subscription| {
            (subscription.handler)(event, ctx);
            !subscription.once
        });
        count
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    fn add(&mut self, once: bool, handler: Handler<E, C>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription { id, once, handler });
        id
    }
}

impl<E, C> Default for EventBus<E, C> {
    fn default() -> Self {
        Self::new()
    }
}
