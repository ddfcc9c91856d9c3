//! Push-based change notification.
//!
//! [`Subject`] is a multicast event stream without replay. [`BehaviorSubject`]
//! additionally remembers the latest value and hands it to every new
//! subscriber straight away. Publishers keep the subject; observers only ever
//! see the read-only [`Observable`] and [`Watch`] views.
//!
//! Listeners are called after the registry lock is released, so a listener
//! may subscribe or drop subscriptions from inside its callback.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Registry<T> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

impl<T> Registry<T> {
    fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }
}

type SharedRegistry<T> = Arc<Mutex<Registry<T>>>;

fn lock<T>(registry: &Mutex<Registry<T>>) -> MutexGuard<'_, Registry<T>> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

fn register<T: 'static>(registry: &SharedRegistry<T>, listener: Listener<T>) -> Subscription {
    let id = {
        let mut guard = lock(registry);
        let id = guard.next_id;
        guard.next_id += 1;
        guard.listeners.push((id, listener));
        id
    };

    let weak: Weak<Mutex<Registry<T>>> = Arc::downgrade(registry);
    Subscription {
        cancel: Some(Box::new(move || {
            if let Some(registry) = weak.upgrade() {
                lock(&registry).listeners.retain(|(other, _)| *other != id);
            }
        })),
    }
}

fn snapshot<T>(registry: &SharedRegistry<T>) -> Vec<Listener<T>> {
    lock(registry)
        .listeners
        .iter()
        .map(|(_, listener)| Arc::clone(listener))
        .collect()
}

/// Handle for one registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Remove the listener now.
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Multicast event stream. Late subscribers miss earlier events.
pub struct Subject<T> {
    registry: SharedRegistry<T>,
}

impl<T: 'static> Subject<T> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry::new())),
        }
    }

    /// Deliver `value` to every current listener, in subscription order.
    pub fn emit(&self, value: &T) {
        for listener in snapshot(&self.registry) {
            listener(value);
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        register(&self.registry, Arc::new(listener))
    }

    /// Read-only view for handing out to observers.
    pub fn observable(&self) -> Observable<T> {
        Observable {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<T> Subject<T> {
    /// Live subscriptions, including ones added through an [`Observable`].
    pub fn listener_count(&self) -> usize {
        lock(&self.registry).listeners.len()
    }
}

impl<T: 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Subscribe-only side of a [`Subject`].
pub struct Observable<T> {
    registry: SharedRegistry<T>,
}

impl<T: 'static> Observable<T> {
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        register(&self.registry, Arc::new(listener))
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<T> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Observable")
    }
}

/// Latest-value stream: remembers the last value and replays it on subscribe.
pub struct BehaviorSubject<T> {
    current: Arc<Mutex<T>>,
    subject: Subject<T>,
}

impl<T: Clone + Send + 'static> BehaviorSubject<T> {
    pub fn new(initial: T) -> Self {
        Self {
            current: Arc::new(Mutex::new(initial)),
            subject: Subject::new(),
        }
    }

    /// Store `value` as the latest and push it to all listeners.
    pub fn next(&self, value: T) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = value.clone();
        self.subject.emit(&value);
    }

    pub fn value(&self) -> T {
        read_current(&self.current)
    }

    /// Register `listener` and immediately hand it the latest value.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        subscribe_with_replay(&self.current, &self.subject.registry, Arc::new(listener))
    }

    /// Read-only view for handing out to observers.
    pub fn watch(&self) -> Watch<T> {
        Watch {
            current: Arc::clone(&self.current),
            registry: Arc::clone(&self.subject.registry),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for BehaviorSubject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorSubject")
            .field("current", &*self.current.lock().unwrap_or_else(PoisonError::into_inner))
            .field("subject", &self.subject)
            .finish()
    }
}

fn read_current<T: Clone>(current: &Mutex<T>) -> T {
    current.lock().unwrap_or_else(PoisonError::into_inner).clone()
}

fn subscribe_with_replay<T: Clone + 'static>(
    current: &Mutex<T>,
    registry: &SharedRegistry<T>,
    listener: Listener<T>,
) -> Subscription {
    let subscription = register(registry, Arc::clone(&listener));
    let latest = read_current(current);
    listener(&latest);
    subscription
}

/// Subscribe-only side of a [`BehaviorSubject`].
pub struct Watch<T> {
    current: Arc<Mutex<T>>,
    registry: SharedRegistry<T>,
}

impl<T: Clone + 'static> Watch<T> {
    /// Register `listener`; it is called right away with the latest value.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        subscribe_with_replay(&self.current, &self.registry, Arc::new(listener))
    }

    pub fn get(&self) -> T {
        read_current(&self.current)
    }
}

impl<T> Clone for Watch<T> {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Watch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Watch")
            .field(&*self.current.lock().unwrap_or_else(PoisonError::into_inner))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder<T: Clone + Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(&T) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |value: &T| sink.lock().unwrap().push(value.clone()))
    }

    #[test]
    fn test_subject_fans_out_to_all_listeners() {
        let subject = Subject::new();
        let (a, listen_a) = recorder::<u32>();
        let (b, listen_b) = recorder::<u32>();
        let _sa = subject.subscribe(listen_a);
        let _sb = subject.observable().subscribe(listen_b);

        subject.emit(&7);

        assert_eq!(*a.lock().unwrap(), vec![7]);
        assert_eq!(*b.lock().unwrap(), vec![7]);
    }

    #[test]
    fn test_subject_has_no_replay() {
        let subject = Subject::new();
        subject.emit(&1);
        let (seen, listen) = recorder::<u32>();
        let _sub = subject.subscribe(listen);
        subject.emit(&2);
        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let subject = Subject::new();
        let (seen, listen) = recorder::<u32>();
        let sub = subject.subscribe(listen);
        subject.emit(&1);
        drop(sub);
        subject.emit(&2);
        assert_eq!(*seen.lock().unwrap(), vec![1]);
        assert_eq!(subject.listener_count(), 0);
    }

    #[test]
    fn test_explicit_unsubscribe() {
        let subject = Subject::new();
        let (seen, listen) = recorder::<u32>();
        subject.subscribe(listen).unsubscribe();
        subject.emit(&1);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_behavior_subject_replays_latest() {
        let state = BehaviorSubject::new(1);
        state.next(2);
        state.next(3);
        let (seen, listen) = recorder::<u32>();
        let _sub = state.watch().subscribe(listen);
        assert_eq!(*seen.lock().unwrap(), vec![3]);
        state.next(4);
        assert_eq!(*seen.lock().unwrap(), vec![3, 4]);
        assert_eq!(state.value(), 4);
        assert_eq!(state.watch().get(), 4);
    }

    #[test]
    fn test_listener_may_subscribe_reentrantly() {
        let subject = Arc::new(Subject::<u32>::new());
        let inner_subs = Arc::new(Mutex::new(Vec::new()));
        let handle = Arc::clone(&subject);
        let store = Arc::clone(&inner_subs);
        let _outer = subject.subscribe(move |_| {
            let sub = handle.subscribe(|_| {});
            store.lock().unwrap().push(sub);
        });

        subject.emit(&1);

        assert_eq!(subject.listener_count(), 2);
    }

    #[test]
    fn test_subscription_outliving_subject_is_harmless() {
        let subject = Subject::<u32>::new();
        let sub = subject.subscribe(|_| {});
        drop(subject);
        drop(sub);
    }
}
