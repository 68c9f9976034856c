/// A single-threaded observable value holder: one writer, any number of
/// subscribed callbacks. Callbacks run synchronously after each mutation
/// with a borrow of the new value.
pub struct Signal<T> {
    value: T,
    subscribers: Vec<Box<dyn FnMut(&T)>>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            subscribers: Vec::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
        self.notify();
    }

    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
        self.notify();
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&T) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    fn notify(&mut self) {
        for subscriber in &mut self.subscribers {
            subscriber(&self.value);
        }
    }
}

impl<T: Default> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn get_returns_current_value() {
        let mut signal = Signal::new(1);
        assert_eq!(*signal.get(), 1);
        signal.set(2);
        assert_eq!(*signal.get(), 2);
    }

    #[test]
    fn set_and_update_notify_subscribers() {
        let seen = Rc::new(Cell::new(0));
        let mut signal = Signal::new(Vec::<i32>::new());
        let sink = Rc::clone(&seen);
        signal.subscribe(move |v| sink.set(v.len()));

        signal.set(vec![1, 2]);
        assert_eq!(seen.get(), 2);

        signal.update(|v| v.push(3));
        assert_eq!(seen.get(), 3);
    }

    #[test]
    fn subscribing_does_not_fire_immediately() {
        let fired = Rc::new(Cell::new(false));
        let mut signal = Signal::new(0);
        let sink = Rc::clone(&fired);
        signal.subscribe(move |_| sink.set(true));
        assert!(!fired.get());
    }
}
