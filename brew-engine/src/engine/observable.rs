//! Observable state cell
//!
//! A typed last-value cell over `tokio::sync::watch`: writers publish,
//! UI-layer subscribers receive change notifications and can always read
//! the current value. Works with zero subscribers; values are retained
//! regardless.

use tokio::sync::watch;

#[derive(Debug)]
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Observable<T> {
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx }
    }

    /// Current value
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Receiver that yields on every subsequent change
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    pub(crate) fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub(crate) fn update<F: FnOnce(&mut T)>(&self, f: F) {
        self.tx.send_modify(f);
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_see_updates() {
        let cell = Observable::new(0u32);
        let mut rx = cell.subscribe();
        cell.set(7);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 7);
        assert_eq!(cell.get(), 7);
    }

    #[test]
    fn get_works_without_subscribers() {
        let cell = Observable::new("x".to_string());
        cell.update(|v| v.push('y'));
        assert_eq!(cell.get(), "xy");
    }
}
