use std::{fmt, sync::Arc};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndEvent {
    pub winner: usize,
}

/// Notified once, on the action that empties a hand.
pub trait EndObserver {
    fn on_end(&self, event: &EndEvent);
}

impl<F> EndObserver for F
where
    F: Fn(&EndEvent),
{
    fn on_end(&self, event: &EndEvent) {
        self(event)
    }
}

#[derive(Clone, Default)]
pub(crate) struct Observers(Vec<Arc<dyn EndObserver + Send + Sync>>);

impl Observers {
    pub(crate) fn push(&mut self, observer: Arc<dyn EndObserver + Send + Sync>) {
        self.0.push(observer);
    }

    pub(crate) fn notify(&self, event: &EndEvent) {
        for observer in &self.0 {
            observer.on_end(event);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Observers({})", self.0.len())
    }
}
