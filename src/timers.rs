use std::future::Future;
use tokio::task::JoinHandle;
use tracing::debug;


// Which list a pending callback belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerScope {
    Animation,
    Cooking,
}


// Every delayed callback of a screen, cancelled together on teardown
#[derive(Debug, Default)]
pub struct TimerRegistry {
    animation: Vec<JoinHandle<()>>,
    cooking: Vec<JoinHandle<()>>,
}


impl TimerRegistry {
    fn list_mut(&mut self, scope: TimerScope) -> &mut Vec<JoinHandle<()>> {
        match scope {
            TimerScope::Animation => &mut self.animation,
            TimerScope::Cooking => &mut self.cooking,
        }
    }

    // Spawn a callback on the runtime and keep its handle
    pub fn spawn<F>(&mut self, scope: TimerScope, callback: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(callback);
        self.track(scope, handle);
    }

    pub fn track(&mut self, scope: TimerScope, handle: JoinHandle<()>) {
        let list = self.list_mut(scope);
        list.retain(|h| !h.is_finished());
        list.push(handle);
    }

    // Callbacks of a scope that have not run to completion yet
    pub fn pending(&self, scope: TimerScope) -> usize {
        let list = match scope {
            TimerScope::Animation => &self.animation,
            TimerScope::Cooking => &self.cooking,
        };
        list.iter().filter(|h| !h.is_finished()).count()
    }

    // Abort everything in both lists; returns how many were still pending
    pub fn cancel_all(&mut self) -> usize {
        let mut cancelled = 0;
        for handle in self.animation.drain(..).chain(self.cooking.drain(..)) {
            if !handle.is_finished() {
                cancelled += 1;
            }
            handle.abort();
        }
        if cancelled > 0 {
            debug!(cancelled, "cancelled pending timers");
        }
        cancelled
    }

    // Start from empty lists before first use
    pub fn reset(&mut self) {
        self.cancel_all();
    }
}


impl Drop for TimerRegistry {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
