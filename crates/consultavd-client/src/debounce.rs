//! Trailing-edge debounce over an unbounded channel.
//!
//! Every value sent restarts the quiet period; [`Debounced::next`] yields
//! only the last value once `delay` has passed with no newer input. When all
//! senders are dropped, a pending value still fires after its delay and the
//! stream then ends.

use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{self, Instant};

/// Creates a sender and the debounced stream of what it receives.
#[must_use]
pub fn debounced<T>(delay: Duration) -> (UnboundedSender<T>, Debounced<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, Debounced::new(rx, delay))
}

#[derive(Debug)]
pub struct Debounced<T> {
    rx: UnboundedReceiver<T>,
    delay: Duration,
    pending: Option<T>,
    deadline: Instant,
    closed: bool,
}

impl<T> Debounced<T> {
    #[must_use]
    pub fn new(rx: UnboundedReceiver<T>, delay: Duration) -> Self {
        Self {
            rx,
            delay,
            pending: None,
            deadline: Instant::now(),
            closed: false,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits for the next settled value, or `None` once the input is closed
    /// and nothing is pending.
    ///
    /// Cancel-safe: the pending value and its deadline live in `self`, so
    /// dropping this future inside `select!` loses nothing.
    pub async fn next(&mut self) -> Option<T> {
        loop {
            if self.closed {
                if self.pending.is_none() {
                    return None;
                }
                time::sleep_until(self.deadline).await;
                return self.pending.take();
            }

            if self.pending.is_none() {
                let received = self.rx.recv().await;
                self.accept(received);
                continue;
            }

            let received = tokio::select! {
                () = time::sleep_until(self.deadline) => return self.pending.take(),
                received = self.rx.recv() => received,
            };
            self.accept(received);
        }
    }

    fn accept(&mut self, received: Option<T>) {
        match received {
            Some(value) => {
                self.pending = Some(value);
                self.deadline = Instant::now() + self.delay;
            }
            None => self.closed = true,
        }
    }
}
