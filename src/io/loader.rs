// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background file loading.
//!
//! Loads run on a worker thread and report back over a channel. Each request
//! gets a generation number; only the result of the most recent request is
//! delivered, so a slow earlier load can never overwrite a newer one.
//!
//! A ticket dropped without a result (the worker panicked) still reports
//! back, so the request never stays in flight forever.

use std::sync::mpsc::{channel, Receiver, Sender};

type Message<T> = (u64, Option<T>);

/// Completion handle for one load request.
pub struct Ticket<T> {
    generation: u64,
    sender: Option<Sender<Message<T>>>,
}

impl<T> Ticket<T> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Deliver the result. Ignored if the loader has been dropped.
    pub fn complete(mut self, value: T) {
        if let Some(sender) = self.sender.take() {
            let _ = sender.send((self.generation, Some(value)));
        }
    }
}

impl<T> Drop for Ticket<T> {
    fn drop(&mut self) {
        if let Some(sender) = self.sender.take() {
            let _ = sender.send((self.generation, None));
        }
    }
}

/// Generation-tagged receiver for background loads.
pub struct BackgroundLoader<T> {
    generation: u64,
    in_flight: bool,
    sender: Sender<Message<T>>,
    receiver: Receiver<Message<T>>,
}

impl<T> Default for BackgroundLoader<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BackgroundLoader<T> {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            generation: 0,
            in_flight: false,
            sender,
            receiver,
        }
    }

    /// Start a new request, superseding any request still in flight.
    pub fn begin(&mut self) -> Ticket<T> {
        self.generation += 1;
        self.in_flight = true;
        Ticket {
            generation: self.generation,
            sender: Some(self.sender.clone()),
        }
    }

    /// Run `job` on a worker thread as a new request.
    pub fn spawn<F>(&mut self, job: F)
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let ticket = self.begin();
        std::thread::spawn(move || ticket.complete(job()));
    }

    /// Take the current request's result if it has arrived.
    ///
    /// Stale results from superseded requests are discarded. A current
    /// request that ended without a result is logged and cleared.
    pub fn poll(&mut self) -> Option<T> {
        while let Ok((generation, value)) = self.receiver.try_recv() {
            if generation == self.generation && self.in_flight {
                self.in_flight = false;
                if value.is_none() {
                    log::error!("Background load {} ended without a result", generation);
                }
                return value;
            }
            log::debug!(
                "Dropping stale load result (generation {}, current {})",
                generation,
                self.generation
            );
        }
        None
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }
}
