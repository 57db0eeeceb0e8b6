//! `setTimeout`-backed scheduler.

use crate::core::session::Scheduler;
use gloo_timers::callback::Timeout;
use std::time::Duration;

/// [`Scheduler`] over `gloo_timers`; scheduled tasks always run.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, move || task()).forget();
    }
}
