use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

pub enum ControlFlow {
    Continue,
    Quit,
}

/// The message pump driving the UI thread.
///
/// The handler is called with `Some(event)` for every input event and with
/// `None` whenever the poll interval elapses quietly; idle calls are where
/// the caller redraws and pumps time-based work such as the debounced save.
///
/// When events arrive the queue is drained in a burst before returning to
/// the idle path: a mouse drag emits far more motion events per frame than
/// the renderer could keep up with one-per-poll, and falling behind the
/// input stream makes dragging feel detached.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(None)? {
                return Ok(());
            }
            if self.driver.poll(self.poll_interval)? {
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(Some(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
    }
}
