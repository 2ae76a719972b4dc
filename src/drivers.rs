use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::Event;

pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }
}

/// Crossterm-backed input with a small local queue so callers can peek
/// ahead or push events back without touching the terminal.
#[derive(Default)]
pub struct ConsoleInput {
    event_queue: VecDeque<Event>,
}

impl ConsoleInput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputDriver for ConsoleInput {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        if !self.event_queue.is_empty() {
            return Ok(true);
        }
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        if let Some(event) = self.event_queue.pop_front() {
            return Ok(event);
        }
        crossterm::event::read()
    }
}
