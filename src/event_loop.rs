use std::io;
use std::time::{Duration, Instant};

use crossterm::event::Event;

use crate::drivers::InputDriver;

pub enum ControlFlow {
    Continue,
    Quit,
}

/// Drives the navbar from a single thread.
///
/// Polls the input driver and hands each event to the handler together with
/// the instant it was observed. When the poll interval elapses without input
/// the handler is called with `None`, which is where hover-close timers fire
/// and the frame is redrawn.
///
/// The loop ends when the handler returns `ControlFlow::Quit` or, for drivers
/// that run out of input, when `stop_when_idle` is set and a poll comes back
/// empty.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
    stop_when_idle: bool,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
            stop_when_idle: false,
        }
    }

    /// Finish after the first empty poll. Scripted input uses this to end the
    /// run once the script is consumed.
    pub fn stop_when_idle(mut self, stop: bool) -> Self {
        self.stop_when_idle = stop;
        self
    }

    pub fn poll(&mut self) -> io::Result<Option<Event>> {
        if self.driver.poll(self.poll_interval)? {
            Ok(Some(self.driver.read()?))
        } else {
            Ok(None)
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>, Instant) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(&mut self.driver, None, Instant::now())? {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                // Drain bursts (mouse motion, wheel) before the next tick.
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit =
                        handler(&mut self.driver, Some(event), Instant::now())?
                    {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            } else if self.stop_when_idle {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::ScriptedDriver;
    use crossterm::event::KeyCode;

    #[test]
    fn delivers_events_between_ticks_and_stops_when_idle() {
        let mut driver = ScriptedDriver::default();
        driver.key(KeyCode::Tab).key(KeyCode::Enter);
        let mut seen = Vec::new();
        let mut ticks = 0;
        EventLoop::new(driver, Duration::ZERO)
            .stop_when_idle(true)
            .run(|_, event, _| {
                match event {
                    Some(Event::Key(key)) => seen.push(key.code),
                    Some(_) => {}
                    None => ticks += 1,
                }
                Ok(ControlFlow::Continue)
            })
            .unwrap();
        assert_eq!(seen, vec![KeyCode::Tab, KeyCode::Enter]);
        assert_eq!(ticks, 2);
    }

    #[test]
    fn quit_stops_mid_burst() {
        let mut driver = ScriptedDriver::default();
        driver.key(KeyCode::Char('q')).key(KeyCode::Enter);
        let mut event_loop = EventLoop::new(driver, Duration::ZERO);
        event_loop
            .run(|_, event, _| {
                Ok(match event {
                    Some(_) => ControlFlow::Quit,
                    None => ControlFlow::Continue,
                })
            })
            .unwrap();
        assert_eq!(event_loop.driver().remaining(), 1);
    }
}
