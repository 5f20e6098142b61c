use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::InputDriver;

/// Replays a fixed list of events, then reports end of input.
///
/// Used by tests and by `--script` style demos to drive the navbar without a
/// terminal attached.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    events: VecDeque<Event>,
}

impl ScriptedDriver {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn key(&mut self, code: KeyCode) -> &mut Self {
        self.push(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
        self
    }

    pub fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) -> &mut Self {
        self.push(Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }));
        self
    }

    /// Press and release the left button on one cell.
    pub fn click(&mut self, column: u16, row: u16) -> &mut Self {
        self.mouse(MouseEventKind::Down(MouseButton::Left), column, row)
            .mouse(MouseEventKind::Up(MouseButton::Left), column, row)
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl InputDriver for ScriptedDriver {
    fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> io::Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_in_order_then_reports_eof() {
        let mut d = ScriptedDriver::default();
        d.key(KeyCode::Tab).click(3, 0);
        assert_eq!(d.remaining(), 3);
        assert!(d.poll(Duration::ZERO).unwrap());
        assert!(matches!(d.read().unwrap(), Event::Key(k) if k.code == KeyCode::Tab));
        assert!(matches!(
            d.read().unwrap(),
            Event::Mouse(m) if m.kind == MouseEventKind::Down(MouseButton::Left)
        ));
        d.read().unwrap();
        assert!(!d.poll(Duration::ZERO).unwrap());
        assert_eq!(d.read().unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn blanket_impl_for_mut_ref_works() {
        fn poll_and_read<D: InputDriver>(mut driver: D) -> io::Result<Event> {
            assert!(driver.poll(Duration::ZERO)?);
            driver.read()
        }
        let mut d = ScriptedDriver::new([Event::FocusGained]);
        assert!(matches!(poll_and_read(&mut d).unwrap(), Event::FocusGained));
        assert_eq!(d.remaining(), 0);
    }
}
