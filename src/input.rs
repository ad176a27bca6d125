use crate::motion::Heading;

/// Latest heading requested by whatever captures keys or touches.
pub trait InputSource {
    fn current_heading(&self) -> Heading;
}

/// Logical keys the host forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Toggles pause.
    Pause,
    /// Restarts after game over.
    Confirm,
}

/// One-shot commands produced by non-direction keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Confirm,
}

/// Last-pressed-wins heading latch plus a queue of edge-triggered commands.
#[derive(Debug, Default)]
pub struct LatchedInput {
    heading: Heading,
    commands: Vec<Command>,
}

impl LatchedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::Up => self.heading = Heading::Up,
            Key::Down => self.heading = Heading::Down,
            Key::Left => self.heading = Heading::Left,
            Key::Right => self.heading = Heading::Right,
            Key::Pause => self.commands.push(Command::TogglePause),
            Key::Confirm => self.commands.push(Command::Confirm),
        }
    }

    /// Take pending commands in press order.
    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }
}

impl InputSource for LatchedInput {
    fn current_heading(&self) -> Heading {
        self.heading
    }
}

impl InputSource for Heading {
    fn current_heading(&self) -> Heading {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_pressed_heading_wins() {
        let mut input = LatchedInput::new();
        assert_eq!(input.current_heading(), Heading::None);
        input.press(Key::Left);
        input.press(Key::Up);
        assert_eq!(input.current_heading(), Heading::Up);
        // Latched, not consumed by reading.
        assert_eq!(input.current_heading(), Heading::Up);
    }

    #[test]
    fn commands_drain_once() {
        let mut input = LatchedInput::new();
        input.press(Key::Pause);
        input.press(Key::Right);
        input.press(Key::Confirm);
        assert_eq!(
            input.drain_commands(),
            vec![Command::TogglePause, Command::Confirm]
        );
        assert!(input.drain_commands().is_empty());
        assert_eq!(input.current_heading(), Heading::Right);
    }
}
