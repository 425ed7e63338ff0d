//! Keyboard input types
//!
//! A small, backend-neutral view of GLFW key events. Escape is the only key
//! the engine reacts to; Q passes through as an ordinary key event.
//! Everything else is dropped during translation.

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Escape key; releasing it closes the window
    Escape,
    /// Q key
    Q,
}

impl KeyCode {
    /// Map a GLFW key, if the engine knows it
    pub fn from_glfw(key: glfw::Key) -> Option<Self> {
        match key {
            glfw::Key::Escape => Some(Self::Escape),
            glfw::Key::Q => Some(Self::Q),
            _ => None,
        }
    }
}

/// What happened to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Key went down
    Press,
    /// Key came up
    Release,
    /// Key held long enough to auto-repeat
    Repeat,
}

impl From<glfw::Action> for KeyAction {
    fn from(action: glfw::Action) -> Self {
        match action {
            glfw::Action::Press => Self::Press,
            glfw::Action::Release => Self::Release,
            glfw::Action::Repeat => Self::Repeat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys_map() {
        assert_eq!(KeyCode::from_glfw(glfw::Key::Escape), Some(KeyCode::Escape));
        assert_eq!(KeyCode::from_glfw(glfw::Key::Q), Some(KeyCode::Q));
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        assert_eq!(KeyCode::from_glfw(glfw::Key::F12), None);
        assert_eq!(KeyCode::from_glfw(glfw::Key::W), None);
        assert_eq!(KeyCode::from_glfw(glfw::Key::Space), None);
        assert_eq!(KeyCode::from_glfw(glfw::Key::Unknown), None);
    }

    #[test]
    fn test_actions_map_one_to_one() {
        assert_eq!(KeyAction::from(glfw::Action::Press), KeyAction::Press);
        assert_eq!(KeyAction::from(glfw::Action::Release), KeyAction::Release);
        assert_eq!(KeyAction::from(glfw::Action::Repeat), KeyAction::Repeat);
    }
}
