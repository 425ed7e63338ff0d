//! Window events delivered by each polling pass
//!
//! The window backend drains its queue once per frame and hands the render
//! loop a plain list of [`AppEvent`]s. Nothing is dispatched through
//! callbacks, so events are handled in order on the loop's own thread.

use crate::input::{KeyAction, KeyCode};

/// Application events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Window was resized
    WindowResized {
        /// New window width
        width: u32,
        /// New window height
        height: u32,
    },

    /// Framebuffer was resized
    FramebufferResized {
        /// New framebuffer width in pixels
        width: u32,
        /// New framebuffer height in pixels
        height: u32,
    },

    /// Window close requested (close button, Alt+F4, ...)
    WindowCloseRequested,

    /// Key input event
    KeyInput {
        /// The key that changed
        key: KeyCode,
        /// Press, release or repeat
        action: KeyAction,
    },
}

impl AppEvent {
    /// Translate a raw GLFW event. Events the engine does not track yield `None`.
    pub fn from_glfw(event: &glfw::WindowEvent) -> Option<Self> {
        match *event {
            glfw::WindowEvent::Close => Some(Self::WindowCloseRequested),
            glfw::WindowEvent::Size(width, height) => Some(Self::WindowResized {
                width: clamp_dimension(width),
                height: clamp_dimension(height),
            }),
            glfw::WindowEvent::FramebufferSize(width, height) => Some(Self::FramebufferResized {
                width: clamp_dimension(width),
                height: clamp_dimension(height),
            }),
            glfw::WindowEvent::Key(key, _, action, _) => KeyCode::from_glfw(key).map(|key| Self::KeyInput {
                key,
                action: action.into(),
            }),
            _ => None,
        }
    }

    /// Releasing Escape asks the window to close
    pub fn is_quit_request(&self) -> bool {
        matches!(
            self,
            Self::KeyInput {
                key: KeyCode::Escape,
                action: KeyAction::Release,
            }
        )
    }
}

fn clamp_dimension(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glfw::{Action, Key, Modifiers, WindowEvent};

    #[test]
    fn test_close_event_translates() {
        assert_eq!(AppEvent::from_glfw(&WindowEvent::Close), Some(AppEvent::WindowCloseRequested));
    }

    #[test]
    fn test_escape_release_is_quit_request() {
        let event = AppEvent::from_glfw(&WindowEvent::Key(Key::Escape, 9, Action::Release, Modifiers::empty()))
            .unwrap();
        assert!(event.is_quit_request());
    }

    #[test]
    fn test_escape_press_and_repeat_do_not_quit() {
        for action in [Action::Press, Action::Repeat] {
            let event = AppEvent::from_glfw(&WindowEvent::Key(Key::Escape, 9, action, Modifiers::empty()))
                .unwrap();
            assert!(!event.is_quit_request());
        }
    }

    #[test]
    fn test_other_key_release_does_not_quit() {
        let event = AppEvent::from_glfw(&WindowEvent::Key(Key::Q, 24, Action::Release, Modifiers::Control))
            .unwrap();
        assert_eq!(event, AppEvent::KeyInput { key: KeyCode::Q, action: KeyAction::Release });
        assert!(!event.is_quit_request());
        assert!(!AppEvent::WindowCloseRequested.is_quit_request());
    }

    #[test]
    fn test_sizes_translate_and_clamp() {
        assert_eq!(
            AppEvent::from_glfw(&WindowEvent::Size(800, 600)),
            Some(AppEvent::WindowResized { width: 800, height: 600 })
        );
        assert_eq!(
            AppEvent::from_glfw(&WindowEvent::FramebufferSize(-1, 1200)),
            Some(AppEvent::FramebufferResized { width: 0, height: 1200 })
        );
    }

    #[test]
    fn test_untracked_events_are_dropped() {
        assert_eq!(AppEvent::from_glfw(&WindowEvent::Focus(true)), None);
        assert_eq!(AppEvent::from_glfw(&WindowEvent::CursorPos(1.0, 2.0)), None);
        assert_eq!(
            AppEvent::from_glfw(&WindowEvent::Key(Key::F1, 67, Action::Press, Modifiers::empty())),
            None
        );
    }
}
