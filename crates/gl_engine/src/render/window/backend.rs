//! Backend-agnostic window management trait

use crate::events::AppEvent;

/// Operations the engine needs from a window that owns a GL context
///
/// All methods must be called from the thread that created the window.
pub trait WindowBackend {
    /// Check if the window should close
    ///
    /// True once the user clicked the close button or someone called
    /// [`set_should_close`](Self::set_should_close) with `true`.
    fn should_close(&self) -> bool;

    /// Set whether the window should close
    fn set_should_close(&mut self, should_close: bool);

    /// Process pending window system events and return the ones the engine tracks
    ///
    /// Non-blocking. This is the only place input is observed.
    fn poll_events(&mut self) -> Vec<AppEvent>;

    /// Present the back buffer
    fn swap_buffers(&mut self);

    /// Current window size in screen coordinates
    fn get_size(&self) -> (u32, u32);

    /// Move the window's top-left corner
    fn set_position(&mut self, x: i32, y: i32);

    /// Video mode size of the primary monitor, if there is one
    fn primary_monitor_size(&mut self) -> Option<(u32, u32)>;

    /// Make the window visible
    fn show(&mut self);
}

/// Top-left position that centers a window of `window` size on a monitor
/// of `monitor` size
///
/// Negative when the window is larger than the monitor.
pub fn centered_position(monitor: (u32, u32), window: (u32, u32)) -> (i32, i32) {
    let axis = |monitor: u32, window: u32| {
        let offset = (i64::from(monitor) - i64::from(window)) / 2;
        i32::try_from(offset).unwrap_or(if offset < 0 { i32::MIN } else { i32::MAX })
    };
    (axis(monitor.0, window.0), axis(monitor.1, window.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centers_on_full_hd() {
        assert_eq!(centered_position((1920, 1080), (800, 600)), (560, 240));
    }

    #[test]
    fn test_odd_remainder_truncates() {
        assert_eq!(centered_position((1025, 769), (800, 600)), (112, 84));
    }

    #[test]
    fn test_window_larger_than_monitor() {
        assert_eq!(centered_position((640, 480), (800, 600)), (-80, -60));
    }
}
