//! Window management subsystem
//!
//! The render loop talks to the window only through the
//! [`WindowBackend`] trait:
//!
//! ```text
//! ┌─────────────────────────────────┐
//! │     Engine (init + loop)        │
//! └─────────────┬───────────────────┘
//!               │ Uses
//!      ┌────────▼────────┐
//!      │ WindowBackend   │ ← trait (backend.rs)
//!      └────────┬────────┘
//!               │ Implemented by
//!   ┌───────────▼───────────┐
//!   │ opengl::GlfwWindow    │ ← GLFW window + GL context
//!   └───────────────────────┘
//! ```

pub mod backend;

pub use backend::{centered_position, WindowBackend};
