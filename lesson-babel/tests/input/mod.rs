//! Live typing tests
//!
//! Keystrokes go through [`ScratchEditor`] so rules see exactly what an
//! editor host would hand them.

mod typing;
