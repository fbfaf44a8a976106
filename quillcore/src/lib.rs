//! quillcore — shared library for the Quill essay editor

pub mod repaint;
pub mod storage;
pub mod text;
pub mod theme;
pub mod widgets;

pub use repaint::RepaintController;
pub use theme::{Palette, ThemeKind};
