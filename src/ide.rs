//! IDE features module.

pub mod backend;
pub mod completion;
pub mod diagnostics;
mod handlers;
pub mod hover;
pub mod inlay_hint;
pub mod lookup;
pub mod state;
pub mod virtual_text;
