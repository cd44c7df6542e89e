pub mod prompt;
pub mod providers;

pub use prompt::STYLE_INSTRUCTION;
