pub mod input;
pub mod orchestrator;

pub use input::{EmbedInput, MINIMAL_KEYWORD, parse_input, strip_markup};
pub use orchestrator::EmbedResolver;
