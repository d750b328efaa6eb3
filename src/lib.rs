#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod app;
pub mod cli;
pub mod config;
pub mod embeds;
pub mod error;
pub mod resolver;
pub mod security;
pub mod validation;

pub use config::Config;
pub use embeds::{EmbedHandler, HandlerId, Registry};
pub use error::{EmbedGateError, ResolveError, ValidationFailure};
pub use resolver::EmbedResolver;
pub use validation::{LinkValidator, ValidationOutcome};
