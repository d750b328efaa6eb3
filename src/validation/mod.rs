pub mod outcome;
pub mod step;
pub mod user_agent;
pub mod validator;

pub use outcome::{InvalidReason, ValidationOutcome};
pub use user_agent::{build_user_agent, sanitize_community_name};
pub use validator::{LinkValidator, ValidatorSettings};
