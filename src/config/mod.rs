pub mod schema;

pub use schema::{Config, SiteConfig, ValidatorConfig};
