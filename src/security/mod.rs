pub mod host_classifier;
pub mod resolver;

pub use host_classifier::{
    DnsHostClassifier, HostClassifier, any_internal, classify_literal, is_internal_host,
    is_internal_ip, public_addrs,
};
pub use resolver::PublicOnlyResolver;
