pub mod config;
pub mod context;
pub mod env;
pub mod gateway;
pub mod http;
pub mod paths;
pub mod probe;
pub mod report;
pub mod runner;

#[cfg(test)]
pub(crate) mod test_support;
