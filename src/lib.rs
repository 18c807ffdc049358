pub mod booter;
pub mod core;
pub mod governor_conf;
pub mod server;
pub mod studio;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;
