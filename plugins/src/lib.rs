pub mod factory;
pub mod host;
pub mod nonce;
pub mod options;
pub mod services;
