pub mod config;
pub mod constants;
pub mod encode;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod numeric;
pub mod pipeline;
pub mod publish;
pub mod record;
pub mod server;
pub mod wire;
