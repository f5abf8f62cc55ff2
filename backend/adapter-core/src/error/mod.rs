pub mod adapter;
pub mod config;
pub mod executor;
pub mod logger;
pub mod xml_rpc;

pub use adapter::AdapterError;
pub use config::ConfigError;
pub use executor::ExecutorError;
pub use logger::LoggerError;
pub use xml_rpc::XmlRpcError;
