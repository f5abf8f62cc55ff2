mod deserializer;
mod executor;
mod logger;
mod xml_rpc;
