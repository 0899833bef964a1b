pub mod forwarder_config;
