// Application layer - Ingest, scheduling and the seams around them
pub mod connection_manager;
pub mod driver;
pub mod extractor;
pub mod frame_sink;
pub mod sensor_source;
pub mod shutdown;
