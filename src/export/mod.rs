pub use config::{codec, Config, AVRO_BLOCKSIZE, DEFAULT_CODEC};
pub use error::Error;
pub use export::Export;
pub use record::Record;
pub use schema::{schema, SCHEMA};

mod config;
mod error;
mod export;
mod record;
mod schema;
