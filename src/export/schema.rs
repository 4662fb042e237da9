use std::sync::OnceLock;
use apache_avro::Schema;
use log::debug;
use super::Error;

pub const SCHEMA: &str = include_str!("../../schema/flowdata.avsc");

static PARSED: OnceLock<Schema> = OnceLock::new();

/// The compiled-in flow schema, parsed on first use.
pub fn schema() -> Result<&'static Schema, Error> {
    if let Some(schema) = PARSED.get() {
        return Ok(schema);
    }

    let schema = Schema::parse_str(SCHEMA)?;
    debug!("parsed flow schema");

    Ok(PARSED.get_or_init(|| schema))
}
