use apache_avro::Codec;
use super::Error;

pub const DEFAULT_CODEC: &str = "deflate";

// Larger records than this still work, the writer
// flushes a block as soon as it is full.
pub const AVRO_BLOCKSIZE: usize = 65536;

#[derive(Debug)]
pub struct Config {
    pub codec:      Codec,
    pub block_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            codec:      Codec::Deflate,
            block_size: AVRO_BLOCKSIZE,
        }
    }
}

pub fn codec(name: &str) -> Result<Codec, Error> {
    match name {
        "null"               => Ok(Codec::Null),
        "deflate"            => Ok(Codec::Deflate),
        "snappy"             => Ok(Codec::Snappy),
        "zstandard" | "zstd" => Ok(Codec::Zstandard),
        _                    => Err(Error::Codec(name.to_owned())),
    }
}
