use std::fs::File;
use std::io::{self, BufReader, Read};
use anyhow::Result;
use log::debug;
use serde_json::{Deserializer, StreamDeserializer};
use serde_json::de::IoRead;
use super::Flow;

/// Flow records read as a stream of JSON values.
pub struct Source<R: Read> {
    stream: StreamDeserializer<'static, IoRead<R>, Flow>,
}

impl<R: Read> Source<R> {
    pub fn new(reader: R) -> Self {
        Self {
            stream: Deserializer::from_reader(reader).into_iter(),
        }
    }
}

impl Source<BufReader<Box<dyn Read>>> {
    pub fn open(path: &str) -> Result<Self> {
        let reader: Box<dyn Read> = match path {
            "-"  => Box::new(io::stdin()),
            path => Box::new(File::open(path)?),
        };
        debug!("reading flows from {}", path);
        Ok(Self::new(BufReader::new(reader)))
    }
}

impl<R: Read> Iterator for Source<R> {
    type Item = Result<Flow>;

    fn next(&mut self) -> Option<Self::Item> {
        self.stream.next().map(|r| Ok(r?))
    }
}
