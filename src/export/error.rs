use std::fmt;

#[derive(Debug)]
pub enum Error {
    Avro(apache_avro::Error),
    Io(std::io::Error),
    Schema(String),
    Codec(String),
    Address(String),
}

impl From<apache_avro::Error> for Error {
    fn from(err: apache_avro::Error) -> Self {
        Error::Avro(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Avro(e) => Some(e),
            Error::Io(e)   => Some(e),
            _              => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Error::Avro(e)    => write!(f, "avro: {}", e),
            Error::Io(e)      => write!(f, "io: {}", e),
            Error::Schema(s)  => write!(f, "invalid flow schema: {}", s),
            Error::Codec(s)   => write!(f, "unsupported codec '{}'", s),
            Error::Address(s) => write!(f, "invalid address: {}", s),
        }
    }
}
