pub mod flow;
pub mod format;

pub use extension::Extension;
pub use flow::Flow;
pub use source::Source;

mod extension;
mod source;

#[cfg(test)]
mod test;
