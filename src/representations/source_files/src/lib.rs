mod occurrence;
mod unit;

pub use occurrence::Occurrence;
pub use unit::SourceUnit;
