pub mod csv;
pub mod yahoo;

pub use csv::CsvQuoteProvider;
pub use yahoo::YahooQuoteProvider;
