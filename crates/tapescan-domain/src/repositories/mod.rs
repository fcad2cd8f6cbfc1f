pub mod quote_provider;
