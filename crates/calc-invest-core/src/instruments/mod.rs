pub mod quotes;
pub mod rate_book;

pub use quotes::{
    derive_effective_rate, quote, quote_instruments, quote_lineup, InstrumentKind, InstrumentQuote,
    QuoteSheet, DEFAULT_LINEUP,
};
pub use rate_book::RateBook;
