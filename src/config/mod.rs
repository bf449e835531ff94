//! Configuration module

mod board;

pub use board::BoardConfig;
pub use board::MarkdownConfig;
pub use board::RawHtml;
pub use board::SummaryConfig;
