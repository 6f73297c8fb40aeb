pub mod contact_book;
pub mod csv_export;
pub mod extraction_service;
pub mod prompt;

pub use contact_book::ContactBook;
pub use extraction_service::{ContactExtractor, OpenAiExtractor};
