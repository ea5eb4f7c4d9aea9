pub mod record_parser;
pub mod record_serializer;

pub use record_parser::{parse_records, split_records};
pub use record_serializer::serialize_records;
