//! Custom extractors.

mod source_ip;
mod validated_json;

pub use source_ip::SourceIp;
pub use validated_json::ValidatedJson;
