pub mod compression;
pub mod date;
pub mod models;
pub mod read_time;

// 重新导出常用模块和函数，方便直接使用
pub use compression::{from_compressed, to_compressed, validate_compressed_data, IndexFormatError, INDEX_FORMAT_VERSION};
pub use date::{parse_post_date, post_year};
pub use models::{IndexMetadata, PostMetadata};
pub use read_time::{estimate_read_time, read_time_minutes};
