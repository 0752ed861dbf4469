//! 业务能力层
//!
//! 描述"我能做什么"：文本清洗、CSV 加载

pub mod csv_loader;
pub mod sanitizer;

pub use csv_loader::load_issues_from_csv;
pub use sanitizer::sanitize_text;
