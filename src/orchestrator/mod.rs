//! 编排层
//!
//! 负责整个导入流程：切分批次、逐批提交、批间等待、汇总统计

pub mod batch_processor;
pub mod reporter;

pub use batch_processor::{App, BatchProcessor, RunStats};
pub use reporter::{ProgressReporter, TracingReporter};
