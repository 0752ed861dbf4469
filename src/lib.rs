//! # Issue Batch Submit
//!
//! 一个把 CSV 文件批量导入 YouTrack 工单系统的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单条记录
//! - `sanitizer` - 文本清洗能力
//! - `csv_loader` - CSV 加载能力
//!
//! ### ② 客户端层（Clients）
//! - `clients/youtrack_client` - 单个批次的提交，内部处理频率限制重试
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 切分批次、批间等待、汇总统计
//! - `orchestrator/reporter` - 可注入的进度上报接口
//!
//! ## 流程
//!
//! CSV → 清洗 → 切分批次 → 逐批提交（429 退避重试）→ 汇总

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use clients::{SubmitOutcome, YoutrackClient};
pub use config::Config;
pub use error::{ApiError, AppError, AppResult, ConfigError, LoadError};
pub use models::{Issue, ProjectRef};
pub use orchestrator::{App, BatchProcessor, ProgressReporter, RunStats, TracingReporter};
pub use services::{load_issues_from_csv, sanitize_text};
