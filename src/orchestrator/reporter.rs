//! 进度上报
//!
//! 把"正在处理第几批、成功还是失败"这类进度事件抽象为可注入的接口，
//! 核心逻辑不直接依赖控制台输出，测试时可以注入记录器做断言

use crate::error::ApiError;
use crate::orchestrator::batch_processor::RunStats;
use tracing::{error, info};

/// 进度事件接收器
///
/// 一次运行中事件的顺序固定为：
/// 每个批次一组 batch_started → batch_succeeded/batch_failed，
/// 全部批次结束后一次 run_summary
pub trait ProgressReporter: Send + Sync {
    /// 批次开始
    fn batch_started(&self, batch_num: usize, total_batches: usize, batch_len: usize);

    /// 批次成功
    fn batch_succeeded(&self, batch_num: usize, batch_len: usize);

    /// 批次失败
    fn batch_failed(&self, batch_num: usize, error: &ApiError);

    /// 运行总结（所有批次处理完毕后）
    fn run_summary(&self, stats: &RunStats);
}

/// 基于 tracing 的默认上报器
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn batch_started(&self, batch_num: usize, total_batches: usize, batch_len: usize) {
        info!("\n{}", "─".repeat(60));
        info!(
            "📦 开始处理第 {}/{} 批 ({} 条工单)...",
            batch_num, total_batches, batch_len
        );
    }

    fn batch_succeeded(&self, batch_num: usize, batch_len: usize) {
        info!("✓ 第 {} 批完成: 成功提交 {} 条工单", batch_num, batch_len);
    }

    fn batch_failed(&self, batch_num: usize, error: &ApiError) {
        error!("❌ 第 {} 批提交失败: {}", batch_num, error);
    }

    fn run_summary(&self, stats: &RunStats) {
        info!("\n{}", "=".repeat(60));
        info!("📊 上传完成统计");
        info!(
            "完成时间: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        info!("{}", "=".repeat(60));
        info!("📦 总批次: {}", stats.total_batches());
        info!("✅ 成功: {}", stats.successful_batches);
        info!("❌ 失败: {}", stats.failed_batches);
        info!("{}", "=".repeat(60));
    }
}
