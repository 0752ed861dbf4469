//! 批量提交处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量提交的编排和统计。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：加载 CSV、创建客户端和上报器
//! 2. **切分批次**：按配置的批次大小把记录切成连续的批次
//! 3. **逐批提交**：严格串行，每批完全结束（成功或失败）后才开始下一批
//! 4. **批间等待**：除最后一批外，每批之后等待固定秒数
//! 5. **全局统计**：汇总成功/失败批次数量
//!
//! ## 设计特点
//!
//! - **失败不中断**：单个批次失败只计数，不影响后续批次
//! - **向下委托**：单批的重试细节委托给 YoutrackClient

use crate::clients::{SubmitOutcome, YoutrackClient};
use crate::config::Config;
use crate::models::Issue;
use crate::orchestrator::reporter::{ProgressReporter, TracingReporter};
use crate::services::load_issues_from_csv;
use anyhow::Result;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// 一次运行的汇总统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// 成功的批次数
    pub successful_batches: usize,
    /// 失败的批次数
    pub failed_batches: usize,
}

impl RunStats {
    /// 总批次数
    pub fn total_batches(&self) -> usize {
        self.successful_batches + self.failed_batches
    }
}

/// 批量提交处理器
pub struct BatchProcessor {
    config: Config,
    client: YoutrackClient,
    reporter: Box<dyn ProgressReporter>,
}

impl BatchProcessor {
    /// 创建新的处理器
    pub fn new(config: &Config, reporter: Box<dyn ProgressReporter>) -> Self {
        Self {
            config: config.clone(),
            client: YoutrackClient::new(config),
            reporter,
        }
    }

    /// 按批次提交全部记录
    ///
    /// 记录按源顺序切分为连续批次（最后一批可能不满），
    /// 逐批提交并汇总结果；单个批次失败不会中断后续批次
    ///
    /// # 参数
    /// - `issues`: 全部待提交记录
    ///
    /// # 返回
    /// 返回成功/失败批次的汇总统计
    pub async fn process_batches(&self, issues: &[Issue]) -> RunStats {
        // 批次大小为 0 没有意义，按 1 处理
        let batch_size = self.config.batch_size.max(1);

        let total_issues = issues.len();
        let total_batches = total_batch_count(total_issues, batch_size);
        let mut stats = RunStats::default();

        info!(
            "🚀 开始上传 {} 条工单，每批 {} 条，共 {} 批",
            total_issues, batch_size, total_batches
        );

        for (batch_offset, batch) in issues.chunks(batch_size).enumerate() {
            let batch_num = batch_offset + 1;

            self.reporter
                .batch_started(batch_num, total_batches, batch.len());

            match self.client.submit_batch(batch, batch_num).await {
                SubmitOutcome::Success => {
                    stats.successful_batches += 1;
                    self.reporter.batch_succeeded(batch_num, batch.len());
                }
                SubmitOutcome::Failed(e) => {
                    stats.failed_batches += 1;
                    self.reporter.batch_failed(batch_num, &e);
                }
            }

            // 最后一批之后不再等待
            if batch_num < total_batches {
                info!("⏳ 等待 {} 秒后处理下一批...", self.config.batch_delay);
                sleep(Duration::from_secs(self.config.batch_delay)).await;
            }
        }

        self.reporter.run_summary(&stats);

        stats
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    processor: BatchProcessor,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Self {
        log_startup(&config);

        let processor = BatchProcessor::new(&config, Box::new(TracingReporter));

        Self { config, processor }
    }

    /// 运行应用主逻辑
    ///
    /// 加载 CSV → 逐批提交 → 汇总；
    /// 有批次失败时返回错误，使进程以非零状态码退出
    pub async fn run(&self) -> Result<()> {
        // 加载全部待提交记录
        let issues = load_issues_from_csv(&self.config)?;

        if issues.is_empty() {
            warn!("⚠️ CSV 中没有待提交的记录，程序结束");
            return Ok(());
        }

        // 逐批提交
        let stats = self.processor.process_batches(&issues).await;

        if stats.failed_batches > 0 {
            anyhow::bail!("{} 个批次提交失败", stats.failed_batches);
        }

        Ok(())
    }
}

/// 总批次数：`ceil(total / batch_size)`
fn total_batch_count(total: usize, batch_size: usize) -> usize {
    total.div_ceil(batch_size)
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - CSV 批量导入模式");
    info!("📄 数据文件: {}", config.csv_file_path);
    info!("📊 批次大小: {} / 批间等待: {} 秒", config.batch_size, config.batch_delay);
    info!("{}", "=".repeat(60));
}
