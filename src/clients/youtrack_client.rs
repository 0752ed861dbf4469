//! YouTrack API 客户端
//!
//! 封装单个批次的提交逻辑，包括频率限制时的指数退避重试。
//! 重试是显式的有界循环，最多尝试 `max_retries + 1` 次

use crate::config::Config;
use crate::error::ApiError;
use crate::models::Issue;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// 一个批次的提交结果
#[derive(Debug)]
pub enum SubmitOutcome {
    /// 提交成功（HTTP 200/201）
    Success,
    /// 提交失败（不可重试的错误，或重试次数已耗尽）
    Failed(ApiError),
}

impl SubmitOutcome {
    /// 是否提交成功
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Success)
    }
}

/// YouTrack API 客户端
pub struct YoutrackClient {
    client: reqwest::Client,
    url: String,
    token: String,
    max_retries: u64,
    initial_retry_delay: u64,
}

impl YoutrackClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.youtrack_url.clone(),
            token: config.auth_token.clone(),
            max_retries: config.max_retries,
            initial_retry_delay: config.initial_retry_delay,
        }
    }

    /// 提交一个批次（带重试逻辑）
    ///
    /// 批次以 JSON 数组的形式 POST 到接口：
    /// - 200/201 视为成功
    /// - 429 触发指数退避重试，重试耗尽后视为失败
    /// - 其他状态码和网络层错误立即失败，不重试
    ///
    /// # 参数
    /// - `batch`: 本批次的工单记录
    /// - `batch_num`: 批次编号（用于日志）
    ///
    /// # 返回
    /// 返回本批次的最终提交结果
    pub async fn submit_batch(&self, batch: &[Issue], batch_num: usize) -> SubmitOutcome {
        let mut retry_count: u64 = 0;

        loop {
            let response = match self
                .client
                .post(&self.url)
                .header("Authorization", format!("Bearer {}", self.token))
                .header("Content-Type", "application/json")
                .json(batch)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    // 网络层失败（连接失败、超时、DNS）不重试
                    return SubmitOutcome::Failed(ApiError::RequestFailed {
                        endpoint: self.url.clone(),
                        source: Box::new(e),
                    });
                }
            };

            let status = response.status().as_u16();

            match status {
                200 | 201 => {
                    info!("[批次 {}] ✓ 成功创建 {} 条工单", batch_num, batch.len());
                    return SubmitOutcome::Success;
                }
                429 => {
                    if retry_count < self.max_retries {
                        let delay = backoff_delay(self.initial_retry_delay, retry_count);
                        warn!(
                            "[批次 {}] ⚠️ 触发频率限制，等待 {} 秒后重试 ({}/{})...",
                            batch_num,
                            delay.as_secs(),
                            retry_count + 1,
                            self.max_retries
                        );
                        sleep(delay).await;
                        retry_count += 1;
                        continue;
                    }

                    let body = response.text().await.unwrap_or_default();
                    return SubmitOutcome::Failed(ApiError::RateLimitExhausted {
                        retries: self.max_retries,
                        body,
                    });
                }
                _ => {
                    let body = response.text().await.unwrap_or_default();
                    return SubmitOutcome::Failed(ApiError::BadStatus { status, body });
                }
            }
        }
    }
}

/// 指数退避延迟：`initial * 2^retry_count`
fn backoff_delay(initial_secs: u64, retry_count: u64) -> Duration {
    let factor = 2u64.saturating_pow(retry_count.min(u32::MAX as u64) as u32);
    Duration::from_secs(initial_secs.saturating_mul(factor))
}
