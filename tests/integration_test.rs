use issue_batch_submit::error::ApiError;
use issue_batch_submit::orchestrator::{BatchProcessor, ProgressReporter, RunStats};
use issue_batch_submit::{App, Config, Issue, SubmitOutcome, YoutrackClient};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 构造指向 mock 服务器的测试配置
///
/// 重试和批间等待都设为 0 秒，测试不需要真实等待
fn test_config(server_uri: &str, batch_size: usize, max_retries: u64) -> Config {
    Config {
        youtrack_url: format!("{}/api/issues", server_uri),
        auth_token: "perm:test".to_string(),
        project_id: "P1".to_string(),
        csv_file_path: "unused.csv".to_string(),
        batch_size,
        batch_delay: 0,
        max_retries,
        initial_retry_delay: 0,
    }
}

/// 生成 n 条测试记录
fn make_issues(n: usize) -> Vec<Issue> {
    (0..n)
        .map(|i| Issue::new("P1", format!("工单 {}", i), format!("描述 {}", i)))
        .collect()
}

/// 记录进度事件的上报器，用于断言事件顺序
#[derive(Clone, Default)]
struct RecordingReporter {
    events: Arc<Mutex<Vec<String>>>,
}

impl RecordingReporter {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressReporter for RecordingReporter {
    fn batch_started(&self, batch_num: usize, total_batches: usize, batch_len: usize) {
        self.push(format!("started {}/{} ({})", batch_num, total_batches, batch_len));
    }

    fn batch_succeeded(&self, batch_num: usize, _batch_len: usize) {
        self.push(format!("succeeded {}", batch_num));
    }

    fn batch_failed(&self, batch_num: usize, _error: &ApiError) {
        self.push(format!("failed {}", batch_num));
    }

    fn run_summary(&self, stats: &RunStats) {
        self.push(format!(
            "summary {}/{}",
            stats.successful_batches, stats.failed_batches
        ));
    }
}

#[tokio::test]
async fn test_submit_batch_success_carries_auth_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/issues"))
        .and(header("Authorization", "Bearer perm:test"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), 50, 3);
    let client = YoutrackClient::new(&config);

    let outcome = client.submit_batch(&make_issues(2), 1).await;
    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_rate_limited_then_success() {
    let server = MockServer::start().await;

    // 前两次返回 429，之后返回 201
    Mock::given(method("POST"))
        .and(path("/api/issues"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/issues"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), 50, 3);
    let client = YoutrackClient::new(&config);

    let outcome = client.submit_batch(&make_issues(3), 1).await;
    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_rate_limit_retries_exhausted() {
    let server = MockServer::start().await;

    // 一直返回 429；max_retries=2 时总共尝试 3 次
    Mock::given(method("POST"))
        .and(path("/api/issues"))
        .respond_with(ResponseTemplate::new(429).set_body_string("too many requests"))
        .expect(3)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), 50, 2);
    let client = YoutrackClient::new(&config);

    let outcome = client.submit_batch(&make_issues(1), 1).await;

    match outcome {
        SubmitOutcome::Failed(ApiError::RateLimitExhausted { retries, body }) => {
            assert_eq!(retries, 2);
            assert_eq!(body, "too many requests");
        }
        other => panic!("预期重试耗尽失败，实际为 {:?}", other),
    }
}

#[tokio::test]
async fn test_non_retryable_status_fails_immediately() {
    let server = MockServer::start().await;

    // 500 不触发重试，只请求一次
    Mock::given(method("POST"))
        .and(path("/api/issues"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), 50, 3);
    let client = YoutrackClient::new(&config);

    let outcome = client.submit_batch(&make_issues(1), 1).await;

    match outcome {
        SubmitOutcome::Failed(ApiError::BadStatus { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("预期状态码失败，实际为 {:?}", other),
    }
}

#[tokio::test]
async fn test_network_error_fails_immediately() {
    // 指向一个没有监听的端口
    let config = test_config("http://127.0.0.1:9", 50, 3);
    let client = YoutrackClient::new(&config);

    let outcome = client.submit_batch(&make_issues(1), 1).await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Failed(ApiError::RequestFailed { .. })
    ));
}

#[tokio::test]
async fn test_failed_batch_does_not_abort_run() {
    let server = MockServer::start().await;

    // 第一批（含 "工单 0"）返回 500，其余返回 200
    Mock::given(method("POST"))
        .and(path("/api/issues"))
        .and(body_string_contains("工单 0"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/issues"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), 2, 3);
    let reporter = RecordingReporter::default();
    let processor = BatchProcessor::new(&config, Box::new(reporter.clone()));

    // 4 条记录、每批 2 条 → 2 批
    let stats = processor.process_batches(&make_issues(4)).await;

    assert_eq!(stats.successful_batches, 1);
    assert_eq!(stats.failed_batches, 1);

    // 两个批次都被尝试，事件顺序固定
    assert_eq!(
        reporter.events(),
        vec![
            "started 1/2 (2)".to_string(),
            "failed 1".to_string(),
            "started 2/2 (2)".to_string(),
            "succeeded 2".to_string(),
            "summary 1/1".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_uneven_final_batch() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/issues"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), 2, 3);
    let reporter = RecordingReporter::default();
    let processor = BatchProcessor::new(&config, Box::new(reporter.clone()));

    // 5 条记录、每批 2 条 → 3 批，最后一批只有 1 条
    let stats = processor.process_batches(&make_issues(5)).await;

    assert_eq!(stats.successful_batches, 3);
    assert_eq!(stats.failed_batches, 0);
    assert_eq!(
        reporter.events()[4],
        "started 3/3 (1)".to_string()
    );
}

#[tokio::test]
async fn test_no_delay_after_last_batch() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/issues"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    // 只有一批时即使配置了批间等待也不应等待
    let mut config = test_config(&server.uri(), 50, 3);
    config.batch_delay = 5;

    let reporter = RecordingReporter::default();
    let processor = BatchProcessor::new(&config, Box::new(reporter.clone()));

    let start = std::time::Instant::now();
    let stats = processor.process_batches(&make_issues(3)).await;

    assert_eq!(stats.successful_batches, 1);
    assert!(start.elapsed() < std::time::Duration::from_secs(5));
}

#[tokio::test]
async fn test_app_run_end_to_end() {
    issue_batch_submit::utils::logging::init();

    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/issues"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    // 写入临时 CSV 文件
    let csv_path = std::env::temp_dir().join("issue_batch_submit_e2e.csv");
    std::fs::write(&csv_path, "summary,description\n标题一,描述一\n标题二,描述二\n").unwrap();

    let mut config = test_config(&server.uri(), 50, 3);
    config.csv_file_path = csv_path.to_string_lossy().into_owned();

    let result = App::initialize(config).run().await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_app_run_fails_on_failed_batch() {
    issue_batch_submit::utils::logging::init();

    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/issues"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let csv_path = std::env::temp_dir().join("issue_batch_submit_e2e_fail.csv");
    std::fs::write(&csv_path, "summary,description\n标题,描述\n").unwrap();

    let mut config = test_config(&server.uri(), 50, 3);
    config.csv_file_path = csv_path.to_string_lossy().into_owned();

    // 有批次失败时 run 返回错误，使进程以非零状态码退出
    let result = App::initialize(config).run().await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_app_run_aborts_before_submit_on_load_error() {
    issue_batch_submit::utils::logging::init();

    let server = MockServer::start().await;

    // 加载失败时不应发出任何请求
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri(), 50, 3);
    config.csv_file_path = std::env::temp_dir()
        .join("issue_batch_submit_missing.csv")
        .to_string_lossy()
        .into_owned();

    let result = App::initialize(config).run().await;
    assert!(result.is_err());
}
