use crate::error::{AppResult, ConfigError};

/// 程序配置文件
///
/// 启动时从环境变量加载一次，之后全程只读
#[derive(Clone, Debug)]
pub struct Config {
    /// YouTrack 批量创建接口地址
    pub youtrack_url: String,
    /// Bearer 认证令牌
    pub auth_token: String,
    /// 目标项目 ID
    pub project_id: String,
    /// 待导入的 CSV 文件路径
    pub csv_file_path: String,
    /// 每批提交的记录数量
    pub batch_size: usize,
    /// 批次之间的等待秒数
    pub batch_delay: u64,
    /// 频率限制时的最大重试次数
    pub max_retries: u64,
    /// 首次重试前的等待秒数（之后每次翻倍）
    pub initial_retry_delay: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// # 返回
    /// 必需变量缺失或数值变量无法解析时返回配置错误
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            youtrack_url: require_var("YOUTRACK_URL")?,
            auth_token: require_var("AUTH_TOKEN")?,
            project_id: require_var("PROJECT_ID")?,
            csv_file_path: require_var("CSV_FILE_PATH")?,
            batch_size: parse_var("BATCH_SIZE", 50)?,
            batch_delay: parse_var("BATCH_DELAY", 3)?,
            max_retries: parse_var("MAX_RETRIES", 3)?,
            initial_retry_delay: parse_var("INITIAL_RETRY_DELAY", 3)?,
        })
    }
}

/// 读取必需的环境变量
fn require_var(var_name: &str) -> Result<String, ConfigError> {
    std::env::var(var_name).map_err(|_| ConfigError::EnvVarNotFound {
        var_name: var_name.to_string(),
    })
}

/// 读取可选的数值环境变量，未设置时使用默认值
///
/// 注意：变量已设置但无法解析时视为错误，而不是静默回退到默认值
fn parse_var<T: std::str::FromStr>(var_name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value,
            expected_type: std::any::type_name::<T>().to_string(),
        }),
        Err(_) => Ok(default),
    }
}
