//! CSV 加载服务
//!
//! 从 CSV 文件读取待导入的记录，逐行清洗后转换为工单模型。
//! 批次边界依赖记录总数，所以这里一次性物化整个列表而不是惰性读取

use crate::config::Config;
use crate::error::LoadError;
use crate::models::Issue;
use crate::services::sanitizer::sanitize_text;
use std::path::Path;
use tracing::info;

/// 必需的列名
const REQUIRED_COLUMNS: [&str; 2] = ["summary", "description"];

/// 从 CSV 文件加载工单记录
///
/// 要求表头至少包含 `summary` 和 `description` 两列，
/// 每行按源文件顺序生成一条记录，`project.id` 绑定为配置的项目 ID
///
/// # 参数
/// - `config`: 程序配置
///
/// # 返回
/// 返回按源文件顺序排列的完整记录列表；
/// 文件缺失、不可读、缺列或行格式错误时返回加载错误
pub fn load_issues_from_csv(config: &Config) -> Result<Vec<Issue>, LoadError> {
    let path = &config.csv_file_path;

    if !Path::new(path).exists() {
        return Err(LoadError::NotFound { path: path.clone() });
    }

    let mut reader = csv::Reader::from_path(path).map_err(|e| LoadError::ReadFailed {
        path: path.clone(),
        source: Box::new(e),
    })?;

    let headers = reader
        .headers()
        .map_err(|e| LoadError::ReadFailed {
            path: path.clone(),
            source: Box::new(e),
        })?
        .clone();

    // 校验必需的列并记下列号
    let summary_idx = column_index(&headers, REQUIRED_COLUMNS[0], path)?;
    let description_idx = column_index(&headers, REQUIRED_COLUMNS[1], path)?;

    let mut issues = Vec::new();
    for (row_offset, record) in reader.records().enumerate() {
        // 表头占第 1 行，数据从第 2 行开始
        let record = record.map_err(|e| LoadError::RowParseFailed {
            path: path.clone(),
            row: row_offset + 2,
            source: Box::new(e),
        })?;

        let summary = record.get(summary_idx).unwrap_or_default();
        let description = record.get(description_idx).unwrap_or_default();

        issues.push(Issue::new(
            &config.project_id,
            sanitize_text(summary),
            sanitize_text(description),
        ));
    }

    info!("✓ 从 {} 加载了 {} 条记录", path, issues.len());

    Ok(issues)
}

/// 在表头中查找列号
fn column_index(
    headers: &csv::StringRecord,
    column: &str,
    path: &str,
) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| LoadError::MissingColumn {
            path: path.to_string(),
            column: column.to_string(),
        })
}
