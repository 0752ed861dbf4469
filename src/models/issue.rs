//! YouTrack 工单数据模型
//!
//! 一行 CSV 对应一个 `Issue`，创建后不再修改

use serde::{Deserialize, Serialize};

/// 项目引用
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    /// 项目 ID
    pub id: String,
}

/// 一条待提交的工单记录
///
/// 序列化后即为接口要求的 JSON 形状：
/// `{"project":{"id":...},"summary":...,"description":...}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// 所属项目
    pub project: ProjectRef,
    /// 标题（已清洗）
    pub summary: String,
    /// 描述（已清洗）
    pub description: String,
}

impl Issue {
    /// 创建新的工单记录
    pub fn new(
        project_id: impl Into<String>,
        summary: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            project: ProjectRef {
                id: project_id.into(),
            },
            summary: summary.into(),
            description: description.into(),
        }
    }
}
