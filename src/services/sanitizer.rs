//! 文本清洗服务
//!
//! 把任意来源的文本规范化为可以安全嵌入 JSON 负载、
//! 且不超过接口长度限制的字符串

/// 最大保留字符数（按 Unicode 字符计，超出部分截断）
const MAX_LENGTH: usize = 1000;

/// 截断标记
const ELLIPSIS: &str = "...";

/// 清洗文本
///
/// 处理步骤：
/// 1. 去除空字符（`\0`）
/// 2. 将除换行外的控制字符替换为单个空格
/// 3. 将连续空白（空格、制表符、换行）折叠为单个空格，并去除首尾空白
/// 4. 超过 1000 个字符时截断并追加 `...`
///
/// 对任何输入都不会失败，也没有副作用
///
/// # 参数
/// - `text`: 原始文本
///
/// # 返回
/// 返回清洗后的文本，长度不超过 1003 个字符
pub fn sanitize_text(text: &str) -> String {
    // 去除空字符，控制字符替换为空格
    let replaced: String = text
        .chars()
        .filter(|&c| c != '\0')
        .map(|c| if c.is_control() && c != '\n' { ' ' } else { c })
        .collect();

    // 折叠连续空白并去除首尾空白（换行在这里一并折叠为空格）
    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");

    // 按字符截断，避免在多字节字符中间切断
    if collapsed.chars().count() > MAX_LENGTH {
        let truncated: String = collapsed.chars().take(MAX_LENGTH).collect();
        truncated + ELLIPSIS
    } else {
        collapsed
    }
}
