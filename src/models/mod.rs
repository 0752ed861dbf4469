//! 数据模型模块

pub mod issue;

pub use issue::{Issue, ProjectRef};
