//! 统一错误处理
//!
//! 提取流程中只有边缘的 I/O 会失败：读取失败是致命的，写入失败会被吸收并上报。
//! 节点级别的判断（空 slug、纯数字 slug）从不产生错误。

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::env::EnvError;

/// 提取错误类型
#[derive(Error, Debug)]
pub enum ExtractError {
    /// 输入文件无法读取
    #[error("无法读取输入文件 {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 输出文件无法写入
    #[error("无法写入输出文件 {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 字典序列化失败
    #[error("JSON序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 排除选择器格式无效
    #[error("排除选择器无效 '{0}'，应为 tag.class、tag 或 .class")]
    InvalidSelector(String),

    /// 严格模式下同一个键对应了不同的文本
    #[error("键冲突: {}", keys.join(", "))]
    KeyCollision { keys: Vec<String> },

    /// 环境变量配置错误
    #[error(transparent)]
    Env(#[from] EnvError),
}

impl ExtractError {
    /// 是否应当中止整个运行
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ExtractError::Write { .. })
    }

    /// 出错的文件路径（如果有）
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ExtractError::Read { path, .. } | ExtractError::Write { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// 错误结果类型别名
pub type ExtractResult<T> = Result<T, ExtractError>;
