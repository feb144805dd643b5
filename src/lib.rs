//! # HTML i18n Extractor
//!
//! 从 HTML 模板中提取可翻译文本，就地替换为稳定的查找键，
//! 同时输出改写后的标记和键→文本字典。
//!
//! ## 模块组织
//!
//! - `core` - 处理流程、选项和输出文件
//! - `parsers` - HTML解析、模板标签保护、序列化
//! - `translation` - slug、绑定、排除规则和提取器
//! - `env` - 环境变量配置
//! - `error` - 错误类型

pub mod core;
pub mod env;
pub mod error;
pub mod parsers;
pub mod translation;

// Re-export commonly used items for convenience
pub use crate::core::*;
pub use error::{ExtractError, ExtractResult};
pub use translation::{CollisionPolicy, ExcludeRule, TranslationMap};
