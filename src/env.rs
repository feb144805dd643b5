//! 统一的环境变量管理系统
//!
//! 命令行未给出的选项从这里回落到环境变量，再回落到默认值。

use std::env;
use std::fmt;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "HTML_I18N_LOG_LEVEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }
}

/// 提取相关环境变量
pub mod extraction {
    use super::*;

    /// 键前缀
    pub struct LabelPrefix;
    impl EnvVar<String> for LabelPrefix {
        const NAME: &'static str = "HTML_I18N_LABEL_PREFIX";
        const DEFAULT: Option<String> = Some(String::new());
        const DESCRIPTION: &'static str = "Prefix prepended (with '_') to every generated key";

        fn parse(value: &str) -> EnvResult<String> {
            let prefix = value.trim();
            if prefix.chars().any(char::is_whitespace) {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Prefix must not contain whitespace".to_string(),
                });
            }
            Ok(prefix.to_string())
        }
    }

    /// 排除选择器
    pub struct Exclude;
    impl EnvVar<String> for Exclude {
        const NAME: &'static str = "HTML_I18N_EXCLUDE";
        const DEFAULT: Option<String> = Some(String::new());
        const DESCRIPTION: &'static str = "Subtree exclusion selector in the form tag.class";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }

    /// 严格模式（键冲突即失败）
    pub struct Strict;
    impl EnvVar<bool> for Strict {
        const NAME: &'static str = "HTML_I18N_STRICT";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Fail the run when one key maps to different texts";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }
}

/// 布尔值解析，命令行位置参数也复用它
pub fn parse_bool(value: &str, var_name: &str) -> EnvResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "enabled" => Ok(true),
        "false" | "0" | "no" | "off" | "disabled" | "" => Ok(false),
        _ => Err(EnvError {
            variable: var_name.to_string(),
            message: format!(
                "Invalid boolean value '{}'. Use: true/false, 1/0, yes/no, on/off, enabled/disabled",
                value
            ),
        }),
    }
}

/// 环境变量配置汇总
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub log_level: String,
    pub label_prefix: String,
    pub exclude: String,
    pub strict: bool,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            log_level: core::LogLevel::get()?,
            label_prefix: extraction::LabelPrefix::get()?,
            exclude: extraction::Exclude::get()?,
            strict: extraction::Strict::get()?,
        })
    }
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables\n\n");
    docs.push_str(&format!(
        "- `{}`: {} (default: \"info\")\n",
        core::LogLevel::NAME,
        core::LogLevel::DESCRIPTION
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        extraction::LabelPrefix::NAME,
        extraction::LabelPrefix::DESCRIPTION,
        extraction::LabelPrefix::DEFAULT
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        extraction::Exclude::NAME,
        extraction::Exclude::DESCRIPTION,
        extraction::Exclude::DEFAULT
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        extraction::Strict::NAME,
        extraction::Strict::DESCRIPTION,
        extraction::Strict::DEFAULT
    ));
    docs
}
