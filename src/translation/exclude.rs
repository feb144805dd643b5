//! 子树排除规则

use std::fmt;
use std::str::FromStr;

use crate::error::{ExtractError, ExtractResult};

/// 排除规则：标签名精确匹配，class 属性做子串匹配
///
/// 由 `tag.class`、`tag` 或 `.class` 形式的选择器解析而来。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExcludeRule {
    tag: Option<String>,
    class_fragment: Option<String>,
}

impl ExcludeRule {
    /// 解析选择器，空字符串表示不排除任何节点
    pub fn parse(selector: &str) -> ExtractResult<Option<Self>> {
        let selector = selector.trim();
        if selector.is_empty() {
            return Ok(None);
        }

        let invalid = || ExtractError::InvalidSelector(selector.to_string());
        if selector.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        let (tag, class_fragment) = match selector.split_once('.') {
            Some((tag, class)) => {
                if class.is_empty() || class.contains('.') {
                    return Err(invalid());
                }
                (tag, Some(class.to_string()))
            }
            None => (selector, None),
        };

        let tag = (!tag.is_empty()).then(|| tag.to_ascii_lowercase());

        Ok(Some(Self {
            tag,
            class_fragment,
        }))
    }

    /// 判断元素是否命中规则
    pub fn matches(&self, tag_name: &str, class_attr: Option<&str>) -> bool {
        if let Some(tag) = &self.tag {
            if tag != tag_name {
                return false;
            }
        }

        match &self.class_fragment {
            Some(fragment) => class_attr.is_some_and(|class| class.contains(fragment.as_str())),
            None => true,
        }
    }
}

impl FromStr for ExcludeRule {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)?.ok_or_else(|| ExtractError::InvalidSelector(s.to_string()))
    }
}

impl fmt::Display for ExcludeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            write!(f, "{}", tag)?;
        }
        if let Some(class) = &self.class_fragment {
            write!(f, ".{}", class)?;
        }
        Ok(())
    }
}
