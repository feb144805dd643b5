//! 键→文本字典及其合并策略

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ExtractResult;

/// 键冲突处理策略
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// 后写入的覆盖先写入的，只记录日志
    #[default]
    Overwrite,
    /// 同一个键出现不同文本时整个运行失败
    Strict,
}

/// 一次键覆盖
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCollision {
    pub key: String,
    pub previous: String,
    pub current: String,
}

impl KeyCollision {
    /// 文本不同才算真正的冲突，重复的相同文本不算
    pub fn is_conflict(&self) -> bool {
        self.previous != self.current
    }
}

/// 扁平的翻译字典，按文档遍历顺序保存
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationMap {
    entries: IndexMap<String, String>,
}

impl TranslationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入一条记录；键已存在时覆盖值并保留原来的位置
    pub fn insert(&mut self, key: String, value: String) -> Option<KeyCollision> {
        let previous = self.entries.insert(key.clone(), value.clone())?;
        Some(KeyCollision {
            key,
            previous,
            current: value,
        })
    }

    /// 浅合并，返回所有被覆盖的键
    pub fn merge(&mut self, other: TranslationMap) -> Vec<KeyCollision> {
        other
            .entries
            .into_iter()
            .filter_map(|(key, value)| self.insert(key, value))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// 两空格缩进的 JSON
    pub fn to_json_pretty(&self) -> ExtractResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FromIterator<(String, String)> for TranslationMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = TranslationMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> TranslationMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn later_value_wins_and_keeps_position() {
        let mut base = map(&[("_a", "A"), ("_b", "B")]);
        let collisions = base.merge(map(&[("_a", "A2"), ("_c", "C")]));

        assert_eq!(base.keys().collect::<Vec<_>>(), vec!["_a", "_b", "_c"]);
        assert_eq!(base.get("_a"), Some("A2"));
        assert_eq!(collisions.len(), 1);
        assert!(collisions[0].is_conflict());
        assert_eq!(collisions[0].previous, "A");
    }

    #[test]
    fn identical_duplicates_are_not_conflicts() {
        let mut base = map(&[("_save", "Save")]);
        let collision = base.insert("_save".to_string(), "Save".to_string()).unwrap();
        assert!(!collision.is_conflict());
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn pretty_json_uses_two_spaces() {
        let dict = map(&[("_hello", "Hello"), ("_bye", "Bye")]);
        assert_eq!(
            dict.to_json_pretty().unwrap(),
            "{\n  \"_hello\": \"Hello\",\n  \"_bye\": \"Bye\"\n}"
        );
        assert_eq!(TranslationMap::new().to_json_pretty().unwrap(), "{}");
    }
}
