//! 绑定表达式（`{{...}}`）的切分与提取

use std::sync::OnceLock;

use regex::Regex;

/// `translate-values` 中各绑定之间的分隔符
pub const BINDING_SEPARATOR: &str = "::";

/// 位置标记前缀
pub const MARKER_PREFIX: &str = "REPLACE_";

const BINDING_OPEN: &str = "{{";

fn binding_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{.*?\}\}").expect("binding pattern is valid"))
}

/// 切分后的文本片段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Binding(&'a str),
}

impl<'a> Segment<'a> {
    fn classify(piece: &'a str) -> Self {
        if piece.starts_with(BINDING_OPEN) {
            Segment::Binding(piece)
        } else {
            Segment::Literal(piece)
        }
    }

    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Literal(s) | Segment::Binding(s) => s,
        }
    }
}

/// 按绑定表达式切分文本，保留分隔符本身
///
/// 与带捕获组的 `split` 一致：字面量与绑定交替出现，首尾可能是空字面量。
/// 以 `{{` 开头的片段都视为绑定。
pub fn split_on_bindings(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in binding_re().find_iter(text) {
        segments.push(Segment::classify(&text[last..m.start()]));
        segments.push(Segment::classify(m.as_str()));
        last = m.end();
    }
    segments.push(Segment::classify(&text[last..]));

    segments
}

/// 按出现顺序返回所有绑定（不去重）
pub fn extract_bindings(text: &str) -> Vec<&str> {
    split_on_bindings(text)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Binding(s) => Some(s),
            Segment::Literal(_) => None,
        })
        .collect()
}

/// 只保留字面量片段，用单个空格连接
pub fn literal_text(text: &str) -> String {
    split_on_bindings(text)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Literal(s) => Some(s),
            Segment::Binding(_) => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// 位置标记，例如 `REPLACE_3`
pub fn replace_marker(index: usize) -> String {
    format!("{}{}", MARKER_PREFIX, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_delimiters_and_order() {
        assert_eq!(
            split_on_bindings("Hi {{user.name}}, you have {{count}} new"),
            vec![
                Segment::Literal("Hi "),
                Segment::Binding("{{user.name}}"),
                Segment::Literal(", you have "),
                Segment::Binding("{{count}}"),
                Segment::Literal(" new"),
            ]
        );
    }

    #[test]
    fn split_is_non_greedy() {
        let segments = split_on_bindings("{{a}}{{b}}");
        assert_eq!(
            segments,
            vec![
                Segment::Literal(""),
                Segment::Binding("{{a}}"),
                Segment::Literal(""),
                Segment::Binding("{{b}}"),
                Segment::Literal(""),
            ]
        );
    }

    #[test]
    fn bindings_are_not_deduplicated() {
        assert_eq!(
            extract_bindings("{{x}} and {{x}} or {{ y | upper }}"),
            vec!["{{x}}", "{{x}}", "{{ y | upper }}"]
        );
        assert!(extract_bindings("plain text").is_empty());
    }

    #[test]
    fn unclosed_binding_is_literal_unless_leading() {
        assert!(extract_bindings("Hello {{ name").is_empty());
        assert_eq!(extract_bindings("{{ name"), vec!["{{ name"]);
    }

    #[test]
    fn literal_text_drops_bindings() {
        assert_eq!(literal_text("Hello {{name}}"), "Hello  ");
        assert_eq!(literal_text("{{only}}"), " ");
    }

    #[test]
    fn marker_format() {
        assert_eq!(replace_marker(7), "REPLACE_7");
    }
}
