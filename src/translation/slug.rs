//! 由字面文本生成翻译键（slug）

use deunicode::deunicode_char;

use super::bindings::literal_text;

/// slug 中的分隔符
pub const SLUG_SEPARATOR: char = '_';

/// 计算文本的 slug
///
/// 绑定表达式先被丢弃，剩下的字面量转写为 ASCII、转小写，
/// 空白和连字符合并为单个分隔符，其他符号删除。
/// 结果可能为空字符串。
pub fn compute_slug(text: &str) -> String {
    let literal = literal_text(text);
    let mut slug = String::with_capacity(literal.len());
    let mut pending_separator = false;

    let mut push_char = |c: char, slug: &mut String| {
        if c.is_whitespace() || c == '-' {
            if !slug.is_empty() {
                pending_separator = true;
            }
            return;
        }
        if !(c.is_ascii_alphanumeric() || c == '_') {
            return;
        }
        if pending_separator {
            slug.push(SLUG_SEPARATOR);
            pending_separator = false;
        }
        slug.push(c.to_ascii_lowercase());
    };

    for c in literal.chars() {
        if let Some(word) = symbol_name(c) {
            push_char(' ', &mut slug);
            word.chars().for_each(|w| push_char(w, &mut slug));
            push_char(' ', &mut slug);
        } else if c.is_ascii() {
            push_char(c, &mut slug);
        } else if let Some(ascii) = deunicode_char(c) {
            ascii.chars().for_each(|a| push_char(a, &mut slug));
        }
    }

    slug
}

/// slug 是否以数字开头（`parseFloat` 能解析出数值）
pub fn is_numeric_slug(slug: &str) -> bool {
    let s = slug.trim_start();
    let s = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    if s.starts_with("Infinity") {
        return true;
    }

    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// 带前缀的键：`<prefix>_<slug>`，前缀为空时依然保留下划线
pub fn prefixed_key(label_prefix: &str, slug: &str) -> String {
    format!("{}_{}", label_prefix, slug)
}

fn symbol_name(c: char) -> Option<&'static str> {
    let name = match c {
        '&' => "and",
        '|' => "or",
        '<' => "less",
        '>' => "greater",
        '$' => "dollar",
        '%' => "percent",
        '¢' => "cent",
        '£' => "pound",
        '¤' => "currency",
        '¥' => "yen",
        '€' => "euro",
        '₽' => "ruble",
        '₹' => "rupee",
        '©' => "c",
        '®' => "r",
        '™' => "tm",
        '∞' => "infinity",
        '♥' => "love",
        _ => return None,
    };
    Some(name)
}
