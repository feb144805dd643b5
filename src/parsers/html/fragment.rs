//! 模板片段的包装
//!
//! 片段在解析前包进合成的 `<html><body>`，以表格行、单元格等开头的片段
//! 再补上所需的表格容器，否则解析器会在 body 上下文中丢掉这些标签。
//! 序列化时只输出最内层容器的内容，见 `serializer::serialize_fragment`。

/// 片段外壳：`<body>` 之下合成的容器路径
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FragmentWrapper {
    containers: &'static [&'static str],
}

impl Default for FragmentWrapper {
    fn default() -> Self {
        Self::BODY
    }
}

impl FragmentWrapper {
    /// 只有 `<html><body>`
    pub const BODY: FragmentWrapper = FragmentWrapper { containers: &[] };

    /// 按片段的第一个标签选择外壳
    pub fn for_markup(markup: &str) -> Self {
        let containers: &'static [&'static str] = match leading_tag_name(markup).as_deref() {
            Some("caption" | "colgroup" | "thead" | "tbody" | "tfoot") => &["table"],
            Some("col") => &["table", "colgroup"],
            Some("tr") => &["table", "tbody"],
            Some("td" | "th") => &["table", "tbody", "tr"],
            _ => &[],
        };
        Self { containers }
    }

    /// body 之下依次嵌套的合成容器
    pub fn containers(&self) -> &'static [&'static str] {
        self.containers
    }

    pub fn wrap(&self, markup: &str) -> String {
        let mut out = String::from("<html><body>");
        for name in self.containers {
            out.push_str(&format!("<{}>", name));
        }
        out.push_str(markup);
        for name in self.containers.iter().rev() {
            out.push_str(&format!("</{}>", name));
        }
        out.push_str("</body></html>");
        out
    }
}

/// 跳过开头的空白、模板标签和注释
///
/// 未闭合的模板标签或注释原样保留。
pub fn skip_leading_noise(markup: &str) -> &str {
    let mut rest = markup;
    loop {
        rest = rest.trim_start();
        let next = if let Some(tail) = rest.strip_prefix("<%") {
            tail.find("%>").map(|end| &tail[end + 2..])
        } else if let Some(tail) = rest.strip_prefix("<!--") {
            tail.find("-->").map(|end| &tail[end + 3..])
        } else {
            None
        };

        match next {
            Some(next) => rest = next,
            None => return rest,
        }
    }
}

/// 第一个开始标签的名称（小写）
pub fn leading_tag_name(markup: &str) -> Option<String> {
    let rest = skip_leading_noise(markup).strip_prefix('<')?;
    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    (!name.is_empty()).then(|| name.to_ascii_lowercase())
}
