//! 模板占位符保护
//!
//! 解析前把 `<% ... %>` 模板标签包进 HTML 注释，避免解析器改写它们；
//! 序列化后再还原，包括被序列化器转义成实体的注释形式。

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// `&apos;` 的还原范围
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApostropheScope {
    /// 整个文档中的 `&apos;` 都还原为 `'`
    #[default]
    Document,
    /// 只在还原出来的模板片段内部还原
    Placeholders,
}

const APOS_ENTITY: &str = "&apos;";

fn template_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<%(.*?)%>").expect("template tag pattern is valid"))
}

fn guarded_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<!-- <%(.*?)%> -->").expect("guarded tag pattern is valid")
    })
}

fn escaped_guarded_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)&lt;!-- &lt;%(.*?)%&gt; --&gt;")
            .expect("escaped guarded tag pattern is valid")
    })
}

/// 把模板标签隐藏为注释
pub fn hide_placeholders(markup: &str) -> Cow<'_, str> {
    template_tag_re().replace_all(markup, |caps: &Captures| format!("<!-- <%{}%> -->", &caps[1]))
}

/// 还原被隐藏的模板标签
pub fn restore_placeholders(markup: &str, scope: ApostropheScope) -> String {
    let restored = guarded_tag_re().replace_all(markup, |caps: &Captures| unwrap_tag(caps, scope));
    // Tags that ended up inside RCDATA (e.g. <title>) come back entity-escaped
    let restored =
        escaped_guarded_tag_re().replace_all(&restored, |caps: &Captures| unwrap_tag(caps, scope));

    match scope {
        // CAUTION: also rewrites &apos; the document contained on purpose
        ApostropheScope::Document => restored.replace(APOS_ENTITY, "'"),
        ApostropheScope::Placeholders => restored.into_owned(),
    }
}

/// 去掉文本中被隐藏的模板标签，每处替换为一个空格
///
/// RCDATA 元素（`<title>`、`<textarea>`）里的注释形式是普通文本，计算 slug 前需要先去掉。
pub fn strip_placeholders(text: &str) -> Cow<'_, str> {
    guarded_tag_re().replace_all(text, " ")
}

/// 只还原文本中被隐藏的模板标签，不处理 `&apos;`
pub fn unguard_text(text: &str) -> Cow<'_, str> {
    guarded_tag_re().replace_all(text, "<%${1}%>")
}

/// 注释节点的内容若是被隐藏的模板标签，返回还原后的标签
pub fn placeholder_from_comment(contents: &str) -> Option<String> {
    let inner = contents.strip_prefix(" <%")?.strip_suffix("%> ")?;
    Some(format!("<%{}%>", inner))
}

fn unwrap_tag(caps: &Captures, scope: ApostropheScope) -> String {
    match scope {
        ApostropheScope::Document => format!("<%{}%>", &caps[1]),
        ApostropheScope::Placeholders => format!("<%{}%>", caps[1].replace(APOS_ENTITY, "'")),
    }
}
