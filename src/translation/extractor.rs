//! 可翻译文本提取器
//!
//! 深度优先遍历元素节点。每个节点要么整体作为一个翻译单元被提取
//! （写入 `translate` 属性并清空内容），要么作为递归点继续访问其子元素。
//!
//! 访问计数器在一次运行内共享：每访问一个节点（无论是否可翻译）加一，
//! 被排除的节点不计数。计数值同时用于生成绑定的位置标记，
//! 因此标记编号在可翻译单元之间并不连续。

use markup5ever_rcdom::{Handle, NodeData, RcDom};
use tracing::debug;

use crate::parsers::html::{
    clear_children, element_children, get_child_node_by_name, get_node_attr, get_node_name,
    get_own_text, placeholder_from_comment, restore_placeholders, serialize_children,
    set_node_attr, strip_placeholders, unguard_text, ApostropheScope,
};

use super::bindings::{extract_bindings, replace_marker, BINDING_SEPARATOR};
use super::exclude::ExcludeRule;
use super::map::{KeyCollision, TranslationMap};
use super::slug::{compute_slug, is_numeric_slug, prefixed_key};

/// 翻译键所在的属性
pub const TRANSLATE_ATTR: &str = "translate";
/// 绑定列表所在的属性
pub const TRANSLATE_VALUES_ATTR: &str = "translate-values";

/// 提取器配置
#[derive(Debug, Clone, Default)]
pub struct ExtractorConfig {
    /// 键前缀，允许为空
    pub label_prefix: String,
    /// 子树排除规则
    pub exclude: Option<ExcludeRule>,
    /// 整棵子树跳过的标签（如 `script`、`style`）
    pub skip_tags: Vec<String>,
    /// 还原提取内容中的模板标签时 `&apos;` 的处理范围
    pub apostrophe_scope: ApostropheScope,
}

/// 单个节点的提取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnit {
    pub key: String,
    pub value: String,
}

/// 提取统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub nodes_visited: usize,
    pub nodes_excluded: usize,
    pub translatable: usize,
    pub bindings: usize,
    pub collisions: usize,
}

impl ExtractionStats {
    fn absorb(&mut self, other: ExtractionStats) {
        self.nodes_visited += other.nodes_visited;
        self.nodes_excluded += other.nodes_excluded;
        self.translatable += other.translatable;
        self.bindings += other.bindings;
        self.collisions += other.collisions;
    }
}

/// 遍历一棵子树的结果，由调用方逐个合并
#[derive(Debug, Clone, Default)]
pub struct WalkOutcome {
    pub map: TranslationMap,
    pub next_counter: usize,
    pub stats: ExtractionStats,
    pub collisions: Vec<KeyCollision>,
}

impl WalkOutcome {
    fn empty(counter: usize) -> Self {
        Self {
            next_counter: counter,
            ..Default::default()
        }
    }

    /// 合并后续兄弟子树的结果，后写入的键覆盖先写入的
    fn absorb(&mut self, other: WalkOutcome) {
        let merged = self.map.merge(other.map);

        self.stats.absorb(other.stats);
        self.stats.collisions += merged.len();
        self.collisions.extend(other.collisions);
        self.collisions.extend(merged);
        self.next_counter = other.next_counter;
    }
}

/// DOM 文本提取器
pub struct Extractor<'a> {
    config: &'a ExtractorConfig,
}

impl<'a> Extractor<'a> {
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self { config }
    }

    /// 从 `<html>` 的子元素（`head`、`body`）开始提取整个文档
    pub fn extract(&self, dom: &RcDom) -> WalkOutcome {
        let roots = match get_child_node_by_name(&dom.document, "html") {
            Some(html) => element_children(&html),
            None => element_children(&dom.document),
        };

        let outcome = self.walk(&roots, 0);
        debug!(
            "提取完成: 访问 {} 个节点, 可翻译 {} 个, 排除 {} 个",
            outcome.stats.nodes_visited, outcome.stats.translatable, outcome.stats.nodes_excluded
        );
        outcome
    }

    /// 依次访问一组兄弟节点，计数器在它们之间顺延
    pub fn walk(&self, nodes: &[Handle], counter: usize) -> WalkOutcome {
        let mut outcome = WalkOutcome::empty(counter);
        for node in nodes {
            let child = self.visit(node, outcome.next_counter);
            outcome.absorb(child);
        }
        outcome
    }

    fn visit(&self, node: &Handle, counter: usize) -> WalkOutcome {
        let Some(tag_name) = get_node_name(node) else {
            return WalkOutcome::empty(counter);
        };

        if self.should_skip(node, tag_name) {
            debug!("跳过被排除的子树 <{}>", tag_name);
            let mut outcome = WalkOutcome::empty(counter);
            outcome.stats.nodes_excluded = 1;
            return outcome;
        }

        let index = counter;
        let counter = counter + 1;

        let slug = compute_slug(&strip_placeholders(&get_own_text(node)));

        if slug.is_empty() || is_numeric_slug(&slug) {
            let mut outcome = self.walk(&element_children(node), counter);
            outcome.stats.nodes_visited += 1;
            return outcome;
        }

        let (unit, bindings) = self.extract_unit(node, &slug, index);
        debug!("<{}> → {}", tag_name, unit.key);

        let mut map = TranslationMap::new();
        map.insert(unit.key, unit.value);

        WalkOutcome {
            map,
            next_counter: counter,
            stats: ExtractionStats {
                nodes_visited: 1,
                translatable: 1,
                bindings,
                ..Default::default()
            },
            collisions: Vec::new(),
        }
    }

    fn should_skip(&self, node: &Handle, tag_name: &str) -> bool {
        if self.config.skip_tags.iter().any(|tag| tag == tag_name) {
            return true;
        }

        self.config.exclude.as_ref().is_some_and(|rule| {
            let class_attr = get_node_attr(node, "class");
            rule.matches(tag_name, class_attr.as_deref())
        })
    }

    /// 把节点转换为翻译单元并就地改写节点，同时返回绑定数量
    fn extract_unit(&self, node: &Handle, slug: &str, index: usize) -> (TranslationUnit, usize) {
        let mut payload = if element_children(node).is_empty() {
            leaf_text(node)
        } else {
            restore_placeholders(&serialize_children(node), self.config.apostrophe_scope)
        };

        let key = prefixed_key(&self.config.label_prefix, slug);
        set_node_attr(node, TRANSLATE_ATTR, Some(key.clone()));
        clear_children(node);

        let bindings = extract_bindings(&payload);
        let binding_count = bindings.len();
        if binding_count > 0 {
            let marker = replace_marker(index);
            let values = format!("{} {}", marker, bindings.join(BINDING_SEPARATOR));
            set_node_attr(node, TRANSLATE_VALUES_ATTR, Some(values));
            payload = format!("{} {}", marker, payload);
        }

        let unit = TranslationUnit {
            key,
            value: clean_payload(&payload),
        };
        (unit, binding_count)
    }
}

/// 没有子元素的节点的载荷：直接文本，加上其中被隐藏的模板标签
fn leaf_text(node: &Handle) -> String {
    let mut text = String::new();
    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => text.push_str(&contents.borrow()),
            NodeData::Comment { contents } => {
                if let Some(tag) = placeholder_from_comment(contents) {
                    text.push_str(&tag);
                }
            }
            _ => {}
        }
    }
    // RCDATA elements hold the guarded form as plain text
    unguard_text(&text).into_owned()
}

fn clean_payload(payload: &str) -> String {
    payload.replacen("\r\n", "", 1).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::{markup_to_dom, serialize_fragment, FragmentWrapper};

    fn extract(markup: &str, config: &ExtractorConfig) -> (WalkOutcome, String) {
        let dom = markup_to_dom(&format!("<html><body>{}</body></html>", markup));
        let outcome = Extractor::new(config).extract(&dom);
        (outcome, serialize_fragment(&dom, &FragmentWrapper::BODY))
    }

    #[test]
    fn leaf_with_binding() {
        let (outcome, html) = extract("<div><p>Hello {{name}}</p></div>", &Default::default());

        // head=0, body=1, div=2, p=3
        assert_eq!(outcome.map.get("_hello"), Some("REPLACE_3 Hello {{name}}"));
        assert_eq!(
            html,
            r#"<div><p translate="_hello" translate-values="REPLACE_3 {{name}}"></p></div>"#
        );
        assert_eq!(outcome.next_counter, 4);
        assert_eq!(outcome.stats.bindings, 1);
    }

    #[test]
    fn mixed_content_uses_inner_markup() {
        let (outcome, html) = extract("<p>Read the <a href=\"/docs\">docs</a></p>", &Default::default());
        assert_eq!(
            outcome.map.get("_read_the"),
            Some("Read the <a href=\"/docs\">docs</a>")
        );
        assert_eq!(html, r#"<p translate="_read_the"></p>"#);
        assert_eq!(outcome.stats.translatable, 1);
    }

    #[test]
    fn numeric_node_recurses_into_children() {
        let (outcome, html) = extract("<p>12 <b>items</b></p><span>2024</span>", &Default::default());
        assert_eq!(outcome.map.keys().collect::<Vec<_>>(), vec!["_items"]);
        assert_eq!(
            html,
            r#"<p>12 <b translate="_items"></b></p><span>2024</span>"#
        );
    }

    #[test]
    fn excluded_subtree_is_untouched_and_not_counted() {
        let config = ExtractorConfig {
            exclude: ExcludeRule::parse("div.no-i18n").unwrap(),
            ..Default::default()
        };
        let (outcome, html) = extract(
            r#"<div class="box no-i18n"><p>Secret {{x}}</p></div><p>Public {{y}}</p>"#,
            &config,
        );

        assert!(!outcome.map.contains_key("_secret"));
        // head=0, body=1, excluded div not counted, p=2
        assert_eq!(outcome.map.get("_public"), Some("REPLACE_2 Public {{y}}"));
        assert!(html.starts_with(r#"<div class="box no-i18n"><p>Secret {{x}}</p></div>"#));
        assert_eq!(outcome.stats.nodes_excluded, 1);
    }

    #[test]
    fn skip_tags_behave_like_exclusion() {
        let config = ExtractorConfig {
            skip_tags: vec!["script".to_string()],
            ..Default::default()
        };
        let (outcome, _) = extract("<script>var greeting = 1;</script><p>Hi</p>", &config);
        assert_eq!(outcome.map.keys().collect::<Vec<_>>(), vec!["_hi"]);
    }

    #[test]
    fn label_prefix_and_collisions() {
        let config = ExtractorConfig {
            label_prefix: "home".to_string(),
            ..Default::default()
        };
        let (outcome, _) = extract("<p>Save</p><p>Save</p><p>Save!</p>", &config);

        assert_eq!(outcome.map.len(), 1);
        assert_eq!(outcome.map.get("home_save"), Some("Save!"));
        assert_eq!(outcome.collisions.len(), 2);
        assert_eq!(
            outcome.collisions.iter().filter(|c| c.is_conflict()).count(),
            1
        );
        assert_eq!(outcome.stats.translatable, 3);
        assert_eq!(outcome.stats.collisions, 2);
    }

    #[test]
    fn payload_restores_template_tags() {
        let dom = markup_to_dom(
            "<html><body><p>Hi <!-- <%= user %> --><b>!</b></p></body></html>",
        );
        let outcome = Extractor::new(&Default::default()).extract(&dom);
        assert_eq!(outcome.map.get("_hi"), Some("Hi <%= user %><b>!</b>"));
    }

    #[test]
    fn leaf_payload_keeps_template_tags() {
        let dom = markup_to_dom("<html><body><p>Hello <!-- <%= user %> -->!<!-- note --></p></body></html>");
        let outcome = Extractor::new(&Default::default()).extract(&dom);
        assert_eq!(outcome.map.get("_hello"), Some("Hello <%= user %>!"));
    }

    #[test]
    fn rcdata_placeholder_is_not_text() {
        let dom = markup_to_dom(
            "<html><head><title><!-- <%= title %> --></title></head><body></body></html>",
        );
        let outcome = Extractor::new(&Default::default()).extract(&dom);
        assert!(outcome.map.is_empty());

        let dom = markup_to_dom(
            "<html><head><title><!-- <%= site %> --> - Home</title></head><body></body></html>",
        );
        let outcome = Extractor::new(&Default::default()).extract(&dom);
        assert_eq!(outcome.map.get("_home"), Some("<%= site %> - Home"));
    }

    #[test]
    fn payload_is_trimmed() {
        let (outcome, _) = extract("<p>\n   Welcome back\n</p>", &Default::default());
        assert_eq!(outcome.map.get("_welcome_back"), Some("Welcome back"));
    }
}
