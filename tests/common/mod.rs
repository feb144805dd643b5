// 集成测试公共模块
//
// 提供测试辅助工具和共享功能

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use html_i18n_extractor::core::{extract_from_markup, ExtractionOutput, ExtractorOptions};
use html_i18n_extractor::parsers::html::{
    get_node_attr, get_node_name, markup_to_dom, serialize_children,
};
use markup5ever_rcdom::{Handle, NodeData};
use tempfile::TempDir;

/// 被改写元素的快照
#[derive(Debug, Clone)]
pub struct AnnotatedElement {
    pub tag: String,
    pub key: String,
    pub values: Option<String>,
    pub inner: String,
}

/// HTML测试辅助工具
pub struct HtmlTestHelper;

impl HtmlTestHelper {
    /// 用默认选项提取
    pub fn extract(markup: &str) -> ExtractionOutput {
        Self::extract_with(markup, &ExtractorOptions::default())
    }

    pub fn extract_with(markup: &str, options: &ExtractorOptions) -> ExtractionOutput {
        extract_from_markup(markup, options).expect("extraction should succeed")
    }

    /// 重新解析输出，收集所有带 `translate` 属性的元素
    pub fn annotated_elements(markup: &str) -> Vec<AnnotatedElement> {
        fn collect(node: &Handle, out: &mut Vec<AnnotatedElement>) {
            if let Some(key) = get_node_attr(node, "translate") {
                out.push(AnnotatedElement {
                    tag: get_node_name(node).unwrap_or_default().to_string(),
                    key,
                    values: get_node_attr(node, "translate-values"),
                    inner: serialize_children(node),
                });
            }
            for child in node.children.borrow().iter() {
                if matches!(child.data, NodeData::Element { .. }) {
                    collect(child, out);
                }
            }
        }

        let dom = markup_to_dom(markup);
        let mut out = Vec::new();
        collect(&dom.document, &mut out);
        out
    }
}

/// 带临时目录的测试环境
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("failed to write test input");
        path
    }

    pub fn read_file(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("failed to read test output")
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    /// 目录下的文件名，已排序
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.root())
            .expect("failed to list temp dir")
            .map(|entry| {
                entry
                    .expect("bad dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}
