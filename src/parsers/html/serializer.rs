use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use markup5ever_rcdom::{Handle, RcDom, SerializableHandle};

use super::dom::{get_child_node_by_name, get_node_name, has_attrs};
use super::fragment::FragmentWrapper;

/// 序列化整个文档
pub fn serialize_document(dom: &RcDom) -> String {
    serialize_handle(&dom.document, TraversalScope::IncludeNode)
}

/// 序列化节点的内部标记（相当于 innerHTML）
pub fn serialize_children(node: &Handle) -> String {
    serialize_handle(node, TraversalScope::ChildrenOnly(None))
}

/// 序列化片段文档，去掉解析时补上的 `<html><head></head><body>` 外壳和表格容器
///
/// 片段里被解析器挪进 `<head>` 的元素（`<title>`、`<link>` 等）排在前面保留。
/// 合成容器本身被改写过（带上了属性）时连同容器一起输出，避免其内容丢失。
pub fn serialize_fragment(dom: &RcDom, wrapper: &FragmentWrapper) -> String {
    let Some(html) = get_child_node_by_name(&dom.document, "html") else {
        return serialize_document(dom);
    };

    let mut out = String::new();
    if let Some(head) = get_child_node_by_name(&html, "head") {
        out.push_str(&serialize_container(&head, &[]));
    }
    if let Some(body) = get_child_node_by_name(&html, "body") {
        out.push_str(&serialize_container(&body, wrapper.containers()));
    }
    out
}

fn serialize_container(node: &Handle, containers: &[&str]) -> String {
    if has_attrs(node) {
        return serialize_handle(node, TraversalScope::IncludeNode);
    }
    let Some((inner, rest)) = containers.split_first() else {
        return serialize_children(node);
    };

    // Content the parser moved out of the inner container stays in place
    let mut out = String::new();
    let mut descended = false;
    for child in node.children.borrow().iter() {
        if !descended && get_node_name(child) == Some(*inner) {
            descended = true;
            out.push_str(&serialize_container(child, rest));
        } else {
            out.push_str(&serialize_handle(child, TraversalScope::IncludeNode));
        }
    }
    out
}

fn serialize_handle(node: &Handle, traversal_scope: TraversalScope) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let serializable: SerializableHandle = node.clone().into();
    let opts = SerializeOpts {
        traversal_scope,
        ..Default::default()
    };

    // Writing into a Vec<u8> cannot fail
    if let Err(err) = serialize(&mut buf, &serializable, opts) {
        tracing::error!("DOM序列化失败: {}", err);
    }

    String::from_utf8_lossy(&buf).into_owned()
}
