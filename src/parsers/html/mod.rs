//! HTML解析和处理模块
//!
//! - `dom`: 基础DOM操作
//! - `fragment`: 模板片段的包装
//! - `placeholders`: 模板标签的隐藏与还原
//! - `serializer`: 序列化功能

pub mod dom;
pub mod fragment;
pub mod placeholders;
pub mod serializer;

pub use dom::{
    clear_children, decode_html, element_children, get_child_node_by_name, get_node_attr,
    get_node_name, get_own_text, has_attrs, html_to_dom, markup_to_dom, set_node_attr,
};
pub use fragment::{leading_tag_name, skip_leading_noise, FragmentWrapper};
pub use placeholders::{
    hide_placeholders, placeholder_from_comment, restore_placeholders, strip_placeholders,
    unguard_text, ApostropheScope,
};
pub use serializer::{serialize_children, serialize_document, serialize_fragment};
