//! # 解析器模块
//!
//! - `html` - HTML文档解析、DOM操作、模板标签保护、序列化

pub mod html;

pub use html::{
    hide_placeholders, html_to_dom, restore_placeholders, serialize_document, serialize_fragment,
    ApostropheScope,
};
