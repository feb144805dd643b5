//! 翻译文本提取
//!
//! - `bindings` - `{{...}}` 绑定表达式的切分与提取
//! - `slug` - 翻译键的生成
//! - `exclude` - 子树排除规则
//! - `map` - 键→文本字典
//! - `extractor` - 遍历 DOM、改写节点并收集字典

pub mod bindings;
pub mod exclude;
pub mod extractor;
pub mod map;
pub mod slug;

pub use bindings::{extract_bindings, split_on_bindings, Segment};
pub use exclude::ExcludeRule;
pub use extractor::{
    ExtractionStats, Extractor, ExtractorConfig, TranslationUnit, WalkOutcome, TRANSLATE_ATTR,
    TRANSLATE_VALUES_ATTR,
};
pub use map::{CollisionPolicy, KeyCollision, TranslationMap};
pub use slug::{compute_slug, is_numeric_slug, prefixed_key};
