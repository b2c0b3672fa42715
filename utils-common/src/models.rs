use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 文章元数据 - 搜索和筛选所需的文章基本信息
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostMetadata {
    /// 文章唯一标识符（小写的文件名）
    pub slug: String,
    /// 文章标题
    pub title: String,
    /// 文章摘要，没有时为空字符串
    #[serde(default)]
    pub excerpt: String,
    /// 文章分类
    #[serde(default)]
    pub category: Option<String>,
    /// 文章标签列表
    ///
    /// `None` 与空列表不同：只有完全没有标签的文章才会把分类当作标签使用。
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// 发布日期，保留 front matter 中的原始写法
    pub date: String,
    /// 阅读时间，例如 "7 min read"
    #[serde(default)]
    pub read_time: String,
}

impl PostMetadata {
    /// 有效标签集合（小写）
    ///
    /// 文章没有标签但有分类时，分类作为唯一的标签。
    pub fn effective_tags(&self) -> Vec<String> {
        match (&self.tags, self.category.as_deref()) {
            (Some(tags), _) => tags.iter().map(|t| t.to_lowercase()).collect(),
            (None, Some(category)) if !category.is_empty() => vec![category.to_lowercase()],
            _ => Vec::new(),
        }
    }

    /// 用于关键词匹配的文本：标题和摘要以空格连接后转小写
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.excerpt).to_lowercase()
    }
}

/// 索引元数据 - 存储索引的基本信息
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct IndexMetadata {
    /// 索引包含的文章数量
    pub post_count: usize,
    /// 索引包含的标签数量
    pub tag_count: usize,
    /// 索引包含的分类数量
    pub category_count: usize,
    /// 索引创建时间
    pub created_at: DateTime<Utc>,
    /// 索引版本
    pub version: String,
}
