use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::{Datelike, Utc};
use tracing::{debug, info};
use utils_common::compression::{to_compressed, INDEX_FORMAT_VERSION};
use utils_common::models::{IndexMetadata, PostMetadata};
use utils_common::parse_post_date;

use crate::error::FilterError;
use crate::models::{Facets, FilterIndex};

/// 筛选索引构建器
#[derive(Debug, Default)]
pub struct FilterBuilder {
    posts: Vec<PostMetadata>,
}

impl FilterBuilder {
    /// 创建新的筛选索引构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加文章到索引构建器
    pub fn add_post(&mut self, post: PostMetadata) {
        self.posts.push(post);
    }

    /// 构建筛选索引
    ///
    /// 文章按发布时间从新到旧排列，日期无效的排在最后。
    pub fn build_filter_index(&self) -> Result<FilterIndex, FilterError> {
        if self.posts.is_empty() {
            return Err(FilterError::NoPosts);
        }

        info!(posts = self.posts.len(), "开始构建筛选索引");

        let mut posts = self.posts.clone();
        posts.sort_by_key(|post| Reverse(parse_post_date(&post.date)));

        let facets = build_facets(&posts);
        debug!(
            tags = facets.tags.len(),
            categories = facets.categories.len(),
            years = facets.years.len(),
            "筛选值统计完成"
        );

        let metadata = IndexMetadata {
            post_count: posts.len(),
            tag_count: facets.tags.len(),
            category_count: facets.categories.len(),
            created_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        };

        Ok(FilterIndex {
            metadata,
            posts,
            facets,
        })
    }

    /// 保存筛选索引到文件
    pub fn save_filter_index(&self, path: impl AsRef<Path>) -> Result<(), FilterError> {
        let path = path.as_ref();
        let filter_index = self.build_filter_index()?;

        let compressed = to_compressed(&filter_index, INDEX_FORMAT_VERSION)?;
        fs::write(path, &compressed)?;

        info!(
            path = %path.display(),
            bytes = compressed.len(),
            posts = filter_index.metadata.post_count,
            "筛选索引已写入文件"
        );
        Ok(())
    }
}

/// 从文章列表中收集可选的标签、分类和年份
///
/// 没有标签的文章用分类代替标签。年份从新到旧。
pub fn build_facets(posts: &[PostMetadata]) -> Facets {
    let mut tags = BTreeSet::new();
    let mut categories = BTreeSet::new();
    let mut years = BTreeSet::new();

    for post in posts {
        let category = post.category.as_deref().filter(|c| !c.is_empty());

        match (&post.tags, category) {
            (Some(post_tags), _) => tags.extend(post_tags.iter().cloned()),
            (None, Some(category)) => {
                tags.insert(category.to_string());
            }
            (None, None) => {}
        }

        if let Some(category) = category {
            categories.insert(category.to_string());
        }

        if let Some(date) = parse_post_date(&post.date) {
            years.insert(date.year());
        }
    }

    Facets {
        tags: tags.into_iter().collect(),
        categories: categories.into_iter().collect(),
        years: years.into_iter().rev().map(|y| y.to_string()).collect(),
    }
}
