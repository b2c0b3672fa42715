use serde::{Deserialize, Serialize};
use utils_common::models::{IndexMetadata, PostMetadata};

/// 默认每页条数
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// 筛选索引 - 文章列表和可选的筛选值
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FilterIndex {
    pub metadata: IndexMetadata,
    /// 所有文章，按发布时间从新到旧
    pub posts: Vec<PostMetadata>,
    pub facets: Facets,
}

/// 可选的筛选值，用于下拉选择和自动补全
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    /// 所有标签（无标签文章以分类代替），升序
    pub tags: Vec<String>,
    /// 所有分类，升序
    pub categories: Vec<String>,
    /// 所有年份，降序
    pub years: Vec<String>,
}

/// 筛选参数 - 客户端传递的筛选条件
#[derive(Deserialize, Debug, Default)]
pub struct FilterParams {
    /// 搜索查询 (可选)
    pub query: Option<String>,
    /// 分页 - 当前页码 (可选, 默认为1)
    pub page: Option<usize>,
    /// 分页 - 每页条数 (可选, 默认为9)
    pub limit: Option<usize>,
}

/// 筛选结果 - 返回给客户端的筛选结果
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FilterResult {
    /// 当前页的文章
    pub posts: Vec<PostMetadata>,
    /// 筛选结果总数
    pub total: usize,
    /// 当前页码
    pub page: usize,
    /// 每页条数
    pub limit: usize,
    /// 总页数
    pub total_pages: usize,
}
