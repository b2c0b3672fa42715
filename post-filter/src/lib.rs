use once_cell::sync::OnceCell;
use std::sync::Mutex;
use wasm_bindgen::prelude::*;
use web_sys::console;
use utils_common::compression::from_compressed;
use utils_common::models::PostMetadata;

// 导出模块
pub mod active;
pub mod builder;
pub mod error;
pub mod filter;
pub mod models;
pub mod query;
pub mod related;
pub mod suggest;

pub use active::{active_filters, add_filter, remove_filter, ActiveFilter, FilterKind};
pub use error::FilterError;
pub use filter::{apply_filters, filter_posts};
pub use models::{Facets, FilterIndex, FilterParams, FilterResult, DEFAULT_PAGE_SIZE};
pub use query::{is_blank_query, parse_search_query, split_query, ReadTimeFilter, SearchFilters};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// 全局索引存储，只在 JS 接口层使用
static INDEX: OnceCell<Mutex<Option<FilterIndex>>> = OnceCell::new();

/// 初始化函数 - 设置错误处理
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 版本信息
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// 按查询筛选并分页
///
/// 页码从 1 开始，超出范围时取最后一页。
pub fn paginate(posts: &[PostMetadata], params: &FilterParams) -> FilterResult {
    let query = params.query.as_deref().unwrap_or("");
    let filtered = filter_posts(posts, query);

    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
    let total = filtered.len();
    let total_pages = total.div_ceil(limit);
    let page = params.page.unwrap_or(1).max(1).min(total_pages.max(1));

    let start = (page - 1) * limit;
    let end = (start + limit).min(total);

    let posts = if start < total {
        filtered[start..end].iter().map(|post| (*post).clone()).collect()
    } else {
        Vec::new()
    };

    FilterResult {
        posts,
        total,
        page,
        limit,
        total_pages,
    }
}

/// 文章过滤器 - 管理已加载的索引
pub struct PostFilter;

impl PostFilter {
    /// 加载索引数据，已有索引时替换
    pub fn load_index(data: &[u8]) -> Result<(), FilterError> {
        let index: FilterIndex = from_compressed(data)?;
        tracing::debug!(posts = index.posts.len(), "筛选索引已加载");

        let cell = INDEX.get_or_init(|| Mutex::new(None));
        let mut guard = cell.lock().map_err(|_| FilterError::LockPoisoned)?;
        *guard = Some(index);
        Ok(())
    }

    /// 在已加载的索引上执行操作
    pub fn with_index<T>(f: impl FnOnce(&FilterIndex) -> T) -> Result<T, FilterError> {
        let cell = INDEX.get().ok_or(FilterError::NotInitialized)?;
        let guard = cell.lock().map_err(|_| FilterError::LockPoisoned)?;
        let index = guard.as_ref().ok_or(FilterError::NotInitialized)?;
        Ok(f(index))
    }

    /// 筛选文章
    pub fn filter_posts(params: &FilterParams) -> Result<FilterResult, FilterError> {
        Self::with_index(|index| paginate(&index.posts, params))
    }

    /// 当前索引的可选筛选值
    pub fn facets() -> Result<Facets, FilterError> {
        Self::with_index(|index| index.facets.clone())
    }

    /// 与指定文章相关的文章
    pub fn similar_posts(slug: &str, limit: usize) -> Result<Vec<PostMetadata>, FilterError> {
        Self::with_index(|index| {
            let Some(current) = index.posts.iter().find(|post| post.slug == slug) else {
                return Vec::new();
            };
            let tags = current.tags.clone().unwrap_or_default();
            related::similar_posts(&index.posts, slug, &tags, current.category.as_deref(), limit)
                .into_iter()
                .cloned()
                .collect()
        })
    }
}

fn to_js<T: serde::Serialize>(value: &T, what: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("序列化{}失败: {}", what, e)))
}

fn js_error(e: FilterError) -> JsValue {
    console::log_1(&JsValue::from_str(&format!("筛选失败: {}", e)));
    JsValue::from_str(&e.to_string())
}

/// 文章过滤器JS接口 - 提供给JavaScript使用的筛选API
#[wasm_bindgen]
pub struct PostFilterJS;

#[wasm_bindgen]
impl PostFilterJS {
    /// 初始化过滤器并加载索引
    #[wasm_bindgen]
    pub fn init(index_data: &[u8]) -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        PostFilter::load_index(index_data).map_err(js_error)
    }

    /// 解析查询字符串
    #[wasm_bindgen]
    pub fn parse_query(query: &str) -> Result<JsValue, JsValue> {
        to_js(&parse_search_query(query), "查询")
    }

    /// 筛选已加载索引中的文章，参数为 FilterParams 的 JSON
    #[wasm_bindgen]
    pub fn filter_posts(params_json: &str) -> Result<JsValue, JsValue> {
        let params: FilterParams = serde_json::from_str(params_json)
            .map_err(|e| js_error(FilterError::Params(e)))?;
        let result = PostFilter::filter_posts(&params).map_err(js_error)?;
        to_js(&result, "结果")
    }

    /// 筛选调用方传入的文章列表（JSON 数组），不需要先加载索引
    #[wasm_bindgen]
    pub fn filter_list(posts_json: &str, query: &str) -> Result<JsValue, JsValue> {
        let posts: Vec<PostMetadata> = serde_json::from_str(posts_json)
            .map_err(|e| js_error(FilterError::Params(e)))?;
        let filtered: Vec<&PostMetadata> = filter_posts(&posts, query);
        to_js(&filtered, "结果")
    }

    /// 查询中生效的筛选条件
    #[wasm_bindgen]
    pub fn active_filters(query: &str) -> Result<JsValue, JsValue> {
        to_js(&active_filters(query), "筛选条件")
    }

    /// 添加筛选条件，`kind` 为 tag、category、year 或 readtime
    #[wasm_bindgen]
    pub fn add_filter(query: &str, kind: &str, value: &str) -> Result<String, JsValue> {
        let kind = FilterKind::from_name(kind)
            .ok_or_else(|| JsValue::from_str(&format!("未知的筛选类型: {}", kind)))?;
        Ok(add_filter(query, kind, value))
    }

    /// 移除筛选条件
    #[wasm_bindgen]
    pub fn remove_filter(query: &str, full: &str) -> String {
        remove_filter(query, full)
    }

    /// 自动补全建议，索引未加载时只建议操作符
    #[wasm_bindgen]
    pub fn suggestions(query: &str) -> Result<JsValue, JsValue> {
        let facets = PostFilter::facets().unwrap_or_default();
        to_js(&suggest::suggestions(query, &facets), "建议")
    }

    /// 应用补全建议
    #[wasm_bindgen]
    pub fn apply_suggestion(query: &str, suggestion: &str) -> String {
        suggest::apply_suggestion(query, suggestion)
    }

    /// 获取所有标签
    #[wasm_bindgen]
    pub fn get_all_tags() -> Result<JsValue, JsValue> {
        let facets = PostFilter::facets().map_err(js_error)?;
        to_js(&facets.tags, "标签")
    }

    /// 获取所有分类
    #[wasm_bindgen]
    pub fn get_categories() -> Result<JsValue, JsValue> {
        let facets = PostFilter::facets().map_err(js_error)?;
        to_js(&facets.categories, "分类")
    }

    /// 获取所有年份，从新到旧
    #[wasm_bindgen]
    pub fn get_years() -> Result<JsValue, JsValue> {
        let facets = PostFilter::facets().map_err(js_error)?;
        to_js(&facets.years, "年份")
    }

    /// 相关文章，`limit` 为 0 时使用默认数量
    #[wasm_bindgen]
    pub fn similar_posts(slug: &str, limit: usize) -> Result<JsValue, JsValue> {
        let limit = if limit == 0 { related::DEFAULT_SIMILAR_LIMIT } else { limit };
        let posts = PostFilter::similar_posts(slug, limit).map_err(js_error)?;
        to_js(&posts, "相关文章")
    }
}
