//! 搜索查询解析
//!
//! 查询语法：以空白分隔的词条，`tag:`、`category:`、`year:`、`readtime:`
//! 开头的词条是筛选操作符，其余词条作为关键词。双引号内的空白不分词，
//! 例如 `category:"Bug Bounty"` 是一个词条。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 分词规则：连续的非空白非引号字符，或成对引号包围的片段
///
/// 空白与浏览器端一致：包含 U+FEFF，不包含 U+0085。
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?:[^\t\n\x0B\x0C\r \xA0\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}"]+|"[^"]*")+"#,
    )
    .expect("valid token regex")
});

pub const TAG_PREFIX: &str = "tag:";
pub const CATEGORY_PREFIX: &str = "category:";
pub const YEAR_PREFIX: &str = "year:";
pub const READTIME_PREFIX: &str = "readtime:";

/// 阅读时间区间
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReadTimeFilter {
    /// 少于 5 分钟
    Short,
    /// 5 到 10 分钟（含两端）
    Medium,
    /// 超过 10 分钟
    Long,
}

impl ReadTimeFilter {
    pub const ALL: [Self; 3] = [Self::Short, Self::Medium, Self::Long];

    /// 解析 `readtime:` 的取值，只接受 `<5`、`5-10`、`>10`
    pub fn from_operator_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bucket| bucket.operator_value() == value)
    }

    /// 查询语法中的写法
    pub fn operator_value(self) -> &'static str {
        match self {
            Self::Short => "<5",
            Self::Medium => "5-10",
            Self::Long => ">10",
        }
    }

    pub fn matches(self, minutes: u64) -> bool {
        match self {
            Self::Short => minutes < 5,
            Self::Medium => (5..=10).contains(&minutes),
            Self::Long => minutes > 10,
        }
    }
}

/// 解析后的筛选条件
///
/// 每次查询变化都重新构建，字段互相独立，缺省表示不限制。
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    /// 去掉操作符后剩余的关键词
    pub text: String,
    /// 必须全部包含的标签，按出现顺序
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub year: Option<String>,
    pub read_time_filter: Option<ReadTimeFilter>,
}

impl SearchFilters {
    /// 是否没有任何条件
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
            && self.tags.is_empty()
            && self.category.is_none()
            && self.year.is_none()
            && self.read_time_filter.is_none()
    }
}

/// 查询中的空白字符
pub fn is_query_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// 查询是否为空或只有空白
pub fn is_blank_query(query: &str) -> bool {
    query.chars().all(is_query_whitespace)
}

/// 按空白分词，引号内的内容保持为一个词条
///
/// 引号保留在词条中。没有闭合的引号不构成词条的一部分，会被跳过。
pub fn split_query(query: &str) -> Vec<&str> {
    TOKEN_REGEX.find_iter(query).map(|m| m.as_str()).collect()
}

/// 去掉开头和结尾各一个双引号（分别判断，不要求成对）
pub fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

/// 解析搜索查询
///
/// `tag:` 可以出现多次并累加；`category:` 和 `year:` 以最后一次为准；
/// `readtime:` 的取值无效时直接忽略。引号去除后为空的值不记录。
pub fn parse_search_query(query: &str) -> SearchFilters {
    let mut filters = SearchFilters::default();
    let mut text_parts: Vec<&str> = Vec::new();

    for part in split_query(query) {
        if let Some(rest) = part.strip_prefix(TAG_PREFIX) {
            let value = strip_quotes(rest);
            if !value.is_empty() {
                filters.tags.push(value.to_string());
            }
        } else if let Some(rest) = part.strip_prefix(CATEGORY_PREFIX) {
            let value = strip_quotes(rest);
            if !value.is_empty() {
                filters.category = Some(value.to_string());
            }
        } else if let Some(rest) = part.strip_prefix(YEAR_PREFIX) {
            let value = strip_quotes(rest);
            if !value.is_empty() {
                filters.year = Some(value.to_string());
            }
        } else if let Some(rest) = part.strip_prefix(READTIME_PREFIX) {
            if let Some(bucket) = ReadTimeFilter::from_operator_value(strip_quotes(rest)) {
                filters.read_time_filter = Some(bucket);
            }
        } else {
            text_parts.push(strip_quotes(part));
        }
    }

    filters.text = text_parts.join(" ");
    filters
}
