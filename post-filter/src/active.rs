//! 当前生效的筛选条件，以及在查询字符串上增删条件

use serde::{Deserialize, Serialize};

use crate::query::{split_query, CATEGORY_PREFIX, READTIME_PREFIX, TAG_PREFIX, YEAR_PREFIX};

/// 筛选操作符类型
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Tag,
    Category,
    Year,
    ReadTime,
}

impl FilterKind {
    pub const ALL: [FilterKind; 4] = [Self::Tag, Self::Category, Self::Year, Self::ReadTime];

    /// 查询语法中的前缀，例如 `tag:`
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Tag => TAG_PREFIX,
            Self::Category => CATEGORY_PREFIX,
            Self::Year => YEAR_PREFIX,
            Self::ReadTime => READTIME_PREFIX,
        }
    }

    /// 按名称查找，名称即不带冒号的前缀
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.prefix().trim_end_matches(':') == name)
    }

    /// 识别词条的操作符，返回类型和前缀之后的部分
    pub fn split_token(token: &str) -> Option<(Self, &str)> {
        Self::ALL
            .into_iter()
            .find_map(|kind| token.strip_prefix(kind.prefix()).map(|rest| (kind, rest)))
    }
}

/// 一个生效的筛选条件，用于界面上的标签展示
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ActiveFilter {
    #[serde(rename = "type")]
    pub kind: FilterKind,
    /// 去掉所有引号后的值
    pub value: String,
    /// 查询中的原始词条
    pub full: String,
}

/// 列出查询中的所有操作符词条
///
/// 这里只做拆分，不校验取值，无效的 `readtime:` 也会列出。
pub fn active_filters(query: &str) -> Vec<ActiveFilter> {
    split_query(query)
        .into_iter()
        .filter_map(|part| {
            FilterKind::split_token(part).map(|(kind, rest)| ActiveFilter {
                kind,
                value: rest.replace('"', ""),
                full: part.to_string(),
            })
        })
        .collect()
}

/// 值中含有空格、`<`、`>` 或 `-` 时需要加引号
pub fn needs_quotes(value: &str) -> bool {
    value.contains([' ', '<', '>', '-'])
}

/// 把值格式化为查询中的写法，必要时加引号
pub fn quote_value(value: &str) -> String {
    if needs_quotes(value) {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

/// 向查询中添加条件
///
/// 除 `tag:` 外，同类条件只保留一个，新值替换旧值。
/// 完全相同的条件已存在时返回原查询。
pub fn add_filter(query: &str, kind: FilterKind, value: &str) -> String {
    let filter_string = format!("{}{}", kind.prefix(), quote_value(value));

    let mut parts = split_query(query);
    if kind != FilterKind::Tag {
        parts.retain(|part| !part.starts_with(kind.prefix()));
    }

    if parts.contains(&filter_string.as_str()) {
        return query.to_string();
    }

    parts.push(&filter_string);
    parts.join(" ")
}

/// 从查询中移除与 `full` 完全相同的词条
pub fn remove_filter(query: &str, full: &str) -> String {
    split_query(query)
        .into_iter()
        .filter(|part| *part != full)
        .collect::<Vec<_>>()
        .join(" ")
}
