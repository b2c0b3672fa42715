//! 搜索框的自动补全

use crate::active::{needs_quotes, FilterKind};
use crate::models::Facets;
use crate::query::ReadTimeFilter;

/// 每类取值最多给出的建议数
const MAX_VALUE_SUGGESTIONS: usize = 5;

/// 阅读时间候选项的单位后缀，应用时去掉
const READ_TIME_SUFFIX: &str = " min";

/// 阅读时间的候选项：`<5 min`、`5-10 min`、`>10 min`
pub fn read_time_options() -> Vec<String> {
    ReadTimeFilter::ALL
        .into_iter()
        .map(|bucket| format!("{}{}", bucket.operator_value(), READ_TIME_SUFFIX))
        .collect()
}

/// 根据当前输入给出补全建议
///
/// 输入以空格结尾时建议操作符；最后一个词是操作符时建议取值；
/// 否则建议以该词开头的操作符。最后一个词按空格切分，不考虑引号。
pub fn suggestions(query: &str, facets: &Facets) -> Vec<String> {
    if query.ends_with(' ') {
        let mut ops: Vec<String> = [FilterKind::Category, FilterKind::Year, FilterKind::ReadTime]
            .into_iter()
            .map(FilterKind::prefix)
            .filter(|prefix| !query.contains(*prefix))
            .map(str::to_string)
            .collect();
        ops.push(FilterKind::Tag.prefix().to_string());
        return ops;
    }

    let last_token = query.rsplit(' ').next().unwrap_or("");
    if last_token.is_empty() {
        return Vec::new();
    }

    match FilterKind::split_token(last_token) {
        Some((FilterKind::Tag, rest)) => matching_values(&facets.tags, rest),
        Some((FilterKind::Category, rest)) => matching_values(&facets.categories, rest),
        Some((FilterKind::Year, rest)) => matching_values(&facets.years, rest),
        Some((FilterKind::ReadTime, _)) => read_time_options(),
        None => {
            let typed = last_token.to_lowercase();
            FilterKind::ALL
                .into_iter()
                .map(FilterKind::prefix)
                .filter(|prefix| prefix.starts_with(typed.as_str()))
                .map(str::to_string)
                .collect()
        }
    }
}

// 忽略大小写的包含匹配
fn matching_values(values: &[String], typed: &str) -> Vec<String> {
    let typed = typed.replace('"', "").to_lowercase();
    values
        .iter()
        .filter(|v| v.to_lowercase().contains(&typed))
        .take(MAX_VALUE_SUGGESTIONS)
        .cloned()
        .collect()
}

/// 用选中的建议替换最后一个词
///
/// 选中操作符时不追加空格，方便继续输入取值；选中取值时追加空格。
pub fn apply_suggestion(query: &str, suggestion: &str) -> String {
    let suggestion = suggestion.replace(READ_TIME_SUFFIX, "");
    let is_operator = suggestion.ends_with(':');
    let safe = if !is_operator && needs_quotes(&suggestion) {
        format!("\"{}\"", suggestion)
    } else {
        suggestion
    };

    let mut tokens: Vec<String> = query.split(' ').map(str::to_string).collect();
    if let Some(last) = tokens.last_mut() {
        *last = match last.split_once(':') {
            Some((prefix, _)) if !is_operator => format!("{}:{}", prefix, safe),
            _ => safe,
        };
    }

    let mut new_query = tokens.join(" ");
    if !is_operator {
        new_query.push(' ');
    }
    new_query
}
