use once_cell::sync::Lazy;
use regex::Regex;

/// 阅读速度（词/分钟）
pub const WORDS_PER_MINUTE: usize = 100;

static LINK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid link regex"));
static MARKUP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[#*`]").expect("valid markup regex"));
static MINUTES_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid digit regex"));

/// 根据 markdown 正文估算阅读时间，返回 "N min read"
///
/// 链接只保留文字部分，`#`、`*` 和反引号不计入。空正文按一个词计算。
pub fn estimate_read_time(markdown: &str) -> String {
    let without_links = LINK_REGEX.replace_all(markdown, "$1");
    let clean = MARKUP_REGEX.replace_all(&without_links, "");

    let word_count = clean.split_whitespace().count().max(1);
    let minutes = word_count.div_ceil(WORDS_PER_MINUTE);

    format!("{} min read", minutes)
}

/// 从阅读时间字符串中提取分钟数
///
/// 取第一段连续数字，没有数字时为 0，超出范围时取最大值。
pub fn read_time_minutes(read_time: &str) -> u64 {
    MINUTES_REGEX
        .find(read_time)
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .unwrap_or(0)
}
