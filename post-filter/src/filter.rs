use utils_common::{post_year, read_time_minutes, PostMetadata};

use crate::query::{is_blank_query, parse_search_query, SearchFilters};

impl SearchFilters {
    /// 判断文章是否满足所有条件
    ///
    /// 各条件之间是“与”的关系，未设置的条件不做限制。
    pub fn matches(&self, post: &PostMetadata) -> bool {
        self.matches_text(post)
            && self.matches_tags(post)
            && self.matches_category(post)
            && self.matches_year(post)
            && self.matches_read_time(post)
    }

    // 关键词是标题加摘要的子串即可，不分词
    fn matches_text(&self, post: &PostMetadata) -> bool {
        let search_text = self.text.to_lowercase();
        search_text.is_empty() || post.search_text().contains(&search_text)
    }

    fn matches_tags(&self, post: &PostMetadata) -> bool {
        if self.tags.is_empty() {
            return true;
        }

        let post_tags = post.effective_tags();
        self.tags
            .iter()
            .all(|required| post_tags.contains(&required.to_lowercase()))
    }

    fn matches_category(&self, post: &PostMetadata) -> bool {
        match &self.category {
            Some(required) => {
                post.category.as_deref().unwrap_or("").to_lowercase() == required.to_lowercase()
            }
            None => true,
        }
    }

    // 日期无法解析的文章不会匹配任何年份
    fn matches_year(&self, post: &PostMetadata) -> bool {
        match &self.year {
            Some(required) => post_year(&post.date).is_some_and(|year| year.to_string() == *required),
            None => true,
        }
    }

    fn matches_read_time(&self, post: &PostMetadata) -> bool {
        match self.read_time_filter {
            Some(bucket) => bucket.matches(read_time_minutes(&post.read_time)),
            None => true,
        }
    }
}

/// 按查询字符串筛选文章
///
/// 空查询（或只有空白，含 U+FEFF）原样返回所有文章。结果保持输入顺序。
pub fn filter_posts<'a>(posts: &'a [PostMetadata], query: &str) -> Vec<&'a PostMetadata> {
    if is_blank_query(query) {
        return posts.iter().collect();
    }

    let filters = parse_search_query(query);
    apply_filters(posts, &filters)
}

/// 用已解析的条件筛选文章，没有条件时返回全部
pub fn apply_filters<'a>(posts: &'a [PostMetadata], filters: &SearchFilters) -> Vec<&'a PostMetadata> {
    if filters.is_empty() {
        return posts.iter().collect();
    }
    posts.iter().filter(|post| filters.matches(post)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, tags: Option<Vec<&str>>, category: Option<&str>, date: &str, read_time: &str) -> PostMetadata {
        PostMetadata {
            slug: title.to_lowercase(),
            title: title.to_string(),
            excerpt: String::new(),
            category: category.map(str::to_string),
            tags: tags.map(|t| t.into_iter().map(str::to_string).collect()),
            date: date.to_string(),
            read_time: read_time.to_string(),
        }
    }

    fn sample() -> Vec<PostMetadata> {
        vec![
            post("A", Some(vec!["React"]), None, "2023-01-01", "3 min read"),
            post("B", Some(vec!["Go"]), None, "2024-06-01", "12 min read"),
        ]
    }

    fn titles(posts: &[&PostMetadata]) -> Vec<String> {
        posts.iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let posts = sample();
        assert_eq!(titles(&filter_posts(&posts, "")), vec!["A", "B"]);
        assert_eq!(titles(&filter_posts(&posts, "  \t")), vec!["A", "B"]);
    }

    #[test]
    fn byte_order_mark_counts_as_blank() {
        let posts = sample();
        assert_eq!(titles(&filter_posts(&posts, "\u{feff}")), vec!["A", "B"]);
        assert_eq!(titles(&filter_posts(&posts, "\u{feff} \u{3000}")), vec!["A", "B"]);
        assert_eq!(titles(&filter_posts(&posts, "\u{feff}tag:React")), vec!["A"]);
        assert_eq!(titles(&filter_posts(&posts, "tag:React\u{feff}year:2023")), vec!["A"]);
    }

    #[test]
    fn empty_filters_keep_every_post() {
        let posts = vec![
            post("A", None, None, "not a date", ""),
            post("B", Some(vec![]), None, "2024-01-01", "1 min"),
        ];
        let filters = parse_search_query("tag: readtime:weird");
        assert!(filters.is_empty());
        assert_eq!(titles(&apply_filters(&posts, &filters)), vec!["A", "B"]);
    }

    #[test]
    fn empty_query_returns_the_same_records() {
        let posts = sample();
        let result = filter_posts(&posts, "");
        assert!(result.iter().zip(&posts).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn single_constraints() {
        let posts = sample();
        assert_eq!(titles(&filter_posts(&posts, "tag:React")), vec!["A"]);
        assert_eq!(titles(&filter_posts(&posts, "year:2024")), vec!["B"]);
        assert_eq!(titles(&filter_posts(&posts, "readtime:<5")), vec!["A"]);
        assert_eq!(titles(&filter_posts(&posts, "readtime:>10")), vec!["B"]);
        assert!(filter_posts(&posts, "readtime:5-10").is_empty());
    }

    #[test]
    fn constraints_are_conjunctive() {
        let posts = sample();
        assert!(filter_posts(&posts, "tag:React year:2024").is_empty());
    }

    #[test]
    fn tag_match_is_case_insensitive() {
        let posts = sample();
        assert_eq!(titles(&filter_posts(&posts, "tag:react")), vec!["A"]);
        assert_eq!(titles(&filter_posts(&posts, "tag:GO")), vec!["B"]);
    }

    #[test]
    fn tag_match_is_exact_not_substring() {
        let posts = sample();
        assert!(filter_posts(&posts, "tag:Rea").is_empty());
    }

    #[test]
    fn all_required_tags_must_be_present() {
        let posts = vec![
            post("Both", Some(vec!["XSS", "Web"]), None, "2024-01-01", "1 min"),
            post("One", Some(vec!["XSS"]), None, "2024-01-01", "1 min"),
        ];
        assert_eq!(titles(&filter_posts(&posts, "tag:xss tag:web")), vec!["Both"]);
    }

    #[test]
    fn category_is_a_tag_fallback_for_untagged_posts() {
        let posts = vec![
            post("Untagged", None, Some("CTF"), "2024-01-01", "1 min"),
            post("Tagged", Some(vec!["Web"]), Some("CTF"), "2024-01-01", "1 min"),
            post("EmptyTags", Some(vec![]), Some("CTF"), "2024-01-01", "1 min"),
        ];
        assert_eq!(titles(&filter_posts(&posts, r#"tag:"CTF""#)), vec!["Untagged"]);
    }

    #[test]
    fn category_match() {
        let posts = vec![
            post("Bounty", None, Some("Bug Bounty"), "2024-01-01", "1 min"),
            post("NoCategory", None, None, "2024-01-01", "1 min"),
        ];
        assert_eq!(titles(&filter_posts(&posts, r#"category:"bug bounty""#)), vec!["Bounty"]);
        assert!(filter_posts(&posts, "category:Bug").is_empty());
    }

    #[test]
    fn text_matches_title_and_excerpt_substrings() {
        let mut posts = sample();
        posts[1].excerpt = "Writing a fuzzer in Go".to_string();
        assert_eq!(titles(&filter_posts(&posts, "FUZZ")), vec!["B"]);
        // 标题和摘要之间有空格
        assert_eq!(titles(&filter_posts(&posts, "b writing")), vec!["B"]);
        assert!(filter_posts(&posts, "fuzzer go rust").is_empty());
    }

    #[test]
    fn invalid_date_never_matches_a_year() {
        let posts = vec![post("Bad", None, None, "not a date", "1 min")];
        assert!(filter_posts(&posts, "year:2024").is_empty());
        assert_eq!(titles(&filter_posts(&posts, "readtime:<5")), vec!["Bad"]);
    }

    #[test]
    fn partial_and_fractional_dates_match_their_year() {
        let posts = vec![
            post("Year", None, None, "2024", "1 min"),
            post("Month", None, None, "2024-06", "1 min"),
            post("Millis", None, None, "2024-06-01T10:00:00.000", "1 min"),
            post("Older", None, None, "2023-12", "1 min"),
        ];
        assert_eq!(titles(&filter_posts(&posts, "year:2024")), vec!["Year", "Month", "Millis"]);
        assert_eq!(titles(&filter_posts(&posts, "year:2023")), vec!["Older"]);
    }

    #[test]
    fn missing_read_time_counts_as_zero_minutes() {
        let posts = vec![post("NoTime", None, None, "2024-01-01", "")];
        assert_eq!(titles(&filter_posts(&posts, "readtime:<5")), vec!["NoTime"]);
        assert!(filter_posts(&posts, "readtime:5-10").is_empty());
    }

    #[test]
    fn ignored_operator_values_do_not_filter() {
        let posts = sample();
        assert_eq!(titles(&filter_posts(&posts, "readtime:weird")), vec!["A", "B"]);
    }
}
