use std::cmp::Reverse;

use utils_common::{parse_post_date, PostMetadata};

/// 相关文章默认数量
pub const DEFAULT_SIMILAR_LIMIT: usize = 3;

/// 分类相同的得分
const CATEGORY_SCORE: usize = 5;
/// 每个相同标签的得分
const TAG_SCORE: usize = 3;

/// 查找相关文章
///
/// 分类相同加 5 分，每个相同标签加 3 分；按得分降序，得分相同时较新的在前，
/// 日期无法解析的排在最后。当前文章不计入结果。
pub fn similar_posts<'a>(
    posts: &'a [PostMetadata],
    current_slug: &str,
    tags: &[String],
    category: Option<&str>,
    limit: usize,
) -> Vec<&'a PostMetadata> {
    let mut scored: Vec<(usize, &PostMetadata)> = posts
        .iter()
        .filter(|post| post.slug != current_slug)
        .map(|post| (score(post, tags, category), post))
        .collect();

    scored.sort_by_key(|(score, post)| (Reverse(*score), Reverse(parse_post_date(&post.date))));

    scored.into_iter().take(limit).map(|(_, post)| post).collect()
}

fn score(post: &PostMetadata, tags: &[String], category: Option<&str>) -> usize {
    let mut score = 0;

    if post.category.as_deref() == category {
        score += CATEGORY_SCORE;
    }

    let matching_tags = post
        .tags
        .iter()
        .flatten()
        .filter(|tag| tags.contains(*tag))
        .count();

    score + matching_tags * TAG_SCORE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, category: &str, tags: &[&str], date: &str) -> PostMetadata {
        PostMetadata {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            excerpt: String::new(),
            category: Some(category.to_string()),
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
            date: date.to_string(),
            read_time: "1 min read".to_string(),
        }
    }

    fn slugs(posts: &[&PostMetadata]) -> Vec<String> {
        posts.iter().map(|p| p.slug.clone()).collect()
    }

    #[test]
    fn ranks_by_shared_category_and_tags() {
        let posts = vec![
            post("current", "Web", &["XSS", "CSP"], "2024-05-01"),
            post("same-cat", "Web", &[], "2024-01-01"),
            post("two-tags", "CTF", &["XSS", "CSP"], "2023-01-01"),
            post("all", "Web", &["XSS"], "2022-01-01"),
            post("none", "Misc", &["Go"], "2025-01-01"),
        ];
        let tags = vec!["XSS".to_string(), "CSP".to_string()];

        let related = similar_posts(&posts, "current", &tags, Some("Web"), 10);
        // all = 5 + 3, two-tags = 6, same-cat = 5, none = 0
        assert_eq!(slugs(&related), vec!["all", "two-tags", "same-cat", "none"]);
    }

    #[test]
    fn ties_prefer_newer_posts_and_respect_limit() {
        let posts = vec![
            post("old", "Web", &[], "2020-01-01"),
            post("bad-date", "Web", &[], "someday"),
            post("new", "Web", &[], "2024-01-01"),
            post("mid", "Web", &[], "2022-01-01"),
        ];

        let related = similar_posts(&posts, "x", &[], Some("Web"), DEFAULT_SIMILAR_LIMIT);
        assert_eq!(slugs(&related), vec!["new", "mid", "old"]);
    }

    #[test]
    fn excludes_the_current_post() {
        let posts = vec![post("only", "Web", &[], "2024-01-01")];
        assert!(similar_posts(&posts, "only", &[], Some("Web"), 3).is_empty());
    }
}
