use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};
use utils_common::{estimate_read_time, PostMetadata};
use walkdir::WalkDir;

use crate::error::IndexerError;

/// 没有标签的文章使用的默认标签
pub const DEFAULT_TAG: &str = "Uncategorized";

const FRONT_MATTER_DELIMITER: &str = "---";

/// 文章头部的 YAML 元数据
#[derive(Deserialize, Debug)]
struct FrontMatter {
    title: String,
    date: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    excerpt: Option<String>,
}

/// 把文件内容拆分为 front matter 和正文
fn split_front_matter(source: &str) -> Option<(&str, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let rest = source.strip_prefix(FRONT_MATTER_DELIMITER)?;
    let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_DELIMITER {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// 解析一篇 markdown 文章
pub fn parse_post(slug: &str, source: &str) -> Result<PostMetadata, IndexerError> {
    let (yaml, body) = split_front_matter(source).ok_or(IndexerError::MissingFrontMatter)?;
    let front: FrontMatter = serde_yaml::from_str(yaml)?;

    Ok(PostMetadata {
        slug: slug.to_lowercase(),
        title: front.title,
        excerpt: front.excerpt.unwrap_or_default(),
        category: front.category,
        tags: Some(front.tags.unwrap_or_else(|| vec![DEFAULT_TAG.to_string()])),
        date: front.date,
        read_time: estimate_read_time(body),
    })
}

/// 读取目录下所有 `.md` 文章（不递归）
///
/// 无法解析的文件记录警告后跳过，返回文章列表和跳过的文件数。
pub fn load_posts(dir: &Path) -> Result<(Vec<PostMetadata>, usize), IndexerError> {
    let mut posts = Vec::new();
    let mut skipped = 0;

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != "md") {
            continue;
        }

        let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
            skipped += 1;
            continue;
        };

        let parsed = fs::read_to_string(path)
            .map_err(|source| IndexerError::Read {
                path: path.to_path_buf(),
                source,
            })
            .and_then(|source| parse_post(slug, &source));

        match parsed {
            Ok(post) => {
                debug!(slug = %post.slug, read_time = %post.read_time, "处理文章");
                posts.push(post);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "跳过无法解析的文件");
                skipped += 1;
            }
        }
    }

    Ok((posts, skipped))
}
