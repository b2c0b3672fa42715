use std::path::PathBuf;

use post_filter::FilterError;
use thiserror::Error;

/// 索引生成过程中的错误
#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("源目录不存在或不是有效目录 '{0}'")]
    SourceMissing(PathBuf),
    #[error("无法创建输出目录 '{path}': {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("遍历目录时出错: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("无法读取文件 {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("缺少 front matter")]
    MissingFrontMatter,
    #[error("front matter 解析失败: {0}")]
    FrontMatter(#[from] serde_yaml::Error),
    #[error("没有找到有效文章")]
    NoPosts,
    #[error(transparent)]
    Index(#[from] FilterError),
}
