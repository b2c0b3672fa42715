use thiserror::Error;
use utils_common::IndexFormatError;

/// 筛选模块的错误
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("无法构建索引: 没有文章数据")]
    NoPosts,
    #[error("索引未初始化")]
    NotInitialized,
    #[error("获取索引锁失败")]
    LockPoisoned,
    #[error("索引格式错误: {0}")]
    Format(#[from] IndexFormatError),
    #[error("无法写入筛选索引文件: {0}")]
    Io(#[from] std::io::Error),
    #[error("解析参数失败: {0}")]
    Params(#[from] serde_json::Error),
}
