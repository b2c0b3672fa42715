use std::io::{Read, Write};
use flate2::{Compression, write::GzEncoder, read::GzDecoder};
use thiserror::Error;

/// 魔数常量 - 用于标识索引文件格式
pub const MAGIC_BYTES: &[u8] = b"PSTIX";

/// 当前索引格式版本 (主版本, 次版本)
pub const INDEX_FORMAT_VERSION: [u8; 2] = [1, 0];

/// 头部长度：魔数 + 版本号 + 原始数据大小
const HEADER_LEN: usize = MAGIC_BYTES.len() + 2 + 4;

/// 头部声明的原始数据大小上限
pub const MAX_DECOMPRESSED_SIZE: usize = 256 * 1024 * 1024;

// 预分配按压缩数据长度估算，不直接信任头部
const PREALLOC_RATIO: usize = 4;

/// 索引文件读写错误
#[derive(Debug, Error)]
pub enum IndexFormatError {
    #[error("序列化失败: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("反序列化失败: {0}")]
    Decode(#[from] bincode::error::DecodeError),
    #[error("压缩数据读写失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("数据太短，无法解析: {0} 字节")]
    TooShort(usize),
    #[error("无效的文件格式：魔数不匹配")]
    BadMagic,
    #[error("不支持的版本: {0}.{1}")]
    UnsupportedVersion(u8, u8),
    #[error("解压后数据大小不匹配: 期望 {expected} 字节, 实际 {actual} 字节")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("声明的数据大小 {size} 字节超过上限 {max} 字节")]
    TooLarge { size: usize, max: usize },
}

/// 将对象序列化为二进制格式
pub fn to_binary<T: serde::Serialize>(obj: &T) -> Result<Vec<u8>, IndexFormatError> {
    Ok(bincode::serde::encode_to_vec(obj, bincode::config::standard())?)
}

/// 从二进制格式反序列化对象
pub fn from_binary<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T, IndexFormatError> {
    let (value, _) = bincode::serde::decode_from_slice(data, bincode::config::standard())?;
    Ok(value)
}

/// 将对象序列化为压缩的二进制格式
pub fn to_compressed<T: serde::Serialize>(obj: &T, version: [u8; 2]) -> Result<Vec<u8>, IndexFormatError> {
    let binary = to_binary(obj)?;

    let mut output = Vec::with_capacity(HEADER_LEN + binary.len() / 2);
    output.extend_from_slice(MAGIC_BYTES);
    output.extend_from_slice(&version);
    output.extend_from_slice(&(binary.len() as u32).to_le_bytes());

    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&binary)?;
    output.extend_from_slice(&encoder.finish()?);

    Ok(output)
}

/// 从压缩的二进制格式反序列化对象，只接受当前主版本
pub fn from_compressed<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T, IndexFormatError> {
    from_compressed_with_max_version(data, INDEX_FORMAT_VERSION[0])
}

/// 从压缩的二进制格式反序列化对象，允许指定支持的最大版本
pub fn from_compressed_with_max_version<T: serde::de::DeserializeOwned>(
    data: &[u8],
    max_version: u8,
) -> Result<T, IndexFormatError> {
    validate_compressed_data_with_max_version(data, max_version)?;

    let size_offset = MAGIC_BYTES.len() + 2;
    let mut size_bytes = [0u8; 4];
    size_bytes.copy_from_slice(&data[size_offset..HEADER_LEN]);
    let original_size = u32::from_le_bytes(size_bytes) as usize;

    if original_size > MAX_DECOMPRESSED_SIZE {
        return Err(IndexFormatError::TooLarge {
            size: original_size,
            max: MAX_DECOMPRESSED_SIZE,
        });
    }

    let compressed = &data[HEADER_LEN..];
    // 最多多读一个字节，足以发现比声明更长的数据
    let mut decoder = GzDecoder::new(compressed).take(original_size as u64 + 1);
    let capacity = original_size.min(compressed.len().saturating_mul(PREALLOC_RATIO));
    let mut decompressed = Vec::with_capacity(capacity);
    decoder.read_to_end(&mut decompressed)?;

    if decompressed.len() != original_size {
        return Err(IndexFormatError::SizeMismatch {
            expected: original_size,
            actual: decompressed.len(),
        });
    }

    from_binary(&decompressed)
}

/// 验证压缩数据头部，返回版本号
pub fn validate_compressed_data(data: &[u8]) -> Result<[u8; 2], IndexFormatError> {
    validate_compressed_data_with_max_version(data, INDEX_FORMAT_VERSION[0])
}

/// 验证压缩数据头部，允许指定支持的最大版本
pub fn validate_compressed_data_with_max_version(data: &[u8], max_version: u8) -> Result<[u8; 2], IndexFormatError> {
    if data.len() < HEADER_LEN {
        return Err(IndexFormatError::TooShort(data.len()));
    }

    if &data[..MAGIC_BYTES.len()] != MAGIC_BYTES {
        return Err(IndexFormatError::BadMagic);
    }

    let version_offset = MAGIC_BYTES.len();
    let version = [data[version_offset], data[version_offset + 1]];
    if version[0] > max_version {
        return Err(IndexFormatError::UnsupportedVersion(version[0], version[1]));
    }

    Ok(version)
}
