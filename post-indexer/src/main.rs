use std::fs;
use std::path::Path;
use std::time::Instant;

use clap::{Arg, ArgAction, Command};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use post_filter::builder::FilterBuilder;

mod error;
mod markdown;

use error::IndexerError;

/// 索引文件名
const FILTER_INDEX_FILE: &str = "filter_index.bin";

fn main() {
    let matches = Command::new("post-indexer")
        .version(env!("CARGO_PKG_VERSION"))
        .about("从 markdown 文章生成筛选索引")
        .arg(Arg::new("source")
            .short('s')
            .long("source")
            .value_name("SOURCE_DIR")
            .help("文章源目录路径")
            .required(true))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .value_name("OUTPUT_DIR")
            .help("索引输出目录路径")
            .required(true))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("显示详细信息")
            .action(ArgAction::SetTrue))
        .get_matches();

    // 参数均为必填，clap 已校验
    let source_dir = matches.get_one::<String>("source").map(String::as_str).unwrap_or_default();
    let output_dir = matches.get_one::<String>("output").map(String::as_str).unwrap_or_default();
    init_tracing(matches.get_flag("verbose"));

    info!(source = source_dir, output = output_dir, "开始生成索引");

    if let Err(e) = generate_index(Path::new(source_dir), Path::new(output_dir)) {
        error!("索引生成失败: {}", e);
        std::process::exit(1);
    }
}

/// 初始化日志，`RUST_LOG` 优先
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("初始化日志失败: {}", e);
    }
}

/// 生成索引的主函数
fn generate_index(source_dir: &Path, output_dir: &Path) -> Result<(), IndexerError> {
    let start_time = Instant::now();

    if !source_dir.is_dir() {
        return Err(IndexerError::SourceMissing(source_dir.to_path_buf()));
    }

    fs::create_dir_all(output_dir).map_err(|source| IndexerError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let (posts, skipped) = markdown::load_posts(source_dir)?;
    info!(posts = posts.len(), skipped, "扫描完成");

    if posts.is_empty() {
        return Err(IndexerError::NoPosts);
    }

    let mut filter_builder = FilterBuilder::new();
    for post in posts {
        filter_builder.add_post(post);
    }

    filter_builder.save_filter_index(output_dir.join(FILTER_INDEX_FILE))?;

    info!("索引生成完成，耗时: {:.2}秒", start_time.elapsed().as_secs_f32());
    Ok(())
}
