use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use file_finder::cli::Cli;
use file_finder::Config;

fn main() -> Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    // 初始化日志：--debug 优先于 FILE_FINDER_LOG_LEVEL
    let config = Config::from_env();
    env_logger::Builder::new()
        .filter_level(if cli.debug {
            log::LevelFilter::Debug
        } else {
            config.level_filter()
        })
        .init();

    info!("开始运行 file-finder");
    let start_time = Instant::now();

    cli.validate().context("参数验证失败")?;

    // 组装搜索条件
    let condition = cli.build_condition().context("构建搜索条件失败")?;
    debug!("搜索条件: {}", condition.description());

    let finder = cli.build_finder(&config);
    let options = cli.search_options(&config);

    let mut count = 0usize;
    if cli.count {
        // 只统计数量（急切搜索）
        count = finder.search(&condition, &options).len();
        println!("{}", count);
    } else {
        // 惰性搜索，边遍历边输出
        for path in finder.search_iter(&condition, &options) {
            println!("{}", path.display());
            count += 1;
        }
    }

    let elapsed = start_time.elapsed();
    info!("搜索完成，找到 {} 个文件，耗时 {:.2?}", count, elapsed);

    Ok(())
}
