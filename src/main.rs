// ==========================================
// 游泳比赛选手分配系统 - 命令行入口
// ==========================================
// 用法: gala-optimizer request.json [--config config.json] [--pretty]
// 输出: stdout 为 JSON 结果文档; 日志写 stderr
// 退出码: 0 成功; 1 致命错误 (已输出错误文档); 2 输入/配置错误
// ==========================================

use anyhow::{Context, Result};
use clap::Parser;
use gala_optimizer::{logging, OptimizationConfig, OptimizeApi, OptimizeRequest};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "gala-optimizer")]
#[command(about = "Allocate swimmers to gala events and build relay teams")]
#[command(version)]
struct Cli {
    /// Request JSON file ("-" reads stdin)
    #[arg(value_name = "REQUEST")]
    request: PathBuf,

    /// Optimization config JSON (overrides the request's config)
    #[arg(long, env = "GALA_OPTIMIZER_CONFIG")]
    config: Option<PathBuf>,

    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the result JSON
    #[arg(long)]
    pretty: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn read_request(path: &PathBuf) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("读取 stdin 失败")?;
        return Ok(raw);
    }
    fs::read_to_string(path).with_context(|| format!("读取请求文件失败: {}", path.display()))
}

fn run(cli: &Cli) -> Result<bool> {
    let api = match &cli.config {
        Some(path) => OptimizeApi::with_config(
            OptimizationConfig::from_file(path)
                .with_context(|| format!("加载配置失败: {}", path.display()))?,
        ),
        None => OptimizeApi::new(),
    };

    let raw = read_request(&cli.request)?;
    let request: OptimizeRequest =
        serde_json::from_str(&raw).context("请求 JSON 格式错误")?;
    let result = api.optimize(request)?;

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };

    match &cli.output {
        Some(path) => fs::write(path, rendered + "\n")
            .with_context(|| format!("写入结果失败: {}", path.display()))?,
        None => println!("{}", rendered),
    }

    Ok(!result.is_failure())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!(version = gala_optimizer::VERSION, "{}", gala_optimizer::APP_NAME);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("错误: {:#}", err);
            ExitCode::from(2)
        }
    }
}
