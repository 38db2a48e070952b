use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use time::{UtcOffset, macros::format_description};
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{ConfigError, LoggingConfig, LoggingProfile, SwapxConfig, load_config};

const CONFIG_TEMPLATE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/swapx.yaml"));
const CONFIG_FILENAME: &str = "swapx.yaml";

/// 初始化 tracing，兼顾 JSON 与文本输出模式。日志写 stderr，stdout 只留给状态行。
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config);

    let time_format =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]");
    let offset = UtcOffset::from_hms(config.timezone_offset_hours, 0, 0).map_err(|err| {
        anyhow!(
            "invalid logging timezone offset {}: {err}",
            config.timezone_offset_hours
        )
    })?;
    let offset_timer = OffsetTime::new(offset, time_format);

    let base = fmt()
        .with_writer(io::stderr)
        .with_timer(offset_timer)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true)
        .with_level(true);

    if config.json {
        base.json()
            .with_current_span(false)
            .with_span_list(false)
            .with_env_filter(filter)
            .try_init()
            .map_err(|err| anyhow!(err.to_string()))?;
    } else {
        base.with_env_filter(filter)
            .event_format(fmt::format().compact())
            .try_init()
            .map_err(|err| anyhow!(err.to_string()))?;
    }
    Ok(())
}

fn build_filter(config: &LoggingConfig) -> EnvFilter {
    let mut filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let targets: &[(&str, &str)] = match config.profile {
        LoggingProfile::Lean => &[
            ("hyper", "warn"),
            ("hyper_util::client::legacy", "warn"),
            ("reqwest", "info"),
            ("rpc", "info"),
        ],
        LoggingProfile::Verbose => &[
            ("rpc", "trace"),
            ("chain::node", "debug"),
            ("wallet::bridge", "debug"),
            ("engine::quote", "debug"),
            ("engine::submit", "debug"),
        ],
    };
    for (module, level) in targets {
        if config.level.contains(module) {
            continue;
        }
        if let Ok(directive) = format!("{module}={level}").parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/// 加载主配置；用于 `swapx --config` 的入口。
pub fn load_configuration(path: Option<PathBuf>) -> Result<SwapxConfig, ConfigError> {
    load_config(path)
}

pub fn init_configs(args: crate::cli::args::InitCmd) -> Result<()> {
    let output_dir = match args.output {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    match write_template(&output_dir, args.force)? {
        Some(path) => println!("已写入 {}", path.display()),
        None => println!(
            "跳过 {}（文件已存在，如需覆盖请加 --force）",
            output_dir.join(CONFIG_FILENAME).display()
        ),
    }
    Ok(())
}

/// 写入配置模版；目标已存在且未指定 force 时返回 `None`。
fn write_template(output_dir: &Path, force: bool) -> Result<Option<PathBuf>> {
    fs::create_dir_all(output_dir)?;
    let target_path = output_dir.join(CONFIG_FILENAME);
    if target_path.exists() && !force {
        return Ok(None);
    }
    fs::write(&target_path, CONFIG_TEMPLATE)?;
    Ok(Some(target_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_as_config() {
        let config: SwapxConfig = serde_yaml::from_str(CONFIG_TEMPLATE).expect("template");
        assert_eq!(config.chain.endpoint_url, "ws://127.0.0.1:9944");
        assert!(!config.execution.allow_unlimited_gas);
        assert_eq!(config.contract.rate_scale, 1_000_000_000_000_000_000);
    }

    #[test]
    fn template_is_not_overwritten_without_force() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = write_template(dir.path(), false).expect("write");
        assert!(first.is_some());

        let target = dir.path().join(CONFIG_FILENAME);
        fs::write(&target, "custom: true\n").expect("overwrite");
        assert!(write_template(dir.path(), false).expect("skip").is_none());
        assert_eq!(fs::read_to_string(&target).expect("read"), "custom: true\n");

        assert!(write_template(dir.path(), true).expect("force").is_some());
        assert_eq!(fs::read_to_string(&target).expect("read"), CONFIG_TEMPLATE);
    }
}
