//! 配置校验模块
//!
//! 校验规则：
//! - input 必填且文件存在
//! - model_name 非空且不含路径分隔符
//! - target 非空
//! - percentile 为 (0, 100] 内的有限小数
//! - input_list 若给出则文件必须存在
//! - output_dir 按需创建

use std::path::{Path, PathBuf};

use contracts::{PipelineError, Result};

/// 校验输入模型路径
pub fn validate_input(input: Option<&Path>) -> Result<PathBuf> {
    let input = input.ok_or_else(|| PipelineError::config("input", "no input model specified"))?;
    if !input.is_file() {
        return Err(PipelineError::config(
            "input",
            format!("input model not found: {}", input.display()),
        ));
    }
    Ok(input.to_path_buf())
}

/// 校验模型名称
pub fn validate_model_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(PipelineError::config("model-name", "model name cannot be empty"));
    }
    if name.contains(['/', '\\']) {
        return Err(PipelineError::config(
            "model-name",
            format!("model name must not contain path separators: {name}"),
        ));
    }
    Ok(())
}

/// 校验目标平台
pub fn validate_target(target: &str) -> Result<()> {
    if target.trim().is_empty() {
        return Err(PipelineError::config("target", "target platform cannot be empty"));
    }
    Ok(())
}

/// 解析 percentile 校准值
pub fn parse_percentile(raw: &str) -> Result<f64> {
    let value: f64 = raw.trim().parse().map_err(|_| {
        PipelineError::config("percentile", format!("not a decimal number: {raw}"))
    })?;
    if !value.is_finite() || value <= 0.0 || value > 100.0 {
        return Err(PipelineError::config(
            "percentile",
            format!("percentile must be in (0, 100], got {raw}"),
        ));
    }
    Ok(value)
}

/// 校验校准输入列表
pub fn validate_input_list(input_list: Option<&Path>) -> Result<Option<PathBuf>> {
    match input_list {
        None => Ok(None),
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(PipelineError::config(
            "input-list",
            format!("input list not found: {}", path.display()),
        )),
    }
}

/// 拆分逗号分隔的 op package 列表
pub fn split_op_packages(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

/// 创建输出目录
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        PipelineError::config(
            "output-dir",
            format!("cannot create output directory {}: {e}", dir.display()),
        )
    })
}
