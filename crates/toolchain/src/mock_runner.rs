//! Mock 工具运行器
//!
//! 用于单元测试的 mock 实现：记录调用顺序，支持注入退出码与启动失败，
//! 并在成功时生成预设的输出文件。

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use contracts::{PipelineError, Result, ToolCommand, ToolStep};
use tracing::instrument;

use crate::runner::{ToolExit, ToolRunner};

/// Mock 运行器配置
#[derive(Debug, Default, Clone)]
pub struct MockConfig {
    /// 各步骤的退出码（缺省为 0）
    pub exit_codes: HashMap<ToolStep, i32>,
    /// 成功时需要创建的文件
    pub outputs: HashMap<ToolStep, Vec<PathBuf>>,
    /// 无法启动的步骤
    pub fail_spawn: Vec<ToolStep>,
}

impl MockConfig {
    /// 设置某步骤的退出码
    pub fn exit_code(mut self, step: ToolStep, code: i32) -> Self {
        self.exit_codes.insert(step, code);
        self
    }

    /// 某步骤成功时创建 `path`
    pub fn produce(mut self, step: ToolStep, path: impl Into<PathBuf>) -> Self {
        self.outputs.entry(step).or_default().push(path.into());
        self
    }

    /// 某步骤启动失败
    pub fn spawn_failure(mut self, step: ToolStep) -> Self {
        self.fail_spawn.push(step);
        self
    }
}

/// Mock 工具运行器
#[derive(Debug, Default)]
pub struct MockToolRunner {
    config: MockConfig,
    /// 已执行的命令（按调用顺序）
    calls: Mutex<Vec<ToolCommand>>,
}

impl MockToolRunner {
    /// 创建默认 mock 运行器（所有步骤成功，不产生文件）
    pub fn new() -> Self {
        Self::with_config(MockConfig::default())
    }

    /// 使用配置创建 mock 运行器
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 所有已记录的命令
    pub fn calls(&self) -> Vec<ToolCommand> {
        self.calls.lock().unwrap().clone()
    }

    /// 已执行的步骤序列
    pub fn steps(&self) -> Vec<ToolStep> {
        self.calls.lock().unwrap().iter().map(|c| c.step).collect()
    }

    fn materialize_outputs(&self, step: ToolStep) -> Result<()> {
        for path in self.config.outputs.get(&step).into_iter().flatten() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, b"")?;
        }
        Ok(())
    }
}

impl ToolRunner for MockToolRunner {
    #[instrument(skip(self, command), fields(step = %command.step))]
    async fn run(&self, command: &ToolCommand) -> Result<ToolExit> {
        self.calls.lock().unwrap().push(command.clone());

        if self.config.fail_spawn.contains(&command.step) {
            return Err(PipelineError::tool_invocation(
                command.step,
                &command.program,
                "failed to start: mock spawn failure",
            ));
        }

        let code = self
            .config
            .exit_codes
            .get(&command.step)
            .copied()
            .unwrap_or(0);
        if code == 0 {
            self.materialize_outputs(command.step)?;
        }
        Ok(ToolExit { code: Some(code) })
    }
}
