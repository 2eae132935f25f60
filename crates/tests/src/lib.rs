//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 解析配置 -> 生成 overrides -> 运行真实子进程 -> 发现产物
//! - 使用 shell 脚本模拟 converter / generator（仅 unix）
//!
//! 这里只组合库 crate（config_loader + toolchain）并驱动真实子进程；
//! `Pipeline` 的编排与退出码由 `crates/cli/tests/cli.rs` 通过二进制覆盖。

#[cfg(all(test, unix))]
mod fake_tools {
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// Converter stand-in: writes `<out>.cpp`, `<out>.bin` and a copy of the overrides
    pub const CONVERTER: &str = r#"#!/bin/sh
echo "convert $*" >> '@LOG@'
out=""
ov=""
while [ $# -gt 0 ]; do
  case "$1" in
    --output_path) out="$2"; shift 2 ;;
    --quantization_overrides) ov="$2"; shift 2 ;;
    *) shift ;;
  esac
done
[ -n "$out" ] || exit 4
: > "$out"
: > "${out%.cpp}.bin"
cp "$ov" "$(dirname "$out")/seen_overrides.json"
"#;

    /// Generator stand-in: writes `<o>/<t>/libqnn_model.so`
    pub const GENERATOR: &str = r#"#!/bin/sh
echo "generate $*" >> '@LOG@'
o=""
t=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) o="$2"; shift 2 ;;
    -t) t="$2"; shift 2 ;;
    *) shift ;;
  esac
done
mkdir -p "$o/$t" && : > "$o/$t/libqnn_model.so"
"#;

    /// Always fails
    pub const FAILING: &str = "#!/bin/sh\necho \"fail $*\" >> '@LOG@'\nexit 3\n";

    /// Write an executable script with the call log path substituted
    pub fn install(dir: &Path, name: &str, body: &str, log: &Path) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body.replace("@LOG@", &log.to_string_lossy())).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// First word of each logged call
    pub fn logged_steps(log: &Path) -> Vec<String> {
        std::fs::read_to_string(log)
            .unwrap_or_default()
            .lines()
            .filter_map(|l| l.split_whitespace().next().map(String::from))
            .collect()
    }
}

#[cfg(all(test, unix))]
mod e2e_tests {
    use std::path::{Path, PathBuf};

    use config_loader::{
        JobResolver, OverridesFile, QuantizationOverrides, ResolveOptions, CONVERTER_NAME,
        GENERATOR_NAME, SDK_BIN_DIR,
    };
    use contracts::{ConversionJob, LibraryArtifact, PipelineError, ToolStep};
    use tempfile::TempDir;
    use toolchain::{
        collect_convert_artifacts, convert_command, generate_command, locate_library,
        run_checked, SystemToolRunner,
    };

    use crate::fake_tools::{self, CONVERTER, FAILING, GENERATOR};

    struct Workspace {
        dir: TempDir,
    }

    impl Workspace {
        fn new(converter: &str) -> Self {
            let dir = TempDir::new().unwrap();
            let bin = dir.path().join("sdk").join(SDK_BIN_DIR);
            std::fs::create_dir_all(&bin).unwrap();
            std::fs::create_dir_all(dir.path().join("tmp")).unwrap();
            let log = dir.path().join("calls.log");
            fake_tools::install(&bin, CONVERTER_NAME, converter, &log);
            fake_tools::install(&bin, GENERATOR_NAME, GENERATOR, &log);
            std::fs::write(dir.path().join("model.onnx"), b"onnx").unwrap();
            Self { dir }
        }

        fn options(&self) -> ResolveOptions {
            ResolveOptions {
                input: Some(self.dir.path().join("model.onnx")),
                output_dir: Some(self.out()),
                sdk_root: Some(self.dir.path().join("sdk")),
                ..Default::default()
            }
        }

        fn out(&self) -> PathBuf {
            self.dir.path().join("output")
        }

        fn tmp(&self) -> PathBuf {
            self.dir.path().join("tmp")
        }

        fn steps(&self) -> Vec<String> {
            fake_tools::logged_steps(&self.dir.path().join("calls.log"))
        }
    }

    /// Convert then generate, the way the CLI sequences them
    async fn run_job(
        job: &ConversionJob,
        overrides: &Path,
    ) -> Result<LibraryArtifact, PipelineError> {
        run_checked(&SystemToolRunner, &convert_command(job, overrides)).await?;
        let convert = collect_convert_artifacts(job)?;
        run_checked(&SystemToolRunner, &generate_command(job, &convert)).await?;
        Ok(locate_library(job))
    }

    #[tokio::test]
    async fn test_e2e_default_scenario() {
        let ws = Workspace::new(CONVERTER);
        let job = JobResolver::with_search_origin(ws.dir.path())
            .resolve(&ws.options())
            .unwrap();

        let overrides = OverridesFile::create_in(
            &ws.tmp(),
            &QuantizationOverrides::from_options(&job.quantization),
        )
        .unwrap();
        let library = run_job(&job, overrides.path()).await.unwrap();
        assert_eq!(overrides.finish(job.cleanup).unwrap(), None);

        assert_eq!(ws.steps(), vec!["convert", "generate"]);
        assert!(ws.out().join("qnn_model.cpp").is_file());
        assert!(ws.out().join("qnn_model.bin").is_file());
        assert_eq!(
            library,
            LibraryArtifact::Conventional(
                ws.out().join("model_libs/aarch64-android/libqnn_model.so")
            )
        );
        assert_eq!(std::fs::read_dir(ws.tmp()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_e2e_converter_sees_rendered_overrides() {
        let ws = Workspace::new(CONVERTER);
        let options = ResolveOptions {
            per_channel: true,
            percentile: Some("99.99".into()),
            ..ws.options()
        };
        let job = JobResolver::with_search_origin(ws.dir.path())
            .resolve(&options)
            .unwrap();

        let overrides = OverridesFile::create_in(
            &ws.tmp(),
            &QuantizationOverrides::from_options(&job.quantization),
        )
        .unwrap();
        run_job(&job, overrides.path()).await.unwrap();

        let seen = std::fs::read_to_string(ws.out().join("seen_overrides.json")).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&seen).unwrap();
        let act = &doc["default_activation_quantization"];
        let weight = &doc["default_weight_quantization"];
        assert_eq!(act["is_symmetric"], true);
        assert_eq!(act["calibration_method"], "percentile");
        assert_eq!(act["percentile_value"], 99.99);
        assert_eq!(weight["is_symmetric"], true);
        assert_eq!(weight["per_channel_quantization"], true);
    }

    #[tokio::test]
    async fn test_e2e_converter_failure_skips_generator() {
        let ws = Workspace::new(FAILING);
        let job = JobResolver::with_search_origin(ws.dir.path())
            .resolve(&ws.options())
            .unwrap();

        let overrides = OverridesFile::create_in(
            &ws.tmp(),
            &QuantizationOverrides::from_options(&job.quantization),
        )
        .unwrap();
        let err = run_job(&job, overrides.path()).await.unwrap_err();
        drop(overrides);

        assert!(matches!(
            err,
            PipelineError::ToolInvocation {
                step: ToolStep::Convert,
                ..
            }
        ));
        assert!(err.to_string().contains("exited with status 3"));
        assert_eq!(ws.steps(), vec!["fail"]);
        assert!(!ws.out().join("model_libs").exists());
        assert_eq!(std::fs::read_dir(ws.tmp()).unwrap().count(), 0);
    }

    #[test]
    fn test_e2e_missing_input_rejected_before_tools() {
        let ws = Workspace::new(CONVERTER);
        let options = ResolveOptions {
            input: Some(ws.dir.path().join("missing.onnx")),
            ..ws.options()
        };
        let err = JobResolver::with_search_origin(ws.dir.path())
            .resolve(&options)
            .unwrap_err();

        assert!(err.is_config());
        assert!(ws.steps().is_empty());
        assert!(!ws.out().exists());
    }
}
