//! Final summary printed after a successful run.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use contracts::{JobReport, LibraryArtifact, QuantizationOptions};

/// Device staging directory used in the Android instructions
const DEVICE_DIR: &str = "/data/local/tmp/qnn";

/// Print the summary to stdout
pub fn print_summary(report: &JobReport) {
    print!("{}", render_summary(report));
}

/// Render the summary as text
pub fn render_summary(report: &JobReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_summary(&mut out, report);
    out
}

fn write_summary(out: &mut String, report: &JobReport) -> std::fmt::Result {
    let job = &report.job;
    let quant = &job.quantization;

    writeln!(out)?;
    writeln!(out, "╔══════════════════════════════════════════════════════════════╗")?;
    writeln!(out, "║                  QNN Conversion Complete                     ║")?;
    writeln!(out, "╚══════════════════════════════════════════════════════════════╝\n")?;

    writeln!(out, "📦 Outputs")?;
    writeln!(out, "   ├─ Model source: {}", report.convert.cpp.display())?;
    match report.convert.bin {
        Some(ref bin) => writeln!(out, "   ├─ Model weights: {}", bin.display())?,
        None => writeln!(out, "   ├─ Model weights: (none)")?,
    }
    if let Some(ref net) = report.convert.net_json {
        writeln!(out, "   ├─ Network description: {}", net.display())?;
    }
    match report.library {
        LibraryArtifact::Conventional(ref lib) => {
            writeln!(out, "   └─ Model library: {}", lib.display())?
        }
        LibraryArtifact::Discovered(ref lib) => {
            writeln!(out, "   └─ Model library: {} (non-default location)", lib.display())?
        }
        LibraryArtifact::Missing => writeln!(
            out,
            "   └─ Model library: not found under {}",
            job.model_libs_dir().display()
        )?,
    }

    writeln!(out, "\n⚙️  Quantization")?;
    writeln!(out, "   ├─ Scheme: float16")?;
    writeln!(out, "   ├─ Symmetric: {}", QuantizationOptions::SYMMETRIC)?;
    writeln!(out, "   ├─ Per-channel: {}", quant.per_channel)?;
    match quant.percentile {
        Some(p) => writeln!(out, "   ├─ Calibration: percentile {p}")?,
        None => writeln!(out, "   ├─ Calibration: default")?,
    }
    match quant.input_list() {
        Some(list) => writeln!(out, "   └─ Input list: {}", list.display())?,
        None => writeln!(out, "   └─ Input list: (none)")?,
    }

    if let Some(ref kept) = report.retained_overrides {
        writeln!(out, "\n📝 Quantization overrides kept at {}", kept.display())?;
    }

    let library = report
        .library
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| job.conventional_library_path());
    let lib_name = library
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "libqnn_model.so".to_string());
    let input_list = quant
        .input_list()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input_list.txt".to_string());
    let sdk = job
        .tools
        .sdk_root
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "$QNN_SDK_ROOT".to_string());

    if job.is_android_target() {
        writeln!(out, "\n📱 Next steps (on device)")?;
        writeln!(out, "   ├─ adb shell mkdir -p {DEVICE_DIR}")?;
        writeln!(out, "   ├─ adb push {} {DEVICE_DIR}/", library.display())?;
        writeln!(out, "   ├─ adb push {sdk}/bin/aarch64-android/qnn-net-run {DEVICE_DIR}/")?;
        writeln!(out, "   ├─ adb push {sdk}/lib/aarch64-android/libQnnHtp.so {DEVICE_DIR}/")?;
        writeln!(
            out,
            "   └─ adb shell \"cd {DEVICE_DIR} && LD_LIBRARY_PATH=. ./qnn-net-run \
             --model ./{lib_name} --backend ./libQnnHtp.so --input_list {input_list}\""
        )?;
    } else {
        let backend: PathBuf = [sdk.as_str(), "lib", job.target.as_str(), "libQnnHtp.so"]
            .iter()
            .collect();
        writeln!(out, "\n▶️  Next step")?;
        writeln!(
            out,
            "   └─ qnn-net-run --model {} --backend {} --input_list {input_list}",
            library.display(),
            backend.display()
        )?;
    }

    writeln!(out)?;
    Ok(())
}
