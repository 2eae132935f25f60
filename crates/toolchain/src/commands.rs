//! Converter and generator command lines.

use std::path::Path;

use contracts::{ConversionJob, ConvertArtifacts, ToolCommand, ToolStep};

/// Converter invocation for `job`, reading overrides from `overrides`
pub fn convert_command(job: &ConversionJob, overrides: &Path) -> ToolCommand {
    let mut cmd = ToolCommand::new(ToolStep::Convert, &job.tools.converter)
        .option("--input_network", &job.input)
        .option("--output_path", job.cpp_path())
        .option("--quantization_overrides", overrides);

    if let Some(list) = job.quantization.input_list() {
        cmd = cmd.option("--input_list", list);
    }
    if job.quantization.per_channel {
        cmd = cmd.arg("--use_per_channel_quantization");
    }
    if !job.op_packages.is_empty() {
        cmd = cmd.option("--op_package_lib", job.op_packages.join(","));
    }
    cmd
}

/// Generator invocation consuming the converter's artifacts
pub fn generate_command(job: &ConversionJob, convert: &ConvertArtifacts) -> ToolCommand {
    let mut cmd =
        ToolCommand::new(ToolStep::Generate, &job.tools.generator).option("-c", &convert.cpp);

    if let Some(ref bin) = convert.bin {
        cmd = cmd.option("-b", bin);
    }
    cmd.option("-o", job.model_libs_dir())
        .option("-t", &job.target)
}
