use super::{run_pipeline, CheckRequest};
use crate::models::{CheckResult, RawData};
use crate::{evaluation, probes, raw};

pub const CHECK_NAME: &str = "Binary-Artifacts";

pub fn run(request: &CheckRequest<'_>) -> CheckResult {
    run_pipeline(
        CHECK_NAME,
        request,
        |req| {
            let data = raw::binary_artifacts::collect(req.access)?;
            Ok(RawData::builder().binary_artifacts(data).build())
        },
        probes::BINARY_ARTIFACTS,
        evaluation::binary_artifacts::evaluate,
    )
}
