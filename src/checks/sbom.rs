use super::{run_pipeline, CheckRequest};
use crate::models::{CheckResult, RawData};
use crate::{evaluation, probes, raw};

pub const CHECK_NAME: &str = "SBOM";

pub fn run(request: &CheckRequest<'_>) -> CheckResult {
    run_pipeline(
        CHECK_NAME,
        request,
        |req| {
            let data = raw::sbom::collect(req.access)?;
            Ok(RawData::builder().sbom(data).build())
        },
        probes::SBOM,
        evaluation::sbom::evaluate,
    )
}
