use super::{run_pipeline, CheckRequest};
use crate::models::{CheckResult, RawData};
use crate::{evaluation, probes, raw};

pub const CHECK_NAME: &str = "Code-Review";

pub fn run(request: &CheckRequest<'_>) -> CheckResult {
    run_pipeline(
        CHECK_NAME,
        request,
        |req| {
            let data = raw::code_review::collect(req.access, req.commit_depth)?;
            Ok(RawData::builder().code_review(data).build())
        },
        probes::CODE_REVIEW,
        evaluation::code_review::evaluate,
    )
}
