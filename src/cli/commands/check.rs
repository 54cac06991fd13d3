use anyhow::Result;

use super::helper::finish;
use crate::{
    cli::{
        args::{CheckCommand, OutputFormat},
        exit_status::ExitStatus,
        report,
    },
    core::CheckContext,
};

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let ctx = CheckContext::new(&cmd.common)?;
    let result = finish(ctx.issues(), ctx.files.len());

    match cmd.format {
        OutputFormat::Json => report::report_json(&result.issues)?,
        OutputFormat::Human => {
            report::report(&result.issues);
            if result.issues.is_empty() {
                report::print_success(result.source_files_checked);
            }
            report::print_parse_warning(result.parse_error_count, ctx.verbose);
        }
    }

    Ok(result.exit_status())
}
