//! Publish Article (placeholder).

use crate::context::ServiceContext;

use super::WorkflowError;

/// Tells the operator publishing is not available yet.
///
/// # Errors
///
/// Returns an error if the notice cannot be written.
pub fn run(ctx: &ServiceContext) -> Result<(), WorkflowError> {
    ctx.prompt.say("Publish article functionality not implemented yet.")?;
    Ok(())
}
