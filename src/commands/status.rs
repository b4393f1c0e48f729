//! List Status (placeholder).

use crate::context::ServiceContext;

use super::WorkflowError;

/// Tells the operator status listing is not available yet.
///
/// # Errors
///
/// Returns an error if the notice cannot be written.
pub fn run(ctx: &ServiceContext) -> Result<(), WorkflowError> {
    ctx.prompt.say("List status functionality not implemented yet.")?;
    Ok(())
}
