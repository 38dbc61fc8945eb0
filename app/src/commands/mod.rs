//! Command layer shared by the CLI.
//!
//! Every command takes `&AppState` and returns `Result<_, CommandError>` with
//! a serializable payload.

pub mod queries;
pub mod records;
pub mod scoring;
pub mod search;

use crate::error::CommandError;
use crate::state::AppState;
use bench_core::{ConsultantProfile, RecordId};

/// Parse a record id supplied by the caller.
pub(crate) fn parse_id(id: &str) -> Result<RecordId, CommandError> {
    Ok(RecordId::new(id)?)
}

/// Load a consultant that must exist.
pub(crate) async fn load_consultant(
    state: &AppState,
    consultant_id: &str,
) -> Result<ConsultantProfile, CommandError> {
    let profile = state.consultants().require(&parse_id(consultant_id)?).await?;
    Ok(profile.normalized())
}
