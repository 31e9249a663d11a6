//! Sheet session errors.

use sheetkeep_domain::DomainError;
use sheetkeep_shared::SheetStateView;

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("Not signed in")]
    Unauthenticated,

    /// The sheet is loading or redirecting; carries the current view.
    #[error("Sheet is not editable")]
    NotReady(SheetStateView),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
