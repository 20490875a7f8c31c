//! Role transfer orchestration.

mod page;
mod transfer;

pub use page::{RoleTransferResponse, TransferOutcome};
pub use transfer::{IssuedTransfer, RoleTransferError, RoleTransferService};
