//! Service layer for Tandem
//!
//! The service layer sits on top of the record store, handling validation,
//! write-through persistence and the derived financial summary.

pub mod finance;
pub mod ledger;
pub mod summary;

pub use finance::{FinanceState, LOAD_ERROR, SAVE_ERROR};
pub use ledger::{LedgerService, LedgerSnapshot};
pub use summary::build_summary;
