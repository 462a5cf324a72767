mod ledger;

pub use ledger::LedgerError;
