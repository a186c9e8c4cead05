pub mod bundle;
pub mod loan;
