pub mod batch;
pub mod disburse;
