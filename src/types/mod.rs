pub mod activity;
pub mod balance;
pub mod sample;
pub mod sentinel;
