pub mod amortization;
pub mod deal;
pub mod projection;
pub mod scenarios;
