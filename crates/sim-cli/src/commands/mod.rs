pub mod faults;
pub mod monthly;
pub mod quantile;
pub mod simulate;
