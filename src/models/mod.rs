pub mod address;
pub mod delivery;
pub mod driver;
pub mod payment;
