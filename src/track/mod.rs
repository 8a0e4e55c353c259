pub mod poller;
pub mod steps;
pub mod view;
