pub mod connection_status;
pub mod layout;
pub mod mint;
