pub mod dashboard;
pub mod login;
pub mod menu;
pub mod orders;
pub mod overview;
pub mod stock;
pub mod suggestions;
