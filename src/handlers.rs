pub mod dashboard;
pub mod forecast;
pub mod health;
pub mod ingredients;
pub mod menu;
pub mod orders;
pub mod realtime;
pub mod students;
pub mod suggestions;
