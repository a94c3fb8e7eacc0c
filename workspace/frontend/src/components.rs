pub mod charts;
pub mod clock;
pub mod layout;
pub mod stat_card;
