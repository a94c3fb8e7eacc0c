//! SeaORM entity modules for the canteen store.
//! Table names follow the hosted store exactly (`Menu`, `Ingredients`,
//! `Menu_ingredients`, `Orders`, `Student`).

pub mod ingredient;
pub mod menu;
pub mod menu_ingredient;
pub mod order;
pub mod student;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::ingredient::Entity as Ingredient;
    pub use super::menu::Entity as Menu;
    pub use super::menu_ingredient::Entity as MenuIngredient;
    pub use super::order::Entity as Order;
    pub use super::student::Entity as Student;
}
