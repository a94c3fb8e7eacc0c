use model::entities::prelude::*;
use sea_orm::entity::prelude::*;
use sea_orm::Iden;

/// Table and column names taken from the entities, so the schema cannot
/// drift from the names the store uses (`Menu_ingredients`, `Orders`, ...).
pub trait EntityIden: EntityTrait {
    fn table() -> Name {
        Name(Self::default().table_name().to_string())
    }

    fn column<C: ColumnTrait + Iden>(column: C) -> Name {
        let mut name = String::new();
        column.unquoted(&mut name);
        Name(name)
    }
}

impl EntityIden for Menu {}
impl EntityIden for Ingredient {}
impl EntityIden for MenuIngredient {}
impl EntityIden for Order {}
impl EntityIden for Student {}

/// An owned identifier usable anywhere sea-query expects an [`Iden`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(String);

impl Iden for Name {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        let _ = s.write_str(&self.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::entities::{menu_ingredient, order};

    #[test]
    fn names_come_from_the_entities() {
        assert_eq!(Order::table().to_string(), "Orders");
        assert_eq!(MenuIngredient::table().to_string(), "Menu_ingredients");
        assert_eq!(Order::column(order::Column::MenuId).to_string(), "menu_id");
        assert_eq!(
            MenuIngredient::column(menu_ingredient::Column::IngredientId).to_string(),
            "ingredient_id"
        );
    }
}
