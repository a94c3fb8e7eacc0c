//! Loading of the rows every analytics view is computed from.

use std::collections::HashMap;

use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use tracing::{debug, instrument};

use model::entities::{ingredient, menu, menu_ingredient, order};

use crate::error::Result;

/// Menu rows keyed by id.
pub type MenuIndex<'a> = HashMap<i32, &'a menu::Model>;

/// Builds an id lookup over menu rows.
pub fn index_menu(menu: &[menu::Model]) -> MenuIndex<'_> {
    menu.iter().map(|item| (item.id, item)).collect()
}

/// A fresh copy of the menu, ingredient, association and order rows.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Newest first, later inserts first on equal timestamps
    pub menu: Vec<menu::Model>,
    pub links: Vec<menu_ingredient::Model>,
    /// Ordered by id
    pub ingredients: Vec<ingredient::Model>,
    /// Oldest first, then by id
    pub orders: Vec<order::Model>,
}

impl Snapshot {
    /// Reads every table the views need. Nothing is cached between calls.
    #[instrument(skip(db))]
    pub async fn load(db: &DatabaseConnection) -> Result<Self> {
        let menu = menu::Entity::find()
            .order_by_desc(menu::Column::CreatedAt)
            .order_by_desc(menu::Column::Id)
            .all(db)
            .await?;
        let links = menu_ingredient::Entity::find()
            .order_by_asc(menu_ingredient::Column::Id)
            .all(db)
            .await?;
        let ingredients = ingredient::Entity::find()
            .order_by_asc(ingredient::Column::Id)
            .all(db)
            .await?;
        let orders = order::Entity::find()
            .order_by_asc(order::Column::CreatedAt)
            .order_by_asc(order::Column::Id)
            .all(db)
            .await?;

        debug!(
            menu = menu.len(),
            links = links.len(),
            ingredients = ingredients.len(),
            orders = orders.len(),
            "Loaded snapshot"
        );

        Ok(Self { menu, links, ingredients, orders })
    }

    pub fn menu_index(&self) -> MenuIndex<'_> {
        index_menu(&self.menu)
    }
}
