use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Store tables that publish change events. Names match the store exactly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum Table {
    Orders,
    Menu,
    Ingredients,
    #[serde(rename = "Menu_ingredients")]
    MenuIngredients,
    Student,
}

impl Table {
    pub const ALL: [Table; 5] = [
        Table::Orders,
        Table::Menu,
        Table::Ingredients,
        Table::MenuIngredients,
        Table::Student,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Table::Orders => "Orders",
            Table::Menu => "Menu",
            Table::Ingredients => "Ingredients",
            Table::MenuIngredients => "Menu_ingredients",
            Table::Student => "Student",
        }
    }

    /// Looks a table up by its store name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|table| table.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Insert => "insert",
            ChangeKind::Update => "update",
            ChangeKind::Delete => "delete",
        }
    }
}

/// A single row change on a table.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ChangeEvent {
    pub table: Table,
    pub kind: ChangeKind,
    pub id: i32,
}
