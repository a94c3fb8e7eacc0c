pub use sea_orm_migration::prelude::*;

pub mod entity_iden;
mod m20250301_000001_create_canteen_tables;
mod m20250301_000002_add_order_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_canteen_tables::Migration),
            Box::new(m20250301_000002_add_order_indexes::Migration),
        ]
    }
}
