pub use sea_orm_migration::prelude::*;

mod m20230402_101500_users;
mod m20230402_102000_transfers;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20230402_101500_users::Migration),
            Box::new(m20230402_102000_transfers::Migration),
        ]
    }
}
