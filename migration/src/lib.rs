pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20260301_000001_forms_and_links;
mod m20260301_000002_submissions;
mod m20260301_000003_link_events;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_forms_and_links::Migration),
            Box::new(m20260301_000002_submissions::Migration),
            Box::new(m20260301_000003_link_events::Migration),
        ]
    }
}
