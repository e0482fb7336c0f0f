pub use sea_orm_migration::prelude::*;

mod m20250901_000001_create_houses_and_ledger;
mod m20250905_000001_create_ceremonies_and_courses;
mod m20250918_000001_add_reconciliation_audit;
mod m20250922_000001_waitlist_unique_user;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_houses_and_ledger::Migration),
            Box::new(m20250905_000001_create_ceremonies_and_courses::Migration),
            Box::new(m20250918_000001_add_reconciliation_audit::Migration),
            Box::new(m20250922_000001_waitlist_unique_user::Migration),
        ]
    }
}
