use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum WaitlistEntries {
    Table,
    CeremonyId,
    UserId,
    Position,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // one entry per (ceremony, user); positions are not re-sequenced on delete
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_waitlist_entries_ceremony_user")
                    .table(WaitlistEntries::Table)
                    .col(WaitlistEntries::CeremonyId)
                    .col(WaitlistEntries::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_waitlist_entries_ceremony_position")
                    .table(WaitlistEntries::Table)
                    .col(WaitlistEntries::CeremonyId)
                    .col(WaitlistEntries::Position)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .name("idx_waitlist_entries_ceremony_position")
                    .table(WaitlistEntries::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .name("uq_waitlist_entries_ceremony_user")
                    .table(WaitlistEntries::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
