use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum FinancialTransactions {
    Table,
    ReconciledBy,
    ReconciledAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(FinancialTransactions::Table)
                    .add_column_if_not_exists(
                        ColumnDef::new(FinancialTransactions::ReconciledBy)
                            .uuid()
                            .null(),
                    )
                    .add_column_if_not_exists(
                        ColumnDef::new(FinancialTransactions::ReconciledAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(FinancialTransactions::Table)
                    .drop_column(FinancialTransactions::ReconciledAt)
                    .drop_column(FinancialTransactions::ReconciledBy)
                    .to_owned(),
            )
            .await
    }
}
