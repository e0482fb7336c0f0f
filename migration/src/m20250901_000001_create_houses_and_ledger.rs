use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Houses {
    Table,
    Id,
    Name,
    Slug,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum FinancialCategories {
    Table,
    Id,
    HouseId,
    Name,
    Kind,
    Color,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum FinancialTransactions {
    Table,
    Id,
    HouseId,
    Kind,
    AmountCents,
    OccurredOn,
    CategoryId,
    PaymentMethod,
    Description,
    Notes,
    Reconciled,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PaymentRecords {
    Table,
    Id,
    HouseId,
    UserId,
    AmountCents,
    Status,
    PaidAt,
    ProductKind,
    ProductId,
    Description,
    PaymentMethod,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("transaction_kind"))
                    .values(vec![Alias::new("entrada"), Alias::new("saida")])
                    .to_owned(),
            )
            .await?;
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("payment_product_kind"))
                    .values(vec![
                        Alias::new("ceremony"),
                        Alias::new("course"),
                        Alias::new("product"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Houses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Houses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Houses::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Houses::Slug)
                            .string_len(128)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Houses::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Houses::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FinancialCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FinancialCategories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FinancialCategories::HouseId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinancialCategories::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinancialCategories::Kind)
                            .custom(Alias::new("transaction_kind"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinancialCategories::Color)
                            .string_len(16)
                            .not_null()
                            .default("#6B7280"),
                    )
                    .col(
                        ColumnDef::new(FinancialCategories::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(FinancialCategories::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_financial_categories_house")
                            .from(FinancialCategories::Table, FinancialCategories::HouseId)
                            .to(Houses::Table, Houses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FinancialTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FinancialTransactions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FinancialTransactions::HouseId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinancialTransactions::Kind)
                            .custom(Alias::new("transaction_kind"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinancialTransactions::AmountCents)
                            .big_integer()
                            .not_null()
                            .check(Expr::col(FinancialTransactions::AmountCents).gt(0)),
                    )
                    .col(
                        ColumnDef::new(FinancialTransactions::OccurredOn)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FinancialTransactions::CategoryId).uuid().null())
                    .col(
                        ColumnDef::new(FinancialTransactions::PaymentMethod)
                            .string_len(64)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FinancialTransactions::Description)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FinancialTransactions::Notes).text().null())
                    .col(
                        ColumnDef::new(FinancialTransactions::Reconciled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(FinancialTransactions::CreatedBy)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinancialTransactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FinancialTransactions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_financial_transactions_house")
                            .from(FinancialTransactions::Table, FinancialTransactions::HouseId)
                            .to(Houses::Table, Houses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_financial_transactions_category")
                            .from(
                                FinancialTransactions::Table,
                                FinancialTransactions::CategoryId,
                            )
                            .to(FinancialCategories::Table, FinancialCategories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_financial_transactions_house_date")
                    .table(FinancialTransactions::Table)
                    .col(FinancialTransactions::HouseId)
                    .col(FinancialTransactions::OccurredOn)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PaymentRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentRecords::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PaymentRecords::HouseId).uuid().not_null())
                    .col(ColumnDef::new(PaymentRecords::UserId).uuid().null())
                    .col(
                        ColumnDef::new(PaymentRecords::AmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentRecords::Status)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentRecords::PaidAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PaymentRecords::ProductKind)
                            .custom(Alias::new("payment_product_kind"))
                            .not_null(),
                    )
                    .col(ColumnDef::new(PaymentRecords::ProductId).uuid().null())
                    .col(ColumnDef::new(PaymentRecords::Description).text().null())
                    .col(
                        ColumnDef::new(PaymentRecords::PaymentMethod)
                            .string_len(64)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PaymentRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_payment_records_house_paid_at")
                    .table(PaymentRecords::Table)
                    .col(PaymentRecords::HouseId)
                    .col(PaymentRecords::PaidAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(PaymentRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(FinancialTransactions::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(FinancialCategories::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Houses::Table).to_owned())
            .await?;
        manager
            .drop_type(
                Type::drop()
                    .name(Alias::new("payment_product_kind"))
                    .to_owned(),
            )
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("transaction_kind")).to_owned())
            .await?;
        Ok(())
    }
}
