use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Houses {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Ceremonies {
    Table,
    Id,
    HouseId,
    Title,
    Date,
    Time,
    Capacity,
    Location,
    Medicine,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Enrollments {
    Table,
    Id,
    HouseId,
    CeremonyId,
    UserId,
    Paid,
    Cancelled,
    AdminNote,
    CreatedAt,
}

#[derive(DeriveIden)]
enum WaitlistEntries {
    Table,
    Id,
    HouseId,
    CeremonyId,
    UserId,
    Position,
    Notified,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
    HouseId,
    Title,
    StartsOn,
    Capacity,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CourseEnrollments {
    Table,
    Id,
    HouseId,
    CourseId,
    UserId,
    Paid,
    Cancelled,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Testimonials {
    Table,
    Id,
    HouseId,
    UserId,
    Body,
    Approved,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

fn created_at<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .default(Expr::cust("NOW()"))
        .null()
        .to_owned()
}

fn house_fk<T: IntoIden + 'static, C: IntoIden + 'static>(
    name: &str,
    table: T,
    col: C,
) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from(table, col)
        .to(Houses::Table, Houses::Id)
        .on_delete(ForeignKeyAction::Cascade)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ceremonies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Ceremonies::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Ceremonies::HouseId).uuid().not_null())
                    .col(ColumnDef::new(Ceremonies::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Ceremonies::Date).date().not_null())
                    .col(ColumnDef::new(Ceremonies::Time).time().null())
                    .col(ColumnDef::new(Ceremonies::Capacity).integer().null())
                    .col(ColumnDef::new(Ceremonies::Location).string_len(255).null())
                    .col(ColumnDef::new(Ceremonies::Medicine).string_len(128).null())
                    .col(&mut created_at(Ceremonies::CreatedAt))
                    .foreign_key(&mut house_fk(
                        "fk_ceremonies_house",
                        Ceremonies::Table,
                        Ceremonies::HouseId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Enrollments::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Enrollments::HouseId).uuid().not_null())
                    .col(ColumnDef::new(Enrollments::CeremonyId).uuid().not_null())
                    .col(ColumnDef::new(Enrollments::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Enrollments::Paid)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Enrollments::Cancelled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Enrollments::AdminNote).text().null())
                    .col(&mut created_at(Enrollments::CreatedAt))
                    .foreign_key(&mut house_fk(
                        "fk_enrollments_house",
                        Enrollments::Table,
                        Enrollments::HouseId,
                    ))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollments_ceremony")
                            .from(Enrollments::Table, Enrollments::CeremonyId)
                            .to(Ceremonies::Table, Ceremonies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_enrollments_ceremony")
                    .table(Enrollments::Table)
                    .col(Enrollments::CeremonyId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_enrollments_user")
                    .table(Enrollments::Table)
                    .col(Enrollments::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WaitlistEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WaitlistEntries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WaitlistEntries::HouseId).uuid().not_null())
                    .col(ColumnDef::new(WaitlistEntries::CeremonyId).uuid().not_null())
                    .col(ColumnDef::new(WaitlistEntries::UserId).uuid().not_null())
                    .col(ColumnDef::new(WaitlistEntries::Position).integer().not_null())
                    .col(
                        ColumnDef::new(WaitlistEntries::Notified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(&mut created_at(WaitlistEntries::CreatedAt))
                    .foreign_key(&mut house_fk(
                        "fk_waitlist_entries_house",
                        WaitlistEntries::Table,
                        WaitlistEntries::HouseId,
                    ))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_waitlist_entries_ceremony")
                            .from(WaitlistEntries::Table, WaitlistEntries::CeremonyId)
                            .to(Ceremonies::Table, Ceremonies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Courses::HouseId).uuid().not_null())
                    .col(ColumnDef::new(Courses::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Courses::StartsOn).date().not_null())
                    .col(ColumnDef::new(Courses::Capacity).integer().null())
                    .col(&mut created_at(Courses::CreatedAt))
                    .foreign_key(&mut house_fk(
                        "fk_courses_house",
                        Courses::Table,
                        Courses::HouseId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourseEnrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseEnrollments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseEnrollments::HouseId).uuid().not_null())
                    .col(ColumnDef::new(CourseEnrollments::CourseId).uuid().not_null())
                    .col(ColumnDef::new(CourseEnrollments::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(CourseEnrollments::Paid)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CourseEnrollments::Cancelled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(&mut created_at(CourseEnrollments::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_enrollments_course")
                            .from(CourseEnrollments::Table, CourseEnrollments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Testimonials::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Testimonials::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Testimonials::HouseId).uuid().not_null())
                    .col(ColumnDef::new(Testimonials::UserId).uuid().not_null())
                    .col(ColumnDef::new(Testimonials::Body).text().not_null())
                    .col(
                        ColumnDef::new(Testimonials::Approved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(&mut created_at(Testimonials::CreatedAt))
                    .foreign_key(&mut house_fk(
                        "fk_testimonials_house",
                        Testimonials::Table,
                        Testimonials::HouseId,
                    ))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Testimonials::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(CourseEnrollments::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(WaitlistEntries::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Ceremonies::Table).to_owned())
            .await?;
        Ok(())
    }
}
