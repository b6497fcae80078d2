use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建学校表
        manager
            .create_table(
                Table::create()
                    .table(Schools::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Schools::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Schools::Name).string().not_null())
                    .col(ColumnDef::new(Schools::Address).string().not_null())
                    .col(ColumnDef::new(Schools::Email).string().not_null())
                    .col(ColumnDef::new(Schools::Logo).string().null())
                    .col(ColumnDef::new(Schools::Instagram).string().null())
                    .col(ColumnDef::new(Schools::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::SchoolId).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Users::Table, Users::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学校教师关联表
        manager
            .create_table(
                Table::create()
                    .table(SchoolTeachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SchoolTeachers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SchoolTeachers::SchoolId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SchoolTeachers::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SchoolTeachers::AssignedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SchoolTeachers::Table, SchoolTeachers::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SchoolTeachers::Table, SchoolTeachers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课次表
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Classes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Classes::SeriesId).string().null())
                    .col(ColumnDef::new(Classes::SchoolId).big_integer().not_null())
                    .col(ColumnDef::new(Classes::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Classes::Title).string().not_null())
                    .col(ColumnDef::new(Classes::Level).string().not_null())
                    .col(ColumnDef::new(Classes::Description).text().null())
                    .col(ColumnDef::new(Classes::StartsAt).big_integer().not_null())
                    .col(
                        ColumnDef::new(Classes::DurationMinutes)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Classes::MaxStudents).integer().not_null())
                    .col(
                        ColumnDef::new(Classes::IsRecurring)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Classes::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Classes::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Classes::Table, Classes::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Classes::Table, Classes::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建报名关联表
        manager
            .create_table(
                Table::create()
                    .table(ClassEnrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassEnrollments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClassEnrollments::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassEnrollments::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassEnrollments::EnrolledAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassEnrollments::Table, ClassEnrollments::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassEnrollments::Table, ClassEnrollments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 唯一索引：集合语义依赖于此
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_class_enrollments_class_user")
                    .table(ClassEnrollments::Table)
                    .col(ClassEnrollments::ClassId)
                    .col(ClassEnrollments::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_school_teachers_school_user")
                    .table(SchoolTeachers::Table)
                    .col(SchoolTeachers::SchoolId)
                    .col(SchoolTeachers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 查询索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_classes_school_starts_at")
                    .table(Classes::Table)
                    .col(Classes::SchoolId)
                    .col(Classes::StartsAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_classes_series_starts_at")
                    .table(Classes::Table)
                    .col(Classes::SeriesId)
                    .col(Classes::StartsAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(ClassEnrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SchoolTeachers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Schools::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Schools {
    #[sea_orm(iden = "schools")]
    Table,
    Id,
    Name,
    Address,
    Email,
    Logo,
    Instagram,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Email,
    Name,
    PasswordHash,
    Role,
    SchoolId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SchoolTeachers {
    #[sea_orm(iden = "school_teachers")]
    Table,
    Id,
    SchoolId,
    UserId,
    AssignedAt,
}

#[derive(DeriveIden)]
enum Classes {
    #[sea_orm(iden = "classes")]
    Table,
    Id,
    SeriesId,
    SchoolId,
    TeacherId,
    Title,
    Level,
    Description,
    StartsAt,
    DurationMinutes,
    MaxStudents,
    IsRecurring,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ClassEnrollments {
    #[sea_orm(iden = "class_enrollments")]
    Table,
    Id,
    ClassId,
    UserId,
    EnrolledAt,
}
