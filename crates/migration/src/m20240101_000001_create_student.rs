//! Create `student` table.
//!
//! Integer primary key assigned by the engine; `major` and `gpa` are nullable.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(pk_auto(Student::Id))
                    .col(string(Student::FirstName))
                    .col(string(Student::LastName))
                    .col(string(Student::Email))
                    .col(string_null(Student::Major))
                    .col(double_null(Student::Gpa))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Student::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Student { Table, Id, FirstName, LastName, Email, Major, Gpa }
