#![allow(dead_code)]

use pagecrate::EntityQuery;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, Database, DatabaseConnection, DbErr};
use sea_orm_migration::prelude::*;

pub mod person_entity;

pub type PeopleQuery<'db> = EntityQuery<'db, person_entity::Entity, DatabaseConnection>;

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    // Run migrations
    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Database with the schema and the given `(name, age)` rows, inserted in order.
pub async fn setup_people(people: &[(&str, i32)]) -> Result<DatabaseConnection, DbErr> {
    let db = setup_test_db().await?;
    for (name, age) in people {
        person_entity::ActiveModel {
            name: Set((*name).to_string()),
            age: Set(*age),
            ..Default::default()
        }
        .insert(&db)
        .await?;
    }
    Ok(db)
}

/// A(30), B(20), C(25)
pub async fn setup_abc() -> Result<DatabaseConnection, DbErr> {
    setup_people(&[("A", 30), ("B", 20), ("C", 25)]).await
}

pub fn names(people: &[person_entity::Model]) -> Vec<&str> {
    people.iter().map(|p| p.name.as_str()).collect()
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreatePeopleTable)]
    }
}

pub struct CreatePeopleTable;

#[async_trait::async_trait]
impl MigrationName for CreatePeopleTable {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_people_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreatePeopleTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(PeopleTable)
            .if_not_exists()
            .col(
                ColumnDef::new(PeopleColumn::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(PeopleColumn::Name).string().not_null())
            .col(ColumnDef::new(PeopleColumn::Age).integer().not_null())
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PeopleTable).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum PeopleColumn {
    Id,
    Name,
    Age,
}

impl Iden for PeopleColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::Name => "name",
                Self::Age => "age",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct PeopleTable;

impl Iden for PeopleTable {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "people").unwrap();
    }
}
