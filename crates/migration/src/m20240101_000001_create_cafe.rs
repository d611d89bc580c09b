//! Create `cafe` table.
//! One row per cafe; `name` is unique, `coffee_price` is the only nullable column.
//! Text columns carry no length limit.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cafe::Table)
                    .if_not_exists()
                    .col(pk_auto(Cafe::Id))
                    .col(string_uniq(Cafe::Name))
                    .col(string(Cafe::MapUrl))
                    .col(string(Cafe::ImgUrl))
                    .col(string(Cafe::Location))
                    .col(string(Cafe::Seats))
                    .col(boolean(Cafe::HasToilet))
                    .col(boolean(Cafe::HasWifi))
                    .col(boolean(Cafe::HasSockets))
                    .col(boolean(Cafe::CanTakeCalls))
                    .col(string_null(Cafe::CoffeePrice))
                    .to_owned(),
            )
            .await?;

        // Search filters on location
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_cafe_location")
                    .table(Cafe::Table)
                    .col(Cafe::Location)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Cafe::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Cafe {
    Table,
    Id,
    Name,
    MapUrl,
    ImgUrl,
    Location,
    Seats,
    HasToilet,
    HasWifi,
    HasSockets,
    CanTakeCalls,
    CoffeePrice,
}
