use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Schools::Table)
                    .if_not_exists()
                    .col(pk_auto(Schools::Id))
                    .col(string_len(Schools::Code, 50).not_null().unique_key())
                    .col(string_len(Schools::Name, 255).not_null())
                    .col(text_null(Schools::Address))
                    .col(string_len_null(Schools::Phone, 20))
                    .col(string_len_null(Schools::Email, 255))
                    .col(string_len_null(Schools::BaseUrl, 255))
                    .col(string_len_null(Schools::LogoPath, 255))
                    .col(string_len_null(Schools::BannerPath, 255))
                    .col(string_len_null(Schools::PaymentLink, 255))
                    .col(string_len_null(Schools::PrincipalName, 255))
                    .col(integer_null(Schools::EstablishedYear))
                    .col(boolean(Schools::IsActive).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(Schools::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Schools::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Schools::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Schools {
    Table,
    Id,
    Code,
    Name,
    Address,
    Phone,
    Email,
    BaseUrl,
    LogoPath,
    BannerPath,
    PaymentLink,
    PrincipalName,
    EstablishedYear,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
