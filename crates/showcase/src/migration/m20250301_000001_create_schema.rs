//! Initial migration: projects, technologies and their association table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        self.create_projects(manager).await?;
        self.create_technologies(manager).await?;
        self.create_project_technologies(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectTechnologies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Technologies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;
        Ok(())
    }
}

impl Migration {
    async fn create_projects(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Projects::Id).uuid().not_null().primary_key())
                    // Content
                    .col(ColumnDef::new(Projects::Title).string().not_null())
                    .col(ColumnDef::new(Projects::Description).text().null())
                    .col(ColumnDef::new(Projects::Content).text().null())
                    .col(ColumnDef::new(Projects::GithubUrl).text().null())
                    .col(ColumnDef::new(Projects::LiveUrl).text().null())
                    // GitHub
                    .col(ColumnDef::new(Projects::GithubId).big_integer().null())
                    .col(ColumnDef::new(Projects::Stars).integer().null())
                    .col(ColumnDef::new(Projects::Forks).integer().null())
                    .col(ColumnDef::new(Projects::Language).string().null())
                    // Classification
                    .col(ColumnDef::new(Projects::Origin).string().not_null())
                    .col(
                        ColumnDef::new(Projects::Category)
                            .string()
                            .not_null()
                            .default("personal"),
                    )
                    .col(
                        ColumnDef::new(Projects::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Projects::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    // Archive
                    .col(ColumnDef::new(Projects::ZipFilePath).text().null())
                    .col(ColumnDef::new(Projects::ExtractedPath).text().null())
                    .col(
                        ColumnDef::new(Projects::MainFiles)
                            .json()
                            .not_null()
                            .default(Expr::cust("'[]'")),
                    )
                    .col(
                        ColumnDef::new(Projects::PreviewFiles)
                            .json()
                            .not_null()
                            .default(Expr::cust("'[]'")),
                    )
                    // Timestamps
                    .col(
                        ColumnDef::new(Projects::StartDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Projects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Projects::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Sync upserts key on the external id
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_github_id")
                    .table(Projects::Table)
                    .col(Projects::GithubId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_origin")
                    .table(Projects::Table)
                    .col(Projects::Origin)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_updated_at")
                    .table(Projects::Table)
                    .col((Projects::UpdatedAt, IndexOrder::Desc))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_technologies(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Technologies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Technologies::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Technologies::Name).string().not_null())
                    .col(
                        ColumnDef::new(Technologies::Category)
                            .string()
                            .not_null()
                            .default("other"),
                    )
                    .col(ColumnDef::new(Technologies::Icon).string().null())
                    .col(ColumnDef::new(Technologies::Color).string().null())
                    .col(
                        ColumnDef::new(Technologies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_technologies_name")
                    .table(Technologies::Table)
                    .col(Technologies::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_project_technologies(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProjectTechnologies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectTechnologies::ProjectId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectTechnologies::TechnologyId)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ProjectTechnologies::ProjectId)
                            .col(ProjectTechnologies::TechnologyId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_technologies_project")
                            .from(ProjectTechnologies::Table, ProjectTechnologies::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_technologies_technology")
                            .from(ProjectTechnologies::Table, ProjectTechnologies::TechnologyId)
                            .to(Technologies::Table, Technologies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_technologies_technology")
                    .table(ProjectTechnologies::Table)
                    .col(ProjectTechnologies::TechnologyId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
#[sea_orm(iden = "projects")]
enum Projects {
    Table,
    Id,
    Title,
    Description,
    Content,
    GithubUrl,
    LiveUrl,
    GithubId,
    Stars,
    Forks,
    Language,
    Origin,
    Category,
    Status,
    Featured,
    ZipFilePath,
    ExtractedPath,
    MainFiles,
    PreviewFiles,
    StartDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "technologies")]
enum Technologies {
    Table,
    Id,
    Name,
    Category,
    Icon,
    Color,
    CreatedAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "project_technologies")]
enum ProjectTechnologies {
    Table,
    ProjectId,
    TechnologyId,
}
