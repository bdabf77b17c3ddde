//! Persistence operations for projects, technologies and settings.
//!
//! Every function is generic over [`sea_orm::ConnectionTrait`] so callers can
//! pass either a pooled connection or an open transaction.

mod association;
mod errors;
mod project;
mod setting;
mod technology;

pub use association::{delete_for_project, replace_project_technologies, technologies_for_project};
pub use errors::{RepositoryError, Result};
pub use project::{
    ProjectFilter, count as count_projects, delete as delete_project,
    find_by_github_id as find_project_by_github_id, find_by_id as find_project,
    get as get_project, insert as insert_project, list as list_projects,
    list_manual_with_archive, recent as recent_projects, total_stars,
    update as update_project,
};
pub use setting::{get as get_setting, put as put_setting};
pub use technology::{
    TechnologyUsage, count as count_technologies, find_by_name as find_technology_by_name,
    find_or_create as find_or_create_technology, find_or_create_all as find_or_create_technologies,
    list_with_usage as list_technologies_with_usage,
};

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;
    use uuid::Uuid;

    #[test]
    fn test_not_found_by_id_mentions_the_id() {
        let id = Uuid::new_v4();
        let err = RepositoryError::not_found_by_id(id);
        assert!(err.to_string().contains(&id.to_string()));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_not_found_by_github_id_mentions_the_id() {
        let err = RepositoryError::not_found_by_github_id(12345);
        assert!(err.to_string().contains("12345"));
    }

    #[test]
    fn test_db_err_converts_to_database_variant() {
        let err: RepositoryError = DbErr::Custom("boom".to_string()).into();
        assert!(err.to_string().contains("Database error"));
        assert!(!err.is_not_found());
    }
}

#[cfg(all(test, feature = "sqlite", feature = "migrate"))]
mod sqlite_tests {
    use chrono::Utc;
    use sea_orm::{DatabaseConnection, Set, TransactionTrait};
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::connect_and_migrate;
    use crate::entity::project::ActiveModel;
    use crate::entity::project_origin::ProjectOrigin;
    use crate::entity::project_status::ProjectStatus;
    use crate::entity::technology_category::TechnologyCategory;

    async fn setup_db() -> DatabaseConnection {
        connect_and_migrate("sqlite::memory:")
            .await
            .expect("test db should migrate")
    }

    fn manual_project(title: &str) -> ActiveModel {
        let now = Utc::now().fixed_offset();
        ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title.to_string()),
            description: Set(None),
            content: Set(None),
            github_url: Set(None),
            live_url: Set(None),
            github_id: Set(None),
            stars: Set(None),
            forks: Set(None),
            language: Set(None),
            origin: Set(ProjectOrigin::Manual),
            category: Set("personal".to_string()),
            status: Set(ProjectStatus::Active),
            featured: Set(false),
            zip_file_path: Set(Some(format!("/uploads/{title}.zip"))),
            extracted_path: Set(None),
            main_files: Set(json!([])),
            preview_files: Set(json!([])),
            start_date: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    #[tokio::test]
    async fn test_find_or_create_assigns_category_once() {
        let db = setup_db().await;

        let created = find_or_create_technology(&db, "react").await.expect("create");
        assert_eq!(created.name, "React");
        assert_eq!(created.category, TechnologyCategory::Frontend);

        let again = find_or_create_technology(&db, "React").await.expect("lookup");
        assert_eq!(again.id, created.id);
        assert_eq!(count_technologies(&db).await.expect("count"), 1);
    }

    #[tokio::test]
    async fn test_find_or_create_rejects_blank_names() {
        let db = setup_db().await;
        let err = find_or_create_technology(&db, "   ")
            .await
            .expect_err("blank name should fail");
        assert!(matches!(err, RepositoryError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_find_or_create_all_dedups_in_order() {
        let db = setup_db().await;
        let techs = find_or_create_technologies(&db, &["Rust", "rust", "", "Docker"])
            .await
            .expect("create all");
        let names: Vec<_> = techs.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "Docker"]);
    }

    #[tokio::test]
    async fn test_replacing_associations_leaves_exactly_the_new_set() {
        let db = setup_db().await;
        let project = insert_project(&db, manual_project("demo")).await.expect("insert");
        let techs = find_or_create_technologies(&db, &["A-lang", "B-lang", "C-lang"])
            .await
            .expect("technologies");
        let (a, b, c) = (techs[0].id, techs[1].id, techs[2].id);

        replace_project_technologies(&db, project.id, &[a, b])
            .await
            .expect("first replace");
        replace_project_technologies(&db, project.id, &[b, c, c])
            .await
            .expect("second replace");

        let linked = technologies_for_project(&db, project.id)
            .await
            .expect("linked");
        let names: Vec<_> = linked.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["B-lang", "C-lang"]);
    }

    #[tokio::test]
    async fn test_replace_with_empty_set_clears_links() {
        let db = setup_db().await;
        let project = insert_project(&db, manual_project("empty")).await.expect("insert");
        let tech = find_or_create_technology(&db, "Go").await.expect("tech");
        replace_project_technologies(&db, project.id, &[tech.id])
            .await
            .expect("link");

        replace_project_technologies(&db, project.id, &[])
            .await
            .expect("clear");

        assert!(technologies_for_project(&db, project.id)
            .await
            .expect("linked")
            .is_empty());
    }

    #[tokio::test]
    async fn test_repository_functions_work_inside_a_transaction() {
        let db = setup_db().await;
        let txn = db.begin().await.expect("begin");
        let project = insert_project(&txn, manual_project("txn")).await.expect("insert");
        let tech = find_or_create_technology(&txn, "Python").await.expect("tech");
        replace_project_technologies(&txn, project.id, &[tech.id])
            .await
            .expect("link");
        txn.commit().await.expect("commit");

        let linked = technologies_for_project(&db, project.id).await.expect("linked");
        assert_eq!(linked.len(), 1);
    }

    #[tokio::test]
    async fn test_usage_counts_follow_links() {
        let db = setup_db().await;
        let first = insert_project(&db, manual_project("one")).await.expect("insert");
        let second = insert_project(&db, manual_project("two")).await.expect("insert");
        let techs = find_or_create_technologies(&db, &["Docker", "Vite"])
            .await
            .expect("techs");
        replace_project_technologies(&db, first.id, &[techs[0].id, techs[1].id])
            .await
            .expect("link first");
        replace_project_technologies(&db, second.id, &[techs[0].id])
            .await
            .expect("link second");

        let usage = list_technologies_with_usage(&db).await.expect("usage");
        let docker = usage
            .iter()
            .find(|u| u.technology.name == "Docker")
            .expect("docker listed");
        let vite = usage
            .iter()
            .find(|u| u.technology.name == "Vite")
            .expect("vite listed");
        assert_eq!(docker.project_count, 2);
        assert_eq!(vite.project_count, 1);
    }

    #[tokio::test]
    async fn test_list_filters_by_origin_and_orders_featured_first() {
        let db = setup_db().await;
        insert_project(&db, manual_project("plain")).await.expect("insert");
        let mut featured = manual_project("star");
        featured.featured = Set(true);
        insert_project(&db, featured).await.expect("insert");

        let mut synced = manual_project("synced");
        synced.origin = Set(ProjectOrigin::GitHub);
        synced.github_id = Set(Some(7));
        synced.stars = Set(Some(40));
        synced.zip_file_path = Set(None);
        insert_project(&db, synced).await.expect("insert");

        let manual = list_projects(
            &db,
            &ProjectFilter {
                origin: Some(ProjectOrigin::Manual),
                ..Default::default()
            },
        )
        .await
        .expect("list");
        assert_eq!(manual.len(), 2);
        assert_eq!(manual[0].title, "star");

        let with_archive = list_manual_with_archive(&db).await.expect("archives");
        assert_eq!(with_archive.len(), 2);

        let by_github = find_project_by_github_id(&db, 7).await.expect("lookup");
        assert_eq!(by_github.map(|p| p.title), Some("synced".to_string()));

        assert_eq!(total_stars(&db).await.expect("stars"), 40);
    }

    #[tokio::test]
    async fn test_get_project_reports_not_found() {
        let db = setup_db().await;
        let err = get_project(&db, Uuid::new_v4())
            .await
            .expect_err("missing project");
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_settings_upsert_overwrites_value() {
        let db = setup_db().await;
        assert_eq!(get_setting(&db, "k").await.expect("get"), None);
        put_setting(&db, "k", "1").await.expect("insert");
        put_setting(&db, "k", "2").await.expect("update");
        assert_eq!(get_setting(&db, "k").await.expect("get"), Some("2".to_string()));
    }
}
