use console::style;
use showcase::db;
use showcase::migration::{Migrator, MigratorTrait};

use crate::MigrateAction;

pub(crate) async fn handle_migrate(
    action: MigrateAction,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if let MigrateAction::Fresh { yes: false } = action {
        return Err("`migrate fresh` deletes every project and upload setting; pass --yes to confirm".into());
    }

    let db = db::connect(database_url).await?;

    match action {
        MigrateAction::Up => {
            let pending = Migrator::get_pending_migrations(&db).await?.len();
            if pending == 0 {
                println!("Schema is up to date.");
                return Ok(());
            }
            Migrator::up(&db, None).await?;
            println!("{} {pending} migration(s).", style("Applied").green());
        }
        MigrateAction::Down => {
            Migrator::down(&db, Some(1)).await?;
            println!("{} the last migration.", style("Rolled back").yellow());
        }
        MigrateAction::Status => {
            Migrator::status(&db).await?;
        }
        MigrateAction::Fresh { .. } => {
            Migrator::fresh(&db).await?;
            println!("{} schema recreated from scratch.", style("Fresh:").red());
        }
    }

    Ok(())
}
