use std::env;

use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema, Statement,
};
use tracing::info;

use crate::domain::{
    application::entity::application, location::entity::location,
    member::entity::{activity_log, member}, reservation::entity::reservation,
};

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    info!("Successfully connected to the database.");

    // Check if schema update is enabled
    let should_update_schema = env::var("DB_SCHEMA_UPDATE")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or_else(|_| {
            tracing::warn!(
                "Invalid DB_SCHEMA_UPDATE value, defaulting to false. Use 'true' or 'false'."
            );
            false
        });

    if should_update_schema {
        create_tables(&db).await?;
    } else {
        info!("Skipping database schema synchronization (DB_SCHEMA_UPDATE is not true).");
    }

    Ok(db)
}

async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    info!("Starting database schema synchronization...");

    // Order matters for foreign keys! (Parent first, then Child)

    // 1. Independent Entities
    create_table_if_not_exists(db, member::Entity).await?;
    create_table_if_not_exists(db, location::Entity).await?;

    // 2. Dependent Entities
    create_table_if_not_exists(db, reservation::Entity).await?;
    create_table_if_not_exists(db, application::Entity).await?;
    create_table_if_not_exists(db, activity_log::Entity).await?;

    // 원장 조회 최적화: 예약별 상태/신청 시각 인덱스
    create_index_if_not_exists(
        db,
        "idx_application_reservation_status",
        "reservation_application",
        &["reservation_id", "status"],
    )
    .await?;
    create_index_if_not_exists(
        db,
        "idx_application_reservation_applied",
        "reservation_application",
        &["reservation_id", "applied_at"],
    )
    .await?;
    create_index_if_not_exists(
        db,
        "idx_activity_log_member_created",
        "activity_log",
        &["member_id", "created_at"],
    )
    .await?;

    info!("Database schema synchronization completed.");
    Ok(())
}

async fn create_table_if_not_exists<E>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();

    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

async fn create_index_if_not_exists(
    db: &DatabaseConnection,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let cols = columns.join(", ");
    let sql = format!("CREATE INDEX {} ON {} ({})", index_name, table_name, cols);
    let stmt = Statement::from_string(backend, sql);
    match db.execute(stmt).await {
        Ok(_) => Ok(()),
        Err(e) => {
            // Ignore "index already exists" errors for idempotency
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("duplicate") || err_str.contains("exists") {
                Ok(())
            } else {
                tracing::error!("Failed to create index {}: {}", index_name, e);
                Err(e)
            }
        }
    }
}
