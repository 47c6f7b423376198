#![allow(dead_code)]

use chrono::{Duration, Utc};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{Engine, InvitationAction, InvitationCmd, NewAssetCmd, Partnership};
use migration::MigratorTrait;
use uuid::Uuid;

pub const USERS: [&str; 4] = ["alice", "bob", "carol", "dave"];

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    for user in USERS {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (username, password) VALUES (?, ?)",
            vec![user.into(), "password".into()],
        ))
        .await
        .unwrap();
    }
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

/// Asset "House" owned by alice.
pub async fn new_asset(engine: &Engine) -> Uuid {
    let company_id = engine.new_company("Acme", "alice").await.unwrap();
    engine
        .new_asset(NewAssetCmd::new("House", "real_estate", company_id, "alice"))
        .await
        .unwrap()
}

/// Invite `user` from alice and accept on their behalf.
pub async fn add_partner(engine: &Engine, asset_id: Uuid, user: &str, share: f64) -> Partnership {
    let invitation = engine
        .create_invitation(InvitationCmd::new(asset_id, "alice", user, share))
        .await
        .unwrap();
    engine
        .respond_to_invitation(invitation.id, user, InvitationAction::Accept)
        .await
        .unwrap()
        .partnership
        .unwrap()
}

/// Move the expiry of an invitation into the past.
pub async fn backdate_invitation(db: &DatabaseConnection, invitation_id: Uuid) {
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "UPDATE partnership_invitations SET expires_at = ? WHERE id = ?",
        vec![
            (Utc::now() - Duration::days(1)).into(),
            invitation_id.to_string().into(),
        ],
    ))
    .await
    .unwrap();
}

/// Insert an active partnership directly, bypassing the cap check.
pub async fn force_partnership(db: &DatabaseConnection, asset_id: Uuid, user: &str, share: f64) {
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO asset_partnerships (asset_id, user_id, share_percentage, is_active, joined_at) \
         VALUES (?, ?, ?, ?, ?)",
        vec![
            asset_id.to_string().into(),
            user.into(),
            share.into(),
            true.into(),
            Utc::now().into(),
        ],
    ))
    .await
    .unwrap();
}

pub async fn count_rows(db: &DatabaseConnection, table: &str) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(
            backend,
            format!("SELECT COUNT(*) AS n FROM {table}"),
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "n").unwrap()
}
