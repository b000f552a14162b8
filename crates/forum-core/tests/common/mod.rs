use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

use forum_core::util::uuid_v4;

/// Fresh in-memory database with the full schema applied.
///
/// A single pooled connection, otherwise each checkout would see its own
/// empty in-memory database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("open in-memory sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");
    db
}

pub async fn insert_user(db: &DatabaseConnection, username: &str) -> entity::user::Model {
    entity::user::ActiveModel {
        id: Set(uuid_v4()),
        username: Set(username.to_owned()),
        email: Set(format!("{username}@example.com")),
        created_at: Set(0),
        updated_at: Set(0),
    }
    .insert(db)
    .await
    .expect("insert user")
}

#[allow(dead_code)]
pub async fn insert_question(
    db: &DatabaseConnection,
    author_id: &str,
    title: &str,
) -> entity::question::Model {
    entity::question::ActiveModel {
        id: Set(uuid_v4()),
        author_id: Set(author_id.to_owned()),
        title: Set(title.to_owned()),
        created_at: Set(0),
    }
    .insert(db)
    .await
    .expect("insert question")
}

#[allow(dead_code)]
pub async fn insert_answer(
    db: &DatabaseConnection,
    question_id: &str,
    author_id: &str,
) -> entity::answer::Model {
    entity::answer::ActiveModel {
        id: Set(uuid_v4()),
        question_id: Set(question_id.to_owned()),
        author_id: Set(author_id.to_owned()),
        body: Set("an answer".to_owned()),
        created_at: Set(0),
    }
    .insert(db)
    .await
    .expect("insert answer")
}

#[allow(dead_code)]
pub async fn insert_comment(
    db: &DatabaseConnection,
    author_id: &str,
    question_id: Option<&str>,
    answer_id: Option<&str>,
) -> entity::comment::Model {
    entity::comment::ActiveModel {
        id: Set(uuid_v4()),
        author_id: Set(author_id.to_owned()),
        question_id: Set(question_id.map(str::to_owned)),
        answer_id: Set(answer_id.map(str::to_owned)),
        body: Set("a comment".to_owned()),
        created_at: Set(0),
    }
    .insert(db)
    .await
    .expect("insert comment")
}
