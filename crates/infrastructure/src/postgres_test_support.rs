use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use canvass_core::{QuestionnaireId, UserId};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Connects to `DATABASE_URL` and migrates it; `None` skips the test.
pub async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres access tests: {error}");
    }

    Some(pool)
}

pub async fn insert_user(pool: &PgPool) -> UserId {
    let user_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO users DEFAULT VALUES
        RETURNING id
        "#,
    )
    .fetch_one(pool)
    .await;

    match user_id {
        Ok(user_id) => UserId::new(user_id),
        Err(error) => panic!("failed to insert test user: {error}"),
    }
}

pub async fn insert_questionnaire(pool: &PgPool, owner_id: UserId) -> QuestionnaireId {
    let questionnaire_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO questionnaires (owner_id, title)
        VALUES ($1, 'access test')
        RETURNING id
        "#,
    )
    .bind(owner_id.as_i64())
    .fetch_one(pool)
    .await;

    match questionnaire_id {
        Ok(questionnaire_id) => QuestionnaireId::new(questionnaire_id),
        Err(error) => panic!("failed to insert test questionnaire: {error}"),
    }
}
