//! Shared fixtures: an in-memory SQLite database with a `posts` table.

#![allow(dead_code)]

use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend,
    Schema, Set,
};

pub mod post {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "posts")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub title: String,
        pub status: String,
        pub views: i32,
        pub summary: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Connect to a fresh in-memory database and create the `posts` table
pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");

    let schema = Schema::new(DbBackend::Sqlite);
    let create = schema.create_table_from_entity(post::Entity);
    db.execute(db.get_database_backend().build(&create))
        .await
        .expect("Failed to create posts table");

    db
}

/// Build an unsaved post
pub fn new_post(title: &str, status: &str, views: i32) -> post::ActiveModel {
    post::ActiveModel {
        title: Set(title.to_string()),
        status: Set(status.to_string()),
        views: Set(views),
        ..Default::default()
    }
}

/// Insert posts in order (ids start at 1)
pub async fn seed(db: &DatabaseConnection, rows: &[(&str, &str, i32)]) {
    for (title, status, views) in rows {
        new_post(title, status, *views)
            .insert(db)
            .await
            .expect("Failed to seed post");
    }
}

/// Insert `count` published posts with `views == id`
pub async fn seed_published(db: &DatabaseConnection, count: i32) {
    for i in 1..=count {
        new_post(&format!("Post {}", i), "published", i)
            .insert(db)
            .await
            .expect("Failed to seed post");
    }
}
