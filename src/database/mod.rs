use mongodb::{Client, Collection, Database};
use std::error::Error;

pub const USERS: &str = "users";
pub const BLOGS: &str = "blogs";
pub const SESSIONS: &str = "sessions";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        // Timeouts
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        let db = client.database(&database_name(uri));

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the models rely on
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        // users(email) unique - one account per email
        let users = self.collection::<mongodb::bson::Document>(USERS);
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        // Re-creating an identical index is a no-op; an error means the index is
        // missing, e.g. duplicate emails are already stored.
        if let Err(e) = users.create_index(email_index).await {
            log::error!("❌ Failed to create unique index users(email): {}", e);
            return Err(e.into());
        }
        log::info!("   ✅ Index created: users(email) unique");

        // blogs(user) - listing by owner
        let blogs = self.collection::<mongodb::bson::Document>(BLOGS);
        let owner_index = IndexModel::builder()
            .keys(doc! { "user": 1 })
            .build();

        match blogs.create_index(owner_index).await {
            Ok(_) => log::info!("   ✅ Index created: blogs(user)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // sessions(expires) TTL - MongoDB removes expired sessions itself
        let sessions = self.collection::<mongodb::bson::Document>(SESSIONS);
        let ttl_index = IndexModel::builder()
            .keys(doc! { "expires": 1 })
            .options(
                IndexOptions::builder()
                    .expire_after(std::time::Duration::from_secs(0))
                    .build(),
            )
            .build();

        match sessions.create_index(ttl_index).await {
            Ok(_) => log::info!("   ✅ Index created: sessions(expires) TTL"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub async fn health_check(&self) -> Result<bool, mongodb::error::Error> {
        self.db.list_collection_names().await?;
        Ok(true)
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}

/// Extracts the database name from the URI path, e.g. `/bloggersite?retryWrites=true`
fn database_name(uri: &str) -> String {
    let without_scheme = uri.split_once("://").map(|(_, rest)| rest).unwrap_or(uri);

    without_scheme
        .split_once('/')
        .map(|(_, path)| path.split('?').next().unwrap_or(""))
        .filter(|name| !name.is_empty())
        .unwrap_or("bloggersite")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_name_from_uri() {
        assert_eq!(database_name("mongodb://localhost:27017/bloggersite"), "bloggersite");
        assert_eq!(database_name("mongodb://localhost:27017/blogs?retryWrites=true"), "blogs");
        assert_eq!(database_name("mongodb://localhost:27017"), "bloggersite");
        assert_eq!(database_name("mongodb://localhost:27017/"), "bloggersite");
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();

        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/bloggersite_test".to_string());
        let db = MongoDB::new(&uri).await;
        assert!(db.is_ok());
        assert!(db.unwrap().health_check().await.unwrap());
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn duplicate_emails_abort_startup() {
        use mongodb::bson::{doc, Document};

        let uri = "mongodb://localhost:27017/bloggersite_dup_emails";
        let client = Client::with_uri_str(uri).await.unwrap();
        let db = client.database(&database_name(uri));
        db.drop().await.unwrap();

        let users = db.collection::<Document>(USERS);
        users.insert_one(doc! { "email": "a@b.c", "password": "x" }).await.unwrap();
        users.insert_one(doc! { "email": "a@b.c", "password": "y" }).await.unwrap();

        assert!(MongoDB::new(uri).await.is_err());
        db.drop().await.unwrap();
    }
}
