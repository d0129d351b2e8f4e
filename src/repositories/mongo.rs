use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};
use mongodb::options::ReplaceOptions;
use mongodb::Collection;

use super::{BlogRepository, SessionStore, UserRepository};
use crate::database::{MongoDB, BLOGS, SESSIONS, USERS};
use crate::models::{Blog, SessionRecord, User};
use crate::utils::{is_duplicate_key, AppError};

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &MongoDB) -> Self {
        Self { collection: db.collection::<User>(USERS) }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        let mut user = User::new(email, password_hash);

        let result = self.collection.insert_one(&user).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::Conflict(format!("email {} already registered", email))
            } else {
                AppError::from(e)
            }
        })?;

        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.collection.find_one(doc! { "_id": *id }).await?)
    }
}

pub struct MongoBlogRepository {
    collection: Collection<Blog>,
}

impl MongoBlogRepository {
    pub fn new(db: &MongoDB) -> Self {
        Self { collection: db.collection::<Blog>(BLOGS) }
    }
}

#[async_trait]
impl BlogRepository for MongoBlogRepository {
    async fn create(&self, owner: ObjectId, title: &str, content: &str) -> Result<Blog, AppError> {
        let mut blog = Blog::new(owner, title, content);
        let result = self.collection.insert_one(&blog).await?;
        blog.id = result.inserted_id.as_object_id();
        Ok(blog)
    }

    async fn list_by_owner(&self, owner: &ObjectId) -> Result<Vec<Blog>, AppError> {
        let cursor = self.collection.find(doc! { "user": *owner }).await?;
        let blogs: Vec<Blog> = cursor.try_collect().await?;
        Ok(blogs)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Blog>, AppError> {
        Ok(self.collection.find_one(doc! { "_id": *id }).await?)
    }

    async fn update(&self, id: &ObjectId, title: &str, content: &str) -> Result<bool, AppError> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": *id },
                doc! { "$set": { "title": title, "content": content } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection.delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count > 0)
    }
}

pub struct MongoSessionStore {
    collection: Collection<SessionRecord>,
}

impl MongoSessionStore {
    pub fn new(db: &MongoDB) -> Self {
        Self { collection: db.collection::<SessionRecord>(SESSIONS) }
    }
}

#[async_trait]
impl SessionStore for MongoSessionStore {
    async fn load(&self, id: &str) -> Result<Option<SessionRecord>, AppError> {
        let record = self.collection.find_one(doc! { "_id": id }).await?;
        // The TTL monitor only runs about once a minute
        Ok(record.filter(|r| !r.is_expired(BsonDateTime::now())))
    }

    async fn save(&self, record: &SessionRecord) -> Result<(), AppError> {
        self.collection
            .replace_one(doc! { "_id": &record.id }, record)
            .with_options(ReplaceOptions::builder().upsert(true).build())
            .await?;
        Ok(())
    }

    async fn touch(&self, id: &str, expires: BsonDateTime) -> Result<(), AppError> {
        self.collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "expires": expires, "last_modified": BsonDateTime::now() } },
            )
            .await?;
        Ok(())
    }

    async fn destroy(&self, id: &str) -> Result<(), AppError> {
        self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> MongoDB {
        dotenv::dotenv().ok();
        let uri = std::env::var("TEST_DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/bloggersite_test".to_string());
        MongoDB::new(&uri).await.expect("MongoDB must be running")
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn duplicate_email_is_a_conflict() {
        let db = test_db().await;
        let users = MongoUserRepository::new(&db);
        let email = format!("{}@example.com", ObjectId::new().to_hex());

        let created = users.create(&email, "$2b$04$hash").await.unwrap();
        assert!(created.id.is_some());

        let again = users.create(&email, "$2b$04$hash").await;
        assert!(matches!(again, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn blog_crud_round_trip() {
        let db = test_db().await;
        let blogs = MongoBlogRepository::new(&db);
        let owner = ObjectId::new();

        let blog = blogs.create(owner, "Title", "Body").await.unwrap();
        let id = blog.id.unwrap();

        assert_eq!(blogs.list_by_owner(&owner).await.unwrap().len(), 1);
        assert!(blogs.update(&id, "New", "Text").await.unwrap());
        assert_eq!(blogs.find_by_id(&id).await.unwrap().unwrap().title, "New");
        assert!(blogs.delete(&id).await.unwrap());
        assert!(!blogs.delete(&id).await.unwrap());
    }
}
