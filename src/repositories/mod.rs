//! Persistence seams. Handlers only see these traits; `mongo` backs them in
//! production and `memory` in the test suite.

pub mod mongo;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};

use crate::models::{Blog, SessionRecord, User};
use crate::utils::AppError;

pub use mongo::{MongoBlogRepository, MongoSessionStore, MongoUserRepository};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user. A taken email yields `AppError::Conflict`.
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn create(&self, owner: ObjectId, title: &str, content: &str) -> Result<Blog, AppError>;

    async fn list_by_owner(&self, owner: &ObjectId) -> Result<Vec<Blog>, AppError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Blog>, AppError>;

    /// Returns false when no post has this id
    async fn update(&self, id: &ObjectId, title: &str, content: &str) -> Result<bool, AppError>;

    /// Returns false when no post has this id
    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Expired records are reported as absent
    async fn load(&self, id: &str) -> Result<Option<SessionRecord>, AppError>;

    async fn save(&self, record: &SessionRecord) -> Result<(), AppError>;

    async fn touch(&self, id: &str, expires: BsonDateTime) -> Result<(), AppError>;

    async fn destroy(&self, id: &str) -> Result<(), AppError>;
}
