//! In-memory stores for handler tests

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use std::collections::HashMap;
use std::sync::Mutex;

use super::{BlogRepository, SessionStore, UserRepository};
use crate::models::{Blog, SessionRecord, User};
use crate::utils::AppError;

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn all(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(AppError::Conflict(format!("email {} already registered", email)));
        }
        let mut user = User::new(email, password_hash);
        user.id = Some(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id.as_ref() == Some(id)).cloned())
    }
}

#[derive(Default)]
pub struct MemoryBlogRepository {
    blogs: Mutex<Vec<Blog>>,
}

impl MemoryBlogRepository {
    pub fn all(&self) -> Vec<Blog> {
        self.blogs.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlogRepository for MemoryBlogRepository {
    async fn create(&self, owner: ObjectId, title: &str, content: &str) -> Result<Blog, AppError> {
        let mut blog = Blog::new(owner, title, content);
        blog.id = Some(ObjectId::new());
        self.blogs.lock().unwrap().push(blog.clone());
        Ok(blog)
    }

    async fn list_by_owner(&self, owner: &ObjectId) -> Result<Vec<Blog>, AppError> {
        Ok(self.blogs.lock().unwrap().iter().filter(|b| &b.user == owner).cloned().collect())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Blog>, AppError> {
        Ok(self.blogs.lock().unwrap().iter().find(|b| b.id.as_ref() == Some(id)).cloned())
    }

    async fn update(&self, id: &ObjectId, title: &str, content: &str) -> Result<bool, AppError> {
        let mut blogs = self.blogs.lock().unwrap();
        match blogs.iter_mut().find(|b| b.id.as_ref() == Some(id)) {
            Some(blog) => {
                blog.title = title.to_string();
                blog.content = content.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let mut blogs = self.blogs.lock().unwrap();
        let before = blogs.len();
        blogs.retain(|b| b.id.as_ref() != Some(id));
        Ok(blogs.len() != before)
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, SessionRecord>>,
}

impl MemorySessionStore {
    pub fn get(&self, id: &str) -> Option<SessionRecord> {
        self.sessions.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn insert(&self, record: SessionRecord) {
        self.sessions.lock().unwrap().insert(record.id.clone(), record);
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: &str) -> Result<Option<SessionRecord>, AppError> {
        let now = BsonDateTime::now();
        Ok(self.get(id).filter(|r| !r.is_expired(now)))
    }

    async fn save(&self, record: &SessionRecord) -> Result<(), AppError> {
        self.insert(record.clone());
        Ok(())
    }

    async fn touch(&self, id: &str, expires: BsonDateTime) -> Result<(), AppError> {
        if let Some(record) = self.sessions.lock().unwrap().get_mut(id) {
            record.expires = expires;
            record.last_modified = BsonDateTime::now();
        }
        Ok(())
    }

    async fn destroy(&self, id: &str) -> Result<(), AppError> {
        self.sessions.lock().unwrap().remove(id);
        Ok(())
    }
}
