use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Blog post (stored in `blogs`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub title: String,

    pub content: String,

    /// Owner. Field is named `user` in the collection.
    pub user: ObjectId,

    pub created_at: Option<BsonDateTime>,
}

impl Blog {
    pub fn new(owner: ObjectId, title: &str, content: &str) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            content: content.to_string(),
            user: owner,
            created_at: Some(BsonDateTime::now()),
        }
    }

    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user.to_hex() == user_id
    }
}

/// Create/edit form (`blog[title]`, `blog[content]`)
#[derive(Debug, Deserialize, Default)]
pub struct BlogForm {
    #[serde(rename = "blog[title]", default)]
    pub title: Option<String>,
    #[serde(rename = "blog[content]", default)]
    pub content: Option<String>,
}

impl BlogForm {
    /// Title and content, both required and non-blank
    pub fn fields(&self) -> Option<(&str, &str)> {
        let title = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
        let content = self.content.as_deref().filter(|c| !c.trim().is_empty())?;
        Some((title, content))
    }
}
