//! Typed repositories over the document store.
//!
//! Collection and field names follow the website's document schema
//! (camelCase, Prisma-style collection ids); this service is one of several
//! writers/readers of the shared database.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use pitwall_models::{BlogPost, TrackTime, User, VideoId};

use crate::client::FirestoreClient;
use crate::error::{FirestoreError, FirestoreResult};
use crate::types::{
    CollectionSelector, Document, Filter, FromFirestoreValue, StructuredQuery, ToFirestoreValue,
    Value,
};

const TRACK_TIME_COLLECTION: &str = "TrackTime";
const USER_COLLECTION: &str = "User";
const BLOG_POST_COLLECTION: &str = "BlogPost";

/// Page size used when walking a whole collection.
const LIST_PAGE_SIZE: u32 = 100;

// =============================================================================
// TrackTime
// =============================================================================

/// Repository for lap-time records.
pub struct TrackTimeRepository {
    client: Arc<FirestoreClient>,
}

impl TrackTimeRepository {
    pub fn new(client: Arc<FirestoreClient>) -> Self {
        Self { client }
    }

    /// Upsert a record keyed by its source video.
    ///
    /// The document id is the platform video id, so the proof URL (derived
    /// from the same id) keys exactly one document; re-ingestion overwrites
    /// every field.
    pub async fn upsert(&self, video_id: &VideoId, record: &TrackTime) -> FirestoreResult<()> {
        self.client
            .upsert_document(
                TRACK_TIME_COLLECTION,
                video_id.as_str(),
                track_time_to_fields(record),
            )
            .await?;
        info!(
            track = %record.track,
            proof = %record.proof,
            "Upserted lap time record"
        );
        Ok(())
    }

    /// Fetch a record by its source video id.
    pub async fn get(&self, video_id: &VideoId) -> FirestoreResult<Option<TrackTime>> {
        let doc = self
            .client
            .get_document(TRACK_TIME_COLLECTION, video_id.as_str())
            .await?;
        doc.map(|d| document_to_track_time(&d)).transpose()
    }
}

// =============================================================================
// User
// =============================================================================

/// Read-only repository for user records.
pub struct UserRepository {
    client: Arc<FirestoreClient>,
}

impl UserRepository {
    pub fn new(client: Arc<FirestoreClient>) -> Self {
        Self { client }
    }

    /// Fetch a user by document id.
    pub async fn get(&self, user_id: &str) -> FirestoreResult<Option<User>> {
        let doc = self.client.get_document(USER_COLLECTION, user_id).await?;
        doc.map(|d| document_to_user(&d)).transpose()
    }

    /// Find a user by exact email match.
    ///
    /// Emails are stored lowercased by the website; the query value is
    /// lowercased here too, which together implement case-insensitive
    /// matching on a store that only knows exact equality.
    pub async fn find_by_email(&self, email: &str) -> FirestoreResult<Option<User>> {
        let query = StructuredQuery {
            from: vec![CollectionSelector {
                collection_id: USER_COLLECTION.to_string(),
            }],
            filter: Some(Filter::field_equals(
                "email",
                Value::StringValue(email.to_lowercase()),
            )),
            limit: Some(1),
        };

        let docs = self.client.run_query(query).await?;
        docs.first().map(document_to_user).transpose()
    }
}

// =============================================================================
// BlogPost
// =============================================================================

/// Read-only repository for blog posts.
pub struct BlogPostRepository {
    client: Arc<FirestoreClient>,
}

impl BlogPostRepository {
    pub fn new(client: Arc<FirestoreClient>) -> Self {
        Self { client }
    }

    /// Fetch a post by its slug (document id).
    pub async fn get(&self, post_id: &str) -> FirestoreResult<Option<BlogPost>> {
        let doc = self
            .client
            .get_document(BLOG_POST_COLLECTION, post_id)
            .await?;
        doc.map(|d| document_to_blog_post(&d)).transpose()
    }

    /// Fetch every post, walking the collection page by page.
    pub async fn list_all(&self) -> FirestoreResult<Vec<BlogPost>> {
        let mut posts = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self
                .client
                .list_documents(
                    BLOG_POST_COLLECTION,
                    Some(LIST_PAGE_SIZE),
                    page_token.as_deref(),
                )
                .await?;

            for doc in page.documents.unwrap_or_default() {
                posts.push(document_to_blog_post(&doc)?);
            }

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(posts)
    }
}

// =============================================================================
// Field Conversion
// =============================================================================

fn track_time_to_fields(record: &TrackTime) -> HashMap<String, Value> {
    let mut fields = HashMap::new();
    fields.insert("track".to_string(), record.track.to_firestore_value());
    fields.insert(
        "configuration".to_string(),
        record.configuration.to_firestore_value(),
    );
    fields.insert("date".to_string(), record.date.to_firestore_value());
    fields.insert("car".to_string(), record.car.to_firestore_value());
    fields.insert("tag".to_string(), record.tag.to_firestore_value());
    fields.insert("time".to_string(), record.time.to_firestore_value());
    fields.insert("proof".to_string(), record.proof.to_firestore_value());
    fields.insert("userId".to_string(), record.user_id.to_firestore_value());
    fields
}

fn document_to_track_time(doc: &Document) -> FirestoreResult<TrackTime> {
    Ok(TrackTime {
        track: required_field(doc, "track")?,
        configuration: optional_string(doc, "configuration"),
        date: doc
            .field("date")
            .and_then(NaiveDate::from_firestore_value)
            .ok_or_else(|| field_error(doc, "date"))?,
        car: required_field(doc, "car")?,
        tag: optional_string(doc, "tag"),
        time: doc
            .field("time")
            .and_then(f64::from_firestore_value)
            .ok_or_else(|| field_error(doc, "time"))?,
        proof: required_field(doc, "proof")?,
        user_id: required_field(doc, "userId")?,
    })
}

fn document_to_user(doc: &Document) -> FirestoreResult<User> {
    let id = doc
        .id()
        .ok_or_else(|| FirestoreError::invalid_document("user document without a name"))?;
    Ok(User::new(id, required_field(doc, "email")?))
}

fn document_to_blog_post(doc: &Document) -> FirestoreResult<BlogPost> {
    let id = doc
        .id()
        .ok_or_else(|| FirestoreError::invalid_document("blog post document without a name"))?;
    Ok(BlogPost {
        id: id.to_string(),
        title: required_field(doc, "title")?,
        created_at: doc
            .field("createdAt")
            .and_then(DateTime::<Utc>::from_firestore_value)
            .ok_or_else(|| field_error(doc, "createdAt"))?,
        author_id: required_field(doc, "authorId")?,
        content: required_field(doc, "content")?,
        image_ref: required_field(doc, "imageRef")?,
    })
}

fn required_field(doc: &Document, name: &str) -> FirestoreResult<String> {
    doc.field(name)
        .and_then(String::from_firestore_value)
        .ok_or_else(|| field_error(doc, name))
}

fn optional_string(doc: &Document, name: &str) -> Option<String> {
    doc.field(name)
        .and_then(String::from_firestore_value)
        .filter(|s| !s.is_empty())
}

fn field_error(doc: &Document, name: &str) -> FirestoreError {
    FirestoreError::invalid_document(format!(
        "{} missing or mistyped field '{}'",
        doc.name.as_deref().unwrap_or("<unnamed>"),
        name
    ))
}
