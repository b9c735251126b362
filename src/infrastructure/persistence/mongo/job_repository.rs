use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::bson::{Bson, DateTime as BsonDateTime, Document, doc};
use mongodb::{Collection, Database};

use super::documents::JobDocument;
use crate::domain::auth::value_objects::UserId;
use crate::domain::errors::RepositoryError;
use crate::domain::job::{Job, JobChanges, JobId, JobRepository};

/// MongoDB implementation of the JobRepository trait
pub struct MongoJobRepository {
  jobs: Collection<JobDocument>,
}

impl MongoJobRepository {
  pub fn new(database: &Database, collection: &str) -> Self {
    Self {
      jobs: database.collection(collection),
    }
  }
}

fn owner_filter(owner: UserId, id: &JobId) -> Document {
  doc! { "_id": id.as_str(), "userId": owner.to_string() }
}

/// Wraps caller text so a leading `$` is never read as a field path
fn literal(value: &str) -> Bson {
  Bson::Document(doc! { "$literal": value })
}

/// Translates a change set into an update pipeline.
///
/// `statusUpdatedAt` moves only when the incoming status differs from the
/// stored one; cleared optional fields go to a trailing `$unset` stage.
fn update_pipeline(changes: &JobChanges, now: DateTime<Utc>) -> Vec<Document> {
  let now = BsonDateTime::from_chrono(now);
  let mut set = Document::new();
  let mut unset: Vec<&str> = Vec::new();

  if let Some(company) = &changes.company {
    set.insert("company", literal(company));
  }
  if let Some(role) = &changes.role {
    set.insert("role", literal(role));
  }
  if let Some(location) = &changes.location {
    set.insert("location", literal(location));
  }
  if let Some(status) = changes.status {
    set.insert("status", literal(status.as_str()));
    set.insert(
      "statusUpdatedAt",
      doc! {
        "$cond": [
          { "$ne": ["$status", literal(status.as_str())] },
          now,
          "$statusUpdatedAt"
        ]
      },
    );
  }

  for (field, value) in [
    ("link", &changes.link),
    ("notes", &changes.notes),
    ("source", &changes.source),
  ] {
    match value {
      Some(Some(text)) => {
        set.insert(field, literal(text));
      }
      Some(None) => unset.push(field),
      None => {}
    }
  }

  set.insert("updatedAt", now);

  let mut pipeline = vec![doc! { "$set": set }];
  if !unset.is_empty() {
    pipeline.push(doc! { "$unset": unset });
  }
  pipeline
}

#[async_trait]
impl JobRepository for MongoJobRepository {
  async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Job>, RepositoryError> {
    let cursor = self
      .jobs
      .find(doc! { "userId": owner.to_string() })
      .sort(doc! { "updatedAt": -1 })
      .await?;

    let documents: Vec<JobDocument> = cursor.try_collect().await?;

    documents.into_iter().map(Job::try_from).collect()
  }

  async fn insert(&self, job: Job) -> Result<Job, RepositoryError> {
    self.jobs.insert_one(JobDocument::from(&job)).await?;
    Ok(job)
  }

  async fn update_for_owner(
    &self,
    owner: UserId,
    id: &JobId,
    changes: &JobChanges,
    now: DateTime<Utc>,
  ) -> Result<bool, RepositoryError> {
    let result = self
      .jobs
      .update_one(owner_filter(owner, id), update_pipeline(changes, now))
      .await?;

    Ok(result.matched_count > 0)
  }

  async fn delete_for_owner(&self, owner: UserId, id: &JobId) -> Result<bool, RepositoryError> {
    let result = self.jobs.delete_one(owner_filter(owner, id)).await?;
    Ok(result.deleted_count > 0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_pipeline_wraps_text_and_conditions_status_timestamp() {
    let changes = JobChanges::new(
      Some("$company"),
      None,
      None,
      Some("offer"),
      Some(""),
      None,
      None,
    )
    .unwrap();

    let pipeline = update_pipeline(&changes, Utc::now());
    assert_eq!(pipeline.len(), 2);

    let set = pipeline[0].get_document("$set").unwrap();
    assert_eq!(
      set.get_document("company").unwrap(),
      &doc! { "$literal": "$company" }
    );
    assert!(set.get_document("statusUpdatedAt").unwrap().contains_key("$cond"));
    assert!(set.contains_key("updatedAt"));
    assert!(!set.contains_key("role"));

    let unset = pipeline[1].get_array("$unset").unwrap();
    assert_eq!(unset, &vec![Bson::String("link".to_string())]);
  }

  #[test]
  fn test_empty_changes_only_touch_updated_at() {
    let pipeline = update_pipeline(&JobChanges::default(), Utc::now());
    assert_eq!(pipeline.len(), 1);

    let set = pipeline[0].get_document("$set").unwrap();
    assert_eq!(set.keys().collect::<Vec<_>>(), vec!["updatedAt"]);
  }
}
