use ::redis::AsyncCommands;
use ::redis::Script;
use ::redis::aio::ConnectionManager;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashMap;

use super::keys::KeySpace;
use crate::domain::auth::value_objects::UserId;
use crate::domain::errors::RepositoryError;
use crate::domain::job::{Job, JobChanges, JobId, JobRepository, JobStatus};

/// Owner-scoped sparse update.
///
/// KEYS: job hash, owner index.
/// ARGV: updatedAt, score, job id, status ('' when unchanged), n, then n
/// field/value pairs to set, then fields to delete.
const UPDATE_JOB_SCRIPT: &str = r#"
if redis.call('EXISTS', KEYS[1]) == 0 then
  return 0
end
local status = ARGV[4]
if status ~= '' and redis.call('HGET', KEYS[1], 'status') ~= status then
  redis.call('HSET', KEYS[1], 'status', status, 'statusUpdatedAt', ARGV[1])
end
local n = tonumber(ARGV[5])
local idx = 6
for _ = 1, n do
  redis.call('HSET', KEYS[1], ARGV[idx], ARGV[idx + 1])
  idx = idx + 2
end
for i = idx, #ARGV do
  redis.call('HDEL', KEYS[1], ARGV[i])
end
redis.call('HSET', KEYS[1], 'updatedAt', ARGV[1])
redis.call('ZADD', KEYS[2], ARGV[2], ARGV[3])
return 1
"#;

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
  timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RepositoryError> {
  Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

fn job_fields(job: &Job) -> Vec<(&'static str, String)> {
  let mut fields = vec![
    ("id", job.id.to_string()),
    ("userId", job.user_id.to_string()),
    ("company", job.company.clone()),
    ("role", job.role.clone()),
    ("location", job.location.clone()),
    ("status", job.status.as_str().to_string()),
    ("statusUpdatedAt", format_timestamp(job.status_updated_at)),
    ("createdAt", format_timestamp(job.created_at)),
    ("updatedAt", format_timestamp(job.updated_at)),
  ];

  for (name, value) in [("link", &job.link), ("notes", &job.notes), ("source", &job.source)] {
    if let Some(value) = value {
      fields.push((name, value.clone()));
    }
  }

  fields
}

fn job_from_fields(mut fields: HashMap<String, String>) -> Result<Job, RepositoryError> {
  let mut take = |name: &str| {
    fields
      .remove(name)
      .ok_or_else(|| RepositoryError::Serialization(format!("job hash is missing {}", name)))
  };

  let id = JobId::new(take("id")?);
  let owner = take("userId")?;
  let user_id = UserId::parse(&owner)
    .map_err(|e| RepositoryError::Serialization(format!("job owner {}: {}", owner, e)))?;
  let company = take("company")?;
  let role = take("role")?;
  let location = take("location").unwrap_or_default();
  let status_raw = take("status")?;
  let status = JobStatus::parse(&status_raw)
    .ok_or_else(|| RepositoryError::Serialization(format!("unknown job status {}", status_raw)))?;
  let status_updated_at = parse_timestamp(&take("statusUpdatedAt")?)?;
  let created_at = parse_timestamp(&take("createdAt")?)?;
  let updated_at = parse_timestamp(&take("updatedAt")?)?;

  Ok(Job {
    id,
    user_id,
    company,
    role,
    location,
    status,
    status_updated_at,
    link: fields.remove("link"),
    notes: fields.remove("notes"),
    source: fields.remove("source"),
    created_at,
    updated_at,
  })
}

/// Flattens a change set into the update script's argument list
fn update_args(id: &JobId, changes: &JobChanges, now: DateTime<Utc>) -> Vec<String> {
  let mut set: Vec<(&str, String)> = Vec::new();
  let mut clear: Vec<&str> = Vec::new();

  for (name, value) in [
    ("company", &changes.company),
    ("role", &changes.role),
    ("location", &changes.location),
  ] {
    if let Some(value) = value {
      set.push((name, value.clone()));
    }
  }

  for (name, value) in [
    ("link", &changes.link),
    ("notes", &changes.notes),
    ("source", &changes.source),
  ] {
    match value {
      Some(Some(value)) => set.push((name, value.clone())),
      Some(None) => clear.push(name),
      None => {}
    }
  }

  let mut args = vec![
    format_timestamp(now),
    now.timestamp_millis().to_string(),
    id.to_string(),
    changes
      .status
      .map(|status| status.as_str().to_string())
      .unwrap_or_default(),
    set.len().to_string(),
  ];
  for (name, value) in set {
    args.push(name.to_string());
    args.push(value);
  }
  args.extend(clear.into_iter().map(str::to_string));

  args
}

/// Redis implementation of the JobRepository trait
///
/// The owner id is part of every job key, so a foreign id never resolves.
pub struct RedisJobRepository {
  connection: ConnectionManager,
  keys: KeySpace,
  update_script: Script,
}

impl RedisJobRepository {
  pub fn new(connection: ConnectionManager, keys: KeySpace) -> Self {
    Self {
      connection,
      keys,
      update_script: Script::new(UPDATE_JOB_SCRIPT),
    }
  }
}

#[async_trait]
impl JobRepository for RedisJobRepository {
  async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Job>, RepositoryError> {
    let mut conn = self.connection.clone();
    let ids: Vec<String> = conn.zrevrange(self.keys.job_index(owner), 0, -1).await?;

    if ids.is_empty() {
      return Ok(Vec::new());
    }

    let mut pipe = ::redis::pipe();
    for id in &ids {
      pipe.hgetall(self.keys.job(owner, &JobId::new(id.as_str())));
    }
    let hashes: Vec<HashMap<String, String>> = pipe.query_async(&mut conn).await?;

    hashes
      .into_iter()
      // index entries can outlive a hash only if a delete was interrupted
      .filter(|fields| !fields.is_empty())
      .map(job_from_fields)
      .collect()
  }

  async fn insert(&self, job: Job) -> Result<Job, RepositoryError> {
    let mut conn = self.connection.clone();

    let _: () = ::redis::pipe()
      .atomic()
      .hset_multiple(self.keys.job(job.user_id, &job.id), &job_fields(&job))
      .ignore()
      .zadd(
        self.keys.job_index(job.user_id),
        job.id.as_str(),
        job.updated_at.timestamp_millis(),
      )
      .ignore()
      .query_async(&mut conn)
      .await?;

    Ok(job)
  }

  async fn update_for_owner(
    &self,
    owner: UserId,
    id: &JobId,
    changes: &JobChanges,
    now: DateTime<Utc>,
  ) -> Result<bool, RepositoryError> {
    let mut conn = self.connection.clone();

    let mut invocation = self.update_script.prepare_invoke();
    invocation
      .key(self.keys.job(owner, id))
      .key(self.keys.job_index(owner));
    for arg in update_args(id, changes, now) {
      invocation.arg(arg);
    }

    let matched: i64 = invocation.invoke_async(&mut conn).await?;
    Ok(matched == 1)
  }

  async fn delete_for_owner(&self, owner: UserId, id: &JobId) -> Result<bool, RepositoryError> {
    let mut conn = self.connection.clone();

    let (deleted, _): (i64, i64) = ::redis::pipe()
      .atomic()
      .del(self.keys.job(owner, id))
      .zrem(self.keys.job_index(owner), id.as_str())
      .query_async(&mut conn)
      .await?;

    Ok(deleted > 0)
  }
}
