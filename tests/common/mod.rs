//! In-memory stores and request helpers for router tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;
use users_posts_api::{api_routes, AppState, Entity, Post, SharedStore, Store, StoreError, User, LIST_LIMIT};

/// Map-backed store that mimics the PostgreSQL clients and counts every call.
pub struct MemoryStore<E> {
    rows: Mutex<BTreeMap<i64, E>>,
    next_id: AtomicI64,
    calls: AtomicUsize,
    gets: AtomicUsize,
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Arc<Self> {
        Arc::new(MemoryStore {
            rows: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            calls: AtomicUsize::new(0),
            gets: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl<E: Entity> Store<E> for MemoryStore<E> {
    async fn list(&self) -> Result<Vec<E>, StoreError> {
        self.touch();
        let rows = self.rows.lock().unwrap();
        Ok(rows.values().take(LIST_LIMIT as usize).cloned().collect())
    }

    async fn create(&self, entity: &E) -> Result<E, StoreError> {
        self.touch();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut stored = entity.clone();
        stored.set_id(id);
        stored.set_created_at(Some(Utc::now()));
        stored.set_updated_at(None);
        self.rows.lock().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: i64) -> Result<E, StoreError> {
        self.touch();
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.rows
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { entity: E::NAME, id })
    }

    async fn update(&self, entity: &E) -> Result<E, StoreError> {
        self.touch();
        let id = entity.id();
        let mut rows = self.rows.lock().unwrap();
        let existing = rows.get_mut(&id).ok_or(StoreError::NotFound { entity: E::NAME, id })?;
        let mut updated = entity.clone();
        updated.set_created_at(existing.created_at());
        updated.set_updated_at(Some(Utc::now()));
        *existing = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.touch();
        match self.rows.lock().unwrap().remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound { entity: E::NAME, id }),
        }
    }
}

/// Store whose every operation panics.
pub struct PanickingStore;

#[async_trait]
impl Store<User> for PanickingStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        panic!("list exploded")
    }

    async fn create(&self, _: &User) -> Result<User, StoreError> {
        panic!("create exploded")
    }

    async fn get(&self, _: i64) -> Result<User, StoreError> {
        panic!("get exploded")
    }

    async fn update(&self, _: &User) -> Result<User, StoreError> {
        panic!("update exploded")
    }

    async fn delete(&self, _: i64) -> Result<(), StoreError> {
        panic!("delete exploded")
    }
}

/// Store that never answers within the request timeout.
pub struct StalledStore;

#[async_trait]
impl Store<User> for StalledStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Vec::new())
    }

    async fn create(&self, user: &User) -> Result<User, StoreError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(user.clone())
    }

    async fn get(&self, id: i64) -> Result<User, StoreError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(StoreError::NotFound { entity: User::NAME, id })
    }

    async fn update(&self, user: &User) -> Result<User, StoreError> {
        Ok(user.clone())
    }

    async fn delete(&self, _: i64) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Store whose every call fails the way a dropped connection would.
pub struct FailingStore;

pub const FAILURE_DETAIL: &str = "connection reset by peer at 10.0.0.7:5432";

fn db_failure() -> StoreError {
    StoreError::Database(sqlx::Error::Protocol(FAILURE_DETAIL.to_string()))
}

#[async_trait]
impl Store<User> for FailingStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Err(db_failure())
    }

    async fn create(&self, _: &User) -> Result<User, StoreError> {
        Err(db_failure())
    }

    async fn get(&self, _: i64) -> Result<User, StoreError> {
        Err(db_failure())
    }

    async fn update(&self, _: &User) -> Result<User, StoreError> {
        Err(db_failure())
    }

    async fn delete(&self, _: i64) -> Result<(), StoreError> {
        Err(db_failure())
    }
}

pub struct TestApp {
    pub router: Router,
    pub users: Arc<MemoryStore<User>>,
    pub posts: Arc<MemoryStore<Post>>,
}

impl TestApp {
    pub fn new() -> Self {
        let users = MemoryStore::<User>::new();
        let posts = MemoryStore::<Post>::new();
        let state = AppState::new(users.clone(), posts.clone());
        TestApp {
            router: api_routes(state),
            users,
            posts,
        }
    }

    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        send(&self.router, method, uri, body).await
    }
}

pub fn app_with_users(users: SharedStore<User>) -> Router {
    api_routes(AppState::new(users, MemoryStore::<Post>::new()))
}

pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(router, request).await
}

pub async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
