use async_trait::async_trait;
use resource_actor::{
    ActorEntity, Clause, FieldValue, Fields, FrameworkError, ResourceActor, SortKey, StoreFilter,
};
use uuid::Uuid;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Member {
    id: Uuid,
    handle: String,
    bio: String,
}

#[derive(Debug)]
struct MemberCreate {
    handle: String,
}

#[derive(Debug)]
struct MemberUpdate {
    handle: Option<String>,
    bio: Option<String>,
}

#[derive(Debug, thiserror::Error)]
#[error("Member error: {0}")]
struct MemberError(String);

impl Fields for Member {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "handle" => Some(self.handle.as_str().into()),
            "bio" => Some(self.bio.as_str().into()),
            _ => None,
        }
    }
}

#[async_trait]
impl ActorEntity for Member {
    type Id = Uuid;
    type Create = MemberCreate;
    type Update = MemberUpdate;
    type Context = ();
    type Error = MemberError;

    fn from_create_params(id: Uuid, params: MemberCreate, _: &()) -> Result<Self, MemberError> {
        if params.handle.is_empty() {
            return Err(MemberError("handle is required".into()));
        }
        Ok(Self {
            id,
            handle: params.handle,
            bio: String::new(),
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.handle.clone())
    }

    async fn on_update(&mut self, update: MemberUpdate, _: &()) -> Result<(), MemberError> {
        // bio is written before the handle is validated; a rejected update must not keep it
        if let Some(bio) = update.bio {
            self.bio = bio;
        }
        if let Some(handle) = update.handle {
            if handle.is_empty() {
                return Err(MemberError("handle is required".into()));
            }
            self.handle = handle;
        }
        Ok(())
    }
}

fn create(handle: &str) -> MemberCreate {
    MemberCreate {
        handle: handle.to_string(),
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Member>::new(10);
    tokio::spawn(actor.run(()));

    // 1. Create
    let member = client.create(create("alice")).await.unwrap();
    assert_eq!(member.handle, "alice");
    assert!(!member.id.is_nil());

    // 2. Get
    let fetched = client.get(member.id).await.unwrap();
    assert_eq!(fetched, Some(member.clone()));

    // 3. Update
    let updated = client
        .update(
            member.id,
            MemberUpdate {
                handle: None,
                bio: Some("Teaches Rust".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.bio, "Teaches Rust");
    assert_eq!(updated.handle, "alice");

    // 4. Delete
    assert_eq!(client.delete(member.id).await.unwrap(), member.id);
    assert!(client.get(member.id).await.unwrap().is_none());

    // 5. Deleting again is NotFound, not a silent success
    let again = client.delete(member.id).await;
    assert!(matches!(again, Err(FrameworkError::NotFound(id)) if id == member.id.to_string()));
}

#[tokio::test]
async fn test_ids_are_unique() {
    let (actor, client) = ResourceActor::<Member>::new(10);
    tokio::spawn(actor.run(()));

    let a = client.create(create("a")).await.unwrap();
    let b = client.create(create("b")).await.unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(client.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_unique_key_is_enforced_on_create_and_update() {
    let (actor, client) = ResourceActor::<Member>::new(10);
    tokio::spawn(actor.run(()));

    let alice = client.create(create("alice")).await.unwrap();
    let bob = client.create(create("bob")).await.unwrap();

    let duplicate = client.create(create("alice")).await;
    assert!(matches!(duplicate, Err(FrameworkError::Conflict(key)) if key == "alice"));

    // Keys are case-sensitive
    assert!(client.create(create("Alice")).await.is_ok());

    let rename = client
        .update(
            bob.id,
            MemberUpdate {
                handle: Some("alice".into()),
                bio: None,
            },
        )
        .await;
    assert!(matches!(rename, Err(FrameworkError::Conflict(_))));

    // Re-saving a row with its own key is fine
    let same = client
        .update(
            alice.id,
            MemberUpdate {
                handle: Some("alice".into()),
                bio: None,
            },
        )
        .await;
    assert!(same.is_ok());
    assert_eq!(client.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_failed_update_leaves_row_untouched() {
    let (actor, client) = ResourceActor::<Member>::new(10);
    tokio::spawn(actor.run(()));

    let member = client.create(create("carol")).await.unwrap();
    let result = client
        .update(
            member.id,
            MemberUpdate {
                handle: Some(String::new()),
                bio: Some("half written".into()),
            },
        )
        .await;
    assert!(matches!(result, Err(FrameworkError::EntityError(_))));

    let stored = client.get(member.id).await.unwrap().unwrap();
    assert_eq!(stored, member);
}

#[tokio::test]
async fn test_update_and_delete_of_missing_id() {
    let (actor, client) = ResourceActor::<Member>::new(10);
    tokio::spawn(actor.run(()));

    let missing = Uuid::new_v4();
    let update = client
        .update(
            missing,
            MemberUpdate {
                handle: None,
                bio: None,
            },
        )
        .await;
    assert!(matches!(update, Err(FrameworkError::NotFound(_))));
    assert!(matches!(
        client.delete(missing).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_list_filters_sorts_and_limits() {
    let (actor, client) = ResourceActor::<Member>::new(10);
    tokio::spawn(actor.run(()));

    for handle in ["dave", "Davina", "erin", "david"] {
        client.create(create(handle)).await.unwrap();
    }

    // Store order without explicit ordering
    let all = client.list(StoreFilter::new()).await.unwrap();
    let handles: Vec<_> = all.iter().map(|m| m.handle.as_str()).collect();
    assert_eq!(handles, vec!["dave", "Davina", "erin", "david"]);

    let filtered = client
        .list(
            StoreFilter::new()
                .with_clause(Clause::contains("handle", "DAV"))
                .order_by(SortKey::desc("handle"))
                .limit(2),
        )
        .await
        .unwrap();
    let handles: Vec<_> = filtered.iter().map(|m| m.handle.as_str()).collect();
    assert_eq!(handles, vec!["david", "dave"]);

    let unknown = client
        .list(StoreFilter::new().order_by(SortKey::asc("karma")))
        .await;
    assert!(matches!(unknown, Err(FrameworkError::UnknownField(f)) if f == "karma"));
}

#[tokio::test]
async fn test_client_errors_after_shutdown() {
    let (actor, client) = ResourceActor::<Member>::new(10);
    let handle = tokio::spawn(actor.run(()));
    handle.abort();
    let _ = handle.await;

    let result = client.count().await;
    assert!(matches!(result, Err(FrameworkError::ActorClosed)));
}
