//! # Client-side kernel
//!
//! State a UI drives, independent of any rendering toolkit:
//!
//! - [`ListView`] - sort and page an already fetched result set
//! - [`ListSession`] - fetches into a `ListView` and drops stale responses
//! - [`MutationController`] - create/update/delete modals with a single-flight guard
//! - [`Debouncer`] and [`UserSearch`] - cancel-and-restart search input
//!
//! Everything talks to the server through [`ResourceApi`]. [`Session`] implements it
//! in-process by binding a service client to the signed-in [`Caller`]; the caller is
//! passed in at construction instead of being looked up from shared state.
//!
//! A mutation never patches cached rows. It succeeds, then the list is fetched again,
//! so what is displayed always reflects a round trip to the service.

pub mod debounce;
pub mod list_session;
pub mod list_view;
pub mod mutation;
pub mod user_filter;

pub use debounce::*;
pub use list_session::*;
pub use list_view::*;
pub use mutation::*;
pub use user_filter::*;

use std::fmt;

use async_trait::async_trait;
use resource_actor::Fields;

use crate::auth::Caller;
use crate::clients::{ContentClient, CourseClient, UserClient};
use crate::error::ServiceError;
use crate::model::{
    Content, ContentCreate, ContentId, ContentUpdate, Course, CourseCreate, CourseId,
    CourseUpdate, User, UserCreate, UserId, UserUpdate,
};
use crate::query::{ContentQuery, CourseQuery, UserQuery};

/// A resource endpoint as a client sees it.
#[async_trait]
pub trait ResourceApi: Send + Sync + 'static {
    type Row: Fields + Clone + Send + Sync + 'static;
    type Id: Clone + PartialEq + fmt::Debug + Send + Sync + 'static;
    type Query: Clone + Default + Send + Sync + 'static;
    type Create: Send + 'static;
    type Update: Send + 'static;

    async fn list(&self, query: Self::Query) -> Result<Vec<Self::Row>, ServiceError>;
    async fn create(&self, params: Self::Create) -> Result<Self::Row, ServiceError>;
    async fn update(&self, id: Self::Id, params: Self::Update) -> Result<Self::Row, ServiceError>;
    async fn delete(&self, id: Self::Id) -> Result<Self::Id, ServiceError>;
}

/// A service client bound to the signed-in caller.
#[derive(Clone)]
pub struct Session<C> {
    client: C,
    caller: Caller,
}

impl<C> Session<C> {
    pub fn new(client: C, caller: Caller) -> Self {
        Self { client, caller }
    }

    pub fn caller(&self) -> &Caller {
        &self.caller
    }
}

#[async_trait]
impl ResourceApi for Session<CourseClient> {
    type Row = Course;
    type Id = CourseId;
    type Query = CourseQuery;
    type Create = CourseCreate;
    type Update = CourseUpdate;

    async fn list(&self, query: CourseQuery) -> Result<Vec<Course>, ServiceError> {
        self.client.find_all(&self.caller, &query).await
    }

    async fn create(&self, params: CourseCreate) -> Result<Course, ServiceError> {
        self.client.create(&self.caller, params).await
    }

    async fn update(&self, id: CourseId, params: CourseUpdate) -> Result<Course, ServiceError> {
        self.client.update(&self.caller, id, params).await
    }

    async fn delete(&self, id: CourseId) -> Result<CourseId, ServiceError> {
        self.client.delete_by_id(&self.caller, id).await
    }
}

/// The users table never shows the signed-in user's own row.
#[async_trait]
impl ResourceApi for Session<UserClient> {
    type Row = User;
    type Id = UserId;
    type Query = UserQuery;
    type Create = UserCreate;
    type Update = UserUpdate;

    async fn list(&self, query: UserQuery) -> Result<Vec<User>, ServiceError> {
        let users = self.client.find_all(&self.caller, &query).await?;
        Ok(hide_own_row(users, self.caller.id))
    }

    async fn create(&self, params: UserCreate) -> Result<User, ServiceError> {
        self.client.create(&self.caller, params).await
    }

    async fn update(&self, id: UserId, params: UserUpdate) -> Result<User, ServiceError> {
        self.client.update(&self.caller, id, params).await
    }

    async fn delete(&self, id: UserId) -> Result<UserId, ServiceError> {
        self.client.delete_by_id(&self.caller, id).await
    }
}

/// The contents of one course, as seen by one caller.
#[derive(Clone)]
pub struct CourseContents {
    session: Session<ContentClient>,
    course_id: CourseId,
}

impl CourseContents {
    pub fn new(client: ContentClient, caller: Caller, course_id: CourseId) -> Self {
        Self {
            session: Session::new(client, caller),
            course_id,
        }
    }
}

#[async_trait]
impl ResourceApi for CourseContents {
    type Row = Content;
    type Id = ContentId;
    type Query = ContentQuery;
    type Create = ContentCreate;
    type Update = ContentUpdate;

    async fn list(&self, query: ContentQuery) -> Result<Vec<Content>, ServiceError> {
        let Session { client, caller } = &self.session;
        client.find_all(caller, self.course_id, &query).await
    }

    async fn create(&self, params: ContentCreate) -> Result<Content, ServiceError> {
        let Session { client, caller } = &self.session;
        client.create(caller, self.course_id, params).await
    }

    async fn update(&self, id: ContentId, params: ContentUpdate) -> Result<Content, ServiceError> {
        let Session { client, caller } = &self.session;
        client.update(caller, self.course_id, id, params).await
    }

    async fn delete(&self, id: ContentId) -> Result<ContentId, ServiceError> {
        let Session { client, caller } = &self.session;
        client.delete_by_id(caller, self.course_id, id).await
    }
}
