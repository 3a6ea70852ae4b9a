use chrono::Utc;
use course_admin::auth::{Caller, Role};
use course_admin::clients::{ContentClient, CourseClient};
use course_admin::error::ServiceError;
use course_admin::model::{ContentCreate, Course, CourseId, UserId};
use resource_actor::mock::MockClient;
use resource_actor::{ActorClient, FrameworkError};
use uuid::Uuid;

fn editor() -> Caller {
    Caller::new(UserId::from(Uuid::new_v4()), Role::Editor)
}

fn course(id: CourseId) -> Course {
    Course {
        id,
        name: "Rust".to_string(),
        description: "Systems programming".to_string(),
        image_url: None,
        date_created: Utc::now(),
    }
}

fn lesson() -> ContentCreate {
    ContentCreate {
        name: "Ownership".to_string(),
        description: "Moves and borrows".to_string(),
    }
}

/// Real Content actor with a mocked Course dependency.
/// Exercises Content::on_create without spawning the Course actor.
#[tokio::test]
async fn content_is_created_under_an_existing_course() {
    let course_id = CourseId::from(Uuid::new_v4());
    let mut course_mock = MockClient::<Course>::new();
    course_mock.expect_get(course_id).return_ok(Some(course(course_id)));

    let course_client = CourseClient::new(course_mock.client());
    let (content_actor, content_client) = course_admin::content_actor::new(8);
    let actor_handle = tokio::spawn(content_actor.run(course_client));

    let content = content_client
        .create(&editor(), course_id, lesson())
        .await
        .expect("content should be created");
    assert_eq!(content.name, "Ownership");
    assert_eq!(content.course_id, course_id);

    let stored = content_client.get(content.id).await.unwrap();
    assert_eq!(stored, Some(content));

    course_mock.verify();

    drop(content_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn content_under_a_missing_course_is_not_found() {
    let course_id = CourseId::from(Uuid::new_v4());
    let mut course_mock = MockClient::<Course>::new();
    course_mock.expect_get(course_id).return_ok(None);

    let (content_actor, content_client) = course_admin::content_actor::new(8);
    let actor_handle = tokio::spawn(content_actor.run(CourseClient::new(course_mock.client())));

    let err = content_client
        .create(&editor(), course_id, lesson())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ServiceError::NotFound(format!("Could not find course with matching id {course_id}"))
    );
    assert_eq!(content_client.count().await.unwrap(), 0);

    course_mock.verify();
    drop(content_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn unreachable_course_actor_is_transient() {
    let course_id = CourseId::from(Uuid::new_v4());
    let mut course_mock = MockClient::<Course>::new();
    course_mock
        .expect_get(course_id)
        .return_err(FrameworkError::ActorClosed);

    let (content_actor, content_client) = course_admin::content_actor::new(8);
    let actor_handle = tokio::spawn(content_actor.run(CourseClient::new(course_mock.client())));

    let err = content_client
        .create(&editor(), course_id, lesson())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Transient(_)), "got {err:?}");
    assert_eq!(err.user_message(), "Ocurrió un error");

    drop(content_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn plain_users_cannot_create_content() {
    // The gate refuses before any request reaches either actor.
    let course_mock = MockClient::<Course>::new();
    let (content_actor, content_client): (_, ContentClient) = course_admin::content_actor::new(8);
    let actor_handle = tokio::spawn(content_actor.run(CourseClient::new(course_mock.client())));

    let reader = Caller::new(UserId::from(Uuid::new_v4()), Role::User);
    let err = content_client
        .create(&reader, CourseId::from(Uuid::new_v4()), lesson())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    course_mock.verify();
    drop(content_client);
    actor_handle.await.unwrap();
}
