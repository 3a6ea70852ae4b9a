//! [`ActorEntity`] implementation for [`Course`].

use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;

use crate::error::{require_text, update_text, ServiceError};
use crate::model::{Course, CourseCreate, CourseId, CourseUpdate};

#[async_trait]
impl ActorEntity for Course {
    type Id = CourseId;
    type Create = CourseCreate;
    type Update = CourseUpdate;
    type Context = ();
    type Error = ServiceError;

    fn from_create_params(
        id: CourseId,
        params: CourseCreate,
        _ctx: &(),
    ) -> Result<Self, ServiceError> {
        require_text("name", &params.name)?;
        require_text("description", &params.description)?;

        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            image_url: params.image_url.filter(|url| !url.trim().is_empty()),
            date_created: Utc::now(),
        })
    }

    async fn on_update(&mut self, update: CourseUpdate, _ctx: &()) -> Result<(), ServiceError> {
        update_text("name", &mut self.name, update.name)?;
        update_text("description", &mut self.description, update.description)?;
        if let Some(image_url) = update.image_url {
            self.image_url = Some(image_url).filter(|url| !url.trim().is_empty());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn blank_image_url_clears_it() {
        let params = CourseCreate {
            name: "Intro".into(),
            description: "Basics".into(),
            image_url: Some("https://img/intro.png".into()),
        };
        let mut course =
            Course::from_create_params(CourseId::from(Uuid::new_v4()), params, &()).unwrap();
        assert_eq!(course.image_url.as_deref(), Some("https://img/intro.png"));

        let update = CourseUpdate {
            image_url: Some(String::new()),
            ..Default::default()
        };
        course.on_update(update, &()).await.unwrap();
        assert_eq!(course.image_url, None);
        assert_eq!(course.name, "Intro");
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let params = CourseCreate {
            name: " ".into(),
            description: "Basics".into(),
            image_url: None,
        };
        let err = Course::from_create_params(CourseId::from(Uuid::new_v4()), params, &())
            .unwrap_err();
        assert_eq!(err, ServiceError::Validation("name is required".into()));
    }
}
