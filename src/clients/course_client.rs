use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::course_actor::{CourseAction, CourseActionResult, CourseError, CourseProgress};
use crate::domain::{Course, CourseCreate, CoursePatch};

/// Client for interacting with the course catalog actor.
#[derive(Clone)]
pub struct CourseClient {
    inner: ResourceClient<Course>,
}

impl_basic_client!(CourseClient, Course, CourseError, course, courses);

impl CourseClient {
    #[instrument(skip(self, course), fields(title = %course.title))]
    pub async fn add_course(&self, course: CourseCreate) -> Result<Course, CourseError> {
        debug!("Sending request");
        self.inner.create(course).await
    }

    #[instrument(skip(self))]
    pub async fn update_course(&self, id: String, patch: CoursePatch) -> Result<Option<Course>, CourseError> {
        debug!("Sending request");
        self.inner.update(id, patch).await
    }

    /// Courses that are both published and active.
    #[instrument(skip(self))]
    pub async fn get_published_courses(&self) -> Result<Vec<Course>, CourseError> {
        debug!("Sending request");
        self.inner.query(Course::is_listed).await
    }

    #[instrument(skip(self))]
    pub async fn complete_lesson(&self, id: String) -> Result<Option<CourseProgress>, CourseError> {
        debug!("Sending request");
        let result = self.inner.perform_action(id, CourseAction::CompleteLesson).await?;
        Ok(result.map(|CourseActionResult::CompleteLesson(progress)| progress))
    }
}
