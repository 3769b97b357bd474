use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Course, CourseCreate, CoursePatch};
use super::actions::{CourseAction, CourseActionResult, CourseProgress};
use super::error::CourseError;

impl Entity for Course {
    type Id = String;
    type CreateParams = CourseCreate;
    type Patch = CoursePatch;
    type Action = CourseAction;
    type ActionResult = CourseActionResult;
    type Error = CourseError;

    const STORAGE_KEY: &'static str = "course-storage";
    const COLLECTION: &'static str = "courses";

    fn id(&self) -> &String { &self.id }

    /// New courses start published and active with no progress.
    fn from_create_params(id: String, params: CourseCreate) -> Result<Self, CourseError> {
        let now = Utc::now();
        Ok(Self {
            id,
            title: params.title,
            description: params.description,
            thumbnail: params.thumbnail,
            duration: params.duration,
            progress: 0,
            lessons: params.lessons,
            completed_lessons: 0,
            instructor: params.instructor,
            price: params.price,
            is_published: true,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Shallow merge of the provided fields; always refreshes `updated_at`.
    fn on_update(&mut self, patch: CoursePatch) -> Result<(), CourseError> {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(thumbnail) = patch.thumbnail {
            self.thumbnail = thumbnail;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(lessons) = patch.lessons {
            self.lessons = lessons;
        }
        if let Some(instructor) = patch.instructor {
            self.instructor = instructor;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(is_published) = patch.is_published {
            self.is_published = is_published;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    fn handle_action(&mut self, action: CourseAction) -> Result<CourseActionResult, CourseError> {
        match action {
            CourseAction::CompleteLesson => {
                self.completed_lessons = self.completed_lessons.saturating_add(1).min(self.lessons);
                self.progress = match self.lessons {
                    0 => 0,
                    lessons => self.completed_lessons * 100 / lessons,
                };
                self.updated_at = Utc::now();
                Ok(CourseActionResult::CompleteLesson(CourseProgress {
                    completed_lessons: self.completed_lessons,
                    lessons: self.lessons,
                    progress: self.progress,
                }))
            }
        }
    }

    /// An empty persisted catalog is treated as never initialised.
    fn reseed_when_empty() -> bool { true }
}
