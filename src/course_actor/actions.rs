/// Custom actions for Course entities.
#[derive(Debug, Clone)]
pub enum CourseAction {
    /// Marks one more lesson as completed. Saturates at the lesson count.
    CompleteLesson,
}

/// Results from CourseActions - variants match 1:1 with CourseAction
#[derive(Debug, Clone, PartialEq)]
pub enum CourseActionResult {
    CompleteLesson(CourseProgress),
}

/// Lesson progress after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseProgress {
    pub completed_lessons: u32,
    pub lessons: u32,
    pub progress: u32,
}
