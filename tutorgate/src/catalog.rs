use std::collections::HashMap;

use crate::config;

/// Course and lesson titles, resolved by id.
///
/// Loaded once from the `[catalog]` config section. Entitlement rides in
/// the caller's claims; the catalog only answers what a course and lesson
/// are called, since the generator works from names.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    courses: HashMap<u32, Course>,
}

#[derive(Debug, Clone)]
struct Course {
    title: String,
    lessons: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Titles {
    pub course: String,
    pub lesson: String,
}

impl Catalog {
    pub fn new(cfg: &config::Catalog) -> Self {
        let mut courses = HashMap::new();
        for course in cfg.courses.iter() {
            courses.insert(
                course.id,
                Course {
                    title: course.title.clone(),
                    lessons: course
                        .lessons
                        .iter()
                        .map(|lesson| (lesson.id.clone(), lesson.title.clone()))
                        .collect(),
                },
            );
        }
        Self { courses }
    }

    /// `None` when either the course or the lesson is unknown.
    pub fn resolve(&self, course_id: u32, lesson_id: &str) -> Option<Titles> {
        let course = self.courses.get(&course_id)?;
        let lesson = course.lessons.get(lesson_id)?;
        Some(Titles {
            course: course.title.clone(),
            lesson: lesson.clone(),
        })
    }
}
