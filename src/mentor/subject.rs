use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Math,
    Science,
    English,
    Social,
}

pub const ALL_SUBJECTS: [Subject; 4] = [
    Subject::Math,
    Subject::Science,
    Subject::English,
    Subject::Social,
];

impl Subject {
    /// Parses a subject key such as `"math"` or `" Science "`.
    /// Returns `None` for anything outside the fixed set.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "math" => Some(Subject::Math),
            "science" => Some(Subject::Science),
            "english" => Some(Subject::English),
            "social" => Some(Subject::Social),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::Science => "science",
            Subject::English => "english",
            Subject::Social => "social",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Subject::Math => "Mathematics",
            Subject::Science => "Science",
            Subject::English => "English",
            Subject::Social => "Social Studies",
        }
    }

    pub fn topics(&self) -> &'static [&'static str] {
        match self {
            Subject::Math => &["Algebra", "Geometry", "Fractions", "Calculus"],
            Subject::Science => &["Physics", "Chemistry", "Biology", "Earth Science"],
            Subject::English => &["Grammar", "Essay Writing", "Literature", "Vocabulary"],
            Subject::Social => &["History", "Geography", "Civics", "Economics"],
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
