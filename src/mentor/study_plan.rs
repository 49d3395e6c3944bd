use crate::mentor::subject::Subject;
use crate::mentor::{Message, MessageKind};

#[derive(Debug, Clone, PartialEq)]
pub struct StudyPlan {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub topics: &'static [&'static str],
    pub resources: &'static [&'static str],
}

static MATH_PLAN: StudyPlan = StudyPlan {
    id: "plan-math",
    title: "Math Mastery Plan",
    description: "Build strong foundations in algebra and geometry, then move on to problem solving.",
    duration: "4 weeks",
    topics: &[
        "Week 1: Linear equations",
        "Week 2: Fractions and ratios",
        "Week 3: Geometry and area",
        "Week 4: Word problems and review",
    ],
    resources: &[
        "Khan Academy algebra course",
        "Daily 15-minute practice worksheets",
        "Weekly self-check quiz",
    ],
};

static SCIENCE_PLAN: StudyPlan = StudyPlan {
    id: "plan-science",
    title: "Science Mastery Plan",
    description: "Cover the core ideas of physics, chemistry and biology with hands-on experiments.",
    duration: "6 weeks",
    topics: &[
        "Weeks 1-2: Forces and motion",
        "Weeks 3-4: Atoms, molecules and reactions",
        "Weeks 5-6: Cells and photosynthesis",
    ],
    resources: &[
        "Virtual lab simulations",
        "Crash Course science videos",
        "Experiment journal",
    ],
};

static ENGLISH_PLAN: StudyPlan = StudyPlan {
    id: "plan-english",
    title: "English Excellence Plan",
    description: "Sharpen grammar, grow vocabulary and write confident essays.",
    duration: "5 weeks",
    topics: &[
        "Week 1: Parts of speech",
        "Week 2: Tenses and sentence structure",
        "Week 3: Vocabulary building",
        "Week 4: Essay planning",
        "Week 5: Reading and analysing a short story",
    ],
    resources: &[
        "Grammar flashcards",
        "Reading list of short stories",
        "Peer essay review",
    ],
};

static SOCIAL_PLAN: StudyPlan = StudyPlan {
    id: "plan-social",
    title: "Social Studies Explorer Plan",
    description: "Connect history, geography and civics through timelines and maps.",
    duration: "4 weeks",
    topics: &[
        "Week 1: Ancient civilisations",
        "Week 2: World geography",
        "Week 3: How government works",
        "Week 4: Current events project",
    ],
    resources: &[
        "Interactive world map",
        "Timeline template",
        "Local news articles",
    ],
};

pub fn plan_for(subject: Subject) -> &'static StudyPlan {
    match subject {
        Subject::Math => &MATH_PLAN,
        Subject::Science => &SCIENCE_PLAN,
        Subject::English => &ENGLISH_PLAN,
        Subject::Social => &SOCIAL_PLAN,
    }
}

/// Looks up the canned plan for a subject key, defaulting to math.
/// `topics` and `duration` are accepted for call-site compatibility but the
/// canned plan is returned as is.
pub fn generate_plan(subject_key: &str, topics: &[String], duration: &str) -> StudyPlan {
    let subject = Subject::from_key(subject_key).unwrap_or(Subject::Math);
    log::debug!(
        "Study plan for {} (ignoring {} requested topics, duration {:?})",
        subject.key(),
        topics.len(),
        duration
    );
    plan_for(subject).clone()
}

fn bullet_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_plan(plan: &StudyPlan) -> String {
    format!(
        "{}\n{}\nDuration: {}\n\nTopics:\n{}\n\nResources:\n{}",
        plan.title,
        plan.description,
        plan.duration,
        bullet_list(plan.topics),
        bullet_list(plan.resources)
    )
}

pub fn plan_message(plan: &StudyPlan, subject: Option<Subject>) -> Message {
    Message::assistant(render_plan(plan), subject, MessageKind::StudyPlan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn science_plan_ignores_requested_topics_and_duration() {
        let plan = generate_plan("science", &[], "");
        assert_eq!(plan.title, "Science Mastery Plan");
        assert_eq!(plan.duration, "6 weeks");

        let custom = generate_plan("science", &["Optics".to_string()], "2 days");
        assert_eq!(custom, plan);
    }

    #[test]
    fn unknown_key_gets_math_plan() {
        assert_eq!(generate_plan("astrology", &[], "1 week"), MATH_PLAN);
    }

    #[test]
    fn rendered_plan_lists_everything() {
        let text = render_plan(&ENGLISH_PLAN);
        assert!(text.starts_with("English Excellence Plan"));
        assert!(text.contains("Duration: 5 weeks"));
        for item in ENGLISH_PLAN.topics.iter().chain(ENGLISH_PLAN.resources) {
            assert!(text.contains(item));
        }
    }

    #[test]
    fn plan_message_is_study_plan_kind() {
        let message = plan_message(plan_for(Subject::Social), Some(Subject::Social));
        assert_eq!(message.kind, Some(MessageKind::StudyPlan));
    }
}
