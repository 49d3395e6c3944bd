use crate::mentor::subject::Subject;

/// A set of trigger substrings and the canned reply they select.
pub struct KeywordGroup {
    pub keywords: &'static [&'static str],
    pub response: &'static str,
}

static MATH_GROUPS: [KeywordGroup; 4] = [
    KeywordGroup {
        keywords: &["algebra", "equation"],
        response: "Algebra is all about finding the unknown!\n\
                   1. Move every term with the variable to one side.\n\
                   2. Move the constants to the other side.\n\
                   3. Divide by the coefficient of the variable.\n\
                   Example: 2x + 5 = 15 -> 2x = 10 -> x = 5.",
    },
    KeywordGroup {
        keywords: &["geometry", "triangle", "angle"],
        response: "Geometry tips:\n\
                   - The angles of a triangle always add up to 180 degrees.\n\
                   - Area of a triangle = 1/2 x base x height.\n\
                   - Pythagoras: a^2 + b^2 = c^2 for right triangles.\n\
                   Draw a sketch first, it makes every problem easier!",
    },
    KeywordGroup {
        keywords: &["fraction", "decimal"],
        response: "Working with fractions:\n\
                   - To add, find a common denominator first.\n\
                   - To multiply, multiply the tops and the bottoms.\n\
                   - To divide, flip the second fraction and multiply.\n\
                   - To turn a fraction into a decimal, divide the top by the bottom.",
    },
    KeywordGroup {
        keywords: &["calculus", "derivative"],
        response: "Calculus studies change.\n\
                   - A derivative measures how fast a function changes.\n\
                   - Power rule: d/dx of x^n is n*x^(n-1).\n\
                   - An integral adds up small pieces to find an area.\n\
                   Start by getting comfortable with the power rule.",
    },
];

static SCIENCE_GROUPS: [KeywordGroup; 3] = [
    KeywordGroup {
        keywords: &["physics", "force", "motion"],
        response: "Physics basics:\n\
                   - Newton's 1st law: objects keep doing what they are doing unless a force acts.\n\
                   - Newton's 2nd law: F = m x a.\n\
                   - Newton's 3rd law: every action has an equal and opposite reaction.\n\
                   Try spotting these laws when you ride a bike!",
    },
    KeywordGroup {
        keywords: &["chemistry", "atom", "molecule"],
        response: "Chemistry essentials:\n\
                   - Atoms are made of protons, neutrons and electrons.\n\
                   - Molecules are atoms bonded together, like H2O.\n\
                   - The periodic table groups elements with similar behaviour.\n\
                   Learn the first 20 elements and everything gets easier.",
    },
    KeywordGroup {
        keywords: &["biology", "cell", "photosynthesis"],
        response: "Biology highlights:\n\
                   - The cell is the basic unit of life.\n\
                   - Plants make food by photosynthesis: CO2 + water + light -> glucose + O2.\n\
                   - DNA carries the instructions for every living thing.\n\
                   Diagrams are your best friend in biology.",
    },
];

static ENGLISH_GROUPS: [KeywordGroup; 3] = [
    KeywordGroup {
        keywords: &["grammar", "tense", "noun", "verb"],
        response: "Grammar guide:\n\
                   - A noun names a person, place or thing.\n\
                   - A verb shows an action or a state.\n\
                   - Keep your tense consistent inside a paragraph.\n\
                   Read your sentence aloud to catch mistakes.",
    },
    KeywordGroup {
        keywords: &["essay", "writing"],
        response: "Essay structure:\n\
                   1. Introduction with a clear thesis.\n\
                   2. Body paragraphs, one idea each, with evidence.\n\
                   3. Conclusion that restates the thesis in new words.\n\
                   Plan for five minutes before you start writing.",
    },
    KeywordGroup {
        keywords: &["poem", "poetry", "literature", "novel"],
        response: "Reading literature:\n\
                   - Look for the theme: what is the author really saying?\n\
                   - Notice imagery, metaphor and simile.\n\
                   - Ask how the characters change from start to end.\n\
                   Quote short phrases to support your ideas.",
    },
];

static SOCIAL_GROUPS: [KeywordGroup; 3] = [
    KeywordGroup {
        keywords: &["history", "war", "ancient"],
        response: "Studying history:\n\
                   - Build a timeline of the key events.\n\
                   - For every event ask: causes, events, consequences.\n\
                   - Compare primary and secondary sources.\n\
                   Stories are easier to remember than dates alone!",
    },
    KeywordGroup {
        keywords: &["geography", "map", "continent"],
        response: "Geography pointers:\n\
                   - There are 7 continents and 5 oceans.\n\
                   - Latitude runs east-west, longitude runs north-south.\n\
                   - Climate depends on latitude, altitude and distance from the sea.\n\
                   Practise with a blank map.",
    },
    KeywordGroup {
        keywords: &["government", "civics", "democracy"],
        response: "Civics in a nutshell:\n\
                   - Democracy means the people choose their leaders.\n\
                   - Power is split between legislative, executive and judicial branches.\n\
                   - Citizens have rights and responsibilities.\n\
                   Follow the local news to see civics in action.",
    },
];

const QUIZ_GROUP: KeywordGroup = KeywordGroup {
    keywords: &["quiz", "test me", "practice"],
    response: "Let's test your knowledge!\n\
               Pick a subject and start a quiz. I'll ask you a question, check your answer \
               and explain the solution.",
};

const STUDY_PLAN_GROUP: KeywordGroup = KeywordGroup {
    keywords: &["study plan", "plan", "schedule"],
    response: "I can build you a study plan!\n\
               Choose a subject and ask for a plan. You'll get a week-by-week outline \
               with topics and resources.",
};

const GREETING_GROUP: KeywordGroup = KeywordGroup {
    keywords: &["hello", "hi", "hey"],
    response: "Hello! I'm your AI mentor.\n\
               Ask me about Mathematics, Science, English or Social Studies, \
               or ask for a quiz or a study plan.",
};

const THANKS_GROUP: KeywordGroup = KeywordGroup {
    keywords: &["thank"],
    response: "You're welcome! Keep up the great work.\n\
               Ask me anything else whenever you're ready.",
};

/// Generic groups in priority order, tried when no subject is active.
static GENERIC_GROUPS: [&KeywordGroup; 4] =
    [&QUIZ_GROUP, &STUDY_PLAN_GROUP, &GREETING_GROUP, &THANKS_GROUP];

pub const CAPABILITY_SUMMARY: &str = "I'm your AI mentor. Here's what I can do:\n\
     - Explain topics in Mathematics, Science, English and Social Studies\n\
     - Quiz you on a subject and explain the answers\n\
     - Build a study plan for a subject\n\
     Pick a subject or just ask me a question!";

pub fn subject_groups(subject: Subject) -> &'static [KeywordGroup] {
    match subject {
        Subject::Math => &MATH_GROUPS,
        Subject::Science => &SCIENCE_GROUPS,
        Subject::English => &ENGLISH_GROUPS,
        Subject::Social => &SOCIAL_GROUPS,
    }
}

/// Fallback for input that matches none of the active subject's groups.
pub fn subject_fallback(subject: Subject) -> String {
    format!(
        "I can help with {}! Try asking about: {}.",
        subject.display_name(),
        subject.topics().join(", ")
    )
}

fn first_match<'a, I>(input: &str, groups: I) -> Option<&'static str>
where
    I: IntoIterator<Item = &'a KeywordGroup>,
{
    groups
        .into_iter()
        .find(|group| group.keywords.iter().any(|k| input.contains(k)))
        .map(|group| group.response)
}

/// Maps free text to a canned response. Never fails, never returns an empty string.
pub fn classify(input: &str, active_subject: Option<Subject>) -> String {
    let input = input.to_lowercase();

    match active_subject {
        Some(subject) => first_match(&input, subject_groups(subject))
            .map(str::to_string)
            .unwrap_or_else(|| subject_fallback(subject)),
        None => first_match(&input, GENERIC_GROUPS)
            .unwrap_or(CAPABILITY_SUMMARY)
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mentor::subject::ALL_SUBJECTS;

    #[test]
    fn every_subject_keyword_selects_its_group() {
        for subject in ALL_SUBJECTS {
            for group in subject_groups(subject) {
                for keyword in group.keywords {
                    let input = format!("Can you explain {} please", keyword.to_uppercase());
                    let reply = classify(&input, Some(subject));
                    // An earlier group may claim the same input; the first match wins.
                    let expected = first_match(&input.to_lowercase(), subject_groups(subject));
                    assert_eq!(Some(reply.as_str()), expected);
                    assert_ne!(reply, subject_fallback(subject));
                }
            }
        }
    }

    #[test]
    fn algebra_reply_is_verbatim() {
        assert_eq!(
            classify("How do I solve an equation?", Some(Subject::Math)),
            MATH_GROUPS[0].response
        );
    }

    #[test]
    fn unmatched_subject_input_gets_subject_fallback() {
        let reply = classify("what's for lunch", Some(Subject::Science));
        assert_eq!(reply, subject_fallback(Subject::Science));
        assert!(reply.starts_with("I can help with Science"));
    }

    #[test]
    fn active_subject_skips_generic_groups() {
        assert_eq!(
            classify("hello", Some(Subject::English)),
            subject_fallback(Subject::English)
        );
    }

    #[test]
    fn generic_groups_follow_priority_order() {
        assert_eq!(classify("Quiz me, thanks!", None), QUIZ_GROUP.response);
        assert_eq!(classify("I need a study plan", None), STUDY_PLAN_GROUP.response);
        assert_eq!(classify("Hey there", None), GREETING_GROUP.response);
        assert_eq!(classify("Thank you", None), THANKS_GROUP.response);
    }

    #[test]
    fn substring_matching_is_not_word_based() {
        // "this" contains "hi".
        assert_eq!(classify("is this ok", None), GREETING_GROUP.response);
    }

    #[test]
    fn no_keywords_gets_capability_summary() {
        assert_eq!(classify("", None), CAPABILITY_SUMMARY);
        assert_eq!(classify("zzz", None), CAPABILITY_SUMMARY);
    }
}
