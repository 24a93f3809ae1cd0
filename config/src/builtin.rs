//! Embedded default question tables.

use crate::{Category, PersonalQuestion, QuestionConfig, QuestionKind};

fn category(id: &str, label: &str, sub_goals: &[&str]) -> Category {
    Category {
        id: id.to_owned(),
        label: label.to_owned(),
        sub_goals: sub_goals.iter().map(|&g| g.to_owned()).collect(),
    }
}

fn options(key: &str, label: &str, opts: &[&str]) -> PersonalQuestion {
    PersonalQuestion {
        key: key.to_owned(),
        label: label.to_owned(),
        kind: QuestionKind::Options,
        options: opts.iter().map(|&o| o.to_owned()).collect(),
    }
}

fn input(key: &str, label: &str) -> PersonalQuestion {
    PersonalQuestion {
        key: key.to_owned(),
        label: label.to_owned(),
        kind: QuestionKind::Input,
        options: Vec::new(),
    }
}

pub(crate) fn tables() -> QuestionConfig {
    QuestionConfig {
        categories: vec![
            category(
                "hair",
                "Hair",
                &["Hair loss", "Weak hair", "Dandruff", "Premature greying"],
            ),
            category(
                "skin",
                "Skin",
                &["Acne", "Glow", "Anti-aging", "Dark spots", "Dryness"],
            ),
            category(
                "stamina",
                "Stamina",
                &["Daily fatigue", "Endurance", "Low morning energy", "Recovery"],
            ),
            category(
                "digestion",
                "Digestion",
                &["Bloating", "Acidity", "Irregularity", "Poor appetite"],
            ),
            category(
                "sleep",
                "Sleep",
                &[
                    "Trouble falling asleep",
                    "Waking at night",
                    "Unrefreshing sleep",
                    "Irregular schedule",
                ],
            ),
            category(
                "immunity",
                "Immunity",
                &["Frequent colds", "Slow recovery", "Seasonal allergies"],
            ),
            category(
                "joints",
                "Joints",
                &["Knee pain", "Stiffness", "Flexibility", "Post-workout soreness"],
            ),
        ],
        questions: vec![
            options(
                "age_group",
                "Which age group are you in?",
                &["Under 18", "18-30", "31-45", "46-60", "60+"],
            ),
            options(
                "diet",
                "How would you describe your diet?",
                &["Vegetarian", "Vegan", "Mixed", "Mostly processed"],
            ),
            options(
                "sleep_hours",
                "Average sleep per day?",
                &["<5 hours", "5-7 hours", "7+ hours"],
            ),
            options(
                "exercise",
                "Exercise level?",
                &["Sedentary", "Moderate", "High"],
            ),
            input("conditions", "Do you have any medical conditions?"),
            input("allergies", "Do you have any known allergies?"),
        ],
    }
}
