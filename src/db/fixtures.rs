use super::{Category, QuestionRecord};

pub const SCIENCE: i64 = 1;
pub const ART: i64 = 2;
pub const GEOGRAPHY: i64 = 3;
// No questions are filed under this one.
pub const SPORTS: i64 = 4;
pub const MISSING_CATEGORY: i64 = 1000;

const CATEGORIES: &[(i64, &str)] = &[
    (SCIENCE, "Science"),
    (ART, "Art"),
    (GEOGRAPHY, "Geography"),
    (SPORTS, "Sports"),
];

const QUESTIONS: &[(i64, &str, &str, i64, i64)] = &[
    (1, "Who discovered penicillin?", "Alexander Fleming", SCIENCE, 3),
    (2, "What is the heaviest organ in the human body?", "The Liver", SCIENCE, 4),
    (3, "Hematology is a branch of medicine involving the study of what?", "Blood", SCIENCE, 4),
    (4, "What is the chemical symbol for gold?", "Au", SCIENCE, 1),
    (5, "How many bones are in the adult human body?", "206", SCIENCE, 2),
    (6, "What planet is known as the Red Planet?", "Mars", SCIENCE, 1),
    (7, "What gas do plants absorb from the air?", "Carbon dioxide", SCIENCE, 1),
    (8, "La Giaconda is better known as what?", "Mona Lisa", ART, 3),
    (9, "How many paintings did Van Gogh sell in his lifetime?", "One", ART, 4),
    (10, "Which Dutch graphic artist was a creator of optical illusions?", "Escher", ART, 1),
    (11, "What is the largest lake in Africa?", "Lake Victoria", GEOGRAPHY, 2),
    (12, "The Taj Mahal is located in which Indian city?", "Agra", GEOGRAPHY, 2),
];

pub fn categories() -> Vec<Category> {
    CATEGORIES
        .iter()
        .map(|&(id, kind)| Category {
            id,
            kind: kind.to_owned(),
        })
        .collect()
}

pub fn questions() -> Vec<QuestionRecord> {
    QUESTIONS
        .iter()
        .map(
            |&(id, question, answer, category_id, difficulty)| QuestionRecord {
                id,
                question: question.to_owned(),
                answer: answer.to_owned(),
                category_id,
                difficulty,
            },
        )
        .collect()
}

pub fn question_ids_in(category_id: i64) -> Vec<i64> {
    QUESTIONS
        .iter()
        .filter(|q| q.3 == category_id)
        .map(|q| q.0)
        .collect()
}
