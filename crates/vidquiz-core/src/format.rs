use crate::types::QuizQuestion;

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Format a quiz as human-readable text for terminal output.
pub fn format_quiz_readable(questions: &[QuizQuestion]) -> String {
    if questions.is_empty() {
        return "No questions could be generated for this video.\n".to_string();
    }

    let mut output = String::new();
    for (i, question) in questions.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, question.question));
        for (j, option) in question.options.iter().enumerate() {
            let label = OPTION_LABELS.get(j).copied().unwrap_or('?');
            let marker = if j == question.correct_answer {
                " ✓"
            } else {
                ""
            };
            output.push_str(&format!("   {label}) {option}{marker}\n"));
        }
        output.push('\n');
    }
    output
}
