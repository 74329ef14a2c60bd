// All LLM prompt constants for the interview module.
// Every renderer is a pure string substitution; none of them can fail.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

pub const QUESTION_GEN_SYSTEM: &str = "You are an expert technical interviewer. \
    Generate relevant, thoughtful interview questions.";

pub const EVALUATION_SYSTEM: &str = "You are an expert interview evaluator. \
    Provide constructive, specific feedback.";

/// System prompt for continuation turns. Replace `{role}`.
pub const MOCK_SYSTEM_TEMPLATE: &str =
    "You are conducting a professional interview for a {role} position.";

/// Replace: {count}, {role}, {difficulty}, {json_only}
pub const QUESTION_GEN_PROMPT_TEMPLATE: &str = r#"Generate {count} interview questions for a {role} position.
Difficulty level: {difficulty}

Return ONLY a JSON array with this exact format:
[
  {
    "text": "question text",
    "difficulty": "Easy/Medium/Hard",
    "context": "brief context if needed"
  }
]

Make questions relevant, practical, and varied in difficulty.
{json_only}"#;

/// Replace: {role}, {question}, {answer}, {json_only}
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"Evaluate this interview answer for a {role} position.

Question: {question}
Answer: {answer}

Provide evaluation in this JSON format:
{
  "score": 0-10,
  "feedback": "detailed feedback",
  "strengths": ["strength 1", "strength 2"],
  "improvements": ["improvement 1", "improvement 2"]
}

Be specific, constructive, and encouraging.
{json_only}"#;

/// Replace: {answer}, {role}
pub const MOCK_CONTINUATION_PROMPT_TEMPLATE: &str = r#"Based on the candidate's previous answer: "{answer}"

1. Provide brief feedback (1-2 sentences)
2. Ask the next relevant interview question for a {role}

Format your response as:
FEEDBACK: [your feedback]
QUESTION: [next question]"#;

const MOCK_GREETING_TEMPLATE: &str = "Hello! Thank you for joining us today. \
    I'm excited to learn more about your background and experience for the {role} position. \
    Let's begin with our first question.";

const MOCK_FIRST_QUESTION_TEMPLATE: &str =
    "Can you tell me about yourself and why you're interested in this {role} position?";

pub const MOCK_CLOSING_MESSAGE: &str = "Thank you for your time today. \
    You've provided great answers. We'll be in touch soon regarding next steps. Best of luck!";

/// `difficulty` goes in verbatim, including the "mixed" sentinel.
pub fn question_generation_prompt(role: &str, count: usize, difficulty: &str) -> String {
    QUESTION_GEN_PROMPT_TEMPLATE
        .replace("{count}", &count.to_string())
        .replace("{role}", role)
        .replace("{difficulty}", difficulty)
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
}

pub fn evaluation_prompt(question_text: &str, answer: &str, role: &str) -> String {
    // {answer} last so candidate text containing a placeholder is left alone.
    EVALUATION_PROMPT_TEMPLATE
        .replace("{role}", role)
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{question}", question_text)
        .replace("{answer}", answer)
}

/// Greeting and first question for a new mock interview. Never sent to the model.
pub fn mock_opening_prompt(role: &str) -> (String, String) {
    (
        MOCK_GREETING_TEMPLATE.replace("{role}", role),
        MOCK_FIRST_QUESTION_TEMPLATE.replace("{role}", role),
    )
}

pub fn mock_system_prompt(role: &str) -> String {
    MOCK_SYSTEM_TEMPLATE.replace("{role}", role)
}

pub fn mock_continuation_prompt(previous_answer: &str, role: &str) -> String {
    MOCK_CONTINUATION_PROMPT_TEMPLATE
        .replace("{role}", role)
        .replace("{answer}", previous_answer)
}
