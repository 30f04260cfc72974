// All LLM prompt constants for the interview module.
// Reuses the JSON-only fragment from llm_client::prompts.

/// Persona for question generation. Combined with the JSON-only instruction.
pub const QUESTION_PERSONA: &str = "You are an expert interview coach.";

/// Question generation prompt template.
/// Replace: {num_questions}, {role}, {resume_context}
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"You are an expert technical interviewer. Generate exactly {num_questions} interview questions for a {role} position.

{resume_context}

Requirements:
- Mix of technical, behavioral, and situational questions
- Progress from easier to harder
- If a resume is provided, include 1-2 questions about the candidate's specific experience
- Questions should be open-ended and thought-provoking
- Each question should test a different skill area

Return ONLY a JSON array of strings, no other text. Example:
["Question 1?", "Question 2?"]"#;

/// Resume block inserted into the question prompt. Replace: {resume_text}
pub const RESUME_CONTEXT_TEMPLATE: &str = r#"The candidate has provided their resume. Use it to personalize some questions:
--- RESUME ---
{resume_text}
--- END RESUME ---"#;

/// Persona for answer grading. Combined with the JSON-only instruction.
pub const GRADING_PERSONA: &str = "You are an expert interview evaluator.";

/// Answer grading prompt template.
/// Replace: {role}, {question}, {answer}
pub const GRADING_PROMPT_TEMPLATE: &str = r#"You are an expert interviewer evaluating a candidate for a {role} position.

Question: {question}
Candidate's Answer: {answer}

Evaluate the answer and provide:
1. score: A score from 0-10 (float, be fair but critical)
2. feedback: Detailed constructive feedback (2-3 sentences)
3. strengths: List of 1-3 things they did well
4. improvements: List of 1-3 areas for improvement

Return ONLY valid JSON in this exact format:
{
  "score": 7.5,
  "feedback": "Your detailed feedback here.",
  "strengths": ["strength 1", "strength 2"],
  "improvements": ["improvement 1", "improvement 2"]
}"#;

/// System prompt for the overall narrative. Plain text reply, no JSON.
pub const SUMMARY_SYSTEM: &str = "You are a supportive interview coach.";

/// Overall feedback prompt template.
/// Replace: {role}, {qa_summary}
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"You are an expert interview coach. A candidate just completed a mock interview for a {role} position. Here's a summary:

{qa_summary}

Provide a 3-4 sentence overall assessment. Be encouraging but honest. Mention their strongest area and the most critical area to improve."#;
