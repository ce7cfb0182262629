/// System prompt for report analysis. The trailing JSON array is requested
/// by instruction only; the model is not held to a schema, which is why
/// the splitter treats the array as best-effort.
pub const ANALYSIS_SYSTEM_PROMPT: &str = r#"
You are a helpful medical assistant.
Analyze the provided medical report (text or image) and explain it in simple
language a patient can understand. Simplify complex medical terms. If the
document is handwritten, read it as best you can.

After the explanation, end your reply with a JSON array of the numeric
vitals found in the report, one object per measurement, using exactly the
keys "Test", "Value" and "Unit". The array must be the last thing in the
reply, with no text after it. If the report contains no numeric vitals,
end with an empty array [].
"#;

/// System prompt for follow-up questions. Free-form answers, no vitals
/// array is requested, so replies are returned verbatim.
pub const QUESTION_SYSTEM_PROMPT: &str = r#"
You are a helpful medical assistant.
Answer the user's question using only the provided medical report (text or
image). Simplify complex medical terms. If the report does not contain the
answer, say so plainly.
"#;

/// Build the analysis instruction, optionally fixing the output language.
pub fn build_analysis_prompt(language: Option<&str>) -> String {
    let mut prompt = String::from(
        "Analyze this medical report. Summarize the findings, flag anything \
         outside normal ranges, and list the numeric vitals.",
    );
    if let Some(language) = language {
        prompt.push_str(&format!(" Respond in {language}."));
    }
    prompt
}

/// Build a follow-up question against the same evidence.
pub fn build_question_prompt(question: &str) -> String {
    format!("Question about the attached report: {question}")
}

/// Build a diet-plan request grounded in the report's findings.
pub fn build_diet_prompt(language: Option<&str>) -> String {
    let mut prompt = String::from(
        "Based on this medical report, suggest a simple one-week diet plan \
         that addresses the findings. Keep it practical and note anything \
         the patient should discuss with their doctor first.",
    );
    if let Some(language) = language {
        prompt.push_str(&format!(" Respond in {language}."));
    }
    prompt
}
