//! Fixed prompt for hosted interview summarization.
//!
//! The structure is load-bearing: the structured key-point extractor parses
//! the numbered "Key Points" section back out of the model's reply, so the
//! section headings here must stay in sync with `analysis::key_points`.

/// System role content for the chat-completion call.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant specialized in summarizing text.";

/// Build the user prompt requesting a five-section interview summary.
pub fn interview_prompt(transcript: &str) -> String {
    format!(
        "You are a highly skilled assistant helping to summarize interview transcripts. \
         The summary should be structured as follows:\n\
         1. **Key Points**: List around 1-10 important points (if any) talked about in the \
         transcript. If the transcript is small, you can list fewer important points.\n\
         2. **Key Questions Asked**: List the main questions asked during the interview.\n\
         3. **Candidate's Responses**: Summarize the main points of the candidate's answers \
         to all the questions that were asked.\n\
         4. **Key Strengths or Skills Identified**: Highlight any specific strengths or \
         skills the candidate mentioned.\n\
         5. **Follow-Up Topics**: List any unresolved points or topics that might need \
         further discussion.\n\n\
         Here is the transcript of the interview:\n\
         {transcript}\n\n\
         Please follow the structure and keep the summary clear and professional."
    )
}
