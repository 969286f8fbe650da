//! Instruction prompt assembly for the gap analysis.
//!
//! The template is a fixed constant. Only the two substituted fields
//! (the ISO excerpt and the extracted policy text) vary between runs,
//! which keeps the rendered prompt byte-for-byte reproducible.

/// System-role instruction sent by the remote chat backend.
pub const SYSTEM_PROMPT: &str = "You are an ISO 27001 compliance expert.";

/// Combine the ISO excerpt and the ISMS policy text into one prompt.
///
/// Pure function: no I/O, no truncation, both inputs embedded verbatim.
/// Length budgeting is the backend's concern, not the builder's.
pub fn build_gap_analysis_prompt(policy_text: &str, iso_excerpt: &str) -> String {
    format!(
        r#"
You are an ISO 27001 compliance expert. The following is an excerpt from the ISO 27001 standard:
{iso_excerpt}

The following is the text from the organization's ISMS policy document:
{policy_text}

Please analyze the gap between the organization's policy and the ISO 27001 standard. Provide a detailed policy gap analysis report that:
1. Identifies areas where the policy does not meet the ISO 27001 requirements.
2. Provides clear recommendations for policy improvements, including alternative policy language.

Output the report in a clear, structured format.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_is_deterministic() {
        let a = build_gap_analysis_prompt("policy text", "excerpt text");
        let b = build_gap_analysis_prompt("policy text", "excerpt text");
        assert_eq!(a, b);
    }

    #[test]
    fn prompt_contains_both_inputs_verbatim() {
        let policy = "Access control policy: passwords expire every 180 days.";
        let excerpt = "ISO 27001 A.9.4.3 requires password length >= 14 and expiry <= 90 days.";
        let prompt = build_gap_analysis_prompt(policy, excerpt);

        assert!(prompt.contains(policy));
        assert!(prompt.contains(excerpt));
    }

    #[test]
    fn excerpt_precedes_policy_text() {
        let prompt = build_gap_analysis_prompt("POLICY_FIELD", "EXCERPT_FIELD");
        let excerpt_at = prompt.find("EXCERPT_FIELD").unwrap();
        let policy_at = prompt.find("POLICY_FIELD").unwrap();
        assert!(excerpt_at < policy_at);
    }

    #[test]
    fn template_sections_are_in_order() {
        let prompt = build_gap_analysis_prompt("p", "x");
        let role = prompt.find("ISO 27001 compliance expert").unwrap();
        let first = prompt.find("1. Identifies areas").unwrap();
        let second = prompt.find("2. Provides clear recommendations").unwrap();
        let format_directive = prompt.find("clear, structured format").unwrap();
        assert!(role < first && first < second && second < format_directive);
    }

    #[test]
    fn inputs_are_not_transformed() {
        // Whitespace and markup must survive untouched.
        let policy = "  line one\n\tline two  ";
        let prompt = build_gap_analysis_prompt(policy, "<excerpt/>");
        assert!(prompt.contains(policy));
        assert!(prompt.contains("<excerpt/>"));
    }

    #[test]
    fn system_prompt_names_the_domain() {
        assert!(SYSTEM_PROMPT.contains("ISO 27001"));
    }
}
