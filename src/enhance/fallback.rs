//! Offline rule-based enhancement
//!
//! Used when no API key is configured or the `--offline` flag is set.
//! Swaps weak phrasing for stronger verbs, drops filler words and keeps
//! the output shape identical to the hosted path so previews still work.

use crate::config::EnhancementConfig;
use crate::error::{CvEnhancerError, Result};
use aho_corasick::AhoCorasick;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use super::enhancer::{Enhancement, EnhancementRequest};

/// Weak phrase on the left, stronger replacement on the right.
/// An empty replacement removes the phrase outright.
const REPLACEMENTS: &[(&str, &str)] = &[
    ("worked on", "spearheaded"),
    ("helped", "facilitated"),
    ("made", "developed"),
    ("did", "executed"),
    ("good", "excellent"),
    ("important", "critical"),
    ("very", ""),
    ("really", ""),
    ("tried to", ""),
    ("attempted to", ""),
];

const FALLBACK_EXPLANATION: &str = "Enhanced with stronger language and professional tone.";

/// Rule-based enhancer that needs no network access.
pub struct FallbackEnhancer {
    matcher: AhoCorasick,
    replacements: Vec<&'static str>,
    whitespace: Regex,
    append_target_sentence: bool,
    min_bullet_chars: usize,
}

impl FallbackEnhancer {
    pub fn new(config: &EnhancementConfig) -> Result<Self> {
        let mut rules: Vec<(&str, &str)> = REPLACEMENTS.to_vec();
        // Sort patterns by length (longest first) to prioritize longer matches
        rules.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        let (patterns, replacements): (Vec<&str>, Vec<&str>) = rules.into_iter().unzip();

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(aho_corasick::MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| {
                CvEnhancerError::Enhancement(format!("Failed to build replacement matcher: {}", e))
            })?;

        let whitespace = Regex::new(r"[ \t]+")
            .map_err(|e| CvEnhancerError::Enhancement(format!("Invalid whitespace regex: {}", e)))?;

        Ok(Self {
            matcher,
            replacements,
            whitespace,
            append_target_sentence: config.append_target_sentence,
            min_bullet_chars: config.min_bullet_chars,
        })
    }

    /// Apply the replacement table and tidy up the gaps removals leave
    /// behind. Line structure is preserved.
    pub fn rewrite(&self, text: &str) -> String {
        let replaced = self.matcher.replace_all(text, &self.replacements);
        replaced
            .lines()
            .map(|line| self.whitespace.replace_all(line.trim(), " ").into_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn enhance(&self, request: &EnhancementRequest) -> Enhancement {
        let mut enhanced = self.rewrite(&request.content);

        if self.append_target_sentence {
            if let Some(program) = &request.context.target_program {
                let sentence = format!(
                    "This experience directly aligns with the requirements for {}.",
                    program
                );
                if enhanced.is_empty() {
                    enhanced = sentence;
                } else {
                    if !enhanced.ends_with('.') {
                        enhanced.push('.');
                    }
                    enhanced.push(' ');
                    enhanced.push_str(&sentence);
                }
            }
        }

        let bullet_points = self.bullet_points(&enhanced);

        Enhancement {
            original: request.content.clone(),
            enhanced,
            bullet_points,
            explanation: Some(FALLBACK_EXPLANATION.to_string()),
        }
    }

    /// Split the enhanced text into sentences and keep the substantial ones
    /// as bullet candidates. A single sentence never becomes a list.
    fn bullet_points(&self, text: &str) -> Option<Vec<String>> {
        let bullets: Vec<String> = text
            .unicode_sentences()
            .map(str::trim)
            .filter(|s| s.len() > self.min_bullet_chars && !s.contains("aligns with"))
            .map(|s| {
                if s.ends_with('.') {
                    s.to_string()
                } else {
                    format!("{}.", s)
                }
            })
            .collect();
        (bullets.len() > 1).then_some(bullets)
    }
}

#[cfg(test)]
mod tests {
    use super::super::prompts::EnhancementContext;
    use super::*;

    fn enhancer() -> FallbackEnhancer {
        FallbackEnhancer::new(&EnhancementConfig::default()).unwrap()
    }

    fn request(content: &str, program: Option<&str>) -> EnhancementRequest {
        EnhancementRequest {
            field: super::super::prompts::EnhanceField::Experience,
            content: content.to_string(),
            context: EnhancementContext {
                target_program: program.map(String::from),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_rewrite_strengthens_weak_verbs() {
        let result = enhancer().rewrite("I worked on several projects and helped the team.");
        assert_eq!(result, "I spearheaded several projects and facilitated the team.");
    }

    #[test]
    fn test_rewrite_is_case_insensitive() {
        let result = enhancer().rewrite("Worked on VERY good deliverables");
        assert_eq!(result, "spearheaded excellent deliverables");
    }

    #[test]
    fn test_removed_fillers_collapse_whitespace() {
        let result = enhancer().rewrite("I really tried to deliver very good results.");
        assert_eq!(result, "I deliver excellent results.");
    }

    #[test]
    fn test_rewrite_preserves_line_structure() {
        let result = enhancer().rewrite("worked on compilers\nhelped with testing");
        assert_eq!(result, "spearheaded compilers\nfacilitated with testing");
    }

    #[test]
    fn test_appends_alignment_sentence() {
        let enhancement = enhancer().enhance(&request("Led the robotics lab", Some("MIT")));
        assert_eq!(
            enhancement.enhanced,
            "Led the robotics lab. This experience directly aligns with the requirements for MIT."
        );
    }

    #[test]
    fn test_no_alignment_sentence_without_program() {
        let enhancement = enhancer().enhance(&request("Led the robotics lab.", None));
        assert_eq!(enhancement.enhanced, "Led the robotics lab.");
    }

    #[test]
    fn test_empty_content_with_program() {
        let enhancement = enhancer().enhance(&request("", Some("MIT")));
        assert_eq!(
            enhancement.enhanced,
            "This experience directly aligns with the requirements for MIT."
        );
    }

    #[test]
    fn test_bullet_points_from_multiple_sentences() {
        let enhancement = enhancer().enhance(&request(
            "Developed a compiler backend. Led a team of four engineers. Shipped the product on time.",
            None,
        ));
        let bullets = enhancement.bullet_points.unwrap();
        assert_eq!(
            bullets,
            vec![
                "Developed a compiler backend.",
                "Led a team of four engineers.",
                "Shipped the product on time.",
            ]
        );
    }

    #[test]
    fn test_single_sentence_yields_no_bullets() {
        let enhancement = enhancer().enhance(&request("Developed a compiler backend.", None));
        assert!(enhancement.bullet_points.is_none());
    }

    #[test]
    fn test_alignment_sentence_excluded_from_bullets() {
        let enhancement = enhancer().enhance(&request(
            "Developed a compiler backend. Led a team of four engineers.",
            Some("ETH Zurich"),
        ));
        let bullets = enhancement.bullet_points.unwrap();
        assert_eq!(bullets.len(), 2);
        assert!(bullets.iter().all(|b| !b.contains("aligns with")));
    }

    #[test]
    fn test_explanation_identifies_rule_based_pass() {
        let enhancement = enhancer().enhance(&request("Did the work.", None));
        assert_eq!(
            enhancement.explanation.as_deref(),
            Some("Enhanced with stronger language and professional tone.")
        );
    }
}
