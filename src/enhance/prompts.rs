//! Prompt templates for enhancement and content generation

use serde::{Deserialize, Serialize};

/// CV field a piece of text belongs to. Picks the prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnhanceField {
    Summary,
    Education,
    Experience,
    /// Any other free-form field, enhanced with the generic template.
    Other,
}

impl EnhanceField {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnhanceField::Summary => "summary",
            EnhanceField::Education => "education",
            EnhanceField::Experience => "experience",
            EnhanceField::Other => "other",
        }
    }
}

/// What kind of content to generate from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerateKind {
    Summary,
    Experience,
    Skills,
}

impl GenerateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerateKind::Summary => "summary",
            GenerateKind::Experience => "experience",
            GenerateKind::Skills => "skills",
        }
    }
}

/// Optional context threaded into every prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnhancementContext {
    /// Program or role the CV targets, e.g. "MSc Computer Science".
    pub target_program: Option<String>,
    /// Requirements of the target program, pasted from the posting.
    pub program_requirements: Option<String>,
    /// Short blurb about the candidate.
    pub user_background: Option<String>,
}

/// Prompt templates keyed by field and generation kind
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub system: String,
    pub summary: String,
    pub education: String,
    pub experience: String,
    pub generic: String,
    pub generate_summary: String,
    pub generate_experience: String,
    pub generate_skills: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            system: SYSTEM_PROMPT.to_string(),
            summary: SUMMARY_TEMPLATE.to_string(),
            education: EDUCATION_TEMPLATE.to_string(),
            experience: EXPERIENCE_TEMPLATE.to_string(),
            generic: GENERIC_TEMPLATE.to_string(),
            generate_summary: GENERATE_SUMMARY_TEMPLATE.to_string(),
            generate_experience: GENERATE_EXPERIENCE_TEMPLATE.to_string(),
            generate_skills: GENERATE_SKILLS_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    pub fn system_prompt(&self) -> &str {
        &self.system
    }

    /// Render the enhancement prompt for one field.
    pub fn render_enhancement(
        &self,
        field: EnhanceField,
        content: &str,
        context: &EnhancementContext,
    ) -> String {
        let template = match field {
            EnhanceField::Summary => &self.summary,
            EnhanceField::Education => &self.education,
            EnhanceField::Experience => &self.experience,
            EnhanceField::Other => &self.generic,
        };
        // Only the summary prompt carries the full requirements dump.
        let with_requirements = field == EnhanceField::Summary;
        template
            .replace("{content}", content)
            .replace("{context}", &context_block(context, with_requirements))
    }

    /// Render the generation prompt for one content kind.
    pub fn render_generation(&self, kind: GenerateKind, context: &EnhancementContext) -> String {
        let template = match kind {
            GenerateKind::Summary => &self.generate_summary,
            GenerateKind::Experience => &self.generate_experience,
            GenerateKind::Skills => &self.generate_skills,
        };
        let program = context.target_program.as_deref().unwrap_or("academia");
        let audience = context.target_program.as_deref().unwrap_or("academic");
        template
            .replace("{program}", program)
            .replace("{audience}", audience)
            .replace("{context}", &context_block(context, true))
    }
}

/// Build the optional context lines injected into a template.
fn context_block(context: &EnhancementContext, with_requirements: bool) -> String {
    let mut block = String::new();
    if let Some(program) = &context.target_program {
        block.push_str(&format!("\nThis is for an application to: {}", program));
    }
    if with_requirements {
        if let Some(requirements) = &context.program_requirements {
            block.push_str(&format!("\nProgram requirements: {}", requirements));
        }
    }
    if let Some(background) = &context.user_background {
        block.push_str(&format!("\nCandidate background: {}", background));
    }
    if !block.is_empty() {
        block.push('\n');
    }
    block
}

const SYSTEM_PROMPT: &str = "You are an expert CV/resume editor specializing in academic and \
professional documents. Your task is to enhance the given text to make it more impactful, \
clear, and professional. Maintain the original meaning but improve the language, structure, \
and presentation.";

const SUMMARY_TEMPLATE: &str = r#"Enhance this professional summary for a CV or resume, making it more impactful and professional:

"{content}"
{context}
Improve the language, add relevant keywords, and make it more achievement-focused.
Do not invent new qualifications, just enhance the existing content.
Return the improved version only."#;

const EDUCATION_TEMPLATE: &str = r#"Enhance this education description for a CV or resume:

"{content}"
{context}
Make it more focused on academic achievements, relevant coursework, and skills gained.
Use professional academic language and highlight key accomplishments.
Return the improved version only."#;

const EXPERIENCE_TEMPLATE: &str = r#"Enhance this work experience description for a CV or resume:

"{content}"
{context}
Improve it by:
1. Using strong action verbs
2. Making achievements more quantifiable if possible
3. Focusing on relevant skills and accomplishments
4. Creating clear and concise bullet points (if appropriate)

Return the improved version only."#;

const GENERIC_TEMPLATE: &str = r#"Enhance the following content for a CV or resume, making it more professional, clear, and impactful:

"{content}"
{context}
Improve the language, structure, and presentation while maintaining the original meaning.
Return the improved version only."#;

const GENERATE_SUMMARY_TEMPLATE: &str = r#"Generate a professional summary for a CV in the field of {program}.
{context}
Focus on making it achievement-oriented, concise, and highlighting core competencies.
Include relevant keywords for {audience} applications.
Return the summary only, without headings."#;

const GENERATE_EXPERIENCE_TEMPLATE: &str = r#"Generate professional experience bullet points for a CV in the field of {program}.
{context}
Create 4-5 bullet points that showcase relevant skills, achievements, and responsibilities.
Use strong action verbs and include quantifiable results where appropriate.
Return the bullet points only, one per line."#;

const GENERATE_SKILLS_TEMPLATE: &str = r#"Generate a list of 8-10 relevant skills for a CV in the field of {program}.
{context}
Include both technical skills and soft skills appropriate for {audience} applications.
Return the skills as a comma-separated list only."#;
