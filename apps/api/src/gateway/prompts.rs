// Prompt templates for each gateway operation.
// Placeholders in braces are replaced before sending.

pub const RESUME_ANALYSIS_PROMPT: &str = "\
Analyze this resume for the domain: {domain}.
Score overall quality and ATS readiness from 0 to 100, list concrete strengths, \
weaknesses and improvement tips, and extract every technical skill mentioned.

Resume content:
{resume_text}";

pub const SKILL_GAP_PROMPT: &str = "\
Compare the user's skills [{skills}] with the requirements for a {target_role} role.
Give the match percentage from 0 to 100, the skills that already match, and the \
missing skills. Prioritize each missing skill as High, Medium or Low and, for \
missing skills, suggest a project or course.";

pub const ROADMAP_PROMPT: &str = "\
Generate a 4-week learning roadmap for a {target_role} who is missing [{skills}].
Number the weeks from 1. For each week give a title, key topics, practice ideas \
and resources with working URLs.";

pub const VOICE_ANALYSIS_PROMPT: &str = "\
Analyze this interview answer recording. Rate speaking confidence from 0 to 100, \
count filler words, describe speaking speed and any hesitation, and give tips.";

pub const INTERVIEW_PREP_PROMPT: &str = "\
Convert this job description into a role-specific interview preparation guide. \
Name the role and list questions with the focus area and difficulty (Easy, Medium or Hard).

Job description:
{jd_text}";

pub const SHORTLIST_PROMPT: &str = "\
Rank and shortlist candidates for the role of {job_role}.
Mandatory requirements: [{skills}].
{bias_instruction}
Score each candidate from 0 to 100 and return them best first, using the ids given.
Talent pool: {candidates}";

pub const BIAS_FREE_INSTRUCTION: &str = "\
IMPORTANT: This is a BIAS-FREE analysis. Do not consider names, gender, age, or \
school prestige. Evaluate purely on technical skills, projects, and demonstrated competency.";
