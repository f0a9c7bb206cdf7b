//! Response schemas sent with each request. The model is constrained to these
//! shapes; `validate` re-checks what comes back.

use serde_json::{json, Value};

fn string_list() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

pub fn resume_analysis() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "NUMBER" },
            "atsScore": { "type": "NUMBER" },
            "strengths": string_list(),
            "weaknesses": string_list(),
            "tips": string_list(),
            "skills": string_list(),
            "domain": { "type": "STRING" }
        },
        "required": ["score", "atsScore", "strengths", "weaknesses", "tips", "skills", "domain"]
    })
}

pub fn skill_gap() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "matchPercentage": { "type": "NUMBER" },
            "matchingSkills": string_list(),
            "missingSkills": string_list(),
            "prioritizedMissingSkills": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "skill": { "type": "STRING" },
                        "priority": { "type": "STRING", "enum": ["High", "Medium", "Low"] },
                        "suggestions": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "type": { "type": "STRING", "enum": ["course", "project"] },
                                    "title": { "type": "STRING" },
                                    "provider": { "type": "STRING" }
                                },
                                "required": ["type", "title"]
                            }
                        }
                    },
                    "required": ["skill", "priority"]
                }
            }
        },
        "required": ["matchPercentage", "matchingSkills", "missingSkills", "prioritizedMissingSkills"]
    })
}

pub fn roadmap() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "week": { "type": "INTEGER" },
                "title": { "type": "STRING" },
                "topics": string_list(),
                "practiceIdeas": string_list(),
                "resources": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "name": { "type": "STRING" },
                            "url": { "type": "STRING" }
                        },
                        "required": ["name", "url"]
                    }
                }
            },
            "required": ["week", "title", "topics", "practiceIdeas", "resources"]
        }
    })
}

pub fn voice_analysis() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "confidenceScore": { "type": "NUMBER" },
            "fillerWordCount": { "type": "INTEGER" },
            "speakingSpeed": { "type": "STRING" },
            "hesitationNotes": { "type": "STRING" },
            "tips": string_list()
        },
        "required": ["confidenceScore", "fillerWordCount", "speakingSpeed", "hesitationNotes", "tips"]
    })
}

pub fn interview_prep() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "role": { "type": "STRING" },
            "questions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING" },
                        "focus": { "type": "STRING" },
                        "difficulty": { "type": "STRING", "enum": ["Easy", "Medium", "Hard"] }
                    },
                    "required": ["question", "focus", "difficulty"]
                }
            }
        },
        "required": ["role", "questions"]
    })
}

pub fn shortlist() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "candidates": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "name": { "type": "STRING", "description": "Candidate identifier" },
                        "score": {
                            "type": "NUMBER",
                            "description": "Match percentage based on mandatory skills and context"
                        },
                        "reasoning": {
                            "type": "STRING",
                            "description": "Explanation for this ranking"
                        },
                        "technicalMatch": string_list(),
                        "softSkillAnalysis": { "type": "STRING" },
                        "requirementGaps": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "description": "Specific missing mandatory skills"
                        }
                    },
                    "required": [
                        "id", "name", "score", "reasoning",
                        "technicalMatch", "softSkillAnalysis", "requirementGaps"
                    ]
                }
            },
            "summary": { "type": "STRING" }
        },
        "required": ["candidates", "summary"]
    })
}
