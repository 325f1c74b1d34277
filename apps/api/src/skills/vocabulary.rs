//! Keyword vocabulary used when the LLM is unavailable.

/// Skills recognised by the keyword scan, in reporting order.
pub const COMMON_SKILLS: &[&str] = &[
    "JavaScript",
    "Python",
    "Java",
    "React",
    "Node.js",
    "SQL",
    "MongoDB",
    "AWS",
    "Docker",
    "Kubernetes",
    "Git",
    "REST API",
    "GraphQL",
    "HTML",
    "CSS",
    "TypeScript",
    "Angular",
    "Vue.js",
    "Express",
    "Spring",
    "Django",
    "Flask",
    "PostgreSQL",
    "MySQL",
    "Redis",
    "Elasticsearch",
    "Jenkins",
    "CI/CD",
    "Microservices",
    "API",
    "JSON",
    "XML",
    "Linux",
    "Windows",
    "MacOS",
    "Agile",
    "Scrum",
    "DevOps",
    "Cloud",
    "Azure",
    "GCP",
    "Terraform",
];

/// Returns every vocabulary skill mentioned in `text`, in vocabulary order.
///
/// A skill counts as mentioned when the lowercased text contains it verbatim,
/// without its dots ("nodejs"), or without its spaces ("restapi").
/// Plain substring search: "Java" is reported for a text mentioning only JavaScript.
pub fn keyword_scan(text: &str) -> Vec<String> {
    let text = text.to_lowercase();

    COMMON_SKILLS
        .iter()
        .filter(|skill| {
            let skill = skill.to_lowercase();
            let without_dots = skill.replace('.', "");
            let without_spaces: String = skill.split_whitespace().collect();
            text.contains(&skill) || text.contains(&without_dots) || text.contains(&without_spaces)
        })
        .map(|skill| skill.to_string())
        .collect()
}
