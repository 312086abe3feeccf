//! Known-skills vocabulary for keyword matching.

/// Skills recognised by the keyword fallback, in match order.
///
/// Entries are unique case-insensitively. Very short names that occur inside
/// ordinary words (`C`, `R`, `Go`) are left out.
pub const KNOWN_SKILLS: &[&str] = &[
    // Languages
    "Python",
    "Java",
    "JavaScript",
    "TypeScript",
    "Rust",
    "Golang",
    "C++",
    "C#",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
    "Scala",
    "Haskell",
    "Elixir",
    "SQL",
    "Bash",
    // Web
    "HTML",
    "CSS",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Django",
    "Flask",
    "FastAPI",
    "Spring",
    "GraphQL",
    "REST",
    // Data
    "PostgreSQL",
    "MySQL",
    "MongoDB",
    "Redis",
    "Elasticsearch",
    "Kafka",
    "Spark",
    "Hadoop",
    "Pandas",
    "NumPy",
    "TensorFlow",
    "PyTorch",
    "Scikit-learn",
    "Machine Learning",
    "Deep Learning",
    "NLP",
    // Infrastructure
    "Docker",
    "Kubernetes",
    "Terraform",
    "Ansible",
    "AWS",
    "Azure",
    "GCP",
    "Linux",
    "Git",
    "Jenkins",
    "CI/CD",
    "Microservices",
    // Practices
    "Agile",
    "Scrum",
];

/// Known skills that occur in `text`, case-insensitively, in vocabulary
/// order.
pub fn match_known_skills(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    KNOWN_SKILLS
        .iter()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect()
}
