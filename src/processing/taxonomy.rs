//! Keyword categories, job profiles and heading rules
//!
//! Everything the engine matches against lives in a [`Registry`] value that
//! is handed to the engine at construction time. The built-in registry is
//! `Registry::default()`; a TOML file with the same shape replaces it.

use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::sections::HeadingRules;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCategory {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobProfile {
    pub name: String,
    pub required: Vec<String>,
    #[serde(default)]
    pub preferred: Vec<String>,
    /// Display weight, shown in listings only
    #[serde(default = "default_profile_weight")]
    pub weight: f64,
}

fn default_profile_weight() -> f64 {
    1.0
}

impl JobProfile {
    /// Required followed by preferred keywords, without duplicates
    pub fn all_keywords(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.required
            .iter()
            .chain(self.preferred.iter())
            .map(|k| k.as_str())
            .filter(|k| seen.insert(k.to_lowercase()))
            .collect()
    }
}

/// Static configuration consumed by the analysis engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    pub categories: Vec<KeywordCategory>,
    pub profiles: Vec<JobProfile>,
    #[serde(default)]
    pub headings: HeadingRules,
}

impl Registry {
    /// Parse a registry from TOML and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let registry: Registry = toml::from_str(content)?;
        registry.validate()?;
        Ok(registry)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| {
            ResumeAnalyzerError::Configuration(format!(
                "Invalid registry file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Load from `path` when given, otherwise use the built-in registry
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(ResumeAnalyzerError::Configuration(
                    "Keyword category with empty name".to_string(),
                ));
            }
            if !names.insert(category.name.as_str()) {
                return Err(ResumeAnalyzerError::Configuration(format!(
                    "Duplicate keyword category: {}",
                    category.name
                )));
            }
        }

        let mut names = HashSet::new();
        for profile in &self.profiles {
            if profile.name.trim().is_empty() {
                return Err(ResumeAnalyzerError::Configuration(
                    "Job profile with empty name".to_string(),
                ));
            }
            if !names.insert(profile.name.as_str()) {
                return Err(ResumeAnalyzerError::Configuration(format!(
                    "Duplicate job profile: {}",
                    profile.name
                )));
            }
            if !profile.weight.is_finite() || profile.weight < 0.0 {
                return Err(ResumeAnalyzerError::Configuration(format!(
                    "Job profile '{}' has an invalid weight",
                    profile.name
                )));
            }
        }

        Ok(())
    }

    pub fn profile(&self, name: &str) -> Option<&JobProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    pub fn keyword_count(&self) -> usize {
        self.categories.iter().map(|c| c.keywords.len()).sum()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            profiles: default_profiles(),
            headings: HeadingRules::default(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_categories() -> Vec<KeywordCategory> {
    let category = |name: &str, keywords: &[&str]| KeywordCategory {
        name: name.to_string(),
        keywords: strings(keywords),
    };

    vec![
        category("languages", &[
            "Python", "Java", "JavaScript", "TypeScript", "C++", "C#", "Golang", "Rust",
            "Ruby", "PHP", "Swift", "Kotlin", "Scala", "SQL", "Bash", "MATLAB", "Perl",
            "Dart", "Elixir", "Haskell", "HTML", "CSS",
        ]),
        category("frameworks", &[
            "React", "Angular", "Vue", "Svelte", "Next.js", "Node.js", "Express.js",
            "Django", "Flask", "FastAPI", "Spring Boot", ".NET", "Ruby on Rails", "Laravel",
            "jQuery", "Bootstrap", "Tailwind", "Redux",
        ]),
        category("databases", &[
            "PostgreSQL", "MySQL", "MongoDB", "Redis", "SQLite", "Oracle", "SQL Server",
            "Cassandra", "DynamoDB", "Elasticsearch", "Snowflake", "BigQuery",
        ]),
        category("cloud", &[
            "AWS", "Azure", "GCP", "Google Cloud", "Heroku", "Firebase", "Lambda", "EC2",
            "S3", "CloudFormation", "Serverless",
        ]),
        category("devops", &[
            "Docker", "Kubernetes", "Terraform", "Ansible", "Jenkins", "CI/CD",
            "GitHub Actions", "GitLab CI", "Prometheus", "Grafana", "Linux", "Nginx", "Helm",
        ]),
        category("data_science", &[
            "Machine Learning", "Deep Learning", "TensorFlow", "PyTorch", "Scikit-learn",
            "Pandas", "NumPy", "NLP", "Computer Vision", "Spark", "Hadoop", "Tableau",
            "Power BI", "Statistics", "Data Analysis", "Data Visualization", "Jupyter",
        ]),
        category("tools", &[
            "Git", "GitHub", "Jira", "REST API", "RESTful", "GraphQL", "Microservices",
            "Agile", "Scrum", "Kafka", "RabbitMQ", "Postman", "Figma", "Webpack", "Excel",
        ]),
        category("fundamentals", &[
            "Algorithms", "Data Structures", "Object-Oriented Programming", "Design Patterns",
            "System Design", "Unit Testing",
        ]),
        category("soft_skills", &[
            "Leadership", "Communication", "Teamwork", "Problem Solving", "Collaboration",
            "Mentoring", "Project Management", "Critical Thinking", "Time Management",
            "Adaptability",
        ]),
    ]
}

fn default_profiles() -> Vec<JobProfile> {
    let profile = |name: &str, required: &[&str], preferred: &[&str]| JobProfile {
        name: name.to_string(),
        required: strings(required),
        preferred: strings(preferred),
        weight: 1.0,
    };

    vec![
        profile(
            "Software Engineer",
            &["Python", "Java", "Git", "SQL", "Algorithms"],
            &["Docker", "AWS", "Microservices", "CI/CD", "Agile", "Kubernetes"],
        ),
        profile(
            "Data Scientist",
            &["Python", "Machine Learning", "Statistics", "SQL", "Pandas"],
            &["TensorFlow", "PyTorch", "Scikit-learn", "Deep Learning", "NumPy", "Tableau", "Spark"],
        ),
        profile(
            "Frontend Developer",
            &["JavaScript", "HTML", "CSS", "React"],
            &["TypeScript", "Redux", "Next.js", "Webpack", "Tailwind", "Figma", "Vue"],
        ),
        profile(
            "Backend Developer",
            &["Java", "SQL", "REST API", "Microservices"],
            &["Spring Boot", "PostgreSQL", "Redis", "Kafka", "Docker", "AWS"],
        ),
        profile(
            "DevOps Engineer",
            &["Docker", "Kubernetes", "Linux", "CI/CD", "AWS"],
            &["Terraform", "Ansible", "Jenkins", "Prometheus", "Grafana", "Helm", "Python", "Bash"],
        ),
        profile(
            "Full Stack Developer",
            &["JavaScript", "React", "Node.js", "SQL", "Git"],
            &["TypeScript", "MongoDB", "Docker", "AWS", "GraphQL", "REST API"],
        ),
        profile(
            "Machine Learning Engineer",
            &["Python", "Machine Learning", "TensorFlow", "PyTorch"],
            &["Deep Learning", "NLP", "Computer Vision", "Docker", "Kubernetes", "Spark", "AWS"],
        ),
        profile(
            "Data Analyst",
            &["SQL", "Excel", "Data Analysis", "Tableau"],
            &["Python", "Power BI", "Statistics", "Data Visualization", "Pandas"],
        ),
    ]
}
