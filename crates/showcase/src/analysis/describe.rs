//! Rule-based project descriptions.

use super::detector::DetectedTechnology;
use crate::entity::technology_category::TechnologyCategory;

/// Facts the description rules are evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DescriptionSignals {
    pub frontend: bool,
    pub backend: bool,
    pub database: bool,
    pub api_path: bool,
    pub test_path: bool,
    pub docker_path: bool,
}

impl DescriptionSignals {
    pub fn collect<P: AsRef<str>>(technologies: &[DetectedTechnology], paths: &[P]) -> Self {
        let has = |category| technologies.iter().any(|t| t.category == category);
        let path_mentions = |needle: &str| {
            paths
                .iter()
                .any(|p| p.as_ref().to_ascii_lowercase().contains(needle))
        };

        Self {
            frontend: has(TechnologyCategory::Frontend),
            backend: has(TechnologyCategory::Backend),
            database: has(TechnologyCategory::Database),
            api_path: path_mentions("api"),
            test_path: path_mentions("test"),
            docker_path: path_mentions("docker"),
        }
    }
}

struct Rule {
    applies: fn(&DescriptionSignals) -> bool,
    clause: &'static str,
}

/// Evaluated in order; every matching rule contributes its clause.
const RULES: &[Rule] = &[
    Rule {
        applies: |s| s.frontend && s.backend,
        clause: "It is a full-stack application covering both the user interface and the server side.",
    },
    Rule {
        applies: |s| s.frontend && !s.backend,
        clause: "It is a frontend application focused on the user interface.",
    },
    Rule {
        applies: |s| s.backend && !s.frontend,
        clause: "It is a backend service implementing server-side logic.",
    },
    Rule {
        applies: |s| s.database,
        clause: "Data is persisted in a database.",
    },
    Rule {
        applies: |s| s.api_path,
        clause: "It exposes an API for clients to consume.",
    },
    Rule {
        applies: |s| s.test_path,
        clause: "The codebase includes automated tests.",
    },
    Rule {
        applies: |s| s.docker_path,
        clause: "It ships with Docker configuration for containerized deployment.",
    },
];

const NO_STACK: &str = "Source archive with no recognized technology stack.";

/// Build the description for a detected stack and the enumerated paths.
pub fn describe<P: AsRef<str>>(technologies: &[DetectedTechnology], paths: &[P]) -> String {
    let signals = DescriptionSignals::collect(technologies, paths);

    let lead = if technologies.is_empty() {
        NO_STACK.to_string()
    } else {
        let names: Vec<&str> = technologies.iter().map(|t| t.name.as_str()).collect();
        format!("Built with {}.", join_names(&names))
    };

    std::iter::once(lead.as_str())
        .chain(
            RULES
                .iter()
                .filter(|rule| (rule.applies)(&signals))
                .map(|rule| rule.clause),
        )
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => (*only).to_string(),
        [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
    }
}
