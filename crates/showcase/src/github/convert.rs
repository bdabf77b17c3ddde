//! Technology and category derivation for synced repositories.

use std::collections::HashSet;

use super::types::GitHubRepo;

/// Known topics and the technology they stand for.
const TOPIC_TECHNOLOGIES: &[(&str, &str)] = &[
    ("react", "React"),
    ("nextjs", "Next.js"),
    ("vue", "Vue.js"),
    ("angular", "Angular"),
    ("typescript", "TypeScript"),
    ("javascript", "JavaScript"),
    ("nodejs", "Node.js"),
    ("express", "Express.js"),
    ("mongodb", "MongoDB"),
    ("postgresql", "PostgreSQL"),
    ("mysql", "MySQL"),
    ("redis", "Redis"),
    ("docker", "Docker"),
    ("kubernetes", "Kubernetes"),
    ("aws", "AWS"),
    ("vercel", "Vercel"),
    ("tailwindcss", "Tailwind CSS"),
    ("bootstrap", "Bootstrap"),
    ("sass", "Sass"),
    ("webpack", "Webpack"),
    ("vite", "Vite"),
    ("prisma", "Prisma"),
    ("graphql", "GraphQL"),
    ("rest-api", "REST API"),
];

const PROFESSIONAL_KEYWORDS: &[&str] = &[
    "company",
    "work",
    "client",
    "enterprise",
    "business",
    "commercial",
];

const PERSONAL_KEYWORDS: &[&str] = &[
    "personal",
    "learning",
    "experiment",
    "tutorial",
    "practice",
    "hobby",
];

pub const CATEGORY_PROFESSIONAL: &str = "professional";
pub const CATEGORY_PERSONAL: &str = "personal";

/// Technology name for a topic, if it is a known one.
pub fn technology_for_topic(topic: &str) -> Option<&'static str> {
    TOPIC_TECHNOLOGIES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(topic))
        .map(|(_, technology)| *technology)
}

/// Languages (already ranked) followed by mapped topics, first occurrence wins.
pub fn technologies_for(languages: &[String], topics: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    languages
        .iter()
        .map(String::as_str)
        .chain(topics.iter().filter_map(|t| technology_for_topic(t)))
        .filter(|name| seen.insert(name.to_ascii_lowercase()))
        .map(String::from)
        .collect()
}

/// `professional` or `personal`, from keywords first and ownership second.
pub fn categorize_repository(repo: &GitHubRepo, topics: &[String], owner: &str) -> &'static str {
    let text = format!(
        "{} {} {}",
        repo.name,
        repo.description.as_deref().unwrap_or_default(),
        topics.join(" ")
    )
    .to_lowercase();

    if PROFESSIONAL_KEYWORDS.iter().any(|k| text.contains(k)) {
        return CATEGORY_PROFESSIONAL;
    }
    if PERSONAL_KEYWORDS.iter().any(|k| text.contains(k)) {
        return CATEGORY_PERSONAL;
    }

    let prefix = format!("{}/", owner.to_lowercase());
    if repo.full_name.to_lowercase().starts_with(&prefix) {
        CATEGORY_PERSONAL
    } else {
        CATEGORY_PROFESSIONAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, full_name: &str, description: Option<&str>) -> GitHubRepo {
        GitHubRepo {
            id: 1,
            name: name.to_string(),
            full_name: full_name.to_string(),
            description: description.map(String::from),
            html_url: format!("https://github.com/{full_name}"),
            homepage: None,
            language: None,
            stargazers_count: 0,
            forks_count: 0,
            topics: Vec::new(),
            archived: false,
            fork: false,
            created_at: None,
            updated_at: None,
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_languages_come_before_topics_without_duplicates() {
        let techs = technologies_for(
            &strings(&["TypeScript", "CSS"]),
            &strings(&["nextjs", "typescript", "unknown-topic", "Docker"]),
        );
        assert_eq!(techs, vec!["TypeScript", "CSS", "Next.js", "Docker"]);
    }

    #[test]
    fn test_professional_keywords_win_over_personal_ones() {
        let r = repo("client-portal", "octo/client-portal", Some("A learning project"));
        assert_eq!(categorize_repository(&r, &[], "octo"), CATEGORY_PROFESSIONAL);
    }

    #[test]
    fn test_personal_keywords_apply_next() {
        let r = repo("sandbox", "acme/sandbox", Some("Hobby experiments"));
        assert_eq!(categorize_repository(&r, &[], "octo"), CATEGORY_PERSONAL);
    }

    #[test]
    fn test_topics_feed_the_keyword_search() {
        let r = repo("dash", "acme/dash", None);
        assert_eq!(
            categorize_repository(&r, &strings(&["enterprise"]), "octo"),
            CATEGORY_PROFESSIONAL
        );
    }

    #[test]
    fn test_ownership_decides_otherwise() {
        let own = repo("site", "Octo/site", None);
        assert_eq!(categorize_repository(&own, &[], "octo"), CATEGORY_PERSONAL);

        let similar_prefix = repo("site", "octocat/site", None);
        assert_eq!(
            categorize_repository(&similar_prefix, &[], "octo"),
            CATEGORY_PROFESSIONAL
        );
    }
}
