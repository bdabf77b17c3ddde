//! The single technology name → category table.
//!
//! Every path that creates a [`Technology`](crate::entity::technology) row
//! (archive ingestion, re-analysis, admin edits, GitHub sync) resolves the
//! category here, exactly once, when the row is first created.

use crate::entity::technology_category::TechnologyCategory;

use TechnologyCategory::*;

/// Canonical names with their category. Lookups are case-insensitive.
const CATEGORIES: &[(&str, TechnologyCategory)] = &[
    // Frontend
    ("React", Frontend),
    ("Vue.js", Frontend),
    ("Vue", Frontend),
    ("Angular", Frontend),
    ("Next.js", Frontend),
    ("Nuxt.js", Frontend),
    ("Svelte", Frontend),
    ("HTML", Frontend),
    ("CSS", Frontend),
    ("SCSS", Frontend),
    ("Sass", Frontend),
    ("Tailwind CSS", Frontend),
    ("Bootstrap", Frontend),
    // Languages
    ("TypeScript", Language),
    ("JavaScript", Language),
    ("C", Language),
    ("C++", Language),
    ("Shell", Language),
    ("Lua", Language),
    // Backend
    ("Python", Backend),
    ("Node.js", Backend),
    ("Express.js", Backend),
    ("Django", Backend),
    ("Flask", Backend),
    ("FastAPI", Backend),
    ("Java", Backend),
    ("C#", Backend),
    ("PHP", Backend),
    ("Go", Backend),
    ("Rust", Backend),
    ("Ruby", Backend),
    ("GraphQL", Backend),
    ("REST API", Backend),
    // Mobile
    ("Kotlin", Mobile),
    ("Swift", Mobile),
    ("Dart", Mobile),
    ("Flutter", Mobile),
    ("React Native", Mobile),
    // Databases
    ("MongoDB", Database),
    ("PostgreSQL", Database),
    ("MySQL", Database),
    ("SQLite", Database),
    ("Redis", Database),
    ("Prisma", Database),
    // Tooling
    ("Docker", Tool),
    ("Dockerfile", Tool),
    ("Kubernetes", Tool),
    ("Git", Tool),
    ("Webpack", Tool),
    ("Vite", Tool),
    ("npm", Tool),
    ("yarn", Tool),
    ("pip", Tool),
    ("Makefile", Tool),
    // Cloud
    ("AWS", Cloud),
    ("Azure", Cloud),
    ("Google Cloud", Cloud),
    ("Vercel", Cloud),
    ("Netlify", Cloud),
    ("Heroku", Cloud),
];

fn lookup(name: &str) -> Option<&'static (&'static str, TechnologyCategory)> {
    let name = name.trim();
    CATEGORIES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
}

/// Resolve the category for a technology name, `Other` when unmapped.
pub fn category_for(name: &str) -> TechnologyCategory {
    lookup(name).map(|(_, category)| *category).unwrap_or(Other)
}

/// The table's spelling of `name` when it is a known technology, otherwise
/// the trimmed input.
pub fn canonical_name(name: &str) -> &str {
    match lookup(name) {
        Some((known, _)) => *known,
        None => name.trim(),
    }
}
