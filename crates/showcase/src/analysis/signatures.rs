//! Static technology signature table.
//!
//! Confidence values are ranking weights only. They order the detected list
//! and carry no statistical meaning.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// A technology and the case-insensitive patterns that reveal it.
#[derive(Debug)]
pub struct TechnologySignature {
    pub name: &'static str,
    pub confidence: f32,
    pub patterns: Vec<Regex>,
}

impl TechnologySignature {
    /// Whether any pattern matches `haystack`.
    pub fn matches(&self, haystack: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(haystack))
    }
}

type RawSignature = (&'static str, f32, &'static [&'static str]);

const RAW_SIGNATURES: &[RawSignature] = &[
    // Frontend
    ("React", 0.9, &["react", r"\.(jsx|tsx)$", "create-react-app"]),
    ("Vue.js", 0.9, &[r"\bvue\b", r"\.vue$", "vue-cli"]),
    ("Angular", 0.9, &[r"@angular/", r"angular\.json"]),
    ("Next.js", 0.9, &[r"\bnext\b", r"next\.config"]),
    ("HTML", 0.6, &[r"\.html?$", "<!DOCTYPE html"]),
    ("CSS", 0.6, &[r"\.css$", r"\.scss$", r"\.sass$"]),
    ("Tailwind CSS", 0.8, &["tailwind", "@tailwind"]),
    ("Bootstrap", 0.8, &["bootstrap"]),
    ("Sass", 0.8, &[r"\.scss$", r"\.sass$", r"@import.*sass"]),
    // Languages
    ("TypeScript", 0.8, &["typescript", r"\.tsx?$", r"tsconfig\.json"]),
    ("JavaScript", 0.7, &["javascript", r"\.jsx?$", r"package\.json"]),
    // Backend
    ("Python", 0.9, &["python", r"\.py$", r"requirements\.txt", r"pyproject\.toml"]),
    ("Node.js", 0.9, &[r"\bnode\b", r"package\.json", r"server\.js$"]),
    ("Express.js", 0.8, &[r"\bexpress\b", r"app\.get\(", r"app\.post\("]),
    ("Django", 0.9, &["django", r"manage\.py", r"settings\.py"]),
    ("Flask", 0.8, &[r"\bflask\b", "from flask import"]),
    ("FastAPI", 0.8, &["fastapi", "from fastapi import"]),
    ("Java", 0.9, &[r"\.java$", r"\.jar$", r"pom\.xml", r"build\.gradle"]),
    ("C#", 0.9, &[r"\.cs$", r"\.csproj$", r"using System;"]),
    ("PHP", 0.8, &[r"\.php$", r"<\?php"]),
    // Databases
    ("MongoDB", 0.8, &["mongodb", "mongoose"]),
    ("PostgreSQL", 0.8, &["postgresql", "postgres", r"\bpg_"]),
    ("MySQL", 0.8, &["mysql", "mysqli"]),
    ("SQLite", 0.7, &["sqlite", r"\.db$"]),
    ("Redis", 0.8, &[r"\bredis\b"]),
    // Tooling
    ("Docker", 0.8, &["docker", "dockerfile", "docker-compose"]),
    ("Git", 0.6, &[r"(^|/)\.gitignore$", r"(^|/)\.gitattributes$"]),
    ("Webpack", 0.8, &["webpack"]),
    ("Vite", 0.8, &[r"\bvite\b", r"vite\.config"]),
    ("npm", 0.6, &[r"package\.json", r"package-lock\.json"]),
    ("yarn", 0.7, &[r"yarn\.lock", r"\byarn\b"]),
    ("pip", 0.6, &[r"requirements\.txt", r"\bpip install\b"]),
    // Cloud
    ("AWS", 0.8, &[r"\baws\b", "amazonaws", r"\bs3\b", r"\bec2\b"]),
    ("Vercel", 0.8, &["vercel"]),
    ("Netlify", 0.8, &["netlify"]),
    ("Heroku", 0.8, &["heroku", r"(^|/)Procfile$"]),
];

/// The compiled signature table, in declaration order.
pub static SIGNATURES: LazyLock<Vec<TechnologySignature>> = LazyLock::new(|| {
    RAW_SIGNATURES
        .iter()
        .map(|(name, confidence, patterns)| TechnologySignature {
            name: *name,
            confidence: *confidence,
            patterns: patterns.iter().filter_map(|p| compile(name, p)).collect(),
        })
        .collect()
});

fn compile(name: &str, pattern: &str) -> Option<Regex> {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::error!(technology = name, pattern, error = %e, "Invalid signature pattern");
            None
        }
    }
}
