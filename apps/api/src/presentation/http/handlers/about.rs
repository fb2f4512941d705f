use crate::domain::project::value_objects::Category;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AboutSection {
    pub heading: &'static str,
    pub paragraphs: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct AboutResponse {
    pub name: &'static str,
    pub tagline: &'static str,
    pub sections: Vec<AboutSection>,
    pub submission_guidelines: Vec<&'static str>,
}

pub async fn about() -> Json<AboutResponse> {
    Json(AboutResponse {
        name: "The Vibe Index",
        tagline: "Discover and explore the coolest vibe coding projects from developers around the world.",
        sections: vec![
            AboutSection {
                heading: "Our Mission",
                paragraphs: vec![
                    "The Vibe Index showcases creative, innovative and visually striking coding projects from developers everywhere. Code can be both functional and beautiful.",
                    "Come here for inspiration, for resources for your next project, or to see what modern web technologies can do.",
                ],
            },
            AboutSection {
                heading: "How It Works",
                paragraphs: vec![
                    "Developers submit their projects through the submission form. Each entry appears as a card that visitors can like and open.",
                    "Search, filter and sort projects by popularity, views or recency, over any time range.",
                ],
            },
        ],
        submission_guidelines: vec![
            "Projects must be related to web development, design, or digital creativity.",
            "Your project should be publicly accessible and have proper documentation.",
            "Include high-quality screenshots or demo links to showcase your project.",
            "We prioritize projects with unique visual aesthetics or interesting interactions.",
        ],
    })
}

pub async fn list_categories() -> Json<Vec<&'static str>> {
    Json(Category::ALL.iter().map(Category::as_str).collect())
}
